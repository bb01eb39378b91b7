//! # Catalog Types
//!
//! Product and add-on catalog types for the crumbcart order engine.
//! Catalogs are read-only collaborators, loaded from `config/catalog.toml`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bespoke product in the catalog (a cake base, a pastry tray, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code (e.g., "choc-fudge-round")
    pub product_code: String,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Fixed price component, independent of servings
    pub base_price: Decimal,

    /// Price added per serving
    pub price_per_serving: Decimal,

    /// Minimum servings the kitchen will produce
    pub min_servings: u32,

    /// Maximum servings the kitchen will produce
    pub max_servings: u32,

    /// Preparation lead time, in hours
    pub preparation_hours: i64,

    /// Whether this product is available for new orders
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Check whether a servings count is inside this product's range
    pub fn servings_in_range(&self, servings: u32) -> bool {
        servings >= self.min_servings && servings <= self.max_servings
    }
}

/// How an add-on's price modifier is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddOnPriceType {
    /// A fixed amount per unit
    Flat,
    /// A percentage of the order's base price, per unit
    Percentage,
    /// A fixed amount per serving, per unit
    PerServing,
}

/// An optional extra selectable on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOn {
    /// Unique add-on code (e.g., "fondant-finish")
    pub addon_code: String,

    /// Display name
    pub name: String,

    /// Price modifier, interpreted per `price_type`
    pub price_modifier: Decimal,

    /// How the modifier is applied
    pub price_type: AddOnPriceType,

    /// Category this add-on belongs to (selection rules live on the category)
    pub category_code: String,

    /// Whether this add-on is available for new orders
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Selection mode for an add-on category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    /// At most one add-on from the category
    Single,
    /// Any number of add-ons, bounded by `max_selections` if set
    #[default]
    Multiple,
}

/// An add-on category with its selection rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnCategory {
    /// Unique category code (e.g., "frosting", "toppers")
    pub category_code: String,

    /// Display name
    pub name: String,

    /// Single-choice or multi-choice
    #[serde(default)]
    pub selection: SelectionMode,

    /// A valid order must select at least one add-on from this category
    #[serde(default)]
    pub required: bool,

    /// Cap on distinct selections for multi-choice categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a product by code
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_code == code)
    }

    /// Get all products available for ordering
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }
}

/// Add-on catalog with category metadata (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddOnCatalog {
    #[serde(default)]
    pub addons: Vec<AddOn>,
    #[serde(default)]
    pub categories: Vec<AddOnCategory>,
}

impl AddOnCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an add-on by code
    pub fn find_by_code(&self, code: &str) -> Option<&AddOn> {
        self.addons.iter().find(|a| a.addon_code == code)
    }

    /// Find a category by code
    pub fn category(&self, code: &str) -> Option<&AddOnCategory> {
        self.categories.iter().find(|c| c.category_code == code)
    }

    /// All categories a valid order must cover
    pub fn required_categories(&self) -> impl Iterator<Item = &AddOnCategory> {
        self.categories.iter().filter(|c| c.required)
    }

    /// Get all add-ons available for ordering
    pub fn active_addons(&self) -> impl Iterator<Item = &AddOn> {
        self.addons.iter().filter(|a| a.active)
    }
}

/// The full catalog file: products, add-ons, and category rules together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub addons: Vec<AddOn>,
    #[serde(default)]
    pub categories: Vec<AddOnCategory>,
}

impl CatalogFile {
    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Split into the two catalog collaborators
    pub fn into_catalogs(self) -> (ProductCatalog, AddOnCatalog) {
        (
            ProductCatalog {
                products: self.products,
            },
            AddOnCatalog {
                addons: self.addons,
                categories: self.categories,
            },
        )
    }
}
