//! Serde data file structs for catalog content and user snapshots.
//!
//! These structs define the on-disk format for items, recipes, inventories
//! and price books. They are deserialized from RON, JSON, or TOML files and
//! then resolved into core types by the loader.

use reagent_core::AcquisitionMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===========================================================================
// Catalog: Items
// ===========================================================================

/// An item definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub craftable: bool,
    #[serde(default)]
    pub marketable: bool,
    #[serde(default)]
    pub market_id: Option<u32>,
    #[serde(default)]
    pub vendor_price: Option<f64>,
    #[serde(default)]
    pub market_price: Option<f64>,
    pub acquisition: AcquisitionMethod,
    #[serde(default)]
    pub note: Option<String>,
}

// ===========================================================================
// Catalog: Recipes
// ===========================================================================

/// A recipe ingredient, in short tuple form or full form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientData {
    /// Short form: `("item_key", quantity_per_unit)`.
    Short(String, u32),
    /// Full form with explicit fields.
    Full { item: String, quantity: u32 },
}

impl IngredientData {
    pub fn item(&self) -> &str {
        match self {
            IngredientData::Short(item, _) | IngredientData::Full { item, .. } => item,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            IngredientData::Short(_, q) | IngredientData::Full { quantity: q, .. } => *q,
        }
    }
}

/// A recipe definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub output: String,
    #[serde(default)]
    pub method: Option<String>,
    pub ingredients: Vec<IngredientData>,
}

// ===========================================================================
// User snapshots
// ===========================================================================

/// Owned quantities. Negative values are clamped to zero on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFile {
    #[serde(default)]
    pub owned: BTreeMap<String, i64>,
}

/// Price overrides plus the time of the last market refresh (unix ms).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
}

// ===========================================================================
// TOML wrappers (TOML does not support top-level arrays)
// ===========================================================================

/// Wrapper for a list of items in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlItems {
    pub items: Vec<ItemData>,
}

/// Wrapper for a list of recipes in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRecipes {
    pub recipes: Vec<RecipeData>,
}

// ===========================================================================
// Tests
// ===========================================================================
