use crate::id::ItemId;
use crate::silver::Silver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an item is usually obtained. Informational only; the resolver never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    Vendor,
    Market,
    Craft,
    Farm,
    Exchange,
}

impl AcquisitionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AcquisitionMethod::Vendor => "vendor",
            AcquisitionMethod::Market => "market",
            AcquisitionMethod::Craft => "craft",
            AcquisitionMethod::Farm => "farm",
            AcquisitionMethod::Exchange => "exchange",
        }
    }
}

/// An item definition in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Stable string key, e.g. `"moon_opal"`.
    pub key: String,
    /// Display name.
    pub name: String,
    pub is_craftable: bool,
    pub is_marketable: bool,
    /// Key of the item on the external market, if it trades there.
    pub market_id: Option<u32>,
    /// Fixed NPC price.
    pub vendor_price: Option<Silver>,
    /// Fallback unit price when no override is supplied.
    pub default_market_price: Option<Silver>,
    pub acquisition_method: AcquisitionMethod,
    pub acquisition_note: Option<String>,
}

impl Item {
    /// A non-craftable, non-marketable item with no prices. Use the builder
    /// methods to fill in the rest.
    pub fn new(key: &str, name: &str, acquisition_method: AcquisitionMethod) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            is_craftable: false,
            is_marketable: false,
            market_id: None,
            vendor_price: None,
            default_market_price: None,
            acquisition_method,
            acquisition_note: None,
        }
    }

    pub fn craftable(mut self) -> Self {
        self.is_craftable = true;
        self
    }

    pub fn marketable(mut self, market_id: Option<u32>) -> Self {
        self.is_marketable = true;
        self.market_id = market_id;
        self
    }

    pub fn with_vendor_price(mut self, price: Silver) -> Self {
        self.vendor_price = Some(price);
        self
    }

    pub fn with_market_price(mut self, price: Silver) -> Self {
        self.default_market_price = Some(price);
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.acquisition_note = Some(note.to_string());
        self
    }
}

/// One ingredient line of a recipe. The item is referenced by key and is not
/// required to exist in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeEntry {
    pub item: String,
    pub quantity_per_unit: u32,
}

impl RecipeEntry {
    pub fn new(item: &str, quantity_per_unit: u32) -> Self {
        Self {
            item: item.to_string(),
            quantity_per_unit,
        }
    }
}

/// A recipe producing one unit of `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub output: String,
    pub ingredients: Vec<RecipeEntry>,
    /// Crafting path tag such as `"cheap"` or `"fast"`.
    pub method: Option<String>,
}

/// Builder for constructing an immutable [`Catalog`].
///
/// Items are registered first; recipes may be registered in any order
/// relative to items and are resolved against them in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: Vec<Item>,
    item_key_to_id: HashMap<String, ItemId>,
    recipes: Vec<Recipe>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Returns its handle.
    pub fn register_item(&mut self, item: Item) -> Result<ItemId, CatalogError> {
        if self.item_key_to_id.contains_key(&item.key) {
            return Err(CatalogError::DuplicateItem(item.key));
        }
        let id = ItemId(self.items.len() as u32);
        self.item_key_to_id.insert(item.key.clone(), id);
        self.items.push(item);
        Ok(id)
    }

    /// Register a recipe. Recipes for the same output keep their
    /// registration order, which is the fallback order for method selection.
    pub fn register_recipe(
        &mut self,
        output: &str,
        method: Option<&str>,
        ingredients: Vec<RecipeEntry>,
    ) {
        self.recipes.push(Recipe {
            output: output.to_string(),
            ingredients,
            method: method.map(str::to_string),
        });
    }

    /// Lookup item handle by key.
    pub fn item_id(&self, key: &str) -> Option<ItemId> {
        self.item_key_to_id.get(key).copied()
    }

    /// Finalize and build the immutable catalog.
    ///
    /// Fails if a recipe's output is not a registered item. Ingredients that
    /// reference unknown items are kept and reported with a warning.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut recipes_by_output: Vec<Vec<Recipe>> = vec![Vec::new(); self.items.len()];

        for recipe in self.recipes {
            let id = self
                .item_key_to_id
                .get(&recipe.output)
                .copied()
                .ok_or_else(|| CatalogError::UnknownOutput(recipe.output.clone()))?;

            for entry in &recipe.ingredients {
                if !self.item_key_to_id.contains_key(&entry.item) {
                    tracing::warn!(
                        output = %recipe.output,
                        ingredient = %entry.item,
                        "recipe references an unknown item; it will be skipped during resolution"
                    );
                }
            }

            recipes_by_output[id.index()].push(recipe);
        }

        Ok(Catalog {
            items: self.items,
            item_key_to_id: self.item_key_to_id,
            recipes_by_output,
        })
    }
}

/// Immutable item and recipe catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Item>,
    item_key_to_id: HashMap<String, ItemId>,
    /// Indexed by output `ItemId`, in registration order.
    recipes_by_output: Vec<Vec<Recipe>>,
}

impl Catalog {
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn item_id(&self, key: &str) -> Option<ItemId> {
        self.item_key_to_id.get(key).copied()
    }

    pub fn item_by_key(&self, key: &str) -> Option<&Item> {
        self.item_id(key).and_then(|id| self.get_item(id))
    }

    /// Recipes producing `id`, in declaration order. Empty if none.
    pub fn recipes_for(&self, id: ItemId) -> &[Recipe] {
        self.recipes_by_output
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate items in registration order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u32), item))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes_by_output.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate item key: {0}")]
    DuplicateItem(String),
    #[error("recipe output '{0}' is not a registered item")]
    UnknownOutput(String),
}
