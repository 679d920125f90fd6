//! Material resolution: expands a target item into the tree of everything
//! still missing to produce it.
//!
//! Quantities flow top-down and costs flow bottom-up. A node that inventory
//! already covers is neither crafted nor bought. A craftable node with a
//! recipe is expanded for its *missing* quantity only, and its cost is the
//! sum of its ingredients' costs. Every other node is bought at its unit
//! price.
//!
//! Inventory is read per occurrence: two branches that both use an item each
//! see the full owned quantity. Nothing is decremented while the tree is
//! built, so the same snapshot always yields the same tree.

use crate::catalog::{AcquisitionMethod, Catalog, Recipe};
use crate::id::ItemId;
use crate::inventory::Inventory;
use crate::price::PriceBook;
use crate::silver::{Silver, cost_of};

// ---------------------------------------------------------------------------
// Result tree
// ---------------------------------------------------------------------------

/// One visited item occurrence in the resolution tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultNode {
    pub item: ItemId,
    pub key: String,
    pub name: String,
    /// Distance from the root (root is 0).
    pub depth: usize,
    /// Quantity the parent asked for.
    pub quantity_needed: u64,
    /// Inventory snapshot for this item.
    pub quantity_owned: u64,
    /// `quantity_needed - quantity_owned`, floored at zero.
    pub quantity_missing: u64,
    pub is_complete: bool,
    pub acquisition_method: AcquisitionMethod,
    pub vendor_price: Option<Silver>,
    pub default_market_price: Option<Silver>,
    /// Resolved price per unit (override, market default, vendor, zero).
    pub unit_price: Silver,
    /// The recipe used to craft the missing quantity, if the node was expanded.
    pub recipe: Option<RecipeChoice>,
    /// Cost of everything still missing in this subtree.
    pub total_cost: Silver,
    /// Children in recipe declaration order. Empty for leaves.
    pub ingredients: Vec<ResultNode>,
}

/// Which recipe variant a node was crafted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChoice {
    /// Position among the item's recipes in declaration order.
    pub index: usize,
    pub method: Option<String>,
}

impl ResultNode {
    /// Whether this node was bought rather than crafted.
    pub fn is_leaf(&self) -> bool {
        self.recipe.is_none()
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of levels in the tree below and including this node.
    pub fn height(&self) -> usize {
        1 + self
            .ingredients
            .iter()
            .map(ResultNode::height)
            .max()
            .unwrap_or(0)
    }

    /// First direct ingredient with the given key.
    pub fn ingredient(&self, key: &str) -> Option<&ResultNode> {
        self.ingredients.iter().find(|n| n.key == key)
    }
}

/// Pre-order iterator returned by [`ResultNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a ResultNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ResultNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.ingredients.iter().rev());
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Expanding `item` would re-enter a recipe that is already being expanded.
    #[error("cyclic recipe graph at '{item}': {}", path.join(" -> "))]
    CyclicRecipe { item: String, path: Vec<String> },
}

// ---------------------------------------------------------------------------
// Recipe selection
// ---------------------------------------------------------------------------

/// Pick the recipe to craft with.
///
/// A single recipe is always used. Among several, the one tagged `method`
/// wins; with no match (or no method) the first declared recipe is used.
/// Returns `None` only for an empty list.
pub fn select_recipe<'a>(recipes: &'a [Recipe], method: Option<&str>) -> Option<&'a Recipe> {
    select_recipe_index(recipes, method).map(|i| &recipes[i])
}

fn select_recipe_index(recipes: &[Recipe], method: Option<&str>) -> Option<usize> {
    if recipes.is_empty() {
        return None;
    }
    if recipes.len() > 1
        && let Some(wanted) = method
        && let Some(i) = recipes
            .iter()
            .position(|r| r.method.as_deref() == Some(wanted))
    {
        return Some(i);
    }
    Some(0)
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Read-only view over a catalog that builds result trees.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

/// Inputs shared by every node of one resolution.
struct Pass<'p> {
    method: Option<&'p str>,
    inventory: &'p Inventory,
    prices: &'p PriceBook,
    /// Items whose recipes are currently being expanded, root first.
    expanding: Vec<ItemId>,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve `quantity` units of the item keyed `key`.
    ///
    /// Fails with [`ResolveError::UnknownItem`] if `key` is not in the
    /// catalog, and with [`ResolveError::CyclicRecipe`] if the recipes
    /// reachable from it loop. Unknown ingredients are skipped.
    pub fn resolve(
        &self,
        key: &str,
        quantity: u64,
        method: Option<&str>,
        inventory: &Inventory,
        prices: &PriceBook,
    ) -> Result<ResultNode, ResolveError> {
        let id = self
            .catalog
            .item_id(key)
            .ok_or_else(|| ResolveError::UnknownItem(key.to_string()))?;

        let mut pass = Pass {
            method,
            inventory,
            prices,
            expanding: Vec::new(),
        };
        self.resolve_node(id, quantity, 0, &mut pass)
    }

    fn resolve_node(
        &self,
        id: ItemId,
        quantity_needed: u64,
        depth: usize,
        pass: &mut Pass<'_>,
    ) -> Result<ResultNode, ResolveError> {
        let item = self
            .catalog
            .get_item(id)
            .ok_or_else(|| ResolveError::UnknownItem(format!("{id:?}")))?;

        let quantity_owned = pass.inventory.owned(&item.key);
        let quantity_missing = quantity_needed.saturating_sub(quantity_owned);
        let unit_price = pass.prices.unit_price(item);

        let mut node = ResultNode {
            item: id,
            key: item.key.clone(),
            name: item.name.clone(),
            depth,
            quantity_needed,
            quantity_owned,
            quantity_missing,
            is_complete: quantity_missing == 0,
            acquisition_method: item.acquisition_method,
            vendor_price: item.vendor_price,
            default_market_price: item.default_market_price,
            unit_price,
            recipe: None,
            total_cost: Silver::ZERO,
            ingredients: Vec::new(),
        };

        if quantity_missing == 0 {
            return Ok(node);
        }

        let recipes = self.catalog.recipes_for(id);
        let selected = if item.is_craftable {
            select_recipe_index(recipes, pass.method)
        } else {
            None
        };

        let Some(index) = selected else {
            node.total_cost = cost_of(quantity_missing, unit_price);
            return Ok(node);
        };

        if pass.expanding.contains(&id) {
            return Err(self.cycle_error(id, &pass.expanding));
        }

        let recipe = &recipes[index];
        pass.expanding.push(id);

        let mut total = Silver::ZERO;
        for entry in &recipe.ingredients {
            let Some(child_id) = self.catalog.item_id(&entry.item) else {
                tracing::debug!(
                    parent = %item.key,
                    ingredient = %entry.item,
                    "skipping unknown ingredient"
                );
                continue;
            };
            let child_needed = u64::from(entry.quantity_per_unit).saturating_mul(quantity_missing);
            let child = self.resolve_node(child_id, child_needed, depth + 1, pass)?;
            total = total.saturating_add(child.total_cost);
            node.ingredients.push(child);
        }

        pass.expanding.pop();

        node.recipe = Some(RecipeChoice {
            index,
            method: recipe.method.clone(),
        });
        node.total_cost = total;
        Ok(node)
    }

    fn cycle_error(&self, id: ItemId, expanding: &[ItemId]) -> ResolveError {
        let key_of = |i: ItemId| {
            self.catalog
                .get_item(i)
                .map(|it| it.key.clone())
                .unwrap_or_else(|| format!("{i:?}"))
        };
        let start = expanding.iter().position(|&i| i == id).unwrap_or(0);
        let mut path: Vec<String> = expanding[start..].iter().map(|&i| key_of(i)).collect();
        path.push(key_of(id));
        ResolveError::CyclicRecipe {
            item: key_of(id),
            path,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
