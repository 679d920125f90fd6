//! Request-level aggregates over a resolution tree.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::id::ItemId;
use crate::inventory::Inventory;
use crate::price::PriceBook;
use crate::resolver::{ResolveError, Resolver, ResultNode};
use crate::silver::Silver;

/// Outcome of one calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_cost: Silver,
    /// Cost of the request with an empty inventory minus `total_cost`.
    pub saved_by_inventory: Silver,
    /// `None` when the requested item is not in the catalog.
    pub root: Option<ResultNode>,
}

/// Aggregated demand for one bought item across every branch of a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingEntry {
    pub key: String,
    pub name: String,
    /// Sum of `quantity_missing` over all leaf occurrences.
    pub quantity: u64,
    pub cost: Silver,
}

/// Total cost of a request under one crafting method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCost {
    pub method: String,
    pub total_cost: Silver,
}

impl Summary {
    fn empty() -> Self {
        Self {
            total_cost: Silver::ZERO,
            saved_by_inventory: Silver::ZERO,
            root: None,
        }
    }

    /// Every node, pre-order. Empty when there is no root.
    pub fn nodes(&self) -> impl Iterator<Item = &ResultNode> {
        self.root.iter().flat_map(ResultNode::walk)
    }

    pub fn complete_items(&self) -> Vec<&ResultNode> {
        self.nodes().filter(|n| n.is_complete).collect()
    }

    pub fn incomplete_items(&self) -> Vec<&ResultNode> {
        self.nodes().filter(|n| !n.is_complete).collect()
    }

    /// Leaf items still to acquire, merged by key in first-seen order.
    ///
    /// Quantities are summed per occurrence. Inventory was already applied
    /// to each occurrence separately and is not applied again here.
    pub fn shopping_list(&self) -> Vec<ShoppingEntry> {
        let mut entries: Vec<ShoppingEntry> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for node in self.nodes() {
            if !node.is_leaf() || node.quantity_missing == 0 {
                continue;
            }
            match index.get(node.key.as_str()) {
                Some(&i) => {
                    let entry = &mut entries[i];
                    entry.quantity = entry.quantity.saturating_add(node.quantity_missing);
                    entry.cost = entry.cost.saturating_add(node.total_cost);
                }
                None => {
                    index.insert(node.key.as_str(), entries.len());
                    entries.push(ShoppingEntry {
                        key: node.key.clone(),
                        name: node.name.clone(),
                        quantity: node.quantity_missing,
                        cost: node.total_cost,
                    });
                }
            }
        }

        entries
    }
}

/// Resolve a full request.
///
/// An unknown root item yields an empty summary rather than an error; only a
/// cyclic recipe graph fails.
pub fn resolve_all(
    catalog: &Catalog,
    root: &str,
    quantity: u64,
    method: Option<&str>,
    inventory: &Inventory,
    prices: &PriceBook,
) -> Result<Summary, ResolveError> {
    let resolver = Resolver::new(catalog);

    let node = match resolver.resolve(root, quantity, method, inventory, prices) {
        Ok(node) => node,
        Err(ResolveError::UnknownItem(key)) => {
            tracing::debug!(item = %key, "unknown target item, nothing to resolve");
            return Ok(Summary::empty());
        }
        Err(e) => return Err(e),
    };

    let saved_by_inventory = if inventory.is_empty() {
        Silver::ZERO
    } else {
        match resolver.resolve(root, quantity, method, &Inventory::new(), prices) {
            Ok(baseline) => baseline.total_cost.saturating_sub(node.total_cost),
            // Inventory can break a cycle that an empty inventory cannot.
            Err(_) => Silver::ZERO,
        }
    };

    Ok(Summary {
        total_cost: node.total_cost,
        saved_by_inventory,
        root: Some(node),
    })
}

/// Distinct method tags that can change recipe selection below `root`, in
/// first-seen depth-first order. Only craftable items with more than one
/// recipe contribute, and only recipes the resolver could expand are walked.
pub fn methods_reachable_from(catalog: &Catalog, root: &str) -> Vec<String> {
    let mut methods: Vec<String> = Vec::new();
    let Some(start) = catalog.item_id(root) else {
        return methods;
    };

    let mut seen: HashSet<ItemId> = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let craftable = catalog.get_item(id).is_some_and(|item| item.is_craftable);
        if !craftable {
            continue;
        }
        let recipes = catalog.recipes_for(id);
        // A lone recipe is chosen regardless of method.
        if recipes.len() > 1 {
            for recipe in recipes {
                if let Some(m) = &recipe.method
                    && !methods.contains(m)
                {
                    methods.push(m.clone());
                }
            }
        }
        // Push in reverse so the first declared ingredient is visited first.
        for recipe in recipes.iter().rev() {
            for entry in recipe.ingredients.iter().rev() {
                if let Some(child) = catalog.item_id(&entry.item) {
                    stack.push(child);
                }
            }
        }
    }

    methods
}

/// Total cost of the request under each method reachable from `root`.
pub fn compare_methods(
    catalog: &Catalog,
    root: &str,
    quantity: u64,
    inventory: &Inventory,
    prices: &PriceBook,
) -> Result<Vec<MethodCost>, ResolveError> {
    let methods = methods_reachable_from(catalog, root);

    let run = |method: &String| {
        resolve_all(catalog, root, quantity, Some(method.as_str()), inventory, prices).map(|s| MethodCost {
            method: method.clone(),
            total_cost: s.total_cost,
        })
    };

    #[cfg(feature = "parallel")]
    let costs = methods.par_iter().map(run).collect::<Result<Vec<_>, _>>();
    #[cfg(not(feature = "parallel"))]
    let costs = methods.iter().map(run).collect::<Result<Vec<_>, _>>();

    costs
}

// ===========================================================================
// Tests
// ===========================================================================
