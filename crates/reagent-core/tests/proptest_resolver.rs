//! Property-based tests for the material resolver.
//!
//! Generates random acyclic catalogs, inventories and price books, then checks
//! the per-node invariants and the request-level properties.

use proptest::prelude::*;
use reagent_core::silver::cost_of;
use reagent_core::test_utils::*;
use reagent_core::*;

// ===========================================================================
// Generators
// ===========================================================================

const METHODS: [&str; 3] = ["cheap", "standard", "fast"];

/// A layered DAG: item `i` may only use items with a larger index, so no
/// cycle can form.
#[derive(Debug, Clone)]
struct CatalogShape {
    items: Vec<ItemShape>,
}

#[derive(Debug, Clone)]
struct ItemShape {
    craftable: bool,
    market_price: Option<u32>,
    vendor_price: Option<u32>,
    /// Each recipe: (method index, ingredient list of (offset, qty)).
    recipes: Vec<(usize, Vec<(usize, u32)>)>,
}

fn key(i: usize) -> String {
    format!("item_{i}")
}

fn arb_item() -> impl Strategy<Value = ItemShape> {
    (
        any::<bool>(),
        proptest::option::of(0..1_000u32),
        proptest::option::of(0..1_000u32),
        proptest::collection::vec(
            (
                0..METHODS.len(),
                proptest::collection::vec((1..4usize, 0..5u32), 0..4),
            ),
            0..3,
        ),
    )
        .prop_map(|(craftable, market_price, vendor_price, recipes)| ItemShape {
            craftable,
            market_price,
            vendor_price,
            recipes,
        })
}

fn arb_catalog_shape(max_items: usize) -> impl Strategy<Value = CatalogShape> {
    proptest::collection::vec(arb_item(), 1..=max_items).prop_map(|items| CatalogShape { items })
}

fn build(shape: &CatalogShape) -> Catalog {
    let mut b = CatalogBuilder::new();
    for (i, it) in shape.items.iter().enumerate() {
        let mut item = Item::new(&key(i), &key(i), AcquisitionMethod::Market);
        if it.craftable {
            item = item.craftable();
        }
        if let Some(p) = it.market_price {
            item = item.with_market_price(silver(p));
        }
        if let Some(p) = it.vendor_price {
            item = item.with_vendor_price(silver(p));
        }
        b.register_item(item).unwrap();
    }
    let n = shape.items.len();
    for (i, it) in shape.items.iter().enumerate() {
        for (m, ingredients) in &it.recipes {
            let entries = ingredients
                .iter()
                // Offsets past the end reference unknown items on purpose.
                .map(|&(offset, qty)| RecipeEntry::new(&key(i + offset), qty))
                .filter(|e| {
                    let idx: usize = e.item["item_".len()..].parse().unwrap();
                    idx > i && idx <= n
                })
                .collect();
            b.register_recipe(&key(i), Some(METHODS[*m]), entries);
        }
    }
    b.build().unwrap()
}

fn arb_inventory(max_items: usize) -> impl Strategy<Value = Inventory> {
    proptest::collection::vec((0..max_items, 0..200u64), 0..8)
        .prop_map(|pairs| pairs.into_iter().map(|(i, q)| (key(i), q)).collect())
}

fn arb_prices(max_items: usize) -> impl Strategy<Value = PriceBook> {
    proptest::collection::vec((0..max_items, 0..500u32), 0..6)
        .prop_map(|pairs| pairs.into_iter().map(|(i, p)| (key(i), silver(p))).collect())
}

fn arb_method() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        (0..METHODS.len()).prop_map(|i| Some(METHODS[i])),
        Just(Some("unheard_of")),
    ]
}

fn check_node(node: &ResultNode, prices: &PriceBook, catalog: &Catalog) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        node.quantity_missing,
        node.quantity_needed.saturating_sub(node.quantity_owned)
    );
    prop_assert_eq!(node.is_complete, node.quantity_missing == 0);

    let item = catalog.get_item(node.item).unwrap();
    prop_assert_eq!(node.unit_price, prices.unit_price(item));

    if node.quantity_missing == 0 {
        prop_assert_eq!(node.total_cost, Silver::ZERO);
        prop_assert!(node.ingredients.is_empty());
    } else if node.is_leaf() {
        prop_assert!(node.ingredients.is_empty());
        prop_assert_eq!(node.total_cost, cost_of(node.quantity_missing, node.unit_price));
    } else {
        let sum = node
            .ingredients
            .iter()
            .fold(Silver::ZERO, |acc, c| acc.saturating_add(c.total_cost));
        prop_assert_eq!(node.total_cost, sum);
        for child in &node.ingredients {
            prop_assert_eq!(child.depth, node.depth + 1);
        }
    }
    Ok(())
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every node satisfies the missing/complete/cost invariants.
    #[test]
    fn node_invariants_hold(
        shape in arb_catalog_shape(8),
        inv in arb_inventory(8),
        prices in arb_prices(8),
        method in arb_method(),
        qty in 0..20u64,
    ) {
        let cat = build(&shape);
        let root = Resolver::new(&cat).resolve("item_0", qty, method, &inv, &prices).unwrap();
        for node in root.walk() {
            check_node(node, &prices, &cat)?;
        }
    }

    /// Two calls with identical inputs produce equal trees and leave the
    /// inputs untouched.
    #[test]
    fn resolution_is_idempotent(
        shape in arb_catalog_shape(8),
        inv in arb_inventory(8),
        prices in arb_prices(8),
        method in arb_method(),
        qty in 0..20u64,
    ) {
        let cat = build(&shape);
        let inv_before = inv.clone();
        let prices_before = prices.clone();
        let a = resolve_all(&cat, "item_0", qty, method, &inv, &prices).unwrap();
        let b = resolve_all(&cat, "item_0", qty, method, &inv, &prices).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(inv, inv_before);
        prop_assert_eq!(prices, prices_before);
    }

    /// Asking for more never costs less.
    #[test]
    fn total_cost_is_monotonic_in_quantity(
        shape in arb_catalog_shape(8),
        inv in arb_inventory(8),
        prices in arb_prices(8),
        method in arb_method(),
        qty in 0..20u64,
        extra in 0..20u64,
    ) {
        let cat = build(&shape);
        let resolver = Resolver::new(&cat);
        let small = resolver.resolve("item_0", qty, method, &inv, &prices).unwrap();
        let large = resolver.resolve("item_0", qty + extra, method, &inv, &prices).unwrap();
        prop_assert!(large.total_cost >= small.total_cost);
    }

    /// Owning things never makes a request more expensive.
    #[test]
    fn inventory_never_increases_cost(
        shape in arb_catalog_shape(8),
        inv in arb_inventory(8),
        prices in arb_prices(8),
        method in arb_method(),
        qty in 0..20u64,
    ) {
        let cat = build(&shape);
        let summary = resolve_all(&cat, "item_0", qty, method, &inv, &prices).unwrap();
        let bare = resolve_all(&cat, "item_0", qty, method, &Inventory::new(), &prices).unwrap();
        prop_assert!(summary.total_cost <= bare.total_cost);
        prop_assert_eq!(summary.saved_by_inventory, bare.total_cost - summary.total_cost);
    }

    /// A matching tag picks that recipe; anything else picks the first.
    #[test]
    fn recipe_selection_policy(shape in arb_catalog_shape(6), method in arb_method()) {
        let cat = build(&shape);
        for (id, _) in cat.items() {
            let recipes = cat.recipes_for(id);
            let Some(chosen) = select_recipe(recipes, method) else {
                prop_assert!(recipes.is_empty());
                continue;
            };
            let expected = if recipes.len() == 1 {
                &recipes[0]
            } else {
                recipes
                    .iter()
                    .find(|r| method.is_some() && r.method.as_deref() == method)
                    .unwrap_or(&recipes[0])
            };
            prop_assert!(std::ptr::eq(chosen, expected));
        }
    }
}
