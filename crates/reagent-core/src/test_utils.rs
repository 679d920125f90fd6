//! Shared fixtures for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::catalog::{AcquisitionMethod, Catalog, CatalogBuilder, Item, RecipeEntry};
use crate::silver::Silver;

pub fn silver(v: u32) -> Silver {
    Silver::from_num(v)
}

// ===========================================================================
// Smelting: one recipe, two raw ores
// ===========================================================================

/// `bronze_bar = 3 copper_ore + 1 tin_ore`, ores priced 4 and 6.
pub fn smelting_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    b.register_item(
        Item::new("copper_ore", "Copper Ore", AcquisitionMethod::Market).with_market_price(silver(4)),
    )
    .expect("fixture");
    b.register_item(
        Item::new("tin_ore", "Tin Ore", AcquisitionMethod::Market).with_market_price(silver(6)),
    )
    .expect("fixture");
    b.register_item(Item::new("bronze_bar", "Bronze Bar", AcquisitionMethod::Craft).craftable())
        .expect("fixture");
    b.register_recipe(
        "bronze_bar",
        None,
        vec![RecipeEntry::new("copper_ore", 3), RecipeEntry::new("tin_ore", 1)],
    );
    b.build().expect("fixture")
}

// ===========================================================================
// Dream incense: three-level tree with a three-way method split
// ===========================================================================

pub const DREAM_INCENSE: &str = "dream_incense";
pub const MOON_CENSER: &str = "waning_moon_censer";
pub const REVERIE_POWDER: &str = "reverie_powder";
pub const PLATINUM_ESSENCE: &str = "pure_platinum_essence";

pub const METHOD_CHEAP: &str = "cheap";
pub const METHOD_STANDARD: &str = "standard";
pub const METHOD_FAST: &str = "fast";

/// The dream incense recipe tree with representative default market prices.
pub fn incense_catalog() -> Catalog {
    use AcquisitionMethod::*;

    let items = [
        Item::new(DREAM_INCENSE, "Incense Summoning the Dream", Craft).craftable(),
        Item::new(MOON_CENSER, "Waning Moon Censer", Craft).craftable(),
        Item::new(REVERIE_POWDER, "Reverie Powder", Craft).craftable(),
        Item::new("reverie_plume", "Reverie Plume", Farm)
            .marketable(Some(757010))
            .with_market_price(silver(950_000))
            .with_note("weekly quests or boss drops"),
        Item::new("fire_horn", "Fire Horn", Market)
            .marketable(Some(6185))
            .with_market_price(silver(15_000)),
        Item::new("flame_dust", "Flame Dust", Market)
            .marketable(Some(4802))
            .with_market_price(silver(3_000)),
        Item::new("censer_mold", "Waning Moon Censer Mold", Vendor)
            .with_vendor_price(silver(10_000_000)),
        Item::new(PLATINUM_ESSENCE, "Pure Platinum Essence", Market)
            .craftable()
            .marketable(Some(4259))
            .with_market_price(silver(45_000)),
        Item::new("pure_copper_essence", "Pure Copper Essence", Market)
            .craftable()
            .marketable(Some(4059))
            .with_market_price(silver(9_000)),
        Item::new("pure_tin_essence", "Pure Tin Essence", Market)
            .craftable()
            .marketable(Some(4062))
            .with_market_price(silver(8_500)),
        Item::new("moon_opal", "Moon Opal", Market)
            .craftable()
            .marketable(Some(4266))
            .with_market_price(silver(120_000)),
        Item::new("starlight_melody", "Melody of the Stars", Farm).craftable(),
        Item::new("lightstone_crystal", "Lightstone Magic Crystal", Exchange),
        Item::new("alchemy_catalyst", "Waning Moon Alchemy Catalyst", Vendor)
            .with_vendor_price(silver(3_500_000)),
        Item::new("copper_bar", "Copper Bar", Market)
            .craftable()
            .marketable(Some(4058))
            .with_market_price(silver(1_800)),
        Item::new("tin_bar", "Tin Bar", Market)
            .craftable()
            .marketable(Some(4061))
            .with_market_price(silver(1_700)),
        Item::new("wanderer_flower", "Wanderer Flower", Farm),
        Item::new("fern_root", "Fern Root", Farm),
        Item::new("eternal_herb", "Eternal Herb", Market)
            .marketable(Some(5406))
            .with_market_price(silver(2_400)),
        Item::new("nature_fruit", "Fruit of Nature", Market)
            .marketable(Some(5205))
            .with_market_price(silver(1_100)),
        Item::new("black_stone_powder", "Black Stone Powder", Market)
            .craftable()
            .marketable(Some(4901))
            .with_market_price(silver(900)),
    ];

    let mut b = CatalogBuilder::new();
    for item in items {
        b.register_item(item).expect("fixture");
    }

    b.register_recipe(
        DREAM_INCENSE,
        None,
        vec![
            RecipeEntry::new(MOON_CENSER, 1),
            RecipeEntry::new(REVERIE_POWDER, 10),
            RecipeEntry::new("reverie_plume", 10),
            RecipeEntry::new("fire_horn", 10),
            RecipeEntry::new("flame_dust", 10),
        ],
    );
    b.register_recipe(
        MOON_CENSER,
        Some(METHOD_CHEAP),
        vec![
            RecipeEntry::new("censer_mold", 1),
            RecipeEntry::new(PLATINUM_ESSENCE, 100),
            RecipeEntry::new("pure_copper_essence", 100),
            RecipeEntry::new("pure_tin_essence", 100),
            RecipeEntry::new("moon_opal", 100),
        ],
    );
    b.register_recipe(
        MOON_CENSER,
        Some(METHOD_STANDARD),
        vec![
            RecipeEntry::new("censer_mold", 1),
            RecipeEntry::new("starlight_melody", 25),
            RecipeEntry::new("pure_copper_essence", 100),
            RecipeEntry::new("pure_tin_essence", 100),
            RecipeEntry::new("lightstone_crystal", 300),
        ],
    );
    b.register_recipe(
        MOON_CENSER,
        Some(METHOD_FAST),
        vec![
            RecipeEntry::new("censer_mold", 1),
            RecipeEntry::new("lightstone_crystal", 300),
            RecipeEntry::new("alchemy_catalyst", 400),
            RecipeEntry::new("copper_bar", 1000),
            RecipeEntry::new("tin_bar", 1000),
        ],
    );
    b.register_recipe(
        REVERIE_POWDER,
        None,
        vec![
            RecipeEntry::new("wanderer_flower", 10),
            RecipeEntry::new("fern_root", 10),
            RecipeEntry::new("eternal_herb", 10),
            RecipeEntry::new("nature_fruit", 10),
            RecipeEntry::new("black_stone_powder", 10),
        ],
    );

    b.build().expect("fixture")
}
