//! Reagent Core -- crafting material resolution.
//!
//! Given a target item and quantity, the resolver walks the recipe graph and
//! reports, for every ingredient occurrence, how much is needed, how much the
//! user already owns, how much is missing, and what the missing part costs.
//!
//! # Inputs
//!
//! - [`catalog::Catalog`] -- immutable items and recipes, frozen at startup.
//! - [`inventory::Inventory`] -- what the user owns. Read-only to the resolver.
//! - [`price::PriceBook`] -- user or market price overrides. Read-only to the
//!   resolver.
//!
//! # Resolution rules
//!
//! 1. Missing = needed minus owned, floored at zero. A covered node stops there.
//! 2. A craftable item with recipes is expanded for its missing quantity with
//!    the recipe chosen by [`resolver::select_recipe`]. Its cost is the sum of
//!    its ingredients' costs.
//! 3. Everything else is bought: missing times unit price.
//!
//! ```rust,ignore
//! let summary = resolve_all(&catalog, "dream_incense", 1, Some("standard"), &inventory, &prices)?;
//! println!("{}", summary.total_cost);
//! ```
//!
//! # Key Types
//!
//! - [`resolver::Resolver`] -- builds [`resolver::ResultNode`] trees.
//! - [`summary::Summary`] -- request totals, inventory savings, shopping list.
//! - [`silver::Silver`] -- unsigned 64.64 fixed-point currency.

pub mod catalog;
pub mod id;
pub mod inventory;
pub mod price;
pub mod resolver;
pub mod sanitize;
pub mod silver;
pub mod summary;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{AcquisitionMethod, Catalog, CatalogBuilder, CatalogError, Item, Recipe, RecipeEntry};
pub use id::ItemId;
pub use inventory::Inventory;
pub use price::PriceBook;
pub use resolver::{RecipeChoice, ResolveError, Resolver, ResultNode, select_recipe};
pub use silver::Silver;
pub use summary::{MethodCost, ShoppingEntry, Summary, compare_methods, resolve_all};
