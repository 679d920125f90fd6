//! Reagent Data -- on-disk catalog content and user snapshots.
//!
//! Catalog files (`items`, `recipes`) and snapshots (inventory, prices) may be
//! written in RON, JSON, or TOML; the format is chosen by file extension.

pub mod loader;
pub mod schema;
pub mod snapshot;

pub use loader::{DataLoadError, load_catalog};
pub use snapshot::{PriceSnapshot, load_inventory, load_prices, save_inventory, save_prices};
