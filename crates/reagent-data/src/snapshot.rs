//! User snapshots: what the user owns and what they pay.
//!
//! Both files are optional. A missing file loads as an empty snapshot, and
//! saving creates it.

use reagent_core::sanitize::{clamp_quantity, sanitize_price};
use reagent_core::silver::silver_to_f64;
use reagent_core::{Inventory, PriceBook};
use std::path::Path;

use crate::loader::{DataLoadError, deserialize_file, serialize_file};
use crate::schema::{InventoryFile, PricesFile};

/// A price book together with the time of its last market refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    pub prices: PriceBook,
    /// Unix time in milliseconds, `None` if never refreshed.
    pub updated_at: Option<u64>,
}

// ===========================================================================
// Inventory
// ===========================================================================

/// Load owned quantities. Negative entries clamp to zero.
pub fn load_inventory(path: &Path) -> Result<Inventory, DataLoadError> {
    if !path.exists() {
        tracing::debug!(file = %path.display(), "no inventory file, starting empty");
        return Ok(Inventory::new());
    }
    let file: InventoryFile = deserialize_file(path)?;
    Ok(file
        .owned
        .into_iter()
        .map(|(key, qty)| (key, clamp_quantity(qty)))
        .collect())
}

pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<(), DataLoadError> {
    let file = InventoryFile {
        owned: inventory
            .iter()
            .map(|(key, qty)| (key.to_string(), i64::try_from(qty).unwrap_or(i64::MAX)))
            .collect(),
    };
    serialize_file(path, &file)
}

// ===========================================================================
// Prices
// ===========================================================================

/// Load price overrides. NaN and negative prices become zero.
pub fn load_prices(path: &Path) -> Result<PriceSnapshot, DataLoadError> {
    if !path.exists() {
        tracing::debug!(file = %path.display(), "no price file, starting empty");
        return Ok(PriceSnapshot::default());
    }
    let file: PricesFile = deserialize_file(path)?;
    Ok(PriceSnapshot {
        prices: file
            .prices
            .into_iter()
            .map(|(key, price)| (key, sanitize_price(price)))
            .collect(),
        updated_at: file.updated_at,
    })
}

pub fn save_prices(path: &Path, snapshot: &PriceSnapshot) -> Result<(), DataLoadError> {
    let file = PricesFile {
        updated_at: snapshot.updated_at,
        prices: snapshot
            .prices
            .iter()
            .map(|(key, price)| (key.to_string(), silver_to_f64(price)))
            .collect(),
    };
    serialize_file(path, &file)
}

// ===========================================================================
// Tests
// ===========================================================================
