use serde::{Deserialize, Serialize};

/// Identifies an item in the catalog. Cheap to copy and compare.
///
/// Handles are dense and assigned in registration order, so they double as
/// indices into the catalog's item and recipe tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
