//! Caller-owned snapshot of what the user already holds.

use std::collections::HashMap;

/// Item key to owned quantity. The resolver only reads it; absent keys count
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    owned: HashMap<String, u64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity owned of `key`, zero if absent.
    pub fn owned(&self, key: &str) -> u64 {
        self.owned.get(key).copied().unwrap_or(0)
    }

    /// Set the owned quantity. Setting zero keeps the entry so that a
    /// persisted inventory round-trips the user's explicit input.
    pub fn set(&mut self, key: &str, quantity: u64) {
        self.owned.insert(key.to_string(), quantity);
    }

    pub fn remove(&mut self, key: &str) -> Option<u64> {
        self.owned.remove(key)
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.owned.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            owned: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, u64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_zero() {
        let inv = Inventory::new();
        assert_eq!(inv.owned("moon_opal"), 0);
    }

    #[test]
    fn set_and_read() {
        let mut inv = Inventory::new();
        inv.set("moon_opal", 40);
        assert_eq!(inv.owned("moon_opal"), 40);
        inv.set("moon_opal", 5);
        assert_eq!(inv.owned("moon_opal"), 5);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn zero_entry_is_kept() {
        let mut inv = Inventory::new();
        inv.set("moon_opal", 0);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.owned("moon_opal"), 0);
    }

    #[test]
    fn collect_from_pairs() {
        let inv: Inventory = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(inv.owned("a"), 1);
        assert_eq!(inv.owned("b"), 2);
        assert!(!inv.is_empty());
    }

    #[test]
    fn remove_entry() {
        let mut inv: Inventory = [("a", 3)].into_iter().collect();
        assert_eq!(inv.remove("a"), Some(3));
        assert!(inv.is_empty());
    }
}
