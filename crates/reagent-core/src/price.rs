//! Price overrides and unit price resolution.

use crate::catalog::Item;
use crate::silver::Silver;
use std::collections::HashMap;

/// Item key to unit price, supplied by the user or a market refresh.
/// Read-only to the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBook {
    prices: HashMap<String, Silver>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Silver> {
        self.prices.get(key).copied()
    }

    pub fn set(&mut self, key: &str, price: Silver) {
        self.prices.insert(key.to_string(), price);
    }

    /// Overwrite with every entry of `other`, keeping entries `other` lacks.
    pub fn merge(&mut self, other: PriceBook) {
        self.prices.extend(other.prices);
    }

    /// Unit price for `item`: override, then the item's default market
    /// price, then its vendor price, then zero.
    pub fn unit_price(&self, item: &Item) -> Silver {
        self.get(&item.key)
            .or(item.default_market_price)
            .or(item.vendor_price)
            .unwrap_or(Silver::ZERO)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Silver)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Silver)> for PriceBook {
    fn from_iter<I: IntoIterator<Item = (String, Silver)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, Silver)> for PriceBook {
    fn from_iter<I: IntoIterator<Item = (&'a str, Silver)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}
