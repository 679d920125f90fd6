//! Market API responses and the market id to item key mapping.

use reagent_core::sanitize::sanitize_price;
use reagent_core::{Catalog, PriceBook};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::MarketError;

/// One price quote from the market API. Only `id` and `basePrice` are
/// required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub id: u32,
    pub base_price: f64,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub current_stock: Option<u64>,
    #[serde(default)]
    pub total_trades: Option<u64>,
    #[serde(default)]
    pub last_sold_price: Option<f64>,
    /// Unix seconds.
    #[serde(default)]
    pub last_sold_time: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteResponse {
    List(Vec<MarketQuote>),
    Wrapped { data: Vec<MarketQuote> },
    Single(MarketQuote),
}

/// Parse a response body. Accepts a bare array, `{"data": [...]}`, or a
/// single quote object.
pub fn parse_quotes(body: &str) -> Result<Vec<MarketQuote>, MarketError> {
    let quotes = match serde_json::from_str(body)? {
        QuoteResponse::List(quotes) | QuoteResponse::Wrapped { data: quotes } => quotes,
        QuoteResponse::Single(quote) => vec![quote],
    };
    Ok(quotes)
}

/// Query URL for the given market ids.
pub fn request_url(base: &str, region: &str, lang: &str, ids: &[u32]) -> String {
    let ids = ids
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}/{region}/item?id={ids}&lang={lang}", base.trim_end_matches('/'))
}

// ===========================================================================
// MarketIndex
// ===========================================================================

/// Market id to item key, for every marketable catalog item with an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketIndex {
    keys: BTreeMap<u32, String>,
}

impl MarketIndex {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut keys = BTreeMap::new();
        for (_, item) in catalog.items() {
            if !item.is_marketable {
                continue;
            }
            if let Some(id) = item.market_id
                && let Some(previous) = keys.insert(id, item.key.clone())
            {
                tracing::warn!(market_id = id, previous = %previous, item = %item.key, "market id shared by two items");
            }
        }
        Self { keys }
    }

    /// Ids to request, ascending.
    pub fn market_ids(&self) -> Vec<u32> {
        self.keys.keys().copied().collect()
    }

    pub fn item_key(&self, market_id: u32) -> Option<&str> {
        self.keys.get(&market_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Prices keyed by item. Unknown ids and non-positive prices are dropped.
    pub fn prices_from_quotes(&self, quotes: &[MarketQuote]) -> PriceBook {
        let mut prices = PriceBook::new();
        for quote in quotes {
            let Some(key) = self.item_key(quote.id) else {
                tracing::debug!(market_id = quote.id, "quote for unrequested id");
                continue;
            };
            if quote.base_price.is_nan() || quote.base_price <= 0.0 {
                continue;
            }
            prices.set(key, sanitize_price(quote.base_price));
        }
        prices
    }
}
