//! Reagent Market -- refreshes unit prices from the external market.
//!
//! The crate does no networking itself. A [`PriceSource`] returns the raw
//! response body for a list of market ids; [`PriceRefresher`] parses it, maps
//! quotes back to item keys, and merges them into a [`reagent_core::PriceBook`]
//! no more than once per cooldown.

pub mod quote;
pub mod refresh;

use std::time::Duration;

pub use quote::{MarketIndex, MarketQuote, parse_quotes, request_url};
pub use refresh::{DEFAULT_COOLDOWN, FilePriceSource, PriceRefresher, PriceSource, RefreshReport};

/// Public market API defaults.
pub const DEFAULT_BASE_URL: &str = "https://api.arsha.io/v2";
pub const DEFAULT_REGION: &str = "sa";
pub const DEFAULT_LANG: &str = "pt";

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("no marketable items with a market id")]
    NothingToRefresh,
    #[error("prices were refreshed recently, next refresh in {}s", remaining.as_secs())]
    CoolingDown { remaining: Duration },
    #[error("a price refresh is already running")]
    InFlight,
    #[error("malformed market response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("price source failed: {0}")]
    Source(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_shape() {
        assert_eq!(
            request_url(DEFAULT_BASE_URL, DEFAULT_REGION, DEFAULT_LANG, &[4266]),
            "https://api.arsha.io/v2/sa/item?id=4266&lang=pt"
        );
    }

    #[test]
    fn cooling_down_message_in_seconds() {
        let e = MarketError::CoolingDown {
            remaining: Duration::from_secs(90),
        };
        assert!(format!("{e}").contains("90s"));
    }
}
