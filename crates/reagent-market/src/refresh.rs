//! Cooldown-guarded price refresh.

use reagent_core::{Catalog, PriceBook};
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::MarketError;
use crate::quote::{MarketIndex, parse_quotes};

/// Minimum time between two refreshes.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30 * 60);

// ===========================================================================
// Sources
// ===========================================================================

/// Something that returns a raw market response for a set of ids.
pub trait PriceSource {
    fn fetch(&self, market_ids: &[u32]) -> Result<String, MarketError>;
}

/// A response body saved on disk. The requested ids are ignored.
#[derive(Debug, Clone)]
pub struct FilePriceSource {
    path: PathBuf,
}

impl FilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for FilePriceSource {
    fn fetch(&self, _market_ids: &[u32]) -> Result<String, MarketError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

// ===========================================================================
// Refresher
// ===========================================================================

/// Outcome of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    /// Ids sent to the source.
    pub requested: usize,
    /// Prices written into the caller's book.
    pub updated: usize,
    /// Timestamp recorded for this refresh (unix ms).
    pub refreshed_at: u64,
}

/// Fetches market prices for a catalog at most once per cooldown.
pub struct PriceRefresher<S> {
    source: S,
    index: MarketIndex,
    cooldown: Duration,
    last_refresh: Mutex<Option<u64>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a refresh ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: PriceSource> PriceRefresher<S> {
    pub fn new(catalog: &Catalog, source: S) -> Self {
        Self {
            source,
            index: MarketIndex::from_catalog(catalog),
            cooldown: DEFAULT_COOLDOWN,
            last_refresh: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Seed the last refresh time, typically from a saved price file.
    pub fn with_last_refresh(self, at_ms: Option<u64>) -> Self {
        *self.lock_last() = at_ms;
        self
    }

    pub fn index(&self) -> &MarketIndex {
        &self.index
    }

    pub fn last_refresh(&self) -> Option<u64> {
        *self.lock_last()
    }

    /// Time left before the next refresh is allowed, zero if allowed now.
    pub fn cooldown_remaining(&self, now_ms: u64) -> Duration {
        let Some(last) = self.last_refresh() else {
            return Duration::ZERO;
        };
        let elapsed = Duration::from_millis(now_ms.saturating_sub(last));
        self.cooldown.saturating_sub(elapsed)
    }

    /// Fetch current prices and merge them into `prices`.
    ///
    /// On any error `prices` and the recorded refresh time are left as they
    /// were.
    pub fn refresh(&self, prices: &mut PriceBook, now_ms: u64) -> Result<RefreshReport, MarketError> {
        if self.index.is_empty() {
            return Err(MarketError::NothingToRefresh);
        }

        let remaining = self.cooldown_remaining(now_ms);
        if !remaining.is_zero() {
            return Err(MarketError::CoolingDown { remaining });
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(MarketError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Another caller may have finished a refresh between the first check
        // and acquiring the flag.
        let remaining = self.cooldown_remaining(now_ms);
        if !remaining.is_zero() {
            return Err(MarketError::CoolingDown { remaining });
        }

        let ids = self.index.market_ids();
        let body = self.source.fetch(&ids)?;
        let quotes = parse_quotes(&body)?;
        let fetched = self.index.prices_from_quotes(&quotes);
        let updated = fetched.len();

        prices.merge(fetched);
        *self.lock_last() = Some(now_ms);

        tracing::info!(requested = ids.len(), quotes = quotes.len(), updated, "market prices refreshed");
        Ok(RefreshReport {
            requested: ids.len(),
            updated,
            refreshed_at: now_ms,
        })
    }

    fn lock_last(&self) -> std::sync::MutexGuard<'_, Option<u64>> {
        self.last_refresh
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
