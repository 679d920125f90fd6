//! `reagent` -- resolve a crafting target into what is still missing and
//! what it costs.
//!
//! ```text
//! reagent --target dream_incense --quantity 2 --method standard
//! reagent --target dream_incense --compare
//! reagent --set-owned moon_opal=40 --set-price fire_horn=14500
//! reagent --quotes saved_response.json --target dream_incense
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

mod config;
mod render;

use anyhow::{Context, bail};
use reagent_core::sanitize::{parse_owned_quantity, parse_price, parse_target_quantity};
use reagent_core::{compare_methods, resolve_all};
use reagent_data::{load_catalog, load_inventory, load_prices, save_inventory, save_prices};
use reagent_market::{FilePriceSource, MarketError, PriceRefresher};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Debug, Default, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    inventory: Option<PathBuf>,
    prices: Option<PathBuf>,
    target: Option<String>,
    quantity: Option<String>,
    method: Option<String>,
    quotes: Option<PathBuf>,
    compare: bool,
    set_owned: Vec<(String, String)>,
    set_price: Vec<(String, String)>,
}

fn usage() -> &'static str {
    "Usage: reagent [--config <file>] [--data-dir <dir>] [--inventory <file>] [--prices <file>]
               [--target <item>] [--quantity <n>] [--method <tag>] [--compare]
               [--quotes <response.json>] [--set-owned <item>=<qty>]... [--set-price <item>=<price>]..."
}

fn split_assignment(flag: &str, value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, raw)) if !key.trim().is_empty() => Ok((key.trim().to_string(), raw.to_string())),
        _ => Err(format!("{flag} expects <item>=<value>, got: {value}")),
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let flag = arg.as_str();
        if matches!(flag, "-h" | "--help") {
            return Err(usage().to_string());
        }
        if flag == "--compare" {
            options.compare = true;
            continue;
        }

        let Some(value) = args.next() else {
            return Err(format!("missing value for {flag}"));
        };
        match flag {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--data-dir" => options.data_dir = Some(PathBuf::from(value)),
            "--inventory" => options.inventory = Some(PathBuf::from(value)),
            "--prices" => options.prices = Some(PathBuf::from(value)),
            "--target" => options.target = Some(value),
            "--quantity" => options.quantity = Some(value),
            "--method" => options.method = Some(value),
            "--quotes" => options.quotes = Some(PathBuf::from(value)),
            "--set-owned" => options.set_owned.push(split_assignment(flag, &value)?),
            "--set-price" => options.set_price.push(split_assignment(flag, &value)?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Apply `options` over `config`, update the snapshots they touch, and
/// return the report for stdout.
fn execute(mut config: CliConfig, options: Options, now_ms: u64) -> anyhow::Result<String> {
    if let Some(dir) = options.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = options.inventory {
        config.inventory = path;
    }
    if let Some(path) = options.prices {
        config.prices = path;
    }
    if let Some(method) = options.method {
        config.method = Some(method);
    }
    if let Some(raw) = &options.quantity {
        config.quantity = parse_target_quantity(raw);
    }
    let target = options.target.or(config.target.clone());

    let catalog = load_catalog(&config.data_dir)
        .with_context(|| format!("failed to load catalog from {}", config.data_dir.display()))?;
    info!(
        items = catalog.item_count(),
        recipes = catalog.recipe_count(),
        data_dir = %config.data_dir.display(),
        "catalog loaded"
    );

    let mut inventory = load_inventory(&config.inventory)?;
    if !options.set_owned.is_empty() {
        for (key, raw) in &options.set_owned {
            if catalog.item_id(key).is_none() {
                warn!(item = %key, "setting quantity for an item not in the catalog");
            }
            inventory.set(key, parse_owned_quantity(raw));
        }
        save_inventory(&config.inventory, &inventory)?;
        info!(file = %config.inventory.display(), changed = options.set_owned.len(), "inventory saved");
    }

    let mut snapshot = load_prices(&config.prices)?;
    let mut prices_changed = false;
    for (key, raw) in &options.set_price {
        snapshot.prices.set(key, parse_price(raw));
        prices_changed = true;
    }

    if let Some(quotes) = &options.quotes {
        let refresher = PriceRefresher::new(&catalog, FilePriceSource::new(quotes))
            .with_cooldown(Duration::from_secs(config.cooldown_minutes.saturating_mul(60)))
            .with_last_refresh(snapshot.updated_at);
        match refresher.refresh(&mut snapshot.prices, now_ms) {
            Ok(report) => {
                snapshot.updated_at = Some(report.refreshed_at);
                prices_changed = true;
            }
            Err(MarketError::CoolingDown { remaining }) => {
                info!(remaining_secs = remaining.as_secs(), "using saved prices, refresh on cooldown");
            }
            Err(e) => warn!(error = %e, "market refresh failed, using saved prices"),
        }
    }

    if prices_changed {
        save_prices(&config.prices, &snapshot)?;
        info!(file = %config.prices.display(), "prices saved");
    }

    let Some(target) = target else {
        if options.set_owned.is_empty() && options.set_price.is_empty() && options.quotes.is_none() {
            bail!("no target item; pass --target or set `target` in the config\n\n{}", usage());
        }
        return Ok(String::new());
    };

    if options.compare {
        let costs = compare_methods(&catalog, &target, config.quantity, &inventory, &snapshot.prices)?;
        return Ok(render::render_methods(&costs));
    }

    let summary = resolve_all(
        &catalog,
        &target,
        config.quantity,
        config.method.as_deref(),
        &inventory,
        &snapshot.prices,
    )?;
    Ok(render::render_summary(&summary))
}

fn run(options: Options) -> anyhow::Result<()> {
    let config = CliConfig::load(options.config.as_deref())?;
    let report = execute(config, options, now_ms())?;
    print!("{report}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    run(options)
}
