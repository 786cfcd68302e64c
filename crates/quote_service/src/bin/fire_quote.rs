//! Fire Quote - command-line premium calculator
//!
//! Reads a premium request from a JSON file, rates it against the PostgreSQL
//! rate tables and prints the quote as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! fire-quote request.json
//!
//! FIRE_QUOTE_DATABASE__URL=postgres://rates@db/fire_rating \
//! FIRE_QUOTE_LOG_FORMAT=json \
//!     fire-quote request.json
//! ```
//!
//! See `quote_service::config` for every variable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};

use domain_rating::{PremiumComposer, PremiumRequest};
use infra_db::{create_pool, PostgresQuoteSink, PostgresRateStore};
use quote_service::{init_tracing, AppConfig, QuoteService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = request_path()?;

    let config = AppConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level, config.log_format).context("initialising tracing")?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let request: PremiumRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing premium request in {}", path.display()))?;

    let pool = create_pool(&config.database).await.context("connecting to database")?;
    let composer = PremiumComposer::new(
        Arc::new(PostgresRateStore::new(pool.clone())),
        config.rating.clone(),
    );
    let service = if config.save_quotes {
        QuoteService::new(composer, Arc::new(PostgresQuoteSink::new(pool)))
    } else {
        QuoteService::without_persistence(composer)
    };

    let outcome = service.quote(&request).await.context("rating request")?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn request_path() -> anyhow::Result<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(PathBuf::from(path)),
        _ => bail!("usage: fire-quote <request.json>"),
    }
}
