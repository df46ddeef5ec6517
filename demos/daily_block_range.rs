// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Example resolving a UTC day to the blocks produced during it
///
/// This example shows how to:
/// 1. Create an HTTP provider for a chain selected at runtime
/// 2. Resolve the block range of a specific UTC day
/// 3. Resolve the following days on the same resolver, reusing its cache
/// 4. Optionally find the deployment block of a contract
///
/// Run with:
/// ```bash
/// RPC_URL=https://arb1.arbitrum.io/rpc \
/// CHAIN_ID=42161 \
/// DAY=2025-10-10 \
/// DAYS=3 \
/// CONTRACT=0xaf88d065e77c8cC2239327C5EDb3A432268e5831 \
/// cargo run --example daily_block_range
/// ```
use alloy_chains::NamedChain;
use alloy_network::AnyNetwork;
use alloy_primitives::Address;
use anyhow::{Context, Result};
use blockdate::{
    create_http_provider, AlloyBlockDataProvider, BlockDateRow, DateRangeResolver,
    DeploymentBlockFinder, ResolverConfigBuilder,
};
use chrono::{Days, NaiveDate};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();

    // Read configuration from environment
    let rpc_url = env::var("RPC_URL").context("RPC_URL environment variable not set")?;
    let day_str = env::var("DAY").unwrap_or_else(|_| "2025-10-16".to_string());
    let days: u64 = env::var("DAYS")
        .unwrap_or_else(|_| "1".to_string())
        .parse()
        .context("Failed to parse DAYS")?;

    let date = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
        .context("Failed to parse DAY (expected format: YYYY-MM-DD)")?;

    let mut config = ResolverConfigBuilder::new();
    if let Ok(chain_id) = env::var("CHAIN_ID") {
        let chain_id: u64 = chain_id.parse().context("Failed to parse CHAIN_ID")?;
        let chain = NamedChain::try_from(chain_id)
            .map_err(|_| anyhow::anyhow!("Unknown chain id {chain_id}"))?;
        config = config.chain(chain);
    }

    let provider = create_http_provider(&rpc_url)?;
    let source = AlloyBlockDataProvider::<_, AnyNetwork>::new(provider);
    let mut resolver = DateRangeResolver::with_config(source.clone(), config.build());

    info!(date = %date, days, "Resolving daily block ranges");

    let last = date
        .checked_add_days(Days::new(days.saturating_sub(1)))
        .context("DAYS runs past the last representable date")?;
    let dates: Vec<NaiveDate> = date.iter_days().take_while(|d| *d <= last).collect();
    let windows = resolver.resolve_dates(&dates).await?;

    println!("\n=== Daily Block Ranges ===");
    for window in &windows {
        println!(
            "{}: [{}, {}] ({} blocks)",
            window.date,
            window.start_block,
            window.end_block,
            window.block_count()
        );
    }
    println!("Search: {}", resolver.search().stats());

    println!("\n=== Mapping Rows ===");
    for window in &windows {
        let row = BlockDateRow::from(window);
        println!("{}", serde_json::to_string(&row)?);
    }

    if let Ok(contract) = env::var("CONTRACT") {
        let address: Address = contract.parse().context("Failed to parse CONTRACT")?;
        let finder = DeploymentBlockFinder::new(source);
        let block = finder.find_deployment_block(address, None).await?;
        println!("\n{address} was deployed in block {block}");
    }

    Ok(())
}
