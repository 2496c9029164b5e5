// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use alloy::primitives::Address;
use anyhow::{bail, Result};
use clap::Parser;
use emission_indexer::{config, EmissionConfig, EmissionService, ScanClient};
use url::Url;

/// Arguments of the emission estimator. Every default reproduces the
/// reference CAKE run, so only the API key is required.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// Block-explorer API key.
    #[clap(long, env = "BSCSCAN_API_KEY")]
    api_key: String,
    /// Base URL of the block-explorer API.
    #[clap(long, env = "SCAN_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: Url,
    /// Token contract whose mint events are counted.
    #[clap(long, default_value_t = config::CAKE_CONTRACT)]
    contract: Address,
    /// Token symbol used in the printed summary.
    #[clap(long, default_value = "CAKE")]
    token_symbol: String,
    /// First block of the queried range (inclusive).
    #[clap(long, default_value_t = config::DEFAULT_FIRST_BLOCK)]
    first_block: u64,
    /// Number of concurrent log queries. The free explorer tier rate-limits
    /// at 5 requests per second; going above it will get queries rejected.
    #[clap(long, default_value_t = config::DEFAULT_QUERY_COUNT)]
    queries: u64,
    /// Blocks per query window. Defaults to one week of blocks split evenly
    /// across the queries.
    #[clap(long)]
    window_size: Option<u64>,
    /// Fraction of minted tokens burned before entering circulation.
    #[clap(long, default_value_t = config::DEFAULT_BURN_RATIO)]
    burn_ratio: f64,
    /// Token decimals.
    #[clap(long, default_value_t = config::DEFAULT_DECIMALS)]
    decimals: u32,
    /// Whether to log in JSON format.
    #[clap(long, env, default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = MainArgs::parse();

    if args.log_json {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let window_size = args
        .window_size
        .unwrap_or_else(|| config::BLOCKS_PER_WEEK.checked_div(args.queries).unwrap_or(0));

    let emission_config = EmissionConfig {
        token_symbol: args.token_symbol,
        contract: args.contract,
        transfer_topic: config::TRANSFER_EVENT_TOPIC,
        mint_source_topic: config::MINT_SOURCE_TOPIC,
        first_block: args.first_block,
        window_size,
        query_count: args.queries,
        decimals: args.decimals,
        burn_ratio: args.burn_ratio,
    };

    tracing::info!(
        "Estimating {} emission from block {} to block {}",
        emission_config.token_symbol,
        emission_config.first_block,
        emission_config.final_block()
    );

    let client = ScanClient::new(args.api_url, args.api_key)?;
    let service = EmissionService::new(client, emission_config)?;

    let estimate = match service.run().await {
        Ok(estimate) => estimate,
        Err(err) => bail!("FATAL: Error estimating emission: {err}"),
    };

    println!("{}", estimate.summary(&service.config().token_symbol));
    Ok(())
}
