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

//! Weekly token emission estimation over block-explorer event logs.
//!
//! The service partitions a block range into fixed-size windows, issues one
//! concurrent `getLogs` query per window for Transfer events originating
//! from the zero address (mints), sums the returned amounts, and applies a
//! burn adjustment to produce one net emission figure.
//!
//! This is a one-shot estimation tool: any failed query fails the whole run,
//! with no retries and no partial results.

use futures_util::future::try_join_all;
use thiserror::Error;

pub mod config;
pub mod emission;
pub mod scan;
pub mod windows;

pub use config::EmissionConfig;
pub use emission::EmissionEstimate;
pub use scan::{LogEntry, LogQuery, ScanClient, ScanError};
pub use windows::BlockWindow;

use emission::sum_minted;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("scan API error: {0}")]
    Scan(#[from] ScanError),

    #[error("minted total overflows 256 bits")]
    Overflow,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// One-shot emission estimator: fans one log query out per window, joins on
/// all of them, and reduces the results to a single estimate.
#[derive(Clone)]
pub struct EmissionService {
    client: ScanClient,
    config: EmissionConfig,
}

impl EmissionService {
    pub fn new(client: ScanClient, config: EmissionConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmissionConfig {
        &self.config
    }

    /// Runs the estimation once. The first failing query aborts the join
    /// and the error propagates; outstanding requests are dropped.
    pub async fn run(&self) -> Result<EmissionEstimate, ServiceError> {
        let windows = self.config.windows();
        if windows.is_empty() {
            tracing::warn!("Block range produces no query windows; estimate will be zero");
        }
        if windows.len() as u64 > config::DEFAULT_QUERY_COUNT {
            tracing::warn!(
                "{} concurrent queries exceed the explorer's documented rate ceiling of {}/s",
                windows.len(),
                config::DEFAULT_QUERY_COUNT
            );
        }

        tracing::info!(
            "Querying {} windows of {} blocks starting at block {}",
            windows.len(),
            self.config.window_size,
            self.config.first_block
        );

        let query_futures: Vec<_> = windows
            .iter()
            .map(|window| {
                let query = LogQuery {
                    window: *window,
                    address: self.config.contract,
                    topic0: self.config.transfer_topic,
                    topic1: self.config.mint_source_topic,
                };
                async move { self.client.get_logs(&query).await }
            })
            .collect();

        let results = try_join_all(query_futures).await?;

        for (window, logs) in windows.iter().zip(&results) {
            if logs.len() >= scan::RESULT_CAP {
                // The explorer truncates past the cap; totals from this
                // window undercount. Shrink the window size to avoid it.
                tracing::warn!(
                    "Window {} hit the {}-record result cap; its total is likely truncated",
                    window,
                    scan::RESULT_CAP
                );
            }
        }

        let minted = sum_minted(results.iter().flatten())?;
        tracing::info!(
            "Summed {} mint records into {} raw units",
            results.iter().map(Vec::len).sum::<usize>(),
            minted
        );

        Ok(EmissionEstimate::compute(
            minted,
            self.config.decimals,
            self.config.burn_ratio,
            self.config.first_block,
            self.config.final_block(),
        ))
    }
}
