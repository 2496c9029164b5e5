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

//! Client for the `logs` module of a BscScan-compatible block-explorer API.

use std::time::Duration;

use alloy::primitives::{Address, B256, U256};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::windows::BlockWindow;

/// The explorer returns at most this many records per call. Windows whose
/// true event count exceeds the cap are silently truncated server-side;
/// callers size their windows to stay under it.
pub const RESULT_CAP: usize = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Explorer client error types
#[derive(Error, Debug)]
pub enum ScanError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the explorer
    #[error("explorer returned HTTP {code}")]
    Status {
        /// The HTTP status code
        code: reqwest::StatusCode,
    },

    /// The explorer rejected the query (rate limit, bad key, bad params)
    #[error("explorer rejected query: {message}: {detail}")]
    Api {
        /// The envelope `message` field
        message: String,
        /// The envelope `result` field, stringified
        detail: String,
    },

    /// The envelope `result` field did not decode as a log list
    #[error("failed to decode log records: {0}")]
    Decode(#[from] serde_json::Error),

    /// A log record's `data` payload was not a hex-encoded integer
    #[error("invalid amount {value:?} in log data: {source}")]
    InvalidAmount {
        /// The offending payload
        value: String,
        source: alloy::primitives::ruint::ParseError,
    },
}

/// One `getLogs` request: a block window plus the fixed filter parameters.
/// Immutable once constructed; one-to-one with one outbound API call.
#[derive(Debug, Clone)]
pub struct LogQuery {
    pub window: BlockWindow,
    /// Contract whose logs are queried (`address` parameter).
    pub address: Address,
    /// Event signature filter (`topic0` parameter).
    pub topic0: B256,
    /// Source-address filter (`topic1` parameter).
    pub topic1: B256,
}

/// A single event log record as returned by the explorer. Only `data` is
/// interpreted; the remaining fields are carried for diagnostics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Hex-encoded event payload; for Transfer events, the token amount.
    pub data: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub transaction_hash: String,
}

impl LogEntry {
    /// Parses the `data` payload as an unsigned 256-bit integer. The
    /// explorer returns it `0x`-prefixed.
    pub fn amount(&self) -> Result<U256, ScanError> {
        self.data.parse::<U256>().map_err(|source| ScanError::InvalidAmount {
            value: self.data.clone(),
            source,
        })
    }
}

/// Response envelope shared by all explorer endpoints. On rejection,
/// `result` holds a diagnostic string instead of a record list.
#[derive(Debug, Deserialize)]
struct ScanResponse {
    status: String,
    message: String,
    result: serde_json::Value,
}

/// Client for a BscScan-compatible explorer API
#[derive(Clone, Debug)]
pub struct ScanClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ScanClient {
    /// Create a new client against the given explorer base URL
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, ScanError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url, api_key: api_key.into() })
    }

    /// Fetch all log records matching `query`.
    ///
    /// An explorer-reported empty window decodes to an empty list; any other
    /// rejection (rate limit, invalid key, malformed request) is an error.
    pub async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, ScanError> {
        let mut url = self.base_url.clone();
        url.set_path("/api");
        url.query_pairs_mut()
            .append_pair("module", "logs")
            .append_pair("action", "getLogs")
            .append_pair("fromBlock", &query.window.from_block().to_string())
            .append_pair("toBlock", &query.window.to_block().to_string())
            .append_pair("address", &query.address.to_string())
            .append_pair("topic0", &query.topic0.to_string())
            .append_pair("topic1", &query.topic1.to_string())
            .append_pair("apikey", &self.api_key);

        tracing::debug!("Fetching logs for window {}", query.window);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScanError::Status { code: response.status() });
        }

        let envelope: ScanResponse = response.json().await?;
        if envelope.status != "1" {
            if envelope.message.starts_with("No records found") {
                tracing::debug!("Window {} has no matching records", query.window);
                return Ok(Vec::new());
            }
            let detail = match &envelope.result {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(ScanError::Api { message: envelope.message, detail });
        }

        let logs: Vec<LogEntry> = serde_json::from_value(envelope.result)?;
        tracing::debug!("Window {} returned {} log records", query.window, logs.len());
        Ok(logs)
    }
}
