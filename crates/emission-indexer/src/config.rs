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

//! Estimation parameters and their compiled-in defaults.
//!
//! The defaults reproduce the reference CAKE estimation run on BNB Smart
//! Chain; every value can be overridden from the command line.

use alloy::primitives::{address, b256, Address, B256};

use crate::windows::{partition, BlockWindow};
use crate::ServiceError;

/// CAKE token contract on BNB Smart Chain.
pub const CAKE_CONTRACT: Address = address!("0x0e09fabb73bd3ade0a17ecc321fd13a19e81ce82");

/// `keccak256("Transfer(address,address,uint256)")`, the ERC-20 Transfer
/// event signature used as the `topic0` filter.
pub const TRANSFER_EVENT_TOPIC: B256 =
    b256!("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// Mints are Transfer events whose source is the zero address; the `topic1`
/// filter is that address left-padded to the 32-byte topic width.
pub const MINT_SOURCE_TOPIC: B256 = B256::ZERO;

/// BNB Smart Chain block time in seconds.
pub const BSC_BLOCK_TIME_SECS: u64 = 3;

/// Blocks produced in one week at [`BSC_BLOCK_TIME_SECS`] (201,600).
pub const BLOCKS_PER_WEEK: u64 = 7 * 24 * 60 * 60 / BSC_BLOCK_TIME_SECS;

/// Default number of concurrent log queries. Free-tier BscScan enforces a
/// ceiling of 5 requests per second; staying at it keeps one burst legal.
pub const DEFAULT_QUERY_COUNT: u64 = 5;

/// Default start of the queried range. Windows of ~40k blocks only stay
/// under the explorer's per-call result cap for recent history; blocks below
/// ~20,000,000 (pre Sept. 2022) saw far denser minting.
pub const DEFAULT_FIRST_BLOCK: u64 = 21_000_000;

/// BEP-20 tokens default to 18 decimal places.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Fraction of minted CAKE sent to the burn address before entering
/// circulation. Snapshot of the MasterChef contract's
/// `cakePerBlockToBurn / MASTERCHEF_CAKE_PER_BLOCK` (28.8472 / 40 CAKE per
/// block, ~72.12%), last changed Aug. 11, 2022. This is an empirically
/// observed constant, not a live on-chain read; override it if the
/// tokenomics change.
pub const DEFAULT_BURN_RATIO: f64 = 28.8472 / 40.0;

/// Default explorer API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.bscscan.com";

/// Decimals above this would overflow the 256-bit scale factor.
const MAX_DECIMALS: u32 = 36;

/// Immutable parameters of one estimation run.
#[derive(Debug, Clone)]
pub struct EmissionConfig {
    /// Token symbol used in the printed summary.
    pub token_symbol: String,
    /// Token contract whose logs are queried.
    pub contract: Address,
    /// `topic0` filter: the Transfer event signature.
    pub transfer_topic: B256,
    /// `topic1` filter: the mint source address, zero-padded to 32 bytes.
    pub mint_source_topic: B256,
    /// First block of the queried range, inclusive.
    pub first_block: u64,
    /// Blocks per query window.
    pub window_size: u64,
    /// Number of windows, one API call each.
    pub query_count: u64,
    /// Token decimals; amounts are fixed-point with this precision.
    pub decimals: u32,
    /// Fraction of minted tokens burned before entering circulation.
    pub burn_ratio: f64,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            token_symbol: "CAKE".to_string(),
            contract: CAKE_CONTRACT,
            transfer_topic: TRANSFER_EVENT_TOPIC,
            mint_source_topic: MINT_SOURCE_TOPIC,
            first_block: DEFAULT_FIRST_BLOCK,
            window_size: BLOCKS_PER_WEEK / DEFAULT_QUERY_COUNT,
            query_count: DEFAULT_QUERY_COUNT,
            decimals: DEFAULT_DECIMALS,
            burn_ratio: DEFAULT_BURN_RATIO,
        }
    }
}

impl EmissionConfig {
    /// End of the queried range, exclusive.
    pub fn final_block(&self) -> u64 {
        self.first_block + self.query_count * self.window_size
    }

    /// The query windows partitioning `[first_block, final_block())`.
    pub fn windows(&self) -> Vec<BlockWindow> {
        partition(self.first_block, self.window_size, self.query_count)
    }

    /// Rejects parameters the estimate math cannot represent. A degenerate
    /// range (zero windows) is accepted and produces a zero-query run.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !(0.0..=1.0).contains(&self.burn_ratio) {
            return Err(ServiceError::InvalidConfig(format!(
                "burn ratio {} outside [0, 1]",
                self.burn_ratio
            )));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ServiceError::InvalidConfig(format!(
                "token decimals {} exceed the supported maximum of {}",
                self.decimals, MAX_DECIMALS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_run() {
        let config = EmissionConfig::default();
        assert_eq!(config.window_size, 40_320);
        assert_eq!(config.final_block(), 21_201_600);
        assert_eq!(config.windows().len(), 5);
        config.validate().unwrap();
    }

    #[test]
    fn test_burn_ratio_bounds() {
        let mut config = EmissionConfig { burn_ratio: 1.2, ..Default::default() };
        assert!(config.validate().is_err());
        config.burn_ratio = -0.1;
        assert!(config.validate().is_err());
        config.burn_ratio = f64::NAN;
        assert!(config.validate().is_err());
        config.burn_ratio = 1.0;
        config.validate().unwrap();
        config.burn_ratio = 0.0;
        config.validate().unwrap();
    }

    #[test]
    fn test_excessive_decimals_rejected() {
        let config = EmissionConfig { decimals: 72, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
