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

//! Aggregation of minted amounts and the emission estimate derived from them.

use alloy::primitives::U256;

use crate::scan::LogEntry;
use crate::ServiceError;

/// Sums the `data` payloads of all log records into one raw fixed-point
/// total. Summation order is irrelevant; integer addition commutes.
pub fn sum_minted<'a, I>(entries: I) -> Result<U256, ServiceError>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut total = U256::ZERO;
    for entry in entries {
        let amount = entry.amount()?;
        total = total.checked_add(amount).ok_or(ServiceError::Overflow)?;
    }
    Ok(total)
}

/// The result of one estimation run. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionEstimate {
    /// Sum of all minted amounts in raw fixed-point units.
    pub minted_raw: U256,
    /// Minted total scaled down by the token's decimals.
    pub minted: f64,
    /// Minted total after the burn adjustment: `minted * (1 - burn_ratio)`.
    pub emitted: f64,
    /// First block of the queried range, inclusive.
    pub first_block: u64,
    /// End of the queried range, exclusive.
    pub final_block: u64,
}

impl EmissionEstimate {
    /// Scales the raw minted total by `10^decimals` and applies the burn
    /// adjustment.
    pub fn compute(
        minted_raw: U256,
        decimals: u32,
        burn_ratio: f64,
        first_block: u64,
        final_block: u64,
    ) -> Self {
        let scale = U256::from(10u64).pow(U256::from(decimals));
        let minted = scale_to_f64(minted_raw, scale);
        let emitted = minted * (1.0 - burn_ratio);
        Self { minted_raw, minted, emitted, first_block, final_block }
    }

    /// The single human-readable output line.
    pub fn summary(&self, symbol: &str) -> String {
        format!(
            "{} {} emitted from block {} to block {}.",
            format_grouped(self.emitted, 3),
            symbol,
            group_digits(&self.first_block.to_string()),
            group_digits(&self.final_block.to_string()),
        )
    }
}

/// Converts a raw fixed-point value to `f64`, splitting into whole and
/// fractional parts first so the whole part keeps integer precision as long
/// as it fits a u128.
fn scale_to_f64(value: U256, scale: U256) -> f64 {
    let whole = value / scale;
    let frac = value % scale;
    whole.to::<u128>() as f64 + frac.to::<u128>() as f64 / scale.to::<u128>() as f64
}

/// Formats a non-negative value with `precision` fractional digits and
/// comma-grouped integer digits.
pub fn format_grouped(value: f64, precision: usize) -> String {
    let rendered = format!("{value:.precision$}");
    match rendered.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_digits(int_part), frac_part),
        None => group_digits(&rendered),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
