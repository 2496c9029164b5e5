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

//! Block-range partitioning for log queries.
//!
//! The queried range is split into fixed-size windows so that each window's
//! result count stays under the explorer's per-call cap. Windows are
//! half-open `[start, end)` intervals; the explorer API takes inclusive
//! bounds, so a window maps to `fromBlock = start`, `toBlock = end - 1`.

use std::fmt;

/// A half-open sub-range of blocks queried in one API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    pub start: u64,
    pub end: u64,
}

impl BlockWindow {
    /// First block of the window, inclusive (`fromBlock` API parameter).
    pub fn from_block(&self) -> u64 {
        self.start
    }

    /// Last block of the window, inclusive (`toBlock` API parameter).
    pub fn to_block(&self) -> u64 {
        self.end - 1
    }

    /// Number of blocks covered by the window.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for BlockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Splits `[first_block, first_block + query_count * window_size)` into
/// `query_count` contiguous windows of `window_size` blocks each.
///
/// Window `k` starts at `first_block + k * window_size`; consecutive windows
/// touch with no gaps and no overlaps. A zero `query_count` or `window_size`
/// yields no windows.
pub fn partition(first_block: u64, window_size: u64, query_count: u64) -> Vec<BlockWindow> {
    if window_size == 0 {
        return Vec::new();
    }
    (0..query_count)
        .map(|k| {
            let start = first_block + k * window_size;
            BlockWindow { start, end: start + window_size }
        })
        .collect()
}
