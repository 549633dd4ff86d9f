// Copyright 2019 Zhizhesihai (Beijing) Technology Limited.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// See the License for the specific language governing permissions and
// limitations under the License.

use error::{ErrorKind, Result};

use std::fmt::Debug;

/// Maps an offset in the text seen by the tokenizer back to an offset in the
/// original field value.
///
/// A char filter that rewrites the input ahead of the tokenizer (e.g. strips
/// markup) records how much it shifted offsets, tokenizers call
/// `correct_offset` on every offset they publish.
pub trait OffsetCorrector: Debug + Send {
    fn correct_offset(&self, offset: usize) -> usize;
}

/// The input was not rewritten, offsets are returned as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityOffsets;

impl OffsetCorrector for IdentityOffsets {
    fn correct_offset(&self, offset: usize) -> usize {
        offset
    }
}

/// Sorted table of `(offset, cumulative diff)` pairs.
///
/// Every offset at or after a recorded point is shifted by that point's
/// cumulative diff, offsets before the first point are untouched.
#[derive(Debug, Default, Clone)]
pub struct MappedOffsets {
    offsets: Vec<usize>,
    diffs: Vec<isize>,
}

impl MappedOffsets {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records that offsets from `offset` on are off by `cumulative_diff` in
    /// the original text. Points must be added in non-decreasing order, a
    /// point at the same offset as the last one replaces it. The corrected
    /// offsets must not go backwards: `offset` may not map below `offset - 1`.
    pub fn add_mapping(&mut self, offset: usize, cumulative_diff: isize) -> Result<()> {
        let mut points = self.offsets.len();
        if let Some(&last) = self.offsets.last() {
            if offset < last {
                bail!(ErrorKind::IllegalArgument(format!(
                    "offset mappings must be added in order: {} after {}",
                    offset, last
                )));
            }
            if offset == last {
                points -= 1;
            }
        }

        let corrected = offset as isize + cumulative_diff;
        let floor = if offset == 0 {
            0
        } else {
            Self::correct_with(&self.offsets[..points], &self.diffs[..points], offset - 1) as isize
        };
        if corrected < floor {
            bail!(ErrorKind::IllegalArgument(format!(
                "offset {} maps to {}, before {} of the previous offset",
                offset, corrected, floor
            )));
        }

        self.offsets.truncate(points);
        self.diffs.truncate(points);
        self.offsets.push(offset);
        self.diffs.push(cumulative_diff);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl MappedOffsets {
    fn correct_with(offsets: &[usize], diffs: &[isize], offset: usize) -> usize {
        let index = match offsets.binary_search(&offset) {
            Ok(i) => i,
            Err(0) => return offset,
            Err(i) => i - 1,
        };
        let corrected = offset as isize + diffs[index];
        if corrected < 0 {
            0
        } else {
            corrected as usize
        }
    }
}

impl OffsetCorrector for MappedOffsets {
    fn correct_offset(&self, offset: usize) -> usize {
        Self::correct_with(&self.offsets, &self.diffs, offset)
    }
}
