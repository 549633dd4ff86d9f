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

use core::analysis::{Analyzer, TokenStream};

use error::ErrorKind::IllegalArgument;
use error::Result;

/// Maximum value of the token position in an indexed field.
pub const INDEX_MAX_POSITION: i32 = ::std::i32::MAX - 128;

/// Tracks the number and position / offset parameters of terms being added
/// to the index. Positions and offsets carry over between the values of a
/// multi-valued field.
#[derive(Debug, Clone)]
pub struct FieldInvertState {
    pub name: String,
    pub position: i32,
    pub length: i32,
    pub num_overlap: i32,
    pub offset: usize,

    // we must track these across field instances (multi-valued case)
    pub last_start_offset: usize,
    pub last_position: i32,
}

impl FieldInvertState {
    pub fn new(name: &str) -> FieldInvertState {
        FieldInvertState {
            name: name.to_string(),
            position: -1,
            length: 0,
            num_overlap: 0,
            offset: 0,
            last_start_offset: 0,
            last_position: 0,
        }
    }

    pub fn reset(&mut self) {
        self.position = -1;
        self.length = 0;
        self.num_overlap = 0;
        self.offset = 0;
        self.last_start_offset = 0;
        self.last_position = 0;
    }
}

/// One term occurrence as it would be written to the postings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Posting {
    pub term: Vec<u8>,
    pub position: i32,
    pub start_offset: usize,
    pub end_offset: usize,
    pub token_type: String,
}

/// Consumes the token streams of one field the way the indexing chain does,
/// rejecting streams whose positions or offsets go backwards.
#[derive(Debug)]
pub struct FieldInverter {
    invert_state: FieldInvertState,
    postings: Vec<Posting>,
    check_offsets: bool,
}

impl FieldInverter {
    pub fn new(field_name: &str) -> FieldInverter {
        FieldInverter {
            invert_state: FieldInvertState::new(field_name),
            postings: Vec::new(),
            check_offsets: true,
        }
    }

    /// Offsets are only validated when something consumes them.
    pub fn with_offsets(mut self, check_offsets: bool) -> FieldInverter {
        self.check_offsets = check_offsets;
        self
    }

    pub fn state(&self) -> &FieldInvertState {
        &self.invert_state
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn into_postings(self) -> Vec<Posting> {
        self.postings
    }

    /// Inverts one value of the field.
    pub fn invert(&mut self, token_stream: &mut dyn TokenStream) -> Result<()> {
        token_stream.reset()?;

        loop {
            if !token_stream.next_token()? {
                break;
            }

            let pos_incr = token_stream.token().position as i32;
            self.invert_state.position += pos_incr;
            if self.invert_state.position < self.invert_state.last_position {
                if pos_incr == 0 {
                    bail!(IllegalArgument(
                        "first position increment must be > 0 (got 0)".into()
                    ));
                } else {
                    bail!(IllegalArgument(
                        "position overflowed Integer.MAX_VALUE".into()
                    ));
                }
            } else if self.invert_state.position > INDEX_MAX_POSITION {
                bail!(IllegalArgument(
                    "position is exceed field max allowed position".into()
                ));
            }
            self.invert_state.last_position = self.invert_state.position;
            if pos_incr == 0 {
                self.invert_state.num_overlap += 1;
            }

            let start_offset = self.invert_state.offset + token_stream.token().start_offset;
            let end_offset = self.invert_state.offset + token_stream.token().end_offset;
            if self.check_offsets {
                if start_offset < self.invert_state.last_start_offset || end_offset < start_offset {
                    bail!(IllegalArgument(format!(
                        "startOffset must be non-negative, and endOffset must be >= startOffset, \
                         and offsets must not go backwards startOffset={},endOffset={},\
                         lastStartOffset={} for field '{}'",
                        start_offset,
                        end_offset,
                        self.invert_state.last_start_offset,
                        self.invert_state.name
                    )));
                }
                self.invert_state.last_start_offset = start_offset;
            }

            self.invert_state.length += 1;
            if self.invert_state.length < 0 {
                bail!(IllegalArgument("too many tokens in field".into()));
            }

            let token = token_stream.token();
            self.postings.push(Posting {
                term: token.term.clone(),
                position: self.invert_state.position,
                start_offset,
                end_offset,
                token_type: token.token_type.clone(),
            });
        }
        // trigger streams to perform end-of-stream operations
        token_stream.end()?;

        self.invert_state.position += token_stream.token().position as i32;
        self.invert_state.offset += token_stream.token().end_offset;
        Ok(())
    }

    /// Inverts every value of a multi-valued field, separated by the
    /// analyzer's position increment and offset gaps.
    pub fn invert_values(&mut self, analyzer: &dyn Analyzer, values: &[&str]) -> Result<()> {
        for value in values {
            let name = self.invert_state.name.clone();
            let mut token_stream = analyzer.token_stream(&name, value)?;
            self.invert(token_stream.as_mut())?;

            self.invert_state.position += analyzer.position_increment_gap(&name) as i32;
            self.invert_state.offset += analyzer.offset_gap(&name);
        }
        Ok(())
    }
}
