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

mod analyzer;

pub use self::analyzer::*;

mod ictclas_tokenizer;

pub use self::ictclas_tokenizer::*;

mod offset_correction;

pub use self::offset_correction::*;

use error::{ErrorKind, Result};

use std::fmt::Debug;

pub const MIN_BUFFER_SIZE: usize = 10;

/// Whether a token opens a new lexical position or shares the position of
/// the token before it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PositionKind {
    /// Starts a new position, increment 1.
    Advance,
    /// Alternative or sub-word at the previous position, increment 0.
    CoLocated,
}

impl PositionKind {
    pub fn increment(self) -> usize {
        match self {
            PositionKind::Advance => 1,
            PositionKind::CoLocated => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub term: Vec<u8>,
    /// Determines the position of this token relative to the previous Token in a
    /// TokenStream, used in phrase searching.
    ///
    /// The default value is one.
    ///
    /// Set it to zero to put multiple terms in the same position. A segmented
    /// compound word and the sub-words it contains share one position this way,
    /// so a phrase query for either form matches.
    pub position: usize,
    /// The start and end character offset of a Token.
    pub start_offset: usize,
    pub end_offset: usize,
    /// Lexical type of the token, the part-of-speech tag reported by the
    /// segmenter.
    pub token_type: String,
}

impl Default for Token {
    fn default() -> Self {
        Token::new()
    }
}

impl Token {
    pub fn new() -> Token {
        Token {
            term: Vec::with_capacity(MIN_BUFFER_SIZE),
            position: 1,
            start_offset: 0,
            end_offset: 0,
            token_type: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.position = 1;
        self.start_offset = 0;
        self.end_offset = 0;
        self.term.clear();
        self.token_type.clear();
    }

    pub fn end(&mut self) {
        self.clear();
        self.position = 0;
    }

    pub fn set_position_kind(&mut self, kind: PositionKind) {
        self.position = kind.increment();
    }

    pub fn position_kind(&self) -> PositionKind {
        if self.position == 0 {
            PositionKind::CoLocated
        } else {
            PositionKind::Advance
        }
    }

    /// Set the starting and ending offset.
    pub fn set_offset(&mut self, start_offset: usize, end_offset: usize) -> Result<()> {
        if end_offset < start_offset {
            bail!(ErrorKind::IllegalArgument(format!(
                "endOffset must be >= startOffset; got startOffset={}, endOffset={}",
                start_offset, end_offset
            )))
        }

        self.start_offset = start_offset;
        self.end_offset = end_offset;
        Ok(())
    }

    pub fn term_str(&self) -> &str {
        ::std::str::from_utf8(&self.term).unwrap_or("")
    }
}

/// A `TokenStream` enumerates the sequence of tokens of a field value.
///
/// The workflow of the `TokenStream` API is as follows:
///
/// - The consumer calls `reset()`.
/// - The consumer calls `next_token()` until it returns false, consuming
/// the current `token()` after each call.
/// - The consumer calls `end()` so that any end-of-stream operations can be
/// performed, e.g. publishing the final offset.
pub trait TokenStream: Debug {
    /// Consumers (i.e., `FieldInverter`) use this method to advance the stream
    /// to the next token. Implementations update `token_mut()` with the data of
    /// the next token.
    ///
    /// @return false for end of stream; true otherwise
    fn next_token(&mut self) -> Result<bool>;

    /// This method is called by the consumer after the last token has been
    /// consumed, after `next_token()` returned `false`.
    ///
    /// The final offset of a stream might differ from the offset of the last
    /// token, consumers read it from `token()` after this call.
    fn end(&mut self) -> Result<()>;

    /// This method is called by a consumer before it begins consumption using
    /// `next_token()`.
    ///
    /// Resets this stream to a clean state. Stateful implementations must
    /// implement this method so that they can be reused, just as if they had
    /// been created fresh.
    fn reset(&mut self) -> Result<()>;

    fn token(&self) -> &Token;

    fn token_mut(&mut self) -> &mut Token;

    /// Resets the current token by calling its `clear` method.
    fn clear_token(&mut self) {
        self.token_mut().clear();
    }

    /// Resets the current token by calling its `end` method.
    fn end_token(&mut self) {
        self.token_mut().end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_kind() {
        assert_eq!(PositionKind::Advance.increment(), 1);
        assert_eq!(PositionKind::CoLocated.increment(), 0);

        let mut token = Token::new();
        assert_eq!(token.position_kind(), PositionKind::Advance);
        token.set_position_kind(PositionKind::CoLocated);
        assert_eq!(token.position, 0);
        assert_eq!(token.position_kind(), PositionKind::CoLocated);
    }

    #[test]
    fn test_token_offsets() {
        let mut token = Token::new();
        assert!(token.set_offset(3, 6).is_ok());
        assert_eq!(token.start_offset, 3);
        assert_eq!(token.end_offset, 6);
        assert!(token.set_offset(6, 3).is_err());

        token.term.extend_from_slice("办公厅".as_bytes());
        token.token_type.push_str("n");
        token.end();
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert!(token.term.is_empty());
        assert!(token.token_type.is_empty());
    }
}
