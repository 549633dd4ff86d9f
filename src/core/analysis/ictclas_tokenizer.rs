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

use core::analysis::{IdentityOffsets, OffsetCorrector, PositionKind, Token, TokenStream};
use core::segment::{SegmentProvider, Span};

use error::Result;

use std::fmt;
use std::io::Read;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StreamState {
    /// Reset, the text has not been segmented for this pass yet.
    Unstarted,
    Streaming,
    /// All spans consumed, only `end` and `reset` remain meaningful.
    Exhausted,
}

/// Decides how a span that passed the backtrack filter is placed, given the
/// end offset of the last span that opened a position.
pub fn classify_span(span: &Span, last_end: usize) -> PositionKind {
    if span.end <= last_end {
        PositionKind::CoLocated
    } else {
        PositionKind::Advance
    }
}

/// A tokenizer over the output of the ICTCLAS segmenter.
///
/// The segmenter reports a flat list of spans that may overlap: at index
/// granularity a compound word is followed by the sub-words it contains.
/// This tokenizer linearizes them into a stream the indexer accepts:
///
/// * a span ending within the last position-opening span is a sub-token and
///   gets a position increment of 0;
/// * any other span opens a new position with an increment of 1;
/// * a span starting before the last position-opening span is dropped, it
///   cannot be placed without moving positions backwards.
///
/// The text is segmented once, on the first `next_token` after `reset`, and
/// the spans are kept until a new input is set.
pub struct IctclasTokenizer {
    token: Token,
    provider: SegmentProvider,
    fine_grained: bool,
    reader: Option<Box<dyn Read>>,
    text: String,
    spans: Vec<Span>,
    // the spans belong to `text`
    segmented: bool,
    state: StreamState,
    cursor: usize,
    // offsets of the last span emitted with a position increment of 1
    last_begin: usize,
    last_end: usize,
    final_offset: usize,
    offsets: Box<dyn OffsetCorrector>,
    dropped_spans: u64,
}

impl fmt::Debug for IctclasTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IctclasTokenizer")
            .field("token", &self.token)
            .field("fine_grained", &self.fine_grained)
            .field("text", &self.text)
            .field("spans", &self.spans.len())
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("last_begin", &self.last_begin)
            .field("last_end", &self.last_end)
            .field("final_offset", &self.final_offset)
            .field("offsets", &self.offsets)
            .field("dropped_spans", &self.dropped_spans)
            .finish()
    }
}

impl IctclasTokenizer {
    pub fn new(provider: SegmentProvider, fine_grained: bool) -> Self {
        IctclasTokenizer {
            token: Token::new(),
            provider,
            fine_grained,
            reader: None,
            text: String::new(),
            spans: Vec::new(),
            segmented: false,
            state: StreamState::Unstarted,
            cursor: 0,
            last_begin: 0,
            last_end: 0,
            final_offset: 0,
            offsets: Box::new(IdentityOffsets),
            dropped_spans: 0,
        }
    }

    /// Sets the input, it is read on the first `next_token` after `reset`.
    pub fn set_reader(&mut self, reader: Box<dyn Read>) {
        self.reader = Some(reader);
        self.text.clear();
        self.spans.clear();
        self.segmented = false;
        self.state = StreamState::Unstarted;
    }

    pub fn set_text(&mut self, text: String) {
        self.reader = None;
        self.replace_text(text);
        self.state = StreamState::Unstarted;
    }

    /// Sets how offsets reported by the segmenter map to the field value.
    pub fn set_offset_corrector(&mut self, offsets: Box<dyn OffsetCorrector>) {
        self.offsets = offsets;
    }

    pub fn fine_grained(&self) -> bool {
        self.fine_grained
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Number of spans dropped by the backtrack filter since this tokenizer
    /// was created.
    pub fn dropped_spans(&self) -> u64 {
        self.dropped_spans
    }

    fn replace_text(&mut self, text: String) {
        if !self.segmented || text != self.text {
            self.text = text;
            self.spans.clear();
            self.segmented = false;
        }
    }

    fn correct_offset(&self, offset: usize) -> usize {
        self.offsets.correct_offset(offset)
    }

    // Unstarted -> Streaming, or straight to Exhausted when there is nothing
    // to emit. Nothing is emitted if segmentation fails.
    fn start(&mut self) -> Result<()> {
        if let Some(mut reader) = self.reader.take() {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            self.replace_text(text);
        }

        if !self.segmented {
            self.spans = self.provider.fetch(&self.text, self.fine_grained)?;
            self.segmented = true;
        }

        self.cursor = 0;
        self.last_begin = 0;
        self.last_end = 0;
        self.final_offset = 0;
        self.state = if self.spans.is_empty() {
            StreamState::Exhausted
        } else {
            StreamState::Streaming
        };
        Ok(())
    }
}

impl TokenStream for IctclasTokenizer {
    fn next_token(&mut self) -> Result<bool> {
        if self.state == StreamState::Unstarted {
            self.start()?;
        }
        if self.state == StreamState::Exhausted {
            return Ok(false);
        }

        loop {
            let span = match self.spans.get(self.cursor) {
                Some(span) => span,
                None => {
                    self.state = StreamState::Exhausted;
                    return Ok(false);
                }
            };
            self.cursor += 1;

            if span.begin < self.last_begin {
                self.dropped_spans += 1;
                debug!(
                    "drop [{}] start:{} end:{}, before last position start:{}",
                    span.text, span.begin, span.end, self.last_begin
                );
                continue;
            }

            let kind = classify_span(span, self.last_end);
            if kind == PositionKind::Advance {
                self.last_begin = span.begin;
                self.last_end = span.end;
            }
            trace!(
                "[{}] start:{} end:{} lastMax:{} position:{}",
                span.text,
                span.begin,
                span.end,
                self.last_end,
                kind.increment()
            );

            self.token.clear();
            self.token.term.extend_from_slice(span.text.as_bytes());
            self.token.token_type.push_str(&span.pos);
            self.token.set_position_kind(kind);
            let start = self.offsets.correct_offset(span.begin);
            let end = self.offsets.correct_offset(span.end);
            let span_end = span.end;
            self.token.set_offset(start, end)?;
            self.final_offset = span_end;
            return Ok(true);
        }
    }

    fn end(&mut self) -> Result<()> {
        self.end_token();
        let final_offset = self.correct_offset(self.final_offset);
        self.token.set_offset(final_offset, final_offset)
    }

    fn reset(&mut self) -> Result<()> {
        self.clear_token();
        self.state = StreamState::Unstarted;
        self.cursor = 0;
        self.last_begin = 0;
        self.last_end = 0;
        self.final_offset = 0;
        Ok(())
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}
