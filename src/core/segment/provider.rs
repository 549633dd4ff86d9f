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

use core::segment::{parse_spans, EngineHandle, Span};
use error::Result;

use std::sync::Arc;

/// Turns one field value into the engine's span list.
#[derive(Debug, Clone)]
pub struct SegmentProvider {
    engine: Arc<EngineHandle>,
}

impl SegmentProvider {
    pub fn new(engine: Arc<EngineHandle>) -> SegmentProvider {
        SegmentProvider { engine }
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    /// Segments `text` at the requested granularity.
    ///
    /// Empty text yields no spans without calling the engine. Engine and
    /// parse failures are returned as errors, never as an empty list.
    pub fn fetch(&self, text: &str, fine_grained: bool) -> Result<Vec<Span>> {
        if text.is_empty() {
            debug!("tokenizer input is empty, pass segmentation");
            return Ok(Vec::new());
        }

        debug!("tokenizer input: {}", text);
        let payload = self.engine.segment(text, fine_grained)?;
        debug!("tokenizer output: {}", payload);
        parse_spans(&payload)
    }
}
