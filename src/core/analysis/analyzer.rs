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

use core::analysis::{IctclasTokenizer, TokenStream};
use core::segment::SegmentProvider;

use error::Result;

use std::fmt::Debug;

/// Segmentation granularity of a tokenizer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Granularity {
    /// Coarse words, used at query time.
    Search,
    /// Coarse words followed by their sub-words, used at index time.
    Index,
}

impl Granularity {
    pub fn all() -> [Granularity; 2] {
        [Granularity::Search, Granularity::Index]
    }

    /// The name tokenizers and analyzers of this granularity are registered
    /// under.
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Search => "ictclas_search",
            Granularity::Index => "ictclas_index",
        }
    }

    pub fn from_name(name: &str) -> Option<Granularity> {
        Granularity::all().iter().cloned().find(|g| g.name() == name)
    }

    pub fn fine_grained(self) -> bool {
        self == Granularity::Index
    }
}

/// Creates tokenizers of one granularity, sharing a segment provider.
#[derive(Debug, Clone)]
pub struct IctclasTokenizerFactory {
    provider: SegmentProvider,
    granularity: Granularity,
}

impl IctclasTokenizerFactory {
    pub fn new(provider: SegmentProvider, granularity: Granularity) -> Self {
        IctclasTokenizerFactory {
            provider,
            granularity,
        }
    }

    pub fn search(provider: SegmentProvider) -> Self {
        Self::new(provider, Granularity::Search)
    }

    pub fn index(provider: SegmentProvider) -> Self {
        Self::new(provider, Granularity::Index)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn create(&self) -> IctclasTokenizer {
        IctclasTokenizer::new(self.provider.clone(), self.granularity.fine_grained())
    }
}

/// Builds the token streams of a field.
pub trait Analyzer: Debug {
    fn token_stream(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>>;

    /// Position increment inserted between the values of a multi-valued field.
    fn position_increment_gap(&self, _field_name: &str) -> usize {
        0
    }

    /// Offset gap inserted between the values of a multi-valued field.
    fn offset_gap(&self, _field_name: &str) -> usize {
        1
    }
}

#[derive(Debug, Clone)]
pub struct IctclasAnalyzer {
    factory: IctclasTokenizerFactory,
}

impl IctclasAnalyzer {
    pub fn new(factory: IctclasTokenizerFactory) -> Self {
        IctclasAnalyzer { factory }
    }

    pub fn name(&self) -> &'static str {
        self.factory.granularity().name()
    }
}

impl Analyzer for IctclasAnalyzer {
    fn token_stream(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        debug!("new {} token stream for field {}", self.name(), field_name);
        let mut tokenizer = self.factory.create();
        tokenizer.set_text(text.to_string());
        Ok(Box::new(tokenizer))
    }
}
