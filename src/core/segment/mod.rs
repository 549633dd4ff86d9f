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

//! Boundary to the external word segmentation engine.
//!
//! The engine is initialized once per process through an `EngineHandle` and
//! then asked, once per field value, for the spans of the text at either the
//! coarse (search) or fine (index) granularity.

mod span;

pub use self::span::*;

mod engine;

pub use self::engine::*;

mod provider;

pub use self::provider::*;

mod replay;

pub use self::replay::*;

#[cfg(feature = "nlpir")]
mod native;

#[cfg(feature = "nlpir")]
pub use self::native::*;
