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

use core::segment::{EngineSettings, SegmentEngine};
use error::{ErrorKind, Result};

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An engine that answers from recorded segmentation payloads.
///
/// Recordings are keyed by input text, optionally per granularity. Used to
/// replay captured engine output through the analysis chain without the
/// native library, and as the engine of the unit tests.
#[derive(Debug, Default)]
pub struct ReplayEngine {
    recordings: HashMap<String, String>,
    granular_recordings: HashMap<(String, bool), String>,
    init_error: Option<String>,
    user_dict_error: Option<String>,
    init_calls: AtomicUsize,
    import_calls: AtomicUsize,
    tokenize_calls: AtomicUsize,
}

impl ReplayEngine {
    pub fn new() -> ReplayEngine {
        Default::default()
    }

    /// Records the payload returned for `text` at both granularities.
    pub fn record(&mut self, text: &str, payload: &str) {
        self.recordings.insert(text.to_string(), payload.to_string());
    }

    /// Records the payload returned for `text` at one granularity, it takes
    /// precedence over a recording made with `record`.
    pub fn record_granularity(&mut self, text: &str, fine_grained: bool, payload: &str) {
        self.granular_recordings
            .insert((text.to_string(), fine_grained), payload.to_string());
    }

    /// Makes `init` fail with `errmsg`.
    pub fn fail_init(&mut self, errmsg: &str) {
        self.init_error = Some(errmsg.to_string());
    }

    /// Makes `import_user_dict` fail with `errmsg`.
    pub fn fail_user_dict(&mut self, errmsg: &str) {
        self.user_dict_error = Some(errmsg.to_string());
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::Acquire)
    }

    pub fn import_calls(&self) -> usize {
        self.import_calls.load(Ordering::Acquire)
    }

    pub fn tokenize_calls(&self) -> usize {
        self.tokenize_calls.load(Ordering::Acquire)
    }
}

impl SegmentEngine for ReplayEngine {
    fn init(&self, _settings: &EngineSettings) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::AcqRel);
        match self.init_error {
            Some(ref errmsg) => {
                bail!(ErrorKind::EngineInitializationFailed(errmsg.clone()))
            }
            None => Ok(()),
        }
    }

    fn import_user_dict(&self, _path: &Path, _overwrite: bool) -> Result<usize> {
        self.import_calls.fetch_add(1, Ordering::AcqRel);
        match self.user_dict_error {
            Some(ref errmsg) => {
                bail!(ErrorKind::UserDictionaryImportFailed(errmsg.clone()))
            }
            None => Ok(0),
        }
    }

    fn tokenize_for_ir(&self, text: &str, fine_grained: bool) -> Result<String> {
        self.tokenize_calls.fetch_add(1, Ordering::AcqRel);
        self.granular_recordings
            .get(&(text.to_string(), fine_grained))
            .or_else(|| self.recordings.get(text))
            .cloned()
            .ok_or_else(|| {
                ErrorKind::EngineUnavailable(format!("no recorded segmentation for '{}'", text))
                    .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_lookup() {
        let mut engine = ReplayEngine::new();
        engine.record("转发", "[]");
        engine.record_granularity("转发", true, "[{}]");

        assert_eq!(engine.tokenize_for_ir("转发", false).unwrap(), "[]");
        assert_eq!(engine.tokenize_for_ir("转发", true).unwrap(), "[{}]");
        assert!(engine.tokenize_for_ir("商务部", true).is_err());
        assert_eq!(engine.tokenize_calls(), 3);
    }
}
