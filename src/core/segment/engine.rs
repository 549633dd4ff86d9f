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

use core::config::Configuration;
use error::{Error, ErrorKind, Result};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The calls the analysis chain needs from a segmentation engine.
///
/// Implementations wrap process-global native state, `init` is only ever
/// invoked through an `EngineHandle`, which guarantees it runs at most once.
pub trait SegmentEngine: Send + Sync {
    /// Loads dictionaries and applies the license.
    fn init(&self, settings: &EngineSettings) -> Result<()>;

    /// Imports a user dictionary, returns the number of imported words.
    fn import_user_dict(&self, path: &Path, overwrite: bool) -> Result<usize>;

    /// Segments `text` and returns the serialized span list, see
    /// `parse_spans` for the format.
    fn tokenize_for_ir(&self, text: &str, fine_grained: bool) -> Result<String>;
}

/// Everything needed to initialize an engine.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EngineSettings {
    /// Directory holding the engine's `Data` folder.
    pub data_path: PathBuf,
    pub license_code: String,
    pub user_dict: Option<PathBuf>,
    pub overwrite_user_dict: bool,
}

impl EngineSettings {
    pub fn new<P: Into<PathBuf>>(data_path: P) -> EngineSettings {
        EngineSettings {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    pub fn from_configuration(plugin_dir: &Path, config: &Configuration) -> EngineSettings {
        EngineSettings {
            data_path: plugin_dir.to_path_buf(),
            license_code: config.license_code.clone(),
            user_dict: config.user_dictionary_path(plugin_dir),
            overwrite_user_dict: config.over_write,
        }
    }
}

enum InitState {
    Pending,
    Ready,
    Failed(String),
}

/// Shared handle to an initialized segmentation engine.
///
/// Created once at startup and passed by `Arc` to every provider. The first
/// caller of `ensure_initialized` initializes the engine inside the lock,
/// later callers see the outcome. A failed initialization is remembered and
/// reported to every caller without touching the engine again.
pub struct EngineHandle {
    engine: Arc<dyn SegmentEngine>,
    settings: EngineSettings,
    initialized: AtomicBool,
    state: Mutex<InitState>,
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("settings", &self.settings)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl EngineHandle {
    pub fn new(engine: Arc<dyn SegmentEngine>, settings: EngineSettings) -> EngineHandle {
        EngineHandle {
            engine,
            settings,
            initialized: AtomicBool::new(false),
            state: Mutex::new(InitState::Pending),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut state = self.state.lock()?;
        match *state {
            InitState::Ready => return Ok(()),
            InitState::Failed(ref errmsg) => {
                bail!(ErrorKind::EngineInitializationFailed(errmsg.clone()))
            }
            InitState::Pending => {}
        }

        info!(
            "initializing segmentation engine, data path: {}",
            self.settings.data_path.display()
        );
        if let Err(e) = self.engine.init(&self.settings) {
            let errmsg = match *e.kind() {
                ErrorKind::EngineInitializationFailed(ref msg) => msg.clone(),
                _ => e.to_string(),
            };
            error!("segmentation engine initialization failed, {}", errmsg);
            *state = InitState::Failed(errmsg.clone());
            bail!(ErrorKind::EngineInitializationFailed(errmsg));
        }
        info!("segmentation engine initialized");

        self.import_user_dict();

        *state = InitState::Ready;
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    // a broken user dictionary only costs vocabulary, never the engine
    fn import_user_dict(&self) {
        let path = match self.settings.user_dict {
            Some(ref path) => path,
            None => return,
        };
        match self
            .engine
            .import_user_dict(path, self.settings.overwrite_user_dict)
        {
            Ok(count) => info!(
                "imported {} words from user dictionary {}",
                count,
                path.display()
            ),
            Err(e) => {
                let err: Error = ErrorKind::UserDictionaryImportFailed(format!(
                    "{}: {}",
                    path.display(),
                    e
                ))
                .into();
                error!("{}", err);
            }
        }
    }

    /// Runs one segmentation call, initializing the engine first if needed.
    pub fn segment(&self, text: &str, fine_grained: bool) -> Result<String> {
        self.ensure_initialized()?;
        self.engine
            .tokenize_for_ir(text, fine_grained)
            .map_err(|e| match *e.kind() {
                ErrorKind::EngineUnavailable(_) => e,
                _ => ErrorKind::EngineUnavailable(e.to_string()).into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::segment::ReplayEngine;

    use std::thread;

    fn is_init_failure(err: &Error) -> bool {
        match *err.kind() {
            ErrorKind::EngineInitializationFailed(_) => true,
            _ => false,
        }
    }

    #[test]
    fn test_initialize_once() {
        let mut engine = ReplayEngine::new();
        engine.record("转发", r#"[{"begin":0,"end":2,"pos":"v","text":"转发"}]"#);
        let engine = Arc::new(engine);
        let handle = EngineHandle::new(engine.clone(), EngineSettings::new("/plugins/ictclas"));

        assert!(!handle.is_initialized());
        handle.ensure_initialized().unwrap();
        handle.ensure_initialized().unwrap();
        assert!(handle.is_initialized());
        assert!(handle.segment("转发", true).is_ok());
        assert_eq!(engine.init_calls(), 1);
    }

    #[test]
    fn test_initialize_once_across_threads() {
        let engine = Arc::new(ReplayEngine::new());
        let handle = Arc::new(EngineHandle::new(
            engine.clone(),
            EngineSettings::new("/plugins/ictclas"),
        ));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || handle.ensure_initialized().is_ok())
            })
            .collect();
        for worker in workers {
            assert!(worker.join().unwrap());
        }
        assert_eq!(engine.init_calls(), 1);
    }

    #[test]
    fn test_initialization_failure_is_sticky() {
        let mut engine = ReplayEngine::new();
        engine.fail_init("license expired");
        let engine = Arc::new(engine);
        let handle = EngineHandle::new(engine.clone(), EngineSettings::new("/plugins/ictclas"));

        let first = handle.ensure_initialized().unwrap_err();
        assert!(is_init_failure(&first));
        assert!(first.to_string().contains("license expired"));

        let second = handle.segment("转发", false).unwrap_err();
        assert!(is_init_failure(&second));
        assert!(second.to_string().contains("license expired"));

        assert!(!handle.is_initialized());
        assert_eq!(engine.init_calls(), 1);
        assert_eq!(engine.tokenize_calls(), 0);
    }

    #[test]
    fn test_user_dict_failure_is_not_fatal() {
        let mut engine = ReplayEngine::new();
        engine.fail_user_dict("bad dictionary line 3");
        let engine = Arc::new(engine);
        let mut settings = EngineSettings::new("/plugins/ictclas");
        settings.user_dict = Some(PathBuf::from("/plugins/ictclas/user.txt"));
        let handle = EngineHandle::new(engine.clone(), settings);

        handle.ensure_initialized().unwrap();
        assert!(handle.is_initialized());
        assert_eq!(engine.import_calls(), 1);
    }

    #[test]
    fn test_no_user_dict_import_without_path() {
        let engine = Arc::new(ReplayEngine::new());
        let handle = EngineHandle::new(engine.clone(), EngineSettings::new("/plugins/ictclas"));

        handle.ensure_initialized().unwrap();
        assert_eq!(engine.import_calls(), 0);
    }

    #[test]
    fn test_engine_failure_is_unavailable() {
        let engine = Arc::new(ReplayEngine::new());
        let handle = EngineHandle::new(engine, EngineSettings::new("/plugins/ictclas"));

        let err = handle.segment("没有录制", true).unwrap_err();
        match *err.kind() {
            ErrorKind::EngineUnavailable(_) => {}
            ref other => panic!("unexpected error kind {:?}", other),
        }
    }

    #[test]
    fn test_settings_from_configuration() {
        let config = Configuration {
            license_code: "LICENSE".to_string(),
            user_dict: Some("user.txt".to_string()),
            over_write: true,
        };
        let settings = EngineSettings::from_configuration(Path::new("/plugins/ictclas"), &config);
        assert_eq!(settings.data_path, PathBuf::from("/plugins/ictclas"));
        assert_eq!(settings.license_code, "LICENSE");
        assert_eq!(
            settings.user_dict,
            Some(PathBuf::from("/plugins/ictclas/user.txt"))
        );
        assert!(settings.overwrite_user_dict);
    }
}
