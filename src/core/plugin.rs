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

use core::analysis::{Granularity, IctclasAnalyzer, IctclasTokenizerFactory};
use core::config::Configuration;
use core::segment::{EngineHandle, EngineSettings, SegmentEngine, SegmentProvider};

use error::Result;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "analysis-ictclas";

/// Registers the ICTCLAS tokenizers and analyzers.
///
/// One plugin owns the process-wide engine handle, every tokenizer it hands
/// out shares it.
#[derive(Debug)]
pub struct AnalysisPlugin {
    plugin_dir: PathBuf,
    configuration: Configuration,
    provider: SegmentProvider,
}

impl AnalysisPlugin {
    /// Creates the plugin for the installation under `plugin_dir`, reading
    /// `config.yml` from there.
    pub fn new(plugin_dir: &Path, engine: Arc<dyn SegmentEngine>) -> AnalysisPlugin {
        let configuration = Configuration::load(plugin_dir);
        Self::with_configuration(plugin_dir, configuration, engine)
    }

    pub fn with_configuration(
        plugin_dir: &Path,
        configuration: Configuration,
        engine: Arc<dyn SegmentEngine>,
    ) -> AnalysisPlugin {
        info!("PluginPath: {}", plugin_dir.display());
        let settings = EngineSettings::from_configuration(plugin_dir, &configuration);
        let handle = Arc::new(EngineHandle::new(engine, settings));
        AnalysisPlugin {
            plugin_dir: plugin_dir.to_path_buf(),
            configuration,
            provider: SegmentProvider::new(handle),
        }
    }

    /// Resolves the plugin directory of a node from its plugins directory.
    pub fn plugin_path(plugins_dir: &Path) -> PathBuf {
        plugins_dir.join(PLUGIN_NAME)
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        self.provider.engine()
    }

    /// Initializes the engine eagerly, e.g. at node startup, so that a bad
    /// license or data path is reported before the first document.
    pub fn start(&self) -> Result<()> {
        self.provider.engine().ensure_initialized()
    }

    pub fn tokenizer_names(&self) -> Vec<&'static str> {
        Granularity::all().iter().map(|g| g.name()).collect()
    }

    pub fn tokenizer(&self, name: &str) -> Option<IctclasTokenizerFactory> {
        Granularity::from_name(name)
            .map(|granularity| IctclasTokenizerFactory::new(self.provider.clone(), granularity))
    }

    pub fn analyzer(&self, name: &str) -> Option<IctclasAnalyzer> {
        self.tokenizer(name).map(IctclasAnalyzer::new)
    }
}
