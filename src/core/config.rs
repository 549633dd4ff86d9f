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

use error::Result;

use serde_yaml;

use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the plugin directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Plugin configuration, read from `config.yml`:
///
/// ```yaml
/// licenseCode: ""
/// userDict: user_dict.txt
/// overWrite: false
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "licenseCode", default)]
    pub license_code: String,
    /// User dictionary file name, relative to the plugin directory.
    #[serde(rename = "userDict", default)]
    pub user_dict: Option<String>,
    /// Whether the user dictionary replaces previously imported user words.
    #[serde(rename = "overWrite", default)]
    pub over_write: bool,
}

impl Configuration {
    pub fn parse(content: &str) -> Result<Configuration> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn read(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)?;
        Configuration::parse(&content)
    }

    /// Loads `config.yml` from `plugin_dir`, falling back to the defaults
    /// when the file is missing or invalid.
    pub fn load(plugin_dir: &Path) -> Configuration {
        let path = plugin_dir.join(CONFIG_FILE_NAME);
        match Configuration::read(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(
                    "Cannot parse config file from {}, use default config, error msg: {}",
                    path.display(),
                    e
                );
                Configuration::default()
            }
        }
    }

    pub fn user_dictionary_path(&self, plugin_dir: &Path) -> Option<PathBuf> {
        match self.user_dict {
            Some(ref name) if !name.trim().is_empty() && name != "\"\"" => {
                Some(plugin_dir.join(name))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate tempfile;

    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_parse_configuration() {
        let config = Configuration::parse(
            "licenseCode: ABCDEF\nuserDict: user_dict.txt\noverWrite: true\n",
        )
        .unwrap();
        assert_eq!(config.license_code, "ABCDEF");
        assert_eq!(config.user_dict, Some("user_dict.txt".to_string()));
        assert!(config.over_write);
    }

    #[test]
    fn test_parse_partial_configuration() {
        let config = Configuration::parse("licenseCode: ABCDEF\n").unwrap();
        assert_eq!(config.license_code, "ABCDEF");
        assert_eq!(config.user_dict, None);
        assert!(!config.over_write);
    }

    #[test]
    fn test_load_from_plugin_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        file.write_all(b"licenseCode: \"\"\nuserDict: dict.txt\noverWrite: false\n")
            .unwrap();

        let config = Configuration::load(dir.path());
        assert_eq!(config.license_code, "");
        assert_eq!(
            config.user_dictionary_path(dir.path()),
            Some(dir.path().join("dict.txt"))
        );
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Configuration::load(dir.path()), Configuration::default());

        let mut file = File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        file.write_all(b"licenseCode: [unterminated\n").unwrap();
        assert_eq!(Configuration::load(dir.path()), Configuration::default());
    }

    #[test]
    fn test_user_dictionary_path_ignores_empty_names() {
        let plugin_dir = Path::new("/plugins/analysis-ictclas");
        let mut config = Configuration::default();
        assert_eq!(config.user_dictionary_path(plugin_dir), None);

        config.user_dict = Some("".to_string());
        assert_eq!(config.user_dictionary_path(plugin_dir), None);

        config.user_dict = Some("\"\"".to_string());
        assert_eq!(config.user_dictionary_path(plugin_dir), None);

        config.user_dict = Some("user.txt".to_string());
        assert_eq!(
            config.user_dictionary_path(plugin_dir),
            Some(PathBuf::from("/plugins/analysis-ictclas/user.txt"))
        );
    }
}
