// Dweve cmdtree - Hierarchical Command Tree Shell
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Storage of the committed document.

use crate::error::{ConfigError, ConfigResult};
use crate::value::{map_from_json, map_to_json, ConfigMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the committed document lives.
pub trait ConfigPersistence {
    /// Read the committed document; a missing document is empty.
    fn load(&self) -> ConfigResult<ConfigMap>;

    /// Replace the committed document.
    fn save(&mut self, doc: &ConfigMap) -> ConfigResult<()>;

    /// Human-readable location, for messages.
    fn location(&self) -> String;
}

/// Committed document in a pretty-printed JSON file.
///
/// Saves write a sibling temporary file and rename it over the target, so a
/// failed write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigPersistence for JsonFileStore {
    fn load(&self) -> ConfigResult<ConfigMap> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no committed document yet");
                return Ok(ConfigMap::new());
            }
            Err(e) => return Err(ConfigError::io(self.location(), &e)),
        };
        let value: serde_json::Value = serde_json::from_str(&text)?;
        map_from_json(&value)
    }

    fn save(&mut self, doc: &ConfigMap) -> ConfigResult<()> {
        let mut text = serde_json::to_string_pretty(&map_to_json(doc))?;
        text.push('\n');

        let temp = self.temp_path();
        fs::write(&temp, text).map_err(|e| ConfigError::io(temp.display().to_string(), &e))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            ConfigError::io(self.location(), &e)
        })?;
        debug!(path = %self.path.display(), "committed document saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory persistence, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    document: ConfigMap,
    saves: usize,
    fail_saves: bool,
}

impl MemoryPersistence {
    pub fn new(document: ConfigMap) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Make every save fail with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &ConfigMap {
        &self.document
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ConfigPersistence for MemoryPersistence {
    fn load(&self) -> ConfigResult<ConfigMap> {
        Ok(self.document.clone())
    }

    fn save(&mut self, doc: &ConfigMap) -> ConfigResult<()> {
        if self.fail_saves {
            return Err(ConfigError::Io {
                path: self.location(),
                message: "save rejected".to_string(),
            });
        }
        self.document = doc.clone();
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConfigValue;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("committed_config.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("committed_config.json");
        let mut store = JsonFileStore::new(&path);

        let mut doc = ConfigMap::new();
        doc.insert("host-name".to_string(), ConfigValue::scalar("r1"));
        store.save(&doc).unwrap();

        assert_eq!(store.load().unwrap(), doc);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"host-name\": \"r1\"\n}\n");
        assert!(!dir.path().join("committed_config.json.tmp").exists());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("committed_config.json");
        fs::write(&path, "{ nope").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("missing").join("c.json"));
        assert!(matches!(
            store.save(&ConfigMap::new()),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_memory_persistence() {
        let mut mem = MemoryPersistence::default();
        mem.save(&ConfigMap::new()).unwrap();
        assert_eq!(mem.saves(), 1);
        assert!(MemoryPersistence::failing().save(&ConfigMap::new()).is_err());
    }
}
