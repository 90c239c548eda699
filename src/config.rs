// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::reducer::DuplicatePolicy;
use crate::store::sqlite::SqliteStore;

/// Read when no `--config` is given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "attend.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite store.
    pub database: PathBuf,
    /// Address the server listens on.
    pub bind: String,
    /// Shown in the header of daily reports.
    pub class_name: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("attend.db"),
            bind: "127.0.0.1:8000".to_string(),
            class_name: "BBA Business Analytics".to_string(),
            duplicate_policy: DuplicatePolicy::SilentSkip,
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; the default file
    /// is optional.
    pub fn load(path: Option<PathBuf>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail("configuration file does not exist.");
                }
                Self::from_file(&path)
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE}, using defaults.");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Fallible<Self> {
        log::debug!("Loading configuration from {}", path.display());
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.bind_addr()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> Fallible<SocketAddr> {
        Ok(self.bind.parse()?)
    }

    pub fn open_store(&self) -> Fallible<SqliteStore> {
        let path = self
            .database
            .to_str()
            .ok_or_else(|| ErrorReport::invalid("invalid database path"))?;
        SqliteStore::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_file_is_default() -> Fallible<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_parse_full() -> Fallible<()> {
        let config = Config::parse(
            r#"
            database = "/tmp/class.db"
            bind = "0.0.0.0:9000"
            class_name = "Room 4"
            duplicate_policy = "reject-with-error"
            "#,
        )?;
        assert_eq!(config.database, PathBuf::from("/tmp/class.db"));
        assert_eq!(config.bind_addr()?.port(), 9000);
        assert_eq!(config.class_name, "Room 4");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::RejectWithError);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        for bad in [
            "duplicate_policy = \"ask\"",
            "bind = \"localhost\"",
            "colour = \"red\"",
        ] {
            let err = Config::parse(bad).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::Invalid);
        }
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(PathBuf::from("./derpherp.toml")));
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: configuration file does not exist.");
    }
}
