//! Settings file loading.
//!
//! Settings live in a YAML file, by default looked up as
//! `backwatch/settings.yml` under the XDG config directories:
//!
//! ```yaml
//! api:
//!   endpoint: https://api.mspbackups.com/api
//!   username: monitor@example.com
//!   password: secret
//! telegram:
//!   bot_key: "123456:ABC"
//!   chat_id: "-100200300"
//! general:
//!   ignored_plan_types: [13]
//!   overdue_threshold_hours: 24
//! ```
//!
//! Every section is optional. The `api` and `telegram` sections are only
//! required by the collaborators that use them.

use std::{collections::BTreeSet, fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    classify::{Policy, DEFAULT_OVERDUE_THRESHOLD_HOURS},
    error::{ConfigResultExt, MonitorError, Result},
};

const CONFIG_PREFIX: &str = "backwatch";
const SETTINGS_FILE: &str = "settings.yml";

/// Backup API credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL, e.g. `https://api.mspbackups.com/api`
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

/// Telegram bot delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelegramSettings {
    pub bot_key: String,
    pub chat_id: String,
}

/// Classification policy settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralSettings {
    pub ignored_plan_types: BTreeSet<i64>,
    pub overdue_threshold_hours: i64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            ignored_plan_types: BTreeSet::new(),
            overdue_threshold_hours: DEFAULT_OVERDUE_THRESHOLD_HOURS,
        }
    }
}

/// All settings for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub api: Option<ApiSettings>,

    #[serde(default)]
    pub telegram: Option<TelegramSettings>,

    #[serde(default)]
    pub general: GeneralSettings,
}

impl Settings {
    /// Parse settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Configuration` if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).config_context("Invalid settings")
    }

    /// Load settings from a file.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::FileSystem` if the file cannot be read and
    /// `MonitorError::Configuration` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading settings from {}", path.display());
        let yaml = fs::read_to_string(path).map_err(|e| MonitorError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Load settings from `path` if given, otherwise from the first
    /// `backwatch/settings.yml` found in the XDG config directories, falling
    /// back to defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::FileSystem` if an explicit path cannot be read
    /// and `MonitorError::Configuration` if the file cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match xdg::BaseDirectories::with_prefix(CONFIG_PREFIX).find_config_file(SETTINGS_FILE) {
            Some(found) => Self::load(&found),
            None => {
                debug!("no {CONFIG_PREFIX}/{SETTINGS_FILE} in XDG config directories, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The classification policy these settings describe.
    pub fn policy(&self) -> Policy {
        Policy {
            ignored_plan_types: self.general.ignored_plan_types.clone(),
            overdue_threshold_hours: self.general.overdue_threshold_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_full_settings() {
        let yaml = r#"
api:
  endpoint: https://api.mspbackups.com/api
  username: monitor@example.com
  password: secret
telegram:
  bot_key: "123456:ABC"
  chat_id: "-100200300"
general:
  ignored_plan_types: [13, 0]
  overdue_threshold_hours: 60
"#;
        let settings = Settings::from_yaml(yaml).unwrap();

        let api = settings.api.as_ref().unwrap();
        assert_eq!(api.endpoint, "https://api.mspbackups.com/api");
        assert_eq!(api.username, "monitor@example.com");
        assert_eq!(settings.telegram.as_ref().unwrap().chat_id, "-100200300");

        let policy = settings.policy();
        assert_eq!(policy.ignored_plan_types, BTreeSet::from([0, 13]));
        assert_eq!(policy.overdue_threshold_hours, 60);
    }

    #[test]
    fn test_sections_default() {
        let settings = Settings::from_yaml("general:\n  ignored_plan_types: [13]\n").unwrap();
        assert_eq!(settings.api, None);
        assert_eq!(settings.telegram, None);
        assert_eq!(settings.general.overdue_threshold_hours, 24);

        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::default().policy(), Policy::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Settings::from_yaml("general: [not, a, mapping]").unwrap_err();
        assert!(matches!(err, MonitorError::Configuration { .. }));

        let err = Settings::from_yaml("api:\n  endpoint: x\n").unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "general:\n  overdue_threshold_hours: 12").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.general.overdue_threshold_hours, 12);

        let settings = Settings::load_or_default(Some(file.path())).unwrap();
        assert_eq!(settings.general.overdue_threshold_hours, 12);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_or_default(Some(&dir.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, MonitorError::FileSystem { .. }));
    }
}
