use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};
use crate::recent::RecentFormulas;
use crate::span::MathMode;

const QUALIFIER: &str = "net.eqstudio";
const ORGANIZATION: &str = "Equation Studio";
const APPLICATION: &str = "eqstudio";
const SETTINGS_FILE_NAME: &str = "settings.toml";

/// User preferences and the recent-formula history, persisted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Mode used when a formula is inserted without an explicit mode.
    #[serde(default)]
    pub default_mode: MathMode,
    /// Whether the categories beyond Basic and Greek are offered.
    #[serde(default = "default_show_quick_templates")]
    pub show_quick_templates: bool,
    #[serde(flatten)]
    pub recent: RecentFormulas,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_mode: MathMode::Inline,
            show_quick_templates: true,
            recent: RecentFormulas::default(),
        }
    }
}

fn default_show_quick_templates() -> bool {
    true
}

/// Durable storage for [`Settings`].
pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&mut self, settings: &Settings) -> Result<()>;
}

pub fn settings_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_local_dir().join(SETTINGS_FILE_NAME))
}

/// Settings kept in a TOML file.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TomlSettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlSettingsStore {
    /// A missing file yields the defaults, a malformed one is an error.
    fn load(&self) -> Result<Settings> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(err) => return Err(Error::io(&self.path, err)),
        };

        toml::from_str(&contents).map_err(|source| Error::ParseSettings {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }

        let toml = toml::to_string_pretty(settings)?;
        fs::write(&self.path, toml).map_err(|err| Error::io(&self.path, err))
    }
}

/// In-process store, for hosts that persist settings themselves.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    saved: Option<Settings>,
    saves: usize,
    fail_saves: bool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        MemorySettingsStore {
            saved: Some(settings),
            ..Self::default()
        }
    }

    /// Make every following save fail, as an unavailable backend would.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn saved(&self) -> Option<&Settings> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Persistence("settings backend unavailable".to_string()));
        }
        self.saved = Some(settings.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults_for_missing_keys() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.recent.capacity(), 10);
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let settings: Settings = toml::from_str(
            r#"
defaultMode = "block"
showQuickTemplates = false
recentFormulas = ["x^2", "\\alpha"]
maxRecentFormulas = 5
"#,
        )
        .unwrap();

        assert_eq!(settings.default_mode, MathMode::Block);
        assert!(!settings.show_quick_templates);
        assert_eq!(settings.recent.list(), ["x^2", "\\alpha"]);
        assert_eq!(settings.recent.capacity(), 5);
    }

    #[test]
    fn test_loaded_history_respects_capacity() {
        let settings: Settings =
            toml::from_str("recentFormulas = [\"a\", \"b\", \"c\"]\nmaxRecentFormulas = 0\n").unwrap();
        assert_eq!(settings.recent.capacity(), 1);
        assert_eq!(settings.recent.list(), ["a"]);
    }

    #[test]
    fn test_toml_store_round_trip() {
        let temp_dir = env::temp_dir().join("eqstudio-test-settings-round-trip");
        let _ = fs::remove_dir_all(&temp_dir);

        let mut store = TomlSettingsStore::new(temp_dir.join("nested/settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());

        let mut settings = Settings {
            default_mode: MathMode::Block,
            ..Settings::default()
        };
        settings.recent.record("\\frac{a}{b}");
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_toml_store_rejects_malformed_file() {
        let temp_dir = env::temp_dir().join("eqstudio-test-settings-malformed");
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).unwrap();

        let path = temp_dir.join("settings.toml");
        fs::write(&path, "defaultMode = [").unwrap();

        let err = TomlSettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::ParseSettings { .. }));

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_memory_store_failure() {
        let mut store = MemorySettingsStore::new();
        store.fail_saves(true);
        assert!(matches!(
            store.save(&Settings::default()),
            Err(Error::Persistence(_))
        ));
        assert_eq!(store.saves(), 0);
        assert!(store.saved().is_none());
    }
}
