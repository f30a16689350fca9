//! Preferences kept between sessions.

use serde::{Deserialize, Serialize};
use slowcore::storage::{self, config_dir, RecentPaths};
use std::path::{Path, PathBuf};

/// Overrides the remembered directory at startup.
pub const DIR_ENV_VAR: &str = "SLOWJOURNAL_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalPrefs {
    /// Last directory that was opened successfully
    pub directory: Option<PathBuf>,
    pub recent: RecentPaths,
    pub show_preview: bool,
}

impl Default for JournalPrefs {
    fn default() -> Self {
        Self {
            directory: None,
            recent: RecentPaths::new(8),
            show_preview: true,
        }
    }
}

impl JournalPrefs {
    fn config_path() -> PathBuf {
        config_dir("slowjournal").join("prefs.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable preferences fall back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        match storage::load_json(path) {
            Ok(prefs) => prefs,
            Err(storage::StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring preferences at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Err(err) = storage::save_json(&path, self) {
            log::error!("could not save preferences to {}: {}", path.display(), err);
        }
    }

    /// Remember `directory` as the current one.
    pub fn remember_directory(&mut self, directory: &Path) {
        self.directory = Some(directory.to_path_buf());
        self.recent.add(directory.to_path_buf());
    }

    /// Directory to open at startup: the environment override if set,
    /// otherwise the remembered one.
    pub fn startup_directory(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.directory.clone())
    }
}
