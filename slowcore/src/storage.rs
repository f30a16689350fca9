//! Storage utilities for Slow Computer apps
//!
//! Config locations, recently used paths, and the folder picker state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Most-recently-used path list, newest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentPaths {
    pub paths: Vec<PathBuf>,
    pub max_entries: usize,
}

impl Default for RecentPaths {
    fn default() -> Self {
        Self::new(8)
    }
}

impl RecentPaths {
    pub fn new(max_entries: usize) -> Self {
        Self {
            paths: Vec::new(),
            max_entries,
        }
    }

    /// Move `path` to the front, dropping duplicates and anything past the limit.
    pub fn add(&mut self, path: PathBuf) {
        self.paths.retain(|p| p != &path);
        self.paths.insert(0, path);
        self.paths.truncate(self.max_entries);
    }

    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Read a JSON document from `path`.
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `value` as pretty JSON, creating parent directories as needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Folder picker state: lists the sub-folders of `current_dir`.
#[derive(Debug, Clone)]
pub struct FolderBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FolderEntry>,
    pub selected_index: Option<usize>,
    /// Extension counted in `matching_files` (without the dot)
    pub count_extension: Option<String>,
    /// Number of files in `current_dir` with `count_extension`
    pub matching_files: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderEntry {
    pub name: String,
    pub path: PathBuf,
    /// The ".." row
    pub is_parent: bool,
}

impl FolderBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
            count_extension: None,
            matching_files: 0,
        };
        browser.refresh();
        browser
    }

    pub fn counting(mut self, extension: &str) -> Self {
        self.count_extension = Some(extension.to_string());
        self.refresh();
        self
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected_index = None;
        self.matching_files = 0;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FolderEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_parent: true,
            });
        }

        let Ok(read_dir) = std::fs::read_dir(&self.current_dir) else {
            return;
        };

        let mut folders = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if path.is_dir() {
                folders.push(FolderEntry { name, path, is_parent: false });
            } else if let Some(ext) = &self.count_extension {
                // case-sensitive
                let matches = path.extension().map(|e| e == ext.as_str()).unwrap_or(false);
                if matches {
                    self.matching_files += 1;
                }
            }
        }

        folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        self.entries.extend(folders);
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FolderEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// The folder the user means when pressing "choose": the selected
    /// sub-folder if there is one, otherwise the folder being shown.
    pub fn chosen_dir(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if !entry.is_parent => entry.path.clone(),
            _ => self.current_dir.clone(),
        }
    }
}

/// Get the config directory for Slow Computer apps
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the documents directory
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_recent_paths_dedup_and_limit() {
        let mut recent = RecentPaths::new(2);
        recent.add(PathBuf::from("/a"));
        recent.add(PathBuf::from("/b"));
        recent.add(PathBuf::from("/a"));
        assert_eq!(recent.paths, vec![PathBuf::from("/a"), PathBuf::from("/b")]);

        recent.add(PathBuf::from("/c"));
        assert_eq!(recent.paths, vec![PathBuf::from("/c"), PathBuf::from("/a")]);
    }

    #[test]
    fn test_json_roundtrip_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recent.json");
        let mut recent = RecentPaths::default();
        recent.add(PathBuf::from("/journal"));

        save_json(&path, &recent).unwrap();
        let loaded: RecentPaths = load_json(&path).unwrap();
        assert_eq!(loaded, recent);
    }

    #[test]
    fn test_load_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json::<RecentPaths>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_folder_browser_lists_folders_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join("one.md"), "").unwrap();
        fs::write(dir.path().join("two.MD"), "").unwrap();
        fs::write(dir.path().join("three.txt"), "").unwrap();
        fs::write(dir.path().join(".four.md"), "").unwrap();

        let browser = FolderBrowser::new(dir.path().to_path_buf()).counting("md");
        let names: Vec<&str> = browser.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "Alpha", "beta"]);
        assert_eq!(browser.matching_files, 1);
    }

    #[test]
    fn test_folder_browser_chosen_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("journal")).unwrap();

        let mut browser = FolderBrowser::new(dir.path().to_path_buf());
        assert_eq!(browser.chosen_dir(), dir.path());

        // ".." never counts as a choice
        browser.selected_index = Some(0);
        assert_eq!(browser.chosen_dir(), dir.path());

        browser.selected_index = Some(1);
        assert_eq!(browser.chosen_dir(), dir.path().join("journal"));

        browser.navigate_to(dir.path().join("journal"));
        assert_eq!(browser.current_dir, dir.path().join("journal"));
        assert!(browser.selected_index.is_none());
    }
}
