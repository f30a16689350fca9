//! Directory scanning: list a folder and turn its journal files into entries.

use crate::entry::{JournalEntry, ENTRY_EXTENSION};
use crate::error::{JournalError, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Entries found by a scan, newest first, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<JournalEntry>,
    pub skipped: Vec<JournalError>,
}

fn is_journal_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext == ENTRY_EXTENSION)
            .unwrap_or(false)
}

pub fn scan(directory: &Path) -> Result<ScanReport> {
    let read_dir = std::fs::read_dir(directory).map_err(|e| JournalError::io(directory, e))?;
    let report = collect(directory, read_dir.map(|entry| entry.map(|e| e.path())));

    log::debug!(
        "scanned {}: {} entries, {} skipped",
        directory.display(),
        report.entries.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Turn listed paths into a sorted report. An unreadable listing entry is
/// logged and skipped.
fn collect<I>(directory: &Path, paths: I) -> ScanReport
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut report = ScanReport::default();
    for path in paths {
        let path = match path {
            Ok(path) => path,
            Err(err) => {
                log::warn!("{}", JournalError::io(directory, err));
                continue;
            }
        };
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if hidden || !is_journal_file(&path) {
            continue;
        }

        match JournalEntry::from_path(path) {
            Ok(entry) => report.entries.push(entry),
            Err(err) => {
                log::warn!("{}", err);
                report.skipped.push(err);
            }
        }
    }

    report.entries.sort_by(JournalEntry::newest_first);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn titles(report: &ScanReport) -> Vec<&str> {
        report.entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_scan_filters_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Old_01-05-2023.md"), "old").unwrap();
        fs::write(dir.path().join("New_03-14-2024.md"), "new").unwrap();
        fs::write(dir.path().join("Mid_2023-06-30.md"), "mid").unwrap();
        fs::write(dir.path().join("Photo_03-14-2024.png"), "").unwrap();
        fs::write(dir.path().join("Backup_03-14-2024.md.bak"), "").unwrap();
        fs::write(dir.path().join(".Draft_03-15-2024.md.tmp"), "").unwrap();
        fs::create_dir(dir.path().join("Folder_01-01-2025.md")).unwrap();

        let report = scan(dir.path()).unwrap();
        assert_eq!(titles(&report), vec!["New", "Mid", "Old"]);
        assert!(report.skipped.is_empty());
        for entry in &report.entries {
            assert_eq!(entry.path.extension().unwrap(), "md");
        }
        for pair in report.entries.windows(2) {
            assert!(pair[0].date.sort_key() >= pair[1].date.sort_key());
        }
    }

    #[test]
    fn test_scan_skips_names_without_underscore() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::write(dir.path().join("Day_01-01-2024.md"), "").unwrap();

        let report = scan(dir.path()).unwrap();
        assert_eq!(titles(&report), vec!["Day"]);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            &report.skipped[0],
            JournalError::Parse { name, .. } if name == "README.md"
        ));
    }

    #[test]
    fn test_scan_undated_entries_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Someday_whenever.md"), "").unwrap();
        fs::write(dir.path().join("Ancient_01-01-1901.md"), "").unwrap();

        let report = scan(dir.path()).unwrap();
        assert_eq!(titles(&report), vec!["Ancient", "Someday"]);
        assert_eq!(report.entries[1].date.raw, "whenever");
    }

    #[test]
    fn test_scan_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, JournalError::Io { .. }));
    }

    #[test]
    fn test_unreadable_listing_entry_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_01-01-2024.md"), "").unwrap();
        fs::write(dir.path().join("B_02-01-2024.md"), "").unwrap();

        let paths = vec![
            Ok(dir.path().join("A_01-01-2024.md")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(dir.path().join("B_02-01-2024.md")),
        ];
        let report = collect(dir.path(), paths);
        assert_eq!(titles(&report), vec!["B", "A"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = scan(dir.path()).unwrap();
        assert!(report.entries.is_empty());
        assert!(report.skipped.is_empty());
    }
}
