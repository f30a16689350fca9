//! Journal entries and the `<title>_<date>.md` filename convention.

use crate::error::{JournalError, Result};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Extension that marks a file as a journal entry.
pub const ENTRY_EXTENSION: &str = "md";

/// Date format written into new filenames.
pub const FILE_DATE_FORMAT: &str = "%m-%d-%Y";

/// Formats accepted when reading a date back out of a filename.
const ACCEPTED_DATE_FORMATS: &[&str] = &[FILE_DATE_FORMAT, "%Y-%m-%d", "%m-%d-%y", "%Y%m%d"];

/// Date part of a filename: the raw slice plus its parsed value, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDate {
    pub raw: String,
    pub parsed: Option<NaiveDate>,
}

impl EntryDate {
    pub fn parse(raw: &str) -> Self {
        let parsed = ACCEPTED_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());
        Self { raw: raw.to_string(), parsed }
    }

    /// Sort key: unparseable dates count as the earliest possible date.
    pub fn sort_key(&self) -> NaiveDate {
        self.parsed.unwrap_or(NaiveDate::MIN)
    }

    /// "Mar 14, 2024", or the raw text when it never parsed.
    pub fn display(&self) -> String {
        match self.parsed {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None if self.raw.is_empty() => "no date".to_string(),
            None => self.raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub title: String,
    pub date: EntryDate,
    pub path: PathBuf,
}

impl JournalEntry {
    /// Build an entry from a file inside a journal directory.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (title, raw_date) = parse_file_name(&name)?;
        Ok(Self {
            title: title.to_string(),
            date: EntryDate::parse(raw_date),
            path,
        })
    }

    /// Most recent first, then title and path ascending.
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.date
            .sort_key()
            .cmp(&a.date.sort_key())
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.path.cmp(&b.path))
    }
}

/// Split `<title>_<date>.<ext>` into title and raw date.
///
/// The title ends at the first `_`; the date runs to the first `.` after it
/// (or to the end of the name when there is none).
pub fn parse_file_name(name: &str) -> Result<(&str, &str)> {
    let malformed = |reason| JournalError::Parse { name: name.to_string(), reason };

    let underscore = name.find('_').ok_or_else(|| malformed("missing '_' between title and date"))?;
    let title = &name[..underscore];
    if title.trim().is_empty() {
        return Err(malformed("empty title"));
    }

    let rest = &name[underscore + 1..];
    let date = match rest.find('.') {
        Some(dot) => &rest[..dot],
        None => rest,
    };
    Ok((title, date))
}

/// Check a user-supplied title and return it trimmed.
pub fn validate_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    let bad_char = trimmed.contains(['_', '.', '/', '\\']);
    if trimmed.is_empty() || bad_char {
        return Err(JournalError::InvalidTitle(title.to_string()));
    }
    Ok(trimmed)
}

/// Path of a new entry: `<directory>/<title>_<MM-DD-YYYY>.md`.
pub fn entry_path(directory: &Path, title: &str, date: NaiveDate) -> PathBuf {
    directory.join(format!(
        "{}_{}.{}",
        title,
        date.format(FILE_DATE_FORMAT),
        ENTRY_EXTENSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_title_and_date() {
        let (title, raw) = parse_file_name("My Day_03-14-2024.md").unwrap();
        assert_eq!(title, "My Day");
        assert_eq!(raw, "03-14-2024");
    }

    #[test]
    fn test_parse_splits_on_first_underscore_and_dot() {
        let (title, raw) = parse_file_name("a_b_c.d.md").unwrap();
        assert_eq!(title, "a");
        assert_eq!(raw, "b_c");
    }

    #[test]
    fn test_parse_tolerates_any_date_text() {
        let (title, raw) = parse_file_name("Trip_someday.md").unwrap();
        assert_eq!(title, "Trip");
        assert_eq!(raw, "someday");

        let (_, raw) = parse_file_name("Trip_.md").unwrap();
        assert_eq!(raw, "");
    }

    #[test]
    fn test_parse_rejects_missing_underscore() {
        let err = parse_file_name("notes.md").unwrap_err();
        assert!(matches!(err, JournalError::Parse { ref name, .. } if name == "notes.md"));
    }

    #[test]
    fn test_parse_rejects_empty_title() {
        assert!(matches!(
            parse_file_name("_03-14-2024.md"),
            Err(JournalError::Parse { .. })
        ));
    }

    #[test]
    fn test_entry_date_formats() {
        assert_eq!(EntryDate::parse("03-14-2024").parsed, Some(date(2024, 3, 14)));
        assert_eq!(EntryDate::parse("2024-03-14").parsed, Some(date(2024, 3, 14)));
        assert_eq!(EntryDate::parse("20240314").parsed, Some(date(2024, 3, 14)));
        assert_eq!(EntryDate::parse("13-45-2024").parsed, None);
    }

    #[test]
    fn test_entry_date_display() {
        assert_eq!(EntryDate::parse("03-04-2024").display(), "Mar 4, 2024");
        assert_eq!(EntryDate::parse("someday").display(), "someday");
        assert_eq!(EntryDate::parse("").display(), "no date");
    }

    #[test]
    fn test_unparsed_date_sorts_last() {
        let dated = JournalEntry::from_path(PathBuf::from("/j/A_01-01-1970.md")).unwrap();
        let undated = JournalEntry::from_path(PathBuf::from("/j/B_whenever.md")).unwrap();
        assert_eq!(JournalEntry::newest_first(&dated, &undated), Ordering::Less);
    }

    #[test]
    fn test_same_date_orders_by_title() {
        let a = JournalEntry::from_path(PathBuf::from("/j/Apple_01-02-2024.md")).unwrap();
        let b = JournalEntry::from_path(PathBuf::from("/j/Banana_01-02-2024.md")).unwrap();
        assert_eq!(JournalEntry::newest_first(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Foo  ").unwrap(), "Foo");
        assert_eq!(validate_title("My Day").unwrap(), "My Day");
        for bad in ["", "   ", "a_b", "a.b", "a/b", "a\\b"] {
            assert!(matches!(validate_title(bad), Err(JournalError::InvalidTitle(_))), "{bad}");
        }
    }

    #[test]
    fn test_entry_path_uses_month_day_year() {
        let path = entry_path(Path::new("/journal"), "Foo", date(2024, 3, 14));
        assert_eq!(path, PathBuf::from("/journal/Foo_03-14-2024.md"));
    }
}
