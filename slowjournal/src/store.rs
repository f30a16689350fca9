//! The document store: the entry list, the active document, and every
//! operation that touches journal files.

use crate::buffer::DocumentBuffer;
use crate::command::{Command, Outcome};
use crate::entry::{entry_path, validate_title, JournalEntry};
use crate::error::{JournalError, Result};
use crate::scanner::{scan, ScanReport};
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the editor buffer currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveDocument {
    None,
    Entry(usize),
    /// Text pushed from outside the journal; it has no file.
    Scratch,
}

#[derive(Debug)]
pub struct DocumentStore {
    directory: Option<PathBuf>,
    entries: Vec<JournalEntry>,
    active: ActiveDocument,
    buffer: DocumentBuffer,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `text` next to `path` and rename it into place.
///
/// An existing file keeps its permissions.
fn write_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", name));
    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            if let Some(permissions) = permissions {
                file.set_permissions(permissions)?;
            }
            file.write_all(text.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            directory: None,
            entries: Vec::new(),
            active: ActiveDocument::None,
            buffer: DocumentBuffer::default(),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn active(&self) -> ActiveDocument {
        self.active
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.active {
            ActiveDocument::Entry(index) => Some(index),
            _ => None,
        }
    }

    pub fn active_entry(&self) -> Option<&JournalEntry> {
        self.active_index().and_then(|i| self.entries.get(i))
    }

    pub fn buffer(&self) -> &DocumentBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn text_mut(&mut self) -> &mut String {
        self.buffer.text_mut()
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Read entry `index` into the buffer and make it active.
    ///
    /// On failure the buffer and active document are left as they were.
    pub fn load(&mut self, index: usize) -> Result<&str> {
        let entry = self.entries.get(index).ok_or(JournalError::Index {
            index,
            len: self.entries.len(),
        })?;
        let text = fs::read_to_string(&entry.path).map_err(|e| JournalError::io(&entry.path, e))?;

        self.buffer = DocumentBuffer::persisted(text);
        self.active = ActiveDocument::Entry(index);
        Ok(self.buffer.text())
    }

    /// Write the buffer to the active entry's file.
    pub fn save(&mut self) -> Result<()> {
        let path = match self.active {
            ActiveDocument::None => return Ok(()),
            ActiveDocument::Scratch => return Err(JournalError::Unmanaged),
            ActiveDocument::Entry(index) => match self.entries.get(index) {
                Some(entry) => &entry.path,
                None => return Err(JournalError::Index { index, len: self.entries.len() }),
            },
        };

        write_atomic(path, self.buffer.text()).map_err(|e| JournalError::io(path, e))?;
        self.buffer.mark_persisted();
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Best-effort save before the active document is replaced.
    fn save_before_leaving(&mut self) {
        match self.active {
            ActiveDocument::Scratch if self.buffer.is_dirty() => {
                log::warn!("discarding scratch document ({} chars)", self.buffer.char_count());
            }
            ActiveDocument::Scratch => {}
            _ => {
                if let Err(err) = self.save() {
                    log::error!("save failed: {}", err);
                }
            }
        }
    }

    /// Save the current document (best-effort) and load entry `index`.
    /// Selecting the entry that is already active does nothing.
    pub fn switch_to(&mut self, index: usize) -> Result<()> {
        if self.active == ActiveDocument::Entry(index) {
            return Ok(());
        }
        if index >= self.entries.len() {
            return Err(JournalError::Index { index, len: self.entries.len() });
        }
        self.save_before_leaving();
        self.load(index)?;
        Ok(())
    }

    /// Scan `directory` and make it the current journal.
    ///
    /// The first entry is loaded when there is one. A failed scan leaves the
    /// store untouched.
    pub fn open_directory(&mut self, directory: &Path) -> Result<ScanReport> {
        let mut report = scan(directory)?;
        self.save_before_leaving();

        self.directory = Some(directory.to_path_buf());
        self.entries = std::mem::take(&mut report.entries);
        self.active = ActiveDocument::None;
        self.buffer = DocumentBuffer::default();
        log::info!("opened {} ({} entries)", directory.display(), self.entries.len());

        if !self.entries.is_empty() {
            if let Err(err) = self.load(0) {
                log::error!("could not load first entry: {}", err);
            }
        }
        report.entries = self.entries.clone();
        Ok(report)
    }

    /// Re-read the current directory, keeping the active entry when its file
    /// is still there. With no active entry the first one is loaded.
    pub fn rescan(&mut self) -> Result<ScanReport> {
        let directory = self.directory.clone().ok_or(JournalError::NoDirectory)?;
        if matches!(self.active, ActiveDocument::Entry(_)) {
            self.save_before_leaving();
        }
        let mut report = scan(&directory)?;

        let active_path = self.active_entry().map(|e| e.path.clone());
        self.entries = std::mem::take(&mut report.entries);

        if let Some(path) = active_path {
            match self.entries.iter().position(|e| e.path == path) {
                Some(index) => self.active = ActiveDocument::Entry(index),
                None => {
                    log::warn!("{} is gone after rescan", path.display());
                    self.active = ActiveDocument::None;
                    self.buffer = DocumentBuffer::default();
                }
            }
        }

        if self.active == ActiveDocument::None && !self.entries.is_empty() {
            if let Err(err) = self.load(0) {
                log::error!("could not load first entry: {}", err);
            }
        }
        report.entries = self.entries.clone();
        Ok(report)
    }

    /// Create an empty entry dated today and make it active.
    pub fn create(&mut self, title: &str) -> Result<JournalEntry> {
        self.create_on(title, chrono::Local::now().date_naive())
    }

    pub fn create_on(&mut self, title: &str, date: NaiveDate) -> Result<JournalEntry> {
        self.check_new_entry(title)?;
        self.save_before_leaving();
        self.create_file(title, date, String::new())
    }

    /// Keep the scratch document as a new entry dated today.
    pub fn save_scratch_as(&mut self, title: &str) -> Result<JournalEntry> {
        if self.active != ActiveDocument::Scratch {
            return Err(JournalError::NotScratch);
        }
        self.check_new_entry(title)?;
        let text = self.buffer.text().to_string();
        self.create_file(title, chrono::Local::now().date_naive(), text)
    }

    fn check_new_entry(&self, title: &str) -> Result<()> {
        if self.directory.is_none() {
            return Err(JournalError::NoDirectory);
        }
        validate_title(title)?;
        Ok(())
    }

    fn create_file(&mut self, title: &str, date: NaiveDate, text: String) -> Result<JournalEntry> {
        let directory = self.directory.as_deref().ok_or(JournalError::NoDirectory)?;
        let path = entry_path(directory, validate_title(title)?, date);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| JournalError::io(&path, e))?;
        if !text.is_empty() {
            file.write_all(text.as_bytes()).map_err(|e| JournalError::io(&path, e))?;
        }

        let entry = JournalEntry::from_path(path)?;
        log::info!("created {}", entry.path.display());
        self.entries.insert(0, entry.clone());
        self.active = ActiveDocument::Entry(0);
        self.buffer = DocumentBuffer::persisted(text);
        Ok(entry)
    }

    /// Replace the buffer with text from outside the journal.
    /// The entry list is not touched.
    pub fn push_external(&mut self, text: String) {
        self.save_before_leaving();
        self.active = ActiveDocument::Scratch;
        self.buffer = DocumentBuffer::unpersisted(text);
    }

    /// Run one command. Save failures are logged, never returned.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::OpenDirectory(path) => self.open_directory(&path).map(Outcome::Scanned),
            Command::Rescan => self.rescan().map(Outcome::Scanned),
            Command::Save => {
                if let Err(err) = self.save() {
                    log::error!("save failed: {}", err);
                }
                Ok(Outcome::Done)
            }
            Command::Select(index) => self.switch_to(index).map(|_| Outcome::Done),
            Command::Create(title) => self.create(&title).map(Outcome::Created),
            Command::KeepScratch(title) => self.save_scratch_as(&title).map(Outcome::Created),
            Command::PushExternal(text) => {
                self.push_external(text);
                Ok(Outcome::Done)
            }
        }
    }
}
