//! Inbound requests for the document store.
//!
//! Menus, shortcuts, the sidebar and dropped files all produce `Command`s;
//! the app queues them during a frame and hands them to
//! [`DocumentStore::apply`](crate::store::DocumentStore::apply) in order.

use crate::entry::JournalEntry;
use crate::scanner::ScanReport;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A directory was chosen: scan it and make it current.
    OpenDirectory(PathBuf),
    /// Re-read the current directory.
    Rescan,
    /// Write the active entry back to its file.
    Save,
    /// Make the entry at this sidebar index active.
    Select(usize),
    /// Create a new entry dated today with this title.
    Create(String),
    /// Turn the scratch document into an entry with this title.
    KeepScratch(String),
    /// Raw text from outside the journal; becomes the scratch document.
    PushExternal(String),
}

#[derive(Debug)]
pub enum Outcome {
    Done,
    Scanned(ScanReport),
    Created(JournalEntry),
}
