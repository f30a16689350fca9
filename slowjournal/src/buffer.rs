/// Text of the document being edited, plus what storage last saw.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuffer {
    text: String,
    persisted: String,
}

impl DocumentBuffer {
    /// Buffer for text just read from (or written to) storage.
    pub fn persisted(text: String) -> Self {
        Self { persisted: text.clone(), text }
    }

    /// Buffer whose text storage has never seen.
    pub fn unpersisted(text: String) -> Self {
        Self { text, persisted: String::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.text != self.persisted
    }

    /// Record that the current text is now what storage holds.
    pub fn mark_persisted(&mut self) {
        self.persisted.clone_from(&self.text);
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_tracking() {
        let mut buf = DocumentBuffer::persisted("hello".into());
        assert!(!buf.is_dirty());

        buf.text_mut().push_str(" world");
        assert!(buf.is_dirty());

        buf.mark_persisted();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_unpersisted_is_dirty_unless_empty() {
        assert!(DocumentBuffer::unpersisted("draft".into()).is_dirty());
        assert!(!DocumentBuffer::unpersisted(String::new()).is_dirty());
    }

    #[test]
    fn test_counts() {
        let buf = DocumentBuffer::persisted("# Día uno\n\nwent  outside".into());
        assert_eq!(buf.word_count(), 5);
        assert_eq!(buf.char_count(), 24);
    }
}
