//! Reading session: the open document plus what is currently on screen.
//!
//! Kept free of egui so the advance and save bookkeeping can be tested
//! directly. The app layer adds the clipboard and dialogs on top.

use crate::cleanup::clean_text;
use crate::document::Document;
use crate::save::{rewind_offset, SaveError, SaveRecord};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct Session {
    document: Option<Document>,
    /// Line currently shown (cleaned when blue sky mode was on).
    displayed: String,
    /// Raw line behind a cleaned `displayed`, needed to rewind correctly.
    raw_line: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open document, then open `path` at `seek`.
    pub fn open(&mut self, path: impl Into<PathBuf>, seek: Option<u64>) -> io::Result<()> {
        self.close();
        self.document = Some(Document::open(path, seek)?);
        Ok(())
    }

    /// Drop the open document. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.displayed.clear();
        self.raw_line = None;
        match self.document.take() {
            Some(doc) => {
                log::info!("closed {}", doc.path().display());
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.document.as_ref().map(|d| d.path())
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn raw_line(&self) -> Option<&str> {
        self.raw_line.as_deref()
    }

    pub fn position(&self) -> Option<u64> {
        self.document.as_ref().map(|d| d.position())
    }

    pub fn lines_read(&self) -> u64 {
        self.document.as_ref().map_or(0, |d| d.lines_read())
    }

    pub fn at_end(&self) -> bool {
        self.document.as_ref().map_or(true, |d| d.at_end())
    }

    /// Move to the next line.
    ///
    /// The display is cleared first. Returns the new line to copy, or `None`
    /// when nothing is open or the file is exhausted. With `blue_sky` the
    /// raw line is kept and the cleaned text is displayed.
    pub fn advance(&mut self, blue_sky: bool) -> io::Result<Option<&str>> {
        self.displayed.clear();

        let Some(doc) = self.document.as_mut() else {
            return Ok(None);
        };
        let Some(line) = doc.next_line()? else {
            return Ok(None);
        };

        if blue_sky {
            self.displayed = clean_text(&line);
            self.raw_line = Some(line);
        } else {
            self.displayed = line;
            self.raw_line = None;
        }
        Ok(Some(self.displayed.as_str()))
    }

    /// Record that resumes on the line currently displayed.
    /// `None` when no document is open.
    pub fn resume_record(&self) -> Option<Result<SaveRecord, SaveError>> {
        let doc = self.document.as_ref()?;
        let text = self.raw_line.as_deref().unwrap_or(&self.displayed);
        let cleaned = self.raw_line.as_deref().is_some_and(|raw| !raw.is_empty());
        let offset = rewind_offset(doc.position(), text.len(), cleaned);
        Some(SaveRecord::for_path(offset, doc.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_scratch(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("filehook_session_{}.txt", uuid::Uuid::new_v4().simple()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_advance_without_document() {
        let mut session = Session::new();
        assert_eq!(session.advance(false).unwrap(), None);
        assert!(session.resume_record().is_none());
        assert!(!session.close());
    }

    #[test]
    fn test_advance_plain_and_blue_sky() {
        let path = write_scratch("[name]Alice[line]Hi [...]\nplain\n");
        let mut session = Session::new();
        session.open(&path, None).unwrap();

        assert_eq!(session.advance(true).unwrap(), Some("Alice: Hi …"));
        assert_eq!(session.raw_line(), Some("[name]Alice[line]Hi [...]"));

        assert_eq!(session.advance(false).unwrap(), Some("plain"));
        assert_eq!(session.raw_line(), None);
        assert_eq!(session.lines_read(), 2);

        assert_eq!(session.advance(false).unwrap(), None);
        assert_eq!(session.displayed(), "");
        assert!(session.at_end());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_resume_record_plain() {
        let path = write_scratch("first\nsecond\nthird\n");
        let mut session = Session::new();
        session.open(&path, None).unwrap();
        session.advance(false).unwrap();
        session.advance(false).unwrap();

        let record = session.resume_record().unwrap().unwrap();
        assert_eq!(record.offset, 6);
        assert_eq!(record.path, path.to_str().unwrap());

        session.open(record.path_buf(), Some(record.offset as u64)).unwrap();
        assert_eq!(session.advance(false).unwrap(), Some("second"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_resume_record_blue_sky_takes_extra_byte() {
        let raw = "[%p]second[%e]";
        let path = write_scratch(&format!("first\n{raw}\nthird\n"));
        let mut session = Session::new();
        session.open(&path, None).unwrap();
        session.advance(true).unwrap();
        session.advance(true).unwrap();
        assert_eq!(session.displayed(), "second");

        let position = session.position().unwrap();
        let record = session.resume_record().unwrap().unwrap();
        assert_eq!(record.offset, position as i64 - (raw.len() as i64 + 1) - 1);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_negative_offset_record_resumes_at_start() {
        let path = write_scratch("first\nsecond\n");
        let dir = std::env::temp_dir().join(format!("filehook_session_saves_{}", uuid::Uuid::new_v4().simple()));
        let written = crate::save::write_save(&dir, &SaveRecord::for_path(-1, &path).unwrap()).unwrap();

        let record = crate::save::read_save(&written).unwrap();
        assert_eq!(record.offset, -1);

        let mut session = Session::new();
        session.open(record.path_buf(), Some(record.resume_offset())).unwrap();
        assert_eq!(session.position(), Some(0));
        assert_eq!(session.advance(false).unwrap(), Some("first"));

        std::fs::remove_dir_all(dir).unwrap();
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_display_cleared_at_end_keeps_raw_line() {
        let path = write_scratch("[center]only\n");
        let mut session = Session::new();
        session.open(&path, None).unwrap();
        session.advance(true).unwrap();
        assert_eq!(session.advance(true).unwrap(), None);
        assert_eq!(session.displayed(), "");
        assert_eq!(session.raw_line(), Some("[center]only"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_open_replaces_previous_document() {
        let a = write_scratch("a1\na2\n");
        let b = write_scratch("b1\n");
        let mut session = Session::new();
        session.open(&a, None).unwrap();
        session.advance(false).unwrap();
        session.open(&b, None).unwrap();

        assert_eq!(session.path(), Some(b.as_path()));
        assert_eq!(session.displayed(), "");
        assert_eq!(session.lines_read(), 0);
        assert_eq!(session.advance(false).unwrap(), Some("b1"));

        assert!(session.close());
        assert!(!session.is_open());

        std::fs::remove_file(a).unwrap();
        std::fs::remove_file(b).unwrap();
    }
}
