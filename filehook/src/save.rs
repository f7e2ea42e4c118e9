//! Progress save files
//!
//! A save file records where to resume reading:
//!
//! ```text
//! [8 bytes big-endian i64 offset][0x00][UTF-8 path bytes ...]
//! ```
//!
//! Save files live in `~/FileHookSaves` and are named
//! `filehook_<uuid>.save`.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SAVES_DIR_NAME: &str = "FileHookSaves";
pub const SAVE_EXTENSION: &str = "save";

const OFFSET_LEN: usize = 8;
const SEPARATOR: u8 = 0;

/// Why a byte buffer is not a valid save record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is {0} bytes, too short for an offset and separator")]
    Truncated(usize),
    #[error("expected a zero separator byte, found {0:#04x}")]
    BadSeparator(u8),
    #[error("path is not valid UTF-8: {0}")]
    BadPath(#[from] std::str::Utf8Error),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("{0}")]
    CreateDir(io::Error),
    #[error("File {} already exists.", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Path {} is not valid UTF-8 and cannot be recorded.", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("{0}")]
    Write(io::Error),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Invalid file structure")]
    Structure(#[from] RecordError),
}

/// Resume position for one text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub offset: i64,
    pub path: String,
}

impl SaveRecord {
    pub fn new(offset: i64, path: impl Into<String>) -> Self {
        Self { offset, path: path.into() }
    }

    /// Build a record for `path`, refusing paths that are not UTF-8.
    pub fn for_path(offset: i64, path: &Path) -> Result<Self, SaveError> {
        let text = path
            .to_str()
            .ok_or_else(|| SaveError::NonUtf8Path(path.to_path_buf()))?;
        Ok(Self::new(offset, text))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(OFFSET_LEN + 1 + self.path.len());
        bytes.extend_from_slice(&self.offset.to_be_bytes());
        bytes.push(SEPARATOR);
        bytes.extend_from_slice(self.path.as_bytes());
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < OFFSET_LEN + 1 {
            return Err(RecordError::Truncated(bytes.len()));
        }
        let (offset_bytes, rest) = bytes.split_at(OFFSET_LEN);
        let mut raw = [0u8; OFFSET_LEN];
        raw.copy_from_slice(offset_bytes);
        let offset = i64::from_be_bytes(raw);

        if rest[0] != SEPARATOR {
            return Err(RecordError::BadSeparator(rest[0]));
        }
        let path = std::str::from_utf8(&rest[1..])?;
        Ok(Self::new(offset, path))
    }

    /// Byte to resume reading from. Negative offsets, which a cleaned first
    /// line can produce, resume at the start of the file.
    pub fn resume_offset(&self) -> u64 {
        u64::try_from(self.offset).unwrap_or(0)
    }

    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

/// Offset to record so that reloading shows the current line again
/// rather than the one after it.
///
/// `position` is the read position after the displayed line was consumed and
/// `line_len` the UTF-8 byte length of that line (the raw line when it was
/// cleaned for display). The extra byte for cleaned lines is kept exactly as
/// the save format has always used it; the result never goes below zero.
pub fn rewind_offset(position: u64, line_len: usize, cleaned: bool) -> i64 {
    let position = i64::try_from(position).unwrap_or(i64::MAX);
    let line_len = i64::try_from(line_len).unwrap_or(i64::MAX);
    let mut last_pos = position.saturating_sub(line_len.saturating_add(1)).max(0);
    if cleaned {
        last_pos -= 1;
    }
    last_pos.max(0)
}

/// `~/FileHookSaves`
pub fn saves_dir() -> PathBuf {
    hookcore::storage::home_dir().join(SAVES_DIR_NAME)
}

/// A fresh, uniquely named save file path inside `dir`.
pub fn unique_save_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "filehook_{}.{}",
        uuid::Uuid::new_v4().simple(),
        SAVE_EXTENSION
    ))
}

/// Write `record` to a new file in `dir`, creating `dir` when missing.
pub fn write_save(dir: &Path, record: &SaveRecord) -> Result<PathBuf, SaveError> {
    write_save_to(dir, unique_save_path(dir), record)
}

fn write_save_to(dir: &Path, path: PathBuf, record: &SaveRecord) -> Result<PathBuf, SaveError> {
    std::fs::create_dir_all(dir).map_err(SaveError::CreateDir)?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(SaveError::AlreadyExists(path));
        }
        Err(e) => return Err(SaveError::Write(e)),
    };

    file.write_all(&record.encode())
        .and_then(|_| file.flush())
        .map_err(SaveError::Write)?;

    log::info!("saved offset {} for {} to {}", record.offset, record.path, path.display());
    Ok(path)
}

/// Read and decode a save file.
pub fn read_save(path: &Path) -> Result<SaveRecord, LoadError> {
    let bytes = std::fs::read(path)?;
    let record = SaveRecord::decode(&bytes)?;
    log::info!("loaded save {} -> {} @ {}", path.display(), record.path, record.offset);
    Ok(record)
}
