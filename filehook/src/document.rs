//! Open document: a text file read forward one line at a time.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub struct Document {
    path: PathBuf,
    reader: BufReader<File>,
    /// Bytes consumed from the start of the file.
    position: u64,
    /// Lines read since the document was opened.
    lines_read: u64,
    at_end: bool,
}

impl Document {
    /// Open `path` for reading, starting at byte `seek` when it is non-zero.
    pub fn open(path: impl Into<PathBuf>, seek: Option<u64>) -> io::Result<Self> {
        let path = path.into();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);

        let position = match seek {
            Some(offset) if offset > 0 => reader.seek(SeekFrom::Start(offset))?,
            _ => 0,
        };

        log::info!("opened {} at byte {}", path.display(), position);
        Ok(Self {
            path,
            reader,
            position,
            lines_read: 0,
            at_end: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn at_end(&self) -> bool {
        self.at_end
    }

    /// Read the next line without its terminator.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. A line that is not
    /// valid UTF-8 is an `InvalidData` error; the position still moves past it.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.at_end {
            return Ok(None);
        }

        let Some(mut buf) = read_raw_line(&mut self.reader, &mut self.position)? else {
            self.at_end = true;
            return Ok(None);
        };

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.lines_read += 1;
        log::debug!("line {} of {} ends at byte {}", self.lines_read, self.path.display(), self.position);
        Ok(Some(line))
    }
}

/// Read up to and including the next `\n`, adding every consumed byte to
/// `position`, including bytes consumed before a read error.
fn read_raw_line<R: BufRead>(reader: &mut R, position: &mut u64) -> io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    let result = reader.read_until(b'\n', &mut buf);
    *position += buf.len() as u64;
    match result? {
        0 => Ok(None),
        _ => Ok(Some(buf)),
    }
}
