//! Streaming GVF reader.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use log::warn;

use dbvar_rdf_core::errors::GvfError;
use dbvar_rdf_core::models::record::{GvfHeader, GvfRecord, PRAGMA_MARKER};

use crate::error::ReadError;

const READ_CAPACITY: usize = 256 * 1024;

///
/// Open a GVF input for reading. `-` reads stdin; a `.gz` extension is
/// decompressed on the fly.
///
/// # Arguments
/// - path: path to the file to read, or `-`
pub fn open_input(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::with_capacity(READ_CAPACITY, io::stdin())));
    }

    let path = Path::new(path);
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to open file {}: {}", path.display(), e)))?;

    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(Box::new(BufReader::with_capacity(READ_CAPACITY, file)))
}

///
/// Reads the pragma block of a GVF stream up front, then yields one
/// `(line_number, record)` per data line, lazily and in file order.
///
/// Blank lines are ignored everywhere. `#` lines after the first data line
/// are skipped. Line numbers are 1-based and count every physical line.
/// A line that is not valid UTF-8 is a format error for that line only.
///
pub struct GvfReader<R: BufRead> {
    reader: R,
    header: Arc<GvfHeader>,
    line_number: usize,
    buffer: Vec<u8>,
    pending: Option<Result<(usize, String), ReadError>>,
    failed: bool,
}

impl GvfReader<Box<dyn BufRead>> {
    pub fn from_path(path: &str) -> io::Result<Self> {
        GvfReader::new(open_input(path)?)
    }
}

impl<R: BufRead> GvfReader<R> {
    ///
    /// Consume the header block of `reader`.
    ///
    /// The first non-pragma line is kept and becomes the first data line.
    ///
    pub fn new(mut reader: R) -> io::Result<Self> {
        let mut header = GvfHeader::new();
        let mut line_number = 0;
        let mut buffer = Vec::new();
        let mut pending = None;

        loop {
            if read_line(&mut reader, &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            if is_blank(&buffer) {
                continue;
            }
            if is_pragma(&buffer) {
                match decode(&buffer) {
                    Ok(line) => {
                        header.push_line(line);
                    }
                    Err(e) => warn!("Line {}: {}; skipping pragma", line_number, e),
                }
                continue;
            }

            pending = Some(data_line(line_number, &buffer));
            break;
        }

        Ok(GvfReader {
            reader,
            header: Arc::new(header),
            line_number,
            buffer,
            pending,
            failed: false,
        })
    }

    pub fn header(&self) -> &Arc<GvfHeader> {
        &self.header
    }

    fn next_data_line(&mut self) -> Option<Result<(usize, String), ReadError>> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        loop {
            match read_line(&mut self.reader, &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(ReadError::Io {
                        line: self.line_number + 1,
                        source,
                    }));
                }
            }
            self.line_number += 1;

            if is_blank(&self.buffer) || is_pragma(&self.buffer) {
                continue;
            }

            return Some(data_line(self.line_number, &self.buffer));
        }
    }
}

fn read_line<R: BufRead>(reader: &mut R, buffer: &mut Vec<u8>) -> io::Result<usize> {
    buffer.clear();
    reader.read_until(b'\n', buffer)
}

fn is_blank(buffer: &[u8]) -> bool {
    buffer.iter().all(u8::is_ascii_whitespace)
}

fn is_pragma(buffer: &[u8]) -> bool {
    buffer.first() == Some(&(PRAGMA_MARKER as u8))
}

/// The line without its terminator.
fn decode(buffer: &[u8]) -> Result<&str, GvfError> {
    let mut end = buffer.len();
    while end > 0 && matches!(buffer[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    std::str::from_utf8(&buffer[..end]).map_err(|e| GvfError::InvalidUtf8(e.valid_up_to()))
}

fn data_line(line: usize, buffer: &[u8]) -> Result<(usize, String), ReadError> {
    decode(buffer)
        .map(|text| (line, text.to_string()))
        .map_err(|source| ReadError::Format { line, source })
}

impl<R: BufRead> Iterator for GvfReader<R> {
    type Item = Result<(usize, GvfRecord), ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_data_line()? {
            Ok((line, text)) => Some(
                GvfRecord::parse(&text, Arc::clone(&self.header))
                    .map(|record| (line, record))
                    .map_err(|source| ReadError::Format { line, source }),
            ),
            Err(e) => {
                self.failed = matches!(e, ReadError::Io { .. });
                Some(Err(e))
            }
        }
    }
}
