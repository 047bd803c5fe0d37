use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

///
/// Where Turtle output goes: a file or stdout, optionally gzip compressed.
///
pub enum Output {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<Box<dyn Write>>>),
}

impl Output {
    ///
    /// Open an output sink.
    ///
    /// # Arguments
    /// - path: file to create, or `None` for stdout
    /// - gzip: compress the output; implied by a `.gz` extension
    pub fn create(path: Option<&Path>, gzip: bool) -> io::Result<Self> {
        let inner: Box<dyn Write> = match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Box::new(File::create(path)?)
            }
            None => Box::new(io::stdout()),
        };

        let gzip = gzip || path.is_some_and(|p| p.extension() == Some(OsStr::new("gz")));
        let writer = BufWriter::new(inner);

        Ok(match gzip {
            true => Output::Gzip(GzEncoder::new(writer, Compression::best())),
            false => Output::Plain(writer),
        })
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Output::Gzip(_))
    }

    ///
    /// Write the gzip trailer, if any, and flush.
    ///
    pub fn finish(self) -> io::Result<()> {
        match self {
            Output::Plain(mut writer) => writer.flush(),
            Output::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(writer) => writer.write(buf),
            Output::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(writer) => writer.flush(),
            Output::Gzip(encoder) => encoder.flush(),
        }
    }
}
