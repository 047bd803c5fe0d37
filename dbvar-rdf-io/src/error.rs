use std::io;

use thiserror::Error;

use dbvar_rdf_core::errors::{ConfigError, GvfError, MappingError};

/// Error type for reading a GVF stream.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The line is not valid GVF. Only that line is lost.
    #[error("Line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: GvfError,
    },

    /// The stream itself failed.
    #[error("Line {line}: failed to read input: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub fn line(&self) -> usize {
        match self {
            ReadError::Format { line, .. } | ReadError::Io { line, .. } => *line,
        }
    }
}

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Line {line}: {source}")]
    Mapping {
        line: usize,
        #[source]
        source: MappingError,
    },

    #[error("Line {line}: failed to read input: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: failed to write output: {source}")]
    Write {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for dbvar-rdf-io operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
