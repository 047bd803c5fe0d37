//! GVF (Genome Variation Format 1.10) pragmas and feature lines.
//!
//! Feature lines have nine tab-delimited columns:
//!
//! 1. seqid: chromosome or contig of the sequence alteration
//! 2. source: algorithm or database that produced the call
//! 3. type: SO term for the sequence alteration
//! 4. start, 5. end: 1-based coordinates on the plus strand
//! 6. score: Phred scaled probability that the call is incorrect
//! 7. strand: `+`, `-` or `?`
//! 8. phase: kept for GFF3 compatibility
//! 9. attributes: `tag=value,value;tag=value`
//!
//! A `.` in any optional column means the value is absent.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::errors::GvfError;
use crate::models::attributes::{Attributes, MISSING_VALUE};

pub const COLUMN_DELIMITER: char = '\t';
pub const PRAGMA_MARKER: char = '#';
pub const COLUMN_COUNT: usize = 9;

static REFERENCE_BUILD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(GRCh\d+)").expect("valid reference build pattern"));

///
/// Header metadata collected from the pragma lines preceding the data lines.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GvfHeader {
    entries: HashMap<String, String>,
}

impl GvfHeader {
    pub fn new() -> Self {
        GvfHeader::default()
    }

    ///
    /// Add one pragma line, e.g. `##assembly-name GRCh38.p12`. Leading
    /// markers are stripped, the key is the first whitespace delimited token
    /// (without a trailing `:`), and the value is the remainder. Returns
    /// `false` when the line carries no key.
    ///
    pub fn push_line(&mut self, line: &str) -> bool {
        let stripped = line
            .trim_start_matches(|c: char| c == PRAGMA_MARKER || c.is_whitespace())
            .trim_end();
        let (key, value) = match stripped.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (stripped, ""),
        };

        let key = key.trim().trim_end_matches(':');
        if key.is_empty() {
            return false;
        }

        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///
    /// The GRC assembly (e.g. `GRCh38`) named by `genome-build`, falling back
    /// to `assembly-name`.
    ///
    pub fn reference_build(&self) -> Option<String> {
        ["genome-build", "assembly-name"].iter().find_map(|key| {
            self.get(key)
                .and_then(|value| REFERENCE_BUILD.captures(value))
                .map(|caps| caps[1].to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl FromStr for Strand {
    type Err = GvfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "?" => Ok(Strand::Unknown),
            _ => Err(GvfError::InvalidStrand(s.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "?"),
        }
    }
}

///
/// One decoded GVF feature line.
///
#[derive(Clone, Debug, PartialEq)]
pub struct GvfRecord {
    pub seqid: String,
    pub source: String,
    pub feature_type: String,
    pub start: i64,
    pub end: i64,
    pub score: Option<f64>,
    pub strand: Option<Strand>,
    pub phase: Option<i64>,
    pub attributes: Attributes,

    pub header: Arc<GvfHeader>,
}

impl GvfRecord {
    ///
    /// Decode one data line.
    ///
    /// # Arguments
    /// - line: the feature line, without its line terminator
    /// - header: the pragmas that preceded it
    pub fn parse(line: &str, header: Arc<GvfHeader>) -> Result<Self, GvfError> {
        let columns: Vec<&str> = line.trim().split(COLUMN_DELIMITER).map(str::trim).collect();
        if columns.len() != COLUMN_COUNT {
            return Err(GvfError::ColumnCount(columns.len()));
        }

        let start = parse_integer("start", columns[3])?;
        let end = parse_integer("end", columns[4])?;
        if start > end {
            return Err(GvfError::InvertedInterval { start, end });
        }

        let score = match present(columns[5]) {
            Some(v) => Some(v.parse::<f64>().map_err(|_| GvfError::InvalidFloat {
                column: "score",
                value: v.to_string(),
            })?),
            None => None,
        };
        let strand = present(columns[6]).map(Strand::from_str).transpose()?;
        let phase = match present(columns[7]) {
            Some(v) => Some(v.parse::<i64>().map_err(|_| GvfError::InvalidInteger {
                column: "phase",
                value: v.to_string(),
            })?),
            None => None,
        };

        Ok(GvfRecord {
            seqid: columns[0].to_string(),
            source: columns[1].to_string(),
            feature_type: columns[2].to_string(),
            start,
            end,
            score,
            strand,
            phase,
            attributes: columns[8].parse()?,
            header,
        })
    }
}

fn present(column: &str) -> Option<&str> {
    Some(column).filter(|c| !c.is_empty() && *c != MISSING_VALUE)
}

fn parse_integer(column: &'static str, value: &str) -> Result<i64, GvfError> {
    value.parse::<i64>().map_err(|_| GvfError::InvalidInteger {
        column,
        value: value.to_string(),
    })
}
