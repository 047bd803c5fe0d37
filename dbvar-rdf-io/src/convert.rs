//! Record-at-a-time GVF to Turtle conversion.
//!
//! A malformed line or an invalid record is logged and skipped. A reference
//! sequence that can not be resolved, or a failing stream, aborts the run.

use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info, warn};

use dbvar_rdf_core::diagnostics::DropCounter;
use dbvar_rdf_core::errors::ModelError;
use dbvar_rdf_core::mappings::LookupResolver;
use dbvar_rdf_core::models::variant::{EntityKind, Variant};

use crate::error::{ConvertError, ReadError, Result};
use crate::gvf::GvfReader;
use crate::sink::Output;
use crate::turtle::TurtleWriter;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertSummary {
    /// data lines seen
    pub records: usize,
    /// records written
    pub converted: usize,
    /// lines skipped for malformed syntax or attribute values
    pub malformed: usize,
    /// records skipped for missing required fields
    pub invalid: usize,
    pub statements: usize,
    pub bytes: usize,
    pub drops: DropCounter,
}

impl ConvertSummary {
    pub fn skipped(&self) -> usize {
        self.malformed + self.invalid
    }
}

///
/// Convert every record of `reader` into statements of `kind` and append
/// them to `writer`.
///
/// # Arguments
/// - kind: the entity each record describes
/// - reader: GVF stream, header already consumed
/// - writer: Turtle sink
/// - resolver: chromosome and variant class lookup
pub fn convert<R, W, L>(
    kind: EntityKind,
    reader: GvfReader<R>,
    writer: &mut TurtleWriter<W>,
    resolver: &L,
) -> Result<ConvertSummary>
where
    R: BufRead,
    W: Write,
    L: LookupResolver + ?Sized,
{
    let mut summary = ConvertSummary::default();

    for item in reader {
        let (line, record) = match item {
            Ok(item) => item,
            Err(ReadError::Format { line, source }) => {
                summary.records += 1;
                summary.malformed += 1;
                warn!("Line {}: {}; skipping", line, source);
                continue;
            }
            Err(ReadError::Io { line, source }) => return Err(ConvertError::Read { line, source }),
        };
        summary.records += 1;

        let variant = match Variant::from_record(kind, &record) {
            Ok(variant) => variant,
            Err(e) => {
                summary.malformed += 1;
                warn!("Line {}: {}; skipping", line, e);
                continue;
            }
        };

        let statements = match variant.statements_observed(resolver, &mut summary.drops) {
            Ok(statements) => statements,
            Err(ModelError::Mapping(source)) => return Err(ConvertError::Mapping { line, source }),
            Err(ModelError::Validation(e)) => {
                summary.invalid += 1;
                warn!("Line {}: {}; skipping", line, e);
                continue;
            }
            Err(e @ ModelError::InvalidAttribute { .. }) => {
                summary.malformed += 1;
                warn!("Line {}: {}; skipping", line, e);
                continue;
            }
        };

        summary.bytes += writer
            .append(statements)
            .map_err(|source| ConvertError::Write { line, source })?;
        summary.statements += statements.len();
        summary.converted += 1;
    }

    for (site, reason, count) in summary.drops.summary() {
        debug!("Dropped {} {} identifier(s): {}", count, site, reason);
    }
    info!(
        "Converted {} of {} record(s), {} statement(s); skipped {}",
        summary.converted,
        summary.records,
        summary.statements,
        summary.skipped()
    );

    Ok(summary)
}

///
/// Convert a GVF file (or `-` for stdin) into a Turtle file (or stdout).
///
/// # Arguments
/// - kind: the entity each record describes
/// - input: path to the GVF input, plain or `.gz`, or `-`
/// - output: path to the Turtle output, `None` for stdout
/// - gzip: compress the output
/// - resolver: chromosome and variant class lookup
pub fn convert_path<L: LookupResolver + ?Sized>(
    kind: EntityKind,
    input: &str,
    output: Option<&Path>,
    gzip: bool,
    resolver: &L,
) -> Result<ConvertSummary> {
    let reader = GvfReader::from_path(input)?;
    debug!("Read {} header pragma(s) from {}", reader.header().len(), input);

    let mut writer = TurtleWriter::new(Output::create(output, gzip)?);
    let summary = convert(kind, reader, &mut writer, resolver)?;
    writer.finish()?.finish()?;

    Ok(summary)
}
