use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use dbvar_rdf_core::config::ConvertConfig;
use dbvar_rdf_core::mappings::Mappings;
use dbvar_rdf_core::models::variant::EntityKind;
use dbvar_rdf_io::convert_path;

use crate::errors::UsageError;

pub fn run_convert(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => ConvertConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => ConvertConfig::default(),
    };

    let kind = match matches.get_one::<String>("model") {
        Some(model) => model.parse::<EntityKind>().map_err(UsageError::from)?,
        None => config
            .kind()
            .map_err(UsageError::from)?
            .ok_or(UsageError::MissingModel)?,
    };

    let mappings = match matches.get_one::<String>("mappings") {
        Some(path) => Mappings::try_from(Path::new(path)),
        None => config.load_mappings(),
    }
    .context("Failed to load mapping tables")?;

    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");
    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let gzip = matches.get_flag("gzip") || config.gzip.unwrap_or(false);

    info!("Converting {} as {}", input, kind);
    let summary = convert_path(kind, input, output.as_deref(), gzip, &mappings)?;

    if summary.skipped() > 0 {
        info!(
            "Skipped {} malformed line(s) and {} invalid record(s)",
            summary.malformed, summary.invalid
        );
    }

    Ok(())
}
