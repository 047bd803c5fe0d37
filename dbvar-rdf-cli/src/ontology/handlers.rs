use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use dbvar_rdf_core::ontology;
use dbvar_rdf_io::{Output, TurtleWriter};

pub fn run_ontology(matches: &ArgMatches) -> Result<()> {
    let output = matches.get_one::<String>("output").map(PathBuf::from);

    let sink = Output::create(output.as_deref(), false).context("Failed to open output")?;
    let mut writer = TurtleWriter::new(sink);
    writer.append(&ontology::statements())?;
    writer.finish()?.finish()?;

    Ok(())
}
