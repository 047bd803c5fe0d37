mod convert;
mod errors;
mod ontology;

use std::process::ExitCode;

use anyhow::Result;
use clap::Command;
use clap::error::ErrorKind;

use errors::UsageError;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "dbvar-rdf";

    pub const EXIT_USAGE: u8 = 1;
    pub const EXIT_INTERNAL: u8 = 99;
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Med2RDF")
        .about("RDF converter for dbVar")
        .subcommand_required(true)
        .subcommand(convert::cli::create_convert_cli())
        .subcommand(ontology::cli::create_ontology_cli())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`). Turtle may go to stdout.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // CONVERT
        //
        Some((convert::cli::CONVERT_CMD, matches)) => convert::handlers::run_convert(matches),

        //
        // ONTOLOGY
        //
        Some((ontology::cli::ONTOLOGY_CMD, matches)) => ontology::handlers::run_ontology(matches),

        _ => unreachable!("Subcommand not found"),
    }
}

fn main() -> ExitCode {
    let matches = match build_parser().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(consts::EXIT_USAGE),
            };
        }
    };

    init_logging();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<UsageError>().is_some() => {
            eprintln!("Error: {:#}", e);
            eprintln!();
            eprintln!("Run '{} --help' for usage", consts::BIN_NAME);
            ExitCode::from(consts::EXIT_USAGE)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(consts::EXIT_INTERNAL)
        }
    }
}
