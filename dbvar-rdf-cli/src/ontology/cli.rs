use clap::{Command, arg};

pub const ONTOLOGY_CMD: &str = "ontology";

pub fn create_ontology_cli() -> Command {
    Command::new(ONTOLOGY_CMD)
        .about("Print the dbVar ontology (Turtle).")
        .arg(
            arg!(-o --output <OUTPUT>)
                .required(false)
                .help("Path to Turtle output (default: stdout)"),
        )
}
