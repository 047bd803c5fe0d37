use clap::{Arg, ArgAction, Command, arg};

pub const CONVERT_CMD: &str = "convert";
pub const MODELS: [&str; 2] = ["variant_call", "variant_region"];

pub fn create_convert_cli() -> Command {
    Command::new(CONVERT_CMD)
        .about("Convert dbVar GVF to RDF (Turtle).")
        .arg(
            Arg::new("model")
                .required(false)
                .value_parser(MODELS)
                .help("Entity each record describes (may also be set in --config)"),
        )
        .arg(
            arg!(-i --input <INPUT>)
                .required(false)
                .default_value("-")
                .help("Path to GVF input, plain or .gz (default: stdin)"),
        )
        .arg(
            arg!(-o --output <OUTPUT>)
                .required(false)
                .help("Path to Turtle output (default: stdout)"),
        )
        .arg(
            arg!(--gzip)
                .action(ArgAction::SetTrue)
                .help("Compress the output with gzip (implied by a .gz output path)"),
        )
        .arg(
            arg!(--mappings <MAPPINGS>)
                .required(false)
                .help("Path to YAML chromosome and variant class tables (default: bundled)"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Path to TOML run configuration"),
        )
}
