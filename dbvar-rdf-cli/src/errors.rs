use thiserror::Error;

use dbvar_rdf_core::errors::ConfigError;

/// Bad command line input. Reported with exit code 1.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("No model given; pass `variant_call` or `variant_region`, or set `model` in --config")]
    MissingModel,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
