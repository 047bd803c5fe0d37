use thiserror::Error;

///
/// Malformed GVF syntax. Fatal for the offending line only.
///
#[derive(Error, Debug, PartialEq)]
pub enum GvfError {
    #[error("Expected 9 tab-delimited columns, found {0}")]
    ColumnCount(usize),

    #[error("Invalid integer in column `{column}`: '{value}'")]
    InvalidInteger { column: &'static str, value: String },

    #[error("Invalid float in column `{column}`: '{value}'")]
    InvalidFloat { column: &'static str, value: String },

    #[error("Invalid strand: '{0}'")]
    InvalidStrand(String),

    #[error("Start ({start}) is greater than end ({end})")]
    InvertedInterval { start: i64, end: i64 },

    #[error("Attribute group without a tag: '{0}'")]
    EmptyTag(String),

    #[error("Unterminated quote in value of attribute `{0}`")]
    UnterminatedQuote(String),

    #[error("Illegal quoting in value of attribute `{0}`")]
    IllegalQuote(String),

    #[error("Line is not valid UTF-8 (invalid byte at offset {0})")]
    InvalidUtf8(usize),

    #[error("Invalid percent-encoding in value of attribute `{tag}`: '{value}'")]
    PercentDecode { tag: String, value: String },
}

///
/// A required field of a variant is missing. Fatal for that record only.
///
#[derive(Error, Debug, PartialEq)]
#[error("Missing required field(s): {}", missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

///
/// The reference sequence of a record can not be resolved without guessing.
///
#[derive(Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("Accession {accession} maps to several chromosomes; a reference build is required")]
    MissingAssembly { accession: String },
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value for attribute `{tag}`: '{value}'")]
    InvalidAttribute { tag: &'static str, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Unknown model `{0}`, expected `variant_call` or `variant_region`")]
    UnknownModel(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
