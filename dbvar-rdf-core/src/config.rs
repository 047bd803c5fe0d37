use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::mappings::Mappings;
use crate::models::variant::EntityKind;

///
/// Run configuration for a conversion, read from TOML:
///
/// ```toml
/// model = "variant_call"
/// mappings = "mappings.yaml"
/// gzip = true
/// ```
///
/// Every field is optional; command line flags take precedence.
///
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConvertConfig {
    pub model: Option<String>,
    pub mappings: Option<PathBuf>,
    pub gzip: Option<bool>,
}

impl ConvertConfig {
    pub fn kind(&self) -> Result<Option<EntityKind>, ConfigError> {
        self.model.as_deref().map(str::parse).transpose()
    }

    ///
    /// The lookup tables named by `mappings`, or the bundled ones.
    ///
    pub fn load_mappings(&self) -> Result<Mappings, ConfigError> {
        match &self.mappings {
            Some(path) => Mappings::try_from(path.as_path()),
            None => Mappings::bundled(),
        }
    }
}

impl TryFrom<&Path> for ConvertConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/config/convert.toml");
        let config = ConvertConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.model.as_deref(), Some("variant_region"));
        assert_eq!(config.gzip, Some(true));
        assert_eq!(config.mappings, None);
        assert_eq!(config.kind().unwrap(), Some(EntityKind::VariantRegion));
    }

    #[rstest]
    fn test_empty_config() {
        let config: ConvertConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.kind().unwrap(), None);
        assert!(config.load_mappings().is_ok());
    }

    #[rstest]
    fn test_unknown_model() {
        let config: ConvertConfig = toml::from_str("model = \"variant\"").unwrap();
        assert!(matches!(config.kind(), Err(ConfigError::UnknownModel(_))));
    }

    #[rstest]
    fn test_missing_config_file() {
        let result = ConvertConfig::try_from(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
