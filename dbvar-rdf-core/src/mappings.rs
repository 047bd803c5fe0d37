//! Lookup tables from RefSeq chromosome accessions to Human Chromosome
//! Ontology identifiers, and from GVF variant types to Sequence Ontology terms.
//!
//! The tables are plain YAML:
//!
//! ```yaml
//! chromosome:
//!   NC_000001.11: 1/GRCh38
//!   NC_012920.1:
//!     - MT/GRCh37
//!     - MT/GRCh38
//! variant_class:
//!   deletion: SO_0000159
//! ```
//!
//! A copy is bundled with the crate; [`Mappings::bundled`] loads it.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, MappingError};
use crate::models::term::Iri;
use crate::vocab;

const BUNDLED_MAPPINGS: &str = include_str!("../data/mappings.yaml");

///
/// Resolves raw accessions and vocabulary terms to canonical identifiers.
///
pub trait LookupResolver {
    ///
    /// Resolve a chromosome accession to its HCO identifier.
    ///
    /// Returns `Ok(None)` when the accession is unknown, or when it is shared
    /// by several assemblies and `assembly` selects none or more than one of
    /// them. Fails when the accession is shared and no assembly is given.
    ///
    fn chromosome(&self, accession: &str, assembly: Option<&str>) -> Result<Option<Iri>, MappingError>;

    ///
    /// Resolve a GVF variant type (an SO term name) to its OBO identifier.
    ///
    fn variant_class(&self, term: &str) -> Option<Iri>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChromosomeEntry {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Mappings {
    #[serde(default)]
    pub chromosome: HashMap<String, ChromosomeEntry>,
    #[serde(default)]
    pub variant_class: HashMap<String, String>,
}

impl Mappings {
    ///
    /// The tables shipped with this crate.
    ///
    pub fn bundled() -> Result<Self, ConfigError> {
        Mappings::from_str(BUNDLED_MAPPINGS)
    }
}

impl FromStr for Mappings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yaml::from_str(s)?)
    }
}

impl TryFrom<&Path> for Mappings {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let yaml = read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {}", path.display(), e)))?;
        Mappings::from_str(&yaml)
    }
}

impl LookupResolver for Mappings {
    fn chromosome(&self, accession: &str, assembly: Option<&str>) -> Result<Option<Iri>, MappingError> {
        let candidates = match self.chromosome.get(accession) {
            None => return Ok(None),
            Some(ChromosomeEntry::One(hco)) => return Ok(Some(vocab::hco(hco))),
            Some(ChromosomeEntry::Many(candidates)) => candidates,
        };

        let assembly = assembly.ok_or_else(|| MappingError::MissingAssembly {
            accession: accession.to_string(),
        })?;

        let matching: Vec<&String> = candidates
            .iter()
            .filter(|hco| hco.ends_with(assembly))
            .collect();

        match matching.as_slice() {
            [hco] => Ok(Some(vocab::hco(hco))),
            _ => Ok(None),
        }
    }

    fn variant_class(&self, term: &str) -> Option<Iri> {
        self.variant_class.get(term).map(|so| vocab::obo(so))
    }
}
