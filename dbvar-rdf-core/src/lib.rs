//! # dbVar to RDF
//!
//! Core data model and mapping engine for converting dbVar structural
//! variants, published as GVF, into RDF statements:
//!
//! - GVF header, record and attribute models
//! - variant calls and variant regions, and the statements describing them
//! - FALDO exact and fuzzy positions
//! - lookup tables for chromosome accessions and variant classes
//! - the dbVar vocabulary and ontology
//!
//! Reading GVF streams and writing Turtle lives in `dbvar-rdf-io`.
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod mappings;
pub mod models;
pub mod ontology;
pub mod position;
pub mod vocab;
pub mod xref;

pub use config::ConvertConfig;
pub use diagnostics::{DropCounter, DropObserver, DropReason, DropSite, NoopObserver};
pub use errors::*;
pub use mappings::{LookupResolver, Mappings};
pub use models::*;
pub use position::Position;
