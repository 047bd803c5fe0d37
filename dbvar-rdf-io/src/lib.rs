//! # Streaming dbVar GVF to Turtle conversion
//!
//! Reads GVF (plain, gzip or stdin) one line at a time, turns every record
//! into its statements with `dbvar-rdf-core`, and appends them to a Turtle
//! document as they are produced, so memory use does not grow with the input.
//!
pub mod convert;
pub mod error;
pub mod gvf;
pub mod sink;
pub mod turtle;

// re-expose core functions
pub use convert::*;
pub use error::*;
pub use gvf::*;
pub use sink::*;
pub use turtle::*;
