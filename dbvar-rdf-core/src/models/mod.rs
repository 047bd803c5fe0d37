pub mod attributes;
pub mod record;
pub mod statement_set;
pub mod term;
pub mod variant;

// re-export for cleaner imports
pub use self::attributes::Attributes;
pub use self::record::{GvfHeader, GvfRecord, Strand};
pub use self::statement_set::StatementSet;
pub use self::term::{Iri, Literal, Term, Triple};
pub use self::variant::{Bounds, EntityKind, Required, Variant};
