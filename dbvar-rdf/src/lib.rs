#[cfg(feature = "core")]
#[doc(inline)]
pub use dbvar_rdf_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use dbvar_rdf_io as io;
