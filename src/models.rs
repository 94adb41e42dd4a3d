//! Data structures for describing probes.
mod probe;
mod protocols;

pub use probe::*;
pub use protocols::*;
