//! Runtime registry for aggregated enumerated types.
//!
//! Generated registration units hand realized containers to the
//! [`EnumRegistry`] at process start; application code then resolves values
//! by logical-type name plus identifier, symbolic name, or ordinal
//! position.
//!
//! Definitions are built eagerly and published atomically, so lookups after
//! registration are lock-free reads against immutable data.

pub mod definition;
pub mod error;
pub mod registry;

pub use definition::EnumDefinition;
pub use error::LookupError;
pub use registry::{EnumRegistry, registry};
