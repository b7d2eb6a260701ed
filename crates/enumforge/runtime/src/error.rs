//! Lookup errors for the runtime registry surface.
//!
//! Registration failures use [`enumforge_core::RegisterError`]; this module
//! covers the read side. Every non-nullable accessor maps "absent" onto one
//! of these variants, while the `_opt` accessors return `None`/empty
//! instead.

use thiserror::Error;

/// Errors produced by the non-nullable lookup accessors.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
	/// The logical-type name was never registered.
	#[error("enum type '{type_name}' is not registered")]
	UnregisteredType { type_name: String },

	/// No value with the requested identifier.
	#[error("enum type '{type_name}' has no value with id {id}")]
	IdNotFound { type_name: &'static str, id: i32 },

	/// No value with the requested name (case-sensitive exact match).
	#[error("enum type '{type_name}' has no value named '{name}'")]
	NameNotFound {
		type_name: &'static str,
		name: String,
	},

	/// Positional lookup outside `[0, len)`.
	#[error("ordinal {ordinal} out of range for enum type '{type_name}' (len {len})")]
	OrdinalOutOfRange {
		type_name: &'static str,
		ordinal: usize,
		len: usize,
	},
}
