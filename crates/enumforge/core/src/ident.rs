//! Identifier grammar for generated Rust artifacts.
//!
//! Fragment names become enum variants and logical-type names become enum
//! type names, so both must be bare Rust identifiers and must not collide
//! with a reserved word. The grammar is deliberately ASCII-only: generated
//! artifacts should read the same everywhere.

use thiserror::Error;

/// Words that may not be used as fragment or logical-type names.
///
/// Strict and reserved Rust keywords, including those reserved by the 2018+
/// editions (`async`, `try`, `gen`, ...).
const RESERVED: &[&str] = &[
	"abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
	"do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
	"in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
	"return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
	"typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Why a candidate identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentError {
	#[error("identifier is empty")]
	Empty,
	#[error("'{0}' is not a bare identifier")]
	Malformed(String),
	#[error("'{0}' is a reserved word")]
	Reserved(String),
}

/// Checks a candidate name against the generated-language grammar.
pub fn check_ident(s: &str) -> Result<(), IdentError> {
	let mut chars = s.chars();
	let Some(first) = chars.next() else {
		return Err(IdentError::Empty);
	};
	if !(first.is_ascii_alphabetic() || first == '_') {
		return Err(IdentError::Malformed(s.to_owned()));
	}
	if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
		return Err(IdentError::Malformed(s.to_owned()));
	}
	// `_` alone is a pattern, not an identifier.
	if s == "_" {
		return Err(IdentError::Malformed(s.to_owned()));
	}
	if RESERVED.contains(&s) {
		return Err(IdentError::Reserved(s.to_owned()));
	}
	Ok(())
}

/// Convenience predicate over [`check_ident`].
pub fn is_valid_ident(s: &str) -> bool {
	check_ident(s).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_ordinary_identifiers() {
		for s in ["ConditionType", "One", "snake_case", "_leading", "A1"] {
			assert!(is_valid_ident(s), "expected '{s}' to be valid");
		}
	}

	#[test]
	fn rejects_malformed_identifiers() {
		assert_eq!(check_ident(""), Err(IdentError::Empty));
		for s in ["1abc", "has space", "dash-ed", "dotted.name", "_", "naïve"] {
			assert!(
				matches!(check_ident(s), Err(IdentError::Malformed(_))),
				"expected '{s}' to be malformed"
			);
		}
	}

	#[test]
	fn rejects_reserved_words() {
		for s in ["enum", "type", "match", "Self", "async", "gen"] {
			assert_eq!(check_ident(s), Err(IdentError::Reserved(s.to_owned())));
		}
	}
}
