//! The declared enumerated-value fragment and its diagnostic origin.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Opaque reference to the declaration a fragment came from.
///
/// Carried purely for diagnostics: conflict errors print it so a human can
/// locate and fix the offending declaration without reading generated
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
	/// The declaration site is not known (fragments built in code).
	Unknown,
	/// A declaration-file label, e.g. `conditions.kdl:2`.
	Decl(Box<str>),
}

impl Origin {
	/// Creates an origin pointing at a declaration label.
	pub fn decl(label: impl Into<Box<str>>) -> Self {
		Self::Decl(label.into())
	}
}

impl Default for Origin {
	fn default() -> Self {
		Self::Unknown
	}
}

impl std::fmt::Display for Origin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Unknown => write!(f, "unknown declaration"),
			Self::Decl(label) => write!(f, "{label}"),
		}
	}
}

/// One declared `(identifier, name, description)` triple belonging to a
/// named logical enumerated type.
///
/// Fragments are immutable once constructed. Within a logical type they are
/// totally ordered by identifier (see [`Fragment::cmp_by_id`]); that order
/// becomes the generated container's declaration order and therefore its
/// positional index. Equality is by `(name, logical_type)`, matching the
/// merge key under which duplicate declarations collapse.
#[derive(Debug, Clone)]
pub struct Fragment {
	id: i32,
	name: String,
	description: String,
	logical_type: String,
	origin: Origin,
}

impl Fragment {
	/// Creates a fragment with an unknown origin.
	pub fn new(
		logical_type: impl Into<String>,
		id: i32,
		name: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		Self {
			id,
			name: name.into(),
			description: description.into(),
			logical_type: logical_type.into(),
			origin: Origin::Unknown,
		}
	}

	/// Attaches the originating-declaration reference.
	pub fn with_origin(mut self, origin: Origin) -> Self {
		self.origin = origin;
		self
	}

	/// Caller-supplied numeric identifier, unique within the logical type.
	pub fn id(&self) -> i32 {
		self.id
	}

	/// Symbolic name, unique within the logical type.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Free-text description carried into generated artifacts.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Name of the logical type this fragment merges into.
	pub fn logical_type(&self) -> &str {
		&self.logical_type
	}

	/// Where this fragment was declared.
	pub fn origin(&self) -> &Origin {
		&self.origin
	}

	/// Total order by identifier, the declaration order of generated
	/// containers.
	///
	/// Deliberately not an `Ord` impl: equality is by `(name,
	/// logical_type)` and an inconsistent derive pair is worse than an
	/// explicit comparator at the two sort sites that need it.
	pub fn cmp_by_id(&self, other: &Self) -> Ordering {
		self.id.cmp(&other.id)
	}
}

impl PartialEq for Fragment {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name && self.logical_type == other.logical_type
	}
}

impl Eq for Fragment {}

impl Hash for Fragment {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.logical_type.hash(state);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn equality_is_by_name_and_type() {
		let a = Fragment::new("ConditionType", 1, "One", "first");
		let b = Fragment::new("ConditionType", 9, "One", "other id, same key");
		let c = Fragment::new("TargetType", 1, "One", "same name, other type");

		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn ordering_is_by_id() {
		let lo = Fragment::new("T", 1, "A", "");
		let hi = Fragment::new("T", 3, "B", "");

		assert_eq!(lo.cmp_by_id(&hi), Ordering::Less);
		assert_eq!(hi.cmp_by_id(&lo), Ordering::Greater);
	}

	#[test]
	fn origin_displays_label() {
		let f = Fragment::new("T", 1, "A", "").with_origin(Origin::decl("conditions.kdl:0"));
		assert_eq!(f.origin().to_string(), "conditions.kdl:0");
		assert_eq!(Origin::Unknown.to_string(), "unknown declaration");
	}
}
