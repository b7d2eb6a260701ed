//! Immutable per-type runtime definition with eager indices.

use enumforge_core::{ContainerDef, EnumValue, RegisterError};
use rustc_hash::FxHashMap;

use crate::error::LookupError;

/// Runtime representation of one registered enumerated type.
///
/// Both indices and the ordered list are built once, at registration time,
/// from the container's realized values; the structure is never mutated
/// afterwards, so concurrent reads need no synchronization. A definition
/// lives for the rest of the process once published.
pub struct EnumDefinition {
	type_name: &'static str,
	by_id: FxHashMap<i32, usize>,
	by_name: FxHashMap<&'static str, usize>,
	all: Vec<&'static dyn EnumValue>,
}

impl EnumDefinition {
	/// Builds a definition from a realized container.
	///
	/// Rejects containers that violate the accessor contract (empty type
	/// name, no values, or values whose reported ordinal disagrees with
	/// their position) and containers carrying duplicate identifiers or
	/// names. Duplicates here mean the generated artifact is corrupt; the
	/// error is fatal, not recoverable.
	pub fn from_container(container: ContainerDef) -> Result<Self, RegisterError> {
		let type_name = container.type_name;
		if type_name.is_empty() {
			return Err(RegisterError::InvalidContainer {
				type_name: String::from("<unnamed>"),
				reason: String::from("empty logical-type name"),
			});
		}
		if container.values.is_empty() {
			return Err(RegisterError::InvalidContainer {
				type_name: type_name.to_owned(),
				reason: String::from("container has no values"),
			});
		}

		let len = container.values.len();
		let mut by_id: FxHashMap<i32, usize> =
			FxHashMap::with_capacity_and_hasher(len, Default::default());
		let mut by_name = FxHashMap::with_capacity_and_hasher(len, Default::default());
		let mut all: Vec<&'static dyn EnumValue> = Vec::with_capacity(len);

		for (pos, &value) in container.values.iter().enumerate() {
			if value.ordinal() != pos {
				return Err(RegisterError::InvalidContainer {
					type_name: type_name.to_owned(),
					reason: format!(
						"value '{}' reports ordinal {} at position {pos}",
						value.name(),
						value.ordinal()
					),
				});
			}
			if let Some(&existing) = by_id.get(&value.id()) {
				return Err(RegisterError::DuplicateId {
					type_name: type_name.to_owned(),
					id: value.id(),
					existing: all[existing].name(),
					incoming: value.name(),
				});
			}
			by_id.insert(value.id(), pos);
			if by_name.insert(value.name(), pos).is_some() {
				return Err(RegisterError::DuplicateName {
					type_name: type_name.to_owned(),
					name: value.name(),
				});
			}
			all.push(value);
		}

		Ok(Self {
			type_name,
			by_id,
			by_name,
			all,
		})
	}

	/// Logical-type name this definition was registered under.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Number of distinct values.
	pub fn len(&self) -> usize {
		self.all.len()
	}

	/// True if the definition holds no values. Unreachable for definitions
	/// built through [`EnumDefinition::from_container`].
	pub fn is_empty(&self) -> bool {
		self.all.is_empty()
	}

	/// Positional lookup; `None` outside `[0, len)`.
	pub fn by_ordinal_opt(&self, ordinal: usize) -> Option<&'static dyn EnumValue> {
		self.all.get(ordinal).copied()
	}

	/// Bounds-checked positional lookup.
	pub fn by_ordinal(&self, ordinal: usize) -> Result<&'static dyn EnumValue, LookupError> {
		self.by_ordinal_opt(ordinal)
			.ok_or(LookupError::OrdinalOutOfRange {
				type_name: self.type_name,
				ordinal,
				len: self.all.len(),
			})
	}

	/// Identifier lookup; `None` if absent.
	pub fn by_id_opt(&self, id: i32) -> Option<&'static dyn EnumValue> {
		self.by_id.get(&id).map(|&pos| self.all[pos])
	}

	/// Identifier lookup.
	pub fn by_id(&self, id: i32) -> Result<&'static dyn EnumValue, LookupError> {
		self.by_id_opt(id).ok_or(LookupError::IdNotFound {
			type_name: self.type_name,
			id,
		})
	}

	/// Name lookup, case-sensitive exact match; `None` if absent.
	pub fn by_name_opt(&self, name: &str) -> Option<&'static dyn EnumValue> {
		self.by_name.get(name).map(|&pos| self.all[pos])
	}

	/// Name lookup, case-sensitive exact match.
	pub fn by_name(&self, name: &str) -> Result<&'static dyn EnumValue, LookupError> {
		self.by_name_opt(name).ok_or_else(|| LookupError::NameNotFound {
			type_name: self.type_name,
			name: name.to_owned(),
		})
	}

	/// The full ordered value sequence. Read-only; safe to iterate from any
	/// number of threads.
	pub fn all(&self) -> &[&'static dyn EnumValue] {
		&self.all
	}
}

impl std::fmt::Debug for EnumDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnumDefinition")
			.field("type_name", &self.type_name)
			.field("len", &self.all.len())
			.finish()
	}
}
