//! Process-wide registry of aggregated enumerated types.
//!
//! # Role
//!
//! The single point external code queries at runtime. Registration units
//! write each logical type exactly once; arbitrarily many callers read
//! concurrently during and after those writes.
//!
//! # Invariants
//!
//! - Registration is monotonic and write-once per logical-type name; a key
//!   can never be re-registered, even with identical content.
//! - A definition is fully built before it becomes visible to any reader
//!   (publish-after-construct), and is immutable afterwards.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use enumforge_core::{
	ContainerDef, EnumContainer, EnumValue, RegisterError, RegistrarReg, RegistrationContext,
};
use rustc_hash::FxHashMap;

use crate::definition::EnumDefinition;
use crate::error::LookupError;

type DefMap = FxHashMap<Box<str>, Arc<EnumDefinition>>;

/// Concurrent map from logical-type name to [`EnumDefinition`].
///
/// Insertion uses a compare-and-swap loop over an [`ArcSwap`] snapshot so
/// independent registration units may race safely without a lock; losing a
/// race only retries against the updated snapshot.
pub struct EnumRegistry {
	map: ArcSwap<DefMap>,
}

impl EnumRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			map: ArcSwap::from_pointee(DefMap::default()),
		}
	}

	/// Drives provider discovery: every registration unit submitted to the
	/// inventory is invoked against this registry, in submission order
	/// (which carries no semantic meaning).
	///
	/// Returns the number of units driven, or the first registration
	/// error. The registry does not track whether initialization already
	/// ran; a repeated call re-invokes every unit and surfaces
	/// [`RegisterError::AlreadyRegistered`], which callers should read as
	/// "initialization already completed".
	pub fn initialize(&self) -> Result<usize, RegisterError> {
		let mut driven = 0;
		for reg in inventory::iter::<RegistrarReg> {
			reg.0.do_register(self)?;
			driven += 1;
		}
		tracing::info!(registrars = driven, "enum registry initialized");
		Ok(driven)
	}

	/// Registers a container type directly, without going through a
	/// registration unit.
	pub fn register_container<T: EnumContainer>(&self) -> Result<(), RegisterError> {
		self.register(T::container())
	}

	/// Returns the definition for a logical type, if registered.
	pub fn find_definition(&self, type_name: &str) -> Option<Arc<EnumDefinition>> {
		self.map.load().get(type_name).cloned()
	}

	fn definition(&self, type_name: &str) -> Result<Arc<EnumDefinition>, LookupError> {
		self.find_definition(type_name)
			.ok_or_else(|| LookupError::UnregisteredType {
				type_name: type_name.to_owned(),
			})
	}

	/// Bounds-checked positional lookup.
	pub fn get_by_ordinal(
		&self,
		type_name: &str,
		ordinal: usize,
	) -> Result<&'static dyn EnumValue, LookupError> {
		self.definition(type_name)?.by_ordinal(ordinal)
	}

	/// Positional lookup; `None` for unregistered types or out-of-range
	/// ordinals.
	pub fn get_by_ordinal_opt(&self, type_name: &str, ordinal: usize) -> Option<&'static dyn EnumValue> {
		self.find_definition(type_name)?.by_ordinal_opt(ordinal)
	}

	/// Identifier lookup.
	pub fn get_by_id(&self, type_name: &str, id: i32) -> Result<&'static dyn EnumValue, LookupError> {
		self.definition(type_name)?.by_id(id)
	}

	/// Identifier lookup; `None` for unregistered types or absent ids.
	pub fn get_by_id_opt(&self, type_name: &str, id: i32) -> Option<&'static dyn EnumValue> {
		self.find_definition(type_name)?.by_id_opt(id)
	}

	/// Name lookup, case-sensitive exact match.
	pub fn get_by_name(
		&self,
		type_name: &str,
		name: &str,
	) -> Result<&'static dyn EnumValue, LookupError> {
		self.definition(type_name)?.by_name(name)
	}

	/// Name lookup; `None` for unregistered types or absent names.
	pub fn get_by_name_opt(&self, type_name: &str, name: &str) -> Option<&'static dyn EnumValue> {
		self.find_definition(type_name)?.by_name_opt(name)
	}

	/// All values of a logical type in declaration order; empty for
	/// unregistered types.
	pub fn get_all(&self, type_name: &str) -> Vec<&'static dyn EnumValue> {
		self.find_definition(type_name)
			.map(|def| def.all().to_vec())
			.unwrap_or_default()
	}

	/// Number of registered logical types.
	pub fn len(&self) -> usize {
		self.map.load().len()
	}

	/// True if no logical type has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.map.load().is_empty()
	}
}

impl RegistrationContext for EnumRegistry {
	fn register(&self, container: ContainerDef) -> Result<(), RegisterError> {
		// Build fully before publishing; readers must never observe a
		// partially indexed definition.
		let def = Arc::new(EnumDefinition::from_container(container)?);
		let key: Box<str> = Box::from(container.type_name);

		loop {
			let old = self.map.load_full();
			if old.contains_key(&key) {
				return Err(RegisterError::AlreadyRegistered {
					type_name: container.type_name.to_owned(),
				});
			}

			let mut next = (*old).clone();
			next.insert(key.clone(), def.clone());

			let prev = self.map.compare_and_swap(&old, Arc::new(next));
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(
					type_name = container.type_name,
					values = def.len(),
					"registered enum type"
				);
				return Ok(());
			}
			// CAS failed, retry against the updated snapshot.
		}
	}
}

impl Default for EnumRegistry {
	fn default() -> Self {
		Self::new()
	}
}

static REGISTRY: LazyLock<EnumRegistry> = LazyLock::new(EnumRegistry::new);

/// Returns the process-wide registry instance.
pub fn registry() -> &'static EnumRegistry {
	&REGISTRY
}
