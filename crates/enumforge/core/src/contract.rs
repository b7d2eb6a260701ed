//! Contracts between generated artifacts and the runtime registry.
//!
//! # Role
//!
//! Generated containers implement [`EnumValue`] and [`EnumContainer`];
//! generated registration units implement [`EnumRegistrar`] and submit
//! themselves to the inventory so the registry can discover and invoke
//! them at process start without compile-time knowledge of their names.

use std::fmt;

use thiserror::Error;

/// Minimal accessor surface every aggregated enumerated value exposes.
///
/// Framework code interacts with values through this trait rather than any
/// concrete generated type, which keeps the runtime layer uniform across
/// all logical types.
pub trait EnumValue: Send + Sync {
	/// 0-based position in the container's declaration order.
	fn ordinal(&self) -> usize;

	/// Declared numeric identifier, unique within the container.
	fn id(&self) -> i32;

	/// Declared symbolic name, unique within the container.
	fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn EnumValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnumValue")
			.field("name", &self.name())
			.field("id", &self.id())
			.field("ordinal", &self.ordinal())
			.finish()
	}
}

/// Borrowed view of one realized container: its logical-type name and its
/// values in declaration (identifier) order.
///
/// This is what crosses the registration boundary; the registry never sees
/// a concrete generated type.
#[derive(Debug, Clone, Copy)]
pub struct ContainerDef {
	/// Logical-type name the container was aggregated under.
	pub type_name: &'static str,
	/// All values, ordered by declaration position.
	pub values: &'static [&'static dyn EnumValue],
}

/// Implemented by generated containers.
pub trait EnumContainer: EnumValue + Sized + 'static {
	/// Logical-type name this container was aggregated under.
	const TYPE_NAME: &'static str;

	/// All values in declaration order.
	fn values() -> &'static [&'static dyn EnumValue];

	/// Container handle for registration.
	fn container() -> ContainerDef {
		ContainerDef {
			type_name: Self::TYPE_NAME,
			values: Self::values(),
		}
	}
}

/// Errors surfaced by the registration contract.
#[derive(Debug, Clone, Error)]
pub enum RegisterError {
	/// The container violates the accessor contract.
	#[error("container for '{type_name}' is not well-formed: {reason}")]
	InvalidContainer { type_name: String, reason: String },

	/// The logical-type name is already registered. Registration is
	/// write-once per key; an identical re-registration fails the same way
	/// as a genuine conflict.
	#[error("enum type '{type_name}' is already registered")]
	AlreadyRegistered { type_name: String },

	/// Two values in one container report the same identifier.
	#[error(
		"enum type '{type_name}' has duplicate id {id} (values '{existing}' and '{incoming}')"
	)]
	DuplicateId {
		type_name: String,
		id: i32,
		existing: &'static str,
		incoming: &'static str,
	},

	/// Two values in one container report the same name.
	#[error("enum type '{type_name}' has duplicate name '{name}'")]
	DuplicateName {
		type_name: String,
		name: &'static str,
	},
}

/// The registration contract generated registration units call into.
pub trait RegistrationContext {
	/// Hands one realized container to the registry.
	fn register(&self, container: ContainerDef) -> Result<(), RegisterError>;
}

/// A generated registration unit.
///
/// One unit is emitted per generation run; its `do_register` issues one
/// registration call per logical type produced in that run.
pub trait EnumRegistrar: Send + Sync {
	/// Registers every container this unit covers against `ctx`.
	fn do_register(&self, ctx: &dyn RegistrationContext) -> Result<(), RegisterError>;
}

/// Inventory wrapper for registrar discovery.
pub struct RegistrarReg(pub &'static dyn EnumRegistrar);

inventory::collect!(RegistrarReg);

/// Fully-qualified name of the registration contract.
///
/// The discovery manifest is written at
/// `META-INF/services/<REGISTRAR_CONTRACT>` and lists one provider
/// reference per generated registration unit.
pub const REGISTRAR_CONTRACT: &str = "enumforge_core::contract::EnumRegistrar";
