//! Provider-discovery initialization, exercised through the inventory the
//! same way a generated registration unit would be.

use enumforge_core::{
	EnumContainer, EnumRegistrar, EnumValue, RegisterError, RegistrarReg, RegistrationContext,
};
use enumforge_runtime::EnumRegistry;

#[derive(Debug, Clone, Copy)]
enum Phase {
	Solid,
	Liquid,
}

impl EnumValue for Phase {
	fn ordinal(&self) -> usize {
		*self as usize
	}

	fn id(&self) -> i32 {
		match self {
			Self::Solid => 1,
			Self::Liquid => 2,
		}
	}

	fn name(&self) -> &'static str {
		match self {
			Self::Solid => "Solid",
			Self::Liquid => "Liquid",
		}
	}
}

impl EnumContainer for Phase {
	const TYPE_NAME: &'static str = "PhaseType";

	fn values() -> &'static [&'static dyn EnumValue] {
		static VALUES: [&'static dyn EnumValue; 2] = [&Phase::Solid, &Phase::Liquid];
		&VALUES
	}
}

/// Shaped exactly like a generated registration unit.
struct Registrar;

impl EnumRegistrar for Registrar {
	fn do_register(&self, ctx: &dyn RegistrationContext) -> Result<(), RegisterError> {
		ctx.register(Phase::container())?;
		Ok(())
	}
}

inventory::submit! {
	RegistrarReg(&Registrar)
}

#[test]
fn initialize_drives_discovered_registrars() {
	let registry = EnumRegistry::new();

	let driven = registry.initialize().expect("first initialization succeeds");
	assert_eq!(driven, 1, "one registrar submitted in this binary");

	assert_eq!(registry.get_by_name("PhaseType", "Liquid").unwrap().id(), 2);
	assert_eq!(registry.get_by_ordinal("PhaseType", 0).unwrap().name(), "Solid");

	// Repeated initialization re-runs every unit and surfaces
	// AlreadyRegistered, the caller's signal that it already completed.
	let err = registry.initialize().unwrap_err();
	assert!(matches!(err, RegisterError::AlreadyRegistered { .. }));

	// The original definition survives the failed second pass.
	assert_eq!(registry.get_all("PhaseType").len(), 2);
}
