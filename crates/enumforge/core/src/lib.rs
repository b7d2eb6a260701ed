//! Shared vocabulary for the enumforge pipeline.
//!
//! This crate holds the pieces both ends of the system agree on: the
//! [`Fragment`] model produced by declaration discovery, the identifier
//! grammar generated names must satisfy, and the contracts generated
//! artifacts implement so the runtime registry can consume them without
//! compile-time knowledge of any concrete type.
//!
//! The codegen side (`enumforge-codegen`) aggregates fragments and stamps
//! out containers; the runtime side (`enumforge-runtime`) indexes realized
//! containers behind the registration contract defined here.

pub mod contract;
pub mod fragment;
pub mod ident;

pub use contract::{
	ContainerDef, EnumContainer, EnumRegistrar, EnumValue, REGISTRAR_CONTRACT, RegisterError,
	RegistrarReg, RegistrationContext,
};
pub use fragment::{Fragment, Origin};
pub use ident::{IdentError, check_ident, is_valid_ident};

// Generated registration units invoke `inventory::submit!` through this
// re-export so consumer crates only need a dependency on enumforge-core.
pub use inventory;
