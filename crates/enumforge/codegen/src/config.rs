//! Generator configuration surface.
//!
//! All options have defaults; invalid module/package strings are rejected
//! at configuration time so the generator never has to re-validate paths
//! mid-run.

use std::path::PathBuf;

use enumforge_core::ident::check_ident;
use thiserror::Error;

/// Errors rejected at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// A `::`-separated Rust module path contained a non-identifier
	/// segment.
	#[error("invalid module path '{0}': segments must be bare identifiers")]
	InvalidModulePath(String),

	/// A `.`-separated schema package contained a non-identifier segment.
	#[error("invalid schema package '{0}': segments must be bare identifiers")]
	InvalidPackage(String),
}

/// Where generated artifacts land.
///
/// - `container_module`: `::`-separated module path for typed containers
///   and the module index, e.g. `generated` or `game::enums`.
/// - `schema_package`: `.`-separated package for wire-schema files, e.g.
///   `enumforge.generated`.
/// - `registrar_module`: module path for the registration unit; by default
///   the same module as the containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
	container_module: String,
	schema_package: String,
	registrar_module: String,
}

impl GeneratorConfig {
	/// Creates a configuration, validating every path segment.
	pub fn new(
		container_module: impl Into<String>,
		schema_package: impl Into<String>,
		registrar_module: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let container_module = container_module.into();
		let schema_package = schema_package.into();
		let registrar_module = registrar_module.into();

		validate_segments(&container_module, "::")
			.map_err(|_| ConfigError::InvalidModulePath(container_module.clone()))?;
		validate_segments(&registrar_module, "::")
			.map_err(|_| ConfigError::InvalidModulePath(registrar_module.clone()))?;
		validate_segments(&schema_package, ".")
			.map_err(|_| ConfigError::InvalidPackage(schema_package.clone()))?;

		Ok(Self {
			container_module,
			schema_package,
			registrar_module,
		})
	}

	/// Module path typed containers are generated under.
	pub fn container_module(&self) -> &str {
		&self.container_module
	}

	/// Package wire-schema files are generated under.
	pub fn schema_package(&self) -> &str {
		&self.schema_package
	}

	/// Module path the registration unit is generated under.
	///
	/// When this differs from the container module, generation emits a
	/// separate module index beside the registration unit.
	pub fn registrar_module(&self) -> &str {
		&self.registrar_module
	}

	pub(crate) fn container_dir(&self) -> PathBuf {
		self.container_module.split("::").collect()
	}

	pub(crate) fn schema_dir(&self) -> PathBuf {
		self.schema_package.split('.').collect()
	}

	pub(crate) fn registrar_dir(&self) -> PathBuf {
		self.registrar_module.split("::").collect()
	}

	/// True when the registration unit shares the container module, in
	/// which case the module index declares it too.
	pub(crate) fn registrar_in_container_module(&self) -> bool {
		self.registrar_module == self.container_module
	}
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			container_module: String::from("generated"),
			schema_package: String::from("enumforge.generated"),
			registrar_module: String::from("generated"),
		}
	}
}

fn validate_segments(path: &str, sep: &str) -> Result<(), ()> {
	let mut segments = path.split(sep);
	if path.is_empty() {
		return Err(());
	}
	if segments.any(|segment| check_ident(segment).is_err()) {
		return Err(());
	}
	Ok(())
}
