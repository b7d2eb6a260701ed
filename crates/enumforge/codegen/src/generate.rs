//! Multi-artifact generation.
//!
//! # Role
//!
//! Turns validated [`DefinitionSets`] into the run's artifact family:
//! one typed container and one wire-schema file per logical type, a
//! single registration unit, the container module index, and the
//! provider-discovery manifest. Types are processed in name order and
//! values in identifier order, so output is byte-identical across runs.
//!
//! Per-type failures are collected, not fatal: a type whose container
//! could not be written is dropped from the registration unit so the run
//! never registers a container that does not exist on disk. Failures on
//! the run-wide artifacts abort the run.

use std::path::PathBuf;

use enumforge_core::contract::REGISTRAR_CONTRACT;
use heck::ToSnakeCase;
use thiserror::Error;

use crate::aggregate::DefinitionSets;
use crate::config::GeneratorConfig;
use crate::render::{
	ContainerModel, DefaultTemplates, ManifestModel, ModuleIndexModel, RegistrarModel, RenderError,
	SchemaModel, TemplateSet,
};
use crate::sink::ArtifactSink;

/// Failure while producing one artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
	#[error("rendering {artifact} for '{type_name}' failed")]
	Render {
		artifact: &'static str,
		type_name: String,
		#[source]
		source: RenderError,
	},

	#[error("writing artifact '{path}' failed")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Outcome of one generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
	/// Run-relative paths of every artifact written, in emission order.
	pub written: Vec<PathBuf>,
	/// Provider references listed in the discovery manifest.
	pub providers: Vec<String>,
	/// Per-type failures; the affected types are absent from the
	/// registration unit and manifest.
	pub errors: Vec<GenerateError>,
	/// True when the run had already generated and this call did nothing.
	pub skipped: bool,
}

/// Renders definition sets through a [`TemplateSet`] into an
/// [`ArtifactSink`].
pub struct Generator<'a> {
	config: &'a GeneratorConfig,
	templates: &'a dyn TemplateSet,
}

impl<'a> Generator<'a> {
	/// Generator with the stock templates.
	pub fn new(config: &'a GeneratorConfig) -> Self {
		Self {
			config,
			templates: &DefaultTemplates,
		}
	}

	/// Generator with host-supplied templates.
	pub fn with_templates(config: &'a GeneratorConfig, templates: &'a dyn TemplateSet) -> Self {
		Self { config, templates }
	}

	/// Emits the full artifact family for `sets`.
	///
	/// Container and schema failures are collected per type; registrar,
	/// module-index and manifest failures are fatal. An empty set produces
	/// no artifacts at all.
	pub fn generate(
		&self,
		sets: &DefinitionSets,
		sink: &mut dyn ArtifactSink,
	) -> Result<GenerateReport, GenerateError> {
		let mut report = GenerateReport::default();
		if sets.is_empty() {
			tracing::debug!("no definitions aggregated, nothing to generate");
			return Ok(report);
		}

		let container_dir = self.config.container_dir();
		let schema_dir = self.config.schema_dir();

		// (module_stem, type_name) per type that made it through both
		// per-type artifacts.
		let mut registered: Vec<(String, String)> = Vec::with_capacity(sets.len());

		for (type_name, fragments) in sets.iter() {
			let stem = type_name.to_snake_case();

			let container = self
				.templates
				.container(&ContainerModel {
					type_name,
					fragments,
				})
				.map_err(|source| GenerateError::Render {
					artifact: "container",
					type_name: type_name.to_owned(),
					source,
				});
			let schema = self
				.templates
				.schema(&SchemaModel {
					package: self.config.schema_package(),
					type_name,
					fragments,
				})
				.map_err(|source| GenerateError::Render {
					artifact: "schema",
					type_name: type_name.to_owned(),
					source,
				});

			let (container, schema) = match (container, schema) {
				(Ok(c), Ok(s)) => (c, s),
				(Err(err), _) | (_, Err(err)) => {
					tracing::warn!(type_name, error = %err, "skipping type");
					report.errors.push(err);
					continue;
				}
			};

			let container_path = container_dir.join(format!("{stem}.rs"));
			let schema_path = schema_dir.join(format!("{stem}.schema"));
			match self.write(sink, container_path, &container, &mut report) {
				Ok(()) => {}
				Err(err) => {
					tracing::warn!(type_name, error = %err, "skipping type");
					report.errors.push(err);
					continue;
				}
			}
			// A schema failure also drops the type: the artifact family is
			// emitted as a consistent unit or not at all.
			match self.write(sink, schema_path, &schema, &mut report) {
				Ok(()) => {}
				Err(err) => {
					tracing::warn!(type_name, error = %err, "skipping type");
					report.errors.push(err);
					continue;
				}
			}

			registered.push((stem, type_name.to_owned()));
		}

		if registered.is_empty() {
			tracing::warn!("every type failed generation, no registration unit emitted");
			return Ok(report);
		}

		let registrar = self
			.templates
			.registrar(&RegistrarModel {
				container_module: self.config.container_module(),
				containers: &registered,
			})
			.map_err(|source| GenerateError::Render {
				artifact: "registrar",
				type_name: String::new(),
				source,
			})?;
		self.write(
			sink,
			self.config.registrar_dir().join("registrar.rs"),
			&registrar,
			&mut report,
		)?;

		let stems: Vec<String> = registered.iter().map(|(stem, _)| stem.clone()).collect();
		let index = self
			.templates
			.module_index(&ModuleIndexModel {
				stems: &stems,
				include_registrar: self.config.registrar_in_container_module(),
			})
			.map_err(|source| GenerateError::Render {
				artifact: "module index",
				type_name: String::new(),
				source,
			})?;
		self.write(sink, container_dir.join("mod.rs"), &index, &mut report)?;

		// A relocated registration unit must stay reachable through emitted
		// artifacts, so its directory gets its own index.
		if !self.config.registrar_in_container_module() {
			let registrar_index = self
				.templates
				.module_index(&ModuleIndexModel {
					stems: &[],
					include_registrar: true,
				})
				.map_err(|source| GenerateError::Render {
					artifact: "registrar module index",
					type_name: String::new(),
					source,
				})?;
			self.write(
				sink,
				self.config.registrar_dir().join("mod.rs"),
				&registrar_index,
				&mut report,
			)?;
		}

		report.providers = vec![format!("{}::Registrar", self.config.registrar_module())];
		let manifest = self
			.templates
			.manifest(&ManifestModel {
				providers: &report.providers,
			})
			.map_err(|source| GenerateError::Render {
				artifact: "manifest",
				type_name: String::new(),
				source,
			})?;
		self.write(
			sink,
			PathBuf::from("META-INF/services").join(REGISTRAR_CONTRACT),
			&manifest,
			&mut report,
		)?;

		tracing::info!(
			types = registered.len(),
			artifacts = report.written.len(),
			"generation complete"
		);
		Ok(report)
	}

	fn write(
		&self,
		sink: &mut dyn ArtifactSink,
		path: PathBuf,
		contents: &str,
		report: &mut GenerateReport,
	) -> Result<(), GenerateError> {
		sink.write(&path, contents)
			.map_err(|source| GenerateError::Write {
				path: path.clone(),
				source,
			})?;
		tracing::debug!(path = %path.display(), bytes = contents.len(), "artifact written");
		report.written.push(path);
		Ok(())
	}
}
