//! Artifact templates.
//!
//! # Role
//!
//! Pure text rendering: each template takes a borrowed model and produces
//! one artifact body. Templates are a seam, not a plugin system; hosts that
//! need a different container or registrar shape implement [`TemplateSet`]
//! and override just the methods they care about. Everything here is
//! deterministic in its input so repeated runs produce identical bytes.

use enumforge_core::fragment::Fragment;
use thiserror::Error;

const GENERATED_HEADER: &str = "// @generated by enumforge-codegen. DO NOT EDIT.\n";

/// A template rejected its model.
#[derive(Debug, Clone, Error)]
#[error("template '{template}' rejected its input: {reason}")]
pub struct RenderError {
	pub template: &'static str,
	pub reason: String,
}

impl RenderError {
	fn new(template: &'static str, reason: impl Into<String>) -> Self {
		Self {
			template,
			reason: reason.into(),
		}
	}
}

/// Input for one typed-container artifact.
#[derive(Debug, Clone, Copy)]
pub struct ContainerModel<'a> {
	pub type_name: &'a str,
	/// Identifier-ordered; variant ordinals follow slice position.
	pub fragments: &'a [Fragment],
}

/// Input for one wire-schema artifact.
#[derive(Debug, Clone, Copy)]
pub struct SchemaModel<'a> {
	pub package: &'a str,
	pub type_name: &'a str,
	pub fragments: &'a [Fragment],
}

/// Input for the single registration unit of a run.
#[derive(Debug, Clone)]
pub struct RegistrarModel<'a> {
	/// Module path the containers live under, `::`-separated.
	pub container_module: &'a str,
	/// `(module_stem, type_name)` per generated container, in type order.
	pub containers: &'a [(String, String)],
}

/// Input for the container module index.
#[derive(Debug, Clone)]
pub struct ModuleIndexModel<'a> {
	/// Module stems in type order.
	pub stems: &'a [String],
	/// Whether the registration unit shares this module.
	pub include_registrar: bool,
}

/// Input for the provider-discovery manifest.
#[derive(Debug, Clone)]
pub struct ManifestModel<'a> {
	/// Fully-qualified provider references, one per registration unit.
	pub providers: &'a [String],
}

/// The five artifact templates of a generation run.
///
/// Every method has a default body rendering the stock artifact shape, so
/// an implementor overrides only what differs for its host.
pub trait TemplateSet {
	/// Typed container: one Rust enum per logical type.
	fn container(&self, model: &ContainerModel<'_>) -> Result<String, RenderError> {
		default_container(model)
	}

	/// Wire schema: one schema file per logical type.
	fn schema(&self, model: &SchemaModel<'_>) -> Result<String, RenderError> {
		default_schema(model)
	}

	/// Registration unit: registers every container of the run.
	fn registrar(&self, model: &RegistrarModel<'_>) -> Result<String, RenderError> {
		default_registrar(model)
	}

	/// Module index declaring every generated container module.
	fn module_index(&self, model: &ModuleIndexModel<'_>) -> Result<String, RenderError> {
		default_module_index(model)
	}

	/// Provider-discovery manifest listing registration units.
	fn manifest(&self, model: &ManifestModel<'_>) -> Result<String, RenderError> {
		default_manifest(model)
	}
}

/// The stock templates, unmodified.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTemplates;

impl TemplateSet for DefaultTemplates {}

/// Descriptions flow into single-line comments; embedded line breaks would
/// break out of them.
fn one_line(text: &str) -> String {
	text.split(['\n', '\r'])
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

fn default_container(model: &ContainerModel<'_>) -> Result<String, RenderError> {
	if model.fragments.is_empty() {
		return Err(RenderError::new("container", "no values to render"));
	}

	let type_name = model.type_name;
	let mut out = String::from(GENERATED_HEADER);
	out.push('\n');
	out.push_str("use enumforge_core::{EnumContainer, EnumValue};\n\n");

	out.push_str(&format!(
		"/// {type_name} values aggregated from scattered declarations.\n"
	));
	out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
	out.push_str(&format!("pub enum {type_name} {{\n"));
	for fragment in model.fragments {
		let desc = one_line(fragment.description());
		if !desc.is_empty() {
			out.push_str(&format!("\t/// {desc}\n"));
		}
		out.push_str(&format!("\t{},\n", fragment.name()));
	}
	out.push_str("}\n\n");

	out.push_str(&format!("impl EnumValue for {type_name} {{\n"));
	out.push_str("\tfn ordinal(&self) -> usize {\n\t\t*self as usize\n\t}\n\n");
	out.push_str("\tfn id(&self) -> i32 {\n\t\tmatch self {\n");
	for fragment in model.fragments {
		out.push_str(&format!("\t\t\tSelf::{} => {},\n", fragment.name(), fragment.id()));
	}
	out.push_str("\t\t}\n\t}\n\n");
	out.push_str("\tfn name(&self) -> &'static str {\n\t\tmatch self {\n");
	for fragment in model.fragments {
		out.push_str(&format!(
			"\t\t\tSelf::{name} => \"{name}\",\n",
			name = fragment.name()
		));
	}
	out.push_str("\t\t}\n\t}\n}\n\n");

	out.push_str(&format!("impl EnumContainer for {type_name} {{\n"));
	out.push_str(&format!(
		"\tconst TYPE_NAME: &'static str = \"{type_name}\";\n\n"
	));
	out.push_str("\tfn values() -> &'static [&'static dyn EnumValue] {\n");
	out.push_str(&format!(
		"\t\tstatic VALUES: [&'static dyn EnumValue; {}] = [\n",
		model.fragments.len()
	));
	for fragment in model.fragments {
		out.push_str(&format!("\t\t\t&{type_name}::{},\n", fragment.name()));
	}
	out.push_str("\t\t];\n\t\t&VALUES\n\t}\n}\n");

	Ok(out)
}

fn default_schema(model: &SchemaModel<'_>) -> Result<String, RenderError> {
	if model.fragments.is_empty() {
		return Err(RenderError::new("schema", "no values to render"));
	}

	let mut out = String::from(GENERATED_HEADER);
	out.push_str(&format!("package {};\n\n", model.package));
	out.push_str(&format!("enum {} {{\n", model.type_name));
	for fragment in model.fragments {
		let desc = one_line(fragment.description());
		if desc.is_empty() {
			out.push_str(&format!("  {} = {};\n", fragment.name(), fragment.id()));
		} else {
			out.push_str(&format!(
				"  {} = {}; // {desc}\n",
				fragment.name(),
				fragment.id()
			));
		}
	}
	out.push_str("}\n");
	Ok(out)
}

fn default_registrar(model: &RegistrarModel<'_>) -> Result<String, RenderError> {
	if model.containers.is_empty() {
		return Err(RenderError::new("registrar", "no containers to register"));
	}

	let mut out = String::from(GENERATED_HEADER);
	out.push('\n');
	out.push_str(
		"use enumforge_core::{\n\
		 \tEnumContainer, EnumRegistrar, RegisterError, RegistrarReg, RegistrationContext,\n\
		 };\n\n",
	);
	for (stem, type_name) in model.containers {
		out.push_str(&format!(
			"use crate::{}::{stem}::{type_name};\n",
			model.container_module
		));
	}
	out.push('\n');

	out.push_str("/// Registers every container produced in this generation run.\n");
	out.push_str("pub struct Registrar;\n\n");
	out.push_str("impl EnumRegistrar for Registrar {\n");
	out.push_str(
		"\tfn do_register(&self, ctx: &dyn RegistrationContext) -> Result<(), RegisterError> {\n",
	);
	for (_, type_name) in model.containers {
		out.push_str(&format!("\t\tctx.register({type_name}::container())?;\n"));
	}
	out.push_str("\t\tOk(())\n\t}\n}\n\n");

	out.push_str("enumforge_core::inventory::submit! {\n\tRegistrarReg(&Registrar)\n}\n");
	Ok(out)
}

fn default_module_index(model: &ModuleIndexModel<'_>) -> Result<String, RenderError> {
	let mut out = String::from(GENERATED_HEADER);
	out.push('\n');
	for stem in model.stems {
		out.push_str(&format!("pub mod {stem};\n"));
	}
	if model.include_registrar {
		out.push_str("pub mod registrar;\n");
	}
	Ok(out)
}

fn default_manifest(model: &ManifestModel<'_>) -> Result<String, RenderError> {
	if model.providers.is_empty() {
		return Err(RenderError::new("manifest", "no providers to list"));
	}

	let mut out = String::new();
	for provider in model.providers {
		out.push_str(provider);
		out.push('\n');
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn fragments() -> Vec<Fragment> {
		vec![
			Fragment::new("ConditionType", 1, "One", "first condition"),
			Fragment::new("ConditionType", 2, "Two", "second\ncondition"),
		]
	}

	#[test]
	fn container_lists_variants_in_order() {
		let frags = fragments();
		let out = DefaultTemplates
			.container(&ContainerModel {
				type_name: "ConditionType",
				fragments: &frags,
			})
			.unwrap();

		assert!(out.starts_with("// @generated"));
		assert!(out.contains("pub enum ConditionType {"));
		assert!(out.contains("\t/// first condition\n\tOne,\n"));
		// Multi-line descriptions collapse to one doc line.
		assert!(out.contains("\t/// second condition\n\tTwo,\n"));
		assert!(out.contains("Self::One => 1,"));
		assert!(out.contains("Self::Two => \"Two\","));
		assert!(out.contains("const TYPE_NAME: &'static str = \"ConditionType\";"));
		assert!(out.contains("static VALUES: [&'static dyn EnumValue; 2]"));
	}

	#[test]
	fn schema_carries_package_and_triples() {
		let frags = fragments();
		let out = DefaultTemplates
			.schema(&SchemaModel {
				package: "enumforge.generated",
				type_name: "ConditionType",
				fragments: &frags,
			})
			.unwrap();

		let expected = "// @generated by enumforge-codegen. DO NOT EDIT.\n\
			package enumforge.generated;\n\
			\n\
			enum ConditionType {\n\
			\x20 One = 1; // first condition\n\
			\x20 Two = 2; // second condition\n\
			}\n";
		assert_eq!(out, expected);
	}

	#[test]
	fn registrar_registers_each_container_once() {
		let containers = vec![
			(String::from("condition_type"), String::from("ConditionType")),
			(String::from("target_type"), String::from("TargetType")),
		];
		let out = DefaultTemplates
			.registrar(&RegistrarModel {
				container_module: "generated",
				containers: &containers,
			})
			.unwrap();

		assert!(out.contains("use crate::generated::condition_type::ConditionType;"));
		assert_eq!(out.matches("ctx.register(ConditionType::container())?;").count(), 1);
		assert_eq!(out.matches("ctx.register(TargetType::container())?;").count(), 1);
		assert!(out.contains("enumforge_core::inventory::submit!"));
	}

	#[test]
	fn module_index_declares_registrar_only_when_colocated() {
		let stems = vec![String::from("condition_type")];
		let with = DefaultTemplates
			.module_index(&ModuleIndexModel {
				stems: &stems,
				include_registrar: true,
			})
			.unwrap();
		assert!(with.contains("pub mod condition_type;\n"));
		assert!(with.contains("pub mod registrar;\n"));

		let without = DefaultTemplates
			.module_index(&ModuleIndexModel {
				stems: &stems,
				include_registrar: false,
			})
			.unwrap();
		assert!(!without.contains("registrar"));
	}

	#[test]
	fn empty_models_are_rejected() {
		assert!(DefaultTemplates
			.container(&ContainerModel {
				type_name: "T",
				fragments: &[],
			})
			.is_err());
		assert!(DefaultTemplates
			.manifest(&ManifestModel { providers: &[] })
			.is_err());
	}
}
