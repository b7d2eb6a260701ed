//! Declaration front-end: KDL files to fragments.
//!
//! Declarations are flat `enum-value` nodes; one file may declare values
//! for any number of logical types, and one type may be spread over many
//! files:
//!
//! ```kdl
//! enum-value type="ConditionType" id=1 name="One" desc="first condition"
//! enum-value type="ConditionType" id=2 name="Two" desc="second condition"
//! enum-value type="TargetType" id=1 name="Hostile" desc="hostile target"
//! ```
//!
//! Parsing only shapes fragments; collision and grammar validation is the
//! aggregator's job, so a file that parses here can still be rejected
//! there.

use std::path::{Path, PathBuf};

use enumforge_core::fragment::{Fragment, Origin};
use kdl::KdlDocument;
use thiserror::Error;

/// Errors raised while reading declaration inputs.
#[derive(Debug, Error)]
pub enum DeclError {
	#[error("malformed declaration document '{origin}'")]
	Kdl {
		origin: String,
		#[source]
		source: kdl::KdlError,
	},

	#[error("failed to read declaration file '{path}'")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to walk declaration directory")]
	Walk(#[from] walkdir::Error),

	/// Declaration documents hold only `enum-value` nodes.
	#[error("unknown declaration node '{node}' at {origin}")]
	UnknownNode { node: String, origin: Origin },

	/// A required attribute is missing or has the wrong shape.
	#[error("missing or malformed attribute '{attr}' at {origin}")]
	BadAttr { attr: &'static str, origin: Origin },
}

fn require_str(
	node: &kdl::KdlNode,
	attr: &'static str,
	origin: &Origin,
) -> Result<String, DeclError> {
	node.get(attr)
		.and_then(|value| value.as_string())
		.map(str::to_owned)
		.ok_or_else(|| DeclError::BadAttr {
			attr,
			origin: origin.clone(),
		})
}

fn require_id(node: &kdl::KdlNode, origin: &Origin) -> Result<i32, DeclError> {
	node.get("id")
		.and_then(|value| value.as_integer())
		.and_then(|raw| i32::try_from(raw).ok())
		.ok_or_else(|| DeclError::BadAttr {
			attr: "id",
			origin: origin.clone(),
		})
}

/// Parses one declaration document. `origin_label` names the source in
/// fragment origins and diagnostics, typically a file path.
pub fn parse_decl_str(input: &str, origin_label: &str) -> Result<Vec<Fragment>, DeclError> {
	let doc: KdlDocument = input.parse().map_err(|source| DeclError::Kdl {
		origin: origin_label.to_owned(),
		source,
	})?;

	let mut fragments = Vec::with_capacity(doc.nodes().len());
	for (idx, node) in doc.nodes().iter().enumerate() {
		let origin = Origin::decl(format!("{origin_label}:{idx}"));
		if node.name().value() != "enum-value" {
			return Err(DeclError::UnknownNode {
				node: node.name().value().to_owned(),
				origin,
			});
		}

		let logical_type = require_str(node, "type", &origin)?;
		let name = require_str(node, "name", &origin)?;
		let desc = require_str(node, "desc", &origin)?;
		let id = require_id(node, &origin)?;

		fragments.push(Fragment::new(logical_type, id, name, desc).with_origin(origin));
	}
	Ok(fragments)
}

/// Loads every `.kdl` file under `dir` (recursively), in path order so
/// origin indices are stable across runs.
pub fn load_decl_dir(dir: &Path) -> Result<Vec<Fragment>, DeclError> {
	let mut paths = Vec::new();
	for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
		let entry = entry?;
		if entry.file_type().is_file()
			&& entry.path().extension().is_some_and(|ext| ext == "kdl")
		{
			paths.push(entry.into_path());
		}
	}

	let mut fragments = Vec::new();
	for path in paths {
		let input = std::fs::read_to_string(&path).map_err(|source| DeclError::Io {
			path: path.clone(),
			source,
		})?;
		let parsed = parse_decl_str(&input, &path.display().to_string())?;
		tracing::debug!(path = %path.display(), fragments = parsed.len(), "loaded declaration file");
		fragments.extend(parsed);
	}
	Ok(fragments)
}
