//! Build-time half of enumforge: fragment aggregation and deterministic
//! multi-artifact generation.
//!
//! Scattered declarative fragments (see `enumforge-core`) are fed through
//! the [`Aggregator`] across any number of discovery passes, validated for
//! identifier and name collisions, and merged into per-type
//! [`DefinitionSets`]. The [`Generator`] then renders the validated sets
//! into mutually consistent artifacts: a typed container per logical type,
//! a wire-schema file per logical type, one registration unit for the run,
//! and a provider-discovery manifest.
//!
//! The whole run is phase-separated: collect, then generate exactly once.
//! [`EnumForge`] ties both phases together behind that lifecycle.

pub mod aggregate;
pub mod config;
pub mod decl;
pub mod generate;
pub mod pipeline;
pub mod render;
pub mod sink;

pub use aggregate::{Advisory, Aggregator, ConflictError, DefinitionSets, PassReport};
pub use config::{ConfigError, GeneratorConfig};
pub use decl::{DeclError, load_decl_dir, parse_decl_str};
pub use generate::{GenerateError, GenerateReport, Generator};
pub use pipeline::EnumForge;
pub use render::{DefaultTemplates, RenderError, TemplateSet};
pub use sink::{ArtifactSink, FsSink, MemorySink};
