//! Run lifecycle: collect passes, then generate exactly once.

use std::path::Path;

use enumforge_core::fragment::Fragment;

use crate::aggregate::{Advisory, Aggregator, PassReport};
use crate::config::GeneratorConfig;
use crate::decl::{DeclError, load_decl_dir};
use crate::generate::{GenerateError, GenerateReport, Generator};
use crate::render::TemplateSet;
use crate::sink::ArtifactSink;

/// One aggregation-and-generation run.
///
/// Fragments are ingested across any number of passes; the first call to
/// [`EnumForge::generate`] finalizes the definitions and emits the
/// artifact family. Afterwards the run is inert: further ingests and
/// generates are ignored and reported as skipped rather than raised,
/// since trailing empty passes are normal when a host drives discovery
/// in rounds. Single-threaded by contract, like the aggregator under it.
pub struct EnumForge {
	config: GeneratorConfig,
	aggregator: Aggregator,
}

impl EnumForge {
	/// Run with explicit generator configuration.
	pub fn new(config: GeneratorConfig) -> Self {
		Self {
			config,
			aggregator: Aggregator::new(),
		}
	}

	/// Run with default artifact locations.
	pub fn with_defaults() -> Self {
		Self::new(GeneratorConfig::default())
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Feeds one pass of fragments, recovering per fragment.
	///
	/// After generation the pass is ignored and the report says so.
	pub fn ingest<I: IntoIterator<Item = Fragment>>(&mut self, fragments: I) -> PassReport {
		if self.aggregator.is_finalized() {
			tracing::debug!("run already generated, ignoring pass");
			return PassReport {
				skipped: true,
				..PassReport::default()
			};
		}
		self.aggregator.record_all(fragments)
	}

	/// Loads every declaration file under `dir` and feeds it as one pass.
	pub fn ingest_dir(&mut self, dir: &Path) -> Result<PassReport, DeclError> {
		let fragments = load_decl_dir(dir)?;
		Ok(self.ingest(fragments))
	}

	/// Advisories gathered across all passes.
	pub fn advisories(&self) -> &[Advisory] {
		self.aggregator.advisories()
	}

	/// Finalizes the definitions and emits the artifact family.
	///
	/// The first call does the work; later calls return an empty skipped
	/// report without touching the sink.
	pub fn generate(
		&mut self,
		sink: &mut dyn ArtifactSink,
	) -> Result<GenerateReport, GenerateError> {
		let Ok(sets) = self.aggregator.finish() else {
			tracing::debug!("run already generated, ignoring generate call");
			return Ok(GenerateReport {
				skipped: true,
				..GenerateReport::default()
			});
		};
		Generator::new(&self.config).generate(&sets, sink)
	}

	/// Like [`EnumForge::generate`] with host-supplied templates.
	pub fn generate_with(
		&mut self,
		templates: &dyn TemplateSet,
		sink: &mut dyn ArtifactSink,
	) -> Result<GenerateReport, GenerateError> {
		let Ok(sets) = self.aggregator.finish() else {
			tracing::debug!("run already generated, ignoring generate call");
			return Ok(GenerateReport {
				skipped: true,
				..GenerateReport::default()
			});
		};
		Generator::with_templates(&self.config, templates).generate(&sets, sink)
	}
}
