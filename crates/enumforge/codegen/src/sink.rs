//! Artifact output seam.
//!
//! The generator renders artifacts to relative paths and hands them to an
//! [`ArtifactSink`]; where they land (a source tree, a build output dir, a
//! test buffer) is the sink's business.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Receives rendered artifacts under run-relative paths.
pub trait ArtifactSink {
	/// Writes one artifact. `rel_path` is relative to the sink's root and
	/// always uses `/`-style components.
	fn write(&mut self, rel_path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes artifacts under a root directory, creating parents as needed.
#[derive(Debug)]
pub struct FsSink {
	root: PathBuf,
}

impl FsSink {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Root all artifacts are written under.
	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl ArtifactSink for FsSink {
	fn write(&mut self, rel_path: &Path, contents: &str) -> io::Result<()> {
		let path = self.root.join(rel_path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, contents)
	}
}

/// Collects artifacts in memory, keyed by relative path. Test fixture and
/// dry-run sink.
#[derive(Debug, Default)]
pub struct MemorySink {
	pub files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Contents of one artifact, if written.
	pub fn get(&self, rel_path: impl AsRef<Path>) -> Option<&str> {
		self.files.get(rel_path.as_ref()).map(String::as_str)
	}
}

impl ArtifactSink for MemorySink {
	fn write(&mut self, rel_path: &Path, contents: &str) -> io::Result<()> {
		self.files.insert(rel_path.to_path_buf(), contents.to_owned());
		Ok(())
	}
}
