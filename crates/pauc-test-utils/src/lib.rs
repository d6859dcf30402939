//! Various helper functions for testing
//! 
//! functions in this module should use results and not use any panics to avoid confusion in callers

use std::io::Write;
use std::path::Path;
use serde::{Serialize, Deserialize};

use pauc::eligibility::{PatchContextData, ProjectEntry};
use pauc::family::{MemoryFamilies, PatchFamily};
use pauc::pdb::IndexEntry;
use pauc::{MemoryIndex, PatchContext};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
}

/// Everything the external managers would normally have loaded before a command runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
	#[serde(default)]
	pub all_inclusive_patch: bool,
	#[serde(default)]
	pub projects: Vec<ProjectEntry>,
	#[serde(default)]
	pub resources: Vec<IndexEntry>,
	#[serde(default)]
	pub families: Vec<PatchFamily>,
}

impl Fixture {
	pub fn index(&self) -> MemoryIndex {
		MemoryIndex::from(self.resources.clone())
	}

	pub fn families(&self) -> MemoryFamilies {
		MemoryFamilies::new(self.families.iter().cloned())
	}

	pub fn context(&self) -> PatchContext {
		PatchContext::from(PatchContextData {
			all_inclusive_patch: self.all_inclusive_patch,
			projects: self.projects.clone(),
		})
	}
}

pub fn load_fixture(path: impl AsRef<Path>) -> Result<Fixture, FixtureError> {
	let data = std::fs::read_to_string(path)?;
	Ok(serde_json::from_str(&data)?)
}

/// Loads one of the fixtures shipped in this crate's `fixtures` directory.
pub fn get_fixture(name: &str) -> Result<Fixture, FixtureError> {
	load_fixture(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name))
}

/// Writes `fixture` to a temporary file which is deleted when the handle is dropped.
pub fn write_temp_fixture(fixture: &Fixture) -> Result<tempfile::NamedTempFile, FixtureError> {
	let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
	file.write_all(serde_json::to_string_pretty(fixture)?.as_bytes())?;
	file.flush()?;
	Ok(file)
}
