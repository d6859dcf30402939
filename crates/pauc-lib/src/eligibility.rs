//! Deciding which SKUs may receive a patch in the current session.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

use crate::pdb::normalize_path;
use crate::resource::MsiResource;

/// Status of an authoring project for the current session, supplied by the project manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
	/// Explicitly part of this patch.
	Targeted,
	/// Updates to this project ship as a major upgrade instead of a patch.
	ServicedByMajorUpgrade,
	/// The project does not produce a shipping package.
	NonShipping,
}

/// Decides if a resource's owning package may be patched.
///
/// Implementations must be pure, the same resource must always get the same answer within a session.
pub trait EligibilityFilter {
	fn is_eligible(&self, resource: &MsiResource) -> bool;
}

/// A project path and its status, the persisted form of an entry in [`PatchContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
	pub path: PathBuf,
	pub status: ProjectStatus,
}

/// The persisted form of [`PatchContext`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchContextData {
	#[serde(default)]
	pub all_inclusive_patch: bool,
	#[serde(default)]
	pub projects: Vec<ProjectEntry>,
}

/// Read-only state of the patch session needed to decide eligibility.
///
/// Project paths are normalized on the way in, including when loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PatchContextData", into = "PatchContextData")]
pub struct PatchContext {
	all_inclusive_patch: bool,
	projects: HashMap<OsString, ProjectEntry>,
}

impl From<PatchContextData> for PatchContext {
	fn from(data: PatchContextData) -> Self {
		let mut ctx = PatchContext::new(data.all_inclusive_patch);
		for entry in data.projects {
			ctx.set_project_status(entry.path, entry.status);
		}
		ctx
	}
}

impl From<PatchContext> for PatchContextData {
	fn from(ctx: PatchContext) -> Self {
		let mut projects: Vec<_> = ctx.projects.into_values().collect();
		projects.sort_by(|a, b| a.path.cmp(&b.path));
		Self {
			all_inclusive_patch: ctx.all_inclusive_patch,
			projects,
		}
	}
}

impl PatchContext {
	pub fn new(all_inclusive_patch: bool) -> Self {
		Self {
			all_inclusive_patch,
			projects: Default::default(),
		}
	}

	pub fn all_inclusive_patch(&self) -> bool {
		self.all_inclusive_patch
	}

	pub fn set_project_status(&mut self, wixproj_path: impl Into<PathBuf>, status: ProjectStatus) {
		let path = wixproj_path.into();
		self.projects.insert(normalize_path(&path), ProjectEntry { path, status });
	}

	pub fn with_project_status(mut self, wixproj_path: impl Into<PathBuf>, status: ProjectStatus) -> Self {
		self.set_project_status(wixproj_path, status);
		self
	}

	pub fn project_status(&self, wixproj_path: &Path) -> Option<ProjectStatus> {
		self.projects.get(&normalize_path(wixproj_path)).map(|e| e.status)
	}

	/// A project is invalid for patching when it is serviced by major upgrades, doesn't ship,
	/// or isn't part of the patch while the patch is not all-inclusive.
	pub fn is_invalid_project(&self, wixproj_path: &Path) -> bool {
		match self.project_status(wixproj_path) {
			Some(ProjectStatus::ServicedByMajorUpgrade) | Some(ProjectStatus::NonShipping) => true,
			Some(ProjectStatus::Targeted) => false,
			None => !self.all_inclusive_patch,
		}
	}
}

impl EligibilityFilter for PatchContext {
	fn is_eligible(&self, resource: &MsiResource) -> bool {
		!self.is_invalid_project(resource.wixproj_path())
	}
}
