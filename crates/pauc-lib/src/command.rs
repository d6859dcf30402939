//! The add command, working out every resource a patch session's changes require.
//!
//! # Usage
//! 1. Create an [`AddCommand`] with the index, family source, and eligibility filter for the session.
//! 1. Add the patched files and components.
//! 1. [`AddCommand::run()`] to resolve the inputs and expand them through their patch families.
//!
//! A command runs once. Any input that doesn't resolve fails the whole run and no resources are returned.

use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use crate::config::PaucOptions;
use crate::eligibility::EligibilityFilter;
use crate::error::{Error, Result};
use crate::expander::expand_patch_families;
use crate::family::FamilySource;
use crate::pdb::ResourceIndex;
use crate::resolved_set::ResolvedSet;
use crate::resolver::Resolver;
use crate::resource::ComponentId;

/// Progress of a single [`AddCommand`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
	Start,
	ResolvingInputs,
	/// An input did not resolve. Terminal.
	Failed,
	Resolved,
	Expanding,
	/// Terminal.
	Done,
}

/// The kind of authoring project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectKind {
	Package,
	MergeModule,
	Bundle,
}

impl std::fmt::Display for ProjectKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ProjectKind::Package => write!(f, "Package"),
			ProjectKind::MergeModule => write!(f, "MergeModule"),
			ProjectKind::Bundle => write!(f, "Bundle"),
		}
	}
}

/// An authoring project and the components newly patched in it this session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchProject {
	pub project_path: PathBuf,
	pub kind: ProjectKind,
	pub new_components: Vec<ComponentId>,
}

pub struct AddCommand<'a, I, F, E> {
	index: &'a I,
	families: &'a F,
	filter: &'a E,
	options: PaucOptions,

	patched_files_to_add: Vec<PathBuf>,
	patched_components_to_add: Vec<ComponentId>,

	state: CommandState,
}

impl<'a, I, F, E> AddCommand<'a, I, F, E>
where
	I: ResourceIndex,
	F: FamilySource,
	E: EligibilityFilter,
{
	pub fn new(index: &'a I, families: &'a F, filter: &'a E) -> Self {
		Self {
			index,
			families,
			filter,
			options: Default::default(),
			patched_files_to_add: Default::default(),
			patched_components_to_add: Default::default(),
			state: CommandState::Start,
		}
	}

	pub fn options(mut self, options: PaucOptions) -> Self {
		self.options = options;
		self
	}

	pub fn add_patched_files(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
		self.patched_files_to_add.extend(files.into_iter().map(Into::into));
		self
	}

	pub fn add_patched_components(mut self, components: impl IntoIterator<Item = impl Into<ComponentId>>) -> Self {
		self.patched_components_to_add.extend(components.into_iter().map(Into::into));
		self
	}

	pub fn state(&self) -> CommandState {
		self.state
	}

	fn transition(&mut self, next: CommandState) {
		log::debug!("Add command {:?} -> {:?}", self.state, next);
		self.state = next;
	}

	fn resolver(&self) -> Resolver<'a, I, E> {
		Resolver::new(self.index, self.filter, self.options.filtered_input_policy())
	}

	/// Resolves the patched files and components then adds their patch family siblings.
	///
	/// # Errors
	/// - [`Error::Unresolved`] naming every input without a resource.
	/// - [`Error::AlreadyRun`] if the command was run before.
	pub fn run(&mut self) -> Result<ResolvedSet> {
		if self.state != CommandState::Start {
			return Err(Error::AlreadyRun);
		}

		self.transition(CommandState::ResolvingInputs);
		let resolver = self.resolver();
		let mut resolution = resolver.resolve_files(&self.patched_files_to_add);
		resolution.merge(resolver.resolve_components(&self.patched_components_to_add));

		if resolution.any_unresolved() {
			log::error!("Unresolved resources. Typo? Bad remote store? Either way the command can't continue.");
			self.transition(CommandState::Failed);
			return Err(Error::Unresolved(resolution.unresolved));
		}
		self.transition(CommandState::Resolved);

		let mut resources = resolution.resources;
		if self.options.expand_patch_families() {
			self.transition(CommandState::Expanding);
			let families = self.families.families_for_components(&resolution.patched_components);
			let report = expand_patch_families(self.index, self.filter, &families, &mut resources);
			log::debug!("Patch families added {} resources and excluded {} candidates", report.added, report.excluded);
		}

		self.transition(CommandState::Done);
		Ok(resources)
	}

	/// Resources for the components newly patched in `project`, with ineligible projects removed.
	///
	/// Patch families are not expanded.
	pub fn resources_for_patch_project(&self, project: &PatchProject) -> Result<ResolvedSet> {
		log::trace!("Looking for resources in project {}({}): {}", project.project_path.display(), project.kind, project.new_components.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", "));

		let resolution = self.resolver().resolve_components(&project.new_components);
		if resolution.any_unresolved() {
			log::error!("Unresolved resources in project {}", project.project_path.display());
			return Err(Error::Unresolved(resolution.unresolved));
		}

		Ok(resolution.resources)
	}
}
