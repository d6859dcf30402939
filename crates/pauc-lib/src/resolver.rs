//! Turning the files and components a user says they patched into installer resources.
//!
//! Every input is looked up, unknown inputs are collected rather than stopping the resolve so
//! the caller can report all of them at once. A [`Resolution`] with any unresolved input must
//! be treated as a failure of the whole command even though it still holds resources.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::config::FilteredInputPolicy;
use crate::eligibility::EligibilityFilter;
use crate::pdb::ResourceIndex;
use crate::resolved_set::ResolvedSet;
use crate::resource::{ComponentId, MsiResource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
	File,
	Component,
}

/// A user supplied input which could not be resolved to any resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnresolvedInput {
	pub kind: InputKind,
	pub name: String,
}

impl std::fmt::Display for UnresolvedInput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			InputKind::File => write!(f, "file `{}`", self.name),
			InputKind::Component => write!(f, "component `{}`", self.name),
		}
	}
}

/// Outcome of resolving a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
	pub resources: ResolvedSet,
	/// Inputs without a resource, in the order they were given.
	pub unresolved: Vec<UnresolvedInput>,
	/// Components the inputs matched, eligible or not.
	pub patched_components: BTreeSet<ComponentId>,
	/// Number of matched resources dropped because their project can't be patched.
	pub excluded: usize,
}

impl Resolution {
	pub fn any_unresolved(&self) -> bool {
		!self.unresolved.is_empty()
	}

	/// Folds another resolution into this one.
	pub fn merge(&mut self, other: Resolution) {
		self.resources.extend(other.resources);
		self.unresolved.extend(other.unresolved);
		self.patched_components.extend(other.patched_components);
		self.excluded += other.excluded;
	}
}

pub struct Resolver<'a, I, E> {
	index: &'a I,
	filter: &'a E,
	policy: FilteredInputPolicy,
}

impl<'a, I: ResourceIndex, E: EligibilityFilter> Resolver<'a, I, E> {
	pub fn new(index: &'a I, filter: &'a E, policy: FilteredInputPolicy) -> Self {
		Self {
			index,
			filter,
			policy,
		}
	}

	pub fn resolve_files<P: AsRef<Path>>(&self, patched_files: impl IntoIterator<Item = P>) -> Resolution {
		let mut resolution = Resolution::default();
		for patched_file in patched_files {
			let patched_file = patched_file.as_ref();
			let found = self.index.find_resources_for_source_path(patched_file);
			self.add_resources(InputKind::File, patched_file.display().to_string(), found, &mut resolution);
		}
		resolution
	}

	pub fn resolve_components<C: AsRef<str>>(&self, patched_components: impl IntoIterator<Item = C>) -> Resolution {
		let mut resolution = Resolution::default();
		for patched_component in patched_components {
			let id = ComponentId::new(patched_component.as_ref());
			let found = self.index.find_resources_for_component(&id);
			self.add_resources(InputKind::Component, id.to_string(), found, &mut resolution);
		}
		resolution
	}

	fn add_resources(&self, kind: InputKind, name: String, found: Vec<MsiResource>, resolution: &mut Resolution) {
		if found.is_empty() {
			log::warn!("Unknown resource {}", name);
			resolution.unresolved.push(UnresolvedInput { kind, name });
			return;
		}

		let mut groups = BTreeMap::<ComponentId, Vec<MsiResource>>::new();
		for resource in found {
			groups.entry(resource.component_id.clone()).or_default().push(resource);
		}

		let mut contributed = false;
		for (component, group) in groups {
			log::info!("Patching component {}", component);
			resolution.patched_components.insert(component);
			for resource in group {
				if self.filter.is_eligible(&resource) {
					contributed = true;
					resolution.resources.insert(resource);
				} else {
					log::trace!("Resource {} from SKU {} matched {} but is not being added because the project isn't eligible for patching: {}", resource.component_id, resource.sku.key, name, resource.wixproj_path().display());
					resolution.excluded += 1;
				}
			}
		}

		if !contributed && self.policy == FilteredInputPolicy::TreatAsUnresolved {
			log::warn!("Every resource for {} is in a project that isn't eligible for patching", name);
			resolution.unresolved.push(UnresolvedInput { kind, name });
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::eligibility::{PatchContext, ProjectStatus};
	use crate::pdb::MemoryIndex;
	use crate::resource::Sku;

	fn sku1() -> Sku { Sku::new("SKU1", "sku1.wixproj") }
	fn sku2() -> Sku { Sku::new("SKU2", "sku2.wixproj") }

	fn index() -> MemoryIndex {
		MemoryIndex::new()
			.with_resource(MsiResource::new("C1", sku1()), ["a.txt", "shared.txt"])
			.with_resource(MsiResource::new("C1", sku2()), ["shared.txt"])
			.with_resource(MsiResource::new("C2", sku1()), ["b.txt", "shared.txt"])
			.with_resource(MsiResource::new("C3", sku2()), ["only-sku2.txt"])
	}

	fn context() -> PatchContext {
		PatchContext::new(false)
			.with_project_status("sku1.wixproj", ProjectStatus::Targeted)
			.with_project_status("sku2.wixproj", ProjectStatus::ServicedByMajorUpgrade)
	}

	#[test]
	fn collects_every_unresolved_input() {
		let (index, ctx) = (index(), context());
		let resolver = Resolver::new(&index, &ctx, FilteredInputPolicy::Accept);

		let resolution = resolver.resolve_files(["x.txt", "a.txt", "y.txt"]);
		assert!(resolution.any_unresolved());
		let names: Vec<_> = resolution.unresolved.iter().map(|u| u.name.as_str()).collect();
		assert_eq!(names, ["x.txt", "y.txt"]);
		assert_eq!(resolution.resources.len(), 1);
	}

	#[test]
	fn file_in_several_components_adds_all_groups() {
		let (index, ctx) = (index(), context());
		let resolver = Resolver::new(&index, &ctx, FilteredInputPolicy::Accept);

		let resolution = resolver.resolve_files(["shared.txt"]);
		assert!(!resolution.any_unresolved());
		assert_eq!(resolution.patched_components.len(), 2);
		assert_eq!(resolution.resources.len(), 2);
		assert_eq!(resolution.excluded, 1);
	}

	#[test]
	fn fully_filtered_input_policy() {
		let (index, ctx) = (index(), context());

		let accept = Resolver::new(&index, &ctx, FilteredInputPolicy::Accept).resolve_files(["only-sku2.txt"]);
		assert!(!accept.any_unresolved());
		assert!(accept.resources.is_empty());
		assert_eq!(accept.excluded, 1);

		let strict = Resolver::new(&index, &ctx, FilteredInputPolicy::TreatAsUnresolved).resolve_files(["only-sku2.txt"]);
		assert!(strict.any_unresolved());
		assert_eq!(strict.unresolved[0], UnresolvedInput { kind: InputKind::File, name: "only-sku2.txt".into() });
	}

	#[test]
	fn partially_filtered_input_is_resolved_under_either_policy() {
		let (index, ctx) = (index(), context());
		for policy in [FilteredInputPolicy::Accept, FilteredInputPolicy::TreatAsUnresolved] {
			let resolution = Resolver::new(&index, &ctx, policy).resolve_components(["C1"]);
			assert!(!resolution.any_unresolved());
			assert_eq!(resolution.resources.len(), 1);
		}
	}

	#[test]
	fn merge_combines_batches() {
		let (index, ctx) = (index(), context());
		let resolver = Resolver::new(&index, &ctx, FilteredInputPolicy::Accept);

		let mut resolution = resolver.resolve_files(["a.txt"]);
		resolution.merge(resolver.resolve_components(["C2", "C9"]));
		assert_eq!(resolution.resources.len(), 2);
		assert_eq!(resolution.unresolved, vec![UnresolvedInput { kind: InputKind::Component, name: "C9".into() }]);
	}

	#[test]
	fn unresolved_input_display() {
		let file = UnresolvedInput { kind: InputKind::File, name: "missing.txt".into() };
		let component = UnresolvedInput { kind: InputKind::Component, name: "C9".into() };
		assert_eq!(file.to_string(), "file `missing.txt`");
		assert_eq!(component.to_string(), "component `C9`");
	}
}
