//! The working set of resources for a single command invocation.

use std::collections::HashSet;
use serde::{Serialize, Deserialize};

use crate::resource::MsiResource;

/// Resources to be added to the patch authoring, unique by component and SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedSet {
	resources: HashSet<MsiResource>,
}

impl ResolvedSet {
	pub fn new() -> Self {
		Default::default()
	}

	/// Adds a resource, returns `false` if it was already present.
	pub fn insert(&mut self, resource: MsiResource) -> bool {
		self.resources.insert(resource)
	}

	pub fn contains(&self, resource: &MsiResource) -> bool {
		self.resources.contains(resource)
	}

	pub fn len(&self) -> usize {
		self.resources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.resources.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &MsiResource> {
		self.resources.iter()
	}

	/// Resources ordered by component then SKU key, for writers which need stable output.
	pub fn sorted(&self) -> Vec<&MsiResource> {
		let mut v: Vec<_> = self.resources.iter().collect();
		v.sort();
		v
	}

	pub fn is_superset(&self, other: &ResolvedSet) -> bool {
		self.resources.is_superset(&other.resources)
	}
}

impl Extend<MsiResource> for ResolvedSet {
	fn extend<T: IntoIterator<Item = MsiResource>>(&mut self, iter: T) {
		self.resources.extend(iter)
	}
}

impl FromIterator<MsiResource> for ResolvedSet {
	fn from_iter<T: IntoIterator<Item = MsiResource>>(iter: T) -> Self {
		Self { resources: iter.into_iter().collect() }
	}
}

impl IntoIterator for ResolvedSet {
	type Item = MsiResource;
	type IntoIter = std::collections::hash_set::IntoIter<MsiResource>;

	fn into_iter(self) -> Self::IntoIter {
		self.resources.into_iter()
	}
}
