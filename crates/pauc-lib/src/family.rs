//! Patch families, groups of components which have to be serviced together across SKUs.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::resource::ComponentId;

/// A patched component and the components that must travel with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFamily {
	pub driving: ComponentId,
	pub children: Vec<ComponentId>,
}

impl PatchFamily {
	pub fn new(driving: impl Into<ComponentId>, children: impl IntoIterator<Item = impl Into<ComponentId>>) -> Self {
		Self {
			driving: driving.into(),
			children: children.into_iter().map(Into::into).collect(),
		}
	}

	/// `true` if `component` is the driving component or one of the children.
	pub fn involves(&self, component: &ComponentId) -> bool {
		&self.driving == component || self.children.contains(component)
	}
}

/// Supplies the families relevant to a set of patched components.
pub trait FamilySource {
	fn families_for_components(&self, components: &BTreeSet<ComponentId>) -> Vec<PatchFamily>;
}

/// Families already loaded into memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryFamilies {
	families: Vec<PatchFamily>,
}

impl MemoryFamilies {
	pub fn new(families: impl IntoIterator<Item = PatchFamily>) -> Self {
		Self { families: families.into_iter().collect() }
	}
}

impl FamilySource for MemoryFamilies {
	fn families_for_components(&self, components: &BTreeSet<ComponentId>) -> Vec<PatchFamily> {
		self.families.iter()
			.filter(|f| components.iter().any(|c| f.involves(c)))
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn families_match_on_driving_or_child() {
		let families = MemoryFamilies::new([
			PatchFamily::new("C1", ["C2"]),
			PatchFamily::new("C3", ["C4", "C5"]),
			PatchFamily::new("C6", ["C7"]),
		]);

		let components: BTreeSet<ComponentId> = ["C1", "C5"].into_iter().map(ComponentId::from).collect();
		let found = families.families_for_components(&components);
		let driving: Vec<_> = found.iter().map(|f| f.driving.as_str()).collect();
		assert_eq!(driving, ["C1", "C3"]);
	}

	#[test]
	fn no_components_no_families() {
		let families = MemoryFamilies::new([PatchFamily::new("C1", ["C2"])]);
		assert!(families.families_for_components(&BTreeSet::new()).is_empty());
	}
}
