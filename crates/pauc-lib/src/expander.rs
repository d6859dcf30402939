//! Pulling in resources from other SKUs that share a patch family with a patched component.
//!
//! If a newly patched component is in a patch family with components from other SKUs, those
//! SKUs need to be targeted too. Expansion is best effort: a sibling which isn't in the index, or
//! only ships in projects which can't be patched, is skipped without failing.

use crate::eligibility::EligibilityFilter;
use crate::family::PatchFamily;
use crate::pdb::ResourceIndex;
use crate::resolved_set::ResolvedSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionReport {
	/// Resources which were not already in the set.
	pub added: usize,
	/// Candidates skipped because their project isn't eligible.
	pub excluded: usize,
}

/// Adds the eligible resources of every family child to `existing`. Nothing is ever removed.
pub fn expand_patch_families<I, E>(index: &I, filter: &E, families: &[PatchFamily], existing: &mut ResolvedSet) -> ExpansionReport
where
	I: ResourceIndex,
	E: EligibilityFilter,
{
	let mut report = ExpansionReport::default();

	for family in families {
		for component in &family.children {
			let candidates = index.find_resources_for_component(component);
			if candidates.is_empty() {
				log::trace!("Patch family member {} of {} has no resources", component, family.driving);
				continue;
			}

			for resource in candidates {
				if filter.is_eligible(&resource) {
					if existing.insert(resource) {
						report.added += 1;
					}
				} else {
					log::trace!("Resource {} from SKU {} is a candidate for adding since it is in the same patch family as {}. It is not being added because the project isn't eligible for patching: {}", resource.component_id, resource.sku.key, family.driving, resource.wixproj_path().display());
					report.excluded += 1;
				}
			}
		}
	}

	report
}
