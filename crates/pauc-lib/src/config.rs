use serde::{Serialize, Deserialize};

/// How to treat a user supplied input whose resources were all removed as ineligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilteredInputPolicy {
	/// The input is resolved, it just contributes nothing to the patch.
	#[default] Accept,
	/// The input is reported as unresolved and fails the command like an unknown input would.
	TreatAsUnresolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaucOptions {
	filtered_input_policy: FilteredInputPolicy,
	expand_patch_families: bool,
}

impl Default for PaucOptions {
	fn default() -> Self {
		Self {
			filtered_input_policy: FilteredInputPolicy::Accept,
			expand_patch_families: true,
		}
	}
}

impl PaucOptions {
	pub fn filtered_input_policy(&self) -> FilteredInputPolicy {
		self.filtered_input_policy
	}
	pub fn set_filtered_input_policy(&mut self, policy: FilteredInputPolicy) {
		self.filtered_input_policy = policy;
	}

	/// When disabled resources from sibling SKUs in a patch family are not pulled in.
	pub fn expand_patch_families(&self) -> bool {
		self.expand_patch_families
	}
	pub fn set_expand_patch_families(&mut self, expand: bool) {
		self.expand_patch_families = expand;
	}
}
