//! Installer resources and the SKUs which own them.

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

/// Identifier of an MSI component as authored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for ComponentId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ComponentId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for ComponentId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl AsRef<str> for ComponentId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// One distributable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku {
	pub key: String,
	/// Project the SKU is authored from, eligibility is decided on this path.
	pub wixproj_path: PathBuf,
}

impl Sku {
	pub fn new(key: impl Into<String>, wixproj_path: impl Into<PathBuf>) -> Self {
		Self {
			key: key.into(),
			wixproj_path: wixproj_path.into(),
		}
	}
}

/// A component as it ships in a particular SKU.
///
/// Two resources are the same resource when both the component and the owning SKU key match,
/// the authoring path is carried along but does not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsiResource {
	pub component_id: ComponentId,
	pub sku: Sku,
}

impl MsiResource {
	pub fn new(component_id: impl Into<ComponentId>, sku: Sku) -> Self {
		Self {
			component_id: component_id.into(),
			sku,
		}
	}

	pub fn wixproj_path(&self) -> &Path {
		&self.sku.wixproj_path
	}
}

impl std::hash::Hash for MsiResource {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.component_id.hash(state);
		self.sku.key.hash(state);
	}
}

impl std::cmp::PartialEq for MsiResource {
	fn eq(&self, other: &Self) -> bool {
		self.component_id == other.component_id && self.sku.key == other.sku.key
	}
}

impl std::cmp::Eq for MsiResource {}

impl std::cmp::Ord for MsiResource {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		match self.component_id.cmp(&other.component_id) {
			core::cmp::Ordering::Equal => {}
			ord => return ord,
		}
		self.sku.key.cmp(&other.sku.key)
	}
}

impl std::cmp::PartialOrd for MsiResource {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for MsiResource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.component_id, self.sku.key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn identity_ignores_authoring_path() {
		let a = MsiResource::new("C1", Sku::new("SKU1", "a/sku1.wixproj"));
		let b = MsiResource::new("C1", Sku::new("SKU1", "b/other.wixproj"));
		let c = MsiResource::new("C1", Sku::new("SKU2", "a/sku1.wixproj"));

		assert_eq!(a, b);
		assert_ne!(a, c);

		let set: HashSet<_> = [a, b, c].into_iter().collect();
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn orders_by_component_then_sku() {
		let mut v = vec![
			MsiResource::new("C2", Sku::new("SKU1", "p")),
			MsiResource::new("C1", Sku::new("SKU2", "p")),
			MsiResource::new("C1", Sku::new("SKU1", "p")),
		];
		v.sort();
		let names: Vec<_> = v.iter().map(|r| r.to_string()).collect();
		assert_eq!(names, ["C1/SKU1", "C1/SKU2", "C2/SKU1"]);
	}
}
