//! Lookup of installer resources built from the product PDBs.
//!
//! The engine only ever reads from an index. Loading one is the job of whatever owns the PDBs,
//! [`MemoryIndex`] is provided for hosts which already have the data in memory.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

use crate::resource::{ComponentId, MsiResource};

/// Maps source files and components to the resources they ship in.
///
/// Unknown inputs must produce an empty `Vec`, the resolver treats that as unresolved.
pub trait ResourceIndex {
	fn find_resources_for_source_path(&self, path: &Path) -> Vec<MsiResource>;
	fn find_resources_for_component(&self, component: &ComponentId) -> Vec<MsiResource>;
}

/// Source and project paths come from Windows enlistments so separators and case don't matter.
///
/// Paths which aren't valid unicode are kept byte for byte.
pub(crate) fn normalize_path(path: &Path) -> OsString {
	match path.to_str() {
		Some(s) => s.replace('\\', "/").to_ascii_lowercase().into(),
		None => path.as_os_str().to_owned(),
	}
}

/// A resource and the source files built into it, the persisted form of [`MemoryIndex`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
	#[serde(flatten)]
	pub resource: MsiResource,
	#[serde(default)]
	pub source_paths: Vec<PathBuf>,
}

/// An index held entirely in memory.
///
/// Serializes as a list of [`IndexEntry`], the lookup tables are rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<IndexEntry>", into = "Vec<IndexEntry>")]
pub struct MemoryIndex {
	entries: Vec<IndexEntry>,
	positions: HashMap<MsiResource, usize>,
	by_source_path: HashMap<OsString, Vec<usize>>,
	by_component: HashMap<ComponentId, Vec<usize>>,
}

impl MemoryIndex {
	pub fn new() -> Self {
		Default::default()
	}

	/// Registers a resource along with the source files which are built into it.
	///
	/// Registering the same resource again only adds the new source paths.
	pub fn add_resource<P: AsRef<Path>>(&mut self, resource: MsiResource, source_paths: impl IntoIterator<Item = P>) {
		let i = match self.positions.get(&resource) {
			Some(i) => *i,
			None => {
				let i = self.entries.len();
				self.positions.insert(resource.clone(), i);
				self.by_component.entry(resource.component_id.clone()).or_default().push(i);
				self.entries.push(IndexEntry { resource, source_paths: Vec::new() });
				i
			}
		};

		for path in source_paths {
			let path = path.as_ref();
			let entry = self.by_source_path.entry(normalize_path(path)).or_default();
			if !entry.contains(&i) {
				entry.push(i);
				self.entries[i].source_paths.push(path.to_path_buf());
			}
		}
	}

	pub fn with_resource<P: AsRef<Path>>(mut self, resource: MsiResource, source_paths: impl IntoIterator<Item = P>) -> Self {
		self.add_resource(resource, source_paths);
		self
	}

	fn resources_at(&self, indices: Option<&Vec<usize>>) -> Vec<MsiResource> {
		indices.map(|v| v.iter().filter_map(|i| self.entries.get(*i)).map(|e| e.resource.clone()).collect()).unwrap_or_default()
	}
}

impl From<Vec<IndexEntry>> for MemoryIndex {
	fn from(entries: Vec<IndexEntry>) -> Self {
		let mut index = MemoryIndex::new();
		for entry in entries {
			index.add_resource(entry.resource, entry.source_paths);
		}
		index
	}
}

impl From<MemoryIndex> for Vec<IndexEntry> {
	fn from(index: MemoryIndex) -> Self {
		index.entries
	}
}

impl ResourceIndex for MemoryIndex {
	fn find_resources_for_source_path(&self, path: &Path) -> Vec<MsiResource> {
		self.resources_at(self.by_source_path.get(&normalize_path(path)))
	}

	fn find_resources_for_component(&self, component: &ComponentId) -> Vec<MsiResource> {
		self.resources_at(self.by_component.get(component))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::Sku;

	fn index() -> MemoryIndex {
		MemoryIndex::new()
			.with_resource(MsiResource::new("C1", Sku::new("SKU1", "sku1.wixproj")), ["src\\Setup\\a.txt"])
			.with_resource(MsiResource::new("C1", Sku::new("SKU2", "sku2.wixproj")), ["src/setup/a.txt"])
			.with_resource(MsiResource::new("C2", Sku::new("SKU1", "sku1.wixproj")), Vec::<&str>::new())
	}

	#[test]
	fn path_lookup_ignores_separator_and_case() {
		let index = index();
		let found = index.find_resources_for_source_path(Path::new("SRC/setup/A.txt"));
		assert_eq!(found.len(), 2);
	}

	#[test]
	fn unknown_inputs_are_empty() {
		let index = index();
		assert!(index.find_resources_for_source_path(Path::new("missing.txt")).is_empty());
		assert!(index.find_resources_for_component(&"C9".into()).is_empty());
	}

	#[test]
	fn duplicate_registration_is_collapsed() {
		let index = index()
			.with_resource(MsiResource::new("C1", Sku::new("SKU1", "sku1.wixproj")), ["src/setup/a.txt", "b.txt"]);
		assert_eq!(index.find_resources_for_component(&"C1".into()).len(), 2);
		assert_eq!(index.find_resources_for_source_path(Path::new("src/setup/a.txt")).len(), 2);
		assert_eq!(index.find_resources_for_source_path(Path::new("b.txt")).len(), 1);

		let entries = Vec::<IndexEntry>::from(index);
		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0].source_paths, [PathBuf::from("src\\Setup\\a.txt"), PathBuf::from("b.txt")]);
	}

	#[test]
	fn index_is_shareable_between_threads() {
		fn assert_sync<T: Send + Sync>() {}
		assert_sync::<MemoryIndex>();
	}

	#[cfg(unix)]
	#[test]
	fn distinct_non_unicode_paths_stay_distinct() {
		use std::os::unix::ffi::OsStrExt;
		let a = Path::new(std::ffi::OsStr::from_bytes(b"a\xff.txt"));
		let b = Path::new(std::ffi::OsStr::from_bytes(b"a\xfe.txt"));
		assert_ne!(normalize_path(a), normalize_path(b));

		let index = MemoryIndex::new().with_resource(MsiResource::new("C1", Sku::new("SKU1", "sku1.wixproj")), [a]);
		assert_eq!(index.find_resources_for_source_path(a).len(), 1);
		assert!(index.find_resources_for_source_path(b).is_empty());
	}
}
