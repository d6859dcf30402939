pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::PaucOptions;
pub use config::FilteredInputPolicy;

pub mod resource;
pub use resource::ComponentId;
pub use resource::MsiResource;
pub use resource::Sku;

pub mod resolved_set;
pub use resolved_set::ResolvedSet;

pub mod pdb;
pub use pdb::ResourceIndex;
pub use pdb::MemoryIndex;

pub mod eligibility;
pub use eligibility::EligibilityFilter;
pub use eligibility::PatchContext;

pub mod family;
pub use family::PatchFamily;
pub use family::FamilySource;

pub mod resolver;
pub mod expander;
pub mod command;
pub use command::AddCommand;
