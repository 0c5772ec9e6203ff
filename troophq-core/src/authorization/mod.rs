pub mod capability;
pub mod scope;

pub use capability::{Capability, CapabilityCategory, CapabilityInfo};
pub use scope::Scope;
