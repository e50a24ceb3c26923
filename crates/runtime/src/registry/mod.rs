//! Mod registry plumbing: backend calls, the availability-gated link, and
//! the cached list of installed mods.

mod backend;
mod catalog;
mod link;

pub use backend::RegistryBackend;
pub use catalog::ModCatalog;
pub use link::{LinkState, RegistryLink};
