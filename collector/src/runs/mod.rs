//! @ai:module:intent Locate run artifacts and discover runs on disk
//! @ai:module:layer domain
//! @ai:module:public_api ArtifactLocator, RunDiscovery, RunDiscoveryTrait

pub mod discovery;
pub mod locator;

pub use discovery::{RunDiscovery, RunDiscoveryTrait};
pub use locator::ArtifactLocator;
