//! Molecule catalog: definitions, JSON manifests and the registry.

pub mod definition;
pub mod error;
pub mod manifest;
pub mod registry;

pub use definition::{Composition, MoleculeDefinition, Role};
pub use error::CatalogError;
pub use manifest::{CatalogManifest, MoleculeEntry};
pub use registry::MoleculeCatalog;
