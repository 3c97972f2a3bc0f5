pub mod api;
pub mod bridge;
pub mod catalog;
pub mod input;
pub mod reaction;

// Re-export key types at crate root for convenience
pub use api::lab::{Lab, LabConfig, LabContext};
pub use api::types::{LabEvent, SelectionHandle, SoundEvent};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use catalog::{CatalogError, CatalogManifest, Composition, MoleculeCatalog, MoleculeDefinition, Role};
pub use input::queue::{InputEvent, InputQueue};
pub use reaction::{AddOutcome, ReactionResolver, ZoneMode, ZoneTally, DEFAULT_ZONE_CAPACITY};
