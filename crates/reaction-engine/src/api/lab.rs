use serde::Deserialize;

use crate::api::types::{LabEvent, SoundEvent};
use crate::catalog::MoleculeCatalog;
use crate::input::queue::InputQueue;
use crate::reaction::resolver::{ReactionResolver, DEFAULT_ZONE_CAPACITY};

/// Configuration for the lab, provided by the lab implementation.
/// Any field missing from a JSON override keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Reactant slots in the reaction zone (default: 9, a 3×3 panel).
    pub zone_capacity: usize,
    /// Maximum number of sound events per flush (default: 32).
    pub max_sounds: usize,
    /// Maximum number of lab events per flush (default: 32).
    pub max_events: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            zone_capacity: DEFAULT_ZONE_CAPACITY,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

impl LabConfig {
    /// Parse a config override from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The contract every lab (scene collaborator) must fulfill.
pub trait Lab {
    /// Return lab configuration. Called once before init.
    fn config(&self) -> LabConfig {
        LabConfig::default()
    }

    /// Register molecules and set up initial state.
    fn init(&mut self, ctx: &mut LabContext);

    /// Handle the pending input events. Called once per flush.
    fn update(&mut self, ctx: &mut LabContext, input: &InputQueue);

    /// Optional hook after the page swaps in a new catalog.
    /// Indices into the old catalog are no longer valid.
    fn catalog_loaded(&mut self, _ctx: &mut LabContext) {}
}

/// Mutable access to lab state, passed to `Lab::init` and `Lab::update`.
pub struct LabContext {
    pub resolver: ReactionResolver,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<LabEvent>,
    max_sounds: usize,
    max_events: usize,
}

impl LabContext {
    pub fn new() -> Self {
        Self::with_config(&LabConfig::default())
    }

    /// Create a context with an empty catalog sized by `config`.
    pub fn with_config(config: &LabConfig) -> Self {
        Self {
            resolver: ReactionResolver::with_catalog(MoleculeCatalog::new())
                .with_capacity(config.zone_capacity),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Emit a sound event. Dropped once `max_sounds` is reached this flush.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() >= self.max_sounds {
            log::warn!("sound buffer full, dropping {:?}", event);
            return;
        }
        self.sounds.push(event);
    }

    /// Emit a lab event. Dropped once `max_events` is reached this flush.
    pub fn emit_event(&mut self, event: LabEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full, dropping kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-flush transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for LabContext {
    fn default() -> Self {
        Self::new()
    }
}
