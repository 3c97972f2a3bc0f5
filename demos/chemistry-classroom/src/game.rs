//! Chemistry classroom - thin controller layer.
//!
//! Routes scene input to the reaction resolver and tells the scene what to
//! show. Meshes, particles and text live on the TypeScript side.

use reaction_engine::reaction::recipe::CARBON_DIOXIDE;
use reaction_engine::{
    AddOutcome, InputEvent, InputQueue, Lab, LabConfig, LabContext, LabEvent, MoleculeCatalog,
    Role, SelectionHandle,
};

use crate::interaction::InteractionSystem;
use crate::panel::ReactionPanel;
use crate::tutorial::{Indicator, Tutorial};

/// Custom event kinds from the scene.
mod events {
    /// a = mesh id, b = catalog index
    pub const BIND_MESH: u32 = 1;
    pub const RESTART_TUTORIAL: u32 = 2;
}

/// Lab event kinds to the scene.
mod lab_events {
    /// a = catalog index of the grabbed molecule
    pub const PICKED: f32 = 1.0;
    pub const RELEASED: f32 = 2.0;
    /// a = catalog index of the molecule that hit the zone
    pub const ZONE_BURST: f32 = 3.0;
    /// a = catalog index, b/c = panel x/y
    pub const PANEL_ADD: f32 = 4.0;
    pub const PANEL_CLEAR: f32 = 5.0;
    /// a = zone capacity
    pub const CAPACITY_WARNING: f32 = 6.0;
    /// a = catalog index of the product to enable
    pub const JOIN_RESULT: f32 = 7.0;
    /// a = catalog index of a reactant, b = how many to spawn
    pub const BREAK_PIECE: f32 = 8.0;
    pub const NO_REACTION: f32 = 9.0;
    /// a = indicator code
    pub const INDICATOR: f32 = 10.0;
}

mod sounds {
    use reaction_engine::SoundEvent;

    pub const ZONE_ENTER: SoundEvent = SoundEvent(1);
    pub const REACTION: SoundEvent = SoundEvent(2);
}

/// The chemistry classroom.
pub struct ChemistryClassroom {
    interaction: InteractionSystem,
    panel: ReactionPanel,
    tutorial: Tutorial,
}

impl ChemistryClassroom {
    pub fn new() -> Self {
        Self {
            interaction: InteractionSystem::new(),
            panel: ReactionPanel::new(),
            tutorial: Tutorial::new(CARBON_DIOXIDE),
        }
    }

    /// Handle custom events from the scene.
    fn handle_custom_event(&mut self, ctx: &mut LabContext, kind: u32, a: f32, b: f32) {
        match kind {
            events::BIND_MESH => {
                if a < 0.0 || b < 0.0 {
                    log::warn!("ignoring negative mesh binding ({}, {})", a, b);
                    return;
                }
                self.interaction.bind(a as u32, b as usize, ctx.resolver.catalog());
            }
            events::RESTART_TUTORIAL => {
                let change = self.tutorial.restart();
                emit_indicator(ctx, change);
            }
            _ => {}
        }
    }

    fn on_pick(&mut self, ctx: &mut LabContext, handle: SelectionHandle) {
        let Some((index, def)) = self.interaction.molecule(handle, ctx.resolver.catalog()) else {
            log::debug!("pick on unbound mesh {}", handle.0);
            return;
        };
        let symbol = def.symbol.clone();

        // Only one molecule may be held at a time.
        if !ctx.resolver.select(handle) {
            return;
        }
        ctx.emit_event(LabEvent::with_value(lab_events::PICKED, index as f32));
        let change = self.tutorial.on_grab(&symbol);
        emit_indicator(ctx, change);
    }

    fn on_release(&mut self, ctx: &mut LabContext) {
        if ctx.resolver.release().is_some() {
            ctx.emit_event(LabEvent::with_value(lab_events::RELEASED, 0.0));
        }
        let change = self.tutorial.on_release();
        emit_indicator(ctx, change);
    }

    fn on_zone_enter(&mut self, ctx: &mut LabContext) {
        let Some(handle) = ctx.resolver.selected() else {
            return;
        };
        // The held copy is consumed by the zone either way.
        ctx.resolver.release();

        let Some((index, def)) = self.interaction.molecule(handle, ctx.resolver.catalog()) else {
            return;
        };
        let symbol = def.symbol.clone();
        let role = def.role;

        ctx.emit_event(LabEvent::with_value(lab_events::ZONE_BURST, index as f32));
        ctx.emit_sound(sounds::ZONE_ENTER);
        let change = self.tutorial.on_drop();
        emit_indicator(ctx, change);

        match ctx.resolver.add_to_zone(&symbol) {
            AddOutcome::Added => {
                // A single molecule in the tally means a fresh start.
                if ctx.resolver.tally().total() == 1 {
                    self.clear_panel(ctx);
                }
                let slot = match role {
                    Role::Reactant => self.panel.place_reactant(),
                    Role::Product => Some(self.panel.place_product()),
                };
                match slot {
                    Some(pos) => ctx.emit_event(LabEvent::new(
                        lab_events::PANEL_ADD,
                        index as f32,
                        pos.x,
                        pos.y,
                    )),
                    None => log::debug!("panel full, {} not displayed", symbol),
                }
            }
            AddOutcome::CapacityExceeded => {
                if self.panel.show_capacity_warning() {
                    let capacity = ctx.resolver.capacity() as f32;
                    ctx.emit_event(LabEvent::with_value(lab_events::CAPACITY_WARNING, capacity));
                }
            }
            AddOutcome::Ignored => {}
        }
    }

    fn on_join(&mut self, ctx: &mut LabContext) {
        match ctx.resolver.try_resolve_join() {
            Some(product) => {
                self.clear_panel(ctx);
                if let Some(index) = ctx.resolver.catalog().index_of(&product) {
                    ctx.emit_event(LabEvent::with_value(lab_events::JOIN_RESULT, index as f32));
                }
                ctx.emit_sound(sounds::REACTION);
            }
            None => ctx.emit_event(LabEvent::with_value(lab_events::NO_REACTION, 0.0)),
        }
    }

    fn on_break(&mut self, ctx: &mut LabContext) {
        let Some(pieces) = ctx.resolver.try_resolve_break() else {
            ctx.emit_event(LabEvent::with_value(lab_events::NO_REACTION, 0.0));
            return;
        };
        self.clear_panel(ctx);
        for (symbol, count) in &pieces {
            if let Some(index) = ctx.resolver.catalog().index_of(symbol) {
                ctx.emit_event(LabEvent::new(
                    lab_events::BREAK_PIECE,
                    index as f32,
                    *count as f32,
                    0.0,
                ));
            }
        }
        ctx.emit_sound(sounds::REACTION);
        let change = self.tutorial.on_break();
        emit_indicator(ctx, change);
    }

    fn on_reset(&mut self, ctx: &mut LabContext) {
        ctx.resolver.reset();
        self.clear_panel(ctx);
    }

    fn clear_panel(&mut self, ctx: &mut LabContext) {
        self.panel.clear();
        ctx.emit_event(LabEvent::with_value(lab_events::PANEL_CLEAR, 0.0));
    }
}

fn emit_indicator(ctx: &mut LabContext, change: Option<Indicator>) {
    if let Some(indicator) = change {
        ctx.emit_event(LabEvent::with_value(lab_events::INDICATOR, indicator.code()));
    }
}

impl Lab for ChemistryClassroom {
    fn config(&self) -> LabConfig {
        LabConfig {
            zone_capacity: self.panel.capacity(),
            ..LabConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut LabContext) {
        match MoleculeCatalog::builtin() {
            Ok(catalog) => ctx.resolver.set_catalog(catalog),
            Err(err) => log::error!("failed to load molecule catalog: {}", err),
        }
        ctx.emit_event(LabEvent::with_value(
            lab_events::INDICATOR,
            self.tutorial.indicator().code(),
        ));
    }

    fn update(&mut self, ctx: &mut LabContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Pick { handle } => self.on_pick(ctx, handle),
                InputEvent::Release => self.on_release(ctx),
                InputEvent::ZoneEnter => self.on_zone_enter(ctx),
                InputEvent::Join => self.on_join(ctx),
                InputEvent::Break => self.on_break(ctx),
                InputEvent::Reset => self.on_reset(ctx),
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom_event(ctx, kind, a, b),
            }
        }
    }

    fn catalog_loaded(&mut self, ctx: &mut LabContext) {
        self.interaction.reset();
        self.clear_panel(ctx);
    }
}

impl Default for ChemistryClassroom {
    fn default() -> Self {
        Self::new()
    }
}
