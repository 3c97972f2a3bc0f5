use reaction_engine::{
    CatalogError, CatalogManifest, FrameHeader, InputEvent, InputQueue, Lab, LabConfig,
    LabContext, LabEvent, MoleculeCatalog, ProtocolLayout, ReactionResolver, SoundEvent,
};

/// Generic lab runner that wires inbound calls to the lab.
///
/// Each concrete lab (e.g., `chemistry-classroom`) creates a `thread_local!`
/// LabRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct LabRunner<L: Lab> {
    lab: L,
    ctx: LabContext,
    input: InputQueue,
    config: LabConfig,
    layout: ProtocolLayout,
    initialized: bool,
    flush_counter: u32,
    /// Packed header + sounds + events for the scene layer to read.
    frame_buffer: Vec<f32>,
}

impl<L: Lab> LabRunner<L> {
    pub fn new(lab: L) -> Self {
        let config = lab.config();
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = Vec::with_capacity(layout.buffer_total_floats);

        Self {
            lab,
            ctx: LabContext::with_config(&config),
            input: InputQueue::new(),
            layout,
            config,
            initialized: false,
            flush_counter: 0,
            frame_buffer,
        }
    }

    /// Initialize the lab. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.lab.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.ctx = LabContext::with_config(&self.config);
        self.lab.init(&mut self.ctx);
        self.initialized = true;
        self.pack_frame();
    }

    /// Queue an input event without processing it.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue an event and process it right away.
    pub fn dispatch(&mut self, event: InputEvent) {
        self.push_input(event);
        self.flush();
    }

    /// Run the lab over every queued event and repack the frame buffer.
    pub fn flush(&mut self) {
        if !self.initialized {
            return;
        }

        // Clear per-flush transient data
        self.ctx.clear_frame_data();

        self.lab.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.flush_counter = self.flush_counter.wrapping_add(1);
        self.pack_frame();
    }

    /// Replace the catalog from a JSON manifest. On error the current
    /// catalog is kept.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), CatalogError> {
        let catalog = MoleculeCatalog::from_json(json)?;
        self.ctx.clear_frame_data();
        self.ctx.resolver.set_catalog(catalog);
        self.lab.catalog_loaded(&mut self.ctx);
        self.pack_frame();
        Ok(())
    }

    /// The current catalog as a JSON manifest.
    pub fn catalog_json(&self) -> Result<String, serde_json::Error> {
        CatalogManifest::from_catalog(self.ctx.resolver.catalog()).to_json()
    }

    pub fn reactant_symbols(&self) -> Vec<String> {
        self.ctx.resolver.reactants().iter().map(|def| def.symbol.clone()).collect()
    }

    pub fn product_symbols(&self) -> Vec<String> {
        self.ctx.resolver.products().iter().map(|def| def.symbol.clone()).collect()
    }

    pub fn lab(&self) -> &L {
        &self.lab
    }

    pub fn resolver(&self) -> &ReactionResolver {
        &self.ctx.resolver
    }

    pub fn events(&self) -> &[LabEvent] {
        &self.ctx.events
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.ctx.sounds
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame_buffer
    }

    fn pack_frame(&mut self) {
        let header = FrameHeader {
            flush_counter: self.flush_counter,
            zone_mode: self.ctx.resolver.tally().mode(),
            tally_total: self.ctx.resolver.tally().total(),
        };
        self.layout.write_frame(
            &mut self.frame_buffer,
            &header,
            &self.ctx.sounds,
            &self.ctx.events,
        );
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn zone_capacity(&self) -> u32 {
        self.ctx.resolver.capacity() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reaction_engine::bridge::protocol::{
        HEADER_EVENT_COUNT, HEADER_FLUSH_COUNTER, HEADER_SOUND_COUNT, HEADER_TALLY_TOTAL,
    };
    use reaction_engine::{AddOutcome, SelectionHandle};

    /// Minimal lab: drops "C" on every ZoneEnter and reports join results.
    struct CountingLab {
        reloads: u32,
    }

    impl Lab for CountingLab {
        fn config(&self) -> LabConfig {
            LabConfig { max_events: 4, ..LabConfig::default() }
        }

        fn init(&mut self, ctx: &mut LabContext) {
            match MoleculeCatalog::builtin() {
                Ok(catalog) => ctx.resolver.set_catalog(catalog),
                Err(err) => panic!("builtin catalog: {}", err),
            }
        }

        fn update(&mut self, ctx: &mut LabContext, input: &InputQueue) {
            for event in input.iter() {
                match event {
                    InputEvent::ZoneEnter => {
                        if ctx.resolver.add_to_zone("C") == AddOutcome::Added {
                            ctx.emit_event(LabEvent::with_value(1.0, 0.0));
                            ctx.emit_sound(SoundEvent(3));
                        }
                    }
                    InputEvent::Pick { handle } => {
                        ctx.resolver.select(*handle);
                    }
                    _ => {}
                }
            }
        }

        fn catalog_loaded(&mut self, _ctx: &mut LabContext) {
            self.reloads += 1;
        }
    }

    fn runner() -> LabRunner<CountingLab> {
        let mut runner = LabRunner::new(CountingLab { reloads: 0 });
        runner.init();
        runner
    }

    #[test]
    fn flush_before_init_is_ignored() {
        let mut runner = LabRunner::new(CountingLab { reloads: 0 });
        runner.dispatch(InputEvent::ZoneEnter);
        assert!(runner.events().is_empty());
        assert!(runner.resolver().tally().is_empty());
    }

    #[test]
    fn init_sizes_frame_from_config() {
        let runner = runner();
        assert_eq!(runner.max_events(), 4);
        assert_eq!(runner.frame().len(), runner.buffer_total_floats() as usize);
        assert_eq!(runner.zone_capacity(), 9);
    }

    #[test]
    fn dispatch_processes_immediately() {
        let mut runner = runner();
        runner.dispatch(InputEvent::ZoneEnter);
        assert_eq!(runner.resolver().tally().count("C"), 1);

        let frame = runner.frame();
        assert_eq!(frame[HEADER_FLUSH_COUNTER], 1.0);
        assert_eq!(frame[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(frame[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(frame[HEADER_TALLY_TOTAL], 1.0);

        // The event itself is read from the frame, after the sound section.
        let layout = ProtocolLayout::new(32, 4);
        assert_eq!(frame[layout.event_data_offset], 1.0);
        assert_eq!(frame[layout.sound_data_offset], 3.0);
    }

    #[test]
    fn events_are_cleared_between_flushes() {
        let mut runner = runner();
        runner.dispatch(InputEvent::ZoneEnter);
        runner.dispatch(InputEvent::Pick { handle: SelectionHandle(1) });
        assert!(runner.events().is_empty());
        assert_eq!(runner.resolver().selected(), Some(SelectionHandle(1)));
    }

    #[test]
    fn queued_events_run_together() {
        let mut runner = runner();
        runner.push_input(InputEvent::ZoneEnter);
        runner.push_input(InputEvent::ZoneEnter);
        assert!(runner.resolver().tally().is_empty());
        runner.flush();
        assert_eq!(runner.resolver().tally().count("C"), 2);
        assert_eq!(runner.events().len(), 2);
    }

    #[test]
    fn load_catalog_replaces_molecules() {
        let mut runner = runner();
        runner.dispatch(InputEvent::ZoneEnter);
        runner
            .load_catalog(r#"{
                "reactants": [ { "symbol": "Na", "composition": { "Na": 1 } } ],
                "products": []
            }"#)
            .unwrap();
        assert_eq!(runner.reactant_symbols(), vec!["Na".to_string()]);
        assert!(runner.product_symbols().is_empty());
        assert!(runner.resolver().tally().is_empty());
        assert_eq!(runner.lab().reloads, 1);
    }

    #[test]
    fn bad_catalog_keeps_current() {
        let mut runner = runner();
        assert!(runner.load_catalog("{ not json").is_err());
        assert_eq!(runner.reactant_symbols().len(), 3);
        assert_eq!(runner.lab().reloads, 0);
    }

    #[test]
    fn catalog_json_lists_molecules() {
        let runner = runner();
        let json = runner.catalog_json().unwrap();
        assert!(json.contains("\"C6H6\""));
        assert!(json.contains("\"O2\""));
    }
}
