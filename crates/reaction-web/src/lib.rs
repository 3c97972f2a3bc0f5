pub mod runner;

pub use runner::LabRunner;

/// Generate all `#[wasm_bindgen]` exports for a lab.
///
/// Generates:
/// - `thread_local!` storage for the LabRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lab_init, inbound scene calls, data accessors)
///
/// Every inbound call is processed before it returns, so the scene layer can
/// read the frame buffer right after calling it.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use reaction_engine::*;
///
/// mod game;
/// use game::MyLab;
///
/// reaction_web::export_lab!(MyLab, "my-lab");
/// ```
///
/// # Arguments
///
/// - `$lab_type`: The lab struct type that implements `reaction_engine::Lab`
/// - `$lab_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_lab {
    ($lab_type:ty, $lab_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::LabRunner<$lab_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::LabRunner<$lab_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Lab not initialized. Call lab_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn lab_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let lab = <$lab_type>::new();
            let runner = $crate::LabRunner::new(lab);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $lab_name);
        }

        // ---- Inbound scene calls ----

        #[wasm_bindgen]
        pub fn lab_pick(handle: u32) {
            with_runner(|r| r.dispatch(InputEvent::Pick { handle: SelectionHandle(handle) }));
        }

        #[wasm_bindgen]
        pub fn lab_release() {
            with_runner(|r| r.dispatch(InputEvent::Release));
        }

        #[wasm_bindgen]
        pub fn lab_zone_enter() {
            with_runner(|r| r.dispatch(InputEvent::ZoneEnter));
        }

        #[wasm_bindgen]
        pub fn lab_join() {
            with_runner(|r| r.dispatch(InputEvent::Join));
        }

        #[wasm_bindgen]
        pub fn lab_break() {
            with_runner(|r| r.dispatch(InputEvent::Break));
        }

        #[wasm_bindgen]
        pub fn lab_reset() {
            with_runner(|r| r.dispatch(InputEvent::Reset));
        }

        #[wasm_bindgen]
        pub fn lab_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.dispatch(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn lab_load_catalog(json: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_catalog(json))
                .map_err(|err| JsValue::from_str(&err.to_string()))
        }

        // ---- Catalog accessors ----

        #[wasm_bindgen]
        pub fn lab_catalog_json() -> Result<String, JsValue> {
            with_runner(|r| r.catalog_json())
                .map_err(|err| JsValue::from_str(&err.to_string()))
        }

        #[wasm_bindgen]
        pub fn lab_reactants() -> js_sys::Array {
            with_runner(|r| r.reactant_symbols())
                .into_iter()
                .map(|symbol| JsValue::from_str(&symbol))
                .collect()
        }

        #[wasm_bindgen]
        pub fn lab_products() -> js_sys::Array {
            with_runner(|r| r.product_symbols())
                .into_iter()
                .map(|symbol| JsValue::from_str(&symbol))
                .collect()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_zone_capacity() -> u32 {
            with_runner(|r| r.zone_capacity())
        }
    };
}
