#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Portfolio site front end: the WebGL navigation menu, the work history
//! page and the landing page emblem.
//!
//! Everything outside `wasm` is plain Rust and runs under host `cargo test`;
//! the `wasm` module wires it to the DOM and WebGL2.

pub mod animator;
pub mod circular;
pub mod colour;
pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod pointer;
pub mod shaders;
pub mod toggle;
pub mod work;

pub use animator::{NavAnimator, NavPhase, PointerKind};
pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use toggle::{NavSignal, ToggleController};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod host;
    mod navigation;
    mod pages;
    mod render;
    pub mod toggle;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        pages::start_emblem(&document)?;
        pages::start_work(&document)?;

        if let Some(control) = toggle::find_control(&document)? {
            let nav = document.query_selector(".main-nav")?;
            toggle::start(control, nav)?;
        }
        Ok(())
    }
}
