//! Platform abstraction layer
//!
//! The engines are platform-free. Browser builds get `web`, which binds the
//! engines to `wasm_bindgen` handles driven by the page's animation loop and
//! persists high scores and settings in LocalStorage.

#[cfg(target_arch = "wasm32")]
pub mod web;
