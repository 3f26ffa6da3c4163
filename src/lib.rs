//! Trestle Engine - bridge construction and stress testing in WASM
//!
//! Architecture:
//! - domain/   - Graph entities (pins, slabs, poses) and tuning config
//! - physics/  - Physics capability boundary + rapier2d implementation
//! - render/   - Draw-command surface consumed by the host renderer
//! - bridge/   - Orchestration only: editing, conversion, per-frame step
//! - api/      - Public WASM API

pub mod domain;
pub mod physics;
pub mod render;
pub mod bridge;
pub mod api;

// Compatibility re-exports (keeps external paths short)
pub use bridge::{Bridge, EditMode, Mode};
pub use domain::config::BridgeConfig;
pub use domain::pin::{Pin, PinId};
pub use domain::positioning::Positioning;
pub use domain::slab::{Slab, SlabKind, SlabPurpose};
pub use physics::rapier::RapierPhysics;
pub use physics::{BodyHandle, JointHandle, PhysicsEngine};
pub use render::{DrawCommand, DrawList, Renderer};

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Trestle WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::World;

// Export edit mode constants for JS
#[wasm_bindgen]
pub fn mode_support() -> u8 { bridge::EDIT_MODE_SUPPORT }
#[wasm_bindgen]
pub fn mode_structure() -> u8 { bridge::EDIT_MODE_STRUCTURE }
#[wasm_bindgen]
pub fn mode_car() -> u8 { bridge::EDIT_MODE_CAR }
