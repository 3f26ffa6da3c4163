use wasm_bindgen::prelude::*;

use crate::bridge::{Bridge, EditMode, Mode};
use crate::domain::config::BridgeConfig;
use crate::physics::rapier::RapierPhysics;
use crate::render::DrawList;

/// Default test-bridge layout.
const TEST_BRIDGE_SLABS: usize = 5;
const TEST_BRIDGE_SLAB_WIDTH: f32 = 8.0;
const TEST_BRIDGE_SUPPORT_HEIGHT: f32 = 5.0;

#[wasm_bindgen]
pub struct World {
    core: Bridge<RapierPhysics>,
    scene: DrawList,
}

#[wasm_bindgen]
impl World {
    /// Create a world with the default tuning, seeded with the three fixed
    /// bootstrap pins.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(BridgeConfig::default())
    }

    /// Create a world from a config JSON blob (missing fields keep their
    /// defaults).
    #[wasm_bindgen(js_name = newWithConfig)]
    pub fn new_with_config(json: String) -> Result<World, JsValue> {
        let config = BridgeConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: BridgeConfig) -> Self {
        let physics = RapierPhysics::new(&config);
        let mut core = Bridge::new(config, physics);
        core.create();
        Self {
            core,
            scene: DrawList::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.core.running()
    }

    #[wasm_bindgen(getter)]
    pub fn testing(&self) -> bool {
        self.core.mode() == Mode::Testing
    }

    #[wasm_bindgen(getter)]
    pub fn edit_mode(&self) -> u8 {
        self.core.edit_mode().as_u8()
    }

    #[wasm_bindgen(getter)]
    pub fn pin_count(&self) -> usize {
        self.core.pins().len()
    }

    #[wasm_bindgen(getter)]
    pub fn slab_count(&self) -> usize {
        self.core.slabs().len()
    }

    #[wasm_bindgen(getter)]
    pub fn debug_body_count(&self) -> usize {
        self.core.debug_body_count()
    }

    /// Feed one touch/click in world coordinates.
    pub fn handle_touch(&mut self, x: f32, y: f32) {
        self.core.handle_touch(x, y);
    }

    /// Switch the edit gesture; unknown values are ignored.
    pub fn set_edit_mode(&mut self, mode: u8) {
        if let Some(mode) = EditMode::from_u8(mode) {
            self.core.set_edit_mode(mode);
        }
    }

    /// Swap between editing and simulating.
    pub fn toggle_running(&mut self) {
        self.core.toggle_running();
    }

    /// Throw the bridge away and reseed the bootstrap pins.
    pub fn reset_bridge(&mut self) {
        self.core.create();
    }

    /// Replace the graph with the canned truss.
    pub fn create_test_bridge(&mut self) {
        self.core.create_test_bridge(
            TEST_BRIDGE_SLABS,
            TEST_BRIDGE_SLAB_WIDTH,
            TEST_BRIDGE_SUPPORT_HEIGHT,
        );
    }

    /// Advance one frame and record its draw list.
    pub fn step(&mut self) {
        let dt = self.core.timestep();
        self.scene.clear();
        self.core.step(dt, &mut self.scene);
    }

    /// Draw commands of the last stepped frame, as JSON.
    pub fn scene_json(&self) -> String {
        self.scene.to_json()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
