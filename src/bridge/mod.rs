//! Bridge - the aggregate root of the edit/simulate loop.
//!
//! Refactored for SOLID principles:
//! - Single Responsibility: Bridge only orchestrates, delegates to submodules
//! - Editing gestures live in edit.rs, graph->physics conversion in
//!   convert.rs, the per-frame loop in step.rs, the canned truss in
//!   generator.rs
//!
//! The pin/slab graph is the single source of truth. Entering test mode
//! converts it one-shot into physics bodies and joints; leaving test mode
//! throws the physics world away and resets every pose, the graph survives.

use crate::domain::config::BridgeConfig;
use crate::domain::pin::{Pin, PinId};
use crate::domain::slab::{Slab, SlabPurpose};
use crate::physics::{BodyHandle, PhysicsEngine};
use crate::render::Renderer;

mod convert;
mod edit;
mod generator;
mod step;

/// Edit mode constants mirrored to JS.
pub const EDIT_MODE_SUPPORT: u8 = 0;
pub const EDIT_MODE_STRUCTURE: u8 = 1;
pub const EDIT_MODE_CAR: u8 = 2;

/// Which gesture the next touches perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    /// Two taps place a support beam.
    Support,
    /// Two taps place a structure beam.
    Structure,
    /// One tap drops a debug block (simulation mode only).
    Car,
}

impl EditMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            EDIT_MODE_SUPPORT => Some(EditMode::Support),
            EDIT_MODE_STRUCTURE => Some(EditMode::Structure),
            EDIT_MODE_CAR => Some(EditMode::Car),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            EditMode::Support => EDIT_MODE_SUPPORT,
            EditMode::Structure => EDIT_MODE_STRUCTURE,
            EditMode::Car => EDIT_MODE_CAR,
        }
    }
}

/// Top-level state of the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Building,
    Testing,
}

/// The bridge orchestrator. Owns the graph, the physics engine instance and
/// the ephemeral edit state.
pub struct Bridge<P: PhysicsEngine> {
    config: BridgeConfig,
    physics: P,
    pins: Vec<Pin>,
    slabs: Vec<Slab>,
    /// First pin of an in-progress two-tap beam gesture.
    start_pin: Option<PinId>,
    edit_mode: EditMode,
    /// True iff the physics engine holds a live simulation of the graph.
    running: bool,
    debug_bodies: Vec<BodyHandle>,
}

impl<P: PhysicsEngine> Bridge<P> {
    pub fn new(config: BridgeConfig, physics: P) -> Self {
        Self {
            config,
            physics,
            pins: Vec::new(),
            slabs: Vec::new(),
            start_pin: None,
            edit_mode: EditMode::Structure,
            running: false,
            debug_bodies: Vec::new(),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    pub fn debug_body_count(&self) -> usize {
        self.debug_bodies.len()
    }

    pub fn start_pin(&self) -> Option<PinId> {
        self.start_pin
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Pure data mutation; valid at any time.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        if self.running {
            Mode::Testing
        } else {
            Mode::Building
        }
    }

    /// Seconds per frame from the configured rate; zero degrades physics
    /// advancement to a no-op.
    pub fn timestep(&self) -> f32 {
        self.config.timestep()
    }

    /// Reset to an empty Building-state bridge seeded with three fixed pins
    /// to attach new slabs to.
    pub fn create(&mut self) {
        self.destroy();

        let left = self.add_pin(-20.0, 0.0);
        self.pins[left.index()].fixed = true;
        let right = self.add_pin(20.0, 0.0);
        self.pins[right.index()].fixed = true;
        let lower = self.add_pin(-10.0, -10.0);
        self.pins[lower.index()].fixed = true;
    }

    /// Full teardown: the graph is released on top of the `stop` effects.
    pub fn destroy(&mut self) {
        self.stop();
        self.pins.clear();
        self.slabs.clear();
        self.start_pin = None;
        self.edit_mode = EditMode::Structure;
    }

    /// Swap to simulation mode.
    pub fn start(&mut self) {
        self.stop();
        convert::create_simulation(self);
    }

    /// Stop the simulation, but keep the bridge intact. Idempotent.
    pub fn stop(&mut self) {
        self.physics.destroy_world();
        for slab in &mut self.slabs {
            slab.transform.reset();
            slab.clear_handle();
        }
        for pin in &mut self.pins {
            pin.transform.reset();
            pin.body = None;
        }
        self.debug_bodies.clear();
        self.running = false;
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Find an existing pin within snap tolerance, or `None`.
    pub fn pin_at(&self, x: f32, y: f32) -> Option<PinId> {
        edit::pin_at(self, x, y)
    }

    /// Find-or-create a pin at the given position. New pins are free.
    pub fn add_pin(&mut self, x: f32, y: f32) -> PinId {
        edit::add_pin(self, x, y)
    }

    /// Resolve two pins and hang a new slab between them. Accepts degenerate
    /// zero-length geometry.
    pub fn add_slab(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, purpose: SlabPurpose) -> usize {
        edit::add_slab(self, x1, y1, x2, y2, purpose)
    }

    /// Feed one touch/click in world coordinates into the current edit mode.
    pub fn handle_touch(&mut self, x: f32, y: f32) {
        edit::handle_touch(self, x, y);
    }

    /// Replace the graph with a deterministic half-crosshatch truss.
    pub fn create_test_bridge(&mut self, slab_count: usize, slab_width: f32, support_height: f32) {
        generator::create_test_bridge(self, slab_count, slab_width, support_height);
    }

    /// Advance one frame: physics, read-back, joint failure, draw emission.
    pub fn step<R: Renderer>(&mut self, dt: f32, renderer: &mut R) {
        step::step(self, dt, renderer);
    }
}

#[cfg(test)]
mod tests;
