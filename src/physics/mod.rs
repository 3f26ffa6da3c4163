//! Physics capability boundary.
//!
//! The bridge core never talks to a physics engine directly; it only issues
//! the requests below and reads back transforms and joint forces. Everything
//! else - integration, collision, joint solving - belongs to the engine
//! behind this trait. `rapier` is the real implementation; tests substitute
//! a scripted one.

pub mod rapier;

pub use rapier::RapierPhysics;

/// Generation-checked reference to a body inside the physics world.
///
/// Engines mint these from their own body tables; a handle from a destroyed
/// world simply fails to resolve instead of dangling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

/// Generation-checked reference to a joint inside the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointHandle {
    index: u32,
    generation: u32,
}

impl JointHandle {
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

/// The capability the bridge core requires from a rigid-body engine.
///
/// Collision grouping contract: anchors collide with nothing, rigid links
/// collide with debug bodies, debug bodies collide with rigid links and each
/// other. All creation calls return `None` when no world exists.
pub trait PhysicsEngine {
    /// Tear down any existing world and start a fresh one.
    fn create_world(&mut self);

    /// Destroy the world. Idempotent.
    fn destroy_world(&mut self);

    /// Integrate one step. No-op without a world or with a zero timestep.
    fn advance(&mut self, dt: f32);

    /// Point body for a pin, immovable when `fixed`.
    fn create_anchor(&mut self, x: f32, y: f32, fixed: bool) -> Option<BodyHandle>;

    /// Rigid beam body spanning the two anchors, attached to each with a
    /// revolute joint. Length, angle and midpoint are derived from the
    /// anchors' current positions.
    fn create_rigid_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<BodyHandle>;

    /// Single elastic joint directly between the two anchor bodies.
    fn create_flexible_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<JointHandle>;

    /// Free dynamic block used to load-test the bridge.
    fn create_debug_body(&mut self, x: f32, y: f32, mass: f32) -> Option<BodyHandle>;

    /// Current pose of a body, or `None` when the body or world is gone.
    fn read_transform(&self, body: BodyHandle) -> Option<(f32, f32, f32)>;

    /// Reaction force currently on a flexible link. When the force reaches
    /// `threshold` the joint is destroyed, the handle cleared, and the
    /// returned force clamped to the threshold. A cleared handle reports
    /// zero and is never re-queried.
    fn link_force(&mut self, joint: &mut Option<JointHandle>, dt: f32, threshold: f32) -> f32;

    /// Destroy every joint attached to the anchor whose reaction force
    /// exceeds `threshold` (squared comparison, no square root).
    fn prune_anchor_joints(&mut self, body: BodyHandle, dt: f32, threshold: f32);
}
