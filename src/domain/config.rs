use serde::{Deserialize, Serialize};

/// Tuning constants for the bridge.
///
/// Most of these are "tweak until it feels right" values with no derivation:
/// the joint frequency and damping decide how bouncy and stiff the bridge is,
/// which in turn decides what the breaking force should be. Defaults carry
/// the tuning the game shipped with; hosts can override them with a JSON
/// blob at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Force a joint can take before it is considered broken.
    pub break_force: f32,
    /// How far a touch may land from a pin and still select it. Caters for
    /// fingers touching "more or less" around an area.
    pub snap_tolerance: f32,
    /// Oscillation frequency of support joints, in Hz.
    pub joint_frequency: f32,
    /// Damping ratio of support joints.
    pub joint_damping: f32,
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// Frames per second the host steps at; non-positive degrades the
    /// timestep to zero (physics stands still, nothing errors).
    pub frame_rate: i32,
    /// How many debug blocks can be dropped onto the bridge.
    pub max_debug_bodies: usize,
    /// Collision radius of a pin body; doubles as its draw radius.
    pub pin_radius: f32,
    /// Half-thickness of a structure slab's collision box.
    pub slab_half_thickness: f32,
    /// Drawn thickness of a structure slab.
    pub slab_draw_thickness: f32,
    /// Half-extent of a debug block (blocks are square).
    pub debug_body_half_extent: f32,
    pub debug_body_mass: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            break_force: 2.5,
            snap_tolerance: 0.5,
            joint_frequency: 15.0,
            joint_damping: 0.5,
            gravity_x: 0.0,
            gravity_y: -10.0,
            frame_rate: 60,
            max_debug_bodies: 100,
            pin_radius: 0.5,
            slab_half_thickness: 0.125,
            slab_draw_thickness: 0.5,
            debug_body_half_extent: 1.0,
            debug_body_mass: 10.0,
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Seconds per frame, or zero when the configured rate is non-positive.
    pub fn timestep(&self) -> f32 {
        if self.frame_rate > 0 {
            1.0 / self.frame_rate as f32
        } else {
            0.0
        }
    }
}
