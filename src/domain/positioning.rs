/// A 2D pose: position plus rotation angle (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Pose {
    x: f32,
    y: f32,
    angle: f32,
}

/// Dual-state pose of a bridge piece: the edit-time `rest` pose and the
/// `current` pose the physics engine writes back every frame.
///
/// Accessors always return the current values, so drawing and geometry code
/// never needs to know whether the bridge is being edited or simulated.
/// `reset()` restores the edit-time values on teardown.
///
/// Invariant: `current == rest` whenever the bridge is not running.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Positioning {
    rest: Pose,
    current: Pose,
}

impl Positioning {
    /// Create a pose with both rest and current set to the given values.
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        let pose = Pose { x, y, angle };
        Self {
            rest: pose,
            current: pose,
        }
    }

    /// Overwrite only the current pose (physics read-back).
    pub fn set(&mut self, x: f32, y: f32, angle: f32) {
        self.current = Pose { x, y, angle };
    }

    /// Copy the rest pose back into the current pose.
    pub fn reset(&mut self) {
        self.current = self.rest;
    }

    pub fn x(&self) -> f32 {
        self.current.x
    }

    pub fn y(&self) -> f32 {
        self.current.y
    }

    pub fn angle(&self) -> f32 {
        self.current.angle
    }

    /// True when the current pose still equals the rest pose.
    pub fn is_at_rest(&self) -> bool {
        self.current == self.rest
    }
}
