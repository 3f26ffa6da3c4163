use crate::domain::positioning::Positioning;
use crate::physics::BodyHandle;

/// Stable index of a pin inside the bridge's insertion-ordered pin list.
///
/// Pins are never removed individually (only the whole graph is destroyed),
/// so a `PinId` stays valid for the lifetime of the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PinId(pub(crate) usize);

impl PinId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A pin is a join between bridge segments, usually drawn as a dot.
/// Slabs attach to pins; a fixed pin is anchored to the ground and never
/// moves during simulation.
#[derive(Debug)]
pub struct Pin {
    pub transform: Positioning,
    pub fixed: bool,
    /// Body inside the physics world, present only while simulating.
    pub body: Option<BodyHandle>,
}

impl Pin {
    pub fn new(x: f32, y: f32, fixed: bool) -> Self {
        Self {
            transform: Positioning::new(x, y, 0.0),
            fixed,
            body: None,
        }
    }
}
