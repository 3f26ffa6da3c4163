use crate::domain::pin::{Pin, PinId};
use crate::domain::positioning::Positioning;
use crate::physics::{BodyHandle, JointHandle};

/// What a slab is for. Decides which physics primitive and draw routine
/// applies to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlabPurpose {
    /// A support structure, like the wire cables on bridges. Debug bodies do
    /// not collide with these; they snap when overstressed.
    Support,
    /// A solid piece of e.g. road. Debug bodies collide with these.
    Structure,
}

/// The physics-side identity of a slab, tagged by purpose. A structure is a
/// rigid body jointed to its pins; a support is a single flexible joint
/// between the two pin bodies. The handle is `None` outside simulation or
/// after the piece has broken.
#[derive(Clone, Copy, Debug)]
pub enum SlabKind {
    Support { joint: Option<JointHandle> },
    Structure { body: Option<BodyHandle> },
}

/// A beam between two pins. The transform describes the midpoint and the
/// angle of the line from `left` to `right`; `length` is kept separately for
/// rendering.
#[derive(Debug)]
pub struct Slab {
    pub kind: SlabKind,
    pub left: PinId,
    pub right: PinId,
    pub transform: Positioning,
    pub length: f32,
}

impl Slab {
    /// Create a slab between two existing pins. Geometry is derived from the
    /// pins' current positions; a zero-length slab is accepted as-is.
    pub fn new(left_id: PinId, right_id: PinId, left: &Pin, right: &Pin, purpose: SlabPurpose) -> Self {
        let kind = match purpose {
            SlabPurpose::Support => SlabKind::Support { joint: None },
            SlabPurpose::Structure => SlabKind::Structure { body: None },
        };
        let mut slab = Self {
            kind,
            left: left_id,
            right: right_id,
            transform: Positioning::default(),
            length: 0.0,
        };
        slab.recalculate(left, right);
        slab
    }

    pub fn purpose(&self) -> SlabPurpose {
        match self.kind {
            SlabKind::Support { .. } => SlabPurpose::Support,
            SlabKind::Structure { .. } => SlabPurpose::Structure,
        }
    }

    /// Drop the physics-side identity, keeping the purpose tag.
    pub fn clear_handle(&mut self) {
        match &mut self.kind {
            SlabKind::Support { joint } => *joint = None,
            SlabKind::Structure { body } => *body = None,
        }
    }

    /// True while the slab still has a live physics counterpart.
    pub fn has_handle(&self) -> bool {
        match self.kind {
            SlabKind::Support { joint } => joint.is_some(),
            SlabKind::Structure { body } => body.is_some(),
        }
    }

    /// Refresh length, angle and midpoint from the pins' current positions.
    /// Must run once before conversion to simulation, since the two pin rest
    /// poses were set at different times and have to be combined here.
    pub fn recalculate(&mut self, left: &Pin, right: &Pin) {
        let dx = right.transform.x() - left.transform.x();
        let dy = right.transform.y() - left.transform.y();
        let angle = dy.atan2(dx);
        self.length = (dx * dx + dy * dy).sqrt();
        self.transform = Positioning::new(
            left.transform.x() + dx / 2.0,
            left.transform.y() + dy / 2.0,
            angle,
        );
    }
}
