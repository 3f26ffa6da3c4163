use crate::domain::pin::{Pin, PinId};
use crate::domain::slab::{Slab, SlabPurpose};
use crate::physics::PhysicsEngine;

use super::{Bridge, EditMode};

/// Pin lookup with the configured touch tolerance. The test is per-axis,
/// matching how a finger lands "more or less" around an area on a screen.
pub(super) fn pin_at<P: PhysicsEngine>(bridge: &Bridge<P>, x: f32, y: f32) -> Option<PinId> {
    let tolerance = bridge.config.snap_tolerance;
    bridge
        .pins
        .iter()
        .position(|pin| {
            (pin.transform.x() - x).abs() <= tolerance && (pin.transform.y() - y).abs() <= tolerance
        })
        .map(PinId)
}

/// Snap onto an existing pin if one is close enough, otherwise append a new
/// free pin. This is what makes the second tap of a beam gesture land
/// exactly on a prior pin.
pub(super) fn add_pin<P: PhysicsEngine>(bridge: &mut Bridge<P>, x: f32, y: f32) -> PinId {
    if let Some(id) = pin_at(bridge, x, y) {
        return id;
    }

    bridge.pins.push(Pin::new(x, y, false));
    PinId(bridge.pins.len() - 1)
}

/// Resolve both endpoints through `add_pin`, then append a slab of the given
/// purpose between them. Zero-length slabs are accepted, not rejected.
pub(super) fn add_slab<P: PhysicsEngine>(
    bridge: &mut Bridge<P>,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    purpose: SlabPurpose,
) -> usize {
    let left = add_pin(bridge, x1, y1);
    let right = add_pin(bridge, x2, y2);

    let slab = Slab::new(
        left,
        right,
        &bridge.pins[left.index()],
        &bridge.pins[right.index()],
        purpose,
    );
    bridge.slabs.push(slab);
    bridge.slabs.len() - 1
}

pub(super) fn handle_touch<P: PhysicsEngine>(bridge: &mut Bridge<P>, x: f32, y: f32) {
    match bridge.edit_mode {
        EditMode::Car => {
            // Only meaningful with a live world, and the block buffer is a
            // fixed-capacity list; a full buffer swallows the touch.
            if bridge.running && bridge.debug_bodies.len() < bridge.config.max_debug_bodies {
                let mass = bridge.config.debug_body_mass;
                if let Some(handle) = bridge.physics.create_debug_body(x, y, mass) {
                    bridge.debug_bodies.push(handle);
                }
            }
        }
        EditMode::Structure | EditMode::Support => match bridge.start_pin {
            None => {
                // First tap only selects; a tap on empty space does not
                // start a beam.
                bridge.start_pin = pin_at(bridge, x, y);
            }
            Some(start) => {
                let pin = add_pin(bridge, x, y);
                if pin != start {
                    let purpose = if bridge.edit_mode == EditMode::Structure {
                        SlabPurpose::Structure
                    } else {
                        SlabPurpose::Support
                    };
                    let (x1, y1) = {
                        let p = &bridge.pins[start.index()];
                        (p.transform.x(), p.transform.y())
                    };
                    let (x2, y2) = {
                        let p = &bridge.pins[pin.index()];
                        (p.transform.x(), p.transform.y())
                    };
                    add_slab(bridge, x1, y1, x2, y2, purpose);
                }
                bridge.start_pin = None;
            }
        },
    }
}
