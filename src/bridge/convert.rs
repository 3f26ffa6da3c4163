use crate::domain::slab::SlabKind;
use crate::physics::PhysicsEngine;

use super::Bridge;

/// Convert the pin/slab graph into physics bodies and joints. Runs exactly
/// once per `start()`, against a freshly recreated world.
///
/// Pins must receive their bodies before any slab is converted: slab
/// conversion needs both endpoint handles to exist already.
pub(super) fn create_simulation<P: PhysicsEngine>(bridge: &mut Bridge<P>) {
    bridge.physics.create_world();

    for pin in &mut bridge.pins {
        pin.transform.reset();
        pin.body = bridge
            .physics
            .create_anchor(pin.transform.x(), pin.transform.y(), pin.fixed);
    }

    for slab in &mut bridge.slabs {
        let left = &bridge.pins[slab.left.index()];
        let right = &bridge.pins[slab.right.index()];
        // Rest positions were set at different edit times; combine them into
        // consistent length/angle/midpoint before handing off.
        slab.recalculate(left, right);

        match (&mut slab.kind, left.body, right.body) {
            (SlabKind::Structure { body }, Some(l), Some(r)) => {
                *body = bridge.physics.create_rigid_link(l, r);
            }
            (SlabKind::Support { joint }, Some(l), Some(r)) => {
                *joint = bridge.physics.create_flexible_link(l, r);
            }
            _ => {}
        }
    }

    bridge.running = true;
}
