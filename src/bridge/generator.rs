use crate::domain::slab::SlabPurpose;
use crate::physics::PhysicsEngine;

use super::Bridge;

/// Build a canned test bridge so nobody has to click one out every time.
///
/// `slab_count` structure segments are laid end to end along the ground
/// line, centered on the origin, with the two extreme pins fixed to the
/// ground. Each segment gets two supports forming a triangle up to its
/// midpoint apex, and from the second segment on the apexes are linked
/// together, giving a half-crosshatch truss.
pub(super) fn create_test_bridge<P: PhysicsEngine>(
    bridge: &mut Bridge<P>,
    slab_count: usize,
    slab_width: f32,
    support_height: f32,
) {
    bridge.destroy();

    let mut left = -slab_width * (slab_count as f32 / 2.0);
    let right_extreme = slab_width * (slab_count as f32 / 2.0);

    let ground_left = bridge.add_pin(left, 0.0);
    bridge.pins[ground_left.index()].fixed = true;
    let ground_right = bridge.add_pin(right_extreme, 0.0);
    bridge.pins[ground_right.index()].fixed = true;

    for index in 0..slab_count {
        let right = left + slab_width;
        let middle = left + (right - left) / 2.0;

        bridge.add_slab(left, 0.0, right, 0.0, SlabPurpose::Structure);
        bridge.add_slab(left, 0.0, middle, support_height, SlabPurpose::Support);
        bridge.add_slab(middle, support_height, right, 0.0, SlabPurpose::Support);
        if index > 0 {
            bridge.add_slab(
                middle,
                support_height,
                middle - slab_width,
                support_height,
                SlabPurpose::Support,
            );
        }

        left += slab_width;
    }
}
