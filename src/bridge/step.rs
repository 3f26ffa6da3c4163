use crate::domain::slab::SlabKind;
use crate::physics::PhysicsEngine;
use crate::render::{Color, Renderer};

use super::{Bridge, EditMode};

const STRUCTURE_COLOR: Color = 0x0000FF;
const PIN_COLOR: Color = 0x999999;
const DEBUG_BODY_COLOR: Color = 0xFFFFFF;
const TEXT_COLOR: Color = 0xFFFFFF;
const HINT_COLOR: Color = 0x888888;

/// One frame: advance the engine, read back transforms, apply joint failure,
/// emit draw commands. Nothing in here propagates errors - a missing handle
/// means "already destroyed" and is silently skipped.
pub(super) fn step<P: PhysicsEngine, R: Renderer>(bridge: &mut Bridge<P>, dt: f32, renderer: &mut R) {
    bridge.physics.advance(dt);

    let break_force = bridge.config.break_force;

    for slab in &mut bridge.slabs {
        match &mut slab.kind {
            // Structures follow their physics body and draw as boxes.
            SlabKind::Structure { body } => {
                if let Some(handle) = *body {
                    if let Some((x, y, angle)) = bridge.physics.read_transform(handle) {
                        slab.transform.set(x, y, angle);
                    }
                }
                renderer.draw_box(
                    slab.transform.x(),
                    slab.transform.y(),
                    slab.length,
                    bridge.config.slab_draw_thickness,
                    slab.transform.angle(),
                    STRUCTURE_COLOR,
                );
            }
            // Supports draw as lines between their two pins, tinted red as
            // the joint approaches the breaking force. The force query also
            // severs the joint when it is over the limit, clearing the
            // handle so the next frames skip it.
            SlabKind::Support { joint } => {
                let force = bridge.physics.link_force(joint, dt, break_force);
                let stress = force / break_force;

                // A broken support disappears, but only while simulating; in
                // edit mode every support is visible.
                if !bridge.running || joint.is_some() {
                    let fade = (255.0 - stress * 255.0).clamp(0.0, 255.0) as u32;
                    let color = (0xFF << 16) | (fade << 8) | fade;
                    let left = &bridge.pins[slab.left.index()];
                    let right = &bridge.pins[slab.right.index()];
                    renderer.draw_line(
                        left.transform.x(),
                        left.transform.y(),
                        right.transform.x(),
                        right.transform.y(),
                        color,
                    );
                }
            }
        }
    }

    // Pins prune their own joints independently of the support check above,
    // so a beam can be severed from either side.
    for pin in &mut bridge.pins {
        if let Some(handle) = pin.body {
            bridge.physics.prune_anchor_joints(handle, dt, break_force);
            if let Some((x, y, angle)) = bridge.physics.read_transform(handle) {
                pin.transform.set(x, y, angle);
            }
        }
        renderer.draw_circle(
            pin.transform.x(),
            pin.transform.y(),
            bridge.config.pin_radius,
            PIN_COLOR,
        );
    }

    if bridge.running {
        let size = bridge.config.debug_body_half_extent * 2.0;
        for &handle in &bridge.debug_bodies {
            if let Some((x, y, angle)) = bridge.physics.read_transform(handle) {
                renderer.draw_box(x, y, size, size, angle, DEBUG_BODY_COLOR);
            }
        }
        renderer.draw_text(10.0, 10.0, "Simulation Mode", TEXT_COLOR);
    } else {
        renderer.draw_text(10.0, 10.0, "Editing Mode", TEXT_COLOR);
    }
    renderer.draw_text(20.0, 20.0, "(toggle with SPACE)", HINT_COLOR);

    let mode_text = match bridge.edit_mode {
        EditMode::Support => "Adding support beams",
        EditMode::Structure => "Adding structure beams",
        EditMode::Car => "Adding debug blocks (simulation mode only)",
    };
    renderer.draw_text(10.0, 40.0, mode_text, TEXT_COLOR);
    renderer.draw_text(
        20.0,
        50.0,
        "(press 1 for support, 2 for structure, 3 for blocks)",
        HINT_COLOR,
    );
    renderer.draw_text(
        10.0,
        70.0,
        "(Also press R to reset the bridge, and T to generate a test bridge)",
        HINT_COLOR,
    );
}
