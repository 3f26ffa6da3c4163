use std::collections::HashMap;

use super::*;
use crate::physics::JointHandle;
use crate::render::{DrawCommand, DrawList};

/// What the fake engine was asked to create, in call order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FakeEvent {
    Anchor,
    RigidLink,
    FlexibleLink,
    DebugBody,
}

/// Scripted in-memory physics engine. Bodies drift by a fixed offset per
/// advance; every flexible link reports one scripted force value.
#[derive(Default)]
struct FakePhysics {
    world_alive: bool,
    generation: u32,
    next_index: u32,
    bodies: HashMap<BodyHandle, (f32, f32, f32, bool)>,
    joints: HashMap<JointHandle, (BodyHandle, BodyHandle)>,
    events: Vec<FakeEvent>,
    advances: Vec<f32>,
    drift: (f32, f32),
    support_force: f32,
    anchor_force: f32,
    link_force_queries: usize,
    anchor_prune_calls: usize,
}

impl FakePhysics {
    fn mint_body(&mut self, x: f32, y: f32, angle: f32, fixed: bool) -> BodyHandle {
        let handle = BodyHandle::from_raw_parts(self.next_index, self.generation);
        self.next_index += 1;
        self.bodies.insert(handle, (x, y, angle, fixed));
        handle
    }
}

impl PhysicsEngine for FakePhysics {
    fn create_world(&mut self) {
        self.world_alive = true;
        self.generation += 1;
        self.bodies.clear();
        self.joints.clear();
    }

    fn destroy_world(&mut self) {
        self.world_alive = false;
        self.bodies.clear();
        self.joints.clear();
    }

    fn advance(&mut self, dt: f32) {
        if !self.world_alive || dt <= 0.0 {
            return;
        }
        self.advances.push(dt);
        let (dx, dy) = self.drift;
        for (_, (x, y, _, fixed)) in self.bodies.iter_mut() {
            if !*fixed {
                *x += dx;
                *y += dy;
            }
        }
    }

    fn create_anchor(&mut self, x: f32, y: f32, fixed: bool) -> Option<BodyHandle> {
        if !self.world_alive {
            return None;
        }
        self.events.push(FakeEvent::Anchor);
        Some(self.mint_body(x, y, 0.0, fixed))
    }

    fn create_rigid_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<BodyHandle> {
        if !self.world_alive {
            return None;
        }
        let &(lx, ly, _, _) = self.bodies.get(&left)?;
        let &(rx, ry, _, _) = self.bodies.get(&right)?;
        self.events.push(FakeEvent::RigidLink);
        let angle = (ry - ly).atan2(rx - lx);
        Some(self.mint_body((lx + rx) / 2.0, (ly + ry) / 2.0, angle, false))
    }

    fn create_flexible_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<JointHandle> {
        if !self.world_alive {
            return None;
        }
        self.events.push(FakeEvent::FlexibleLink);
        let handle = JointHandle::from_raw_parts(self.next_index, self.generation);
        self.next_index += 1;
        self.joints.insert(handle, (left, right));
        Some(handle)
    }

    fn create_debug_body(&mut self, x: f32, y: f32, _mass: f32) -> Option<BodyHandle> {
        if !self.world_alive {
            return None;
        }
        self.events.push(FakeEvent::DebugBody);
        Some(self.mint_body(x, y, 0.0, false))
    }

    fn read_transform(&self, body: BodyHandle) -> Option<(f32, f32, f32)> {
        if !self.world_alive {
            return None;
        }
        self.bodies.get(&body).map(|&(x, y, angle, _)| (x, y, angle))
    }

    fn link_force(&mut self, joint: &mut Option<JointHandle>, dt: f32, threshold: f32) -> f32 {
        if !self.world_alive || dt <= 0.0 {
            return 0.0;
        }
        let Some(handle) = *joint else {
            return 0.0;
        };
        self.link_force_queries += 1;
        if !self.joints.contains_key(&handle) {
            *joint = None;
            return 0.0;
        }
        if self.support_force >= threshold {
            self.joints.remove(&handle);
            *joint = None;
            return threshold;
        }
        self.support_force
    }

    fn prune_anchor_joints(&mut self, body: BodyHandle, dt: f32, threshold: f32) {
        if !self.world_alive || dt <= 0.0 {
            return;
        }
        self.anchor_prune_calls += 1;
        if self.anchor_force * self.anchor_force > threshold * threshold {
            self.joints.retain(|_, &mut (a, b)| a != body && b != body);
        }
    }
}

fn empty_bridge() -> Bridge<FakePhysics> {
    Bridge::new(BridgeConfig::default(), FakePhysics::default())
}

fn dt() -> f32 {
    BridgeConfig::default().timestep()
}

#[test]
fn add_pin_snaps_onto_existing_pin() {
    let mut bridge = empty_bridge();
    let a = bridge.add_pin(1.0, 1.0);
    // Within 0.5 on both axes: same pin, no new allocation.
    let b = bridge.add_pin(1.4, 0.7);
    assert_eq!(a, b);
    assert_eq!(bridge.pins().len(), 1);

    // 0.6 away on x: outside tolerance, new pin.
    let c = bridge.add_pin(1.6, 1.0);
    assert_ne!(a, c);
    assert_eq!(bridge.pins().len(), 2);
}

#[test]
fn create_seeds_three_fixed_bootstrap_pins() {
    let mut bridge = empty_bridge();
    bridge.create();
    assert_eq!(bridge.pins().len(), 3);
    assert!(bridge.pins().iter().all(|p| p.fixed));
    assert!(bridge.slabs().is_empty());
    assert!(!bridge.running());
    assert_eq!(bridge.mode(), Mode::Building);
}

#[test]
fn recalculate_derives_length_angle_midpoint() {
    let mut bridge = empty_bridge();
    bridge.add_slab(0.0, 0.0, 3.0, 4.0, SlabPurpose::Structure);

    let slab = &bridge.slabs()[0];
    assert!((slab.length - 5.0).abs() < 1e-6);
    assert!((slab.transform.angle() - 4.0_f32.atan2(3.0)).abs() < 1e-6);
    assert!((slab.transform.x() - 1.5).abs() < 1e-6);
    assert!((slab.transform.y() - 2.0).abs() < 1e-6);
}

#[test]
fn zero_length_slab_is_accepted() {
    let mut bridge = empty_bridge();
    bridge.add_slab(2.0, 2.0, 2.0, 2.0, SlabPurpose::Support);
    assert_eq!(bridge.slabs().len(), 1);
    assert_eq!(bridge.pins().len(), 1);
    assert_eq!(bridge.slabs()[0].length, 0.0);
}

#[test]
fn first_tap_on_empty_space_is_a_no_op() {
    let mut bridge = empty_bridge();
    bridge.set_edit_mode(EditMode::Structure);
    bridge.handle_touch(5.0, 5.0);
    assert!(bridge.pins().is_empty());
    assert!(bridge.start_pin().is_none());
}

#[test]
fn two_tap_gesture_creates_one_slab() {
    let mut bridge = empty_bridge();
    let a = bridge.add_pin(0.0, 0.0);

    bridge.set_edit_mode(EditMode::Support);
    bridge.handle_touch(0.2, -0.1);
    assert_eq!(bridge.start_pin(), Some(a));

    bridge.handle_touch(6.0, 0.0);
    assert_eq!(bridge.pins().len(), 2);
    assert_eq!(bridge.slabs().len(), 1);
    assert_eq!(bridge.slabs()[0].purpose(), SlabPurpose::Support);
    assert_eq!(bridge.slabs()[0].left, a);
    assert!(bridge.start_pin().is_none());
}

#[test]
fn tapping_the_start_pin_again_cancels_the_gesture() {
    let mut bridge = empty_bridge();
    bridge.add_pin(0.0, 0.0);

    bridge.set_edit_mode(EditMode::Structure);
    bridge.handle_touch(0.0, 0.0);
    assert!(bridge.start_pin().is_some());

    bridge.handle_touch(0.1, 0.1);
    assert!(bridge.start_pin().is_none());
    assert!(bridge.slabs().is_empty());
    assert_eq!(bridge.pins().len(), 1);
}

#[test]
fn car_mode_only_works_while_running_and_below_capacity() {
    let config = BridgeConfig {
        max_debug_bodies: 2,
        ..BridgeConfig::default()
    };
    let mut bridge = Bridge::new(config, FakePhysics::default());
    bridge.create();
    bridge.set_edit_mode(EditMode::Car);

    // Not running: silently ignored.
    bridge.handle_touch(0.0, 5.0);
    assert_eq!(bridge.debug_body_count(), 0);

    bridge.start();
    bridge.handle_touch(0.0, 5.0);
    bridge.handle_touch(1.0, 5.0);
    bridge.handle_touch(2.0, 5.0); // over capacity, swallowed
    assert_eq!(bridge.debug_body_count(), 2);
}

#[test]
fn conversion_creates_anchors_before_links() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Structure);
    bridge.add_slab(-4.0, 0.0, 0.0, 5.0, SlabPurpose::Support);

    bridge.start();
    assert!(bridge.running());
    assert_eq!(bridge.mode(), Mode::Testing);
    assert!(bridge.pins().iter().all(|p| p.body.is_some()));
    assert!(bridge.slabs().iter().all(|s| s.has_handle()));

    let events = &bridge.physics.events;
    let last_anchor = events.iter().rposition(|e| *e == FakeEvent::Anchor).unwrap();
    let first_link = events
        .iter()
        .position(|e| matches!(e, FakeEvent::RigidLink | FakeEvent::FlexibleLink))
        .unwrap();
    assert!(last_anchor < first_link);
}

#[test]
fn stop_resets_every_pose_and_clears_handles() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Structure);
    bridge.start();
    bridge.physics.drift = (0.0, -1.0);

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(bridge.pins().iter().any(|p| !p.transform.is_at_rest()));

    bridge.stop();
    assert!(!bridge.running());
    assert!(bridge.pins().iter().all(|p| p.transform.is_at_rest()));
    assert!(bridge.slabs().iter().all(|s| s.transform.is_at_rest()));
    assert!(bridge.pins().iter().all(|p| p.body.is_none()));
    assert!(bridge.slabs().iter().all(|s| !s.has_handle()));
    assert_eq!(bridge.debug_body_count(), 0);
}

#[test]
fn start_stop_start_is_non_destructive() {
    let mut bridge = empty_bridge();
    bridge.create_test_bridge(3, 8.0, 5.0);
    let pins_before = bridge.pins().len();
    let slabs_before = bridge.slabs().len();
    let rest_before: Vec<(f32, f32)> = bridge
        .pins()
        .iter()
        .map(|p| (p.transform.x(), p.transform.y()))
        .collect();

    bridge.start();
    bridge.physics.drift = (0.5, -0.5);
    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    bridge.stop();
    bridge.start();

    assert_eq!(bridge.pins().len(), pins_before);
    assert_eq!(bridge.slabs().len(), slabs_before);
    let rest_after: Vec<(f32, f32)> = bridge
        .pins()
        .iter()
        .map(|p| (p.transform.x(), p.transform.y()))
        .collect();
    assert_eq!(rest_before, rest_after);
}

#[test]
fn overstressed_support_breaks_on_the_detecting_step() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();
    bridge.physics.support_force = 3.0; // threshold is 2.5

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(!bridge.slabs()[0].has_handle());
    assert_eq!(bridge.physics.link_force_queries, 1);

    // The joint is gone; later frames must not query it again.
    bridge.step(dt(), &mut scene);
    bridge.step(dt(), &mut scene);
    assert_eq!(bridge.physics.link_force_queries, 1);
}

#[test]
fn broken_support_is_hidden_while_running_but_drawn_in_edit_mode() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();
    bridge.physics.support_force = 3.0;

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(!scene
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Line { .. })));

    bridge.stop();
    scene.clear();
    bridge.step(dt(), &mut scene);
    // Never-simulated state draws the support relaxed (pure white).
    assert!(scene
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Line { color: 0xFFFFFF, .. })));
}

#[test]
fn support_color_fades_with_stress() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();
    bridge.physics.support_force = 1.25; // half the breaking force

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(bridge.slabs()[0].has_handle());
    let line_color = scene
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::Line { color, .. } => Some(*color),
            _ => None,
        })
        .unwrap();
    // stress 0.5: red stays 255, green/blue fade to 127.
    assert_eq!(line_color, 0xFF7F7F);
}

#[test]
fn every_simulated_pin_gets_pruned_each_frame() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 0.0, 5.0, SlabPurpose::Support);
    bridge.add_slab(0.0, 5.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert_eq!(bridge.physics.anchor_prune_calls, bridge.pins().len());
}

#[test]
fn support_severed_at_the_pin_clears_its_handle_without_rebreaking() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();
    bridge.physics.anchor_force = 50.0; // far past the pin-side limit

    // Frame 1: the support samples fine, then the pin prune kills the joint.
    // The slab is left holding a stale handle.
    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(bridge.physics.joints.is_empty());
    assert!(bridge.slabs()[0].has_handle());
    assert_eq!(bridge.physics.link_force_queries, 1);

    // Frame 2: the sample notices the joint is gone and clears the handle
    // without breaking anything again.
    bridge.step(dt(), &mut scene);
    assert!(!bridge.slabs()[0].has_handle());
    assert_eq!(bridge.physics.link_force_queries, 2);

    // Frame 3: a cleared handle is never re-queried.
    bridge.step(dt(), &mut scene);
    assert_eq!(bridge.physics.link_force_queries, 2);
}

#[test]
fn structure_read_back_follows_the_physics_body() {
    let mut bridge = empty_bridge();
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Structure);
    bridge.start();
    bridge.physics.drift = (0.0, -2.0);

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);

    let slab = &bridge.slabs()[0];
    assert!((slab.transform.y() - -2.0).abs() < 1e-6);
    assert!(scene.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Box { cy, .. } if (*cy - -2.0).abs() < 1e-6
    )));
}

#[test]
fn zero_timestep_advances_and_breaks_nothing() {
    let config = BridgeConfig {
        frame_rate: 0,
        ..BridgeConfig::default()
    };
    let mut bridge = Bridge::new(config, FakePhysics::default());
    bridge.add_slab(-4.0, 0.0, 4.0, 0.0, SlabPurpose::Support);
    bridge.start();
    bridge.physics.support_force = 100.0;

    let dt = bridge.timestep();
    assert_eq!(dt, 0.0);
    let mut scene = DrawList::new();
    bridge.step(dt, &mut scene);

    assert!(bridge.physics.advances.is_empty());
    assert!(bridge.slabs()[0].has_handle());
}

#[test]
fn test_bridge_layout_matches_the_expected_truss() {
    let mut bridge = empty_bridge();
    bridge.create(); // pre-existing graph must be replaced
    bridge.create_test_bridge(5, 8.0, 5.0);

    // 6 ground-line pins plus 5 apexes.
    assert_eq!(bridge.pins().len(), 11);
    let fixed: Vec<_> = bridge.pins().iter().filter(|p| p.fixed).collect();
    assert_eq!(fixed.len(), 2);

    let structures = bridge
        .slabs()
        .iter()
        .filter(|s| s.purpose() == SlabPurpose::Structure)
        .count();
    let supports = bridge
        .slabs()
        .iter()
        .filter(|s| s.purpose() == SlabPurpose::Support)
        .count();
    assert_eq!(structures, 5);
    assert_eq!(supports, 5 * 2 + 4);

    // Centered on the origin: extremes at +-20.
    let xs: Vec<f32> = bridge.pins().iter().map(|p| p.transform.x()).collect();
    assert!(xs.iter().any(|&x| (x - -20.0).abs() < 1e-6));
    assert!(xs.iter().any(|&x| (x - 20.0).abs() < 1e-6));
}

#[test]
fn mode_overlay_text_tracks_the_state_machine() {
    let mut bridge = empty_bridge();
    bridge.create();

    let mut scene = DrawList::new();
    bridge.step(dt(), &mut scene);
    assert!(scene.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Text { text, .. } if text == "Editing Mode"
    )));

    bridge.start();
    scene.clear();
    bridge.step(dt(), &mut scene);
    assert!(scene.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Text { text, .. } if text == "Simulation Mode"
    )));
}

#[test]
fn destroy_releases_the_graph_and_resets_edit_state() {
    let mut bridge = empty_bridge();
    bridge.create_test_bridge(3, 8.0, 5.0);
    bridge.set_edit_mode(EditMode::Car);
    bridge.start();

    bridge.destroy();
    assert!(bridge.pins().is_empty());
    assert!(bridge.slabs().is_empty());
    assert!(!bridge.running());
    assert_eq!(bridge.edit_mode(), EditMode::Structure);
    assert!(bridge.start_pin().is_none());
}
