//! rapier2d-backed implementation of the physics capability.
//!
//! Every swap between edit and simulation mode goes through `destroy_world`
//! and `create_world`, so all sets are rebuilt from scratch - there is no
//! incremental update path.

use rapier2d::prelude::*;

use crate::domain::config::BridgeConfig;
use crate::physics::{BodyHandle, JointHandle, PhysicsEngine};

/// Collision category of debug blocks. Blocks collide with rigid links and
/// with each other.
const GROUP_DEBUG: Group = Group::GROUP_1;
/// Collision category of rigid links (structure slabs).
const GROUP_LINK: Group = Group::GROUP_2;
/// Collision category of anchors. Anchors collide with nothing.
const GROUP_ANCHOR: Group = Group::GROUP_3;

const BODY_DENSITY: f32 = 20.0;
const BODY_FRICTION: f32 = 0.2;

/// One live rapier world: every set the pipeline steps over.
struct World {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
}

impl World {
    fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

pub struct RapierPhysics {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    joint_frequency: f32,
    joint_damping: f32,
    pin_radius: f32,
    slab_half_thickness: f32,
    debug_body_half_extent: f32,
    world: Option<World>,
}

impl RapierPhysics {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            gravity: vector![config.gravity_x, config.gravity_y],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            joint_frequency: config.joint_frequency,
            joint_damping: config.joint_damping,
            pin_radius: config.pin_radius,
            slab_half_thickness: config.slab_half_thickness,
            debug_body_half_extent: config.debug_body_half_extent,
            world: None,
        }
    }

    fn body_handle(handle: BodyHandle) -> RigidBodyHandle {
        let (index, generation) = handle.into_raw_parts();
        RigidBodyHandle::from_raw_parts(index, generation)
    }

    fn joint_handle(handle: JointHandle) -> ImpulseJointHandle {
        let (index, generation) = handle.into_raw_parts();
        ImpulseJointHandle::from_raw_parts(index, generation)
    }

    /// Spring stiffness and damping for the given frequency and damping
    /// ratio, scaled by the reduced mass of the two bodies (a fixed body has
    /// zero mass and drops out).
    fn spring_coefficients(
        frequency: f32,
        damping_ratio: f32,
        mass_a: f32,
        mass_b: f32,
    ) -> (f32, f32) {
        let mass = if mass_a > 0.0 && mass_b > 0.0 {
            mass_a * mass_b / (mass_a + mass_b)
        } else if mass_a > 0.0 {
            mass_a
        } else {
            mass_b
        };
        let omega = 2.0 * std::f32::consts::PI * frequency;
        (mass * omega * omega, 2.0 * mass * damping_ratio * omega)
    }
}

impl PhysicsEngine for RapierPhysics {
    fn create_world(&mut self) {
        self.world = Some(World::new());
    }

    fn destroy_world(&mut self) {
        self.world = None;
    }

    fn advance(&mut self, dt: f32) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if dt <= 0.0 {
            return;
        }

        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut world.islands,
            &mut world.broad_phase,
            &mut world.narrow_phase,
            &mut world.bodies,
            &mut world.colliders,
            &mut world.impulse_joints,
            &mut world.multibody_joints,
            &mut world.ccd_solver,
            &(),
            &(),
        );
    }

    fn create_anchor(&mut self, x: f32, y: f32, fixed: bool) -> Option<BodyHandle> {
        let world = self.world.as_mut()?;

        let builder = if fixed {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let handle = world.bodies.insert(builder.translation(vector![x, y]));

        let collider = ColliderBuilder::ball(self.pin_radius)
            .density(BODY_DENSITY)
            .friction(BODY_FRICTION)
            .collision_groups(InteractionGroups::new(GROUP_ANCHOR, Group::NONE));
        world
            .colliders
            .insert_with_parent(collider, handle, &mut world.bodies);

        let (index, generation) = handle.into_raw_parts();
        Some(BodyHandle::from_raw_parts(index, generation))
    }

    fn create_rigid_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<BodyHandle> {
        let world = self.world.as_mut()?;
        let left = Self::body_handle(left);
        let right = Self::body_handle(right);

        let left_pos = *world.bodies.get(left)?.translation();
        let right_pos = *world.bodies.get(right)?.translation();

        let span = right_pos - left_pos;
        let half_length = span.norm() / 2.0;
        let center = left_pos + span / 2.0;
        let angle = span.y.atan2(span.x);

        let link = world.bodies.insert(
            RigidBodyBuilder::dynamic()
                .translation(center)
                .rotation(angle),
        );
        let collider = ColliderBuilder::cuboid(half_length, self.slab_half_thickness)
            .density(BODY_DENSITY)
            .friction(BODY_FRICTION)
            .collision_groups(InteractionGroups::new(GROUP_LINK, GROUP_DEBUG));
        world
            .colliders
            .insert_with_parent(collider, link, &mut world.bodies);

        // Revolute joints at both ends; in the link's local frame the
        // attachment points sit exactly at +-half_length on the x axis.
        let left_joint = RevoluteJointBuilder::new()
            .local_anchor1(point![0.0, 0.0])
            .local_anchor2(point![-half_length, 0.0]);
        world.impulse_joints.insert(left, link, left_joint, true);

        let right_joint = RevoluteJointBuilder::new()
            .local_anchor1(point![half_length, 0.0])
            .local_anchor2(point![0.0, 0.0]);
        world.impulse_joints.insert(link, right, right_joint, true);

        let (index, generation) = link.into_raw_parts();
        Some(BodyHandle::from_raw_parts(index, generation))
    }

    fn create_flexible_link(&mut self, left: BodyHandle, right: BodyHandle) -> Option<JointHandle> {
        let frequency = self.joint_frequency;
        let damping_ratio = self.joint_damping;
        let world = self.world.as_mut()?;
        let left = Self::body_handle(left);
        let right = Self::body_handle(right);

        let (rest_length, left_mass, right_mass) = {
            let left_body = world.bodies.get(left)?;
            let right_body = world.bodies.get(right)?;
            (
                (right_body.translation() - left_body.translation()).norm(),
                left_body.mass(),
                right_body.mass(),
            )
        };
        let (stiffness, damping) =
            Self::spring_coefficients(frequency, damping_ratio, left_mass, right_mass);

        let spring = SpringJointBuilder::new(rest_length, stiffness, damping);
        let handle = world.impulse_joints.insert(left, right, spring, true);

        let (index, generation) = handle.into_raw_parts();
        Some(JointHandle::from_raw_parts(index, generation))
    }

    fn create_debug_body(&mut self, x: f32, y: f32, mass: f32) -> Option<BodyHandle> {
        let world = self.world.as_mut()?;

        let handle = world
            .bodies
            .insert(RigidBodyBuilder::dynamic().translation(vector![x, y]));
        let half = self.debug_body_half_extent;
        let collider = ColliderBuilder::cuboid(half, half)
            .density(mass)
            .friction(BODY_FRICTION)
            .collision_groups(InteractionGroups::new(GROUP_DEBUG, GROUP_LINK | GROUP_DEBUG));
        world
            .colliders
            .insert_with_parent(collider, handle, &mut world.bodies);

        let (index, generation) = handle.into_raw_parts();
        Some(BodyHandle::from_raw_parts(index, generation))
    }

    fn read_transform(&self, body: BodyHandle) -> Option<(f32, f32, f32)> {
        let world = self.world.as_ref()?;
        let body = world.bodies.get(Self::body_handle(body))?;
        let translation = body.translation();
        Some((translation.x, translation.y, body.rotation().angle()))
    }

    fn link_force(&mut self, joint: &mut Option<JointHandle>, dt: f32, threshold: f32) -> f32 {
        let Some(world) = self.world.as_mut() else {
            return 0.0;
        };
        let Some(handle) = *joint else {
            return 0.0;
        };
        if dt <= 0.0 {
            return 0.0;
        }

        let raw = Self::joint_handle(handle);
        let Some(impulse_joint) = world.impulse_joints.get(raw) else {
            // Already severed from the pin side.
            *joint = None;
            return 0.0;
        };

        let force = impulse_joint.impulses.xy().norm() / dt;
        if force >= threshold {
            world.impulse_joints.remove(raw, true);
            *joint = None;
            return threshold;
        }
        force
    }

    fn prune_anchor_joints(&mut self, body: BodyHandle, dt: f32, threshold: f32) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if dt <= 0.0 {
            return;
        }

        let body = Self::body_handle(body);
        let threshold_squared = threshold * threshold;
        let doomed: Vec<ImpulseJointHandle> = world
            .impulse_joints
            .iter()
            .filter(|(_, j)| j.body1 == body || j.body2 == body)
            .filter(|(_, j)| (j.impulses.xy() / dt).norm_squared() > threshold_squared)
            .map(|(handle, _)| handle)
            .collect();
        for handle in doomed {
            world.impulse_joints.remove(handle, true);
        }
    }
}
