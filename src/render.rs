//! Render-facing snapshot
//!
//! The simulation never draws anything. Each frame it hands the renderer a
//! flat list of instances ready for upload as a GPU instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::sim::Body;

/// Per-body transform data for one draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: Vec3,
    pub radius: f32,
    /// Axis the body spins around
    pub spin_axis: Vec3,
    /// `time * angular_rate * speed_factor`
    pub spin_angle: f32,
    /// Degrees
    pub axial_tilt: f32,
    /// Brightness factor, flashes while loading
    pub opacity: f32,
    pub appearance: u32,
    /// Outer ring scale, zero for bodies without a ring
    pub ring_scale: f32,
}

impl BodyInstance {
    /// Instance for a planet at `time`
    pub fn planet(body: &Body, time: f64, speed_factor: f32, ring_size: f32) -> Self {
        Self {
            position: body.position,
            radius: body.radius,
            spin_axis: body.orbit_axis,
            spin_angle: body.spin_angle(time, speed_factor),
            axial_tilt: body.axial_tilt,
            opacity: body.opacity,
            appearance: body.appearance,
            ring_scale: if body.has_ring() {
                body.radius + ring_size
            } else {
                0.0
            },
        }
    }

    /// Instance for an explosion particle (no spin, always fully lit)
    pub fn particle(body: &Body) -> Self {
        Self {
            position: body.position,
            radius: body.radius,
            spin_axis: body.orbit_axis,
            spin_angle: 0.0,
            axial_tilt: body.axial_tilt,
            opacity: 1.0,
            appearance: body.appearance,
            ring_scale: 0.0,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct RenderSnapshot {
    /// Clock time the snapshot was taken at
    pub time: f64,
    pub speed_factor: f32,
    pub bodies: Vec<BodyInstance>,
    pub particles: Vec<BodyInstance>,
    /// Radius of the bounding shell when hitbox display is on
    pub hitbox_radius: Option<f32>,
}

impl RenderSnapshot {
    /// Planet instances as raw bytes
    pub fn body_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bodies)
    }

    /// Particle instances as raw bytes
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn instance_count(&self) -> usize {
        self.bodies.len() + self.particles.len()
    }
}
