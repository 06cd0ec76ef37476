//! Body and world state
//!
//! A planet and an explosion particle share one [`Body`] record; the
//! [`BodyRole`] decides whether it collides or decays.

use glam::Vec3;

use crate::consts::{LOAD_PERIOD, OPACITY_STEP, RINGED_APPEARANCES};

/// What a body does in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    /// Drifts, bounces, loads in and collides
    Planet,
    /// Decorative explosion debris: flies straight, shrinks, never collides
    Particle,
}

/// One simulated sphere
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub role: BodyRole,
    /// Visual asset category, opaque to the physics
    pub appearance: u32,
    pub radius: f32,
    pub position: Vec3,
    /// Tilt of the spin axis (degrees)
    pub axial_tilt: f32,
    /// Signed spin rate
    pub angular_rate: f32,
    /// Spin axis
    pub orbit_axis: Vec3,
    /// Unit drift direction
    pub heading: Vec3,
    /// Clock time at creation
    pub spawn_time: f64,
    /// Clock time last seen by the visibility loader
    pub load_elapsed: f64,
    pub load_period: f64,
    /// Finished loading; only loaded bodies collide
    pub is_loaded: bool,
    /// Brightness factor in [0, 1]
    pub opacity: f32,
    /// Signed opacity change applied per visibility update
    pub opacity_step: f32,
    /// Ticks since the last heading change
    pub heading_change_counter: u32,
}

impl Body {
    /// A freshly spawned, still loading body
    pub fn new(role: BodyRole, appearance: u32, radius: f32, position: Vec3, spawn_time: f64) -> Self {
        Self {
            role,
            appearance,
            radius,
            position,
            axial_tilt: 0.0,
            angular_rate: 0.0,
            orbit_axis: Vec3::Y,
            heading: Vec3::X,
            spawn_time,
            load_elapsed: 0.0,
            load_period: LOAD_PERIOD,
            is_loaded: false,
            opacity: 1.0,
            opacity_step: -OPACITY_STEP,
            heading_change_counter: 0,
        }
    }

    #[cfg(test)]
    pub fn is_particle(&self) -> bool {
        self.role == BodyRole::Particle
    }

    /// Above the merge-collision threshold
    #[inline]
    pub fn is_collidable(&self, min_collidable_radius: f32) -> bool {
        self.radius > min_collidable_radius
    }

    /// Whether the renderer draws a ring around this body
    pub fn has_ring(&self) -> bool {
        RINGED_APPEARANCES.contains(&self.appearance)
    }

    /// Spin angle at `time` for the given clock speed factor
    pub fn spin_angle(&self, time: f64, speed_factor: f32) -> f32 {
        (time * (self.angular_rate * speed_factor) as f64) as f32
    }
}

/// Everything alive in the simulation
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Planets and fragments (collide)
    pub bodies: Vec<Body>,
    /// Explosion particles (decorative)
    pub particles: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.particles.is_empty()
    }

    /// Number of bodies that finished loading
    pub fn loaded_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_loaded).count()
    }

    /// Remove every body at or below the merge threshold, returning how many went
    pub fn remove_small_bodies(&mut self, min_collidable_radius: f32) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.is_collidable(min_collidable_radius));
        before - self.bodies.len()
    }
}
