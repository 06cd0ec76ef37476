//! Planet Crash - drifting planets that smash into each other
//!
//! Core modules:
//! - `sim`: Body simulation (motion, collisions, explosions, clock)
//! - `engine`: Frame-gated driver owning the world, clock and controls
//! - `render`: Per-frame snapshot handed to a renderer
//! - `settings`: Tunable simulation parameters

pub mod engine;
pub mod render;
pub mod settings;
pub mod sim;

pub use engine::{Command, Engine};
pub use render::{BodyInstance, RenderSnapshot};
pub use settings::{ConfigError, SimConfig};

use glam::Vec3;

/// Simulation configuration constants (defaults for [`SimConfig`])
pub mod consts {
    /// Number of planets created at start
    pub const INITIAL_BODIES: usize = 5;
    /// Planets farther than this from the origin bounce back
    pub const DISTANCE_MAX: f32 = 100.0;
    /// Closest spawn distance from the origin
    pub const SPAWN_DISTANCE_MIN: f32 = 3.0;

    /// Seconds a new body flashes before it can collide
    pub const LOAD_PERIOD: f64 = 1.5;
    /// Opacity change per visibility update while loading
    pub const OPACITY_STEP: f32 = 0.1;
    /// Ticks between random heading changes
    pub const HEADING_CHANGE_PERIOD: u32 = 500;

    /// Bodies at or below this radius are exempt from merge collisions
    pub const MIN_COLLIDABLE_RADIUS: f32 = 1.5;
    /// Smallest random planet radius, always four times the collidable minimum
    pub const SPAWN_RADIUS_MIN: f32 = MIN_COLLIDABLE_RADIUS * 4.0;
    pub const SPAWN_RADIUS_MAX: f32 = 20.0;

    /// Explosion particles shrink by this divisor every tick
    pub const EXPLOSION_SHRINK_RATE: f32 = 1.07;
    /// Distance an explosion particle travels per tick
    pub const EXPLOSION_SPEED: f32 = 0.4;
    /// Explosion particles at or below this radius are removed
    pub const EXPLOSION_MIN_RADIUS: f32 = 0.3;

    /// Appearance ids drawn for planets
    pub const APPEARANCE_MIN: u32 = 1;
    pub const APPEARANCE_MAX: u32 = 32;
    /// Plain white appearance used by explosion particles
    pub const PARTICLE_APPEARANCE: u32 = 37;
    /// Appearances drawn with a ring (saturn, uranus)
    pub const RINGED_APPEARANCES: [u32; 2] = [6, 7];
    /// Ring extends this far past the planet radius
    pub const RING_SIZE: f32 = 5.0;

    /// Fragments (and particles) spawned per destruction
    pub const FRAGMENTS_MIN: u32 = 4;
    pub const FRAGMENTS_MAX: u32 = 6;

    /// Axial tilt range (degrees)
    pub const AXIAL_TILT_MAX: f32 = 180.0;
    /// Spin period range in days; the sign gives the spin direction
    pub const DAY_LENGTH_LIMIT: f32 = 500.0;
    /// Day length used when the random draw lands exactly on zero
    pub const DAY_LENGTH_FALLBACK: f32 = 24.0;
    /// Orbit axis inclination range (degrees)
    pub const INCLINATION_MAX: f32 = 20.0;

    /// Speed factor bounds and default
    pub const SPEED_MIN: f32 = 210.0;
    pub const SPEED_MAX: f32 = 10000.0;
    pub const SPEED_DEFAULT: f32 = 510.0;
    /// Frames between simulation ticks at the default speed
    pub const BASE_UPDATE_RATE: f32 = 100.0;
}

/// Convert a polar angle cosine and azimuth to a unit vector
#[inline]
pub fn unit_from_spherical(cos_theta: f32, phi: f32) -> Vec3 {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Whether the vector has unit length within `eps`
#[cfg(test)]
pub(crate) fn is_unit(v: Vec3, eps: f32) -> bool {
    (v.length() - 1.0).abs() <= eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_spawn_radius_floor_tracks_collidable_minimum() {
        assert_eq!(consts::SPAWN_RADIUS_MIN, consts::MIN_COLLIDABLE_RADIUS * 4.0);
        assert!(consts::SPAWN_RADIUS_MIN < consts::SPAWN_RADIUS_MAX);
        assert!(consts::EXPLOSION_MIN_RADIUS < consts::MIN_COLLIDABLE_RADIUS);
    }

    #[test]
    fn test_unit_from_spherical() {
        let up = unit_from_spherical(1.0, 0.0);
        assert!((up - Vec3::Z).length() < 1e-6);

        let side = unit_from_spherical(0.0, PI / 2.0);
        assert!((side - Vec3::Y).length() < 1e-6);

        for i in 0..16 {
            let c = -1.0 + i as f32 / 8.0;
            assert!(is_unit(unit_from_spherical(c.min(1.0), i as f32), 1e-5));
        }
    }
}
