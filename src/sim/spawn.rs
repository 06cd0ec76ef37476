//! Random body parameters and spawning
//!
//! All randomness in the simulation goes through [`Spawner`]. It seeds from the
//! OS unless the config pins a seed.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Body, BodyRole};
use crate::consts::*;
use crate::settings::SimConfig;
use crate::unit_from_spherical;

/// Draws body attributes and builds new bodies
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    radius_min: f32,
    radius_max: f32,
    distance_max: f32,
    load_period: f64,
}

impl Spawner {
    pub fn new(config: &SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_os_rng(),
        };
        Self {
            rng,
            radius_min: config.spawn_radius_min(),
            radius_max: config.spawn_radius_max,
            distance_max: config.distance_max,
            load_period: config.load_period,
        }
    }

    /// Planet texture category in [1, 32]
    pub fn appearance(&mut self) -> u32 {
        self.rng.random_range(APPEARANCE_MIN..=APPEARANCE_MAX)
    }

    /// Planet radius in [4 x min collidable radius, max]
    pub fn radius(&mut self) -> f32 {
        self.rng.random_range(self.radius_min..=self.radius_max)
    }

    /// Uniform random unit vector
    pub fn heading(&mut self) -> Vec3 {
        let cos_theta: f32 = self.rng.random_range(-1.0..=1.0);
        let phi: f32 = self.rng.random_range(0.0..std::f32::consts::TAU);
        unit_from_spherical(cos_theta, phi)
    }

    /// Point on a sphere shell of random radius in [3, distance max]
    pub fn position(&mut self) -> Vec3 {
        let distance = self.rng.random_range(SPAWN_DISTANCE_MIN..=self.distance_max);
        self.heading() * distance
    }

    /// Axial tilt in degrees, [0, 180]
    pub fn axial_tilt(&mut self) -> f32 {
        self.rng.random_range(0.0..=AXIAL_TILT_MAX)
    }

    /// Spin rate as the inverse of a signed day length in [-500, 500]
    pub fn angular_rate(&mut self) -> f32 {
        let days = self.rng.random_range(-DAY_LENGTH_LIMIT..=DAY_LENGTH_LIMIT);
        angular_rate_for(days)
    }

    /// Vertical axis tilted about x by a random inclination in [0, 20] degrees
    pub fn orbit_axis(&mut self) -> Vec3 {
        let inclination = self.rng.random_range(0.0..=INCLINATION_MAX);
        orbit_axis_for(inclination)
    }

    /// Fragments or particles per destruction, [4, 6]
    pub fn fragment_count(&mut self) -> u32 {
        self.rng.random_range(FRAGMENTS_MIN..=FRAGMENTS_MAX)
    }

    /// A planet with every attribute random
    pub fn planet(&mut self, time: f64) -> Body {
        let radius = self.radius();
        let position = self.position();
        self.planet_with(time, radius, position)
    }

    /// A planet with the given size and position, everything else random
    pub fn planet_with(&mut self, time: f64, radius: f32, position: Vec3) -> Body {
        let appearance = self.appearance();
        self.build(BodyRole::Planet, appearance, time, radius, position)
    }

    /// A white explosion particle
    pub fn particle(&mut self, time: f64, radius: f32, position: Vec3) -> Body {
        self.build(BodyRole::Particle, PARTICLE_APPEARANCE, time, radius, position)
    }

    /// Push a burst of particles for a body destroyed at `position`
    pub fn explosion(&mut self, time: f64, radius: f32, position: Vec3, out: &mut Vec<Body>) -> usize {
        let count = self.fragment_count() as usize;
        out.extend((0..count).map(|_| self.particle(time, radius, position)));
        count
    }

    /// Push a set of fragment planets for a destructive collision
    pub fn fragments(&mut self, time: f64, radius: f32, position: Vec3, out: &mut Vec<Body>) -> usize {
        let count = self.fragment_count() as usize;
        out.extend((0..count).map(|_| self.planet_with(time, radius, position)));
        count
    }

    /// The starting population
    pub fn population(&mut self, count: usize, time: f64) -> Vec<Body> {
        (0..count).map(|_| self.planet(time)).collect()
    }

    fn build(&mut self, role: BodyRole, appearance: u32, time: f64, radius: f32, position: Vec3) -> Body {
        let mut body = Body::new(role, appearance, radius, position, time);
        body.axial_tilt = self.axial_tilt();
        body.angular_rate = self.angular_rate();
        body.orbit_axis = self.orbit_axis();
        body.heading = self.heading();
        body.load_period = self.load_period;
        body
    }
}

/// Spin rate for a signed day length; zero days falls back to 24
pub fn angular_rate_for(days: f32) -> f32 {
    let days = if days == 0.0 { DAY_LENGTH_FALLBACK } else { days };
    1.0 / days
}

/// Vertical axis rotated about x by `inclination` degrees
pub fn orbit_axis_for(inclination: f32) -> Vec3 {
    if inclination == 0.0 {
        return Vec3::Y;
    }
    (Quat::from_rotation_x(inclination.to_radians()) * Vec3::Y).normalize()
}
