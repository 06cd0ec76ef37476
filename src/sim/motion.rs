//! Per-tick kinematics
//!
//! Planets move one unit along their heading every tick. There is no velocity
//! or acceleration beyond the heading itself.

use super::spawn::Spawner;
use super::state::Body;
use crate::settings::SimConfig;

/// Move one planet a single tick, returning true if it bounced
///
/// Outside the bounding shell the heading and spin axis are reversed (the
/// body is not pulled back inside). Otherwise the heading is re-rolled every
/// `heading_change_period` ticks.
pub fn step_body(body: &mut Body, spawner: &mut Spawner, distance_max: f32, heading_change_period: u32) -> bool {
    let bounced = body.position.length() > distance_max;
    if bounced {
        body.heading = -body.heading;
        body.orbit_axis = -body.orbit_axis;
    } else if body.heading_change_counter >= heading_change_period {
        body.heading = spawner.heading();
        body.heading_change_counter = 0;
    }
    body.position += body.heading;
    body.heading_change_counter += 1;
    bounced
}

/// Move every planet; returns the number of bounces
pub fn step_bodies(bodies: &mut [Body], spawner: &mut Spawner, config: &SimConfig) -> usize {
    let mut bounces = 0;
    for body in bodies.iter_mut() {
        if step_body(body, spawner, config.distance_max, config.heading_change_period) {
            bounces += 1;
        }
    }
    bounces
}

/// Fly and shrink every explosion particle, then drop the spent ones
///
/// Returns how many particles were removed.
pub fn step_particles(particles: &mut Vec<Body>, config: &SimConfig) -> usize {
    for particle in particles.iter_mut() {
        particle.position += particle.heading * config.explosion_speed;
        particle.radius /= config.explosion_shrink_rate;
    }
    let before = particles.len();
    particles.retain(|p| p.radius > config.explosion_min_radius);
    before - particles.len()
}
