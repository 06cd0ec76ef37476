//! Simulation tick
//!
//! One tick moves every planet, resolves collisions into explosions and
//! fragments, ages explosion particles and services pending special events.

use glam::Vec3;

use super::collision::find_collisions;
use super::motion::{step_bodies, step_particles};
use super::spawn::Spawner;
use super::state::World;
use crate::settings::SimConfig;

/// One-shot special events waiting for the next tick
///
/// Set by input, cleared by [`tick`] once serviced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requests {
    /// Add one random planet
    pub spawn_body: bool,
    /// Remove every planet at or below the collidable radius
    pub cleanup_small: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Planets that crossed the bounding shell and turned around
    pub bounces: usize,
    /// Colliding pairs found
    pub collisions: usize,
    /// Planets destroyed by collisions
    pub destroyed: usize,
    /// Fragment planets created by destructive pairs
    pub fragments_spawned: usize,
    /// Explosion particles created
    pub particles_spawned: usize,
    /// Explosion particles that shrank away
    pub particles_expired: usize,
    /// A requested planet was spawned
    pub spawned_on_request: bool,
    /// Planets removed by a cleanup request
    pub cleaned_up: usize,
}

/// Destroy colliding planets, leaving explosions and fragments behind
///
/// Destroyed planets are visited from the highest index down. Every two
/// destroyed planets above the collidable radius form a pair whose fragments
/// are half the larger radius, spawned where the second one died. A fragment
/// radius at or below the threshold spawns nothing.
pub fn resolve_collisions(world: &mut World, spawner: &mut Spawner, config: &SimConfig, now: f64, report: &mut TickReport) {
    let min_radius = config.min_collidable_radius;
    let scan = find_collisions(&world.bodies, min_radius);
    report.collisions += scan.pairs.len();
    if scan.pairs.is_empty() {
        return;
    }

    let mut fragments = Vec::new();
    let mut pair_count = 0;
    let mut pair_radius = 0.0f32;
    let mut pair_position = Vec3::ZERO;

    for idx in scan.claimed_descending() {
        let (radius, position) = {
            let body = &world.bodies[idx];
            (body.radius, body.position)
        };
        if radius > min_radius {
            pair_radius = pair_radius.max(radius);
            pair_position = position;
            pair_count += 1;
        }
        report.particles_spawned += spawner.explosion(now, radius, position, &mut world.particles);
        report.destroyed += 1;

        if pair_count == 2 {
            let fragment_radius = pair_radius / 2.0;
            pair_count = 0;
            pair_radius = 0.0;
            if fragment_radius > min_radius {
                let count = spawner.fragments(now, fragment_radius, pair_position, &mut fragments);
                log::debug!("{count} fragments of radius {fragment_radius:.2} at {pair_position}");
                report.fragments_spawned += count;
            }
        }
    }

    let mut idx = 0;
    world.bodies.retain(|_| {
        let keep = !scan.claimed[idx];
        idx += 1;
        keep
    });
    world.bodies.append(&mut fragments);
}

/// Advance the world by one simulation tick
pub fn tick(world: &mut World, spawner: &mut Spawner, requests: &mut Requests, config: &SimConfig, now: f64) -> TickReport {
    let mut report = TickReport {
        bounces: step_bodies(&mut world.bodies, spawner, config),
        ..Default::default()
    };

    resolve_collisions(world, spawner, config, now, &mut report);
    report.particles_expired = step_particles(&mut world.particles, config);

    if requests.spawn_body {
        log::info!("Spawning a new planet!");
        world.bodies.push(spawner.planet(now));
        report.spawned_on_request = true;
        requests.spawn_body = false;
    }
    if requests.cleanup_small {
        report.cleaned_up = world.remove_small_bodies(config.min_collidable_radius);
        log::info!("Deleting all small planets ({} removed)", report.cleaned_up);
        requests.cleanup_small = false;
    }

    log::trace!(
        "tick t={now:.3}: {} bodies, {} particles, {report:?}",
        world.bodies.len(),
        world.particles.len()
    );
    report
}
