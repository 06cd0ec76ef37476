//! Frame-driven engine
//!
//! Owns the world, the clock, the spawner and pending requests. The host
//! calls [`Engine::frame`] once per rendered frame; every `update_rate()`
//! frames the engine runs the load-in fade and, unless paused, a full
//! simulation tick.

use crate::render::{BodyInstance, RenderSnapshot};
use crate::settings::{ConfigError, SimConfig};
use crate::sim::{Requests, SimClock, Spawner, TickReport, World, tick, update_visibility};

/// Control input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    /// Shift the speed factor; ignored if it would leave the allowed range
    AdjustSpeed(f32),
    /// Show or hide the bounding shell (display only)
    ToggleHitbox,
    /// Add a random planet on the next tick
    SpawnBody,
    /// Remove every small planet on the next tick
    CleanupSmall,
}

/// Running simulation
#[derive(Debug)]
pub struct Engine {
    world: World,
    clock: SimClock,
    spawner: Spawner,
    requests: Requests,
    config: SimConfig,
    draw_hitbox: bool,
    /// Frames since the last simulation tick
    frame_index: u32,
    ticks: u64,
}

impl Engine {
    /// Start a simulation with the configured initial population
    ///
    /// Fails if the config does not pass [`SimConfig::validate`].
    pub fn new(config: SimConfig, clock: SimClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut spawner = Spawner::new(&config);
        let now = clock.current_time();
        let world = World {
            bodies: spawner.population(config.initial_bodies, now),
            particles: Vec::new(),
        };
        log::info!("Initial number of planets = {}", world.bodies.len());

        Ok(Self {
            world,
            clock,
            spawner,
            requests: Requests::default(),
            config,
            draw_hitbox: false,
            frame_index: 0,
            ticks: 0,
        })
    }

    /// Apply one control input
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.clock.toggle_pause(),
            Command::AdjustSpeed(delta) => {
                self.clock.adjust_speed(delta);
            }
            Command::ToggleHitbox => self.draw_hitbox = !self.draw_hitbox,
            Command::SpawnBody => self.requests.spawn_body = true,
            Command::CleanupSmall => self.requests.cleanup_small = true,
        }
    }

    /// Advance by one rendered frame
    ///
    /// Returns the tick report when a simulation tick ran this frame.
    pub fn frame(&mut self) -> Option<TickReport> {
        let mut report = None;
        if self.frame_index % self.clock.update_rate() == 0 {
            let now = self.clock.current_time();
            let loaded = update_visibility(&mut self.world.bodies, now);
            if loaded > 0 {
                log::debug!("{loaded} bodies finished loading");
            }
            if !self.clock.is_paused() {
                report = Some(tick(
                    &mut self.world,
                    &mut self.spawner,
                    &mut self.requests,
                    &self.config,
                    now,
                ));
                self.ticks += 1;
                self.frame_index = 0;
            }
        }
        self.frame_index = self.frame_index.wrapping_add(1);
        report
    }

    /// Render data for the current state
    pub fn snapshot(&self) -> RenderSnapshot {
        let time = self.clock.current_time();
        let speed_factor = self.clock.speed_factor();
        RenderSnapshot {
            time,
            speed_factor,
            bodies: self
                .world
                .bodies
                .iter()
                .map(|b| BodyInstance::planet(b, time, speed_factor, self.config.ring_size))
                .collect(),
            particles: self.world.particles.iter().map(BodyInstance::particle).collect(),
            hitbox_radius: self.draw_hitbox.then_some(self.config.distance_max),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for hosts that place bodies themselves
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn spawner_mut(&mut self) -> &mut Spawner {
        &mut self.spawner
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn requests(&self) -> Requests {
        self.requests
    }

    pub fn draw_hitbox(&self) -> bool {
        self.draw_hitbox
    }

    /// Simulation ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Body, BodyRole, ManualTime};
    use glam::Vec3;

    fn engine(initial_bodies: usize) -> (ManualTime, Engine) {
        let time = ManualTime::new(0.0);
        let config = SimConfig {
            initial_bodies,
            seed: Some(99),
            ..Default::default()
        };
        let engine = Engine::new(config, SimClock::new(time.clone())).unwrap();
        (time, engine)
    }

    /// A loaded planet parked near the origin
    fn parked(radius: f32, x: f32) -> Body {
        let mut b = Body::new(BodyRole::Planet, 2, radius, Vec3::new(x, 0.0, 0.0), 0.0);
        b.is_loaded = true;
        b.heading = Vec3::Z;
        b.heading_change_counter = 1;
        b
    }

    #[test]
    fn test_initial_population() {
        let (_, engine) = engine(5);
        assert_eq!(engine.world().bodies.len(), 5);
        assert!(engine.world().particles.is_empty());
        assert!(engine.world().bodies.iter().all(|b| !b.is_loaded));
    }

    #[test]
    fn test_tick_every_update_rate_frames() {
        let (_, mut engine) = engine(0);
        assert!(engine.frame().is_some());
        for _ in 1..100 {
            assert!(engine.frame().is_none());
        }
        assert!(engine.frame().is_some());
        assert_eq!(engine.ticks(), 2);

        engine.apply(Command::AdjustSpeed(510.0));
        let ticks: usize = (0..200).filter_map(|_| engine.frame()).count();
        assert_eq!(ticks, 4);
    }

    #[test]
    fn test_pause_stops_ticks_but_not_time_gate() {
        let (time, mut engine) = engine(1);
        engine.apply(Command::TogglePause);
        time.advance(5.0);
        for _ in 0..300 {
            assert!(engine.frame().is_none());
        }
        assert_eq!(engine.ticks(), 0);
        // Time is frozen, so nothing finished loading
        assert!(!engine.world().bodies[0].is_loaded);
        let position = engine.world().bodies[0].position;

        engine.apply(Command::TogglePause);
        assert_eq!(engine.clock().current_time(), 0.0);
        let ran = (0..100).filter_map(|_| engine.frame()).count();
        assert_eq!(ran, 1);
        assert_ne!(engine.world().bodies[0].position, position);
    }

    #[test]
    fn test_bodies_load_after_period() {
        let (time, mut engine) = engine(1);
        engine.frame();
        assert_eq!(engine.world().loaded_count(), 0);

        time.advance(2.0);
        for _ in 0..100 {
            engine.frame();
        }
        // First gate after the period only samples elapsed time
        assert_eq!(engine.world().loaded_count(), 0);
        for _ in 0..100 {
            engine.frame();
        }
        let body = &engine.world().bodies[0];
        assert!(body.is_loaded);
        assert_eq!(body.opacity, 1.0);
    }

    #[test]
    fn test_spawn_and_cleanup_requests() {
        let (_, mut engine) = engine(0);
        engine.world_mut().bodies.push(parked(1.0, 40.0));
        engine.world_mut().bodies.push(parked(8.0, -40.0));

        engine.apply(Command::SpawnBody);
        engine.apply(Command::SpawnBody);
        engine.apply(Command::CleanupSmall);
        assert!(engine.requests().spawn_body);

        let report = engine.frame().unwrap();
        assert!(report.spawned_on_request);
        assert_eq!(report.cleaned_up, 1);
        assert_eq!(engine.requests(), Requests::default());
        assert_eq!(engine.world().bodies.len(), 2);
    }

    #[test]
    fn test_requests_wait_while_paused() {
        let (_, mut engine) = engine(0);
        engine.apply(Command::TogglePause);
        engine.apply(Command::SpawnBody);
        for _ in 0..250 {
            engine.frame();
        }
        assert!(engine.world().bodies.is_empty());
        assert!(engine.requests().spawn_body);

        engine.apply(Command::TogglePause);
        let ran = (0..100).filter_map(|_| engine.frame()).count();
        assert_eq!(ran, 1);
        assert_eq!(engine.world().bodies.len(), 1);
    }

    #[test]
    fn test_speed_limits() {
        let (_, mut engine) = engine(0);
        engine.apply(Command::AdjustSpeed(-400.0));
        assert_eq!(engine.clock().speed_factor(), 510.0);
        engine.apply(Command::AdjustSpeed(100.0));
        assert_eq!(engine.clock().speed_factor(), 610.0);
    }

    #[test]
    fn test_collision_end_to_end() {
        let (time, mut engine) = engine(0);
        time.set(4.0);
        engine.world_mut().bodies.push(parked(8.0, -6.0));
        engine.world_mut().bodies.push(parked(12.0, 6.0));

        let report = engine.frame().unwrap();
        assert_eq!(report.destroyed, 2);

        let world = engine.world();
        assert!((8..=12).contains(&world.particles.len()));
        assert!((4..=6).contains(&world.bodies.len()));
        for frag in &world.bodies {
            assert_eq!(frag.radius, 6.0);
            assert_eq!(frag.position, Vec3::new(-6.0, 0.0, 1.0));
            assert_eq!(frag.spawn_time, 4.0);
            assert!(!frag.is_loaded);
        }
        for p in &world.particles {
            assert!(p.position.distance(Vec3::new(0.0, 0.0, 1.0)) < 7.0);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let clock = || SimClock::new(ManualTime::new(0.0));

        // Spawn radius floor 4 x 6 = 24 lies above the 20 ceiling
        let config = SimConfig {
            min_collidable_radius: 6.0,
            seed: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(config, clock()),
            Err(ConfigError::Invalid {
                field: "spawn_radius_max",
                ..
            })
        ));

        let config = SimConfig {
            distance_max: 2.5,
            seed: Some(1),
            ..Default::default()
        };
        assert!(Engine::new(config, clock()).is_err());

        let config = SimConfig {
            spawn_radius_max: f32::INFINITY,
            seed: Some(1),
            ..Default::default()
        };
        assert!(Engine::new(config, clock()).is_err());
    }

    #[test]
    fn test_frame_counter_wraps_while_paused() {
        let (_, mut engine) = engine(0);
        engine.apply(Command::TogglePause);
        engine.frame_index = u32::MAX;
        assert!(engine.frame().is_none());
        assert_eq!(engine.frame_index, 0);

        engine.apply(Command::TogglePause);
        assert!(engine.frame().is_some());
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_snapshot_hitbox_toggle() {
        let (_, mut engine) = engine(2);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.bodies.len(), 2);
        assert_eq!(snapshot.hitbox_radius, None);
        assert_eq!(snapshot.speed_factor, 510.0);

        engine.apply(Command::ToggleHitbox);
        assert_eq!(engine.snapshot().hitbox_radius, Some(100.0));
        engine.apply(Command::ToggleHitbox);
        assert!(!engine.draw_hitbox());
    }
}
