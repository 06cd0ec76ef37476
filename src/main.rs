//! Planet Crash entry point
//!
//! Headless driver: runs the frame loop against the wall clock and logs what
//! happens. Rendering hosts embed [`planet_crash::Engine`] directly.
//!
//! Usage: `planet-crash [config.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::time::{Duration, Instant};

    use planet_crash::sim::SimClock;
    use planet_crash::{Engine, SimConfig};

    /// Roughly one rendered frame
    const FRAME: Duration = Duration::from_millis(1);
    const DEFAULT_SECONDS: f64 = 20.0;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        let seconds = match args.next() {
            Some(s) => s.parse::<f64>()?,
            None => DEFAULT_SECONDS,
        };
        if !(seconds > 0.0) {
            return Err("run length must be a positive number of seconds".into());
        }

        log::info!("Planet Crash (headless) running for {seconds}s");
        let mut engine = Engine::new(config, SimClock::wall())?;
        let start = Instant::now();
        let mut last_report = 0.0;
        let mut collisions = 0;
        let mut fragments = 0;

        while start.elapsed().as_secs_f64() < seconds {
            if let Some(report) = engine.frame() {
                collisions += report.collisions;
                fragments += report.fragments_spawned;
            }

            let now = engine.clock().current_time();
            if now - last_report >= 1.0 {
                last_report = now;
                let world = engine.world();
                log::info!(
                    "t={now:.1}s bodies={} (loaded {}) particles={} collisions={collisions} fragments={fragments}",
                    world.bodies.len(),
                    world.loaded_count(),
                    world.particles.len(),
                );
            }
            std::thread::sleep(FRAME);
        }

        let snapshot = engine.snapshot();
        log::info!(
            "Finished after {} ticks with {} instances ({} bytes of planet data)",
            engine.ticks(),
            snapshot.instance_count(),
            snapshot.body_bytes().len(),
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match headless::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the engine themselves
}
