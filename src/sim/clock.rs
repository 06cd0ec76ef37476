//! Simulation clock
//!
//! The single authority for "now". Owns pause state and the speed factor, and
//! derives how many rendered frames pass between simulation ticks.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::consts::{BASE_UPDATE_RATE, SPEED_DEFAULT, SPEED_MAX, SPEED_MIN};

/// Monotonic seconds since some fixed origin
pub trait TimeSource: fmt::Debug {
    fn now(&self) -> f64;
}

/// Real elapsed time since construction
#[derive(Debug, Clone, Copy)]
pub struct WallTime {
    start: Instant,
}

impl WallTime {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallTime {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven time; clones share the same reading
#[derive(Debug, Clone, Default)]
pub struct ManualTime(Rc<Cell<f64>>);

impl ManualTime {
    pub fn new(start: f64) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    pub fn set(&self, secs: f64) {
        self.0.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.0.set(self.0.get() + secs);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

/// Pausable, speed-scaled view of a [`TimeSource`]
#[derive(Debug)]
pub struct SimClock {
    source: Box<dyn TimeSource>,
    /// Subtracted from the source reading; grows with every pause
    offset: f64,
    speed: f32,
    paused: bool,
    /// Reading at the moment of pausing
    frozen: f64,
}

impl SimClock {
    pub fn new(source: impl TimeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            offset: 0.0,
            speed: SPEED_DEFAULT,
            paused: false,
            frozen: 0.0,
        }
    }

    /// Clock driven by real time
    pub fn wall() -> Self {
        Self::new(WallTime::new())
    }

    /// Current simulation time in seconds
    pub fn current_time(&self) -> f64 {
        if self.paused {
            self.frozen
        } else {
            self.source.now() - self.offset
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause, or resume from exactly where time was frozen
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.offset = self.source.now() - self.frozen;
            self.paused = false;
            log::info!("Resumed at t={:.3}", self.frozen);
        } else {
            self.frozen = self.current_time();
            self.paused = true;
            log::info!("Paused at t={:.3}", self.frozen);
        }
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed
    }

    /// Shift the speed factor by `delta`
    ///
    /// Returns false and leaves the factor alone when the result would leave
    /// [`SPEED_MIN`, `SPEED_MAX`].
    pub fn adjust_speed(&mut self, delta: f32) -> bool {
        let next = self.speed + delta;
        if !(SPEED_MIN..=SPEED_MAX).contains(&next) {
            log::debug!("Speed change {delta:+} rejected at {}", self.speed);
            return false;
        }
        self.speed = next;
        log::info!("Speed factor {}", self.speed);
        true
    }

    /// Rendered frames between simulation ticks (100 at default speed)
    pub fn update_rate(&self) -> u32 {
        ((BASE_UPDATE_RATE * SPEED_DEFAULT / self.speed).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_clock() -> (ManualTime, SimClock) {
        let time = ManualTime::new(0.0);
        let clock = SimClock::new(time.clone());
        (time, clock)
    }

    #[test]
    fn test_live_time_follows_source() {
        let (time, clock) = manual_clock();
        time.advance(2.5);
        assert_eq!(clock.current_time(), 2.5);
    }

    #[test]
    fn test_pause_freezes_time() {
        let (time, mut clock) = manual_clock();
        time.set(3.0);
        clock.toggle_pause();
        assert!(clock.is_paused());
        time.advance(10.0);
        assert_eq!(clock.current_time(), 3.0);
    }

    #[test]
    fn test_resume_has_no_jump() {
        let (time, mut clock) = manual_clock();
        time.set(3.0);
        clock.toggle_pause();
        time.advance(10.0);
        clock.toggle_pause();
        assert!(!clock.is_paused());
        assert_eq!(clock.current_time(), 3.0);
        time.advance(0.5);
        assert_eq!(clock.current_time(), 3.5);

        // A second pause cycle keeps accumulating the offset
        clock.toggle_pause();
        time.advance(4.0);
        clock.toggle_pause();
        assert_eq!(clock.current_time(), 3.5);
    }

    #[test]
    fn test_update_rate() {
        let (_, mut clock) = manual_clock();
        assert_eq!(clock.update_rate(), 100);
        assert!(clock.adjust_speed(510.0));
        assert_eq!(clock.speed_factor(), 1020.0);
        assert_eq!(clock.update_rate(), 50);
    }

    #[test]
    fn test_update_rate_bounds() {
        let (_, mut clock) = manual_clock();
        assert!(clock.adjust_speed(-300.0));
        assert_eq!(clock.update_rate(), 243); // 51000 / 210
        assert!(clock.adjust_speed(SPEED_MAX - SPEED_MIN));
        assert_eq!(clock.update_rate(), 5); // 51000 / 10000
    }

    #[test]
    fn test_speed_out_of_range_rejected() {
        let (_, mut clock) = manual_clock();
        assert!(!clock.adjust_speed(-400.0));
        assert_eq!(clock.speed_factor(), SPEED_DEFAULT);
        assert!(!clock.adjust_speed(9500.0));
        assert_eq!(clock.speed_factor(), SPEED_DEFAULT);

        // Exactly on the bounds is accepted
        assert!(clock.adjust_speed(SPEED_MIN - SPEED_DEFAULT));
        assert_eq!(clock.speed_factor(), SPEED_MIN);
        assert!(!clock.adjust_speed(-100.0));
        assert_eq!(clock.speed_factor(), SPEED_MIN);
    }

    #[test]
    fn test_wall_time_moves_forward() {
        let clock = SimClock::wall();
        let a = clock.current_time();
        let b = clock.current_time();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
