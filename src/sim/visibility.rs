//! Load-in fade for new bodies
//!
//! A new body flashes between 0.1 and 1.0 opacity until its load period has
//! elapsed, then locks at full opacity and starts colliding.

use super::state::Body;
use crate::consts::OPACITY_STEP;

/// Advance the load-in state of one body, returning true on the tick it loads
pub fn update_body_visibility(body: &mut Body, now: f64) -> bool {
    if body.is_loaded {
        return false;
    }
    if body.load_elapsed - body.spawn_time >= body.load_period {
        body.is_loaded = true;
        body.opacity = 1.0;
        return true;
    }

    body.load_elapsed = now;
    if body.opacity >= 1.0 {
        body.opacity_step = -OPACITY_STEP;
    }
    if body.opacity <= OPACITY_STEP {
        body.opacity_step = OPACITY_STEP;
    }
    body.opacity = (body.opacity + body.opacity_step).clamp(0.0, 1.0);
    false
}

/// Advance every still-loading body; returns how many finished loading
pub fn update_visibility(bodies: &mut [Body], now: f64) -> usize {
    bodies
        .iter_mut()
        .map(|b| update_body_visibility(b, now))
        .filter(|&loaded| loaded)
        .count()
}
