//! Body simulation module
//!
//! All physics lives here:
//! - Unit-step drift with bounce at the bounding shell
//! - Exact sphere collisions between loaded planets
//! - Explosions, fragments and shrinking particles
//! - A pausable, speed-scaled clock
//!
//! No rendering or windowing dependencies.

pub mod clock;
pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod visibility;

pub use clock::{ManualTime, SimClock, TimeSource, WallTime};
pub use collision::{CollisionScan, bodies_intersect, find_collisions, intersects};
pub use motion::{step_bodies, step_body, step_particles};
pub use spawn::Spawner;
pub use state::{Body, BodyRole, World};
pub use tick::{Requests, TickReport, resolve_collisions, tick};
pub use visibility::{update_body_visibility, update_visibility};
