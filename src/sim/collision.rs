//! Sphere collision detection
//!
//! Two spheres touch when the distance between their centers is at most the
//! sum of their radii. Tangent spheres count as colliding.

use glam::Vec3;

use super::state::Body;

/// Whether two spheres intersect (tangency included)
///
/// Compared in f64 on squared quantities so the tangent case is not lost to
/// a square root.
#[inline]
pub fn intersects(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> bool {
    let d = (center_a - center_b).as_dvec3();
    let reach = radius_a as f64 + radius_b as f64;
    d.length_squared() <= reach * reach
}

/// Whether two bodies' spheres intersect
#[inline]
pub fn bodies_intersect(a: &Body, b: &Body) -> bool {
    intersects(a.position, a.radius, b.position, b.radius)
}

/// Bodies claimed for destruction during one tick
#[derive(Debug, Clone, Default)]
pub struct CollisionScan {
    /// `claimed[i]` is set when body `i` is destroyed this tick
    pub claimed: Vec<bool>,
    /// Every colliding pair found, in discovery order
    pub pairs: Vec<(usize, usize)>,
}

impl CollisionScan {
    #[cfg(test)]
    pub fn claimed_count(&self) -> usize {
        self.claimed.iter().filter(|&&c| c).count()
    }

    /// Claimed indices, highest first
    pub fn claimed_descending(&self) -> impl Iterator<Item = usize> + '_ {
        self.claimed
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(i, &c)| c.then_some(i))
    }
}

/// Test every unordered pair of loaded, unclaimed bodies and claim the losers
///
/// Two bodies on the same side of `min_collidable_radius` destroy each other.
/// A body above the threshold survives hitting one at or below it; only the
/// smaller one is claimed. A claimed body takes part in no further pairs.
pub fn find_collisions(bodies: &[Body], min_collidable_radius: f32) -> CollisionScan {
    let n = bodies.len();
    let mut scan = CollisionScan {
        claimed: vec![false; n],
        pairs: Vec::new(),
    };

    for i in 0..n {
        if !bodies[i].is_loaded || scan.claimed[i] {
            continue;
        }
        for j in (i + 1)..n {
            if scan.claimed[j] || !bodies[j].is_loaded {
                continue;
            }
            if !bodies_intersect(&bodies[i], &bodies[j]) {
                continue;
            }
            log::debug!("Collision! ({i}, {j})");
            scan.pairs.push((i, j));

            let big_i = bodies[i].is_collidable(min_collidable_radius);
            let big_j = bodies[j].is_collidable(min_collidable_radius);
            if big_i == big_j {
                scan.claimed[i] = true;
                scan.claimed[j] = true;
            } else if big_i {
                scan.claimed[j] = true;
            } else {
                scan.claimed[i] = true;
            }
            if scan.claimed[i] {
                break;
            }
        }
    }

    scan
}
