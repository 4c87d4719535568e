//! Ball-ball contact detection and response
//!
//! Pairs are visited from the point of view of the later ball: when ball `i`
//! has moved, it is checked against balls `0..i`, which have already moved
//! during the same step. Each unordered pair is therefore seen once per step
//! and the outcome depends on index order.

use crate::config::{CollisionModel, SimConfig};
use crate::engine::Ball;
use glam::DVec2;

/// What happened while resolving one ball against its predecessors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub resolved: u64,
    pub skipped: u64,
}

/// Two balls touch when `dist² <= (r1 + r2)² + margin`.
///
/// The margin is added to the squared radius sum, which triggers a little
/// before exact contact.
pub fn in_contact(a: &Ball, b: &Ball, margin: f64) -> bool {
    let reach = a.radius + b.radius;
    a.position.distance_squared(b.position) <= reach * reach + margin
}

/// Unit vector from `a` to `b`, or `None` when the centers coincide
pub fn line_of_centers(a: &Ball, b: &Ball) -> Option<DVec2> {
    (b.position - a.position).try_normalize()
}

/// Swap the velocity projections of `a` and `b` on the line of centers.
///
/// Both velocities are rebuilt from the swapped projections alone, so the
/// tangential components are dropped and each ball leaves along the
/// collision normal. Radii play no part. Returns false, leaving both balls
/// untouched, when the centers coincide.
pub fn transfer_momentum(a: &mut Ball, b: &mut Ball) -> bool {
    let Some(normal) = line_of_centers(a, b) else {
        return false;
    };

    let u_a = a.velocity.dot(normal);
    let u_b = b.velocity.dot(normal);

    a.velocity = normal * u_b;
    b.velocity = normal * u_a;
    true
}

/// Mass-weighted elastic collision with each ball's radius as its mass.
///
/// Only the normal components change. Balls already moving apart are left
/// alone. Returns false when nothing was exchanged.
pub fn elastic_exchange(a: &mut Ball, b: &mut Ball) -> bool {
    let Some(normal) = line_of_centers(a, b) else {
        return false;
    };

    let u_a = a.velocity.dot(normal);
    let u_b = b.velocity.dot(normal);
    if u_a - u_b <= 0.0 {
        return false;
    }

    let (m_a, m_b) = (a.radius, b.radius);
    let total = m_a + m_b;
    let v_a = (u_a * (m_a - m_b) + 2.0 * m_b * u_b) / total;
    let v_b = (u_b * (m_b - m_a) + 2.0 * m_a * u_a) / total;

    a.velocity += normal * (v_a - u_a);
    b.velocity += normal * (v_b - u_b);
    true
}

/// Check `balls[index]` against every ball before it and resolve contacts
pub fn resolve_collisions(
    balls: &mut [Ball],
    index: usize,
    config: &SimConfig,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let (earlier, rest) = balls.split_at_mut(index);
    let Some(current) = rest.first_mut() else {
        return outcome;
    };

    for (other_index, other) in earlier.iter_mut().enumerate() {
        if !in_contact(current, other, config.collision_margin) {
            continue;
        }

        let window = config.collision_cooldown;
        if window > 0.0 && (current.cooling_down(window) || other.cooling_down(window)) {
            outcome.skipped += 1;
            continue;
        }

        let exchanged = match config.collision_model {
            CollisionModel::Simplified => transfer_momentum(current, other),
            CollisionModel::Elastic => elastic_exchange(current, other),
        };

        if exchanged {
            current.reset_cooldown();
            other.reset_cooldown();
            outcome.resolved += 1;
            log::trace!("collision between ball {} and ball {}", other_index, index);
        } else {
            outcome.skipped += 1;
            log::trace!(
                "no exchange between ball {} and ball {}",
                other_index,
                index
            );
        }
    }

    outcome
}
