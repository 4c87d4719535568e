use crate::engine::{Arena, Ball};

/// Flip each velocity component whose axis brings the ball within `margin`
/// of a wall. Only the sign changes: the position is not corrected, so a
/// fast ball may sit slightly outside the arena for one step.
///
/// Returns true if any component was flipped.
pub fn reflect_at_border(ball: &mut Ball, arena: &Arena, margin: f64) -> bool {
    let r = ball.radius;
    let mut reflected = false;

    if ball.position.x - margin < r || ball.position.x + margin > arena.width() - r {
        ball.velocity.x = -ball.velocity.x;
        reflected = true;
    }
    if ball.position.y - margin < r || ball.position.y + margin > arena.height() - r {
        ball.velocity.y = -ball.velocity.y;
        reflected = true;
    }

    reflected
}

/// Forward Euler position update: x += v * dt
pub fn integrate(ball: &mut Ball, dt: f64) {
    ball.position += ball.velocity * dt;
}

/// vy += g * dt. Runs after [`integrate`], so it only shows up in the
/// displacement of the next step.
pub fn apply_gravity(ball: &mut Ball, g: f64, dt: f64) {
    ball.velocity.y += g * dt;
}
