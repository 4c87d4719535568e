//! Static checks on parsed scenarios
//!
//! Catches problems that would otherwise surface as a [`SimError`] halfway
//! through building the simulation, and flags layouts that are legal but
//! probably not what the author meant.
//!
//! [`SimError`]: crate::SimError

use crate::ast::Scenario;
use crate::diagnostics::{Diagnostic, Diagnostics};
use std::collections::HashMap;

/// Analyze a scenario and return diagnostics
pub fn analyze_scenario(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let arena = &scenario.arena;

    let arena_ok = arena.width.is_finite()
        && arena.width > 0.0
        && arena.height.is_finite()
        && arena.height > 0.0;
    if !arena_ok {
        diagnostics.push(Diagnostic::error(
            format!(
                "arena dimensions must be positive, got {} x {}",
                arena.width, arena.height
            ),
            arena.span,
        ));
    }

    // Balls: unique names, usable radii, sensible placement
    let mut ball_names = HashMap::new();
    for (idx, ball) in scenario.balls.iter().enumerate() {
        if ball_names.insert(ball.name.as_str(), idx).is_some() {
            diagnostics.push(Diagnostic::error(
                format!("duplicate ball name '{}'", ball.name),
                ball.span,
            ));
        }

        if !ball.radius.is_finite() || ball.radius <= 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("ball '{}' has non-positive radius {}", ball.name, ball.radius),
                ball.span,
            ));
            continue;
        }

        if !arena_ok {
            continue;
        }

        if 2.0 * ball.radius > arena.width.min(arena.height) {
            diagnostics.push(Diagnostic::error(
                format!(
                    "ball '{}' with radius {} does not fit in the arena",
                    ball.name, ball.radius
                ),
                ball.span,
            ));
        } else {
            let (x, y, r) = (ball.position.x, ball.position.y, ball.radius);
            if x < r || x > arena.width - r || y < r || y > arena.height - r {
                diagnostics.push(Diagnostic::warning(
                    format!("ball '{}' starts outside the arena", ball.name),
                    ball.span,
                ));
            }
        }
    }

    for (i, a) in scenario.balls.iter().enumerate() {
        for b in &scenario.balls[..i] {
            let reach = a.radius + b.radius;
            if a.position.distance_squared(b.position) < reach * reach {
                diagnostics.push(Diagnostic::warning(
                    format!("balls '{}' and '{}' start overlapping", b.name, a.name),
                    a.span,
                ));
            }
        }
    }

    // Physics overrides
    let physics = &scenario.physics;
    if let Some(g) = physics.gravity {
        if !g.is_finite() {
            diagnostics.push(Diagnostic::error(
                format!("gravity must be finite, got {}", g),
                None,
            ));
        }
    }
    if let Some(margin) = physics.margin {
        if !margin.is_finite() || margin < 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("collision margin must be non-negative, got {}", margin),
                None,
            ));
        }
    }
    if let Some(cooldown) = physics.cooldown {
        if !cooldown.is_finite() || cooldown < 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("collision cooldown must be non-negative, got {}", cooldown),
                None,
            ));
        }
    }

    // Run length
    let simulate = &scenario.simulate;
    if !simulate.dt.is_finite() || simulate.dt <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("time step must be positive, got {}", simulate.dt),
            simulate.span,
        ));
    }
    if simulate.steps == 0 {
        diagnostics.push(Diagnostic::warning(
            "simulation runs for zero steps",
            simulate.span,
        ));
    }

    // Detectors reference existing balls
    let known = scenario.ball_names();
    let mut detector_names = HashMap::new();
    for (idx, detector) in scenario.detectors.iter().enumerate() {
        if detector_names.insert(detector.name.as_str(), idx).is_some() {
            diagnostics.push(Diagnostic::error(
                format!("duplicate detector name '{}'", detector.name),
                detector.span,
            ));
        }
        for name in detector.kind.balls() {
            if !known.iter().any(|k| k == name) {
                diagnostics.push(Diagnostic::error(
                    format!("unknown ball '{}' in detector '{}'", name, detector.name),
                    detector.span,
                ));
            }
        }
    }

    diagnostics
}
