//! Wall reflection tests

use bounce_core::tests::test_helpers::{approx_eq, ball, simulation};
use bounce_core::SimConfig;
use proptest::prelude::*;

fn no_gravity() -> SimConfig {
    SimConfig::default().without_gravity()
}

#[test]
fn test_reflects_right_wall_within_margin() {
    // 0.005 from the wall, inside the 0.01 margin
    let mut sim = simulation(10.0, 10.0, vec![ball(9.495, 5.0, 1.0, 0.0, 0.5)], no_gravity());

    sim.step(0.01).unwrap();

    let b = &sim.balls()[0];
    assert_eq!(b.velocity.x, -1.0);
    assert!(approx_eq(b.position.x, 9.485, 1e-12));
    assert_eq!(sim.stats().wall_reflections, 1);
}

#[test]
fn test_reflects_left_and_bottom_walls() {
    let mut sim = simulation(
        10.0,
        10.0,
        vec![ball(0.205, 0.205, -2.0, -3.0, 0.2)],
        no_gravity(),
    );

    sim.step(0.01).unwrap();

    let b = &sim.balls()[0];
    assert_eq!(b.velocity.x, 2.0);
    assert_eq!(b.velocity.y, 3.0);
    // Reflected velocity is integrated in the same step
    assert!(b.position.x > 0.205);
    assert!(b.position.y > 0.205);
}

#[test]
fn test_no_reflection_away_from_walls() {
    let mut sim = simulation(10.0, 10.0, vec![ball(5.0, 5.0, 1.0, -1.0, 0.5)], no_gravity());

    for _ in 0..10 {
        sim.step(0.01).unwrap();
    }

    let b = &sim.balls()[0];
    assert_eq!(b.velocity.x, 1.0);
    assert_eq!(b.velocity.y, -1.0);
    assert_eq!(sim.stats().wall_reflections, 0);
}

#[test]
fn test_reflection_does_not_clamp_position() {
    // Already past the wall: only the velocity flips
    let mut sim = simulation(10.0, 10.0, vec![ball(9.8, 5.0, 1.0, 0.0, 0.5)], no_gravity());

    sim.step(0.1).unwrap();

    let b = &sim.balls()[0];
    assert_eq!(b.velocity.x, -1.0);
    assert!(approx_eq(b.position.x, 9.7, 1e-12));
    assert!(b.position.x > 10.0 - 0.5);
}

#[test]
fn test_zero_margin_waits_for_contact() {
    let config = SimConfig {
        collision_margin: 0.0,
        ..no_gravity()
    };
    let mut sim = simulation(10.0, 10.0, vec![ball(9.495, 5.0, 1.0, 0.0, 0.5)], config);

    sim.step(0.01).unwrap();

    // Not yet touching, so it keeps going
    assert_eq!(sim.balls()[0].velocity.x, 1.0);
    assert!(approx_eq(sim.balls()[0].position.x, 9.505, 1e-12));

    sim.step(0.01).unwrap();
    assert_eq!(sim.balls()[0].velocity.x, -1.0);
}

#[test]
fn test_speed_preserved_without_gravity() {
    let mut sim = simulation(4.0, 3.0, vec![ball(2.0, 1.5, 3.0, 2.0, 0.25)], no_gravity());

    for _ in 0..2000 {
        sim.step(0.005).unwrap();
    }

    let v = sim.balls()[0].velocity;
    assert_eq!(v.x.abs(), 3.0);
    assert_eq!(v.y.abs(), 2.0);
}

proptest! {
    #[test]
    fn prop_ball_stays_within_one_step_of_the_walls(
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        vx in -5.0f64..5.0,
        vy in -5.0f64..5.0,
        r in 0.05f64..1.0,
        dt in 0.001f64..0.05,
    ) {
        let (w, h) = (8.0, 6.0);
        let x = r + fx * (w - 2.0 * r);
        let y = r + fy * (h - 2.0 * r);
        let mut sim = simulation(w, h, vec![ball(x, y, vx, vy, r)], no_gravity());
        let margin = sim.config().collision_margin;
        let slack_x = vx.abs() * dt + margin + 1e-9;
        let slack_y = vy.abs() * dt + margin + 1e-9;

        for _ in 0..400 {
            sim.step(dt).unwrap();
            let p = sim.balls()[0].position;
            prop_assert!(p.x >= r - slack_x && p.x <= w - r + slack_x, "x = {}", p.x);
            prop_assert!(p.y >= r - slack_y && p.y <= h - r + slack_y, "y = {}", p.y);
        }
    }
}
