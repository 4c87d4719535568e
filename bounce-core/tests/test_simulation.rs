//! Construction, validation and accessor tests

use bounce_core::tests::test_helpers::{approx_eq, approx_eq_vec, ball, simulation};
use bounce_core::{Arena, SimConfig, SimError, Simulation};
use glam::DVec2;

#[test]
fn test_arena_rejects_non_positive_dimensions() {
    assert!(matches!(
        Arena::new(0.0, 5.0),
        Err(SimError::InvalidArena { .. })
    ));
    assert!(matches!(
        Arena::new(5.0, -1.0),
        Err(SimError::InvalidArena { .. })
    ));
    assert!(Arena::new(f64::NAN, 5.0).is_err());
    assert!(Arena::new(f64::INFINITY, 5.0).is_err());
    assert!(Simulation::new(-10.0, 10.0).is_err());
}

#[test]
fn test_arena_helpers() {
    let arena = Arena::new(8.0, 4.0).unwrap();
    assert_eq!(arena.extent(), DVec2::new(8.0, 4.0));
    assert!(arena.fits(2.0));
    assert!(!arena.fits(2.1));
    assert!(arena.contains(DVec2::new(1.0, 1.0), 1.0));
    assert!(!arena.contains(DVec2::new(0.5, 2.0), 1.0));
}

#[test]
fn test_default_layout() {
    let sim = Simulation::new(9.0, 10.0).unwrap();

    assert_eq!(sim.len(), 2);
    let balls = sim.balls();
    assert!(approx_eq_vec(balls[0].position, DVec2::new(3.0, 9.0), 1e-12));
    assert_eq!(balls[0].velocity, DVec2::new(1.2, 1.6));
    assert_eq!(balls[0].radius, 0.2);
    assert_eq!(balls[0].color.as_deref(), Some("red"));
    assert!(approx_eq_vec(balls[1].position, DVec2::new(6.0, 7.0), 1e-12));
    assert_eq!(balls[1].velocity, DVec2::new(-0.6, 0.6));
    assert_eq!(balls[1].radius, 0.3);
    assert_eq!(sim.config(), &SimConfig::default());
}

#[test]
fn test_rejects_invalid_radius() {
    let arena = Arena::new(10.0, 10.0).unwrap();

    let err = Simulation::with_balls(
        arena,
        vec![ball(5.0, 5.0, 0.0, 0.0, 0.5), ball(2.0, 2.0, 0.0, 0.0, 0.0)],
        SimConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SimError::InvalidRadius {
            index: 1,
            radius: 0.0
        }
    );

    assert!(Simulation::with_balls(
        arena,
        vec![ball(5.0, 5.0, 0.0, 0.0, -1.0)],
        SimConfig::default()
    )
    .is_err());
}

#[test]
fn test_rejects_ball_larger_than_arena() {
    let arena = Arena::new(10.0, 6.0).unwrap();

    let err = Simulation::with_balls(
        arena,
        vec![ball(5.0, 3.0, 0.0, 0.0, 3.5)],
        SimConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::BallTooLarge { index: 0, .. }));

    // Exactly as wide as the short side still fits
    assert!(Simulation::with_balls(
        arena,
        vec![ball(5.0, 3.0, 0.0, 0.0, 3.0)],
        SimConfig::default()
    )
    .is_ok());
}

#[test]
fn test_out_of_bounds_start_is_accepted() {
    let sim = simulation(
        10.0,
        10.0,
        vec![ball(-1.0, 20.0, 0.0, 0.0, 0.5)],
        SimConfig::default(),
    );
    assert_eq!(sim.balls()[0].position, DVec2::new(-1.0, 20.0));
}

#[test]
fn test_rejects_invalid_config() {
    let arena = Arena::new(10.0, 10.0).unwrap();
    let config = SimConfig {
        collision_margin: -0.5,
        ..SimConfig::default()
    };

    let err = Simulation::with_balls(arena, Vec::new(), config).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

#[test]
fn test_step_rejects_bad_timestep() {
    let mut sim = Simulation::new(10.0, 10.0).unwrap();
    let before = sim.balls().to_vec();

    assert_eq!(sim.step(0.0), Err(SimError::InvalidTimestep(0.0)));
    assert_eq!(sim.step(-0.1), Err(SimError::InvalidTimestep(-0.1)));
    assert!(matches!(sim.step(f64::NAN), Err(SimError::InvalidTimestep(_))));
    assert!(sim.step(f64::INFINITY).is_err());

    assert_eq!(sim.balls(), before.as_slice());
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.elapsed(), 0.0);
}

#[test]
fn test_empty_simulation_steps() {
    let arena = Arena::new(10.0, 10.0).unwrap();
    let mut sim = Simulation::with_balls(arena, Vec::new(), SimConfig::default()).unwrap();

    assert!(sim.is_empty());
    sim.step(0.5).unwrap();
    assert_eq!(sim.steps(), 1);
}

#[test]
fn test_accessors() {
    let mut sim = Simulation::new(10.0, 10.0).unwrap();

    assert!(sim.ball(1).is_some());
    assert!(sim.ball(2).is_none());
    assert_eq!(sim.arena().width(), 10.0);
    assert_eq!(sim.arena().height(), 10.0);

    for _ in 0..4 {
        sim.step(0.25).unwrap();
    }
    assert_eq!(sim.steps(), 4);
    assert!(approx_eq(sim.elapsed(), 1.0, 1e-12));
}

#[test]
fn test_color_does_not_affect_motion() {
    let plain = ball(2.0, 3.0, 1.0, 1.0, 0.3);
    let tagged = plain.clone().with_color("green");

    let mut a = simulation(10.0, 10.0, vec![plain], SimConfig::default());
    let mut b = simulation(10.0, 10.0, vec![tagged], SimConfig::default());
    for _ in 0..200 {
        a.step(0.01).unwrap();
        b.step(0.01).unwrap();
    }

    assert_eq!(a.balls()[0].position, b.balls()[0].position);
    assert_eq!(a.balls()[0].velocity, b.balls()[0].velocity);
}
