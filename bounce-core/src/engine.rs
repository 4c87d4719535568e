use crate::collision::resolve_collisions;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::integrator::{apply_gravity, integrate, reflect_at_border};
use glam::DVec2;

/// Rectangular region bounding all ball motion, origin at (0, 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: f64,
    height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Arena extent as a vector (width, height)
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Whether a ball of this radius can rest somewhere inside the arena
    pub fn fits(&self, radius: f64) -> bool {
        2.0 * radius <= self.width.min(self.height)
    }

    /// Whether the center lies in `[r, w - r] x [r, h - r]`
    pub fn contains(&self, center: DVec2, radius: f64) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }
}

/// A ball in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Also used as the ball's mass
    pub radius: f64,
    /// Display tag, ignored by the physics
    pub color: Option<String>,
    /// Time since the last resolved ball-ball collision
    pub collision_cooldown: Option<f64>,
}

impl Ball {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            color: None,
            collision_cooldown: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// True while the last collision is more recent than `window`
    pub fn cooling_down(&self, window: f64) -> bool {
        matches!(self.collision_cooldown, Some(t) if t < window)
    }

    pub(crate) fn tick_cooldown(&mut self, dt: f64) {
        if let Some(t) = self.collision_cooldown.as_mut() {
            *t += dt;
        }
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.collision_cooldown = Some(0.0);
    }
}

/// Running totals of the events seen by [`Simulation::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub wall_reflections: u64,
    pub collisions: u64,
    /// Contacts ignored because of the cooldown or coincident centers
    pub skipped_collisions: u64,
}

/// The bouncing balls world
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: Arena,
    balls: Vec<Ball>,
    config: SimConfig,
    elapsed: f64,
    steps: u64,
    stats: StepStats,
}

/// The two-ball layout used when no balls are given
pub fn demo_balls(width: f64, height: f64) -> Vec<Ball> {
    vec![
        Ball::new(
            DVec2::new(width / 3.0, height * 0.9),
            DVec2::new(1.2, 1.6),
            0.2,
        )
        .with_color("red"),
        Ball::new(
            DVec2::new(2.0 * width / 3.0, height * 0.7),
            DVec2::new(-0.6, 0.6),
            0.3,
        )
        .with_color("blue"),
    ]
}

impl Simulation {
    /// Arena of the given size seeded with [`demo_balls`] and default settings
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        let arena = Arena::new(width, height)?;
        Self::with_balls(arena, demo_balls(width, height), SimConfig::default())
    }

    pub fn with_balls(
        arena: Arena,
        balls: Vec<Ball>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        config.validate()?;
        for (index, ball) in balls.iter().enumerate() {
            if !ball.radius.is_finite() || ball.radius <= 0.0 {
                return Err(SimError::InvalidRadius {
                    index,
                    radius: ball.radius,
                });
            }
            if !arena.fits(ball.radius) {
                return Err(SimError::BallTooLarge {
                    index,
                    radius: ball.radius,
                    width: arena.width(),
                    height: arena.height(),
                });
            }
        }

        log::debug!(
            "simulation created: {} x {} arena, {} balls, {:?} collisions",
            arena.width(),
            arena.height(),
            balls.len(),
            config.collision_model
        );

        Ok(Self {
            arena,
            balls,
            config,
            elapsed: 0.0,
            steps: 0,
            stats: StepStats::default(),
        })
    }

    /// Advance every ball by `dt`.
    ///
    /// Each ball, in index order: wall reflection, position update with the
    /// (possibly reflected) velocity, gravity, then collisions against all
    /// balls with a lower index. Later balls therefore see velocities that
    /// earlier balls already changed during this step.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }

        for index in 0..self.balls.len() {
            let ball = &mut self.balls[index];
            ball.tick_cooldown(dt);

            if reflect_at_border(ball, &self.arena, self.config.collision_margin) {
                self.stats.wall_reflections += 1;
                log::trace!("ball {} reflected at {:?}", index, ball.position);
            }
            integrate(ball, dt);
            apply_gravity(ball, self.config.gravity, dt);

            let outcome = resolve_collisions(&mut self.balls, index, &self.config);
            self.stats.collisions += outcome.resolved;
            self.stats.skipped_collisions += outcome.skipped;
        }

        self.elapsed += dt;
        self.steps += 1;
        Ok(())
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, index: usize) -> Option<&Ball> {
        self.balls.get(index)
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulated time so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }
}
