use crate::config::CollisionModel;
use crate::diagnostics::Span;
use crate::engine::demo_balls;
use glam::DVec2;

/// A parsed scenario file
#[derive(Debug, Clone)]
pub struct Scenario {
    pub arena: ArenaDecl,
    pub balls: Vec<BallDecl>,
    pub physics: PhysicsDecl,
    pub simulate: SimulateDecl,
    pub detectors: Vec<DetectorDecl>,
}

impl Scenario {
    /// Names of the balls a run will contain. Without any `ball` line the
    /// demo layout is used and its balls are named `b0`, `b1`, ...
    pub fn ball_names(&self) -> Vec<String> {
        if self.balls.is_empty() {
            indexed_ball_names(demo_balls(self.arena.width, self.arena.height).len())
        } else {
            self.balls.iter().map(|b| b.name.clone()).collect()
        }
    }
}

/// `b0`, `b1`, ... for balls that were not named in a scenario
pub fn indexed_ball_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("b{}", i)).collect()
}

/// Arena declaration: `arena width = w height = h`
#[derive(Debug, Clone)]
pub struct ArenaDecl {
    pub width: f64,
    pub height: f64,
    pub span: Option<Span>,
}

/// Ball declaration: `ball name at (x, y) [vel (vx, vy)] radius r [color c]`
#[derive(Debug, Clone)]
pub struct BallDecl {
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub color: Option<String>,
    pub span: Option<Span>,
}

/// Physics overrides; `None` keeps the default
#[derive(Debug, Clone, Default)]
pub struct PhysicsDecl {
    /// `gravity g = value`
    pub gravity: Option<f64>,
    /// `margin value`
    pub margin: Option<f64>,
    /// `collision model = name [cooldown = value]`
    pub model: Option<CollisionModel>,
    pub cooldown: Option<f64>,
}

/// Run length: `simulate dt = x steps = n`
#[derive(Debug, Clone)]
pub struct SimulateDecl {
    pub dt: f64,
    pub steps: usize,
    pub span: Option<Span>,
}

/// Detector declaration: `detect name = kind(...)`
#[derive(Debug, Clone)]
pub struct DetectorDecl {
    pub name: String,
    pub kind: DetectorKind,
    pub span: Option<Span>,
}

/// Detector kinds
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorKind {
    PositionX(String), // position(a) or position(a).x
    PositionY(String), // position(a).y
    VelocityX(String), // velocity(a).x
    VelocityY(String), // velocity(a).y
    Speed(String),     // speed(a)
    Distance { a: String, b: String },
}

impl DetectorKind {
    /// Ball names this detector reads
    pub fn balls(&self) -> Vec<&str> {
        match self {
            DetectorKind::PositionX(name)
            | DetectorKind::PositionY(name)
            | DetectorKind::VelocityX(name)
            | DetectorKind::VelocityY(name)
            | DetectorKind::Speed(name) => vec![name.as_str()],
            DetectorKind::Distance { a, b } => vec![a.as_str(), b.as_str()],
        }
    }
}
