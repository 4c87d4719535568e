use crate::analyzer::analyze_scenario;
use crate::ast::{indexed_ball_names, DetectorDecl, DetectorKind, Scenario};
use crate::config::SimConfig;
use crate::diagnostics::Diagnostics;
use crate::engine::{demo_balls, Arena, Ball, Simulation};
use crate::error::SimError;
use crate::parser::{parse_scenario, ParseError};
use serde::Serialize;
use thiserror::Error;

/// Anything that can stop a scenario from running
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("scenario has errors:\n{0}")]
    Analysis(Diagnostics),

    #[error(transparent)]
    Simulation(#[from] SimError),

    #[error("unknown ball '{0}'")]
    UnknownBall(String),
}

/// Result of a detector evaluation
#[derive(Debug, Clone, Serialize)]
pub struct DetectorResult {
    pub name: String,
    pub value: f64,
}

/// Final result of running a scenario
#[derive(Debug, Serialize)]
pub struct SimulationResult {
    pub steps: u64,
    pub time: f64,
    pub detectors: Vec<DetectorResult>,
}

/// Read-only copy of one ball, handed to renderers and printers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallState {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// All balls at one instant
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub step: u64,
    pub time: f64,
    pub balls: Vec<BallState>,
}

/// A simulation built from a scenario, ready to be stepped
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub simulation: Simulation,
    pub names: Vec<String>,
    pub dt: f64,
    pub steps: usize,
    pub detectors: Vec<DetectorDecl>,
}

impl SimulationContext {
    /// Wrap a simulation built in code; its balls are named `b0`, `b1`, ...
    pub fn from_simulation(simulation: Simulation, dt: f64, steps: usize) -> Self {
        let names = indexed_ball_names(simulation.len());
        Self {
            simulation,
            names,
            dt,
            steps,
            detectors: Vec::new(),
        }
    }
}

/// Main entry point: parse, check and run a scenario, then read its detectors
pub fn run_scenario(source: &str) -> Result<SimulationResult, ScenarioError> {
    let mut ctx = build_simulation_context_from_source(source)?;

    for _ in 0..ctx.steps {
        step_simulation(&mut ctx)?;
    }

    let detectors = evaluate_detectors(&ctx)?;
    Ok(SimulationResult {
        steps: ctx.simulation.steps(),
        time: ctx.simulation.elapsed(),
        detectors,
    })
}

/// Parse and analyze `source`, then build its simulation.
///
/// Analyzer errors abort the build; warnings are logged.
pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<SimulationContext, ScenarioError> {
    let scenario = parse_scenario(source)?;

    let diagnostics = analyze_scenario(&scenario);
    if diagnostics.has_errors() {
        return Err(ScenarioError::Analysis(diagnostics));
    }
    for warning in diagnostics.warnings() {
        log::warn!("{}", warning);
    }

    build_simulation_context(&scenario)
}

/// Build a simulation from a parsed scenario
pub fn build_simulation_context(scenario: &Scenario) -> Result<SimulationContext, ScenarioError> {
    let arena = Arena::new(scenario.arena.width, scenario.arena.height)?;
    let config = scenario_config(scenario);

    let balls = if scenario.balls.is_empty() {
        demo_balls(arena.width(), arena.height())
    } else {
        scenario
            .balls
            .iter()
            .map(|decl| {
                let ball = Ball::new(decl.position, decl.velocity, decl.radius);
                match &decl.color {
                    Some(color) => ball.with_color(color.clone()),
                    None => ball,
                }
            })
            .collect()
    };

    let simulation = Simulation::with_balls(arena, balls, config)?;

    Ok(SimulationContext {
        simulation,
        names: scenario.ball_names(),
        dt: scenario.simulate.dt,
        steps: scenario.simulate.steps,
        detectors: scenario.detectors.clone(),
    })
}

/// Default settings with the scenario's overrides applied
pub fn scenario_config(scenario: &Scenario) -> SimConfig {
    let defaults = SimConfig::default();
    let physics = &scenario.physics;
    SimConfig {
        gravity: physics.gravity.unwrap_or(defaults.gravity),
        collision_margin: physics.margin.unwrap_or(defaults.collision_margin),
        collision_model: physics.model.unwrap_or(defaults.collision_model),
        collision_cooldown: physics.cooldown.unwrap_or(defaults.collision_cooldown),
    }
}

/// Advance the context by its configured time step
pub fn step_simulation(ctx: &mut SimulationContext) -> Result<(), ScenarioError> {
    ctx.simulation.step(ctx.dt)?;
    Ok(())
}

/// Snapshot of every ball, in simulation order
pub fn get_ball_states(ctx: &SimulationContext) -> Vec<BallState> {
    ctx.simulation
        .balls()
        .iter()
        .zip(&ctx.names)
        .map(|(ball, name)| BallState {
            name: name.clone(),
            x: ball.position.x,
            y: ball.position.y,
            vx: ball.velocity.x,
            vy: ball.velocity.y,
            radius: ball.radius,
            color: ball.color.clone(),
        })
        .collect()
}

/// Current frame: step count, simulated time and ball states
pub fn snapshot(ctx: &SimulationContext) -> Frame {
    Frame {
        step: ctx.simulation.steps(),
        time: ctx.simulation.elapsed(),
        balls: get_ball_states(ctx),
    }
}

/// Evaluate all detectors on the current state
pub fn evaluate_detectors(ctx: &SimulationContext) -> Result<Vec<DetectorResult>, ScenarioError> {
    ctx.detectors
        .iter()
        .map(|detector| {
            let value = match &detector.kind {
                DetectorKind::PositionX(name) => find_ball(ctx, name)?.position.x,
                DetectorKind::PositionY(name) => find_ball(ctx, name)?.position.y,
                DetectorKind::VelocityX(name) => find_ball(ctx, name)?.velocity.x,
                DetectorKind::VelocityY(name) => find_ball(ctx, name)?.velocity.y,
                DetectorKind::Speed(name) => find_ball(ctx, name)?.velocity.length(),
                DetectorKind::Distance { a, b } => {
                    find_ball(ctx, a)?.position.distance(find_ball(ctx, b)?.position)
                }
            };
            Ok(DetectorResult {
                name: detector.name.clone(),
                value,
            })
        })
        .collect()
}

fn find_ball<'a>(ctx: &'a SimulationContext, name: &str) -> Result<&'a Ball, ScenarioError> {
    ctx.names
        .iter()
        .position(|n| n == name)
        .and_then(|idx| ctx.simulation.ball(idx))
        .ok_or_else(|| ScenarioError::UnknownBall(name.to_string()))
}
