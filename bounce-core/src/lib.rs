//! # Bounce Core
//!
//! Discrete-time simulation of balls bouncing in a rectangular arena under
//! gravity, with wall reflection and pairwise momentum transfer.
//!
//! - `engine`: Arena, Ball and the Simulation that owns them
//! - `integrator`: wall reflection, forward Euler and gravity for one ball
//! - `collision`: ball-ball contact and velocity exchange
//! - `config`: tuning parameters
//! - `parser`, `analyzer`, `runtime`: scenario files driving a simulation

pub mod analyzer;
pub mod ast;
pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod parser;
pub mod runtime;

pub use analyzer::analyze_scenario;
pub use config::{CollisionModel, Params, SimConfig};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, SourceLocation, Span};
pub use engine::{demo_balls, Arena, Ball, Simulation, StepStats};
pub use error::SimError;
pub use parser::{parse_scenario, ParseError};
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, evaluate_detectors,
    get_ball_states, run_scenario, snapshot, step_simulation, BallState, DetectorResult, Frame,
    ScenarioError, SimulationContext, SimulationResult,
};
