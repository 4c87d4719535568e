use thiserror::Error;

/// Errors raised when building or advancing a [`Simulation`](crate::Simulation)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("arena dimensions must be positive and finite, got {width} x {height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("ball {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("ball {index} with radius {radius} does not fit inside a {width} x {height} arena")]
    BallTooLarge {
        index: usize,
        radius: f64,
        width: f64,
        height: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
