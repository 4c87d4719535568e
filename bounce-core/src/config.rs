use crate::error::SimError;
use serde::{Deserialize, Serialize};

/// Default physics parameters
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Gravity, y axis pointing up
    pub const GRAVITY: f64 = -9.8;

    // Collisions
    pub const COLLISION_MARGIN: f64 = 0.01;
    pub const COLLISION_COOLDOWN: f64 = 0.0; // debounce disabled

    // Demo driver
    pub const DEMO_WIDTH: f64 = 10.0;
    pub const DEMO_HEIGHT: f64 = 10.0;
    pub const DEMO_DT: f64 = 1.0 / 60.0;
}

/// How two touching balls exchange velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionModel {
    /// Swap the velocity projections on the line of centers and drop the
    /// tangential part. Equal masses are assumed whatever the radii.
    #[default]
    Simplified,
    /// Mass-weighted elastic exchange with mass taken as the radius.
    /// The tangential part of each velocity is kept.
    Elastic,
}

impl CollisionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionModel::Simplified => "simplified",
            CollisionModel::Elastic => "elastic",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simplified" | "swap" => Some(CollisionModel::Simplified),
            "elastic" => Some(CollisionModel::Elastic),
            _ => None,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Vertical acceleration applied every step
    pub gravity: f64,
    /// Slack added to wall and ball contact checks
    pub collision_margin: f64,
    pub collision_model: CollisionModel,
    /// Minimum time between two resolved collisions of the same ball
    pub collision_cooldown: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: Params::GRAVITY,
            collision_margin: Params::COLLISION_MARGIN,
            collision_model: CollisionModel::default(),
            collision_cooldown: Params::COLLISION_COOLDOWN,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same settings with gravity switched off
    pub fn without_gravity(self) -> Self {
        Self {
            gravity: 0.0,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !self.collision_margin.is_finite() || self.collision_margin < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "collision margin must be a non-negative number, got {}",
                self.collision_margin
            )));
        }
        if !self.collision_cooldown.is_finite() || self.collision_cooldown < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "collision cooldown must be a non-negative number, got {}",
                self.collision_cooldown
            )));
        }
        Ok(())
    }
}
