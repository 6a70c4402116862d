//! Data-driven flight model balance
//!
//! Everything that shapes how the sub handles lives here so a JSON file can
//! rebalance the game without touching simulation code. Horizontal thrust
//! and drag are per-tick nudges to acceleration; gravity and lift are plain
//! accelerations in world units.

use serde::{Deserialize, Serialize};

/// Flight model parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Forces ===
    /// Constant downward acceleration (world units/s²)
    pub gravity: f32,
    /// Upward acceleration while lift thrust is held
    pub lift_accel: f32,

    // === Horizontal thrust ===
    /// Acceleration added per thrust tick
    pub thrust_rate: f32,
    /// Hard cap on horizontal acceleration magnitude
    pub max_thrust_accel: f32,
    /// Per-tick pullback of horizontal acceleration while coasting
    pub drag: f32,

    // === The sub ===
    /// Movement-intent speed multiplier
    pub player_speed: f32,

    // === Fuel ===
    /// Fuel units at launch
    pub fuel_capacity: i32,
    /// Fuel burned per thrust tick
    pub fuel_per_thrust: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -0.09,
            lift_accel: 0.2,

            thrust_rate: 0.01,
            max_thrust_accel: 20.0,
            drag: 0.001,

            player_speed: 1.0,

            fuel_capacity: 100_000,
            fuel_per_thrust: 1,
        }
    }
}

impl Tuning {
    /// Parse a tuning override file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
