//! Abyss Lander - a lander-style descent game in a deep-sea trench
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven flight model balance
//! - `hud`: Presentation model read by rendering shells
//! - `autopilot`: Scripted demo pilot for headless runs

pub mod autopilot;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real-time frame the driver will fold into the accumulator
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Horizontal world extent; drifting past either side wrecks the sub
    pub const WORLD_BOUND_X: f32 = 4.8;
    /// Half-extents of the visible trench (ortho projection in the shell)
    pub const WORLD_HALF_WIDTH: f32 = 5.0;
    pub const WORLD_HALF_HEIGHT: f32 = 3.75;

    /// Hazard signage blink cycle, counted in rendered frames
    pub const BLINK_PERIOD_FRAMES: u64 = 10_000;
    /// Frames of each cycle during which signage is visible
    pub const BLINK_ON_FRAMES: u64 = 5_000;

    /// Sprite animation rate (frames per second)
    pub const ANIMATION_FPS: f32 = 4.0;
}

/// Step a value toward a target without overshooting
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}
