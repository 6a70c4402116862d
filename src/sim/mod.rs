//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable entity order (player steps against the platform list as built)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod entity;
pub mod level;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use entity::{AnimationSet, Direction, Entity, EntityKind, TextureId};
pub use level::{LevelDef, PadKind, PatrolDef, PlatformDef, ScenicDef, trench_level};
pub use state::{GameState, Outcome, Patrol};
pub use tick::{Stepper, TickInput, step};
