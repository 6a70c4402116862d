//! Game state container
//!
//! Everything the driver mutates lives in one explicit struct owned by the
//! shell: the player, the platform set, scenery, fuel, and the patrol
//! script. No process-wide state anywhere.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Entity, EntityKind};
use super::level::{LevelDef, PadKind, TEX_SUB};
use crate::Tuning;
use crate::consts::*;

/// Terminal result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Settled onto a docking pad
    Docked,
    /// Touched a hazard or drifted out of the trench
    Wrecked,
}

/// Scripted-motion state for the patrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patrol {
    /// Index of the patrolling entity in `platforms`
    pub index: usize,
    /// Center the path oscillates around
    pub center: Vec2,
    /// Angle advance per simulated second
    pub rate: f32,
    /// Monotonic angle accumulator
    pub angle: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Flight model in effect for this run
    pub tuning: Tuning,
    /// The sub
    pub player: Entity,
    /// Collidable platform set, in level order
    pub platforms: Vec<Entity>,
    /// Decorative entities (backdrop, points overlay)
    pub scenery: Vec<Entity>,
    /// Present when the level has a patrolling hazard
    pub patrol: Option<Patrol>,
    /// Remaining thrust fuel
    pub fuel: i32,
    /// Simulation tick counter
    pub ticks: u64,
}

impl GameState {
    /// Build a run from a level definition and tuning. All transforms are
    /// refreshed so a renderer can draw frame zero immediately.
    pub fn new(level: &LevelDef, tuning: Tuning) -> Self {
        let scenery = level
            .scenery
            .iter()
            .map(|def| {
                let mut item = Entity::new(EntityKind::Item, def.texture);
                item.pos = def.pos.extend(0.0);
                item.set_scale(def.scale);
                item.refresh_transform();
                item
            })
            .collect();

        let mut platforms = Vec::with_capacity(level.platforms.len());
        let mut patrol = None;
        for (index, def) in level.platforms.iter().enumerate() {
            let mut body = Entity::new(EntityKind::Platform, def.texture);
            body.pos = def.pos.extend(0.0);
            body.set_dimensions(def.size);
            match def.kind {
                PadKind::Dock => body.mark_win(),
                PadKind::Hazard => body.mark_lose(),
            }
            if let Some(path) = def.patrol {
                patrol = Some(Patrol {
                    index,
                    center: path.center,
                    rate: path.rate,
                    angle: 0.0,
                });
            }
            body.refresh_transform();
            platforms.push(body);
        }

        let mut player = Entity::new(EntityKind::Player, TEX_SUB);
        player.pos = level.player_start.extend(0.0);
        player.set_dimensions(level.player_size);
        player.speed = tuning.player_speed;
        player.accel = Vec3::new(0.0, tuning.gravity, 0.0);
        // Two-column sprite atlas: frame 0 looks left, frame 1 looks right
        player.atlas_cols = 2;
        player.animation.set(Direction::Left, vec![0]);
        player.animation.set(Direction::Right, vec![1]);
        player.facing = Direction::Left;
        player.refresh_transform();

        log::info!(
            "run start: {} platforms, fuel {}",
            platforms.len(),
            tuning.fuel_capacity
        );

        Self {
            tuning,
            player,
            platforms,
            scenery,
            patrol,
            fuel: tuning.fuel_capacity,
            ticks: 0,
        }
    }

    /// Terminal result, if the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        if self.player.has_won() {
            Some(Outcome::Docked)
        } else if self.player.has_lost() {
            Some(Outcome::Wrecked)
        } else {
            None
        }
    }

    /// Simulated seconds since launch
    pub fn sim_time(&self) -> f32 {
        self.ticks as f32 * SIM_DT
    }

    /// Win-designated platforms
    pub fn docks(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.platforms.iter().filter(|p| p.has_won())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::trench_level;

    #[test]
    fn construction_matches_the_level() {
        let level = trench_level();
        let state = GameState::new(&level, Tuning::default());

        assert_eq!(state.platforms.len(), 13);
        assert_eq!(state.scenery.len(), 2);
        assert_eq!(state.docks().count(), 5);
        assert_eq!(state.fuel, Tuning::default().fuel_capacity);
        assert_eq!(state.ticks, 0);
        assert!(state.outcome().is_none());

        let patrol = state.patrol.as_ref().unwrap();
        assert_eq!(patrol.index, 5);
        assert_eq!(patrol.center, Vec2::new(3.0, 2.0));
        assert_eq!(patrol.angle, 0.0);

        let player = &state.player;
        assert_eq!(player.kind, EntityKind::Player);
        assert_eq!(player.pos, Vec3::new(-3.0, 2.0, 0.0));
        assert_eq!(player.width, 0.6);
        assert_eq!(player.height, 0.8);
        assert_eq!(player.vel, Vec3::ZERO);
        assert_eq!(player.accel.y, Tuning::default().gravity);
        assert_eq!(player.facing, Direction::Left);
    }

    #[test]
    fn scenery_scales_without_collision_extents() {
        let state = GameState::new(&trench_level(), Tuning::default());
        for item in &state.scenery {
            assert_eq!(item.kind, EntityKind::Item);
            assert_eq!(item.scale.x, 10.0);
            // Collision box stays at the 1x1 default; scenery is never
            // passed to the resolver anyway
            assert_eq!(item.width, 1.0);
        }
    }

    #[test]
    fn outcome_maps_the_player_flags() {
        let level = trench_level();

        let mut state = GameState::new(&level, Tuning::default());
        state.player.mark_win();
        assert_eq!(state.outcome(), Some(Outcome::Docked));

        let mut state = GameState::new(&level, Tuning::default());
        state.player.mark_lose();
        assert_eq!(state.outcome(), Some(Outcome::Wrecked));
    }

    #[test]
    fn sim_time_counts_ticks() {
        let mut state = GameState::new(&trench_level(), Tuning::default());
        state.ticks = 120;
        assert!((state.sim_time() - 2.0).abs() < 1e-6);
    }
}
