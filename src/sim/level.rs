//! Level layout definitions
//!
//! A level is pure data: platform placements with win/lose designations,
//! optional patrol parameters for a scripted hazard, decorative scenery,
//! and the player's start. Built once before the simulation loop starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::TextureId;

/// Texture handles the rendering shell maps to its own assets
pub const TEX_BACKDROP: TextureId = TextureId(0);
pub const TEX_OVERLAY: TextureId = TextureId(1);
pub const TEX_PAD: TextureId = TextureId(2);
pub const TEX_DANGER: TextureId = TextureId(3);
pub const TEX_LEVIATHAN: TextureId = TextureId(4);
pub const TEX_SUB: TextureId = TextureId(5);

/// Whether landing on a platform wins or wrecks the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadKind {
    /// Docking here wins
    Dock,
    /// Touching this wrecks the sub
    Hazard,
}

/// Scripted oscillation for a patrolling hazard
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolDef {
    /// Center the path oscillates around
    pub center: Vec2,
    /// Angle accumulator advance per simulated second
    pub rate: f32,
}

/// One platform placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformDef {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PadKind,
    pub texture: TextureId,
    /// Present only on the patrolling hazard
    pub patrol: Option<PatrolDef>,
}

/// Decorative scenery: rendered, never collided with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenicDef {
    pub pos: Vec2,
    pub scale: Vec2,
    pub texture: TextureId,
}

/// A complete level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub platforms: Vec<PlatformDef>,
    pub scenery: Vec<ScenicDef>,
    pub player_start: Vec2,
    pub player_size: Vec2,
}

impl LevelDef {
    fn platform(pos: (f32, f32), size: (f32, f32), kind: PadKind, texture: TextureId) -> PlatformDef {
        PlatformDef {
            pos: Vec2::new(pos.0, pos.1),
            size: Vec2::new(size.0, size.1),
            kind,
            texture,
            patrol: None,
        }
    }
}

/// The stock trench: five docking pads, a patrolling leviathan, and seven
/// static hazards walling off the approaches. Pad visuals (point values)
/// are baked into the overlay art, so docks reuse one plain texture.
pub fn trench_level() -> LevelDef {
    use PadKind::*;

    let mut platforms = vec![
        // Docking pads, easiest to hardest approach
        LevelDef::platform((-4.0, -0.9), (0.8, 1.0), Dock, TEX_PAD),
        LevelDef::platform((-0.5, 0.6), (0.6, 1.0), Dock, TEX_PAD),
        LevelDef::platform((0.9, -0.8), (0.7, 1.0), Dock, TEX_PAD),
        LevelDef::platform((-1.7, -1.0), (0.8, 1.0), Dock, TEX_PAD),
        LevelDef::platform((2.1, -2.5), (0.5, 1.0), Dock, TEX_PAD),
        // The leviathan sweeps a lissajous path over the right docks
        LevelDef::platform((3.0, 2.0), (1.5, 1.0), Hazard, TEX_LEVIATHAN),
        // Static hazards
        LevelDef::platform((-2.4, -0.5), (0.5, 2.5), Hazard, TEX_DANGER),
        LevelDef::platform((-4.7, -0.5), (0.5, 1.0), Hazard, TEX_DANGER),
        LevelDef::platform((-3.1, -1.2), (0.8, 1.0), Hazard, TEX_DANGER),
        LevelDef::platform((-0.6, -0.5), (1.3, 2.5), Hazard, TEX_DANGER),
        LevelDef::platform((0.3, -0.9), (0.6, 1.0), Hazard, TEX_DANGER),
        LevelDef::platform((1.5, -1.1), (0.6, 2.5), Hazard, TEX_DANGER),
        LevelDef::platform((3.7, -1.3), (2.5, 1.4), Hazard, TEX_DANGER),
    ];
    platforms[5].patrol = Some(PatrolDef {
        center: Vec2::new(3.0, 2.0),
        rate: 1.0,
    });

    LevelDef {
        platforms,
        scenery: vec![
            ScenicDef {
                pos: Vec2::ZERO,
                scale: Vec2::new(10.0, 10.0),
                texture: TEX_BACKDROP,
            },
            ScenicDef {
                pos: Vec2::ZERO,
                scale: Vec2::new(10.0, 10.0),
                texture: TEX_OVERLAY,
            },
        ],
        player_start: Vec2::new(-3.0, 2.0),
        player_size: Vec2::new(0.6, 0.8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn trench_layout_shape() {
        let level = trench_level();
        assert_eq!(level.platforms.len(), 13);

        let docks = level
            .platforms
            .iter()
            .filter(|p| p.kind == PadKind::Dock)
            .count();
        assert_eq!(docks, 5);

        // Exactly one patroller, and it is a hazard
        let patrollers: Vec<_> = level
            .platforms
            .iter()
            .filter(|p| p.patrol.is_some())
            .collect();
        assert_eq!(patrollers.len(), 1);
        assert_eq!(patrollers[0].kind, PadKind::Hazard);
        assert_eq!(patrollers[0].patrol.unwrap().rate, 1.0);
    }

    #[test]
    fn trench_fits_the_visible_world() {
        let level = trench_level();
        for p in &level.platforms {
            assert!(p.pos.x.abs() <= WORLD_HALF_WIDTH, "{:?} off-screen", p.pos);
            assert!(p.pos.y.abs() <= WORLD_HALF_HEIGHT, "{:?} off-screen", p.pos);
        }
        assert!(level.player_start.x.abs() < WORLD_BOUND_X);
    }

    #[test]
    fn level_round_trips_through_json() {
        let level = trench_level();
        let json = serde_json::to_string(&level).unwrap();
        let back: LevelDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platforms.len(), level.platforms.len());
        assert_eq!(back.player_start, level.player_start);
    }
}
