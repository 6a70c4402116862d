//! Presentation model read by rendering shells
//!
//! The simulation never draws. This module turns a [`GameState`] and a
//! rendered-frame counter into the things a shell actually shows: an
//! ordered list of draw calls and the HUD text lines. Shells map
//! [`TextureId`](crate::sim::TextureId)s to their own assets and blit in
//! the order given.

use glam::{Mat4, Vec3};

use crate::consts::*;
use crate::sim::{Entity, GameState, Outcome, TextureId};

/// World anchor for the fuel readout
pub const FUEL_TEXT_POS: Vec3 = Vec3::new(-4.5, 3.5, 0.0);
/// World anchor for the outcome banner
pub const OUTCOME_TEXT_POS: Vec3 = Vec3::new(-3.5, 1.5, 0.0);

/// One textured quad for the shell to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub texture: TextureId,
    pub transform: Mat4,
    /// Atlas frame for sprite-sheet textures; 0 for plain quads
    pub frame: u32,
}

impl DrawCall {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            texture: entity.texture,
            transform: entity.transform,
            frame: entity.current_frame(),
        }
    }
}

/// Everything a shell needs to present one frame
#[derive(Debug, Clone)]
pub struct HudModel {
    pub draws: Vec<DrawCall>,
    pub fuel_line: String,
    /// Present once the run has ended
    pub outcome_line: Option<String>,
}

/// Hazard signage and the points overlay blink on a fixed frame cycle.
/// A finished run pins them visible so the player can read the board.
pub fn signage_visible(frame: u64, outcome: Option<Outcome>) -> bool {
    outcome.is_some() || frame % BLINK_PERIOD_FRAMES < BLINK_ON_FRAMES
}

/// Build the presentation model for one rendered frame.
///
/// Draw order, back to front: backdrop scenery, the patrolling hazard,
/// then (blink-gated) the points overlay and static hazards, and the sub
/// on top. Docking pads are never drawn; their visuals live in the
/// overlay art.
pub fn build(state: &GameState, frame: u64) -> HudModel {
    let outcome = state.outcome();
    let mut draws = Vec::with_capacity(state.platforms.len() + state.scenery.len() + 1);

    if let Some(backdrop) = state.scenery.first() {
        if backdrop.active {
            draws.push(DrawCall::from_entity(backdrop));
        }
    }

    if let Some(patrol) = &state.patrol {
        let hazard = &state.platforms[patrol.index];
        if hazard.active {
            draws.push(DrawCall::from_entity(hazard));
        }
    }

    if signage_visible(frame, outcome) {
        for overlay in state.scenery.iter().skip(1) {
            if overlay.active {
                draws.push(DrawCall::from_entity(overlay));
            }
        }
        let patrol_index = state.patrol.as_ref().map(|p| p.index);
        for (index, platform) in state.platforms.iter().enumerate() {
            let is_patroller = patrol_index == Some(index);
            if platform.active && platform.has_lost() && !is_patroller {
                draws.push(DrawCall::from_entity(platform));
            }
        }
    }

    if state.player.active {
        draws.push(DrawCall::from_entity(&state.player));
    }

    let outcome_line = outcome.map(|o| {
        match o {
            Outcome::Docked => "Seamoth Parked",
            Outcome::Wrecked => "Seamoth Crashed",
        }
        .to_string()
    });

    HudModel {
        draws,
        fuel_line: format!("Fuel: {}", state.fuel),
        outcome_line,
    }
}
