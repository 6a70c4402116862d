//! Scripted demo pilot
//!
//! Flies the sub toward a docking pad using the same [`TickInput`] a human
//! player would produce, one input per fixed tick. Fully deterministic for
//! a given seed: a seeded aim offset and occasional coast ticks keep
//! repeated demo runs from looking identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameState, TickInput};

/// Vertical speed below which the pilot lets the sub sink freely
const SAFE_SINK_RATE: f32 = -0.35;
/// Horizontal alignment slack before the pilot stops correcting
const ALIGN_DEADBAND: f32 = 0.05;
/// Odds per tick that the pilot drops its hands and coasts
const COAST_JITTER: f32 = 0.04;
/// Ticks the pilot lingers on the final frame before asking to quit
const QUIT_GRACE_TICKS: u32 = 60;

/// Heuristic pilot: pick the reachable pad closest to the start, line up
/// above it, and ride gravity down, burning lift only to arrest the fall.
#[derive(Debug, Clone)]
pub struct Autopilot {
    seed: u64,
    rng: Pcg32,
    /// Per-run horizontal aim offset, in units of the target pad's half-width
    drift: f32,
    /// Index into `platforms` of the chosen pad
    target: Option<usize>,
    /// Ticks spent looking at a finished run
    linger: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut pilot = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            drift: 0.0,
            target: None,
            linger: 0,
        };
        pilot.reset(seed);
        pilot
    }

    /// Re-seed for a fresh run
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.drift = self.rng.random_range(-0.3..0.3);
        self.target = None;
        self.linger = 0;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Choose the dock nearest the player, by horizontal distance first so
    /// the approach stays over open water as long as possible.
    fn choose_target(&mut self, state: &GameState) -> Option<usize> {
        if self.target.is_some() {
            return self.target;
        }
        let from = state.player.pos;
        self.target = state
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active && p.has_won())
            .min_by(|(_, a), (_, b)| {
                let da = (a.pos.x - from.x).abs() * 2.0 + (a.pos.y - from.y).abs();
                let db = (b.pos.x - from.x).abs() * 2.0 + (b.pos.y - from.y).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index);
        self.target
    }

    /// Produce the input for the next tick. Once the run ends the pilot
    /// lingers for a beat, then asks the shell to quit.
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        if state.outcome().is_some() {
            self.linger += 1;
            input.quit = self.linger > QUIT_GRACE_TICKS;
            return input;
        }

        // Seeded coast tick
        if self.rng.random_range(0.0..1.0) < COAST_JITTER {
            return input;
        }

        let Some(index) = self.choose_target(state) else {
            return input;
        };

        let player = &state.player;
        let pad = &state.platforms[index];
        let aim_x = pad.pos.x + self.drift * pad.width / 2.0;
        let dx = aim_x - player.pos.x;
        let pad_top = pad.pos.y + pad.height / 2.0;
        let height_above_pad = (player.pos.y - player.height / 2.0) - pad_top;

        let aligned = dx.abs() <= ALIGN_DEADBAND + pad.width / 4.0;
        let sinking_fast = player.vel.y < SAFE_SINK_RATE;
        // Kill leftover sideways acceleration once lined up
        let carrying_thrust = player.accel.x * dx <= 0.0 && player.accel.x != 0.0;

        if !aligned && dx > 0.0 {
            input.thrust_right = true;
        } else if !aligned && dx < 0.0 {
            input.thrust_left = true;
        } else if carrying_thrust {
            // Counter-burn against the stale acceleration
            if player.accel.x > 0.0 {
                input.thrust_left = true;
            } else {
                input.thrust_right = true;
            }
        } else if sinking_fast && height_above_pad < 1.5 {
            input.thrust_up = true;
        }

        // Ease downward with movement intent while high over the pad
        if aligned && !sinking_fast && height_above_pad > 0.1 {
            input.movement = Vec2::new(0.0, -0.5);
        }

        input
    }
}
