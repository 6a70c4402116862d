//! Fixed timestep simulation tick
//!
//! One `step` advances the world by exactly `SIM_DT`: input application,
//! the patrol script, the player against the platform set, and the trench
//! boundary check. The `Stepper` folds real frame time into whole steps
//! and carries the remainder, so simulation rate never depends on render
//! rate.

use glam::{Vec2, Vec3};

use super::entity::Direction;
use super::state::GameState;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired movement direction; normalized when longer than unit
    pub movement: Vec2,
    /// Thrust toward the left trench wall
    pub thrust_left: bool,
    /// Thrust toward the right trench wall
    pub thrust_right: bool,
    /// Burn lift against gravity
    pub thrust_up: bool,
    /// Ask the shell to stop its frame loop (the sim ignores it)
    pub quit: bool,
}

/// Apply one tick of input to the player. Exactly one branch fires:
/// left, else right, else lift, else coast. Thrust requires fuel and burns
/// it here — the thrust helpers themselves never see the fuel counter.
/// Coasting bleeds horizontal acceleration and restores gravity.
fn apply_input(state: &mut GameState, input: &TickInput) {
    let t = state.tuning;
    state.player.movement = input.movement.extend(0.0);

    if state.player.has_won() || state.player.has_lost() {
        return;
    }

    if input.thrust_left && state.fuel > 0 {
        state.player.thrust_left(t.thrust_rate, t.max_thrust_accel);
        state.player.facing = Direction::Left;
        state.fuel -= t.fuel_per_thrust;
    } else if input.thrust_right && state.fuel > 0 {
        state.player.thrust_right(t.thrust_rate, t.max_thrust_accel);
        state.player.facing = Direction::Right;
        state.fuel -= t.fuel_per_thrust;
    } else if input.thrust_up && state.fuel > 0 {
        state.player.accel.y = t.lift_accel;
        state.fuel -= t.fuel_per_thrust;
    } else {
        if state.player.accel.x != 0.0 {
            state.player.apply_drag(t.drag);
        }
        state.player.accel.y = t.gravity;
    }
}

/// Advance the world by exactly one fixed timestep. A terminal outcome
/// freezes everything, including the patrol.
pub fn step(state: &mut GameState, input: &TickInput) {
    if state.outcome().is_some() {
        return;
    }

    apply_input(state, input);

    // The patrol moves first so the player resolves against its fresh position
    if let Some(patrol) = state.patrol.as_mut() {
        let hazard = &mut state.platforms[patrol.index];
        hazard.update(SIM_DT, &[]);
        hazard.pos = Vec3::new(
            (patrol.angle / 2.0).cos() + patrol.center.x,
            patrol.angle.sin() + patrol.center.y,
            0.0,
        );
        hazard.refresh_transform();
        patrol.angle += patrol.rate * SIM_DT;
    }

    state.player.update(SIM_DT, &state.platforms);

    if state.player.pos.x.abs() > WORLD_BOUND_X {
        state.player.mark_lose();
    }

    state.ticks += 1;

    if let Some(outcome) = state.outcome() {
        log::info!(
            "run over at tick {}: {:?} (x={:.2}, fuel={})",
            state.ticks,
            outcome,
            state.player.pos.x,
            state.fuel
        );
    }
}

/// Fixed-timestep driver: two variables, the last clock reading and the
/// unconsumed simulated time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stepper {
    previous: f32,
    accumulator: f32,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a monotonic clock reading (seconds) and run the steps that came
    /// due. Stalled frames are truncated to `MAX_FRAME_TIME` before
    /// accumulating.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, now: f32) -> u32 {
        let elapsed = (now - self.previous).min(MAX_FRAME_TIME);
        self.previous = now;
        self.accumulate(state, input, elapsed)
    }

    /// Fold pre-measured elapsed seconds and run the steps that came due,
    /// up to `MAX_SUBSTEPS` per call. Returns the number of steps run;
    /// anything left below one timestep carries to the next frame.
    pub fn accumulate(&mut self, state: &mut GameState, input: &TickInput, elapsed: f32) -> u32 {
        self.accumulator += elapsed;
        if self.accumulator < SIM_DT {
            return 0;
        }

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS && state.outcome().is_none() {
            step(state, input);
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        if state.outcome().is_some() {
            // The world is frozen; drop whole queued steps, keep the fraction
            self.accumulator %= SIM_DT;
        }

        steps
    }

    /// Unconsumed simulated time carried to the next frame
    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::level::trench_level;

    fn fresh_state() -> GameState {
        GameState::new(&trench_level(), Tuning::default())
    }

    /// A state that can never reach an outcome: no platforms, no forces
    fn drifting_state() -> GameState {
        let mut state = fresh_state();
        state.patrol = None;
        state.platforms.clear();
        state.player.accel = Vec3::ZERO;
        state
    }

    #[test]
    fn two_and_a_half_timesteps_run_two_steps() {
        let mut state = drifting_state();
        let mut stepper = Stepper::new();

        let steps = stepper.accumulate(&mut state, &TickInput::default(), 2.5 * SIM_DT);
        assert_eq!(steps, 2);
        assert_eq!(state.ticks, 2);
        assert!((stepper.leftover() - 0.5 * SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn below_one_timestep_nothing_runs() {
        let mut state = drifting_state();
        let mut stepper = Stepper::new();

        assert_eq!(
            stepper.accumulate(&mut state, &TickInput::default(), 0.5 * SIM_DT),
            0
        );
        assert_eq!(state.ticks, 0);
        assert!((stepper.leftover() - 0.5 * SIM_DT).abs() < 1e-7);

        // The carried half step joins the next frame's time
        let steps = stepper.accumulate(&mut state, &TickInput::default(), 0.6 * SIM_DT);
        assert_eq!(steps, 1);
        assert!((stepper.leftover() - 0.1 * SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn substeps_cap_under_a_stalled_frame() {
        let mut state = drifting_state();
        let mut stepper = Stepper::new();

        let steps = stepper.accumulate(&mut state, &TickInput::default(), 1.0);
        assert_eq!(steps, MAX_SUBSTEPS);
        let expected_leftover = 1.0 - MAX_SUBSTEPS as f32 * SIM_DT;
        assert!((stepper.leftover() - expected_leftover).abs() < 1e-5);
    }

    #[test]
    fn advance_truncates_stalled_frames() {
        let mut state = drifting_state();
        let mut stepper = Stepper::new();

        // A five-second stall folds in at most MAX_FRAME_TIME of catch-up
        let steps = stepper.advance(&mut state, &TickInput::default(), 5.0);
        assert!(steps > 0);
        assert!(steps as f32 * SIM_DT <= MAX_FRAME_TIME + 1e-4);
    }

    #[test]
    fn outcome_freezes_the_world() {
        let mut state = fresh_state();
        state.player.mark_win();
        let pos = state.player.pos;
        let fuel = state.fuel;
        let mut stepper = Stepper::new();

        let input = TickInput {
            thrust_left: true,
            ..Default::default()
        };
        let steps = stepper.accumulate(&mut state, &input, 10.0 * SIM_DT);
        assert_eq!(steps, 0);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.fuel, fuel);
        assert_eq!(state.ticks, 0);
        assert!(stepper.leftover() < SIM_DT);
    }

    #[test]
    fn drifting_past_the_wall_wrecks_the_sub() {
        let mut state = drifting_state();
        state.player.pos.x = 4.81;
        step(&mut state, &TickInput::default());
        assert!(state.player.has_lost());

        let mut state = drifting_state();
        state.player.pos.x = -4.81;
        step(&mut state, &TickInput::default());
        assert!(state.player.has_lost());
    }

    #[test]
    fn lift_needs_fuel() {
        let mut state = fresh_state();
        state.fuel = 0;
        let input = TickInput {
            thrust_up: true,
            ..Default::default()
        };
        step(&mut state, &input);
        assert_eq!(state.player.accel.y, state.tuning.gravity);
        assert_eq!(state.fuel, 0);
    }

    #[test]
    fn thrust_burns_fuel_per_tick() {
        let mut state = fresh_state();
        let capacity = state.fuel;
        let input = TickInput {
            thrust_up: true,
            ..Default::default()
        };
        for _ in 0..10 {
            step(&mut state, &input);
        }
        assert_eq!(state.fuel, capacity - 10);
        assert_eq!(state.player.accel.y, state.tuning.lift_accel);
    }

    #[test]
    fn horizontal_thrust_outranks_lift() {
        let mut state = fresh_state();
        let capacity = state.fuel;
        let input = TickInput {
            thrust_left: true,
            thrust_up: true,
            ..Default::default()
        };
        step(&mut state, &input);

        assert!(state.player.accel.x < 0.0);
        assert_eq!(state.player.accel.y, state.tuning.gravity);
        assert_eq!(state.fuel, capacity - 1);
        assert_eq!(state.player.facing, Direction::Left);
    }

    #[test]
    fn coasting_restores_gravity_and_bleeds_thrust() {
        let mut state = fresh_state();
        state.player.accel.x = 0.003;
        state.player.accel.y = state.tuning.lift_accel;

        for _ in 0..3 {
            step(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.accel.x, 0.0);
        assert_eq!(state.player.accel.y, state.tuning.gravity);
    }

    #[test]
    fn patrol_follows_its_script() {
        let mut state = fresh_state();
        step(&mut state, &TickInput::default());

        let patrol = state.patrol.as_ref().unwrap();
        let hazard = &state.platforms[patrol.index];
        // First tick places the hazard at angle zero
        assert!((hazard.pos.x - 4.0).abs() < 1e-6);
        assert!((hazard.pos.y - 2.0).abs() < 1e-6);
        assert_eq!(patrol.angle, SIM_DT);
        // Transform is fresh, not one tick stale
        assert!((hazard.transform.w_axis.x - hazard.pos.x).abs() < 1e-6);

        step(&mut state, &TickInput::default());
        let patrol = state.patrol.as_ref().unwrap();
        let hazard = &state.platforms[patrol.index];
        assert!((hazard.pos.x - ((SIM_DT / 2.0).cos() + 3.0)).abs() < 1e-6);
        assert!((hazard.pos.y - (SIM_DT.sin() + 2.0)).abs() < 1e-6);
    }

    #[test]
    fn movement_intent_reaches_the_player() {
        let mut state = drifting_state();
        let input = TickInput {
            movement: Vec2::new(0.0, -0.5),
            ..Default::default()
        };
        step(&mut state, &input);
        assert_eq!(state.player.movement, Vec3::new(0.0, -0.5, 0.0));
        // speed 1.0: half intent moves half a unit per second
        assert!((state.player.pos.y - (2.0 - 0.5 * SIM_DT)).abs() < 1e-6);
    }
}
