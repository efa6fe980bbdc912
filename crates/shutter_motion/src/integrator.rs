//! Motion integrator
//!
//! Advances a 2D point mass from one frame timestamp to the next under the
//! sum of its registered accelerations. The UI layer calls
//! [`MotionIntegrator::run_model`] from its display-refresh callback and
//! applies the returned position until `done` comes back `true`.
//!
//! # Lifecycle
//!
//! 1. `reset*` clears every contributor, filter and the exit condition
//! 2. Register springs, friction, filters and optionally an exit condition
//! 3. Call `run_model(now)` once per frame
//!
//! Contributors do not survive a reset, so they have to be registered again
//! for every gesture.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use shutter_core::Vec2;
use smallvec::SmallVec;

use crate::acceleration::{Acceleration, AccelerationFilter, ReleaseFriction};
use crate::config::IntegratorConfig;
use crate::exit::{ExitCondition, SettleExit};
use crate::spring::{Spring, SpringConfig, SpringTarget};

/// Position and velocity of the simulated point mass
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl MotionState {
    pub const fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Result of one [`MotionIntegrator::run_model`] call
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionStep {
    /// Position before this call
    pub previous: Vec2,
    /// Position after this call
    pub position: Vec2,
    /// Whether the simulation has finished
    pub done: bool,
}

impl MotionStep {
    fn unchanged(position: Vec2, done: bool) -> Self {
        Self {
            previous: position,
            position,
            done,
        }
    }
}

/// Time derivative of a [`MotionState`]
#[derive(Clone, Copy, Debug, Default)]
struct Derivative {
    dx: Vec2,
    dv: Vec2,
}

/// Simulation clock, anchored by the first timestamp after a reset
#[derive(Clone, Copy, Debug)]
struct Clock {
    /// Wall-clock timestamp of the previous call (seconds)
    last: f64,
    /// Simulated seconds since the anchor
    elapsed: f64,
}

/// Fixed-step RK4 integrator for a 2D point mass
///
/// One instance drives one animation. It has no internal locking; the thread
/// that produces frames owns it.
pub struct MotionIntegrator {
    config: IntegratorConfig,
    state: MotionState,
    accelerations: SmallVec<[Box<dyn Acceleration>; 4]>,
    filters: SmallVec<[Box<dyn AccelerationFilter>; 2]>,
    exit: Box<dyn ExitCondition>,
    clock: Option<Clock>,
    last_acceleration: Vec2,
    done: bool,
    epoch: Instant,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::with_config(IntegratorConfig::default())
    }

    pub fn with_config(config: IntegratorConfig) -> Self {
        let exit = Box::new(SettleExit::new(config.settle_epsilon));
        Self {
            config,
            state: MotionState::default(),
            accelerations: SmallVec::new(),
            filters: SmallVec::new(),
            exit,
            clock: None,
            last_acceleration: Vec2::ZERO,
            done: false,
            epoch: Instant::now(),
        }
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Reset to rest at the origin
    ///
    /// The clock is anchored by the next `run_model` call.
    pub fn reset(&mut self) {
        self.reset_with(Vec2::ZERO, Vec2::ZERO);
    }

    /// Reset to the given state
    ///
    /// The clock is anchored by the next `run_model` call.
    pub fn reset_with(&mut self, position: Vec2, velocity: Vec2) {
        self.state = MotionState::new(position, velocity);
        self.accelerations.clear();
        self.filters.clear();
        self.exit = Box::new(SettleExit::new(self.config.settle_epsilon));
        self.clock = None;
        self.last_acceleration = Vec2::ZERO;
        self.done = false;

        tracing::trace!(?position, ?velocity, "motion reset");
    }

    /// Reset to the given state with the clock anchored at `now`
    pub fn reset_at(&mut self, position: Vec2, velocity: Vec2, now: f64) {
        self.reset_with(position, velocity);
        self.clock = Some(Clock {
            last: now,
            elapsed: 0.0,
        });
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Add a spring toward `target` with explicit constants
    pub fn add_spring(&mut self, target: impl SpringTarget + 'static, config: SpringConfig) {
        self.add_acceleration(Spring::new(target, config));
    }

    /// Spring that settles in about one second
    pub fn add_default_spring(&mut self, target: impl SpringTarget + 'static) {
        self.add_spring(target, SpringConfig::standard());
    }

    /// Spring that settles in about 550-600ms
    pub fn add_quick_spring(&mut self, target: impl SpringTarget + 'static) {
        self.add_spring(target, SpringConfig::quick());
    }

    /// Spring that settles in about 1.5 seconds
    pub fn add_slow_spring(&mut self, target: impl SpringTarget + 'static) {
        self.add_spring(target, SpringConfig::slow());
    }

    /// Spring that settles in about 350ms
    pub fn add_very_quick_spring(&mut self, target: impl SpringTarget + 'static) {
        self.add_spring(target, SpringConfig::very_quick());
    }

    /// Add an arbitrary acceleration contributor
    pub fn add_acceleration(&mut self, acceleration: impl Acceleration + 'static) {
        self.accelerations.push(Box::new(acceleration));
    }

    /// Add kinetic friction using the configured release deceleration
    pub fn add_release_deceleration(&mut self) {
        self.add_acceleration(ReleaseFriction::new(self.config.release_deceleration));
    }

    /// Add a filter over the summed acceleration
    ///
    /// Filters run in the order they were added.
    pub fn add_filter(&mut self, filter: impl AccelerationFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Replace the exit condition (default: [`SettleExit`])
    pub fn set_exit_condition(&mut self, exit: impl ExitCondition + 'static) {
        self.exit = Box::new(exit);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Simulated seconds since the clock was anchored
    pub fn elapsed(&self) -> f32 {
        self.clock.map_or(0.0, |clock| clock.elapsed as f32)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Acceleration applied over the most recent sub-step
    pub fn last_acceleration(&self) -> Vec2 {
        self.last_acceleration
    }

    pub fn contributor_count(&self) -> usize {
        self.accelerations.len()
    }

    /// Seconds on this integrator's monotonic clock
    pub fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance the simulation to the integrator's own wall clock
    pub fn run_model_now(&mut self) -> MotionStep {
        let now = self.now();
        self.run_model(now)
    }

    /// Advance the simulation to `now` (seconds)
    pub fn run_model(&mut self, now: f64) -> MotionStep {
        let position = self.state.position;

        if self.done {
            return MotionStep::unchanged(position, true);
        }

        if self.accelerations.is_empty() {
            return MotionStep::unchanged(position, true);
        }

        let Some(mut clock) = self.clock else {
            self.clock = Some(Clock {
                last: now,
                elapsed: 0.0,
            });
            return MotionStep::unchanged(position, false);
        };

        let wall_delta = now - clock.last;
        if wall_delta < f64::from(self.config.idle_epsilon) {
            return MotionStep::unchanged(position, false);
        }

        let max_duration = f64::from(self.config.max_duration);
        let target = (clock.elapsed + wall_delta * f64::from(self.config.time_scale))
            .min(max_duration);
        let previous = self.state;

        self.advance(clock.elapsed, target);

        clock.last = now;
        clock.elapsed = target;
        self.clock = Some(clock);

        let elapsed = target as f32;
        let mut done = self.exit.is_complete(
            &mut self.state,
            &previous,
            elapsed,
            self.last_acceleration,
        );

        if !done && target >= max_duration {
            tracing::debug!(
                elapsed,
                position = ?self.state.position,
                "motion stopped at the time ceiling without settling"
            );
            done = true;
        } else if done {
            tracing::debug!(elapsed, position = ?self.state.position, "motion settled");
        }

        self.done = done;
        MotionStep {
            previous: previous.position,
            position: self.state.position,
            done,
        }
    }

    /// Integrate from `from` to `to` simulated seconds in fixed sub-steps
    ///
    /// The last sub-step is shortened so the state lands exactly on `to`.
    fn advance(&mut self, from: f64, to: f64) {
        let step = f64::from(self.config.step.max(f32::EPSILON));
        let mut t = from;

        while to - t > f64::EPSILON {
            let dt = step.min(to - t);
            self.rk4_step(t as f32, dt as f32);
            t += dt;
        }
    }

    /// One RK4 sub-step of length `dt` starting `t` seconds in
    fn rk4_step(&mut self, t: f32, dt: f32) {
        let start = self.state;
        let half = dt * 0.5;

        let k1 = self.derivative(&start, t, 0.0, Derivative::default());
        let k2 = self.derivative(&start, t, half, k1);
        let k3 = self.derivative(&start, t, half, k2);
        let k4 = self.derivative(&start, t, dt, k3);

        let dxdt = (k1.dx + (k2.dx + k3.dx) * 2.0 + k4.dx) / 6.0;
        let dvdt = (k1.dv + (k2.dv + k3.dv) * 2.0 + k4.dv) / 6.0;

        let mut end = MotionState::new(start.position + dxdt * dt, start.velocity + dvdt * dt);
        for acceleration in &self.accelerations {
            acceleration.constrain(&start, &mut end);
        }

        self.state = end;
        self.last_acceleration = dvdt;
    }

    /// Sample the derivative `offset` seconds past `t`, stepping `initial`
    /// along the previous sample `d`
    fn derivative(
        &self,
        initial: &MotionState,
        t: f32,
        offset: f32,
        d: Derivative,
    ) -> Derivative {
        let state = MotionState::new(
            initial.position + d.dx * offset,
            initial.velocity + d.dv * offset,
        );
        Derivative {
            dx: state.velocity,
            dv: self.acceleration_at(&state, t + offset),
        }
    }

    /// Summed contributors, then filters in registration order
    fn acceleration_at(&self, state: &MotionState, elapsed: f32) -> Vec2 {
        let mut total = Vec2::ZERO;
        for acceleration in &self.accelerations {
            total += acceleration.evaluate(state, elapsed);
        }
        for filter in &self.filters {
            total = filter.filter(state, elapsed, total);
        }
        total
    }
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MotionIntegrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionIntegrator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("accelerations", &self.accelerations.len())
            .field("filters", &self.filters.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
