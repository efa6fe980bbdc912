//! Integrator configuration
//!
//! Simulation constants live here rather than in globals so a test or a
//! debug build can run an accelerated or slowed simulation per instance.

use serde::{Deserialize, Serialize};

/// Tunables for a [`MotionIntegrator`](crate::MotionIntegrator)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Fixed RK4 sub-step in seconds
    pub step: f32,
    /// Hard ceiling on simulated seconds since the clock was anchored
    pub max_duration: f32,
    /// Calls closer together than this (seconds) are ignored
    pub idle_epsilon: f32,
    /// Constant deceleration used by release friction (px/s²)
    pub release_deceleration: f32,
    /// Per-component threshold of the default settle exit condition
    ///
    /// Compared against both position (px) and velocity (px/s) deltas
    /// between consecutive `run_model` calls.
    pub settle_epsilon: f32,
    /// Simulated seconds per wall-clock second
    pub time_scale: f32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl IntegratorConfig {
    pub fn standard() -> Self {
        Self {
            step: 0.005,
            max_duration: 5.0,
            idle_epsilon: 0.001,
            release_deceleration: 1500.0,
            settle_epsilon: 1.0,
            time_scale: 1.0,
        }
    }

    /// Slow every simulation down by `factor` (e.g. 10.0 for slow-motion debugging)
    pub fn slowed(factor: f32) -> Self {
        Self::standard().with_time_scale(1.0 / factor)
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_max_duration(mut self, seconds: f32) -> Self {
        self.max_duration = seconds;
        self
    }

    pub fn with_idle_epsilon(mut self, seconds: f32) -> Self {
        self.idle_epsilon = seconds;
        self
    }

    pub fn with_release_deceleration(mut self, deceleration: f32) -> Self {
        self.release_deceleration = deceleration;
        self
    }

    pub fn with_settle_epsilon(mut self, epsilon: f32) -> Self {
        self.settle_epsilon = epsilon;
        self
    }

    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }
}
