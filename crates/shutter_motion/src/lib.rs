//! Shutter Motion
//!
//! A 2D point mass integrated with fixed-step RK4, used to drive
//! gesture-following transitions (snap-back springs, fling deceleration,
//! finger tracking).
//!
//! # Features
//!
//! - **Composable accelerations**: springs, release friction and custom fields
//!   summed every sample, then passed through ordered filters
//! - **Spring presets**: very quick, quick, default and slow settle times
//! - **Pluggable completion**: settle detection by default, snap-to-target or
//!   any custom [`ExitCondition`]
//! - **Bounded runtime**: every simulation stops after `max_duration`
//!   simulated seconds whether or not it converged
//!
//! # Example
//!
//! ```rust
//! use shutter_core::Vec2;
//! use shutter_motion::MotionIntegrator;
//!
//! let mut motion = MotionIntegrator::new();
//! motion.reset_at(Vec2::ZERO, Vec2::ZERO, 0.0);
//! motion.add_quick_spring(Vec2::new(120.0, 0.0));
//!
//! let mut now = 0.0;
//! loop {
//!     now += 1.0 / 60.0;
//!     let step = motion.run_model(now);
//!     if step.done {
//!         break;
//!     }
//! }
//! assert!((motion.position().x - 120.0).abs() < 2.0);
//! ```

pub mod acceleration;
pub mod config;
pub mod exit;
pub mod integrator;
pub mod spring;

pub use acceleration::{
    Acceleration, AccelerationFilter, AxisLock, MaxAcceleration, ReleaseFriction,
};
pub use config::IntegratorConfig;
pub use exit::{ExitCondition, SettleExit, SnapToTarget};
pub use integrator::{MotionIntegrator, MotionState, MotionStep};
pub use spring::{Spring, SpringConfig, SpringPreset, SpringTarget, TrackedTarget};
