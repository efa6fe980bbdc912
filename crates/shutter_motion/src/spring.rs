//! Spring accelerations
//!
//! A spring pulls the point mass toward a target with a linear restoring
//! force and bleeds energy through velocity damping:
//!
//! ```text
//! a = -stiffness * (position - target(t)) - damping * velocity
//! ```
//!
//! The target may move over time, which is how a spring follows a finger.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use shutter_core::Vec2;

use crate::acceleration::Acceleration;
use crate::integrator::MotionState;

/// Configuration for a spring acceleration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }

    /// Settles in roughly 350ms (dismissals, small nudges)
    pub fn very_quick() -> Self {
        Self {
            stiffness: 784.0,
            damping: 56.0,
        }
    }

    /// Settles in roughly 550-600ms (snap-back after a drag)
    pub fn quick() -> Self {
        Self {
            stiffness: 289.0,
            damping: 34.0,
        }
    }

    /// Settles in roughly one second (page transitions)
    pub fn standard() -> Self {
        Self {
            stiffness: 49.0,
            damping: 14.0,
        }
    }

    /// Settles in roughly 1.5 seconds
    pub fn slow() -> Self {
        Self {
            stiffness: 18.0,
            damping: 8.5,
        }
    }

    /// Undamped angular frequency (rad/s)
    pub fn angular_frequency(&self) -> f32 {
        self.stiffness.sqrt()
    }

    /// Calculate critical damping for this spring's stiffness
    pub fn critical_damping(&self) -> f32 {
        2.0 * self.stiffness.sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named spring presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpringPreset {
    VeryQuick,
    Quick,
    #[default]
    Default,
    Slow,
}

impl SpringPreset {
    pub fn config(self) -> SpringConfig {
        match self {
            SpringPreset::VeryQuick => SpringConfig::very_quick(),
            SpringPreset::Quick => SpringConfig::quick(),
            SpringPreset::Default => SpringConfig::standard(),
            SpringPreset::Slow => SpringConfig::slow(),
        }
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Where a spring pulls toward at a given elapsed time
pub trait SpringTarget: Send {
    fn location(&self, elapsed: f32) -> Vec2;
}

impl SpringTarget for Vec2 {
    fn location(&self, _elapsed: f32) -> Vec2 {
        *self
    }
}

impl<F> SpringTarget for F
where
    F: Fn(f32) -> Vec2 + Send,
{
    fn location(&self, elapsed: f32) -> Vec2 {
        self(elapsed)
    }
}

/// A target the UI layer moves while the simulation runs
///
/// Clones share the same location, so the gesture handler keeps one handle
/// and the spring owns another.
///
/// ```rust
/// use shutter_core::Vec2;
/// use shutter_motion::{MotionIntegrator, TrackedTarget};
///
/// let finger = TrackedTarget::new(Vec2::ZERO);
/// let mut motion = MotionIntegrator::new();
/// motion.add_very_quick_spring(finger.clone());
///
/// // Later, from the touch handler:
/// finger.set(Vec2::new(40.0, 12.0));
/// assert_eq!(finger.get(), Vec2::new(40.0, 12.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrackedTarget {
    location: Arc<Mutex<Vec2>>,
}

impl TrackedTarget {
    pub fn new(location: Vec2) -> Self {
        Self {
            location: Arc::new(Mutex::new(location)),
        }
    }

    pub fn set(&self, location: Vec2) {
        match self.location.lock() {
            Ok(mut guard) => *guard = location,
            Err(poisoned) => *poisoned.into_inner() = location,
        }
    }

    pub fn get(&self) -> Vec2 {
        match self.location.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl SpringTarget for TrackedTarget {
    fn location(&self, _elapsed: f32) -> Vec2 {
        self.get()
    }
}

// ============================================================================
// Spring Acceleration
// ============================================================================

/// Spring acceleration toward a (possibly moving) target
pub struct Spring {
    target: Box<dyn SpringTarget>,
    config: SpringConfig,
}

impl Spring {
    pub fn new(target: impl SpringTarget + 'static, config: SpringConfig) -> Self {
        Self {
            target: Box::new(target),
            config,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn target(&self, elapsed: f32) -> Vec2 {
        self.target.location(elapsed)
    }
}

impl Acceleration for Spring {
    fn evaluate(&self, state: &MotionState, elapsed: f32) -> Vec2 {
        let displacement = state.position - self.target.location(elapsed);
        -(displacement * self.config.stiffness) - state.velocity * self.config.damping
    }
}

impl std::fmt::Debug for Spring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spring")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
