//! Acceleration contributors and filters
//!
//! Every RK4 sample sums all registered [`Acceleration`]s, then runs the
//! total through the registered [`AccelerationFilter`]s in order.

use shutter_core::Vec2;

use crate::integrator::MotionState;

/// A term of the acceleration field
pub trait Acceleration: Send {
    /// Acceleration contributed at `state`, `elapsed` seconds into the simulation
    fn evaluate(&self, state: &MotionState, elapsed: f32) -> Vec2;

    /// Adjust the state at the end of a sub-step
    ///
    /// Called with the state before and after each RK4 sub-step. Most
    /// contributors leave this alone.
    fn constrain(&self, _start: &MotionState, _end: &mut MotionState) {}
}

impl<F> Acceleration for F
where
    F: Fn(&MotionState, f32) -> Vec2 + Send,
{
    fn evaluate(&self, state: &MotionState, elapsed: f32) -> Vec2 {
        self(state, elapsed)
    }
}

/// Post-summation filter over the total acceleration
pub trait AccelerationFilter: Send {
    fn filter(&self, state: &MotionState, elapsed: f32, acceleration: Vec2) -> Vec2;
}

impl<F> AccelerationFilter for F
where
    F: Fn(&MotionState, f32, Vec2) -> Vec2 + Send,
{
    fn filter(&self, state: &MotionState, elapsed: f32, acceleration: Vec2) -> Vec2 {
        self(state, elapsed, acceleration)
    }
}

// ============================================================================
// Release Friction
// ============================================================================

/// Kinetic friction applied after a fling
///
/// Each axis decelerates at a constant rate against the sign of its
/// velocity, so motion slows linearly and stops at exactly zero instead of
/// decaying forever.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseFriction {
    deceleration: f32,
}

impl ReleaseFriction {
    pub fn new(deceleration: f32) -> Self {
        Self {
            deceleration: deceleration.abs(),
        }
    }

    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }
}

impl Acceleration for ReleaseFriction {
    fn evaluate(&self, state: &MotionState, _elapsed: f32) -> Vec2 {
        -(state.velocity.signum() * self.deceleration)
    }

    fn constrain(&self, start: &MotionState, end: &mut MotionState) {
        stop_at_rest(
            start.velocity.x,
            &mut end.velocity.x,
            start.position.x,
            &mut end.position.x,
        );
        stop_at_rest(
            start.velocity.y,
            &mut end.velocity.y,
            start.position.y,
            &mut end.position.y,
        );
    }
}

/// Friction never reverses motion: once an axis' velocity would cross zero
/// it stops, and it never gives back distance already travelled.
fn stop_at_rest(v0: f32, v1: &mut f32, p0: f32, p1: &mut f32) {
    if v0 == 0.0 || v0 * *v1 > 0.0 {
        return;
    }

    *v1 = 0.0;
    if (*p1 - p0) * v0 < 0.0 {
        *p1 = p0;
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Restrict motion to one axis by zeroing acceleration on the other
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisLock {
    /// Only horizontal acceleration passes through
    Horizontal,
    /// Only vertical acceleration passes through
    Vertical,
}

impl AccelerationFilter for AxisLock {
    fn filter(&self, _state: &MotionState, _elapsed: f32, acceleration: Vec2) -> Vec2 {
        match self {
            AxisLock::Horizontal => Vec2::new(acceleration.x, 0.0),
            AxisLock::Vertical => Vec2::new(0.0, acceleration.y),
        }
    }
}

/// Clamp the magnitude of the total acceleration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxAcceleration(pub f32);

impl AccelerationFilter for MaxAcceleration {
    fn filter(&self, _state: &MotionState, _elapsed: f32, acceleration: Vec2) -> Vec2 {
        let magnitude = acceleration.length();
        if magnitude > self.0 {
            acceleration.normalize() * self.0
        } else {
            acceleration
        }
    }
}
