//! Completion detection
//!
//! An [`ExitCondition`] runs once per `run_model` call after the state has
//! been advanced, and decides whether the simulation is finished. It may
//! snap the state to an exact rest value when it says yes.

use shutter_core::Vec2;

use crate::integrator::MotionState;

/// Decides when a simulation is complete
///
/// `state` is the state after this call's advance and may be written to snap
/// it. `previous` is the state at the start of the call, `elapsed` the
/// simulated seconds since the clock was anchored and `acceleration` the
/// acceleration applied over the last sub-step.
pub trait ExitCondition: Send {
    fn is_complete(
        &mut self,
        state: &mut MotionState,
        previous: &MotionState,
        elapsed: f32,
        acceleration: Vec2,
    ) -> bool;
}

impl<F> ExitCondition for F
where
    F: FnMut(&mut MotionState, &MotionState, f32, Vec2) -> bool + Send,
{
    fn is_complete(
        &mut self,
        state: &mut MotionState,
        previous: &MotionState,
        elapsed: f32,
        acceleration: Vec2,
    ) -> bool {
        self(state, previous, elapsed, acceleration)
    }
}

/// Default exit: nothing moved noticeably since the previous call
///
/// Position and velocity must each be within `epsilon` of the previous
/// state, per component. The same threshold applies to pixels and
/// pixels-per-second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleExit {
    epsilon: f32,
}

impl SettleExit {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }
}

impl Default for SettleExit {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ExitCondition for SettleExit {
    fn is_complete(
        &mut self,
        state: &mut MotionState,
        previous: &MotionState,
        _elapsed: f32,
        _acceleration: Vec2,
    ) -> bool {
        state.position.approx_eq(&previous.position, self.epsilon)
            && state.velocity.approx_eq(&previous.velocity, self.epsilon)
    }
}

/// Finish near a known rest point and snap onto it
///
/// Completes once the position is within `epsilon` of `target` and the speed
/// on each axis is below `epsilon`. The state is then set to exactly
/// `target` with zero velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapToTarget {
    target: Vec2,
    epsilon: f32,
}

impl SnapToTarget {
    pub fn new(target: Vec2, epsilon: f32) -> Self {
        Self { target, epsilon }
    }
}

impl ExitCondition for SnapToTarget {
    fn is_complete(
        &mut self,
        state: &mut MotionState,
        _previous: &MotionState,
        _elapsed: f32,
        _acceleration: Vec2,
    ) -> bool {
        let resting = state.position.approx_eq(&self.target, self.epsilon)
            && state.velocity.approx_eq(&Vec2::ZERO, self.epsilon);

        if resting {
            state.position = self.target;
            state.velocity = Vec2::ZERO;
        }
        resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_requires_position_and_velocity() {
        let previous = MotionState::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 0.0));
        let mut exit = SettleExit::default();

        let mut still = MotionState::new(Vec2::new(10.5, 10.0), Vec2::new(5.5, 0.0));
        assert!(exit.is_complete(&mut still, &previous, 0.5, Vec2::ZERO));

        let mut accelerating = MotionState::new(Vec2::new(10.5, 10.0), Vec2::new(8.0, 0.0));
        assert!(!exit.is_complete(&mut accelerating, &previous, 0.5, Vec2::ZERO));

        let mut moving = MotionState::new(Vec2::new(12.0, 10.0), Vec2::new(5.0, 0.0));
        assert!(!exit.is_complete(&mut moving, &previous, 0.5, Vec2::ZERO));
    }

    #[test]
    fn test_snap_to_target_snaps_state() {
        let previous = MotionState::default();
        let mut exit = SnapToTarget::new(Vec2::new(100.0, 0.0), 0.5);

        let mut near = MotionState::new(Vec2::new(99.7, 0.2), Vec2::new(0.1, -0.1));
        assert!(exit.is_complete(&mut near, &previous, 0.5, Vec2::ZERO));
        assert_eq!(near.position, Vec2::new(100.0, 0.0));
        assert_eq!(near.velocity, Vec2::ZERO);

        let mut far = MotionState::new(Vec2::new(90.0, 0.0), Vec2::ZERO);
        assert!(!exit.is_complete(&mut far, &previous, 0.5, Vec2::ZERO));
        assert_eq!(far.position, Vec2::new(90.0, 0.0));
    }

    #[test]
    fn test_closure_exit_sees_elapsed_time() {
        let mut after_half_second =
            |_: &mut MotionState, _: &MotionState, elapsed: f32, _: Vec2| elapsed >= 0.5;
        let previous = MotionState::default();
        let mut state = MotionState::default();

        assert!(after_half_second.is_complete(&mut state, &previous, 0.5, Vec2::ZERO));
        assert!(!after_half_second.is_complete(&mut state, &previous, 0.25, Vec2::ZERO));
    }
}
