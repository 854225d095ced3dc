//! Open-loop motion control of the two servos.
//!
//! The controller is the only owner of the rotation angle. Every operation
//! writes a servo target and then blocks on the injected delay until the servo
//! is assumed to have arrived, so two motions never overlap.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::{ActuatorPort, Calibration, Error, RotationAngle};

/// One timed phase of a motion: drive `channel` to `ticks`, then wait.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotionStep {
    pub channel: u8,
    pub ticks: u16,
    pub settle_ms: u32,
}

/// Drives the turn and rotation servos and tracks the rotation angle.
#[derive(Debug)]
pub struct MotionController<P, D> {
    port: P,
    delay: D,
    calibration: Calibration,
    angle: RotationAngle,
    initialized: bool,
}

impl<P: ActuatorPort, D: DelayNs> MotionController<P, D> {
    /// Creates a controller in the 0°, uninitialized state.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` if the calibration is rejected by
    /// [`Calibration::validate`].
    pub fn new(port: P, delay: D, calibration: Calibration) -> Result<Self, Error> {
        calibration.validate()?;
        Ok(Self {
            port,
            delay,
            calibration,
            angle: RotationAngle::Deg0,
            initialized: false,
        })
    }

    /// Creates a controller using the reference hardware calibration.
    pub fn with_default_calibration(port: P, delay: D) -> Self {
        Self {
            port,
            delay,
            calibration: Calibration::default(),
            angle: RotationAngle::Deg0,
            initialized: false,
        }
    }

    /// Configures the PWM frequency of the servo board. Safe to repeat.
    pub fn init_driver(&mut self) {
        debug!("pwm frequency {} Hz", self.calibration.pwm_frequency_hz);
        self.port.set_frequency(self.calibration.pwm_frequency_hz);
    }

    /// Moves both servos to the home position: crossbar holding the cube,
    /// rotation at 0°.
    ///
    /// Any previously tracked angle is discarded.
    pub fn init_positions(&mut self) {
        debug!("homing from {}°", self.angle.degrees());
        let hold = self.hold_step();
        self.run(hold);

        self.rotate_to_angle(RotationAngle::Deg0);
        self.delay.delay_ms(2 * self.calibration.rotate_delay_ms);

        self.angle = RotationAngle::Deg0;
        self.initialized = true;
    }

    /// Rotates 90° to the left, wrapping from 0° to 270°.
    pub fn rotate_left(&mut self) {
        self.rotate_to_angle(self.angle.left());
    }

    /// Rotates 90° to the right, wrapping from 270° to 0°.
    pub fn rotate_right(&mut self) {
        self.rotate_to_angle(self.angle.right());
    }

    /// Rotates to `degrees`, which must be one of 0, 90, 180 or 270.
    ///
    /// Any other value is ignored and leaves the angle unchanged.
    pub fn rotate_to(&mut self, degrees: u16) {
        match RotationAngle::try_from(degrees) {
            Ok(target) => self.rotate_to_angle(target),
            Err(_) => trace!("ignoring rotation to {degrees}°"),
        }
    }

    /// Rotates to `target` and waits one rotate delay per 90° of servo travel.
    pub fn rotate_to_angle(&mut self, target: RotationAngle) {
        let step = self.rotate_step(target);
        debug!(
            "rotate {}° -> {}° ({} ms)",
            self.angle.degrees(),
            target.degrees(),
            step.settle_ms
        );
        self.run(step);
        self.angle = target;
    }

    /// Tips the cube onto its side and pulls the crossbar back.
    ///
    /// Does not depend on, or change, the rotation angle.
    pub fn turn_cube(&mut self) {
        debug!("turn cube");
        for step in self.turn_plan() {
            self.run(step);
        }
    }

    /// Step that moves the rotation servo from the current angle to `target`.
    #[must_use]
    pub fn rotate_step(&self, target: RotationAngle) -> MotionStep {
        MotionStep {
            channel: self.calibration.rotate_channel,
            ticks: self.calibration.rotate_ticks.ticks(target),
            settle_ms: self.angle.steps_to(target) * self.calibration.rotate_delay_ms,
        }
    }

    /// The push and pull-back phases of a turn.
    #[must_use]
    pub fn turn_plan(&self) -> [MotionStep; 2] {
        [
            MotionStep {
                channel: self.calibration.turn_channel,
                ticks: self.calibration.turn_push_ticks,
                settle_ms: self.calibration.turn_delay_ms,
            },
            self.hold_step(),
        ]
    }

    const fn hold_step(&self) -> MotionStep {
        MotionStep {
            channel: self.calibration.turn_channel,
            ticks: self.calibration.turn_hold_ticks,
            settle_ms: self.calibration.turn_delay_ms,
        }
    }

    fn run(&mut self, step: MotionStep) {
        trace!(
            "channel {} <- {} ticks, settle {} ms",
            step.channel, step.ticks, step.settle_ms
        );
        self.port.set_channel(step.channel, step.ticks);
        self.delay.delay_ms(step.settle_ms);
    }

    /// Current rotation angle as tracked from the command history.
    #[must_use]
    pub const fn angle(&self) -> RotationAngle {
        self.angle
    }

    /// Whether [`Self::init_positions`] has run at least once.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub(crate) fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Gives back the servo board and delay provider.
    pub fn release(self) -> (P, D) {
        (self.port, self.delay)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Board {
        frequency: Option<u16>,
        writes: [(u8, u16); 8],
        len: usize,
    }

    impl ActuatorPort for Board {
        fn set_frequency(&mut self, hz: u16) {
            self.frequency = Some(hz);
        }

        fn set_channel(&mut self, channel: u8, ticks: u16) {
            self.writes[self.len] = (channel, ticks);
            self.len += 1;
        }
    }

    #[derive(Debug, Default)]
    struct Clock {
        elapsed_ns: u64,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += u64::from(ns);
        }
    }

    impl Clock {
        const fn elapsed_ms(&self) -> u64 {
            self.elapsed_ns / 1_000_000
        }
    }

    fn controller() -> MotionController<Board, Clock> {
        MotionController::with_default_calibration(Board::default(), Clock::default())
    }

    #[test]
    fn test_starts_uninitialized_at_zero() {
        let ctl = controller();
        assert_eq!(ctl.angle(), RotationAngle::Deg0);
        assert!(!ctl.is_initialized());
    }

    #[test]
    fn test_init_driver_sets_frequency() {
        let mut ctl = controller();
        ctl.init_driver();
        ctl.init_driver();
        let (board, _) = ctl.release();
        assert_eq!(board.frequency, Some(50));
        assert_eq!(board.len, 0);
    }

    #[test]
    fn test_rotate_right_waits_one_step() {
        let mut ctl = controller();
        ctl.rotate_right();
        assert_eq!(ctl.angle(), RotationAngle::Deg90);
        let (board, clock) = ctl.release();
        assert_eq!(&board.writes[..board.len], &[(1, 247)]);
        assert_eq!(clock.elapsed_ms(), 650);
    }

    #[test]
    fn test_direct_rotation_uses_linear_step_count() {
        let mut ctl = controller();
        ctl.rotate_to(270);
        let settle = ctl.rotate_step(RotationAngle::Deg0).settle_ms;
        assert_eq!(settle, 3 * 650);
    }

    #[test]
    fn test_invalid_target_is_ignored() {
        let mut ctl = controller();
        ctl.rotate_to(45);
        ctl.rotate_to(360);
        assert_eq!(ctl.angle(), RotationAngle::Deg0);
        let (board, clock) = ctl.release();
        assert_eq!(board.len, 0);
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn test_turn_plan_push_then_hold() {
        let ctl = controller();
        let plan = ctl.turn_plan();
        assert_eq!(plan[0].ticks, 380);
        assert_eq!(plan[1].ticks, 100);
        assert_eq!(plan[0].settle_ms, plan[1].settle_ms);
    }

    #[test]
    fn test_new_rejects_bad_calibration() {
        let cal = Calibration {
            turn_push_ticks: 5000,
            ..Default::default()
        };
        let res = MotionController::new(Board::default(), Clock::default(), cal);
        assert!(matches!(res, Err(Error::InvalidValue)));
    }

    #[test]
    fn test_new_rejects_delay_that_would_overflow() {
        let cal = Calibration {
            rotate_delay_ms: 2_000_000_000,
            ..Default::default()
        };
        let res = MotionController::new(Board::default(), Clock::default(), cal);
        assert!(matches!(res, Err(Error::InvalidValue)));
    }

    #[test]
    fn test_longest_accepted_delay_sweeps_full_range() {
        let cal = Calibration {
            rotate_delay_ms: crate::MAX_DELAY_MS,
            ..Default::default()
        };
        let mut ctl = MotionController::new(Board::default(), Clock::default(), cal).unwrap();
        ctl.rotate_to(270);
        ctl.init_positions();
        assert_eq!(ctl.angle(), RotationAngle::Deg0);
        let (_, clock) = ctl.release();
        let rotate = u64::from(crate::MAX_DELAY_MS);
        assert_eq!(clock.elapsed_ms(), 3 * rotate + 550 + 3 * rotate + 2 * rotate);
    }
}
