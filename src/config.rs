//! Servo calibration for the PCA9685 board.
//!
//! Pulse widths at 50 Hz: one 20 ms period spans 4096 ticks, so 1 ms is about
//! 205 ticks (0.5 ms = 102, 1.5 ms = 307, 2.5 ms = 512).

use crate::{Error, MAX_CHANNEL, MAX_DELAY_MS, MAX_TICKS, RotationAngle};

/// Default PWM frequency of the servo board.
pub const PWM_FREQUENCY_HZ: u16 = 50;
/// Channel of the vertical turn servo.
pub const TURN_SERVO_CHANNEL: u8 = 0;
/// Channel of the horizontal rotation servo.
pub const ROTATE_SERVO_CHANNEL: u8 = 1;

/// Far crossbar just holding the cube.
pub const TURN_SERVO_HOLD: u16 = 100;
/// Close crossbar pushing the cube over.
pub const TURN_SERVO_PUSH: u16 = 380;

/// Rotation servo ticks for 0°, 90°, 180° and 270°.
pub const ROTATE_SERVO_TICKS: AngleTickTable = AngleTickTable([102, 247, 397, 533]);

/// Settle time for each direction of a turn (push, pull back).
pub const TURN_DELAY_MS: u32 = 550;
/// Settle time per 90° of rotation.
pub const ROTATE_DELAY_MS: u32 = 650;
/// Wait after each received byte so slow links can deliver the rest of a batch.
pub const BYTE_DEBOUNCE_MS: u32 = 3;
/// Wait between two polls of the serial link.
pub const IDLE_DELAY_MS: u32 = 10;

/// Calibrated tick value for each quantized rotation angle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AngleTickTable(pub [u16; 4]);

impl AngleTickTable {
    #[must_use]
    pub const fn ticks(&self, angle: RotationAngle) -> u16 {
        self.0[angle.index()]
    }
}

/// Everything the motion controller needs to know about the hardware.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Calibration {
    pub pwm_frequency_hz: u16,
    pub turn_channel: u8,
    pub rotate_channel: u8,
    pub turn_hold_ticks: u16,
    pub turn_push_ticks: u16,
    pub rotate_ticks: AngleTickTable,
    pub turn_delay_ms: u32,
    pub rotate_delay_ms: u32,
    pub byte_debounce_ms: u32,
    pub idle_delay_ms: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pwm_frequency_hz: PWM_FREQUENCY_HZ,
            turn_channel: TURN_SERVO_CHANNEL,
            rotate_channel: ROTATE_SERVO_CHANNEL,
            turn_hold_ticks: TURN_SERVO_HOLD,
            turn_push_ticks: TURN_SERVO_PUSH,
            rotate_ticks: ROTATE_SERVO_TICKS,
            turn_delay_ms: TURN_DELAY_MS,
            rotate_delay_ms: ROTATE_DELAY_MS,
            byte_debounce_ms: BYTE_DEBOUNCE_MS,
            idle_delay_ms: IDLE_DELAY_MS,
        }
    }
}

impl Calibration {
    /// Checks the values against what the PWM board can represent.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` if a tick value exceeds `MAX_TICKS`, a
    /// channel exceeds `MAX_CHANNEL`, both servos share a channel, the
    /// frequency is zero, or a delay exceeds `MAX_DELAY_MS`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pwm_frequency_hz == 0 {
            return Err(Error::InvalidValue);
        }
        if self.turn_channel > MAX_CHANNEL
            || self.rotate_channel > MAX_CHANNEL
            || self.turn_channel == self.rotate_channel
        {
            return Err(Error::InvalidValue);
        }
        let ticks = [self.turn_hold_ticks, self.turn_push_ticks];
        if ticks
            .iter()
            .chain(self.rotate_ticks.0.iter())
            .any(|&t| t > MAX_TICKS)
        {
            return Err(Error::InvalidValue);
        }
        let delays = [
            self.turn_delay_ms,
            self.rotate_delay_ms,
            self.byte_debounce_ms,
            self.idle_delay_ms,
        ];
        if delays.iter().any(|&ms| ms > MAX_DELAY_MS) {
            return Err(Error::InvalidValue);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Calibration::default().validate(), Ok(()));
    }

    #[test]
    fn test_tick_table_lookup() {
        let table = ROTATE_SERVO_TICKS;
        assert_eq!(table.ticks(RotationAngle::Deg0), 102);
        assert_eq!(table.ticks(RotationAngle::Deg270), 533);
    }

    #[test]
    fn test_rejects_out_of_range_ticks() {
        let mut cal = Calibration::default();
        cal.rotate_ticks.0[2] = MAX_TICKS + 1;
        assert_eq!(cal.validate(), Err(Error::InvalidValue));
    }

    #[test]
    fn test_rejects_shared_channel() {
        let cal = Calibration {
            rotate_channel: TURN_SERVO_CHANNEL,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(Error::InvalidValue));
    }

    #[test]
    fn test_rejects_overlong_delays() {
        let cal = Calibration {
            rotate_delay_ms: 2_000_000_000,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(Error::InvalidValue));

        let cal = Calibration {
            idle_delay_ms: MAX_DELAY_MS + 1,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(Error::InvalidValue));

        let cal = Calibration {
            turn_delay_ms: MAX_DELAY_MS,
            rotate_delay_ms: MAX_DELAY_MS,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let cal = Calibration {
            pwm_frequency_hz: 0,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(Error::InvalidValue));
    }
}
