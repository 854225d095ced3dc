use crate::Error;

/// Degrees between two neighbouring quantized positions.
pub const QUARTER_TURN_DEGREES: u16 = 90;

/// Quantized position of the horizontal rotation servo.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum RotationAngle {
    #[default]
    Deg0 = 0,
    Deg90 = 90,
    Deg180 = 180,
    Deg270 = 270,
}

impl RotationAngle {
    /// All positions in ascending order.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    #[must_use]
    pub const fn degrees(self) -> u16 {
        self as u16
    }

    /// Position in the tick table (0..=3).
    #[must_use]
    pub const fn index(self) -> usize {
        (self as u16 / QUARTER_TURN_DEGREES) as usize
    }

    /// Next lower position, wrapping 0° to 270°.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg270,
            Self::Deg90 => Self::Deg0,
            Self::Deg180 => Self::Deg90,
            Self::Deg270 => Self::Deg180,
        }
    }

    /// Next higher position, wrapping 270° to 0°.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Number of quarter turns the servo sweeps between `self` and `target`.
    ///
    /// This is the linear distance on the servo's 0°..270° travel, not the
    /// shortest distance on the ring: 270° to 0° counts as three steps.
    #[must_use]
    pub const fn steps_to(self, target: Self) -> u32 {
        (self.degrees().abs_diff(target.degrees()) / QUARTER_TURN_DEGREES) as u32
    }
}

impl TryFrom<u16> for RotationAngle {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(Error::InvalidAngle),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_at_both_ends() {
        assert_eq!(RotationAngle::Deg0.left(), RotationAngle::Deg270);
        assert_eq!(RotationAngle::Deg270.right(), RotationAngle::Deg0);
    }

    #[test]
    fn test_left_and_right_are_inverse() {
        for angle in RotationAngle::ALL {
            assert_eq!(angle.left().right(), angle);
            assert_eq!(angle.right().left(), angle);
        }
    }

    #[test]
    fn test_index_matches_table_order() {
        for (i, angle) in RotationAngle::ALL.iter().enumerate() {
            assert_eq!(angle.index(), i);
        }
    }

    #[test]
    fn test_steps_are_linear_not_ring_distance() {
        assert_eq!(RotationAngle::Deg0.steps_to(RotationAngle::Deg0), 0);
        assert_eq!(RotationAngle::Deg90.steps_to(RotationAngle::Deg180), 1);
        assert_eq!(RotationAngle::Deg270.steps_to(RotationAngle::Deg0), 3);
        assert_eq!(RotationAngle::Deg0.steps_to(RotationAngle::Deg270), 3);
    }

    #[test]
    fn test_try_from_degrees() {
        assert_eq!(RotationAngle::try_from(180).unwrap(), RotationAngle::Deg180);
        assert_eq!(RotationAngle::try_from(45), Err(Error::InvalidAngle));
        assert_eq!(RotationAngle::try_from(360), Err(Error::InvalidAngle));
    }
}
