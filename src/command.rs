use core::fmt;

pub const CMD_INIT: u8 = b'I';
pub const CMD_ROTATE_LEFT: u8 = b'L';
pub const CMD_ROTATE_RIGHT: u8 = b'R';
pub const CMD_TURN: u8 = b'T';
pub const CMD_ACKNOWLEDGE: u8 = b'>';

/// A single command byte sent by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move both servos to their home position.
    Init,
    /// Rotate the lower layer 90° to the left.
    RotateLeft,
    /// Rotate the lower layer 90° to the right.
    RotateRight,
    /// Tip the cube over and pull the crossbar back.
    Turn,
    /// Reply with the readiness token.
    Acknowledge,
    /// Any other byte; dropped without effect.
    Unrecognized(u8),
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        match byte {
            CMD_INIT => Self::Init,
            CMD_ROTATE_LEFT => Self::RotateLeft,
            CMD_ROTATE_RIGHT => Self::RotateRight,
            CMD_TURN => Self::Turn,
            CMD_ACKNOWLEDGE => Self::Acknowledge,
            other => Self::Unrecognized(other),
        }
    }
}

impl Command {
    /// Byte that encodes this command on the wire.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Init => CMD_INIT,
            Self::RotateLeft => CMD_ROTATE_LEFT,
            Self::RotateRight => CMD_ROTATE_RIGHT,
            Self::Turn => CMD_TURN,
            Self::Acknowledge => CMD_ACKNOWLEDGE,
            Self::Unrecognized(byte) => byte,
        }
    }

    /// Whether the command moves a servo.
    #[must_use]
    pub const fn is_motion(self) -> bool {
        matches!(
            self,
            Self::Init | Self::RotateLeft | Self::RotateRight | Self::Turn
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::RotateLeft => f.write_str("rotate left"),
            Self::RotateRight => f.write_str("rotate right"),
            Self::Turn => f.write_str("turn"),
            Self::Acknowledge => f.write_str("acknowledge"),
            Self::Unrecognized(byte) => write!(f, "unrecognized 0x{byte:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_bytes() {
        assert_eq!(Command::from(b'I'), Command::Init);
        assert_eq!(Command::from(b'L'), Command::RotateLeft);
        assert_eq!(Command::from(b'R'), Command::RotateRight);
        assert_eq!(Command::from(b'T'), Command::Turn);
        assert_eq!(Command::from(b'>'), Command::Acknowledge);
    }

    #[test]
    fn test_lowercase_is_not_a_command() {
        assert_eq!(Command::from(b'l'), Command::Unrecognized(b'l'));
        assert_eq!(Command::from(b' '), Command::Unrecognized(b' '));
    }

    #[test]
    fn test_as_byte_keeps_unrecognized_value() {
        assert_eq!(Command::Unrecognized(0x7F).as_byte(), 0x7F);
        assert_eq!(Command::Turn.as_byte(), b'T');
    }

    #[test]
    fn test_only_servo_commands_are_motion() {
        assert!(Command::Turn.is_motion());
        assert!(Command::Init.is_motion());
        assert!(!Command::Acknowledge.is_motion());
        assert!(!Command::Unrecognized(b'x').is_motion());
    }
}
