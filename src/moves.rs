//! Cube face turns expressed as device command strings.
//!
//! The mechanism can only rotate the bottom layer (`L`, `R`) and tip the whole
//! cube forward (`T`). Every face turn in standard notation is therefore a
//! sequence of tips and bottom-layer rotations. Uppercase turns are clockwise,
//! lowercase turns counter-clockwise and a trailing `2` is a half turn.
//!
//! Spaces and parentheses in the command strings only group the sequence for
//! readers; the device drops them as unrecognized bytes.

use core::str::FromStr;

use crate::Error;

/// How the cube is handled between moves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Return the cube to its standard orientation after every move.
    ReCor,
    /// Leave the cube where the move put it and track the orientation instead.
    #[default]
    SpiCor,
}

/// A face turn, a whole-cube tilt or the colour scan sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceTurn {
    U,
    UPrime,
    U2,
    D,
    DPrime,
    D2,
    F,
    FPrime,
    F2,
    B,
    BPrime,
    B2,
    L,
    LPrime,
    L2,
    R,
    RPrime,
    R2,
    /// Tilt the whole cube to the left.
    TiltLeft,
    /// Tilt the whole cube to the right.
    TiltRight,
    /// Show every face to a camera above the cube.
    ScanColors,
}

/// A cube face in standard orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

/// Quarter or half turn, and its direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Amount {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Face {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Front => Self::Back,
            Self::Back => Self::Front,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl FaceTurn {
    /// Builds the turn of `face` by `amount`.
    #[must_use]
    pub const fn new(face: Face, amount: Amount) -> Self {
        use Amount::{Clockwise as Cw, CounterClockwise as Ccw, Half};
        match (face, amount) {
            (Face::Up, Cw) => Self::U,
            (Face::Up, Ccw) => Self::UPrime,
            (Face::Up, Half) => Self::U2,
            (Face::Down, Cw) => Self::D,
            (Face::Down, Ccw) => Self::DPrime,
            (Face::Down, Half) => Self::D2,
            (Face::Front, Cw) => Self::F,
            (Face::Front, Ccw) => Self::FPrime,
            (Face::Front, Half) => Self::F2,
            (Face::Back, Cw) => Self::B,
            (Face::Back, Ccw) => Self::BPrime,
            (Face::Back, Half) => Self::B2,
            (Face::Left, Cw) => Self::L,
            (Face::Left, Ccw) => Self::LPrime,
            (Face::Left, Half) => Self::L2,
            (Face::Right, Cw) => Self::R,
            (Face::Right, Ccw) => Self::RPrime,
            (Face::Right, Half) => Self::R2,
        }
    }

    /// Face and amount, or `None` for tilts and the scan sequence.
    #[must_use]
    pub const fn face_and_amount(self) -> Option<(Face, Amount)> {
        use Amount::{Clockwise as Cw, CounterClockwise as Ccw, Half};
        Some(match self {
            Self::U => (Face::Up, Cw),
            Self::UPrime => (Face::Up, Ccw),
            Self::U2 => (Face::Up, Half),
            Self::D => (Face::Down, Cw),
            Self::DPrime => (Face::Down, Ccw),
            Self::D2 => (Face::Down, Half),
            Self::F => (Face::Front, Cw),
            Self::FPrime => (Face::Front, Ccw),
            Self::F2 => (Face::Front, Half),
            Self::B => (Face::Back, Cw),
            Self::BPrime => (Face::Back, Ccw),
            Self::B2 => (Face::Back, Half),
            Self::L => (Face::Left, Cw),
            Self::LPrime => (Face::Left, Ccw),
            Self::L2 => (Face::Left, Half),
            Self::R => (Face::Right, Cw),
            Self::RPrime => (Face::Right, Ccw),
            Self::R2 => (Face::Right, Half),
            Self::TiltLeft | Self::TiltRight | Self::ScanColors => return None,
        })
    }

    /// Notation used by the solver (`U`, `u`, `U2`, `tl`, ...).
    #[must_use]
    pub const fn notation(self) -> &'static str {
        match self {
            Self::U => "U",
            Self::UPrime => "u",
            Self::U2 => "U2",
            Self::D => "D",
            Self::DPrime => "d",
            Self::D2 => "D2",
            Self::F => "F",
            Self::FPrime => "f",
            Self::F2 => "F2",
            Self::B => "B",
            Self::BPrime => "b",
            Self::B2 => "B2",
            Self::L => "L",
            Self::LPrime => "l",
            Self::L2 => "L2",
            Self::R => "R",
            Self::RPrime => "r",
            Self::R2 => "R2",
            Self::TiltLeft => "tl",
            Self::TiltRight => "tr",
            Self::ScanColors => "scan",
        }
    }
}

impl FromStr for FaceTurn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let turn = match s {
            "U" => Self::U,
            "u" => Self::UPrime,
            "U2" => Self::U2,
            "D" => Self::D,
            "d" => Self::DPrime,
            "D2" => Self::D2,
            "F" => Self::F,
            "f" => Self::FPrime,
            "F2" => Self::F2,
            "B" => Self::B,
            "b" => Self::BPrime,
            "B2" => Self::B2,
            "L" => Self::L,
            "l" => Self::LPrime,
            "L2" => Self::L2,
            "R" => Self::R,
            "r" => Self::RPrime,
            "R2" => Self::R2,
            "tl" => Self::TiltLeft,
            "tr" => Self::TiltRight,
            "scan" => Self::ScanColors,
            _ => return Err(Error::UnknownMove),
        };
        Ok(turn)
    }
}

/// Device commands that perform `turn` on a cube in standard orientation.
#[must_use]
pub const fn servo_commands(turn: FaceTurn, mode: Mode) -> &'static str {
    use Mode::{ReCor, SpiCor};
    match (turn, mode) {
        (FaceTurn::U, ReCor) => "TTRTT",
        (FaceTurn::U, SpiCor) => "R",
        (FaceTurn::UPrime, ReCor) => "TTLTT",
        (FaceTurn::UPrime, SpiCor) => "L",
        (FaceTurn::U2, ReCor) => "TTRRTT",
        (FaceTurn::U2, SpiCor) => "RR",

        (FaceTurn::D, _) => "R",
        (FaceTurn::DPrime, _) => "L",
        (FaceTurn::D2, _) => "RR",

        (FaceTurn::F, ReCor) => "TRTTT",
        (FaceTurn::F, SpiCor) => "TR",
        (FaceTurn::FPrime, ReCor) => "TLTTT",
        (FaceTurn::FPrime, SpiCor) => "TL",
        (FaceTurn::F2, ReCor) => "TRRTTT",
        (FaceTurn::F2, SpiCor) => "TRR",

        (FaceTurn::B, ReCor) => "TTTRT",
        (FaceTurn::B, SpiCor) => "TTTR",
        (FaceTurn::BPrime, ReCor) => "TTTLT",
        (FaceTurn::BPrime, SpiCor) => "TTTL",
        (FaceTurn::B2, ReCor) => "TTTRRT",
        (FaceTurn::B2, SpiCor) => "TTTRR",

        (FaceTurn::L, ReCor) => "(TLTTRT) R (TRTTLT)",
        (FaceTurn::L, SpiCor) => "(TLTTRT) R",
        (FaceTurn::LPrime, ReCor) => "(TLTTRT) L (TRTTLT)",
        (FaceTurn::LPrime, SpiCor) => "(TLTTRT) L",
        (FaceTurn::L2, ReCor) => "(TLTTRT) RR (TRTTLT)",
        (FaceTurn::L2, SpiCor) => "(TLTTRT) RR",

        (FaceTurn::R, ReCor) => "(TRTTLT) R (TLTTRT)",
        (FaceTurn::R, SpiCor) => "(TRTTLT) R",
        (FaceTurn::RPrime, ReCor) => "(TRTTLT) L (TLTTRT)",
        (FaceTurn::RPrime, SpiCor) => "(TRTTLT) L",
        (FaceTurn::R2, ReCor) => "(TRTTLT) RR (TLTTRT)",
        (FaceTurn::R2, SpiCor) => "(TRTTLT) RR",

        (FaceTurn::TiltLeft, _) => "TLTTRT",
        (FaceTurn::TiltRight, _) => "TRTTLT",
        (FaceTurn::ScanColors, _) => "RRRRTT RRRRTT",
    }
}

/// Direction in the machine frame: x towards the front, y to the right, z up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    /// Face that points along this axis in standard orientation.
    #[must_use]
    pub const fn face(self) -> Face {
        match self {
            Self::PosX => Face::Front,
            Self::NegX => Face::Back,
            Self::PosY => Face::Right,
            Self::NegY => Face::Left,
            Self::PosZ => Face::Up,
            Self::NegZ => Face::Down,
        }
    }

    /// Where a cube side pointing along `self` ends up after `turn`.
    ///
    /// `turn` is the move as seen in standard orientation, i.e. the one sent to
    /// the device.
    #[must_use]
    pub const fn after(self, turn: FaceTurn) -> Self {
        use Axis::{NegX, NegY, NegZ, PosX, PosY, PosZ};
        use FaceTurn as T;
        match self {
            PosX => match turn {
                T::U => PosY,
                T::UPrime => NegY,
                T::U2 => NegX,
                T::F | T::FPrime | T::F2 | T::B | T::BPrime | T::B2 => NegZ,
                _ => PosX,
            },
            NegX => match turn {
                T::U => NegY,
                T::UPrime => PosY,
                T::U2 => PosX,
                T::F | T::FPrime | T::F2 | T::B | T::BPrime | T::B2 => PosZ,
                _ => NegX,
            },
            PosY => match turn {
                T::U => NegX,
                T::UPrime => PosX,
                T::U2 => NegY,
                T::L | T::LPrime | T::L2 | T::TiltLeft => PosZ,
                T::R | T::RPrime | T::R2 | T::TiltRight => NegZ,
                _ => PosY,
            },
            NegY => match turn {
                T::U => PosX,
                T::UPrime => NegX,
                T::U2 => PosY,
                T::L | T::LPrime | T::L2 | T::TiltLeft => NegZ,
                T::R | T::RPrime | T::R2 | T::TiltRight => PosZ,
                _ => NegY,
            },
            PosZ => match turn {
                T::F | T::FPrime | T::F2 => PosX,
                T::B => PosY,
                T::BPrime => NegY,
                T::B2 => NegX,
                T::L | T::LPrime | T::L2 | T::TiltLeft => NegY,
                T::R | T::RPrime | T::R2 | T::TiltRight => PosY,
                _ => PosZ,
            },
            NegZ => match turn {
                T::F | T::FPrime | T::F2 => NegX,
                T::B => NegY,
                T::BPrime => PosY,
                T::B2 => PosX,
                T::L | T::LPrime | T::L2 | T::TiltLeft => PosY,
                T::R | T::RPrime | T::R2 | T::TiltRight => NegY,
                _ => NegZ,
            },
        }
    }
}

/// Where the cube's logical front, right and up sides currently point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CubeOrientation {
    pub front: Axis,
    pub right: Axis,
    pub up: Axis,
}

impl Default for CubeOrientation {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl CubeOrientation {
    pub const STANDARD: Self = Self {
        front: Axis::PosX,
        right: Axis::PosY,
        up: Axis::PosZ,
    };

    /// Translates a logical turn into the turn to perform on the cube as it
    /// currently sits in the machine.
    ///
    /// Tilts and the scan sequence are not face turns and pass through.
    #[must_use]
    pub const fn relative(&self, turn: FaceTurn) -> FaceTurn {
        let Some((face, amount)) = turn.face_and_amount() else {
            return turn;
        };
        let physical = match face {
            Face::Up => self.up.face(),
            Face::Down => self.up.face().opposite(),
            Face::Front => self.front.face(),
            Face::Back => self.front.face().opposite(),
            Face::Right => self.right.face(),
            Face::Left => self.right.face().opposite(),
        };
        FaceTurn::new(physical, amount)
    }

    /// Orientation after the device performed `physical_turn`.
    #[must_use]
    pub const fn after(self, physical_turn: FaceTurn) -> Self {
        Self {
            front: self.front.after(physical_turn),
            right: self.right.after(physical_turn),
            up: self.up.after(physical_turn),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ALL_TURNS: [FaceTurn; 21] = [
        FaceTurn::U,
        FaceTurn::UPrime,
        FaceTurn::U2,
        FaceTurn::D,
        FaceTurn::DPrime,
        FaceTurn::D2,
        FaceTurn::F,
        FaceTurn::FPrime,
        FaceTurn::F2,
        FaceTurn::B,
        FaceTurn::BPrime,
        FaceTurn::B2,
        FaceTurn::L,
        FaceTurn::LPrime,
        FaceTurn::L2,
        FaceTurn::R,
        FaceTurn::RPrime,
        FaceTurn::R2,
        FaceTurn::TiltLeft,
        FaceTurn::TiltRight,
        FaceTurn::ScanColors,
    ];

    #[test]
    fn test_notation_parses_back() {
        for turn in ALL_TURNS {
            assert_eq!(turn.notation().parse::<FaceTurn>().unwrap(), turn);
        }
    }

    #[test]
    fn test_unknown_notation() {
        assert_eq!("X".parse::<FaceTurn>(), Err(Error::UnknownMove));
        assert_eq!("".parse::<FaceTurn>(), Err(Error::UnknownMove));
    }

    #[test]
    fn test_command_strings_fit_one_batch() {
        for turn in ALL_TURNS {
            for mode in [Mode::ReCor, Mode::SpiCor] {
                // One extra byte for the acknowledgment request.
                assert!(servo_commands(turn, mode).len() < crate::BATCH_CAPACITY);
            }
        }
    }

    #[test]
    fn test_command_strings_use_device_alphabet() {
        for turn in ALL_TURNS {
            for mode in [Mode::ReCor, Mode::SpiCor] {
                assert!(
                    servo_commands(turn, mode)
                        .bytes()
                        .all(|b| b"LRT ()".contains(&b))
                );
            }
        }
    }

    #[test]
    fn test_standard_orientation_is_identity() {
        for turn in ALL_TURNS {
            assert_eq!(CubeOrientation::STANDARD.relative(turn), turn);
        }
    }

    #[test]
    fn test_down_turns_keep_orientation() {
        let orientation = CubeOrientation::STANDARD;
        for turn in [FaceTurn::D, FaceTurn::DPrime, FaceTurn::D2] {
            assert_eq!(orientation.after(turn), orientation);
        }
    }

    #[test]
    fn test_front_turn_tips_cube_forward() {
        let after = CubeOrientation::STANDARD.after(FaceTurn::F);
        assert_eq!(after.front, Axis::NegZ);
        assert_eq!(after.up, Axis::PosX);
        assert_eq!(after.right, Axis::PosY);
        // Logical front now faces down, so a logical F is performed as D.
        assert_eq!(after.relative(FaceTurn::F), FaceTurn::D);
        assert_eq!(after.relative(FaceTurn::UPrime), FaceTurn::FPrime);
    }

    #[test]
    fn test_opposite_faces_pair_up() {
        for face in [Face::Up, Face::Front, Face::Left] {
            assert_eq!(face.opposite().opposite(), face);
            assert_ne!(face.opposite(), face);
        }
    }
}
