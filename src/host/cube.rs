use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, info};

use super::{CubeLink, HostResult};
use crate::{Command, CubeOrientation, FaceTurn, Mode, servo_commands};

/// Time for the device to take the final home command off the wire.
const PARK_PAUSE: Duration = Duration::from_secs(1);

/// Performs cube moves on a connected device.
#[derive(Debug)]
pub struct PocketCube<T> {
    link: CubeLink<T>,
    mode: Mode,
    orientation: CubeOrientation,
}

impl<T: Read + Write> PocketCube<T> {
    /// Waits for the device's startup `ok` and starts in standard orientation.
    ///
    /// # Errors
    /// Fails if the device does not report ready.
    pub fn new(mut link: CubeLink<T>, mode: Mode) -> HostResult<Self> {
        link.wait_ready()?;
        info!("device ready, mode {mode:?}");
        Ok(Self {
            link,
            mode,
            orientation: CubeOrientation::STANDARD,
        })
    }

    /// Performs one logical move and returns the move the device actually made.
    ///
    /// In `SpiCor` mode the logical move is first mapped onto the cube's current
    /// orientation, and the orientation is updated afterwards.
    ///
    /// # Errors
    /// Fails if sending the commands or waiting for the reply fails.
    pub fn rotate_cube(&mut self, turn: FaceTurn) -> HostResult<FaceTurn> {
        let physical = match self.mode {
            Mode::SpiCor => self.orientation.relative(turn),
            Mode::ReCor => turn,
        };
        let commands = servo_commands(physical, self.mode);
        debug!(
            "{} -> {} -> {commands}",
            turn.notation(),
            physical.notation()
        );
        self.link.execute(commands)?;

        if self.mode == Mode::SpiCor {
            self.orientation = self.orientation.after(physical);
        }
        Ok(physical)
    }

    /// Performs a whitespace separated sequence such as `"F u R2"`.
    ///
    /// The whole sequence is parsed before anything is sent.
    ///
    /// # Errors
    /// Returns `HostError::Device(Error::UnknownMove)` for bad notation, or the
    /// first link error.
    pub fn rotate_sequence(&mut self, sequence: &str) -> HostResult<()> {
        let turns = sequence
            .split_whitespace()
            .map(str::parse::<FaceTurn>)
            .collect::<Result<Vec<_>, _>>()?;
        for turn in turns {
            self.rotate_cube(turn)?;
        }
        Ok(())
    }

    /// Waits `wait`, sends the servos home and hands back the transport.
    ///
    /// # Errors
    /// Fails if the home command cannot be written.
    pub fn shutdown(mut self, wait: Duration) -> HostResult<T> {
        thread::sleep(wait);
        self.link.write_str(&char::from(Command::Init.as_byte()).to_string())?;
        thread::sleep(PARK_PAUSE);
        Ok(self.link.into_inner())
    }

    #[must_use]
    pub const fn orientation(&self) -> CubeOrientation {
        self.orientation
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    #[derive(Debug)]
    struct Wire {
        rx: Cursor<Vec<u8>>,
        tx: Vec<u8>,
    }

    impl Read for Wire {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.rx.read(buf)
        }
    }

    impl Write for Wire {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.tx.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn cube(replies: &[u8], mode: Mode) -> PocketCube<Wire> {
        let wire = Wire {
            rx: Cursor::new(replies.to_vec()),
            tx: Vec::new(),
        };
        PocketCube::new(CubeLink::new(wire), mode).unwrap()
    }

    #[test]
    fn test_move_is_acknowledged_then_shutdown_sends_home() {
        let mut cube = cube(b"ok\r\nok\r\n", Mode::ReCor);
        assert_eq!(cube.rotate_cube(FaceTurn::F).unwrap(), FaceTurn::F);

        let wire = cube.shutdown(Duration::ZERO).unwrap();
        let expected = format!("{}>I", servo_commands(FaceTurn::F, Mode::ReCor));
        assert_eq!(String::from_utf8(wire.tx).unwrap(), expected);
    }

    #[test]
    fn test_bad_notation_sends_nothing() {
        let mut cube = cube(b"ok\r\n", Mode::SpiCor);
        assert!(cube.rotate_sequence("F X9").is_err());
        assert_eq!(cube.orientation(), CubeOrientation::STANDARD);
        let wire = cube.shutdown(Duration::ZERO).unwrap();
        assert_eq!(wire.tx, b"I");
    }
}
