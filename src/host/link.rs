use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use serial::{SerialPort, SerialPortSettings, SystemPort};

use super::{HostConfig, HostError, HostResult};
use crate::{Command, READY_TOKEN};

/// Opening the port resets the board; give it time before talking.
const RESET_PAUSE: Duration = Duration::from_secs(1);
/// Timeout used while discarding bytes left over from before the reset.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(50);

const PROBE_PREFIXES: [&str; 2] = ["/dev/ttyACM", "/dev/ttyUSB"];
const PROBE_COUNT: usize = 16;

/// Line-oriented client for the device command protocol.
#[derive(Debug)]
pub struct CubeLink<T> {
    transport: T,
}

impl CubeLink<SystemPort> {
    /// Opens `path` at 9600 baud 8N1 and discards whatever arrived during the
    /// board reset.
    ///
    /// # Errors
    /// Returns `HostError::Serial` if the port cannot be opened or configured.
    pub fn open(path: &str, read_timeout: Duration) -> HostResult<Self> {
        let mut port = serial::open(path)?;
        port.reconfigure(&|settings: &mut dyn SerialPortSettings| {
            settings.set_baud_rate(serial::Baud9600)?;
            settings.set_char_size(serial::Bits8);
            settings.set_parity(serial::ParityNone);
            settings.set_stop_bits(serial::Stop1);
            settings.set_flow_control(serial::FlowNone);
            Ok(())
        })?;

        thread::sleep(RESET_PAUSE);
        port.set_timeout(DRAIN_TIMEOUT)?;
        let mut buffer = [0u8; 256];
        while let Ok(n @ 1..) = port.read(&mut buffer) {
            debug!("drained {n} stale bytes");
        }
        port.set_timeout(read_timeout)?;

        info!("connected to serial port {path}");
        Ok(Self::new(port))
    }

    /// Tries `/dev/ttyACM0..15`, then `/dev/ttyUSB0..15`.
    ///
    /// # Errors
    /// Returns `HostError::NoPort` if none of them can be opened.
    pub fn discover(read_timeout: Duration) -> HostResult<Self> {
        for prefix in PROBE_PREFIXES {
            for index in 0..PROBE_COUNT {
                let path = format!("{prefix}{index}");
                if let Ok(link) = Self::open(&path, read_timeout) {
                    return Ok(link);
                }
            }
        }
        warn!("cannot connect to any of {PROBE_PREFIXES:?}0..{}", PROBE_COUNT - 1);
        Err(HostError::NoPort)
    }

    /// Opens the configured port, or probes for one if none is set.
    ///
    /// # Errors
    /// See [`Self::open`] and [`Self::discover`].
    pub fn connect(config: &HostConfig) -> HostResult<Self> {
        match &config.port_path {
            Some(path) => Self::open(path, config.read_timeout),
            None => Self::discover(config.read_timeout),
        }
    }
}

impl<T: Read + Write> CubeLink<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Reads one line without its `\r\n` terminator.
    ///
    /// Returns `Ok(None)` if the read timed out or the stream ended before any
    /// byte arrived.
    ///
    /// # Errors
    /// Returns `HostError::Timeout` if the read times out partway through a
    /// line, and `HostError::Io` for other transport failures.
    pub fn read_line(&mut self) -> HostResult<Option<String>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.transport.read(&mut byte) {
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => break,
                Ok(_) => line.push(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
                    ) =>
                {
                    if line.is_empty() {
                        break;
                    }
                    debug!("timed out after {} bytes of a line", line.len());
                    return Err(HostError::Timeout);
                }
                Err(e) => return Err(e.into()),
            }
        }
        if line.is_empty() {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&line);
        Ok(Some(text.trim_end_matches('\r').to_owned()))
    }

    /// Sends raw command bytes.
    ///
    /// # Errors
    /// Returns `HostError::Io` if the write fails.
    pub fn write_str(&mut self, data: &str) -> HostResult<()> {
        debug!("send: {data}");
        self.transport.write_all(data.as_bytes())?;
        self.transport.flush()?;
        Ok(())
    }

    /// Waits for the next `ok` line.
    ///
    /// # Errors
    /// Returns `HostError::Timeout` if nothing arrives and
    /// `HostError::UnexpectedReply` for any other line.
    pub fn wait_ready(&mut self) -> HostResult<()> {
        match self.read_line()? {
            Some(line) if line == READY_TOKEN => Ok(()),
            Some(line) => {
                warn!("expected {READY_TOKEN:?}, got {line:?}");
                Err(HostError::UnexpectedReply(line))
            }
            None => Err(HostError::Timeout),
        }
    }

    /// Sends `commands` followed by an acknowledgment request and blocks until
    /// the device has executed all of them.
    ///
    /// # Errors
    /// See [`Self::write_str`] and [`Self::wait_ready`].
    pub fn execute(&mut self, commands: &str) -> HostResult<()> {
        let mut data = String::with_capacity(commands.len() + 1);
        data.push_str(commands);
        data.push(char::from(Command::Acknowledge.as_byte()));
        self.write_str(&data)?;
        self.wait_ready()
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
