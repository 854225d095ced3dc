//! PC side of the serial link (`host` feature).
//!
//! [`CubeLink`] speaks the byte protocol; [`PocketCube`] turns face moves into
//! command strings and keeps track of how the cube sits in the machine.

mod config;
mod cube;
mod link;

use std::fmt;
use std::io;

pub use config::HostConfig;
pub use cube::PocketCube;
pub use link::CubeLink;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug)]
pub enum HostError {
    Io(io::Error),
    Serial(serial::Error),
    Device(crate::Error),
    Config(String),
    /// No `ok` arrived within the read timeout.
    Timeout,
    UnexpectedReply(String),
    /// Port discovery found no device.
    NoPort,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serial(err) => write!(f, "serial port error: {err}"),
            Self::Device(err) => write!(f, "{err}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Timeout => f.write_str("timed out waiting for the device"),
            Self::UnexpectedReply(line) => write!(f, "unexpected reply {line:?}"),
            Self::NoPort => f.write_str("no serial port with a cube device found"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serial(err) => Some(err),
            Self::Device(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for HostError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serial::Error> for HostError {
    fn from(err: serial::Error) -> Self {
        Self::Serial(err)
    }
}

impl From<crate::Error> for HostError {
    fn from(err: crate::Error) -> Self {
        Self::Device(err)
    }
}
