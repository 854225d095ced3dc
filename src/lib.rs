//! A `no_std` controller for a two-servo **2x2x2 pocket cube** manipulator.
//!
//! The machine has a horizontal rotation servo that turns the bottom layer to
//! 0°, 90°, 180° or 270°, and a vertical turn servo whose crossbar tips the cube
//! onto its side and pulls it back. A host sends single-byte commands over a
//! 9600 baud serial link:
//!
//! | Byte | Action |
//! | ---- | ------ |
//! | `I`  | home both servos |
//! | `L`  | rotate 90° left |
//! | `R`  | rotate 90° right |
//! | `T`  | tip the cube and restore the crossbar |
//! | `>`  | reply `ok` once everything before it has finished |
//!
//! The device side is hardware-agnostic: supply an [`ActuatorPort`] for the PWM
//! board, a [`ByteSource`] and a [`core::fmt::Write`] for the serial link, and
//! any [`embedded_hal::delay::DelayNs`] for timing. The `host` feature adds a
//! serial client for driving the machine from a PC.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod angle;
pub mod command;
pub mod config;
pub mod decoder;
pub mod dispatcher;
mod errors;
#[cfg(feature = "host")]
pub mod host;
pub mod motion;
pub mod moves;
pub mod port;

pub use angle::RotationAngle;
pub use command::Command;
pub use config::{AngleTickTable, Calibration};
pub use decoder::{CommandBatch, CommandDecoder};
pub use dispatcher::Dispatcher;
pub use errors::Error;
pub use motion::{MotionController, MotionStep};
pub use moves::{Axis, CubeOrientation, FaceTurn, Mode, servo_commands};
pub use port::{ActuatorPort, ByteSource};

/// Baud rate of the command link on both ends.
pub const BAUD_RATE: u32 = 9600;

/// Maximum number of command bytes taken from the link in one poll.
pub const BATCH_CAPACITY: usize = 32;

/// Line sent by the device after startup and for every `>` command.
pub const READY_TOKEN: &str = "ok";

/// Highest tick value of the 12-bit PWM counter.
pub const MAX_TICKS: u16 = 4095;

/// Highest channel number of the PWM board.
pub const MAX_CHANNEL: u8 = 15;

/// Longest settle time a calibration may ask for. A full 270° sweep waits
/// three rotate delays, which must still fit a `u32` of milliseconds.
pub const MAX_DELAY_MS: u32 = 60_000;
