//! Collects pending serial bytes into a bounded batch.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{BATCH_CAPACITY, ByteSource, Command};

/// Bytes received during one poll, in arrival order.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct CommandBatch {
    bytes: [u8; BATCH_CAPACITY],
    len: usize,
}

impl Default for CommandBatch {
    fn default() -> Self {
        Self {
            bytes: [0; BATCH_CAPACITY],
            len: 0,
        }
    }
}

impl fmt::Debug for CommandBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBatch")
            .field("bytes", &self.as_bytes())
            .finish()
    }
}

impl CommandBatch {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == BATCH_CAPACITY
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Decoded commands in arrival order.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.as_bytes().iter().copied().map(Command::from)
    }

    /// Appends a byte; returns `false` if the batch is already full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }
}

/// Reads up to [`BATCH_CAPACITY`] bytes per poll from a [`ByteSource`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandDecoder {
    byte_debounce_ms: u32,
}

impl CommandDecoder {
    #[must_use]
    pub const fn new(byte_debounce_ms: u32) -> Self {
        Self { byte_debounce_ms }
    }

    /// Drains pending bytes until the source runs dry or the batch is full.
    ///
    /// Waits the debounce time after every byte so that a command string still
    /// in flight lands in the same batch. Bytes past the capacity stay in the
    /// source for the next poll.
    pub fn poll<S, D>(&self, source: &mut S, delay: &mut D) -> CommandBatch
    where
        S: ByteSource + ?Sized,
        D: DelayNs + ?Sized,
    {
        let mut batch = CommandBatch::default();
        while !batch.is_full() {
            let Some(byte) = source.read_byte() else {
                break;
            };
            batch.push(byte);
            delay.delay_ms(self.byte_debounce_ms);
        }
        if !batch.is_empty() {
            trace!("received batch {:?}", batch.as_bytes());
        }
        batch
    }
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new(crate::config::BYTE_DEBOUNCE_MS)
    }
}
