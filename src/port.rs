//! Seams to the hardware the controller does not own.
//!
//! Delays go through [`embedded_hal::delay::DelayNs`]; the readiness line goes
//! through [`core::fmt::Write`].

/// PWM servo board (PCA9685 or similar).
///
/// Writes are fire-and-forget: the board has no acknowledgment path.
pub trait ActuatorPort {
    /// Sets the PWM frequency for all channels.
    fn set_frequency(&mut self, hz: u16);

    /// Sets the pulse width of one channel, in ticks of the PWM period.
    fn set_channel(&mut self, channel: u8, ticks: u16);
}

impl<T: ActuatorPort + ?Sized> ActuatorPort for &mut T {
    fn set_frequency(&mut self, hz: u16) {
        T::set_frequency(self, hz);
    }

    fn set_channel(&mut self, channel: u8, ticks: u16) {
        T::set_channel(self, channel, ticks);
    }
}

/// Non-blocking source of received serial bytes.
pub trait ByteSource {
    /// Returns the next pending byte, or `None` if nothing has arrived.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> Option<u8> {
        T::read_byte(self)
    }
}
