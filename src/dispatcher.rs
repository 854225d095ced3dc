//! Device main loop: read a batch, execute it in order, idle, repeat.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace};

use crate::{
    ActuatorPort, ByteSource, Command, CommandBatch, CommandDecoder, MotionController, READY_TOKEN,
};

/// Connects the serial link to the motion controller.
#[derive(Debug)]
pub struct Dispatcher<P, D, S, W> {
    controller: MotionController<P, D>,
    decoder: CommandDecoder,
    source: S,
    output: W,
}

impl<P, D, S, W> Dispatcher<P, D, S, W>
where
    P: ActuatorPort,
    D: DelayNs,
    S: ByteSource,
    W: Write,
{
    pub fn new(controller: MotionController<P, D>, source: S, output: W) -> Self {
        let decoder = CommandDecoder::new(controller.calibration().byte_debounce_ms);
        Self {
            controller,
            decoder,
            source,
            output,
        }
    }

    /// Startup sequence: configure the board, home the servos, report ready.
    pub fn start(&mut self) {
        self.controller.init_driver();
        self.controller.init_positions();
        info!("servos homed, ready");
        self.send_ready();
    }

    /// Executes one command to completion.
    pub fn dispatch(&mut self, command: Command) {
        if command.is_motion() {
            debug!("command: {command}");
        } else {
            trace!("command: {command}");
        }
        match command {
            Command::Init => self.controller.init_positions(),
            Command::RotateLeft => self.controller.rotate_left(),
            Command::RotateRight => self.controller.rotate_right(),
            Command::Turn => self.controller.turn_cube(),
            Command::Acknowledge => self.send_ready(),
            Command::Unrecognized(_) => {}
        }
    }

    /// Executes every command of `batch` in arrival order.
    pub fn dispatch_batch(&mut self, batch: &CommandBatch) {
        for command in batch.commands() {
            self.dispatch(command);
        }
    }

    /// One loop iteration. Returns the number of bytes taken from the source.
    pub fn poll_once(&mut self) -> usize {
        let batch = self
            .decoder
            .poll(&mut self.source, self.controller.delay_mut());
        self.dispatch_batch(&batch);

        let idle_ms = self.controller.calibration().idle_delay_ms;
        self.controller.delay_mut().delay_ms(idle_ms);
        batch.len()
    }

    /// Runs the startup sequence and then polls forever.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.poll_once();
        }
    }

    fn send_ready(&mut self) {
        // The link has no error path back to the host.
        self.output.write_str(READY_TOKEN).ok();
        self.output.write_str("\r\n").ok();
    }

    #[must_use]
    pub const fn controller(&self) -> &MotionController<P, D> {
        &self.controller
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn release(self) -> (MotionController<P, D>, S, W) {
        (self.controller, self.source, self.output)
    }
}
