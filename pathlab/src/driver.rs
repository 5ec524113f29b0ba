//! Back-end abstraction between the run loop and a concrete terminal.

use std::error::Error;
use std::sync::mpsc::Sender;
use std::time::Duration;

use pathlab_core::Context;

use crate::canvas::Frame;
use crate::msg::Msg;

pub trait Driver {
    /// Prepare the back-end for drawing and input.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and send every pending message through
    /// `tx`. Returns early once `ctx` is cancelled.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn Error>>;

    /// Paint the changed glyphs.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Restore the back-end. Must be safe to call after a failed `init`.
    fn close(&mut self);
}
