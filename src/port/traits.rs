//! Core trait for the serial link abstraction.
//!
//! Defines the `SerialLink` trait that allows both real serial ports and
//! mock implementations to be used interchangeably by the transport.

use super::error::PortError;
use std::time::Duration;

/// Trait for byte-oriented serial link I/O.
///
/// Marlin-class firmware talks 8N1 with no flow control, so the only
/// negotiable parameters are the device path and baud rate; those are
/// fixed when the link is opened.
pub trait SerialLink: Send + std::fmt::Debug {
    /// Write bytes to the link.
    ///
    /// Returns the number of bytes actually written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Read bytes from the link into the provided buffer.
    ///
    /// Returns the number of bytes actually read. A read with no data
    /// available surfaces as a transient `WouldBlock`/`TimedOut` I/O
    /// error (see [`PortError::is_transient_read`]).
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Get the name/path of this link.
    fn name(&self) -> &str;

    /// Set the per-read poll timeout.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError>;

    /// Discard any unread input and unsent output.
    ///
    /// Used once after the connect settle delay to drop the boot banner
    /// the firmware emits while resetting.
    fn clear_buffers(&mut self) -> Result<(), PortError>;

    /// Bytes currently available to read, if the link can tell.
    fn bytes_to_read(&self) -> Option<usize> {
        None
    }
}
