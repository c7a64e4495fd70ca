//! Serial-link error types.

use thiserror::Error;

/// Errors that can occur on the serial link.
#[derive(Debug, Error)]
pub enum PortError {
    /// The specified serial port was not found on the system.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// An I/O error occurred during link operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Port configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A serialport-specific error occurred.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    /// Create a NotFound error from a port name.
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error only means "no data yet" on a poll read.
    ///
    /// The transport's read loop treats these as a cue to keep polling
    /// until its own deadline expires; everything else is a real fault.
    pub fn is_transient_read(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::not_found("/dev/ttyUSB0");
        assert_eq!(err.to_string(), "Serial port not found: /dev/ttyUSB0");

        let err = PortError::config("Invalid baud rate");
        assert_eq!(err.to_string(), "Configuration error: Invalid baud rate");
    }

    #[test]
    fn test_transient_classification() {
        let would_block = PortError::Io(std::io::Error::new(
            std::io::ErrorKind::WouldBlock,
            "no data",
        ));
        assert!(would_block.is_transient_read());

        let timed_out =
            PortError::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout"));
        assert!(timed_out.is_transient_read());

        let broken = PortError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        assert!(!broken.is_transient_read());
        assert!(!PortError::not_found("COM3").is_transient_read());
    }
}
