//! Mock serial link for testing.
//!
//! Provides a `MockSerialPort` that simulates firmware behavior without
//! hardware. Responses are scripted as ordered segments, each optionally
//! held back for a simulated delay, so tests can exercise both prompt and
//! late acknowledgements. Writes are logged for inspection and can be
//! forced to fail.

use super::error::PortError;
use super::traits::SerialLink;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A scripted chunk of response bytes.
#[derive(Debug)]
struct Segment {
    /// Bytes still to be delivered from this segment.
    data: VecDeque<u8>,
    /// The segment is invisible to reads before this instant.
    available_at: Instant,
}

/// Inner state of the mock link, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockPortState {
    /// Ordered response segments. Delivery order is enqueue order; a
    /// delayed front segment blocks later ones, like a real byte stream.
    segments: VecDeque<Segment>,
    /// Log of all byte chunks written to the link.
    write_log: Vec<Vec<u8>>,
    /// When set, a write whose payload contains this substring fails
    /// with the given message.
    fail_write_containing: Option<(String, String)>,
    /// When true, the next write fails unconditionally.
    fail_next_write: bool,
    /// Configured poll timeout (recorded, not enforced).
    timeout: Duration,
}

/// Mock serial link implementation for testing.
///
/// # Example
/// ```
/// use marlin_testbench::port::{MockSerialPort, SerialLink};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"ok\n");
///
/// let mut buffer = [0u8; 8];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"ok\n");
///
/// port.write_bytes(b"M115\n").unwrap();
/// assert_eq!(port.write_log(), vec![b"M115\n".to_vec()]);
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    /// The link name/identifier.
    name: String,
    /// The internal state, wrapped in Arc<Mutex<>> so clones share it.
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock link with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState {
                timeout: Duration::from_millis(100),
                ..Default::default()
            })),
        }
    }

    /// Enqueue bytes to be returned by subsequent reads, immediately visible.
    pub fn enqueue_read(&self, data: &[u8]) {
        self.enqueue_read_after(Duration::ZERO, data);
    }

    /// Enqueue bytes that only become readable after `delay` has elapsed.
    ///
    /// Models firmware that acknowledges late (e.g. while a probe is
    /// still moving). Until the delay expires, reads behave as if no
    /// data had arrived yet.
    pub fn enqueue_read_after(&self, delay: Duration, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.segments.push_back(Segment {
            data: data.iter().copied().collect(),
            available_at: Instant::now() + delay,
        });
    }

    /// Get a copy of all byte chunks written to the link.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.write_log.clone()
    }

    /// The written chunks decoded as UTF-8 lines, for command assertions.
    pub fn written_commands(&self) -> Vec<String> {
        self.write_log()
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk).trim_end().to_string())
            .collect()
    }

    /// Make the next write fail unconditionally with an I/O error.
    pub fn fail_next_write(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_next_write = true;
    }

    /// Make any write whose payload contains `pattern` fail with `message`.
    ///
    /// Earlier writes without the pattern still succeed, so a scripted
    /// fault can target one command in a multi-command check.
    pub fn fail_write_containing(&self, pattern: impl Into<String>, message: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.fail_write_containing = Some((pattern.into(), message.into()));
    }

    /// Bytes currently visible to reads.
    pub fn available_bytes(&self) -> usize {
        let state = self.state.lock().unwrap();
        let now = Instant::now();
        let mut total = 0;
        for segment in &state.segments {
            if segment.available_at > now {
                break;
            }
            total += segment.data.len();
        }
        total
    }
}

impl SerialLink for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(PortError::Io(std::io::Error::other(
                "simulated write fault",
            )));
        }

        if let Some((pattern, message)) = &state.fail_write_containing {
            if String::from_utf8_lossy(data).contains(pattern.as_str()) {
                let message = message.clone();
                return Err(PortError::Io(std::io::Error::other(message)));
            }
        }

        state.write_log.push(data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();

        let mut bytes_read = 0;
        while bytes_read < buffer.len() {
            let Some(front) = state.segments.front_mut() else {
                break;
            };
            if front.available_at > now {
                break;
            }
            match front.data.pop_front() {
                Some(byte) => {
                    buffer[bytes_read] = byte;
                    bytes_read += 1;
                }
                None => {
                    state.segments.pop_front();
                }
            }
        }

        if bytes_read == 0 {
            // Same "would block" behavior a real port with a poll
            // timeout exhibits when the firmware has not replied yet.
            Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                "No data available",
            )))
        } else {
            Ok(bytes_read)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError> {
        let mut state = self.state.lock().unwrap();
        state.timeout = timeout;
        Ok(())
    }

    fn clear_buffers(&mut self) -> Result<(), PortError> {
        let mut state = self.state.lock().unwrap();
        state.segments.clear();
        Ok(())
    }

    fn bytes_to_read(&self) -> Option<usize> {
        Some(self.available_bytes())
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_read() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"Hello");

        let mut buffer = [0u8; 10];
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buffer[..n], b"Hello");
    }

    #[test]
    fn test_empty_read_would_block() {
        let mut port = MockSerialPort::new("MOCK0");
        let mut buffer = [0u8; 10];

        let result = port.read_bytes(&mut buffer);
        match result {
            Err(PortError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::WouldBlock),
            other => panic!("Expected WouldBlock error, got {:?}", other),
        }
    }

    #[test]
    fn test_delayed_segment_blocks_until_due() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read_after(Duration::from_millis(30), b"ok\n");

        let mut buffer = [0u8; 8];
        assert!(port.read_bytes(&mut buffer).is_err());

        std::thread::sleep(Duration::from_millis(40));
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"ok\n");
    }

    #[test]
    fn test_delayed_front_segment_holds_back_later_data() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read_after(Duration::from_secs(60), b"late\n");
        port.enqueue_read(b"early\n");

        // Stream order is preserved: nothing is readable while the
        // front segment is still pending.
        let mut buffer = [0u8; 16];
        assert!(port.read_bytes(&mut buffer).is_err());
        assert_eq!(port.available_bytes(), 0);
    }

    #[test]
    fn test_write_logging() {
        let mut port = MockSerialPort::new("MOCK0");
        port.write_bytes(b"M115\n").unwrap();
        port.write_bytes(b"M119\n").unwrap();

        assert_eq!(port.written_commands(), vec!["M115", "M119"]);
    }

    #[test]
    fn test_fail_next_write() {
        let mut port = MockSerialPort::new("MOCK0");
        port.fail_next_write();

        assert!(port.write_bytes(b"M115\n").is_err());
        // Only the next write fails.
        assert!(port.write_bytes(b"M115\n").is_ok());
    }

    #[test]
    fn test_fail_write_containing_targets_one_command() {
        let mut port = MockSerialPort::new("MOCK0");
        port.fail_write_containing("M999", "controller went away");

        assert!(port.write_bytes(b"M112\n").is_ok());
        let err = port.write_bytes(b"M999\n").unwrap_err();
        assert!(err.to_string().contains("controller went away"));
    }

    #[test]
    fn test_clear_buffers() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"boot banner");

        port.clear_buffers().unwrap();
        assert_eq!(port.available_bytes(), 0);
    }

    #[test]
    fn test_partial_read() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"Hello, World!");

        let mut buffer = [0u8; 5];
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"Hello");
        assert_eq!(port.available_bytes(), 8);
    }

    #[test]
    fn test_clone_shares_state() {
        let port = MockSerialPort::new("MOCK0");
        let mut reader = port.clone();

        port.enqueue_read(b"shared");
        let mut buffer = [0u8; 6];
        let n = reader.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"shared");
    }
}
