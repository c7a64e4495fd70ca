//! G-code command transport.
//!
//! Owns the serial link and implements the one command / one
//! acknowledgement exchange the firmware protocol expects: write a
//! newline-terminated command, then accumulate response lines until a
//! line containing the case-insensitive "ok" token arrives or the
//! deadline elapses. A missed deadline is not an error; whatever partial
//! text was observed is returned so checks can still pattern-match
//! against it.

use crate::gcode;
use crate::port::{PortError, SerialLink};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// All the fixed waits the harness observes, as data so tests can run
/// with near-zero delays.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Wait after opening the port; the firmware reboots on DTR toggle
    /// and needs time before it accepts commands.
    pub connect_settle: Duration,
    /// Brief pause after writing a command before polling for a reply.
    pub post_write_pause: Duration,
    /// Sleep between poll reads while waiting for a reply.
    pub poll_interval: Duration,
    /// Default deadline for a command's acknowledgement.
    pub command_timeout: Duration,
    /// Wait after homing/move and probe deploy/retract commands.
    pub actuation_settle: Duration,
    /// Wait after the probe self-test command.
    pub self_test_settle: Duration,
    /// Wait between emergency stop and the restart command.
    pub estop_settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            connect_settle: Duration::from_secs(2),
            post_write_pause: Duration::from_millis(100),
            poll_interval: Duration::from_millis(10),
            command_timeout: Duration::from_secs(5),
            actuation_settle: Duration::from_secs(2),
            self_test_settle: Duration::from_secs(3),
            estop_settle: Duration::from_secs(1),
        }
    }
}

impl Timings {
    /// Timings with all waits collapsed, for tests over mock links.
    pub fn instant() -> Self {
        Self {
            connect_settle: Duration::ZERO,
            post_write_pause: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
            command_timeout: Duration::from_millis(50),
            actuation_settle: Duration::ZERO,
            self_test_settle: Duration::ZERO,
            estop_settle: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct Inner {
    link: Box<dyn SerialLink>,
    /// Bytes received but not yet consumed by a command exchange. A
    /// response can keep arriving after its "ok"; the remainder stays
    /// buffered for the next exchange instead of being dropped.
    carry: String,
}

/// Shared handle to the firmware command channel.
///
/// Cloneable; all clones funnel through one mutex, so at most one
/// command is in flight at any time regardless of how many agents hold
/// a handle. The lock is held for the whole command/response exchange.
#[derive(Debug, Clone)]
pub struct GcodeTransport {
    inner: Arc<Mutex<Inner>>,
    timings: Timings,
    port_name: String,
}

impl GcodeTransport {
    /// Take ownership of an opened link and prepare it for commands.
    ///
    /// Observes the connect settle delay, then discards whatever the
    /// firmware printed while booting so the first command's response
    /// starts clean.
    pub fn connect(mut link: Box<dyn SerialLink>, timings: Timings) -> Result<Self, PortError> {
        let port_name = link.name().to_string();
        if !timings.connect_settle.is_zero() {
            debug!(port = %port_name, settle = ?timings.connect_settle, "waiting for firmware boot");
            std::thread::sleep(timings.connect_settle);
        }
        link.clear_buffers()?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                link,
                carry: String::new(),
            })),
            timings,
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Send a command with the default acknowledgement deadline.
    pub fn send_command(&self, command: &str) -> Result<String, PortError> {
        self.send_command_with_timeout(command, self.timings.command_timeout)
    }

    /// Send a command and accumulate response lines until the "ok" token
    /// or the deadline.
    ///
    /// Returns the newline-joined lines observed, whether or not the
    /// acknowledgement ever arrived; an expired deadline yields the
    /// partial (possibly empty) text. Write faults and non-transient
    /// read faults are errors.
    pub fn send_command_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, PortError> {
        let mut inner = self.inner.lock();
        debug!(command, "sending");

        let framed = format!("{command}\n");
        let bytes = framed.as_bytes();
        let mut written = 0;
        while written < bytes.len() {
            written += inner.link.write_bytes(&bytes[written..])?;
        }
        if !self.timings.post_write_pause.is_zero() {
            std::thread::sleep(self.timings.post_write_pause);
        }

        let deadline = Instant::now() + timeout;
        let mut response = String::new();
        let mut pending = std::mem::take(&mut inner.carry);
        let mut buf = [0u8; 256];

        loop {
            // Drain complete lines already buffered before reading more.
            while let Some(idx) = pending.find('\n') {
                let raw: String = pending.drain(..=idx).collect();
                let line = raw.trim();
                if line.is_empty() {
                    continue;
                }
                trace!(line, "received");
                response.push_str(line);
                response.push('\n');
                if line.to_ascii_lowercase().contains(gcode::ACK_TOKEN) {
                    inner.carry = pending;
                    return Ok(response);
                }
            }

            if Instant::now() >= deadline {
                break;
            }

            match inner.link.read_bytes(&mut buf) {
                Ok(0) => std::thread::sleep(self.timings.poll_interval),
                Ok(n) => pending.push_str(&String::from_utf8_lossy(&buf[..n])),
                Err(e) if e.is_transient_read() => {
                    std::thread::sleep(self.timings.poll_interval)
                }
                Err(e) => {
                    inner.carry = pending;
                    return Err(e);
                }
            }
        }

        debug!(command, "deadline elapsed without acknowledgement");
        inner.carry = pending;
        Ok(response)
    }

    /// Block for a fixed settle period after an actuation command.
    pub fn settle(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
