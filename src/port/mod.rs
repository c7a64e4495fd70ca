//! Serial link abstraction layer.
//!
//! Provides the `SerialLink` trait plus a real implementation over the
//! `serialport` crate and a scripted mock, enabling dependency injection
//! and hardware-free testing.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::SyncSerialPort;
pub use traits::SerialLink;
