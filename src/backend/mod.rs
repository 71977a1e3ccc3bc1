//! Backend module for byte sources
//!
//! This module holds everything the acquisition loop can read bytes from.
//! All sources implement [`Transport`], a two-method contract (`read` with a
//! bounded timeout, `close`) that keeps the pipeline independent of where the
//! bytes come from.
//!
//! # Components
//!
//! - [`Transport`] - The read/close contract used by the acquisition loop
//! - [`TransportGuard`] - Closes a transport exactly once on every exit path
//! - [`SerialTransport`] - Real serial port via the `serialport` crate
//! - [`ChannelTransport`] - Byte chunks from another thread over crossbeam
//! - [`MockDevice`] - Simulated device for running without hardware (feature-gated)
//!
//! # Example
//!
//! ```ignore
//! use serialvis_rs::backend::{SerialTransport, Transport, TransportGuard};
//! use serialvis_rs::config::SerialConfig;
//!
//! let config = SerialConfig::new("/dev/ttyUSB0", 115_200);
//! let mut guard = TransportGuard::new(SerialTransport::open(&config)?);
//!
//! let mut buf = [0u8; 128];
//! if let Some(port) = guard.get_mut() {
//!     let n = port.read(&mut buf)?;
//! }
//! guard.release()?;
//! ```

pub mod channel;
#[cfg(feature = "mock-device")]
pub mod mock_device;
pub mod serial;
pub mod transport;

pub use channel::ChannelTransport;
#[cfg(feature = "mock-device")]
pub use mock_device::{MockDataPattern, MockDevice, PatternGenerator};
pub use serial::{list_ports, PortInfo, SerialTransport};
pub use transport::{Transport, TransportGuard};

#[cfg(test)]
pub use transport::MockTransport;
