//! # SerialVis-RS: Terminal Serial Plotter
//!
//! A real-time plotter for numeric readings streamed over a serial line. Bytes
//! are read from the port, split on a configurable delimiter, parsed into
//! samples and drawn as a scrolling line chart next to a list of the most
//! recent values, all inside the terminal.
//!
//! ## Architecture
//!
//! - **Backend**: Byte sources behind the [`backend::Transport`] trait (serial
//!   port, in-process channel, simulated device)
//! - **Pipeline**: Tokenizer, parser, rolling window and render trigger, owned
//!   and driven by [`pipeline::AcquisitionLoop`]
//! - **Frontend**: ratatui/crossterm display and the quit-key listener
//! - **Communication**: A single-fire [`pipeline::CancellationSignal`] is the
//!   only state shared between the reader and the input thread
//!
//! ## Logging
//!
//! The terminal belongs to the chart, so the binary writes its `tracing`
//! output to a file under the platform data directory
//! (`dev.serialvis.serialvis-rs/logs`) unless `--log-dir` is given.
//!
//! ## Example
//!
//! ```ignore
//! use serialvis_rs::{
//!     backend::SerialTransport,
//!     config::{AppConfig, SerialConfig},
//!     frontend::{spawn_quit_listener, TerminalDisplay},
//!     pipeline::{AcquisitionLoop, CancellationSignal},
//! };
//!
//! fn main() -> serialvis_rs::Result<()> {
//!     let mut config = AppConfig::new();
//!     config.serial = SerialConfig::new("/dev/ttyUSB0", 115_200);
//!     config.validate()?;
//!
//!     let transport = SerialTransport::open(&config.serial)?;
//!     let mut display = TerminalDisplay::init()?;
//!     let signal = CancellationSignal::new();
//!     let listener = spawn_quit_listener(signal.clone())?;
//!
//!     let result = AcquisitionLoop::new(transport, &mut display, &config, signal.clone())?.run();
//!     signal.cancel();
//!     let _ = listener.join();
//!     result.map(|_| ())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod frontend;
pub mod pipeline;
pub mod types;

pub use error::{Result, ResultExt, SerialVisError};
pub use types::*;
