//! Streaming ingestion pipeline
//!
//! Raw bytes flow through four stages before they reach the screen:
//!
//! ```text
//! transport bytes -> Tokenizer -> parse_sample -> RollingWindow -> RenderTrigger -> display
//! ```
//!
//! [`AcquisitionLoop`] owns all of them and drives the data through on a
//! single thread. The only cross-thread interaction is the
//! [`CancellationSignal`] fired by the input listener.

pub mod acquisition;
pub mod parser;
pub mod render;
pub mod tokenizer;
pub mod window;

pub use acquisition::{AcquisitionLoop, CancellationSignal, LoopState, READ_BUFFER_SIZE};
pub use parser::parse_sample;
pub use render::{ChartDisplay, PanelLayout, RenderFrame, RenderTrigger};
pub use tokenizer::Tokenizer;
pub use window::{bounds, capacity_for, RollingWindow};
