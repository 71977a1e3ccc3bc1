//! Mock Serial Device for Testing
//!
//! This module provides a simulated serial device that can be used to run
//! the plotter without real hardware. A generator thread produces readings
//! from a [`MockDataPattern`], formats them as text followed by the
//! delimiter, and pushes them through a [`ChannelTransport`].
//!
//! Each reading is deliberately sent in two chunks cut at a moving offset,
//! so the tokenizer's carry-over path is exercised the way a real UART
//! driver would.
//!
//! # Example
//!
//! ```ignore
//! use serialvis_rs::backend::mock_device::{MockDataPattern, MockDevice};
//!
//! let (transport, handle) = MockDevice::new(MockDataPattern::Sine {
//!     frequency: 0.5,
//!     amplitude: 100.0,
//!     offset: 0.0,
//! })
//! .with_rate(50)
//! .spawn();
//! ```
//!
//! # Enabling
//!
//! The mock device is only available when the `mock-device` feature is enabled:
//!
//! ```bash
//! cargo run --features mock-device -- --mock
//! ```

use crate::backend::channel::ChannelTransport;
use crate::config::DEFAULT_DELIMITER;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Pattern for generating mock data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockDataPattern {
    /// Constant value
    Constant(f64),
    /// Sine wave with frequency and amplitude
    Sine {
        frequency: f64,
        amplitude: f64,
        offset: f64,
    },
    /// Counter that increments
    Counter { step: f64, min: f64, max: f64 },
    /// Sawtooth wave
    Sawtooth { period: f64, amplitude: f64 },
    /// Square wave
    Square { period: f64, amplitude: f64 },
    /// Triangle wave
    Triangle { period: f64, amplitude: f64 },
}

impl Default for MockDataPattern {
    fn default() -> Self {
        MockDataPattern::Sine {
            frequency: 0.5,
            amplitude: 100.0,
            offset: 0.0,
        }
    }
}

/// Stateful value source for one pattern
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    pattern: MockDataPattern,
    counter_value: f64,
}

impl PatternGenerator {
    pub fn new(pattern: MockDataPattern) -> Self {
        let counter_value = match pattern {
            MockDataPattern::Counter { min, step, .. } => min - step,
            _ => 0.0,
        };
        Self {
            pattern,
            counter_value,
        }
    }

    /// Generate a value based on the pattern and elapsed time
    pub fn next_value(&mut self, elapsed_secs: f64) -> f64 {
        match self.pattern {
            MockDataPattern::Constant(v) => v,
            MockDataPattern::Sine {
                frequency,
                amplitude,
                offset,
            } => offset + amplitude * (2.0 * std::f64::consts::PI * frequency * elapsed_secs).sin(),
            MockDataPattern::Counter { step, min, max } => {
                self.counter_value += step;
                if self.counter_value > max {
                    self.counter_value = min;
                } else if self.counter_value < min {
                    self.counter_value = max;
                }
                self.counter_value
            }
            MockDataPattern::Sawtooth { period, amplitude } => {
                amplitude * ((elapsed_secs % period) / period)
            }
            MockDataPattern::Square { period, amplitude } => {
                if elapsed_secs % period < period / 2.0 {
                    amplitude
                } else {
                    -amplitude
                }
            }
            MockDataPattern::Triangle { period, amplitude } => {
                let t = elapsed_secs % period;
                let half = period / 2.0;
                if t < half {
                    amplitude * (2.0 * t / half - 1.0)
                } else {
                    amplitude * (1.0 - 2.0 * (t - half) / half)
                }
            }
        }
    }
}

/// Simulated serial device emitting delimiter-separated readings
#[derive(Debug, Clone)]
pub struct MockDevice {
    pattern: MockDataPattern,
    rate_hz: u32,
    delimiter: String,
    read_timeout: Duration,
}

impl MockDevice {
    pub fn new(pattern: MockDataPattern) -> Self {
        Self {
            pattern,
            rate_hz: 50,
            delimiter: DEFAULT_DELIMITER.to_string(),
            read_timeout: Duration::from_millis(100),
        }
    }

    /// Readings per second (minimum 1)
    pub fn with_rate(mut self, rate_hz: u32) -> Self {
        self.rate_hz = rate_hz.max(1);
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Start the generator thread and return the transport reading from it
    ///
    /// The thread exits once the transport is dropped.
    pub fn spawn(self) -> (ChannelTransport, JoinHandle<()>) {
        let (tx, transport) = ChannelTransport::pair(self.read_timeout);
        let interval = Duration::from_micros(1_000_000 / self.rate_hz as u64);

        let handle = std::thread::spawn(move || {
            tracing::info!("Mock device started ({:?} @ {} Hz)", self.pattern, self.rate_hz);
            let mut generator = PatternGenerator::new(self.pattern);
            let start = Instant::now();
            let mut seq: usize = 0;

            loop {
                let value = generator.next_value(start.elapsed().as_secs_f64());
                let line = format!("{:.3}{}", value, self.delimiter).into_bytes();
                let cut = seq % line.len();
                seq = seq.wrapping_add(1);

                let sent = if cut == 0 {
                    tx.send(line).is_ok()
                } else {
                    tx.send(line[..cut].to_vec()).is_ok() && tx.send(line[cut..].to_vec()).is_ok()
                };
                if !sent {
                    break;
                }
                std::thread::sleep(interval);
            }
            tracing::info!("Mock device stopped");
        });

        (transport, handle)
    }
}
