//! Acquisition loop
//!
//! This module contains the control loop that owns the whole pipeline: it
//! reads from the transport, tokenizes and parses the bytes, appends samples
//! to the rolling window and triggers one redraw per batch.
//!
//! # States
//!
//! - **Running** - read, ingest, draw; repeated until cancellation or error
//! - **Draining** - cancellation observed; release the transport
//! - **Stopped** - terminal; no reads, no draws
//!
//! Cancellation is checked before every read. A read that is already in
//! flight when the signal fires completes normally and its batch is drawn,
//! so the last frame always reflects every byte that was read.
//!
//! # Failure
//!
//! A transport read error or a render error is fatal: the transport is
//! released and the error is returned to the caller. There are no retries.

use crate::backend::{Transport, TransportGuard};
use crate::config::AppConfig;
use crate::error::{Result, SerialVisError};
use crate::pipeline::parser::parse_sample;
use crate::pipeline::render::{ChartDisplay, RenderTrigger};
use crate::pipeline::tokenizer::Tokenizer;
use crate::pipeline::window::{capacity_for, RollingWindow};
use crate::types::AcquisitionStats;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Size of the buffer handed to each transport read
pub const READ_BUFFER_SIZE: usize = 128;

/// Single-fire stop request shared between the input listener and the loop
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    fired: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal; there is no way to reset it
    pub fn cancel(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Lifecycle state of the acquisition loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Draining,
    Stopped,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopState::Running => write!(f, "Running"),
            LoopState::Draining => write!(f, "Draining"),
            LoopState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// The pipeline session: transport, tokenizer, window and display
pub struct AcquisitionLoop<'a, T: Transport, D: ChartDisplay + ?Sized> {
    transport: TransportGuard<T>,
    display: &'a mut D,
    tokenizer: Tokenizer,
    window: RollingWindow,
    trigger: RenderTrigger,
    signal: CancellationSignal,
    state: LoopState,
    stats: AcquisitionStats,
    read_buf: Vec<u8>,
}

impl<'a, T: Transport, D: ChartDisplay + ?Sized> AcquisitionLoop<'a, T, D> {
    /// Build a session from a resolved configuration
    ///
    /// Takes ownership of the transport; it is closed exactly once, no
    /// matter how the session ends.
    pub fn new(
        transport: T,
        display: &'a mut D,
        config: &AppConfig,
        signal: CancellationSignal,
    ) -> Result<Self> {
        let transport = TransportGuard::new(transport);
        let tokenizer = Tokenizer::new(&config.display.delimiter)?;
        let trigger = RenderTrigger::new(config.display.mode, config.border_label());
        tracing::debug!(
            delimiter = ?String::from_utf8_lossy(tokenizer.delimiter()),
            mode = %trigger.mode(),
            "Acquisition configured"
        );
        Ok(Self {
            transport,
            display,
            tokenizer,
            window: RollingWindow::new(),
            trigger,
            signal,
            state: LoopState::Running,
            stats: AcquisitionStats::default(),
            read_buf: vec![0u8; READ_BUFFER_SIZE],
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn stats(&self) -> &AcquisitionStats {
        &self.stats
    }

    /// Run until cancelled or until a fatal error
    ///
    /// Performs a layout-only draw first. Returns the run statistics on a
    /// clean stop.
    pub fn run(&mut self) -> Result<AcquisitionStats> {
        if self.state == LoopState::Stopped {
            return Ok(self.stats.clone());
        }

        tracing::info!("Acquisition started");
        if let Err(e) = self.draw() {
            return Err(self.fail(e));
        }

        loop {
            match self.state {
                LoopState::Running => {
                    if let Err(e) = self.step() {
                        return Err(self.fail(e));
                    }
                }
                LoopState::Draining => {
                    if let Err(e) = self.transport.release() {
                        tracing::warn!("Failed to close transport while draining: {}", e);
                    }
                    self.transition(LoopState::Stopped);
                }
                LoopState::Stopped => break,
            }
        }

        tracing::info!(
            reads = self.stats.reads,
            bytes = self.stats.bytes_read,
            samples = self.stats.samples,
            draws = self.stats.draws,
            "Acquisition stopped"
        );
        Ok(self.stats.clone())
    }

    /// One iteration of the Running state
    fn step(&mut self) -> Result<()> {
        if self.signal.is_cancelled() {
            self.transition(LoopState::Draining);
            return Ok(());
        }

        let Some(transport) = self.transport.get_mut() else {
            self.transition(LoopState::Stopped);
            return Ok(());
        };

        let n = transport.read(&mut self.read_buf)?;
        self.stats.reads += 1;
        if n == 0 {
            self.stats.empty_reads += 1;
            return Ok(());
        }

        self.ingest(n)?;
        self.draw()
    }

    /// Tokenize the first `n` bytes of the read buffer and append the samples
    fn ingest(&mut self, n: usize) -> Result<()> {
        self.stats.bytes_read += n as u64;
        let tokens = self.tokenizer.feed(&self.read_buf[..n]);
        if tokens.is_empty() {
            return Ok(());
        }

        let geometry = self.display.geometry()?;
        let capacity = capacity_for(geometry, self.trigger.mode());
        let before = self.stats.samples;
        for sample in tokens.iter().filter_map(|token| parse_sample(token)) {
            self.window.append(sample, capacity);
            self.stats.samples += 1;
        }

        tracing::trace!(
            bytes = n,
            tokens = tokens.len(),
            samples = self.stats.samples - before,
            capacity,
            window = self.window.len(),
            "batch ingested"
        );
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.trigger.draw(&mut *self.display, &self.window)?;
        self.stats.draws += 1;
        Ok(())
    }

    /// Release the transport after a fatal error and stop
    fn fail(&mut self, error: SerialVisError) -> SerialVisError {
        tracing::error!("Acquisition failed: {}", error);
        if let Err(e) = self.transport.release() {
            tracing::warn!("Failed to close transport after error: {}", e);
        }
        self.transition(LoopState::Stopped);
        error
    }

    fn transition(&mut self, next: LoopState) {
        tracing::debug!("Acquisition {} -> {}", self.state, next);
        self.state = next;
    }
}
