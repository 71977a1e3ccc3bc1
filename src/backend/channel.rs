//! In-process transport fed through a crossbeam channel
//!
//! A producer thread sends byte chunks into a [`Sender`]; the acquisition
//! loop reads them back through [`ChannelTransport`] with the same timeout
//! semantics as a serial port. Used by the mock device and by tests that
//! need a device on another thread.

use crate::backend::transport::Transport;
use crate::error::{Result, SerialVisError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Chunks buffered between producer and reader before the producer blocks
pub const CHANNEL_CAPACITY: usize = 256;

/// Transport that reads byte chunks from a channel
pub struct ChannelTransport {
    receiver: Receiver<Vec<u8>>,
    /// Part of the last chunk that did not fit into the caller's buffer
    pending: Vec<u8>,
    timeout: Duration,
    closed: bool,
}

impl ChannelTransport {
    /// Create a connected sender/transport pair
    pub fn pair(timeout: Duration) -> (Sender<Vec<u8>>, Self) {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        (tx, Self::new(rx, timeout))
    }

    pub fn new(receiver: Receiver<Vec<u8>>, timeout: Duration) -> Self {
        Self {
            receiver,
            pending: Vec::new(),
            timeout,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn drain_pending(&mut self, buf: &mut [u8]) -> usize {
        let n = self.pending.len().min(buf.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        n
    }
}

impl Transport for ChannelTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.closed {
            return Err(SerialVisError::Read(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "channel transport already closed",
            )));
        }
        if !self.pending.is_empty() {
            return Ok(self.drain_pending(buf));
        }

        match self.receiver.recv_timeout(self.timeout) {
            Ok(chunk) => {
                self.pending = chunk;
                Ok(self.drain_pending(buf))
            }
            Err(RecvTimeoutError::Timeout) => Ok(0),
            Err(RecvTimeoutError::Disconnected) => Err(SerialVisError::Channel(
                "data source disconnected".to_string(),
            )),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.pending.clear();
        Ok(())
    }
}
