//! Hand-written transport and display doubles for integration tests

use serialvis_rs::backend::Transport;
use serialvis_rs::pipeline::{CancellationSignal, ChartDisplay, RenderFrame};
use serialvis_rs::{DisplayGeometry, Result, SerialVisError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted outcome of a `read` call
pub enum ScriptedRead {
    /// Copy these bytes into the buffer
    Bytes(Vec<u8>),
    /// Copy these bytes, then fire the signal, as if quit was pressed mid-read
    BytesThenCancel(Vec<u8>, CancellationSignal),
    /// Run an action (resize, cancel, ...) while the read is in flight, then
    /// copy these bytes
    BytesAfter(Vec<u8>, Box<dyn FnOnce() + Send>),
    /// Fail with this error kind
    Fail(std::io::ErrorKind),
}

/// Transport replaying a fixed script
///
/// Once the script runs out every read returns 0 bytes, like a quiet port.
pub struct ScriptedTransport {
    script: VecDeque<ScriptedRead>,
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

/// Shared counters for a [`ScriptedTransport`]
#[derive(Clone)]
pub struct TransportProbe {
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl TransportProbe {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl ScriptedTransport {
    pub fn new(script: Vec<ScriptedRead>) -> (Self, TransportProbe) {
        let reads = Arc::new(AtomicUsize::new(0));
        let closes = Arc::new(AtomicUsize::new(0));
        let probe = TransportProbe {
            reads: reads.clone(),
            closes: closes.clone(),
        };
        let transport = Self {
            script: script.into(),
            reads,
            closes,
        };
        (transport, probe)
    }
}

impl Transport for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.script.pop_front() {
            None => Ok(0),
            Some(ScriptedRead::Bytes(bytes)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Some(ScriptedRead::BytesThenCancel(bytes, signal)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                signal.cancel();
                Ok(bytes.len())
            }
            Some(ScriptedRead::BytesAfter(bytes, action)) => {
                action();
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Some(ScriptedRead::Fail(kind)) => Err(SerialVisError::Read(kind.into())),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Display that keeps every frame it is asked to draw
///
/// The geometry can be changed from another owner of the handle returned by
/// [`RecordingDisplay::geometry_handle`], like a terminal being resized.
pub struct RecordingDisplay {
    pub geometry: Arc<Mutex<DisplayGeometry>>,
    pub frames: Arc<Mutex<Vec<RenderFrame>>>,
}

impl RecordingDisplay {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            geometry: Arc::new(Mutex::new(DisplayGeometry::new(width, height))),
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn geometry_handle(&self) -> Arc<Mutex<DisplayGeometry>> {
        self.geometry.clone()
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl ChartDisplay for RecordingDisplay {
    fn geometry(&mut self) -> Result<DisplayGeometry> {
        Ok(*self.geometry.lock().unwrap())
    }

    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}
