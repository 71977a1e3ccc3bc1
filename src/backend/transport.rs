//! Transport trait for byte sources
//!
//! This module provides a common trait for everything the acquisition loop
//! can read from: a real serial port, an in-process channel, or a mock
//! device. It also provides [`TransportGuard`], which owns a transport and
//! guarantees it is closed exactly once on every exit path.

use crate::error::Result;

/// Unified interface for byte sources
///
/// Implementations must be `Send` so a transport can be opened on one thread
/// and handed to the acquisition thread.
///
/// # Example
///
/// ```ignore
/// fn pump(transport: &mut dyn Transport) -> Result<usize> {
///     let mut buf = [0u8; 128];
///     transport.read(&mut buf)
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send {
    /// Read available bytes into `buf`
    ///
    /// Blocks for at most the transport's read timeout. A timeout returns
    /// `Ok(0)`; any other failure is an error and ends acquisition.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Release the underlying resource
    fn close(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Owns a transport and closes it exactly once
///
/// [`TransportGuard::release`] closes explicitly and reports the result.
/// If the guard is dropped without being released (panic, early return) the
/// transport is closed in `Drop` and any error is logged.
pub struct TransportGuard<T: Transport> {
    transport: Option<T>,
}

impl<T: Transport> TransportGuard<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// The transport, or `None` once released
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    pub fn is_released(&self) -> bool {
        self.transport.is_none()
    }

    /// Close the transport; later calls are no-ops returning `Ok(())`
    pub fn release(&mut self) -> Result<()> {
        match self.transport.take() {
            Some(mut transport) => {
                tracing::debug!("Releasing transport");
                transport.close()
            }
            None => Ok(()),
        }
    }
}

impl<T: Transport> Drop for TransportGuard<T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("Failed to close transport: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SerialVisError;

    #[test]
    fn test_release_closes_once() {
        let mut transport = MockTransport::new();
        transport.expect_close().times(1).returning(|| Ok(()));

        let mut guard = TransportGuard::new(transport);
        assert!(!guard.is_released());
        guard.release().unwrap();
        assert!(guard.is_released());
        assert!(guard.get_mut().is_none());

        // Second release and drop must not close again
        guard.release().unwrap();
    }

    #[test]
    fn test_drop_closes_unreleased_transport() {
        let mut transport = MockTransport::new();
        transport.expect_close().times(1).returning(|| Ok(()));

        let guard = TransportGuard::new(transport);
        drop(guard);
    }

    #[test]
    fn test_drop_swallows_close_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_close()
            .times(1)
            .returning(|| Err(SerialVisError::Close("already gone".to_string())));

        drop(TransportGuard::new(transport));
    }

    #[test]
    fn test_boxed_transport_forwards() {
        let mut transport = MockTransport::new();
        transport.expect_read().returning(|buf| {
            buf[0] = b'7';
            Ok(1)
        });
        transport.expect_close().times(1).returning(|| Ok(()));

        let mut boxed: Box<dyn Transport> = Box::new(transport);
        let mut buf = [0u8; 4];
        assert_eq!(boxed.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'7');
        boxed.close().unwrap();
    }
}
