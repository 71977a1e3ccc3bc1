//! Serial port transport
//!
//! This module provides the low-level interface to serial devices using the
//! `serialport` crate. It opens the port with the configured framing and a
//! bounded read timeout, so the acquisition loop wakes up regularly even on a
//! silent line.
//!
//! # Example
//!
//! ```ignore
//! use serialvis_rs::backend::{list_ports, SerialTransport};
//! use serialvis_rs::config::SerialConfig;
//!
//! for port in list_ports()? {
//!     println!("Found: {}", port);
//! }
//!
//! let transport = SerialTransport::open(&SerialConfig::new("/dev/ttyUSB0", 115_200))?;
//! ```

use crate::backend::transport::Transport;
use crate::config::SerialConfig;
use crate::error::{Result, ResultExt, SerialVisError};
use serialport::{SerialPort, SerialPortType};
use std::io::{ErrorKind, Read};

/// Information about a detected serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Port name as passed to `--port`
    pub name: String,
    /// Human-readable description of the port type
    pub description: String,
}

impl std::fmt::Display for PortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", self.name, self.description)
        }
    }
}

fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(info) => {
            let mut desc = format!("USB ({:04x}:{:04x})", info.vid, info.pid);
            for part in [&info.manufacturer, &info.product].into_iter().flatten() {
                desc.push(' ');
                desc.push_str(part);
            }
            if let Some(ref serial) = info.serial_number {
                desc.push_str(" - ");
                desc.push_str(serial);
            }
            desc
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => String::new(),
    }
}

/// List the serial ports present on this machine
pub fn list_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    Ok(ports
        .into_iter()
        .map(|p| PortInfo {
            description: describe(&p.port_type),
            name: p.port_name,
        })
        .collect())
}

/// Transport over a real serial port
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
}

impl SerialTransport {
    /// Open and configure the port described by `config`
    pub fn open(config: &SerialConfig) -> Result<Self> {
        config.validate()?;
        let name = config.port_name().to_string();

        let port = serialport::new(&name, config.baud_rate)
            .data_bits(config.data_bits()?)
            .parity(config.parity.into())
            .stop_bits(config.stop_bits()?)
            .flow_control(serialport::FlowControl::None)
            .timeout(config.read_timeout())
            .open()
            .with_context(|| format!("Failed to open serial port {}", name))?;

        tracing::info!(
            "Opened {} @ {} baud (data bits {}, parity {}, stop bits {})",
            name,
            config.baud_rate,
            config.data_bits,
            config.parity,
            config.stop_bits
        );

        Ok(Self {
            port: Some(port),
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Transport for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let port = self.port.as_mut().ok_or_else(|| {
            SerialVisError::Read(std::io::Error::new(
                ErrorKind::NotConnected,
                "serial port already closed",
            ))
        })?;

        match port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(SerialVisError::Read(e)),
        }
    }

    fn close(&mut self) -> Result<()> {
        // The handle is closed when the boxed port is dropped
        if self.port.take().is_some() {
            tracing::info!("Closed {}", self.name);
        }
        Ok(())
    }
}
