//! Command-line interface
//!
//! Flags are merged on top of an optional TOML file given with `--config`,
//! so a saved setup can be reused and tweaked per run.

use crate::config::{unescape_delimiter, AppConfig, Parity};
use crate::error::Result;
use crate::types::ChartMode;
use clap::Parser;
use std::path::PathBuf;

/// Plot numeric readings from a serial port in the terminal
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "serialvis", version, about)]
pub struct Cli {
    /// Serial port to read from (e.g. /dev/ttyUSB0 or COM3)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Data bits [default: 8]
    #[arg(long = "data", value_name = "BITS")]
    pub data_bits: Option<u8>,

    /// Parity [default: none]
    #[arg(long, value_enum)]
    pub parity: Option<Parity>,

    /// Stop bits [default: 1]
    #[arg(long = "stop", value_name = "BITS")]
    pub stop_bits: Option<u8>,

    /// List available serial ports and exit
    #[arg(short, long)]
    pub list: bool,

    /// Delimiter between readings; \n, \r, \t and \\ are expanded [default: "\n"]
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Chart mode [default: braille]
    #[arg(long, value_enum)]
    pub mode: Option<ChartMode>,

    /// Read timeout in milliseconds [default: 100]
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Chart border label [default: the port name]
    #[arg(long)]
    pub label: Option<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Read from a simulated sine-wave device instead of a serial port
    #[cfg(feature = "mock-device")]
    #[arg(long)]
    pub mock: bool,
}

impl Cli {
    /// Whether the data source is the simulated device
    pub fn uses_mock(&self) -> bool {
        #[cfg(feature = "mock-device")]
        {
            self.mock
        }
        #[cfg(not(feature = "mock-device"))]
        {
            false
        }
    }

    /// Resolve the final configuration
    ///
    /// Starts from the `--config` file (or defaults), applies every flag that
    /// was given, then validates. The port is not required for the mock
    /// device.
    pub fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        let mock = self.uses_mock();
        self.apply(&mut config);

        if mock {
            config.validate_without_port()?;
        } else {
            config.validate()?;
        }
        Ok(config)
    }

    /// Apply the flags that were given on top of `config`
    pub fn apply(self, config: &mut AppConfig) {
        let serial = &mut config.serial;
        if let Some(port) = self.port {
            serial.port = Some(port);
        }
        if let Some(baud) = self.baud {
            serial.baud_rate = baud;
        }
        if let Some(bits) = self.data_bits {
            serial.data_bits = bits;
        }
        if let Some(parity) = self.parity {
            serial.parity = parity;
        }
        if let Some(bits) = self.stop_bits {
            serial.stop_bits = bits;
        }
        if let Some(ms) = self.timeout_ms {
            serial.read_timeout_ms = ms;
        }

        let display = &mut config.display;
        if let Some(delimiter) = self.delimiter {
            display.delimiter = unescape_delimiter(&delimiter);
        }
        if let Some(mode) = self.mode {
            display.mode = mode;
        }
        if self.label.is_some() {
            display.label = self.label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SerialVisError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("serialvis").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_minimal_flags() {
        let config = parse(&["-p", "/dev/ttyUSB0", "-b", "115200"])
            .into_config()
            .unwrap();
        assert_eq!(config.serial.port_name(), "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.serial.parity, Parity::None);
        assert_eq!(config.display.delimiter, "\n");
        assert_eq!(config.display.mode, ChartMode::Braille);
    }

    #[test]
    fn test_missing_port_or_baud_is_rejected() {
        assert!(matches!(
            parse(&["-b", "9600"]).into_config(),
            Err(SerialVisError::Config(_))
        ));
        assert!(matches!(
            parse(&["-p", "COM3"]).into_config(),
            Err(SerialVisError::Config(_))
        ));
    }

    #[test]
    fn test_framing_and_display_flags() {
        let config = parse(&[
            "-p", "COM3", "-b", "9600", "--data", "7", "--parity", "even", "--stop", "2", "-d",
            "\\r\\n", "--mode", "dot", "--label", "Pressure",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.serial.data_bits, 7);
        assert_eq!(config.serial.parity, Parity::Even);
        assert_eq!(config.serial.stop_bits, 2);
        assert_eq!(config.display.delimiter, "\r\n");
        assert_eq!(config.display.mode, ChartMode::Dot);
        assert_eq!(config.border_label(), "Pressure");
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!(parse(&["--mode", "coarse"]).mode, Some(ChartMode::Dot));
        assert_eq!(
            parse(&["--mode", "high-resolution"]).mode,
            Some(ChartMode::Braille)
        );
    }

    #[test]
    fn test_invalid_framing_rejected() {
        let result = parse(&["-p", "COM3", "-b", "9600", "--data", "9"]).into_config();
        assert!(matches!(result, Err(SerialVisError::Config(_))));
    }

    #[test]
    fn test_flags_override_existing_values() {
        let mut config = AppConfig::default();
        config.serial.port = Some("/dev/ttyS0".to_string());
        config.display.delimiter = ",".to_string();

        parse(&["-b", "57600"]).apply(&mut config);
        assert_eq!(config.serial.port_name(), "/dev/ttyS0");
        assert_eq!(config.serial.baud_rate, 57_600);
        assert_eq!(config.display.delimiter, ",");
    }

    #[test]
    fn test_list_does_not_need_port() {
        let cli = parse(&["-l"]);
        assert!(cli.list);
        assert!(cli.port.is_none());
    }
}
