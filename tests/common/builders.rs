//! Test data builders for creating test objects

use serialvis_rs::config::{AppConfig, Parity, SerialConfig};
use serialvis_rs::ChartMode;

/// Builder for creating test configurations
pub struct ConfigBuilder {
    port: String,
    baud_rate: u32,
    parity: Parity,
    delimiter: String,
    mode: ChartMode,
    label: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            port: "/dev/ttyTEST".to_string(),
            baud_rate: 9600,
            parity: Parity::None,
            delimiter: "\n".to_string(),
            mode: ChartMode::Braille,
            label: None,
        }
    }

    pub fn port(mut self, port: &str) -> Self {
        self.port = port.to_string();
        self
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub fn delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    pub fn mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn build(self) -> AppConfig {
        let mut config = AppConfig::new();
        config.serial = SerialConfig::new(self.port, self.baud_rate);
        config.serial.parity = self.parity;
        config.display.delimiter = self.delimiter;
        config.display.mode = self.mode;
        config.display.label = self.label;
        config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .port("COM4")
            .baud_rate(115_200)
            .delimiter(",")
            .mode(ChartMode::Dot)
            .build();

        assert_eq!(config.serial.port_name(), "COM4");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.display.delimiter, ",");
        assert_eq!(config.display.mode, ChartMode::Dot);
        assert!(config.validate().is_ok());
    }
}
