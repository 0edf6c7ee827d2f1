//! TOML configuration loading
//!
//! Every key is optional; anything missing keeps its default.
//!
//! ```toml
//! verbose = true
//!
//! [broker]
//! host = "192.168.1.10"
//!
//! [serial]
//! path = "/dev/ttyUSB0"
//!
//! [ring]
//! hold_ms = 8000
//! pin = { pin = 27, inverted = true }
//! ```

use super::types::{BridgeConfig, ConfigError};

impl BridgeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = BridgeConfig::from_toml("").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let input = r#"
            verbose = true

            [broker]
            host = "192.168.1.10"

            [serial]
            path = "/dev/ttyUSB0"

            [ring]
            hold_ms = 8000
            pin = { pin = 27, inverted = true }
        "#;
        let config = BridgeConfig::from_toml(input).unwrap();

        assert!(config.verbose);
        assert_eq!(config.broker.host.as_str(), "192.168.1.10");
        assert_eq!(config.broker.port, 1883);
        assert_eq!(config.serial.path.as_str(), "/dev/ttyUSB0");
        assert_eq!(config.serial.baudrate, 1200);
        assert_eq!(config.ring.hold_ms, 8000);
        assert_eq!(config.ring.pin.pin, 27);
        assert_eq!(config.topics.ringing.as_str(), "home-assistant/phone/ringing");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            BridgeConfig::from_toml("[topics]\ncallerid = \"phone/+\""),
            Err(ConfigError::InvalidTopic)
        );
        assert_eq!(
            BridgeConfig::from_toml("[serial]\nbaudrate = \"fast\""),
            Err(ConfigError::Parse)
        );
    }
}
