//! Bridge configuration
//!
//! Defaults reproduce the deployed bridge: a Raspberry Pi on the home
//! network publishing to a Home Assistant MQTT broker.

use core::fmt;

use heapless::String;

use super::hardware::{RingConfig, SerialConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum broker host length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum topic length
pub const MAX_TOPIC_LEN: usize = 64;

/// MQTT 3.1 client identifier limit
pub const MAX_CLIENT_ID_LEN: usize = 23;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate is zero
    InvalidBaudrate,
    /// Topic is empty or contains a wildcard
    InvalidTopic,
    /// Ring hold time is zero
    InvalidHold,
    /// Broker host or client id is empty
    InvalidBroker,
    /// Document could not be parsed
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::InvalidBaudrate => "baudrate must be non-zero",
            ConfigError::InvalidTopic => "topics must be non-empty and free of wildcards",
            ConfigError::InvalidHold => "ring hold time must be non-zero",
            ConfigError::InvalidBroker => "broker host and client id must be set",
            ConfigError::Parse => "malformed configuration",
        };
        f.write_str(msg)
    }
}

fn string<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}

/// Message broker connection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrokerConfig {
    /// IPv4 address or hostname
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    pub client_id: String<MAX_CLIENT_ID_LEN>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: string("172.31.0.51"),
            port: 1883,
            client_id: string("callerid-client"),
        }
    }
}

/// Topics the bridge publishes to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TopicConfig {
    /// Decoded call records
    pub callerid: String<MAX_TOPIC_LEN>,
    /// `Yes` when a ring burst starts, `No` when it ends
    pub ringing: String<MAX_TOPIC_LEN>,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            callerid: string("home-assistant/phone/callerid"),
            ringing: string("home-assistant/phone/ringing"),
        }
    }
}

fn valid_topic(topic: &str) -> bool {
    !topic.is_empty() && !topic.contains(|c: char| c == '+' || c == '#')
}

/// Complete bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig {
    pub broker: BrokerConfig,
    pub topics: TopicConfig,
    pub serial: SerialConfig,
    pub ring: RingConfig,
    /// Trace recognized fields and dropped frames
    pub verbose: bool,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        if !valid_topic(&self.topics.callerid) || !valid_topic(&self.topics.ringing) {
            return Err(ConfigError::InvalidTopic);
        }
        if self.ring.hold_ms == 0 {
            return Err(ConfigError::InvalidHold);
        }
        if self.broker.host.is_empty() || self.broker.client_id.is_empty() {
            return Err(ConfigError::InvalidBroker);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BridgeConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.broker.port, 1883);
        assert_eq!(config.broker.client_id.as_str(), "callerid-client");
        assert_eq!(config.topics.callerid.as_str(), "home-assistant/phone/callerid");
        assert!(!config.verbose);
    }

    #[test]
    fn test_wildcard_topic_rejected() {
        let mut config = BridgeConfig::new();
        config.topics.ringing = string("home-assistant/phone/#");
        assert_eq!(config.validate(), Err(ConfigError::InvalidTopic));

        config.topics.ringing = String::new();
        assert_eq!(config.validate(), Err(ConfigError::InvalidTopic));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = BridgeConfig::new();
        config.serial.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBaudrate));

        let mut config = BridgeConfig::new();
        config.ring.hold_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHold));

        let mut config = BridgeConfig::new();
        config.broker.client_id = String::new();
        assert_eq!(config.validate(), Err(ConfigError::InvalidBroker));
    }
}
