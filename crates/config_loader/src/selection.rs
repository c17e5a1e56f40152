//! Sink selection

use contracts::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which sinks to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkSelection {
    /// Append to a log file
    #[default]
    File,
    /// POST to an HTTP endpoint
    Http,
    /// File first, then HTTP
    Both,
}

impl SinkSelection {
    pub fn includes_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    pub fn includes_http(self) -> bool {
        matches!(self, Self::Http | Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::Both => "both",
        }
    }
}

impl FromStr for SinkSelection {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "http" => Ok(Self::Http),
            "both" => Ok(Self::Both),
            other => Err(ContractError::config_validation(
                "sink",
                format!("unknown sink selection '{other}', expected file, http or both"),
            )),
        }
    }
}

impl fmt::Display for SinkSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("file".parse::<SinkSelection>().unwrap(), SinkSelection::File);
        assert_eq!("HTTP".parse::<SinkSelection>().unwrap(), SinkSelection::Http);
        assert_eq!(" both ".parse::<SinkSelection>().unwrap(), SinkSelection::Both);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "udp".parse::<SinkSelection>().unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { ref field, .. } if field == "sink"));
    }

    #[test]
    fn test_display_round_trips() {
        for sel in [SinkSelection::File, SinkSelection::Http, SinkSelection::Both] {
            assert_eq!(sel.to_string().parse::<SinkSelection>().unwrap(), sel);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SinkSelection::Both).unwrap(), "\"both\"");
    }
}
