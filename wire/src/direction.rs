//! Packet direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Which side sent a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Client to server (`"C"`).
    #[serde(rename = "C")]
    ClientToServer,
    /// Server to client (`"S"`).
    #[serde(rename = "S")]
    ServerToClient,
}

impl Direction {
    /// Returns the single-letter wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientToServer => "C",
            Self::ServerToClient => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Self::ClientToServer),
            "S" => Ok(Self::ServerToClient),
            other => Err(WireError::InvalidDirection {
                found: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("C".parse::<Direction>().unwrap(), Direction::ClientToServer);
        assert_eq!("S".parse::<Direction>().unwrap(), Direction::ServerToClient);
        assert_eq!(Direction::ServerToClient.to_string(), "S");
    }

    #[test]
    fn parse_rejects_other_letters() {
        assert!(matches!(
            "s".parse::<Direction>(),
            Err(WireError::InvalidDirection { .. })
        ));
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn serde_uses_letters() {
        let json = serde_json::to_string(&Direction::ClientToServer).unwrap();
        assert_eq!(json, "\"C\"");
        let back: Direction = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(back, Direction::ServerToClient);
    }
}
