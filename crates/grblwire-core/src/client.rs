//! Frame destination selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical channel(s) that receive an outgoing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientTarget {
    /// The serial line
    #[default]
    Serial,
    /// The network socket bridge
    Network,
    /// Broadcast to every channel
    All,
}

impl ClientTarget {
    /// Whether a frame for this target reaches the serial channel
    pub fn includes_serial(self) -> bool {
        matches!(self, Self::Serial | Self::All)
    }

    /// Whether a frame for this target reaches the network channel
    pub fn includes_network(self) -> bool {
        matches!(self, Self::Network | Self::All)
    }
}

impl fmt::Display for ClientTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Network => write!(f, "network"),
            Self::All => write!(f, "all"),
        }
    }
}
