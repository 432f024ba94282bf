//! Platform identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A native platform that dependencies can be linked into.
///
/// The declaration order is the order platforms are processed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Ios,
    Android,
}

impl PlatformId {
    /// All platforms, in processing order.
    pub const ALL: [PlatformId; 2] = [PlatformId::Ios, PlatformId::Android];

    /// Identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Ios => "ios",
            PlatformId::Android => "android",
        }
    }

    /// Human-readable name used in messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformId::Ios => "iOS",
            PlatformId::Android => "Android",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PlatformId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(PlatformId::Ios),
            "android" => Ok(PlatformId::Android),
            _ => Err(format!(
                "unknown platform '{}'; expected 'ios' or 'android'",
                s
            )),
        }
    }
}
