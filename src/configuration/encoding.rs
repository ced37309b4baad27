use serde::{Deserialize, Serialize};

/// Unit in which character offsets are reported to index consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PositionEncoding {
    /// Offsets count UTF-8 bytes (default)
    Utf8,
    /// Offsets count UTF-16 code units
    Utf16,
    /// Offsets count Unicode scalar values
    Utf32,
}

impl Default for PositionEncoding {
    fn default() -> Self {
        Self::Utf8
    }
}

impl std::fmt::Display for PositionEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf8"),
            Self::Utf16 => write!(f, "utf16"),
            Self::Utf32 => write!(f, "utf32"),
        }
    }
}
