use serde::{Deserialize, Serialize};

/// Capture mode tags
///
/// Each mode selects a preprocessing stage sequence and recognition-engine
/// parameters tuned for one capture condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Balanced default for unknown sources
    #[default]
    Auto,
    /// Compressed web screenshots
    Web,
    /// Photographed documents
    Image,
    /// Low-contrast video frames
    Video,
    /// Monospaced source code
    Code,
}

impl Mode {
    /// Parse from a free-form tag. Case-insensitive; unknown or empty input
    /// resolves to `Auto`, so every input has a defined mode.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "web" => Self::Web,
            "image" => Self::Image,
            "video" => Self::Video,
            "code" => Self::Code,
            _ => Self::Auto,
        }
    }

    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Web => "web",
            Self::Image => "image",
            Self::Video => "video",
            Self::Code => "code",
        }
    }
}
