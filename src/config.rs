use crate::error::OcrError;
use crate::mode::Mode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extraction configuration
///
/// All fields carry defaults so an empty config document deserializes to a
/// working configuration. Validation runs before any pixel work begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mode applied when the caller supplies no tag
    pub mode_default: String,
    /// Images wider than this are scaled down before any mode stages run
    pub max_image_width: u32,
    /// Per-mode contrast factors, overriding the built-in table
    pub contrast_factor_by_mode: BTreeMap<String, f32>,
    /// Neighborhood size for adaptive thresholding
    pub adaptive_threshold_window: u32,
    /// Language passed to the recognizer when the caller supplies none
    pub language_default: String,
    /// Restricts the recognizer's character set in non-code modes
    pub char_whitelist: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_default: "auto".to_string(),
            max_image_width: 3000,
            contrast_factor_by_mode: BTreeMap::new(),
            adaptive_threshold_window: 15,
            language_default: "eng".to_string(),
            char_whitelist: None,
        }
    }
}

impl Config {
    /// Validate all parameters, failing before any image is touched.
    pub fn validate(&self) -> Result<(), OcrError> {
        if self.max_image_width == 0 {
            return Err(OcrError::Configuration(
                "max_image_width must be greater than 0".to_string(),
            ));
        }
        if self.adaptive_threshold_window == 0 {
            return Err(OcrError::Configuration(
                "adaptive_threshold_window must be greater than 0".to_string(),
            ));
        }
        for (mode, factor) in &self.contrast_factor_by_mode {
            if !factor.is_finite() || *factor <= 0.0 {
                return Err(OcrError::Configuration(format!(
                    "contrast factor for mode '{}' must be positive and finite, got {}",
                    mode, factor
                )));
            }
        }
        if self.language_default.trim().is_empty() {
            return Err(OcrError::Configuration(
                "language_default must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Contrast factor for a mode: configured override, or the built-in
    /// per-mode default.
    pub fn contrast_factor(&self, mode: Mode) -> f32 {
        if let Some(factor) = self.contrast_factor_by_mode.get(mode.as_str()) {
            return *factor;
        }
        match mode {
            Mode::Auto => 1.3,
            Mode::Web => 1.5,
            Mode::Video => 1.8,
            Mode::Image | Mode::Code => 1.0,
        }
    }
}
