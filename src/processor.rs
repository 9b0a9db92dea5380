use crate::config::Config;
use crate::engine::{RecognizerFactory, RecognizerPool};
use crate::error::OcrError;
use crate::mode::Mode;
use crate::preprocessing::{ModeSelector, Pipeline};
use crate::text::corrections::CorrectionEngine;
use crate::text::{normalizer, FormattedResult};
use image::DynamicImage;
use std::time::Instant;

/// Orchestrates one extraction: decode, preprocess, recognize, normalize,
/// correct
///
/// Holds the validated configuration and the recognizer pool; everything
/// request-scoped lives on the stack of a single `process_*` call, so
/// concurrent requests share nothing mutable.
pub struct OcrProcessor {
    config: Config,
    pool: RecognizerPool,
}

impl std::fmt::Debug for OcrProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrProcessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OcrProcessor {
    /// Build a processor, validating the configuration up front. The factory
    /// supplies recognizer instances for each `(language, mode)` pool entry.
    pub fn new(config: Config, factory: Box<RecognizerFactory>) -> Result<Self, OcrError> {
        config.validate()?;
        Ok(Self {
            config,
            pool: RecognizerPool::new(factory),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode an encoded image buffer and extract its text.
    ///
    /// `mode_tag` is free-form (unknown tags resolve to the configured
    /// default's parse, ultimately `auto`); `language` falls back to the
    /// configured default.
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        mode_tag: Option<&str>,
        language: Option<&str>,
    ) -> Result<FormattedResult, OcrError> {
        let start = Instant::now();
        let image = decode(bytes)?;
        let mode = Mode::parse(mode_tag.unwrap_or(&self.config.mode_default));
        self.run(image, mode, language, start)
    }

    /// Extract text from an already-decoded image.
    pub fn process_image(
        &self,
        image: DynamicImage,
        mode: Mode,
        language: Option<&str>,
    ) -> Result<FormattedResult, OcrError> {
        let start = Instant::now();
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::ImageDecode(
                "image has zero dimension".to_string(),
            ));
        }
        self.run(image, mode, language, start)
    }

    fn run(
        &self,
        image: DynamicImage,
        mode: Mode,
        language: Option<&str>,
        start: Instant,
    ) -> Result<FormattedResult, OcrError> {
        let language = language.unwrap_or(&self.config.language_default);

        let resolved = ModeSelector::resolve(mode, &self.config)?;
        let engine_params = resolved.engine;

        let preprocessed = Pipeline::new(resolved.stages).process(image)?;
        tracing::debug!(
            mode = mode.as_str(),
            preprocess_ms = preprocessed.total_time_ms,
            "preprocessing complete"
        );

        let recognizer = self.pool.checkout(language, mode, &engine_params)?;
        let raw = recognizer.recognize(&preprocessed.image, language, &engine_params)?;

        let lines = normalizer::normalize(&raw, mode == Mode::Code);
        let corrected = CorrectionEngine::new(mode).correct_lines(&lines);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        let result = FormattedResult::from_lines(corrected, processing_time_ms);

        tracing::info!(
            mode = mode.as_str(),
            language,
            processing_time_ms,
            line_count = result.line_count,
            "extraction complete"
        );
        Ok(result)
    }
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, OcrError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| OcrError::ImageDecode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::ImageDecode(
            "image has zero dimension".to_string(),
        ));
    }
    Ok(image)
}
