use crate::config::Config;
use crate::engine::{EngineParams, CODE_WHITELIST};
use crate::error::OcrError;
use crate::mode::Mode;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// One image-transform stage, with its numeric parameters
///
/// Stages are descriptors: resolving a mode produces an ordered list of
/// these, and [`Pipeline`] executes the list without knowing which mode
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Scale down images wider than `max_width`; identity otherwise
    ResizeCap { max_width: u32 },
    Grayscale,
    /// Midpoint-centered contrast adjustment
    Contrast { factor: f32 },
    /// 3x3 box blur over interior pixels
    Denoise,
    /// Local-window-mean binarization
    AdaptiveThreshold { window: u32 },
    /// Global fixed-threshold binarization
    Binarize { threshold: u8 },
    Invert,
    Sharpen,
    /// Smooth upsampling by a fixed factor
    ScaleUp { factor: f32 },
}

impl Stage {
    /// Stage name for timing and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResizeCap { .. } => "resize_cap",
            Self::Grayscale => "grayscale",
            Self::Contrast { .. } => "contrast",
            Self::Denoise => "denoise",
            Self::AdaptiveThreshold { .. } => "adaptive_threshold",
            Self::Binarize { .. } => "binarize",
            Self::Invert => "invert",
            Self::Sharpen => "sharpen",
            Self::ScaleUp { .. } => "scale_up",
        }
    }

    fn run(&self, image: DynamicImage) -> Result<DynamicImage, OcrError> {
        match *self {
            Self::ResizeCap { max_width } => steps::resize::cap_width(image, max_width),
            Self::Grayscale => steps::grayscale::apply(image),
            Self::Contrast { factor } => steps::contrast::apply(image, factor),
            Self::Denoise => steps::denoise::apply(image),
            Self::AdaptiveThreshold { window } => steps::threshold::apply(image, window),
            Self::Binarize { threshold } => steps::binarize::apply(image, threshold),
            Self::Invert => steps::invert::apply(image),
            Self::Sharpen => steps::sharpen::apply(image),
            Self::ScaleUp { factor } => steps::resize::scale_up(image, factor),
        }
    }
}

/// Resolved per-request configuration: ordered stages plus the engine
/// parameters consistent with the requested mode
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub stages: Vec<Stage>,
    pub engine: EngineParams,
}

/// Maps a capture mode to its pipeline configuration
///
/// The mapping is total and side-effect-free; adding a mode means adding a
/// row here, never touching pipeline execution.
pub struct ModeSelector;

impl ModeSelector {
    /// Resolve the stage sequence and engine parameters for a mode.
    /// Configuration problems surface here, before any pixel work begins.
    pub fn resolve(mode: Mode, config: &Config) -> Result<PipelineConfig, OcrError> {
        config.validate()?;

        // Width cap applies to every mode, ahead of the mode's own stages
        let mut stages = vec![Stage::ResizeCap {
            max_width: config.max_image_width,
        }];

        match mode {
            Mode::Auto => {
                stages.push(Stage::Grayscale);
                stages.push(Stage::Contrast {
                    factor: config.contrast_factor(mode),
                });
            }
            Mode::Web => {
                stages.push(Stage::Grayscale);
                stages.push(Stage::Denoise);
                stages.push(Stage::AdaptiveThreshold {
                    window: config.adaptive_threshold_window,
                });
                stages.push(Stage::Contrast {
                    factor: config.contrast_factor(mode),
                });
                stages.push(Stage::Sharpen);
            }
            Mode::Image => {
                stages.push(Stage::ScaleUp { factor: 2.0 });
                stages.push(Stage::Grayscale);
                stages.push(Stage::Denoise);
                stages.push(Stage::AdaptiveThreshold {
                    window: config.adaptive_threshold_window,
                });
            }
            Mode::Video => {
                stages.push(Stage::Grayscale);
                stages.push(Stage::Invert);
                stages.push(Stage::Contrast {
                    factor: config.contrast_factor(mode),
                });
                stages.push(Stage::Sharpen);
            }
            Mode::Code => {
                stages.push(Stage::ScaleUp { factor: 2.0 });
                stages.push(Stage::Grayscale);
            }
        }

        Ok(PipelineConfig {
            stages,
            engine: engine_params(mode, config),
        })
    }
}

fn engine_params(mode: Mode, config: &Config) -> EngineParams {
    let mut params = EngineParams::default();
    match mode {
        Mode::Code => {
            // Identifiers are not dictionary words; widen the character set
            // and keep the language model out of the way
            params.char_whitelist = Some(CODE_WHITELIST.to_string());
            params.dictionary_correction = false;
        }
        _ => {
            params.char_whitelist = config.char_whitelist.clone();
        }
    }
    params
}

/// Timing information for a single pipeline stage
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Output of a pipeline run, with timing stats
#[derive(Debug, Clone)]
pub struct PreprocessedImage {
    pub image: DynamicImage,
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Executes an ordered stage list
///
/// Each stage is a pure transform; the image moves through by value and no
/// stage ever writes into its input buffer.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn process(&self, image: DynamicImage) -> Result<PreprocessedImage, OcrError> {
        let start = Instant::now();
        let mut timings = Vec::with_capacity(self.stages.len());

        let mut img = image;
        for stage in &self.stages {
            let stage_start = Instant::now();
            img = stage.run(img)?;
            let time_ms = stage_start.elapsed().as_millis() as u64;
            tracing::debug!(stage = stage.name(), time_ms, "pipeline stage complete");
            timings.push(StepTiming {
                name: stage.name().to_string(),
                time_ms,
            });
        }

        Ok(PreprocessedImage {
            image: img,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn stage_names(mode: Mode) -> Vec<&'static str> {
        let config = Config::default();
        let resolved = ModeSelector::resolve(mode, &config).unwrap();
        resolved.stages.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_mode_stage_sequences() {
        assert_eq!(stage_names(Mode::Auto), ["resize_cap", "grayscale", "contrast"]);
        assert_eq!(
            stage_names(Mode::Web),
            ["resize_cap", "grayscale", "denoise", "adaptive_threshold", "contrast", "sharpen"]
        );
        assert_eq!(
            stage_names(Mode::Image),
            ["resize_cap", "scale_up", "grayscale", "denoise", "adaptive_threshold"]
        );
        assert_eq!(
            stage_names(Mode::Video),
            ["resize_cap", "grayscale", "invert", "contrast", "sharpen"]
        );
        assert_eq!(stage_names(Mode::Code), ["resize_cap", "scale_up", "grayscale"]);
    }

    #[test]
    fn test_contrast_factors_follow_mode_table() {
        let config = Config::default();
        let auto = ModeSelector::resolve(Mode::Auto, &config).unwrap();
        assert!(auto
            .stages
            .contains(&Stage::Contrast { factor: 1.3 }));

        let web = ModeSelector::resolve(Mode::Web, &config).unwrap();
        assert!(web.stages.contains(&Stage::Contrast { factor: 1.5 }));

        let video = ModeSelector::resolve(Mode::Video, &config).unwrap();
        assert!(video.stages.contains(&Stage::Contrast { factor: 1.8 }));
    }

    #[test]
    fn test_code_mode_engine_params() {
        let config = Config::default();
        let code = ModeSelector::resolve(Mode::Code, &config).unwrap();
        assert!(!code.engine.dictionary_correction);
        let whitelist = code.engine.char_whitelist.as_deref().unwrap();
        for ch in ['-', '>', '{', ';', '_'] {
            assert!(whitelist.contains(ch), "whitelist missing {:?}", ch);
        }

        let auto = ModeSelector::resolve(Mode::Auto, &config).unwrap();
        assert!(auto.engine.dictionary_correction);
        assert!(auto.engine.char_whitelist.is_none());
    }

    #[test]
    fn test_invalid_config_fails_resolution() {
        let config = Config {
            adaptive_threshold_window: 0,
            ..Config::default()
        };
        let err = ModeSelector::resolve(Mode::Web, &config).unwrap_err();
        assert!(matches!(err, OcrError::Configuration(_)));
    }

    #[test]
    fn test_pipeline_runs_stages_in_order() {
        let config = Config::default();
        let resolved = ModeSelector::resolve(Mode::Auto, &config).unwrap();
        let pipeline = Pipeline::new(resolved.stages);

        let img = RgbImage::from_fn(40, 20, |x, y| Rgb([x as u8, y as u8, 128]));
        let result = pipeline.process(DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(result.image.width(), 40);
        assert_eq!(result.image.height(), 20);
        let names: Vec<&str> = result.steps.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["resize_cap", "grayscale", "contrast"]);
    }

    #[test]
    fn test_web_and_video_outputs_differ() {
        let config = Config::default();
        // Mid-gray field with a dark stroke: invert flips it, web keeps it dark
        let mut img = GrayImage::from_pixel(40, 40, Luma([200]));
        for x in 5..35 {
            img.put_pixel(x, 20, Luma([30]));
        }
        let source = DynamicImage::ImageLuma8(img);

        let web = Pipeline::new(ModeSelector::resolve(Mode::Web, &config).unwrap().stages)
            .process(source.clone())
            .unwrap();
        let video = Pipeline::new(ModeSelector::resolve(Mode::Video, &config).unwrap().stages)
            .process(source)
            .unwrap();

        assert_ne!(web.image.to_luma8().as_raw(), video.image.to_luma8().as_raw());
    }
}
