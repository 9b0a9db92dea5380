//! Mode-driven image preprocessing
//!
//! A capture mode resolves to an ordered list of stage descriptors; the
//! pipeline executes them as pure image-to-image transforms.

pub mod pipeline;
pub mod steps;

pub use pipeline::{ModeSelector, Pipeline, PipelineConfig, PreprocessedImage, Stage, StepTiming};
