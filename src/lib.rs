//! OCR core for screen captures
//!
//! Turns an image (screenshot, video frame, photographed text) into
//! corrected, line-structured text. A capture [`Mode`] selects an image
//! preprocessing pipeline and recognition-engine parameters; the recognizer
//! itself is external, consumed through the [`Recognizer`] trait. Raw
//! recognizer output is normalized into numbered lines and repaired by an
//! ordered correction-rule chain.
//!
//! The embedding service owns transport, request validation and engine
//! construction; this crate owns the pixels and the text.

pub mod config;
pub mod engine;
pub mod error;
pub mod mode;
pub mod preprocessing;
pub mod processor;
pub mod text;

pub use config::Config;
pub use engine::{EngineParams, Recognizer, RecognizerFactory, RecognizerPool, CODE_WHITELIST};
pub use error::OcrError;
pub use mode::Mode;
pub use preprocessing::{ModeSelector, Pipeline, PipelineConfig, PreprocessedImage, Stage};
pub use processor::OcrProcessor;
pub use text::{FormattedResult, Row, Status};
