use crate::error::OcrError;
use crate::mode::Mode;
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Character set passed to the recognizer in code mode: identifiers, digits
/// and the punctuation that appears in monospaced source.
pub const CODE_WHITELIST: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789\
     !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Recognition-engine parameters resolved per request
///
/// These mirror the tunables of a Tesseract-style engine; an entry is
/// configured with them once at pool construction and never mutated after.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    /// Page-segmentation mode: how the engine partitions the image into
    /// text regions before character recognition
    pub page_seg_mode: u32,
    /// Engine mode: which internal recognition algorithm is used
    pub engine_mode: u32,
    /// Assumed input resolution, calibrating expected character size
    pub dpi: u32,
    /// Keep recognized inter-word spacing instead of re-flowing it
    pub preserve_interword_spaces: bool,
    /// Restrict recognition to these characters
    pub char_whitelist: Option<String>,
    /// Never emit these characters
    pub char_blacklist: Option<String>,
    /// Language-model correction of recognized words; off for source code,
    /// where identifiers are not dictionary words
    pub dictionary_correction: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            page_seg_mode: 6,
            engine_mode: 1,
            dpi: 300,
            preserve_interword_spaces: true,
            char_whitelist: None,
            char_blacklist: None,
            dictionary_correction: true,
        }
    }
}

/// Trait the external recognition engine is consumed through
///
/// A single synchronous, stateless call from the pipeline's perspective.
/// Engine lifecycle and caching belong to the implementor; failures surface
/// as [`OcrError::Recognition`] and are not retried here.
pub trait Recognizer: Send + Sync {
    /// Recognize text in a preprocessed image, returning the raw text blob.
    fn recognize(
        &self,
        image: &DynamicImage,
        language: &str,
        params: &EngineParams,
    ) -> Result<String, OcrError>;
}

impl std::fmt::Debug for dyn Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Recognizer")
    }
}

/// Builds one recognizer instance for a `(language, mode)` pool entry.
pub type RecognizerFactory =
    dyn Fn(&str, Mode, &EngineParams) -> Result<Arc<dyn Recognizer>, OcrError> + Send + Sync;

/// Pool of recognizer instances keyed by `(language, mode)`
///
/// Each entry is built once by the factory, immutably configured with the
/// engine parameters resolved for its key, and handed out as a shared
/// handle. The lock guards only the map; recognition runs on the checked-out
/// handle, so concurrent requests for different languages never contend on
/// a shared mutable engine.
pub struct RecognizerPool {
    factory: Box<RecognizerFactory>,
    entries: Mutex<HashMap<(String, Mode), Arc<dyn Recognizer>>>,
}

impl RecognizerPool {
    pub fn new(factory: Box<RecognizerFactory>) -> Self {
        Self {
            factory,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check out the recognizer for a language/mode pair, building it on
    /// first use.
    pub fn checkout(
        &self,
        language: &str,
        mode: Mode,
        params: &EngineParams,
    ) -> Result<Arc<dyn Recognizer>, OcrError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let key = (language.to_string(), mode);
        if let Some(engine) = entries.get(&key) {
            return Ok(Arc::clone(engine));
        }

        tracing::info!(language, mode = mode.as_str(), "initializing recognizer");
        let engine = (self.factory)(language, mode, params)?;
        entries.insert(key, Arc::clone(&engine));
        Ok(engine)
    }
}
