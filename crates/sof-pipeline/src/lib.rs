//! SOF Pipeline - Per-document orchestration
//!
//! For each document: extract text, recognize entities, detect events,
//! append the demurrage calculation, assemble a [`TimelineResult`].
//! Documents are processed strictly sequentially and independently; a
//! failure in one document becomes its own error marker and never
//! aborts sibling documents.

use std::sync::Arc;

use sof_core::{AppConfig, Result, SofError, TimelineResult};
use sof_extractor::{
    calculate_demurrage, events::total_worked_hours, EntityRecognizer, EventDetector, LaytimeTerms,
    SofNer,
};
use sof_parser::TextExtractor;

/// One input document: original filename plus raw bytes
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DocumentInput {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Document-to-timeline processing pipeline
///
/// Built once at process start; the recognizer model inside is shared
/// read-only across requests, so the pipeline is freely cloneable and
/// thread-safe without locking.
#[derive(Clone)]
pub struct Pipeline {
    extractor: TextExtractor,
    recognizer: Arc<dyn EntityRecognizer>,
    detector: Arc<EventDetector>,
    terms: LaytimeTerms,
    fallback_total_hours: Option<f64>,
}

impl Pipeline {
    /// Build the pipeline from configuration
    ///
    /// Loads the recognition model; a load failure is fatal to the
    /// caller, the process must not serve without it.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let recognizer: Arc<dyn EntityRecognizer> = Arc::new(SofNer::load()?);
        Self::with_recognizer(config, recognizer)
    }

    /// Build the pipeline with a substitute recognizer (used by tests)
    pub fn with_recognizer(
        config: &AppConfig,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Self> {
        Ok(Self {
            extractor: TextExtractor::new(),
            recognizer,
            detector: Arc::new(EventDetector::new()?),
            terms: LaytimeTerms::from(&config.laytime),
            fallback_total_hours: config.laytime.fallback_total_hours,
        })
    }

    /// Process one document into a timeline result
    ///
    /// Infallible by contract: any stage failure is captured into the
    /// result's `error` field.
    pub fn process(&self, doc: &DocumentInput) -> TimelineResult {
        match self.run_stages(doc) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(filename = %doc.filename, error = %e, "document processing failed");
                TimelineResult::failed(&doc.filename, e.to_string())
            }
        }
    }

    /// Process a batch sequentially, results in input order
    pub fn process_batch(&self, docs: &[DocumentInput]) -> Vec<TimelineResult> {
        docs.iter().map(|doc| self.process(doc)).collect()
    }

    fn run_stages(&self, doc: &DocumentInput) -> Result<TimelineResult> {
        let text = self
            .extractor
            .extract(&doc.bytes, &doc.filename)
            .map_err(|e| SofError::ExtractionFailed(e.to_string()))?;

        let entities = self.recognizer.recognize(&text)?;
        let mut events = self.detector.detect(&text, &entities);

        tracing::debug!(
            filename = %doc.filename,
            entities = entities.len(),
            events = events.len(),
            "detection complete"
        );

        let hours = total_worked_hours(&events).or(self.fallback_total_hours);
        if let Some(hours) = hours {
            if let Some(demurrage) = calculate_demurrage(hours, &self.terms) {
                events.push(demurrage);
            }
        }

        Ok(TimelineResult::new(&doc.filename, events, &text))
    }
}
