//! SOF Extractor - SOF understanding pipeline
//!
//! Implements the three domain stages between raw text and a timeline:
//! - Named entity recognition (dates, times, monetary amounts)
//! - Event detection (Arrival narratives, tabular Loading rows)
//! - Laytime/demurrage calculation

use sof_core::{Entity, Result};

pub mod events;
pub mod laytime;
pub mod ner;

pub use events::EventDetector;
pub use laytime::{calculate_demurrage, LaytimeTerms};
pub use ner::SofNer;

/// Trait for entity recognizers
///
/// The production recognizer is [`SofNer`], built once at process start
/// and shared read-only; tests substitute their own implementations.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}
