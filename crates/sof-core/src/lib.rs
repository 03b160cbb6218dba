//! SOF Core - Domain models, errors, and configuration
//!
//! This crate defines the shared types of the SOF Timeline system:
//! - Timeline models (entities, events, per-document results)
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, LaytimeConfig, LoggingConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for SOF Timeline operations
#[derive(Error, Debug)]
pub enum SofError {
    #[error("Recognition model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

pub type Result<T> = std::result::Result<T, SofError>;

// ============================================================================
// Entities
// ============================================================================

/// Semantic categories retained by the entity recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Date,
    Time,
    Money,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed span recognized in document text
///
/// Immutable once produced; the span is a byte offset pair into the
/// normalized text it was recognized from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Semantic category
    pub kind: EntityKind,

    /// Literal matched text
    pub text: String,

    /// Byte offsets in the source text, if known
    pub span: Option<(usize, usize)>,
}

impl Entity {
    pub fn new(kind: EntityKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some((start, end));
        self
    }
}

// ============================================================================
// Events
// ============================================================================

/// Event type tags emitted by detection and calculation
pub const EVENT_ARRIVAL: &str = "Arrival";
pub const EVENT_LOADING: &str = "Loading";
pub const EVENT_DEMURRAGE: &str = "Demurrage Calculation";

/// A single timeline event for one document
///
/// `details` preserves the order values were captured from the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Event type tag (e.g. "Arrival", "Loading", "Demurrage Calculation")
    #[serde(rename = "event")]
    pub kind: String,

    /// Ordered detail strings captured for this event
    pub details: Vec<String>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn push_detail(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }
}

// ============================================================================
// Per-Document Results
// ============================================================================

/// Maximum number of characters kept in the text preview
pub const PREVIEW_CHARS: usize = 300;

/// Outcome of processing one document
///
/// `events` is always a sequence, possibly empty, never null. A failed
/// document keeps its slot in the batch with `error` set instead of
/// aborting sibling documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimelineResult {
    /// Original filename as supplied at ingestion
    pub filename: String,

    /// Detected events, in detection order
    pub events: Vec<Event>,

    /// First 300 characters of the extracted text
    pub preview: String,

    /// Per-document failure marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TimelineResult {
    /// A successfully processed document
    pub fn new(filename: impl Into<String>, events: Vec<Event>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            events,
            preview: preview_of(text),
            error: None,
        }
    }

    /// A document whose pipeline run failed
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            events: Vec::new(),
            preview: String::new(),
            error: Some(error.into()),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of the text, char-boundary safe
pub fn preview_of(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Date.to_string(), "DATE");
        assert_eq!(EntityKind::Money.as_str(), "MONEY");
    }

    #[test]
    fn test_event_serializes_with_event_key() {
        let event = Event::new(EVENT_ARRIVAL).with_details(vec!["16:00".to_string()]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "Arrival");
        assert_eq!(json["details"][0], "16:00");
    }

    #[test]
    fn test_preview_shorter_than_limit() {
        assert_eq!(preview_of("short text"), "short text");
    }

    #[test]
    fn test_preview_truncates_at_300_chars() {
        let text = "x".repeat(500);
        assert_eq!(preview_of(&text).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        // Multi-byte characters near the cut point must not panic
        let text = "é".repeat(400);
        let preview = preview_of(&text);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_failed_result_has_empty_events() {
        let result = TimelineResult::failed("bad.pdf", "corrupt container");
        assert!(result.events.is_empty());
        assert!(result.preview.is_empty());
        assert_eq!(result.error.as_deref(), Some("corrupt container"));
    }

    #[test]
    fn test_error_omitted_from_json_when_none() {
        let result = TimelineResult::new("ok.txt", vec![], "text");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
        assert!(json["events"].is_array());
    }
}
