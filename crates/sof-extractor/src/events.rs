//! Domain event detection from SOF text
//!
//! Two complementary strategies, combined in order:
//! 1. Keyword-triggered Arrival: the words "arrived" or "anchorage"
//!    anywhere in the text emit exactly one Arrival event, with its
//!    detail triple (time, date, location) pulled from the recognized
//!    entities and an uppercase location scan.
//! 2. Tabular Loading rows, parsed in two phases: the text is first
//!    segmented at "ON <MONTH> <DAY>, <YEAR>" headers, then each
//!    segment is read with a strict per-field pass (two HH:MM times,
//!    two integer quantities, optional uppercase label). A greedy
//!    multi-line regex remains as a fallback for rows the strict pass
//!    cannot read.
//!
//! The Arrival event, when triggered, always precedes the Loading
//! events regardless of where the keyword occurs in the document.
//! Detection is pure and idempotent; absence of structure yields zero
//! events, never an error.

use chrono::NaiveTime;
use regex::Regex;

use sof_core::{Entity, EntityKind, Event, Result, SofError, EVENT_ARRIVAL, EVENT_LOADING};

const MONTHS: &str =
    "JANUARY|FEBRUARY|MARCH|APRIL|MAY|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER";

/// Pattern-rule event detector
pub struct EventDetector {
    /// Tabular row header: "ON JUNE 08, 2024"
    header_re: Regex,
    /// Time-of-day token within a row
    time_re: Regex,
    /// Standalone integer quantity
    qty_re: Regex,
    /// Trailing uppercase free-text label
    label_re: Regex,
    /// Greedy whole-row fallback, spans line boundaries
    row_fallback_re: Regex,
    /// Uppercase location phrase for the Arrival detail triple
    location_re: Regex,
}

impl EventDetector {
    /// Compile the detection rules
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| SofError::ModelUnavailable(format!("bad rule {pattern:?}: {e}")))
        };

        Ok(Self {
            header_re: compile(&format!(r"ON (?:{MONTHS}) \d{{1,2}}, \d{{4}}"))?,
            time_re: compile(r"\b\d{1,2}:\d{2}\b")?,
            qty_re: compile(r"\b\d+\b")?,
            label_re: compile(r"[A-Z][A-Z ]{2,}")?,
            row_fallback_re: compile(
                r"(?s)(\d{1,2}:\d{2}).*?(\d{1,2}:\d{2}).*?\b(\d+)\b.*?\b(\d+)\b.*?([A-Z][A-Z ]+)?",
            )?,
            location_re: compile(r"[A-Z][A-Z ]*(?:ANCHORAGE|BERTH|TERMINAL|PORT)\b")?,
        })
    }

    /// Detect timeline events in extracted text
    ///
    /// `entities` is the advisory recognizer output; it only feeds the
    /// Arrival detail triple. Row detection re-scans the raw text.
    pub fn detect(&self, text: &str, entities: &[Entity]) -> Vec<Event> {
        let mut events = Vec::new();

        if let Some(arrival) = self.detect_arrival(text, entities) {
            events.push(arrival);
        }

        events.extend(self.detect_loading_rows(text));
        events
    }

    /// Keyword-triggered Arrival event
    fn detect_arrival(&self, text: &str, entities: &[Entity]) -> Option<Event> {
        let lower = text.to_lowercase();
        if !lower.contains("arrived") && !lower.contains("anchorage") {
            return None;
        }

        let mut event = Event::new(EVENT_ARRIVAL);

        if let Some(time) = entities.iter().find(|e| e.kind == EntityKind::Time) {
            event.push_detail(time.text.clone());
        }
        if let Some(date) = entities.iter().find(|e| e.kind == EntityKind::Date) {
            event.push_detail(date.text.clone());
        }
        if let Some(location) = self.location_re.find(text) {
            event.push_detail(clean_location(location.as_str()));
        }

        Some(event)
    }

    /// Pattern-triggered tabular Loading events, in header order
    fn detect_loading_rows(&self, text: &str) -> Vec<Event> {
        let headers: Vec<_> = self.header_re.find_iter(text).collect();
        let mut events = Vec::new();

        for (i, header) in headers.iter().enumerate() {
            let segment_end = headers
                .get(i + 1)
                .map(|next| next.start())
                .unwrap_or(text.len());
            let body = &text[header.end()..segment_end];

            let details = self
                .parse_row_fields(body)
                .or_else(|| self.parse_row_fallback(body));

            if let Some(details) = details {
                events.push(Event::new(EVENT_LOADING).with_details(details));
            }
        }

        events
    }

    /// Strict per-field row grammar: two times, two quantities, label
    fn parse_row_fields(&self, body: &str) -> Option<Vec<String>> {
        let times: Vec<_> = self.time_re.find_iter(body).take(2).collect();
        let [first_time, second_time] = times.as_slice() else {
            return None;
        };

        let tail = &body[second_time.end()..];
        let quantities: Vec<_> = self.qty_re.find_iter(tail).take(2).collect();
        let [first_qty, second_qty] = quantities.as_slice() else {
            return None;
        };

        let mut details = vec![
            first_time.as_str().to_string(),
            second_time.as_str().to_string(),
            first_qty.as_str().to_string(),
            second_qty.as_str().to_string(),
        ];

        let label_tail = &tail[second_qty.end()..];
        if let Some(label) = self.label_re.find(label_tail) {
            details.push(label.as_str().trim().to_string());
        }

        Some(details)
    }

    /// Greedy single-pattern fallback for rows the strict pass rejects
    fn parse_row_fallback(&self, body: &str) -> Option<Vec<String>> {
        let caps = self.row_fallback_re.captures(body)?;

        let mut details: Vec<String> = (1..=4)
            .filter_map(|i| caps.get(i))
            .map(|m| m.as_str().to_string())
            .collect();
        if details.len() < 4 {
            return None;
        }

        if let Some(label) = caps.get(5) {
            details.push(label.as_str().trim().to_string());
        }

        Some(details)
    }
}

/// Strip leading stopwords from a matched location phrase
fn clean_location(raw: &str) -> &str {
    let mut location = raw.trim();
    loop {
        let stripped = ["AT ", "OFF ", "THE ", "TO "]
            .iter()
            .find_map(|stop| location.strip_prefix(stop));
        match stripped {
            Some(rest) => location = rest.trim_start(),
            None => return location,
        }
    }
}

/// Sum the working spans of parsed Loading rows, in hours
///
/// A row contributes the difference between its second and first time
/// detail; a span that crosses midnight wraps forward by 24 hours.
/// `None` when no row carried a parseable time pair.
pub fn total_worked_hours(events: &[Event]) -> Option<f64> {
    let mut total = 0.0;
    let mut any = false;

    for event in events.iter().filter(|e| e.kind == EVENT_LOADING) {
        let [start, end, ..] = event.details.as_slice() else {
            continue;
        };
        let (Some(start), Some(end)) = (parse_clock(start), parse_clock(end)) else {
            continue;
        };

        let mut span = (end - start).num_minutes() as f64 / 60.0;
        if span < 0.0 {
            span += 24.0;
        }
        total += span;
        any = true;
    }

    any.then_some(total)
}

/// Parse an "HH:MM" detail token
fn parse_clock(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}
