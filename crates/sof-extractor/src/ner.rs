//! Named entity recognition for SOF text
//!
//! The recognizer is a compiled pattern model: a fixed set of regex
//! rules for the three span kinds the timeline cares about (DATE, TIME,
//! MONEY). The model is built once at process start via [`SofNer::load`]
//! and shared read-only for the process lifetime; a rule that fails to
//! compile is fatal, the process must not serve without the model.
//!
//! Recognizer output is advisory. Event ground truth stays with the
//! pattern-rule layer in [`crate::events`].

use std::collections::HashSet;

use regex::Regex;

use crate::EntityRecognizer;
use sof_core::{Entity, EntityKind, Result, SofError};

const MONTHS: &str =
    "JANUARY|FEBRUARY|MARCH|APRIL|MAY|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER";

/// Regex-backed entity recognition model
pub struct SofNer {
    /// Pattern rules in priority order (earlier wins on overlap)
    patterns: Vec<(Regex, EntityKind)>,
}

impl SofNer {
    /// Build the recognition model
    ///
    /// Called once at startup; an uncompilable rule surfaces as
    /// [`SofError::ModelUnavailable`].
    pub fn load() -> Result<Self> {
        let rules = vec![
            // Dates: "JUNE 08, 2024" (with or without the ON header)
            (
                format!(r"(?i)\b(?:{MONTHS})\s+\d{{1,2}},\s*\d{{4}}\b"),
                EntityKind::Date,
            ),
            // Dates: ISO and slashed forms
            (r"\b\d{4}[-/]\d{1,2}[-/]\d{1,2}\b".to_string(), EntityKind::Date),
            (r"\b\d{1,2}[-/]\d{1,2}[-/]\d{4}\b".to_string(), EntityKind::Date),
            // Monetary amounts: "$12,000.00 USD", "$ 8000"
            (
                r"(?i)\$\s?\d[\d,]*(?:\.\d+)?(?:\s*USD)?".to_string(),
                EntityKind::Money,
            ),
            // Times: "08:00", and the "1600 HRS" form common in SOF logs
            (r"\b\d{1,2}:\d{2}\b".to_string(), EntityKind::Time),
            (r"(?i)\b\d{4}\s*HRS\b".to_string(), EntityKind::Time),
        ];

        let mut patterns = Vec::with_capacity(rules.len());
        for (pattern, kind) in rules {
            let regex = Regex::new(&pattern)
                .map_err(|e| SofError::ModelUnavailable(format!("bad rule {pattern:?}: {e}")))?;
            patterns.push((regex, kind));
        }

        Ok(Self { patterns })
    }

    /// Remove overlapping matches, keeping the higher-priority span
    fn deduplicate(&self, mut entities: Vec<(Entity, usize)>) -> Vec<Entity> {
        // Sort by start position, then by rule priority
        entities.sort_by(|(a, pa), (b, pb)| {
            let sa = a.span.unwrap_or_default().0;
            let sb = b.span.unwrap_or_default().0;
            sa.cmp(&sb).then(pa.cmp(pb))
        });

        let mut result = Vec::new();
        let mut covered: HashSet<usize> = HashSet::new();

        for (entity, _) in entities {
            let (start, end) = entity.span.unwrap_or_default();
            let overlaps = (start..end).any(|i| covered.contains(&i));

            if !overlaps {
                for i in start..end {
                    covered.insert(i);
                }
                result.push(entity);
            }
        }

        result.sort_by_key(|e| e.span.unwrap_or_default().0);
        result
    }
}

impl EntityRecognizer for SofNer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();

        for (priority, (regex, kind)) in self.patterns.iter().enumerate() {
            for mat in regex.find_iter(text) {
                entities.push((
                    Entity::new(*kind, mat.as_str()).with_span(mat.start(), mat.end()),
                    priority,
                ));
            }
        }

        Ok(self.deduplicate(entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(entities: &[Entity]) -> Vec<EntityKind> {
        entities.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_model_loads() {
        assert!(SofNer::load().is_ok());
    }

    #[test]
    fn test_recognizes_month_name_date() {
        let ner = SofNer::load().unwrap();
        let entities = ner.recognize("ARRIVED ON JUNE 08, 2024 AT BERTH").unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Date);
        assert_eq!(entities[0].text, "JUNE 08, 2024");
        assert!(entities[0].span.is_some());
    }

    #[test]
    fn test_recognizes_clock_and_hrs_times() {
        let ner = SofNer::load().unwrap();
        let entities = ner.recognize("COMMENCED 08:00 COMPLETED 1600 HRS").unwrap();

        assert_eq!(
            kinds_of(&entities),
            vec![EntityKind::Time, EntityKind::Time]
        );
        assert_eq!(entities[0].text, "08:00");
        assert_eq!(entities[1].text, "1600 HRS");
    }

    #[test]
    fn test_recognizes_money() {
        let ner = SofNer::load().unwrap();
        let entities = ner.recognize("DEMURRAGE RATE $12,000.00 USD PER DAY").unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Money);
        assert_eq!(entities[0].text, "$12,000.00 USD");
    }

    #[test]
    fn test_mixed_entities_sorted_by_position() {
        let ner = SofNer::load().unwrap();
        let entities = ner
            .recognize("16:00 ON JUNE 08, 2024, RATE $8000 USD")
            .unwrap();

        assert_eq!(
            kinds_of(&entities),
            vec![EntityKind::Time, EntityKind::Date, EntityKind::Money]
        );
    }

    #[test]
    fn test_overlapping_spans_deduplicated() {
        let ner = SofNer::load().unwrap();
        // "08, 2024" must not also surface a spurious time or number span
        let entities = ner.recognize("ON JUNE 08, 2024").unwrap();
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_empty_text_yields_no_entities() {
        let ner = SofNer::load().unwrap();
        assert!(ner.recognize("").unwrap().is_empty());
    }
}
