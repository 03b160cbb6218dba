//! Laytime and demurrage calculation
//!
//! Pure arithmetic over explicit charter-party terms. The terms come
//! from configuration, never from constants in detection logic.

use sof_core::{config::LaytimeConfig, Event, EVENT_DEMURRAGE};

/// Charter-party terms driving the demurrage calculation
#[derive(Debug, Clone, PartialEq)]
pub struct LaytimeTerms {
    /// Contractually allowed laytime in days
    pub allowed_laytime_days: f64,

    /// Demurrage rate charged per day of excess
    pub demurrage_rate_per_day: f64,

    /// Currency code appended to the formatted amount
    pub currency: String,
}

impl From<&LaytimeConfig> for LaytimeTerms {
    fn from(config: &LaytimeConfig) -> Self {
        Self {
            allowed_laytime_days: config.allowed_laytime_days,
            demurrage_rate_per_day: config.demurrage_rate_per_day,
            currency: config.currency.clone(),
        }
    }
}

/// Compute the demurrage event for the hours actually worked
///
/// `days_used = total_hours_used / 24`. Strictly exceeding the allowed
/// laytime yields one Demurrage Calculation event whose single detail
/// is the amount formatted as a currency string; staying at or under
/// the threshold yields `None`.
pub fn calculate_demurrage(total_hours_used: f64, terms: &LaytimeTerms) -> Option<Event> {
    let days_used = total_hours_used / 24.0;
    if days_used <= terms.allowed_laytime_days {
        return None;
    }

    let demurrage = (days_used - terms.allowed_laytime_days) * terms.demurrage_rate_per_day;
    let detail = format!("${demurrage:.2} {}", terms.currency);

    Some(Event::new(EVENT_DEMURRAGE).with_details(vec![detail]))
}
