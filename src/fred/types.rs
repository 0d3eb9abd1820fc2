//! Wire and domain types for upstream observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized (date, value) sample of a series.
///
/// `value` is `None` when upstream reported the missing-data sentinel
/// for that date (holidays, reporting gaps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Top-level upstream response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ObservationsResponse {
    #[serde(default)]
    pub observations: Vec<RawObservation>,
}

/// Upstream observation as it appears on the wire. `value` is always a
/// string, possibly the `"."` sentinel.
#[derive(Debug, Deserialize)]
pub(crate) struct RawObservation {
    pub date: String,
    pub value: String,
}

impl RawObservation {
    /// Normalize a raw observation. Returns `None` only when the date
    /// itself is unusable; a sentinel or unparseable value yields an
    /// observation with an absent value.
    pub(crate) fn normalize(&self) -> Option<Observation> {
        let date = match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(date = %self.date, error = %e, "Skipping observation with invalid date");
                return None;
            }
        };
        Some(Observation {
            date,
            value: parse_value(&self.value),
        })
    }
}

/// Parse an upstream value string. `"."` is the no-data sentinel; an
/// empty, unparseable or non-finite value is likewise treated as absent.
pub(crate) fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
