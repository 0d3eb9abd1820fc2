//! Custom date-ranged reports and indicator enumeration.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, IndicatorDefinition};
use crate::fred::{FredClient, Observation};

/// Inbound custom-report request. Fields are optional so missing ones
/// surface as field-level validation errors, not body-parse failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub indicators: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Per-field validation messages, in field order.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// A request that passed validation: every key resolved, dates parsed,
/// window well-ordered.
#[derive(Debug)]
pub struct ValidatedRequest {
    pub indicators: Vec<&'static IndicatorDefinition>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Validate a report request. Collects every problem; no upstream call
/// is made on failure.
pub fn validate_request(request: &ReportRequest) -> Result<ValidatedRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut indicators = Vec::new();

    match &request.indicators {
        None => {
            errors.insert(
                "indicators".to_string(),
                vec!["The indicators field is required.".to_string()],
            );
        }
        Some(keys) if keys.is_empty() => {
            errors.insert(
                "indicators".to_string(),
                vec!["The indicators field must have at least 1 items.".to_string()],
            );
        }
        Some(keys) => {
            for (i, key) in keys.iter().enumerate() {
                match catalog::resolve(key) {
                    Some(def) => indicators.push(def),
                    None => {
                        errors.insert(
                            format!("indicators.{i}"),
                            vec![format!("The selected indicators.{i} is invalid.")],
                        );
                    }
                }
            }
        }
    }

    let start_date = parse_date_field(&request.start_date, "start_date", "start date", &mut errors);
    let end_date = parse_date_field(&request.end_date, "end_date", "end date", &mut errors);

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors
                .entry("end_date".to_string())
                .or_default()
                .push("The end date field must be a date after or equal to start date.".to_string());
        }
    }

    // A missing date always carries a field error, so reaching here with
    // no errors implies both dates parsed.
    if let (Some(start_date), Some(end_date)) = (start_date, end_date) {
        if errors.is_empty() {
            return Ok(ValidatedRequest {
                indicators,
                start_date,
                end_date,
            });
        }
    }
    Err(errors)
}

fn parse_date_field(
    raw: &Option<String>,
    field: &str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    match raw {
        None => {
            errors.insert(
                field.to_string(),
                vec![format!("The {label} field is required.")],
            );
            None
        }
        Some(value) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert(
                    field.to_string(),
                    vec![format!("The {label} field must be a valid date.")],
                );
                None
            }
        },
    }
}

/// One requested series with its observations in upstream order.
#[derive(Debug, Serialize)]
pub struct SeriesReport {
    pub series_id: &'static str,
    pub data: Vec<Observation>,
}

#[derive(Debug, Serialize)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Payload of the custom-report envelope.
#[derive(Debug, Serialize)]
pub struct CustomReport {
    pub report_period: ReportPeriod,
    /// Keyed by logical key, in request order.
    pub indicators: IndexMap<&'static str, SeriesReport>,
    pub timestamp: DateTime<Utc>,
}

/// Assemble a custom report. The cache is bypassed: ranged queries go
/// straight to the upstream client, one call per indicator. A failed
/// series degrades to an empty observation list.
pub async fn custom_report(client: &FredClient, request: &ValidatedRequest) -> CustomReport {
    let mut indicators = IndexMap::new();

    for def in &request.indicators {
        let data = client
            .fetch_range(def.series_id, request.start_date, request.end_date)
            .await;
        indicators.insert(
            def.logical_key,
            SeriesReport {
                series_id: def.series_id,
                data,
            },
        );
    }

    CustomReport {
        report_period: ReportPeriod {
            start_date: request.start_date,
            end_date: request.end_date,
        },
        indicators,
        timestamp: Utc::now(),
    }
}

/// Payload for the available-indicators listing. No upstream calls.
#[derive(Debug, Serialize)]
pub struct AvailableIndicators {
    pub indicators: Vec<&'static str>,
    pub mapping: IndexMap<&'static str, &'static str>,
}

pub fn available_indicators() -> AvailableIndicators {
    AvailableIndicators {
        indicators: catalog::keys(),
        mapping: catalog::mapping(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(indicators: &[&str], start: &str, end: &str) -> ReportRequest {
        ReportRequest {
            indicators: Some(indicators.iter().map(|s| s.to_string()).collect()),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[test]
    fn accepts_valid_request_in_order() {
        let req = request(&["sp500", "gdp"], "2024-01-01", "2024-03-31");
        let validated = validate_request(&req).unwrap();
        let keys: Vec<_> = validated.indicators.iter().map(|d| d.logical_key).collect();
        assert_eq!(keys, ["sp500", "gdp"], "request order is preserved");
        assert_eq!(validated.start_date.to_string(), "2024-01-01");
    }

    #[test]
    fn single_day_window_is_valid() {
        let req = request(&["gdp"], "2024-06-15", "2024-06-15");
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn rejects_inverted_window() {
        let req = request(&["gdp"], "2025-01-01", "2024-12-31");
        let errors = validate_request(&req).unwrap_err();
        assert!(errors.contains_key("end_date"));
    }

    #[test]
    fn rejects_missing_fields_individually() {
        let errors = validate_request(&ReportRequest::default()).unwrap_err();
        assert_eq!(
            errors.keys().collect::<Vec<_>>(),
            ["indicators", "start_date", "end_date"]
        );
        assert_eq!(errors["start_date"][0], "The start date field is required.");
    }

    #[test]
    fn rejects_empty_indicator_list() {
        let req = ReportRequest {
            indicators: Some(vec![]),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-02".to_string()),
        };
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(
            errors["indicators"][0],
            "The indicators field must have at least 1 items."
        );
    }

    #[test]
    fn rejects_unknown_keys_with_position() {
        let req = request(&["gdp", "dogecoin"], "2024-01-01", "2024-01-02");
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(
            errors["indicators.1"][0],
            "The selected indicators.1 is invalid."
        );
        assert!(!errors.contains_key("indicators.0"));
    }

    #[test]
    fn rejects_unparseable_dates() {
        let req = request(&["gdp"], "01/01/2024", "yesterday");
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(
            errors["start_date"][0],
            "The start date field must be a valid date."
        );
        assert_eq!(
            errors["end_date"][0],
            "The end date field must be a valid date."
        );
    }

    #[test]
    fn listing_covers_whole_catalog() {
        let listing = available_indicators();
        assert_eq!(listing.indicators.len(), 12);
        assert_eq!(listing.mapping["gdp"], "GDP");
        assert_eq!(listing.indicators[0], "gdp");
        assert_eq!(listing.mapping.len(), 12);
    }
}
