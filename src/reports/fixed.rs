//! Fixed-category latest-value reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::cache::ObservationCache;
use crate::catalog::{self, Category};
use crate::fred::FredClient;

/// One row of a category report.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorValue {
    pub indicator: &'static str,
    /// `null` when the latest observation exists but carries the
    /// no-data sentinel. Never coerced to zero.
    pub value: Option<f64>,
    pub unit: &'static str,
    pub date: NaiveDate,
    pub series_id: &'static str,
}

/// Payload of a category report envelope.
#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub category: &'static str,
    pub timestamp: DateTime<Utc>,
    pub data: Vec<IndicatorValue>,
}

/// Assemble the latest-value report for one category.
///
/// Iterates the catalog in table order; each series goes through the
/// observation cache. Indicators without any observation are omitted
/// rather than emitted as placeholders.
pub async fn category_report(
    client: &FredClient,
    cache: &ObservationCache,
    category: Category,
) -> CategoryReport {
    let mut data = Vec::new();

    for def in catalog::by_category(category) {
        let observation = cache
            .get_latest(category.cache_prefix(), def.series_id, || {
                client.fetch_latest(def.series_id)
            })
            .await;

        match observation {
            Some(obs) => data.push(IndicatorValue {
                indicator: def.display_name,
                value: obs.value,
                unit: def.unit,
                date: obs.date,
                series_id: def.series_id,
            }),
            None => {
                tracing::debug!(series_id = %def.series_id, "No observation available, omitting indicator");
            }
        }
    }

    CategoryReport {
        category: category.label(),
        timestamp: Utc::now(),
        data,
    }
}
