//! Indicator catalog subsystem.
//!
//! # Data Flow
//! ```text
//! logical key (public API name, e.g. "gdp")
//!     → resolve() → IndicatorDefinition
//!     → series_id (upstream FRED code, e.g. "GDP")
//!     → fred client / cache
//! ```
//!
//! # Design Decisions
//! - One data-driven table; category reports select from it by tag
//! - Table order is the response order for every enumeration
//! - Fixed at compile time, no mutation API

use serde::Serialize;

/// Category a definition belongs to, selecting it into one of the
/// fixed latest-value reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    EconomicIndicator,
    InterestRate,
    MarketIndicator,
}

impl Category {
    /// Prefix used when building observation cache keys.
    pub fn cache_prefix(&self) -> &'static str {
        match self {
            Category::EconomicIndicator => "economic_indicator",
            Category::InterestRate => "interest_rate",
            Category::MarketIndicator => "market_indicator",
        }
    }

    /// Human-readable label carried in the report envelope.
    pub fn label(&self) -> &'static str {
        match self {
            Category::EconomicIndicator => "Economic Indicators",
            Category::InterestRate => "Interest Rates",
            Category::MarketIndicator => "Market Indicators",
        }
    }

    /// Success message for the category's report endpoint.
    pub fn success_message(&self) -> &'static str {
        match self {
            Category::EconomicIndicator => "Economic indicators retrieved successfully",
            Category::InterestRate => "Interest rates retrieved successfully",
            Category::MarketIndicator => "Market indicators retrieved successfully",
        }
    }
}

/// One supported indicator: the public logical key, the upstream series
/// identifier, and display metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorDefinition {
    pub logical_key: &'static str,
    pub series_id: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    /// `None` for indicators only reachable through the custom report.
    #[serde(skip)]
    pub category: Option<Category>,
}

const fn def(
    logical_key: &'static str,
    series_id: &'static str,
    display_name: &'static str,
    unit: &'static str,
    category: Option<Category>,
) -> IndicatorDefinition {
    IndicatorDefinition {
        logical_key,
        series_id,
        display_name,
        unit,
        category,
    }
}

/// The full indicator table. Order here is the order every listing and
/// report iterates in.
pub const INDICATORS: &[IndicatorDefinition] = &[
    def("gdp", "GDP", "Gdp", "Billions of Dollars", Some(Category::EconomicIndicator)),
    def("inflation", "CPIAUCSL", "Inflation", "Index 1982-1984=100", Some(Category::EconomicIndicator)),
    def("unemployment", "UNRATE", "Unemployment", "Percent", Some(Category::EconomicIndicator)),
    def("consumer_confidence", "UMCSENT", "Consumer Confidence", "Index 1966:Q1=100", Some(Category::EconomicIndicator)),
    def("federal_funds_rate", "FEDFUNDS", "Federal Funds Rate", "Percent", Some(Category::InterestRate)),
    def("treasury_10year", "DGS10", "Treasury 10year", "Percent", Some(Category::InterestRate)),
    def("mortgage_30year", "MORTGAGE30US", "Mortgage 30year", "Percent", Some(Category::InterestRate)),
    def("prime_rate", "DPRIME", "Prime Rate", "Percent", Some(Category::InterestRate)),
    def("sp500", "SP500", "Sp500", "Index", Some(Category::MarketIndicator)),
    def("dollar_index", "DTWEXBGS", "Dollar Index", "Index", Some(Category::MarketIndicator)),
    def("oil_price", "DCOILWTICO", "Oil Price", "Dollars per Barrel", Some(Category::MarketIndicator)),
    def("gold_price", "GOLDAMGBD228NLBM", "Gold Price", "Dollars per Troy Ounce", None),
];

/// Look up a definition by logical key.
pub fn resolve(logical_key: &str) -> Option<&'static IndicatorDefinition> {
    INDICATORS.iter().find(|d| d.logical_key == logical_key)
}

/// All logical keys, in table order.
pub fn keys() -> Vec<&'static str> {
    INDICATORS.iter().map(|d| d.logical_key).collect()
}

/// Ordered logical key → series id mapping, in table order.
pub fn mapping() -> indexmap::IndexMap<&'static str, &'static str> {
    INDICATORS
        .iter()
        .map(|d| (d.logical_key, d.series_id))
        .collect()
}

/// Definitions belonging to a fixed-report category, in table order.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static IndicatorDefinition> {
    INDICATORS
        .iter()
        .filter(move |d| d.category == Some(category))
}
