use crate::types::station::Station;
use crate::types::summary::{CurrentConditions, DailySummary, HourlySeries};
use serde::Serialize;

/// Where the observations behind a [`StationReport`] came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataSource {
    Live,
    /// The live fetch failed; `reason` is the error, kept for a retry prompt.
    Fallback { reason: String },
}

/// Everything a station page shows, derived from one historical series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub station: Station,
    pub source: DataSource,
    /// Most recent day first.
    pub summaries: Vec<DailySummary>,
    pub selected_date: Option<String>,
    pub hourly: Option<HourlySeries>,
    pub current: Option<CurrentConditions>,
}

impl StationReport {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Fallback { .. })
    }

    /// `false` when the series held no usable points.
    pub fn has_data(&self) -> bool {
        !self.summaries.is_empty()
    }
}
