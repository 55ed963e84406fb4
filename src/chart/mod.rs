//! Chart series - records projected into labelled numeric series.
//!
//! The drawing itself belongs to a [`ChartSink`]; this module only produces
//! the data a chart library needs.

mod series;

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::record::same_version;

pub use series::{
    dashboard_series, dataset_comparison, language_distribution, version_distribution,
    version_profile, VERSION_BUCKETS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
    Radar,
}

/// One numeric series. Missing versions show up as `NaN` points, which
/// compare equal to each other.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| same_version(*a, *b))
    }
}

/// Labels plus one or more numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A series bound to the container it is drawn into.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub container_id: String,
    pub spec: SeriesSpec,
}

/// Which records feed the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartScope {
    /// The whole collection; charts only change when a new batch is loaded.
    #[default]
    Collection,
    /// The filtered and sorted records, before pagination.
    Filtered,
}

/// External chart renderer.
pub trait ChartSink {
    fn draw(&mut self, container_id: &str, spec: &SeriesSpec);
}

/// A chart sink that keeps every drawn series in a shared buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureChartSink {
    drawn: Arc<Mutex<Vec<ChartSeries>>>,
}

impl CaptureChartSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(drawn: Arc<Mutex<Vec<ChartSeries>>>) -> Self {
        Self { drawn }
    }
}

impl ChartSink for CaptureChartSink {
    fn draw(&mut self, container_id: &str, spec: &SeriesSpec) {
        let mut drawn = self.drawn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        drawn.push(ChartSeries {
            container_id: container_id.to_string(),
            spec: spec.clone(),
        });
    }
}
