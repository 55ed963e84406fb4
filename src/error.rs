use crate::analytics::AnalyticsError;
use crate::config::ConfigError;
use crate::query::InvalidCriteriaError;
use crate::record::InvalidDataError;
use crate::source::DataSourceError;

/// Umbrella error for dashboard operations.
///
/// Every variant is recoverable from the caller's side: a failed load or
/// recompute leaves the previously rendered state in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    /// Fetching or decoding the dataset failed.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    /// The fetched batch was not a sequence of records.
    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),
    /// The engine was handed criteria it cannot evaluate.
    #[error(transparent)]
    InvalidCriteria(#[from] InvalidCriteriaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl DashboardError {
    /// Short taxonomy name, used for error banners and analytics payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::DataSource(_) => "DataSourceError",
            DashboardError::InvalidData(_) => "InvalidDataError",
            DashboardError::InvalidCriteria(_) => "InvalidCriteriaError",
            DashboardError::Config(_) => "ConfigError",
            DashboardError::Analytics(_) => "AnalyticsError",
        }
    }
}
