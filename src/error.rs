use thiserror::Error;

/// Conditions the dashboard renders as a notice instead of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("metric '{0}' is not a column of the loaded dataset; pick another metric in the sidebar")]
    MetricNotFound(String),
}
