//! Aggregate queries: population share of one (header, value) pair, full value
//! distributions and the tracked-site total.

use std::sync::Arc;

use crate::catalog::HeaderKind;
use crate::error_handling::StatsError;
use crate::stats::distribution::{percent_of, ValueDistribution};
use crate::storage::HeaderDataset;

/// Runs the aggregation queries against the scan dataset.
///
/// Percentages use the sites with any record for the header as denominator,
/// the same population `distribution_for` reports as `total_sites`.
#[derive(Clone)]
pub struct AggregateQueryService {
    dataset: Arc<dyn HeaderDataset>,
}

impl AggregateQueryService {
    pub fn new(dataset: Arc<dyn HeaderDataset>) -> Self {
        AggregateQueryService { dataset }
    }

    /// Percentage of sites recording `value` for `header`.
    ///
    /// `None` asks for sites that were scanned and do not send the header.
    /// A value no site uses yields `0.0`.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn percent_for(
        &self,
        header: HeaderKind,
        value: Option<&str>,
    ) -> Result<f64, StatsError> {
        let count = self.dataset.pair_count(header.name(), value).await?;
        Ok(percent_of(count.matching, count.total))
    }

    /// Full histogram of recorded values for `header`.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn distribution_for(&self, header: HeaderKind) -> Result<ValueDistribution, StatsError> {
        let rows = self.dataset.value_counts(header.name()).await?;
        log::debug!(
            "Distribution for {}: {} distinct values",
            header.name(),
            rows.len()
        );
        Ok(ValueDistribution::from_counts(
            header,
            rows.into_iter()
                .map(|row| (row.header_value, row.sites))
                .collect(),
        ))
    }

    /// Number of distinct sites in the dataset.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn total_tracked_sites(&self) -> Result<u64, StatsError> {
        Ok(self.dataset.tracked_site_count().await?)
    }
}
