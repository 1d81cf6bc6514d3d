//! Header statistics engine.
//!
//! Read-only pipeline over the scan dataset:
//! - `lookup`: settings recorded for a site
//! - `aggregate`: population shares, value distributions, site totals
//! - `assembler`: site reports and distribution charts
//!
//! Nothing here holds state between requests; every call builds fresh values.

mod aggregate;
mod assembler;
mod distribution;
mod lookup;
mod report;

use std::sync::Arc;

pub use aggregate::AggregateQueryService;
pub use assembler::DatachartAssembler;
pub use distribution::{percent_of, Bucket, ValueDistribution};
pub use lookup::{normalize_site, SiteHeaderSetting, SiteLookupService};
pub use report::{HeaderEntry, Notice, SiteReport};

use crate::catalog::{ChartPayload, HeaderKind};
use crate::error_handling::StatsError;
use crate::storage::HeaderDataset;

/// The services wired over one dataset.
#[derive(Clone)]
pub struct StatsEngine {
    pub lookup: SiteLookupService,
    pub aggregate: AggregateQueryService,
    pub assembler: DatachartAssembler,
}

impl StatsEngine {
    pub fn new(dataset: Arc<dyn HeaderDataset>) -> Self {
        let aggregate = AggregateQueryService::new(Arc::clone(&dataset));
        StatsEngine {
            lookup: SiteLookupService::new(dataset),
            assembler: DatachartAssembler::new(aggregate.clone()),
            aggregate,
        }
    }

    /// Looks up `site` and builds its report.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the site lookup itself fails.
    pub async fn site_report(&self, site: &str) -> Result<SiteReport, StatsError> {
        let site = normalize_site(site);
        match self.lookup.find_site(&site).await? {
            Some(settings) => Ok(self.assembler.assemble_site_report(&site, &settings).await),
            None => Ok(SiteReport::not_found(&site)),
        }
    }

    /// Distribution chart for `header`.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the distribution cannot be computed.
    pub async fn header_chart(&self, header: HeaderKind) -> Result<ChartPayload, StatsError> {
        self.assembler.assemble_distribution_chart(header).await
    }

    /// Number of tracked sites.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn total_sites(&self) -> Result<u64, StatsError> {
        self.aggregate.total_tracked_sites().await
    }
}
