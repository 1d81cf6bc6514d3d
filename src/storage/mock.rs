//! In-memory [`HeaderDataset`] for tests.
//!
//! Mirrors the SQLite semantics (first record per site wins, case-insensitive
//! site and header matching) and can inject failures and delays.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::dataset::HeaderDataset;
use super::models::{HeaderRow, PairCount, ValueCountRow};
use crate::error_handling::DatabaseError;

#[derive(Debug, Clone)]
struct MockRecord {
    site: String,
    header_name: String,
    header_value: Option<String>,
}

/// Scriptable in-memory scan dataset.
#[derive(Default)]
pub struct MockDataset {
    sites: Vec<String>,
    records: Vec<MockRecord>,
    failing_headers: HashSet<String>,
    unavailable: bool,
    delay: Option<Duration>,
    calls: Mutex<usize>,
}

impl MockDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a site without any header records.
    pub fn with_site(mut self, site: &str) -> Self {
        if !self.sites.iter().any(|s| s.eq_ignore_ascii_case(site)) {
            self.sites.push(site.to_string());
        }
        self
    }

    /// Records a header for a site, tracking the site if needed.
    pub fn with_header(mut self, site: &str, header_name: &str, value: Option<&str>) -> Self {
        self = self.with_site(site);
        self.records.push(MockRecord {
            site: site.to_string(),
            header_name: header_name.to_string(),
            header_value: value.map(str::to_string),
        });
        self
    }

    /// Every query touching `header_name` fails.
    pub fn failing_header(mut self, header_name: &str) -> Self {
        self.failing_headers.insert(header_name.to_ascii_lowercase());
        self
    }

    /// Every query fails as if the database were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Every query sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of queries answered so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, header_name: Option<&str>) -> Result<(), DatabaseError> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(DatabaseError::SqlError(sqlx::Error::PoolClosed));
        }
        if let Some(name) = header_name {
            if self.failing_headers.contains(&name.to_ascii_lowercase()) {
                return Err(DatabaseError::SqlError(sqlx::Error::PoolTimedOut));
            }
        }
        Ok(())
    }

    /// First recorded value per site for a header, keyed by lowercased site.
    fn first_records(&self, header_name: &str) -> BTreeMap<String, Option<String>> {
        let mut first = BTreeMap::new();
        for record in &self.records {
            if record.header_name.eq_ignore_ascii_case(header_name) {
                first
                    .entry(record.site.to_ascii_lowercase())
                    .or_insert_with(|| record.header_value.clone());
            }
        }
        first
    }
}

#[async_trait]
impl HeaderDataset for MockDataset {
    async fn site_headers(&self, site: &str) -> Result<Option<Vec<HeaderRow>>, DatabaseError> {
        self.enter(None).await?;
        if !self.sites.iter().any(|s| s.eq_ignore_ascii_case(site)) {
            return Ok(None);
        }
        Ok(Some(
            self.records
                .iter()
                .filter(|r| r.site.eq_ignore_ascii_case(site))
                .map(|r| HeaderRow {
                    header_name: r.header_name.clone(),
                    header_value: r.header_value.clone(),
                })
                .collect(),
        ))
    }

    async fn pair_count(
        &self,
        header_name: &str,
        value: Option<&str>,
    ) -> Result<PairCount, DatabaseError> {
        self.enter(Some(header_name)).await?;
        let first = self.first_records(header_name);
        let matching = first.values().filter(|v| v.as_deref() == value).count();
        Ok(PairCount {
            matching: matching as u64,
            total: first.len() as u64,
        })
    }

    async fn value_counts(&self, header_name: &str) -> Result<Vec<ValueCountRow>, DatabaseError> {
        self.enter(Some(header_name)).await?;
        let mut counts: BTreeMap<Option<String>, u64> = BTreeMap::new();
        for value in self.first_records(header_name).into_values() {
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(header_value, sites)| ValueCountRow {
                header_value,
                sites,
            })
            .collect())
    }

    async fn tracked_site_count(&self) -> Result<u64, DatabaseError> {
        self.enter(None).await?;
        Ok(self.sites.len() as u64)
    }
}
