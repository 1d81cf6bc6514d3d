//! Read access to the scan dataset.
//!
//! [`HeaderDataset`] is the query capability the statistics services consume.
//! [`SqliteDataset`] implements it over the `sites` and
//! `site_security_headers` tables. Every query binds its parameters and runs
//! under a timeout.
//!
//! When a site has several records for the same header, only its first record
//! (lowest row id) counts. Each scanned site therefore contributes exactly one
//! value per header to the aggregates.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;

use super::models::{HeaderRow, PairCount, ValueCountRow};
use super::pool::DbPool;
use crate::error_handling::DatabaseError;

/// Query capability over the scan dataset.
///
/// Header names are matched case-insensitively. Implementations must be
/// deterministic for unchanged data.
#[async_trait]
pub trait HeaderDataset: Send + Sync {
    /// Header records for a site in recording order.
    ///
    /// `None` when the site is not tracked. A tracked site without any header
    /// records yields `Some` of an empty vector.
    async fn site_headers(&self, site: &str) -> Result<Option<Vec<HeaderRow>>, DatabaseError>;

    /// Sites whose recorded value for `header_name` equals `value` (`None`
    /// matches explicitly absent), and sites with any record for the header.
    async fn pair_count(
        &self,
        header_name: &str,
        value: Option<&str>,
    ) -> Result<PairCount, DatabaseError>;

    /// Site count per distinct recorded value of `header_name`.
    async fn value_counts(&self, header_name: &str) -> Result<Vec<ValueCountRow>, DatabaseError>;

    /// Number of distinct tracked sites.
    async fn tracked_site_count(&self) -> Result<u64, DatabaseError>;
}

// `first_records` holds the first record per site for the header bound as ?1.
// `IS` compares NULL to NULL as equal, so binding no value in ?2 matches
// explicitly absent records.
const PAIR_COUNT_QUERY: &str = "WITH first_records AS (
        SELECT h.site_id, h.header_value
        FROM site_security_headers h
        WHERE h.id IN (
            SELECT MIN(id) FROM site_security_headers
            WHERE header_name = ?1
            GROUP BY site_id
        )
    )
    SELECT COALESCE(SUM(CASE WHEN header_value IS ?2 THEN 1 ELSE 0 END), 0) AS matching,
           COUNT(*) AS total
    FROM first_records";

const VALUE_COUNTS_QUERY: &str = "WITH first_records AS (
        SELECT h.site_id, h.header_value
        FROM site_security_headers h
        WHERE h.id IN (
            SELECT MIN(id) FROM site_security_headers
            WHERE header_name = ?1
            GROUP BY site_id
        )
    )
    SELECT header_value, COUNT(*) AS sites
    FROM first_records
    GROUP BY header_value
    ORDER BY sites DESC, header_value";

// The LEFT JOIN keeps one all-NULL row for a tracked site without records,
// so no rows at all means the site is untracked.
const SITE_HEADERS_QUERY: &str = "SELECT h.header_name, h.header_value
     FROM sites s
     LEFT JOIN site_security_headers h ON h.site_id = s.id
     WHERE s.site = ?1
     ORDER BY h.id";

const TRACKED_SITES_QUERY: &str = "SELECT COUNT(*) FROM sites";

/// SQLite-backed [`HeaderDataset`].
#[derive(Clone)]
pub struct SqliteDataset {
    pool: DbPool,
    query_timeout: Duration,
}

impl SqliteDataset {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        SqliteDataset {
            pool,
            query_timeout,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Runs a query future under the configured timeout.
    async fn bounded<T, F>(&self, query: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(DatabaseError::SqlError),
            Err(_) => Err(DatabaseError::QueryTimeout(self.query_timeout)),
        }
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl HeaderDataset for SqliteDataset {
    async fn site_headers(&self, site: &str) -> Result<Option<Vec<HeaderRow>>, DatabaseError> {
        let rows = self
            .bounded(
                sqlx::query(SITE_HEADERS_QUERY)
                    .bind(site)
                    .fetch_all(self.pool.as_ref()),
            )
            .await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut headers = Vec::with_capacity(rows.len());
        for row in &rows {
            let header_name: Option<String> = row.try_get("header_name")?;
            if let Some(header_name) = header_name {
                headers.push(HeaderRow {
                    header_name,
                    header_value: row.try_get("header_value")?,
                });
            }
        }
        Ok(Some(headers))
    }

    async fn pair_count(
        &self,
        header_name: &str,
        value: Option<&str>,
    ) -> Result<PairCount, DatabaseError> {
        let row = self
            .bounded(
                sqlx::query(PAIR_COUNT_QUERY)
                    .bind(header_name)
                    .bind(value)
                    .fetch_one(self.pool.as_ref()),
            )
            .await?;

        let matching: i64 = row.try_get("matching")?;
        let total: i64 = row.try_get("total")?;
        Ok(PairCount {
            matching: to_count(matching),
            total: to_count(total),
        })
    }

    async fn value_counts(&self, header_name: &str) -> Result<Vec<ValueCountRow>, DatabaseError> {
        let rows = self
            .bounded(
                sqlx::query(VALUE_COUNTS_QUERY)
                    .bind(header_name)
                    .fetch_all(self.pool.as_ref()),
            )
            .await?;

        rows.iter()
            .map(|row| {
                let sites: i64 = row.try_get("sites")?;
                Ok(ValueCountRow {
                    header_value: row.try_get("header_value")?,
                    sites: to_count(sites),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(DatabaseError::SqlError)
    }

    async fn tracked_site_count(&self) -> Result<u64, DatabaseError> {
        let count: i64 = self
            .bounded(sqlx::query_scalar(TRACKED_SITES_QUERY).fetch_one(self.pool.as_ref()))
            .await?;
        Ok(to_count(count))
    }
}
