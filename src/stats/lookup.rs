//! Site lookup: the header settings recorded for one site.

use std::sync::Arc;

use crate::catalog::HeaderKind;
use crate::error_handling::StatsError;
use crate::storage::HeaderDataset;

/// One recorded configuration fact for one site.
///
/// `value == None` means the site was scanned and does not send the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteHeaderSetting {
    pub site: String,
    pub header: HeaderKind,
    pub value: Option<String>,
}

/// Lookup key for a site identifier: trimmed, ASCII letters lowercased.
///
/// Non-ASCII letters are kept as they are, matching the `NOCASE` collation of
/// the `sites` table.
pub fn normalize_site(site: &str) -> String {
    site.trim().to_ascii_lowercase()
}

/// Fetches the settings recorded for a site.
#[derive(Clone)]
pub struct SiteLookupService {
    dataset: Arc<dyn HeaderDataset>,
}

impl SiteLookupService {
    pub fn new(dataset: Arc<dyn HeaderDataset>) -> Self {
        SiteLookupService { dataset }
    }

    /// Settings recorded for `site`, in recording order.
    ///
    /// Returns an empty sequence for an untracked site. Records for headers
    /// outside the catalog are skipped. Duplicates are passed through; the
    /// report assembler keeps the first one per header.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn settings_for(&self, site: &str) -> Result<Vec<SiteHeaderSetting>, StatsError> {
        Ok(self.find_site(site).await?.unwrap_or_default())
    }

    /// Like [`settings_for`](Self::settings_for), but `None` for an untracked
    /// site so it can be told apart from a tracked site without catalog
    /// headers.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the dataset cannot be queried.
    pub async fn find_site(
        &self,
        site: &str,
    ) -> Result<Option<Vec<SiteHeaderSetting>>, StatsError> {
        let site = normalize_site(site);
        if site.is_empty() {
            return Ok(None);
        }

        let Some(rows) = self.dataset.site_headers(&site).await? else {
            log::info!("Site {site} is not tracked");
            return Ok(None);
        };
        let settings: Vec<SiteHeaderSetting> = rows
            .into_iter()
            .filter_map(|row| match HeaderKind::from_header_name(&row.header_name) {
                Some(header) => Some(SiteHeaderSetting {
                    site: site.clone(),
                    header,
                    value: row.header_value,
                }),
                None => {
                    log::debug!(
                        "Skipping {} for {}: not a catalog header",
                        row.header_name,
                        site
                    );
                    None
                }
            })
            .collect();

        if settings.is_empty() {
            log::info!("No catalog header records for site {site}");
        }
        Ok(Some(settings))
    }
}
