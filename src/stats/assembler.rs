//! Datachart assembler: joins catalog metadata with aggregate query results.
//!
//! Pure composition. Caching is applied by whoever calls these functions.

use std::collections::{BTreeMap, HashSet};

use futures::future::join_all;

use crate::catalog::{ChartPayload, HeaderKind};
use crate::error_handling::StatsError;
use crate::stats::aggregate::AggregateQueryService;
use crate::stats::lookup::SiteHeaderSetting;
use crate::stats::report::{HeaderEntry, Notice, SiteReport};

#[derive(Clone)]
pub struct DatachartAssembler {
    aggregate: AggregateQueryService,
}

impl DatachartAssembler {
    pub fn new(aggregate: AggregateQueryService) -> Self {
        DatachartAssembler { aggregate }
    }

    /// Builds the report for a tracked `site` from its recorded settings.
    ///
    /// The first setting per header kind wins. Each header's share is queried
    /// independently; a failed query degrades only that entry to
    /// `HeaderEntry::Unavailable`. A site without catalog settings gets the
    /// not-set notice.
    pub async fn assemble_site_report(
        &self,
        site: &str,
        settings: &[SiteHeaderSetting],
    ) -> SiteReport {
        let mut seen = HashSet::new();
        let unique: Vec<&SiteHeaderSetting> = settings
            .iter()
            .filter(|setting| seen.insert(setting.header))
            .collect();
        if unique.len() < settings.len() {
            log::debug!(
                "Ignoring {} duplicate header records for {}",
                settings.len() - unique.len(),
                site
            );
        }

        let percents = join_all(unique.iter().map(|setting| {
            self.aggregate
                .percent_for(setting.header, setting.value.as_deref())
        }))
        .await;

        let mut entries = BTreeMap::new();
        for (setting, percent) in unique.into_iter().zip(percents) {
            let entry = match percent {
                Ok(percent) => HeaderEntry::Measured {
                    value: setting.value.clone(),
                    percent,
                },
                Err(e) => {
                    log::warn!(
                        "Share of {} unavailable for {}: {}",
                        setting.header.name(),
                        site,
                        e
                    );
                    HeaderEntry::Unavailable {
                        value: setting.value.clone(),
                    }
                }
            };
            entries.insert(setting.header.id(), entry);
        }

        let mut notices = Vec::new();
        if entries.is_empty() || entries.values().any(|entry| entry.value().is_none()) {
            notices.push(Notice::NotSet);
        }

        SiteReport {
            site: site.to_string(),
            found: true,
            notices,
            settings: entries,
        }
    }

    /// Chart of the global value distribution for `header`.
    ///
    /// # Errors
    ///
    /// `StatsError::DataUnavailable` when the distribution cannot be computed.
    pub async fn assemble_distribution_chart(
        &self,
        header: HeaderKind,
    ) -> Result<ChartPayload, StatsError> {
        let distribution = self.aggregate.distribution_for(header).await?;
        Ok(header.to_chart(&distribution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::MockDataset;
    use std::sync::Arc;

    fn assembler(dataset: MockDataset) -> DatachartAssembler {
        DatachartAssembler::new(AggregateQueryService::new(Arc::new(dataset)))
    }

    fn setting(header: HeaderKind, value: Option<&str>) -> SiteHeaderSetting {
        SiteHeaderSetting {
            site: "acme.com".into(),
            header,
            value: value.map(str::to_string),
        }
    }

    fn population() -> MockDataset {
        let mut dataset = MockDataset::new();
        for i in 0..40 {
            let value = if i < 10 { "DENY" } else { "SAMEORIGIN" };
            dataset = dataset.with_header(&format!("site{i}.test"), "X-Frame-Options", Some(value));
        }
        dataset
    }

    #[tokio::test]
    async fn test_site_report_percent() {
        let report = assembler(population())
            .assemble_site_report(
                "acme.com",
                &[setting(HeaderKind::FrameOptions, Some("DENY"))],
            )
            .await;

        assert!(report.found);
        assert!(report.notices.is_empty());
        assert_eq!(
            report.settings.get("x-frame-options"),
            Some(&HeaderEntry::Measured {
                value: Some("DENY".into()),
                percent: 25.0,
            })
        );
    }

    #[tokio::test]
    async fn test_first_occurrence_wins() {
        let report = assembler(population())
            .assemble_site_report(
                "acme.com",
                &[
                    setting(HeaderKind::FrameOptions, Some("SAMEORIGIN")),
                    setting(HeaderKind::FrameOptions, Some("DENY")),
                ],
            )
            .await;
        assert_eq!(report.settings.len(), 1);
        assert_eq!(
            report.settings["x-frame-options"].value(),
            Some("SAMEORIGIN")
        );
        assert_eq!(report.settings["x-frame-options"].percent(), Some(75.0));
    }

    #[tokio::test]
    async fn test_tracked_site_without_settings_is_not_set() {
        let report = assembler(population())
            .assemble_site_report("bare.test", &[])
            .await;
        assert!(report.found);
        assert_eq!(report.notices, vec![Notice::NotSet]);
        assert!(report.settings.is_empty());
    }

    #[tokio::test]
    async fn test_absent_value_adds_not_set_notice() {
        let dataset = MockDataset::new()
            .with_header("acme.com", "Content-Security-Policy", None)
            .with_header("other.test", "Content-Security-Policy", Some("default-src 'self'"));
        let report = assembler(dataset)
            .assemble_site_report(
                "acme.com",
                &[setting(HeaderKind::ContentSecurityPolicy, None)],
            )
            .await;
        assert_eq!(report.notices, vec![Notice::NotSet]);
        assert_eq!(
            report.settings["content-security-policy"],
            HeaderEntry::Measured {
                value: None,
                percent: 50.0,
            }
        );
    }

    #[tokio::test]
    async fn test_partial_failure_degrades_one_entry() {
        let dataset = population()
            .with_header("acme.com", "X-Content-Type-Options", Some("nosniff"))
            .failing_header("X-Content-Type-Options");
        let report = assembler(dataset)
            .assemble_site_report(
                "acme.com",
                &[
                    setting(HeaderKind::FrameOptions, Some("DENY")),
                    setting(HeaderKind::ContentTypeOptions, Some("nosniff")),
                ],
            )
            .await;

        assert!(report.is_degraded());
        assert_eq!(
            report.settings["x-content-type-options"],
            HeaderEntry::Unavailable {
                value: Some("nosniff".into()),
            }
        );
        assert_eq!(report.settings["x-frame-options"].percent(), Some(25.0));
    }

    #[tokio::test]
    async fn test_distribution_chart() {
        let chart = assembler(population())
            .assemble_distribution_chart(HeaderKind::FrameOptions)
            .await
            .expect("chart");
        assert_eq!(chart.labels, vec!["SAMEORIGIN", "DENY"]);
        assert_eq!(chart.counts, vec![30, 10]);
        assert_eq!(chart.percentages, vec![75.0, 25.0]);
        assert_eq!(chart.total_sites, 40);
    }

    #[tokio::test]
    async fn test_distribution_chart_fails_whole_request() {
        let result = assembler(population().failing_header("X-Frame-Options"))
            .assemble_distribution_chart(HeaderKind::FrameOptions)
            .await;
        assert!(matches!(result, Err(StatsError::DataUnavailable(_))));
    }
}
