// End-to-end statistics tests over a real SQLite scan database.

mod helpers;

use helpers::{create_test_pool, insert_header, insert_site, seed_site, sqlite_engine};

use header_stats::stats::Notice;
use header_stats::{HeaderEntry, HeaderKind};

const CSP: &str = "Content-Security-Policy";
const XFO: &str = "X-Frame-Options";

#[tokio::test]
async fn test_distribution_excludes_sites_without_a_record() {
    let pool = create_test_pool().await;
    for site in ["a.test", "b.test", "c.test"] {
        seed_site(&pool, site, &[(CSP, Some("default-src 'self'"))]).await;
    }
    seed_site(&pool, "d.test", &[]).await;

    let engine = sqlite_engine(&pool);
    let distribution = engine
        .aggregate
        .distribution_for(HeaderKind::ContentSecurityPolicy)
        .await
        .expect("distribution");

    assert_eq!(distribution.total_sites, 3);
    assert_eq!(distribution.buckets.len(), 1);
    let bucket = &distribution.buckets[0];
    assert_eq!(bucket.value.as_deref(), Some("default-src 'self'"));
    assert_eq!(bucket.count, 3);
    assert_eq!(bucket.percent, 100.0);

    assert_eq!(engine.total_sites().await.expect("total"), 4);
}

#[tokio::test]
async fn test_site_report_share_of_matching_value() {
    let pool = create_test_pool().await;
    seed_site(&pool, "acme.com", &[(XFO, Some("DENY"))]).await;
    for i in 0..9 {
        seed_site(&pool, &format!("deny{i}.test"), &[(XFO, Some("DENY"))]).await;
    }
    for i in 0..30 {
        seed_site(&pool, &format!("same{i}.test"), &[(XFO, Some("SAMEORIGIN"))]).await;
    }
    // Tracked without an X-Frame-Options record: not part of the denominator.
    seed_site(&pool, "unscanned.test", &[]).await;

    let report = sqlite_engine(&pool)
        .site_report("acme.com")
        .await
        .expect("report");

    assert!(report.found);
    assert_eq!(
        report.settings.get("x-frame-options"),
        Some(&HeaderEntry::Measured {
            value: Some("DENY".into()),
            percent: 25.0,
        })
    );
    assert_eq!(report.settings.len(), 1);
    assert!(report.notices.is_empty());
}

#[tokio::test]
async fn test_untracked_site_yields_not_found_report() {
    let pool = create_test_pool().await;
    seed_site(&pool, "known.test", &[(XFO, Some("DENY"))]).await;

    let engine = sqlite_engine(&pool);
    let settings = engine
        .lookup
        .settings_for("unknown-site.test")
        .await
        .expect("settings");
    assert!(settings.is_empty());

    let report = engine
        .site_report("unknown-site.test")
        .await
        .expect("report");
    assert!(!report.found);
    assert_eq!(report.notices, vec![Notice::NotFound]);
    assert!(report.settings.is_empty());
}

#[tokio::test]
async fn test_tracked_site_without_catalog_headers_is_found() {
    let pool = create_test_pool().await;
    seed_site(&pool, "acme.com", &[(XFO, Some("DENY"))]).await;
    seed_site(&pool, "d.test", &[]).await;
    seed_site(&pool, "custom.test", &[("Permissions-Policy", Some("camera=()"))]).await;

    let engine = sqlite_engine(&pool);
    assert_eq!(engine.total_sites().await.expect("total"), 3);
    for site in ["d.test", "custom.test"] {
        let report = engine.site_report(site).await.expect("report");
        assert!(report.found, "{site}");
        assert_eq!(report.notices, vec![Notice::NotSet], "{site}");
        assert!(report.settings.is_empty(), "{site}");
    }
}

#[tokio::test]
async fn test_non_ascii_site_is_found_regardless_of_ascii_case() {
    let pool = create_test_pool().await;
    seed_site(&pool, "BÜCHER.de", &[(XFO, Some("DENY"))]).await;

    let engine = sqlite_engine(&pool);
    for query in ["BÜCHER.de", "bÜcher.de", "BÜCHER.DE "] {
        let report = engine.site_report(query).await.expect("report");
        assert!(report.found, "{query}");
        assert_eq!(report.settings["x-frame-options"].percent(), Some(100.0));
    }
}

#[tokio::test]
async fn test_site_lookup_ignores_case_and_whitespace() {
    let pool = create_test_pool().await;
    seed_site(&pool, "example.com", &[(XFO, Some("DENY")), (CSP, None)]).await;

    let engine = sqlite_engine(&pool);
    let lower = engine
        .lookup
        .settings_for("example.com")
        .await
        .expect("lower");
    let mixed = engine
        .lookup
        .settings_for("  Example.COM ")
        .await
        .expect("mixed");
    assert_eq!(lower.len(), 2);
    assert_eq!(lower, mixed);
}

#[tokio::test]
async fn test_not_sent_header_is_reported_as_null_value() {
    let pool = create_test_pool().await;
    seed_site(&pool, "bare.test", &[(CSP, None), (XFO, Some("DENY"))]).await;
    seed_site(&pool, "strict.test", &[(CSP, Some("default-src 'none'"))]).await;

    let report = sqlite_engine(&pool)
        .site_report("bare.test")
        .await
        .expect("report");

    assert_eq!(
        report.settings.get("content-security-policy"),
        Some(&HeaderEntry::Measured {
            value: None,
            percent: 50.0,
        })
    );
    assert_eq!(report.notices, vec![Notice::NotSet]);
    // Never recorded, so absent rather than null.
    assert!(!report.settings.contains_key("referrer-policy"));
}

#[tokio::test]
async fn test_duplicate_records_keep_the_first_value() {
    let pool = create_test_pool().await;
    let dup = insert_site(&pool, "dup.test").await;
    insert_header(&pool, dup, XFO, Some("DENY")).await;
    insert_header(&pool, dup, XFO, Some("SAMEORIGIN")).await;
    seed_site(&pool, "other.test", &[(XFO, Some("SAMEORIGIN"))]).await;

    let engine = sqlite_engine(&pool);
    let report = engine.site_report("dup.test").await.expect("report");
    assert_eq!(report.settings["x-frame-options"].value(), Some("DENY"));
    assert_eq!(report.settings["x-frame-options"].percent(), Some(50.0));

    let distribution = engine
        .aggregate
        .distribution_for(HeaderKind::FrameOptions)
        .await
        .expect("distribution");
    let counted: u64 = distribution.buckets.iter().map(|b| b.count).sum();
    assert_eq!(counted, distribution.total_sites);
    assert_eq!(distribution.total_sites, 2);
}

#[tokio::test]
async fn test_distribution_order_is_independent_of_insert_order() {
    let forward = create_test_pool().await;
    let backward = create_test_pool().await;
    let rows = [
        ("a.test", Some("no-referrer")),
        ("b.test", Some("same-origin")),
        ("c.test", Some("no-referrer")),
        ("d.test", None),
        ("e.test", Some("origin")),
    ];
    for (site, value) in rows {
        seed_site(&forward, site, &[("Referrer-Policy", value)]).await;
    }
    for (site, value) in rows.iter().rev() {
        seed_site(&backward, site, &[("Referrer-Policy", *value)]).await;
    }

    let first = sqlite_engine(&forward)
        .header_chart(HeaderKind::ReferrerPolicy)
        .await
        .expect("forward chart");
    let second = sqlite_engine(&backward)
        .header_chart(HeaderKind::ReferrerPolicy)
        .await
        .expect("backward chart");

    assert_eq!(first, second);
    assert_eq!(
        first.labels,
        vec!["no-referrer", "(not set)", "origin", "same-origin"]
    );
    assert_eq!(first.counts, vec![2, 1, 1, 1]);
    assert_eq!(first.total_sites, 5);
}

#[tokio::test]
async fn test_empty_dataset_has_zero_percentages() {
    let pool = create_test_pool().await;
    let engine = sqlite_engine(&pool);

    let percent = engine
        .aggregate
        .percent_for(HeaderKind::StrictTransportSecurity, Some("max-age=31536000"))
        .await
        .expect("percent");
    assert_eq!(percent, 0.0);

    let chart = engine
        .header_chart(HeaderKind::StrictTransportSecurity)
        .await
        .expect("chart");
    assert_eq!(chart.total_sites, 0);
    assert!(chart.labels.is_empty());
    assert_eq!(engine.total_sites().await.expect("total"), 0);
}

#[tokio::test]
async fn test_hostile_site_identifier_is_just_a_lookup_key() {
    let pool = create_test_pool().await;
    seed_site(&pool, "victim.test", &[(XFO, Some("DENY"))]).await;

    let engine = sqlite_engine(&pool);
    let report = engine
        .site_report("x' OR '1'='1")
        .await
        .expect("report");
    assert!(!report.found);
    assert_eq!(engine.total_sites().await.expect("total"), 1);
}
