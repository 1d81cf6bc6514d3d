//! Value distributions (histograms) of one header kind across tracked sites.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::HeaderKind;

/// Share of `count` in `total` as a percentage, `0.0` when `total` is zero.
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}

/// One distinct recorded value and how many sites use it.
///
/// `value == None` is the bucket of sites scanned for the header that do not
/// send it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub value: Option<String>,
    pub count: u64,
    pub percent: f64,
}

/// Histogram of recorded values for one header kind.
///
/// `total_sites` counts sites with any record for the header, configured or
/// explicitly absent. Sites never scanned for the header are not part of the
/// denominator. Buckets are ordered by descending count, then by value, so
/// the same data always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDistribution {
    #[serde(serialize_with = "serialize_kind_id")]
    pub header: HeaderKind,
    pub buckets: Vec<Bucket>,
    pub total_sites: u64,
}

fn serialize_kind_id<S: serde::Serializer>(kind: &HeaderKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.id())
}

impl ValueDistribution {
    /// Builds a distribution from per-value site counts.
    ///
    /// Each site must be counted under exactly one value, so `total_sites` is
    /// the sum of the counts. Repeated values are merged and zero counts are
    /// dropped. Input order has no effect on the result.
    pub fn from_counts(header: HeaderKind, counts: Vec<(Option<String>, u64)>) -> Self {
        let mut merged: BTreeMap<Option<String>, u64> = BTreeMap::new();
        for (value, count) in counts {
            if count > 0 {
                *merged.entry(value).or_insert(0) += count;
            }
        }

        let total_sites: u64 = merged.values().sum();
        let mut buckets: Vec<Bucket> = merged
            .into_iter()
            .map(|(value, count)| Bucket {
                percent: percent_of(count, total_sites),
                value,
                count,
            })
            .collect();
        buckets.sort_by(compare_buckets);

        ValueDistribution {
            header,
            buckets,
            total_sites,
        }
    }
}

fn compare_buckets(a: &Bucket, b: &Bucket) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value))
}
