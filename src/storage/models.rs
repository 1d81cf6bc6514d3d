// storage/models.rs
// Row types returned by the scan dataset

/// One recorded header for a site, in recording order.
///
/// `header_value == None` means the site was scanned and does not send the
/// header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub header_name: String,
    pub header_value: Option<String>,
}

/// Number of sites whose first record for a header carries `header_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCountRow {
    pub header_value: Option<String>,
    pub sites: u64,
}

/// Result of a single (header, value) share query.
///
/// `total` is the number of sites with any record for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairCount {
    pub matching: u64,
    pub total: u64,
}
