//! First-seen-wins deduplication by lower-cased school name.

use ahash::AHashSet;
use school_finder_sources::SchoolRecord;
use tracing::debug;

use crate::extract::Rejection;

/// Drop rejections and every record whose lower-cased name was already seen.
///
/// Later duplicates are discarded as-is, never merged into the first occurrence.
pub fn dedupe<I>(extracted: I) -> Vec<SchoolRecord>
where
    I: IntoIterator<Item = Result<SchoolRecord, Rejection>>,
{
    let mut seen = AHashSet::new();
    let mut rejected = 0usize;
    let mut duplicates = 0usize;

    let records: Vec<SchoolRecord> = extracted
        .into_iter()
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(_) => {
                rejected += 1;
                None
            }
        })
        .filter(|record| {
            let fresh = seen.insert(record.dedup_key());
            if !fresh {
                duplicates += 1;
            }
            fresh
        })
        .collect();

    debug!(kept = records.len(), rejected, duplicates, "Deduplicated extraction results");
    records
}
