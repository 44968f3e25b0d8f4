//! Video source interfaces and paging helpers.
//!
//! Ownership model:
//! - `VideoSource` is the catalog-facing handle that produces record pages.
//! - The host owns the source and passes it into each `Catalog` call; the
//!   catalog never keeps a source alive between invocations.
//! - `load_records` drains a source page by page, re-reading current state on
//!   every call.

use std::sync::Arc;

use tracing::debug;

use crate::data::VideoRecord;
use crate::errors::CatalogError;
use crate::types::SourceId;

/// Source implementation modules.
pub mod sources;
pub use sources::json_lines::{JsonLinesSource, JsonLinesSourceConfig};

/// Source-owned paging position.
///
/// `revision` and `generation` are opaque to callers and interpreted only by
/// the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceCursor {
    /// Paging position token used to continue reading.
    pub revision: u64,
    /// Snapshot the position belongs to. Sources that page over live state
    /// leave this at zero.
    pub generation: u64,
}

/// Result of a single source refresh call.
///
/// Pass the returned `cursor` back into the next refresh to continue paging.
#[derive(Clone, Debug)]
pub struct SourceSnapshot {
    /// Records returned by the refresh operation, in source order.
    pub records: Vec<VideoRecord>,
    /// Next cursor to pass into a future refresh call.
    pub cursor: SourceCursor,
}

/// Catalog-facing record source.
///
/// For a fixed dataset state and cursor, refresh output must be deterministic.
/// A page shorter than the requested `limit` marks the end of the source.
pub trait VideoSource: Send + Sync {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;

    /// Fetch up to `limit` records starting from `cursor` state.
    ///
    /// `limit == None` returns every remaining record.
    fn refresh(
        &self,
        cursor: Option<&SourceCursor>,
        limit: Option<usize>,
    ) -> Result<SourceSnapshot, CatalogError>;

    /// Exact record count reported by the source.
    ///
    /// Return `Err` when the source is unavailable or cannot be read.
    fn reported_record_count(&self) -> Result<u128, CatalogError>;
}

/// Drain `source` into memory, `page_size` records at a time.
pub fn load_records(
    source: &dyn VideoSource,
    page_size: usize,
) -> Result<Vec<VideoRecord>, CatalogError> {
    if page_size == 0 {
        return Err(CatalogError::Configuration(
            "page_size must be a positive integer".into(),
        ));
    }
    let mut records = Vec::new();
    let mut cursor: Option<SourceCursor> = None;
    let mut pages = 0usize;
    loop {
        let snapshot = source.refresh(cursor.as_ref(), Some(page_size))?;
        pages += 1;
        let fetched = snapshot.records.len();
        records.extend(snapshot.records);
        if fetched < page_size {
            break;
        }
        cursor = Some(snapshot.cursor);
    }
    debug!(
        source = source.id(),
        records = records.len(),
        pages,
        "loaded video records"
    );
    Ok(records)
}

/// In-memory video source for tests and small datasets.
pub struct InMemorySource {
    id: SourceId,
    records: Arc<Vec<VideoRecord>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<VideoRecord>) -> Self {
        Self {
            id: id.into(),
            records: Arc::new(records),
        }
    }
}

impl VideoSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn refresh(
        &self,
        cursor: Option<&SourceCursor>,
        limit: Option<usize>,
    ) -> Result<SourceSnapshot, CatalogError> {
        let records = &*self.records;
        let total = records.len();
        let start = cursor
            .map(|cursor| cursor.revision as usize)
            .unwrap_or(0)
            .min(total);
        let max = limit.unwrap_or(total);
        let end = start.saturating_add(max).min(total);
        Ok(SourceSnapshot {
            records: records[start..end].to_vec(),
            cursor: SourceCursor {
                revision: end as u64,
                generation: 0,
            },
        })
    }

    fn reported_record_count(&self) -> Result<u128, CatalogError> {
        Ok(self.records.len() as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(count: usize) -> Vec<VideoRecord> {
        (0..count)
            .map(|idx| {
                VideoRecord::new(format!("video_{idx}"), "uploader", "Music").with_views(idx as u64)
            })
            .collect()
    }

    /// Source that fails every refresh.
    struct BrokenSource;

    impl VideoSource for BrokenSource {
        fn id(&self) -> &str {
            "broken"
        }

        fn refresh(
            &self,
            _cursor: Option<&SourceCursor>,
            _limit: Option<usize>,
        ) -> Result<SourceSnapshot, CatalogError> {
            Err(CatalogError::SourceUnavailable {
                source_id: self.id().to_string(),
                reason: "connection refused".into(),
            })
        }

        fn reported_record_count(&self) -> Result<u128, CatalogError> {
            Err(CatalogError::SourceUnavailable {
                source_id: self.id().to_string(),
                reason: "connection refused".into(),
            })
        }
    }

    #[test]
    fn in_memory_source_pages_in_order() {
        let source = InMemorySource::new("memory", fixture(5));
        let first = source.refresh(None, Some(2)).unwrap();
        assert_eq!(first.records.len(), 2);
        assert_eq!(first.cursor.revision, 2);

        let second = source.refresh(Some(&first.cursor), Some(2)).unwrap();
        let third = source.refresh(Some(&second.cursor), Some(2)).unwrap();
        assert_eq!(third.records.len(), 1);
        assert_eq!(third.records[0].video_id, "video_4");

        let past_end = source.refresh(Some(&third.cursor), Some(2)).unwrap();
        assert!(past_end.records.is_empty());
    }

    #[test]
    fn load_records_drains_every_page() {
        let source = InMemorySource::new("memory", fixture(7));
        for page_size in [1, 3, 7, 100] {
            let records = load_records(&source, page_size).unwrap();
            let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
            assert_eq!(ids.len(), 7, "page_size={page_size}");
            assert_eq!(ids[0], "video_0");
            assert_eq!(ids[6], "video_6");
        }
    }

    #[test]
    fn load_records_handles_exact_page_multiples_and_empty_sources() {
        let source = InMemorySource::new("memory", fixture(4));
        assert_eq!(load_records(&source, 2).unwrap().len(), 4);

        let empty = InMemorySource::new("empty", Vec::new());
        assert!(load_records(&empty, 2).unwrap().is_empty());
        assert_eq!(empty.reported_record_count().unwrap(), 0);
    }

    #[test]
    fn load_records_rejects_zero_page_size() {
        let source = InMemorySource::new("memory", fixture(1));
        assert!(matches!(
            load_records(&source, 0),
            Err(CatalogError::Configuration(_))
        ));
    }

    #[test]
    fn load_records_propagates_source_failures() {
        let err = load_records(&BrokenSource, 10).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::SourceUnavailable { ref source_id, .. } if source_id == "broken"
        ));
    }
}
