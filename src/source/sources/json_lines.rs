use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::constants::source::DEFAULT_JSON_SOURCE_ID;
use crate::data::VideoRecord;
use crate::errors::CatalogError;
use crate::source::{SourceCursor, SourceSnapshot, VideoSource};
use crate::transport::fs::FileStream;
use crate::types::SourceId;

/// Configuration for a file-backed JSON video source.
#[derive(Clone, Debug)]
pub struct JsonLinesSourceConfig {
    /// Stable source identifier used in errors and logs.
    pub source_id: SourceId,
    /// A single document file, or a directory walked for `.jsonl`/`.json` files.
    pub path: PathBuf,
    /// Whether to follow symlinks while walking a directory.
    pub follow_links: bool,
}

impl JsonLinesSourceConfig {
    /// Create a config with explicit id and path.
    pub fn new(source_id: impl Into<SourceId>, path: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            path: path.into(),
            follow_links: true,
        }
    }

    /// Override whether symlinks are followed during directory walks.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

/// Video source backed by exported collection documents on disk.
///
/// Each file holds either a JSON array of documents or one document per line.
/// A refresh without a cursor re-reads the files so callers see current state.
/// Continuation pages are served from the records parsed by that first
/// refresh, so one paging pass reads each file once and sees one consistent
/// snapshot. The snapshot is released once a short page ends the pass.
pub struct JsonLinesSource {
    config: JsonLinesSourceConfig,
    snapshot: Mutex<SnapshotCache>,
}

/// Records parsed by the latest cursorless refresh.
#[derive(Default)]
struct SnapshotCache {
    generation: u64,
    records: Option<Arc<Vec<VideoRecord>>>,
}

impl JsonLinesSource {
    /// Create a source from configuration.
    pub fn new(config: JsonLinesSourceConfig) -> Self {
        Self {
            config,
            snapshot: Mutex::new(SnapshotCache::default()),
        }
    }

    /// Create a source for `path` using the default source id.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonLinesSourceConfig::new(DEFAULT_JSON_SOURCE_ID, path))
    }

    /// Access the source configuration.
    pub fn config(&self) -> &JsonLinesSourceConfig {
        &self.config
    }

    fn files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        if !self.config.path.exists() {
            return Err(self.unavailable(format!(
                "path not found: {}",
                self.config.path.display()
            )));
        }
        let files = FileStream::new(&self.config.path)
            .with_follow_symlinks(self.config.follow_links)
            .json_files()
            .map_err(|err| self.unavailable(err.to_string()))?;
        if files.is_empty() {
            warn!(
                source = %self.config.source_id,
                path = %self.config.path.display(),
                "no JSON document files found"
            );
        }
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<String, CatalogError> {
        fs::read_to_string(path)
            .map_err(|err| self.unavailable(format!("{}: {err}", path.display())))
    }

    /// Parse every record in source order.
    fn read_all(&self) -> Result<Vec<VideoRecord>, CatalogError> {
        let mut records = Vec::new();
        for path in self.files()? {
            let body = self.read_file(&path)?;
            debug!(source = %self.config.source_id, file = %path.display(), "reading documents");
            if is_json_array(&body) {
                let parsed: Vec<VideoRecord> = serde_json::from_str(&body)
                    .map_err(|err| self.inconsistent(format!("{}: {err}", path.display())))?;
                records.extend(parsed);
                continue;
            }
            for (line_idx, line) in body.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let record: VideoRecord = serde_json::from_str(line).map_err(|err| {
                    self.inconsistent(format!(
                        "{} line {}: {err}",
                        path.display(),
                        line_idx + 1
                    ))
                })?;
                records.push(record);
            }
        }
        Ok(records)
    }

    fn lock_snapshot(&self) -> Result<MutexGuard<'_, SnapshotCache>, CatalogError> {
        self.snapshot
            .lock()
            .map_err(|_| self.unavailable("json source snapshot lock poisoned".to_string()))
    }

    /// Records a page starting at `cursor` should be cut from, and the
    /// generation they belong to.
    fn snapshot_for(
        &self,
        cursor: Option<&SourceCursor>,
    ) -> Result<(Arc<Vec<VideoRecord>>, u64), CatalogError> {
        if let Some(cursor) = cursor {
            let cache = self.lock_snapshot()?;
            if let Some(records) = cache
                .records
                .as_ref()
                .filter(|_| cache.generation == cursor.generation)
            {
                return Ok((Arc::clone(records), cache.generation));
            }
        }
        // New pass, or a cursor whose snapshot is gone: read current state.
        let records = Arc::new(self.read_all()?);
        let mut cache = self.lock_snapshot()?;
        cache.generation = cache.generation.wrapping_add(1);
        cache.records = Some(Arc::clone(&records));
        Ok((records, cache.generation))
    }

    fn release_snapshot(&self, generation: u64) -> Result<(), CatalogError> {
        let mut cache = self.lock_snapshot()?;
        if cache.generation == generation {
            cache.records = None;
        }
        Ok(())
    }

    fn unavailable(&self, reason: String) -> CatalogError {
        CatalogError::SourceUnavailable {
            source_id: self.config.source_id.clone(),
            reason,
        }
    }

    fn inconsistent(&self, details: String) -> CatalogError {
        CatalogError::SourceInconsistent {
            source_id: self.config.source_id.clone(),
            details,
        }
    }
}

impl VideoSource for JsonLinesSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn refresh(
        &self,
        cursor: Option<&SourceCursor>,
        limit: Option<usize>,
    ) -> Result<SourceSnapshot, CatalogError> {
        let Some(max) = limit else {
            // Unbounded reads never need a continuation.
            let start = cursor.map(|cursor| cursor.revision as usize).unwrap_or(0);
            let records: Vec<VideoRecord> = self.read_all()?.into_iter().skip(start).collect();
            let next = start + records.len();
            return Ok(SourceSnapshot {
                records,
                cursor: SourceCursor {
                    revision: next as u64,
                    generation: 0,
                },
            });
        };
        let (snapshot, generation) = self.snapshot_for(cursor)?;
        let total = snapshot.len();
        let start = cursor
            .map(|cursor| cursor.revision as usize)
            .unwrap_or(0)
            .min(total);
        let end = start.saturating_add(max).min(total);
        let records = snapshot[start..end].to_vec();
        if max == 0 || records.len() < max {
            self.release_snapshot(generation)?;
        }
        Ok(SourceSnapshot {
            records,
            cursor: SourceCursor {
                revision: end as u64,
                generation,
            },
        })
    }

    fn reported_record_count(&self) -> Result<u128, CatalogError> {
        Ok(self.read_all()?.len() as u128)
    }
}

fn is_json_array(body: &str) -> bool {
    body.trim_start().starts_with('[')
}
