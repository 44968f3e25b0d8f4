#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Named analyses and their typed outputs.
pub mod analysis;
/// Analytical query catalog over video records.
pub mod catalog;
/// Catalog configuration types.
pub mod config;
/// Centralized constants used across the catalog, sources, and reports.
pub mod constants;
/// Video record and result row types.
pub mod data;
/// Reusable example runners shared by downstream crates.
pub mod example_apps;
/// Timed runs and report rendering.
pub mod report;
/// Video source traits and built-in sources.
pub mod source;
/// Input transports used by sources (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use analysis::{Analysis, AnalysisOutput};
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use data::{
    CategoryEngagement, CategoryLength, CategoryRating, CategoryTopVideo, CategoryViews,
    UploaderViews, VideoComments, VideoRecord, VideoViews, ViewStatistics,
};
pub use errors::CatalogError;
pub use report::{AnalysisReport, timed_run};
pub use source::{
    InMemorySource, JsonLinesSource, JsonLinesSourceConfig, SourceCursor, SourceSnapshot,
    VideoSource, load_records,
};
pub use types::{CategoryId, ReportLine, SourceId, UploaderId, VideoId};
