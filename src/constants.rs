/// Constants used by the query catalog.
pub mod catalog {
    /// Default row count for the most-viewed-videos ranking.
    pub const DEFAULT_TOP_N: usize = 5;
    /// Fixed row count for the top-commented-videos ranking.
    pub const TOP_COMMENTED_LIMIT: usize = 5;
    /// Row count for the top-uploader ranking.
    pub const TOP_UPLOADER_LIMIT: usize = 1;
}

/// Constants used by record sources.
pub mod source {
    /// Default number of records requested per source page.
    pub const DEFAULT_PAGE_SIZE: usize = 1_024;
    /// File extensions read by directory-backed JSON sources.
    pub const JSON_EXTENSIONS: [&str; 2] = ["jsonl", "json"];
    /// Default source id for JSON Lines sources.
    pub const DEFAULT_JSON_SOURCE_ID: &str = "videos";
}

/// Constants used by report rendering and the example runner.
pub mod report {
    /// Environment variable consulted for the data path when no `--data` is given.
    pub const DATA_PATH_ENV: &str = "VIEWSTATS_DATA";
    /// Fallback data paths probed in order.
    pub const DEFAULT_DATA_CANDIDATES: [&str; 2] = ["data/videos.jsonl", "../data/videos.jsonl"];
    /// Placeholder rendered for absent values.
    pub const ABSENT_VALUE: &str = "None";
}
