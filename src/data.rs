use serde::{Deserialize, Serialize};

pub use crate::types::{CategoryId, UploaderId, VideoId};

/// Canonical video record produced by a `VideoSource`.
///
/// Identifier and grouping fields are required. Metric fields may be absent
/// in the source document; absent metrics are skipped by every aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Unique video identifier.
    #[serde(rename = "videoID")]
    pub video_id: VideoId,
    /// Account that uploaded the video.
    pub uploader: UploaderId,
    /// Category label used for grouped aggregates.
    pub category: CategoryId,
    /// Duration of the video.
    #[serde(default)]
    pub length: Option<f64>,
    /// Total view count.
    #[serde(default)]
    pub views: Option<u64>,
    /// Average rating (typically 0.0-5.0).
    #[serde(default)]
    pub rate: Option<f64>,
    /// Number of rating events.
    #[serde(default)]
    pub ratings: Option<u64>,
    /// Number of comments.
    #[serde(default)]
    pub comments: Option<u64>,
}

impl VideoRecord {
    /// Create a record with identifier and grouping fields and no metrics.
    pub fn new(
        video_id: impl Into<VideoId>,
        uploader: impl Into<UploaderId>,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            uploader: uploader.into(),
            category: category.into(),
            length: None,
            views: None,
            rate: None,
            ratings: None,
            comments: None,
        }
    }

    /// Set the video length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the view count.
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = Some(views);
        self
    }

    /// Set the average rating.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the rating-event count.
    pub fn with_ratings(mut self, ratings: u64) -> Self {
        self.ratings = Some(ratings);
        self
    }

    /// Set the comment count.
    pub fn with_comments(mut self, comments: u64) -> Self {
        self.comments = Some(comments);
        self
    }
}

/// Platform-wide view statistics.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStatistics {
    /// Mean view count over records that carry one.
    pub avg_views: f64,
    /// Largest view count.
    pub max_views: u64,
    /// Smallest view count.
    pub min_views: u64,
}

/// Mean rating for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRating {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub category: CategoryId,
    /// `None` when no record in the category carries a rating.
    pub avg_rating: Option<f64>,
}

/// Comment and rating totals for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEngagement {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub category: CategoryId,
    /// Sum of `comments`; absent counts add nothing.
    pub total_comments: u128,
    /// Sum of `ratings`; absent counts add nothing.
    pub total_ratings: u128,
}

/// Mean video length for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLength {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub category: CategoryId,
    /// `None` when no record in the category carries a length.
    pub avg_length: Option<f64>,
}

/// Mean views per video for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryViews {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub category: CategoryId,
    /// `None` when no record in the category carries views.
    pub avg_views: Option<f64>,
}

/// Projection returned by the most-viewed ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoViews {
    /// Video identifier.
    #[serde(rename = "videoID")]
    pub video_id: VideoId,
    /// Uploading account.
    pub uploader: UploaderId,
    /// Video category.
    pub category: CategoryId,
    /// View count, if recorded.
    pub views: Option<u64>,
}

/// Highest-viewed video within one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTopVideo {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub category: CategoryId,
    /// Video identifier.
    #[serde(rename = "videoID")]
    pub video_id: VideoId,
    /// Uploading account.
    pub uploader: UploaderId,
    /// View count, if recorded.
    pub views: Option<u64>,
    /// Average rating, if recorded.
    pub rate: Option<f64>,
    /// Comment count, if recorded.
    pub comments: Option<u64>,
}

/// Summed views for one uploader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderViews {
    /// Grouping key.
    #[serde(rename = "_id")]
    pub uploader: UploaderId,
    /// Sum of `views` over the uploader's records.
    pub total_views: u128,
}

/// Projection returned by the most-commented ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoComments {
    /// Video identifier.
    #[serde(rename = "videoID")]
    pub video_id: VideoId,
    /// Uploading account.
    pub uploader: UploaderId,
    /// Video category.
    pub category: CategoryId,
    /// Comment count, if recorded.
    pub comments: Option<u64>,
}

impl From<&VideoRecord> for VideoViews {
    fn from(record: &VideoRecord) -> Self {
        Self {
            video_id: record.video_id.clone(),
            uploader: record.uploader.clone(),
            category: record.category.clone(),
            views: record.views,
        }
    }
}

impl From<&VideoRecord> for VideoComments {
    fn from(record: &VideoRecord) -> Self {
        Self {
            video_id: record.video_id.clone(),
            uploader: record.uploader.clone(),
            category: record.category.clone(),
            comments: record.comments,
        }
    }
}

impl From<&VideoRecord> for CategoryTopVideo {
    fn from(record: &VideoRecord) -> Self {
        Self {
            category: record.category.clone(),
            video_id: record.video_id.clone(),
            uploader: record.uploader.clone(),
            views: record.views,
            rate: record.rate,
            comments: record.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_document_field_names() {
        let raw = r#"{"videoID":"abc","uploader":"u1","category":"Music","length":212,"views":1500,"rate":4.5,"ratings":30,"comments":12,"age":700}"#;
        let record: VideoRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.video_id, "abc");
        assert_eq!(record.length, Some(212.0));
        assert_eq!(record.views, Some(1500));
        assert_eq!(record.comments, Some(12));
    }

    #[test]
    fn record_treats_missing_and_null_metrics_as_absent() {
        let raw = r#"{"videoID":"abc","uploader":"u1","category":"Music","rate":null}"#;
        let record: VideoRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record, VideoRecord::new("abc", "u1", "Music"));
    }

    #[test]
    fn record_requires_grouping_fields() {
        let raw = r#"{"videoID":"abc","uploader":"u1","views":3}"#;
        assert!(serde_json::from_str::<VideoRecord>(raw).is_err());
    }

    #[test]
    fn result_rows_use_pipeline_field_names() {
        let row = UploaderViews {
            uploader: "u1".into(),
            total_views: 42,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["_id"], "u1");
        assert_eq!(value["totalViews"], 42);

        let stats = ViewStatistics {
            avg_views: 1.5,
            max_views: 2,
            min_views: 1,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["avgViews"], 1.5);
        assert_eq!(value["minViews"], 1);
    }
}
