use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog;
use crate::config::CatalogConfig;
use crate::data::{
    CategoryEngagement, CategoryLength, CategoryRating, CategoryTopVideo, CategoryViews,
    UploaderViews, VideoComments, VideoRecord, VideoViews, ViewStatistics,
};
use crate::errors::CatalogError;

/// The named analyses offered to end users, one per catalog query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Analysis {
    /// Platform-wide mean/max/min views.
    ViewStatistics,
    /// Mean rating per category.
    AvgRatingByCategory,
    /// Comment and rating totals per category.
    CommentsAndRatingsByCategory,
    /// Mean video length per category.
    AvgLengthByCategory,
    /// Mean views per video per category.
    AvgViewsByCategory,
    /// Top-N videos by views.
    MostViewedVideos,
    /// Highest-viewed video of each category.
    MostViewedPerCategory,
    /// Uploader with the most summed views.
    TopUploaderByViews,
    /// Five most commented videos.
    TopCommentedVideos,
}

impl Analysis {
    /// Every analysis, in menu order.
    pub const ALL: [Analysis; 9] = [
        Analysis::ViewStatistics,
        Analysis::AvgRatingByCategory,
        Analysis::CommentsAndRatingsByCategory,
        Analysis::AvgLengthByCategory,
        Analysis::AvgViewsByCategory,
        Analysis::MostViewedVideos,
        Analysis::MostViewedPerCategory,
        Analysis::TopUploaderByViews,
        Analysis::TopCommentedVideos,
    ];

    /// Menu label shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            Analysis::ViewStatistics => "Total View Statistics",
            Analysis::AvgRatingByCategory => "Average Rating by Category",
            Analysis::CommentsAndRatingsByCategory => "Total Comments and Ratings by Category",
            Analysis::AvgLengthByCategory => "Average Video Length by Category",
            Analysis::AvgViewsByCategory => "Average Views per Video by Category",
            Analysis::MostViewedVideos => "Most Viewed Videos",
            Analysis::MostViewedPerCategory => "Most Viewed Video in Each Category",
            Analysis::TopUploaderByViews => "Top Uploader by Views",
            Analysis::TopCommentedVideos => "Top Commented Videos",
        }
    }

    /// Command-line name.
    pub const fn slug(self) -> &'static str {
        match self {
            Analysis::ViewStatistics => "view-statistics",
            Analysis::AvgRatingByCategory => "avg-rating-by-category",
            Analysis::CommentsAndRatingsByCategory => "comments-and-ratings-by-category",
            Analysis::AvgLengthByCategory => "avg-length-by-category",
            Analysis::AvgViewsByCategory => "avg-views-by-category",
            Analysis::MostViewedVideos => "most-viewed-videos",
            Analysis::MostViewedPerCategory => "most-viewed-per-category",
            Analysis::TopUploaderByViews => "top-uploader-by-views",
            Analysis::TopCommentedVideos => "top-commented-videos",
        }
    }

    /// Resolve an exact menu label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|analysis| analysis.label() == label)
    }

    /// Run this analysis over `records`.
    pub fn run(
        self,
        records: &[VideoRecord],
        config: &CatalogConfig,
    ) -> Result<AnalysisOutput, CatalogError> {
        Ok(match self {
            Analysis::ViewStatistics => {
                AnalysisOutput::ViewStatistics(catalog::view_statistics(records)?)
            }
            Analysis::AvgRatingByCategory => {
                AnalysisOutput::AvgRatingByCategory(catalog::avg_rating_by_category(records))
            }
            Analysis::CommentsAndRatingsByCategory => AnalysisOutput::CommentsAndRatingsByCategory(
                catalog::comments_and_ratings_by_category(records),
            ),
            Analysis::AvgLengthByCategory => {
                AnalysisOutput::AvgLengthByCategory(catalog::avg_length_by_category(records))
            }
            Analysis::AvgViewsByCategory => {
                AnalysisOutput::AvgViewsByCategory(catalog::avg_views_by_category(records))
            }
            Analysis::MostViewedVideos => AnalysisOutput::MostViewedVideos(
                catalog::most_viewed_videos(records, config.top_n)?,
            ),
            Analysis::MostViewedPerCategory => {
                AnalysisOutput::MostViewedPerCategory(catalog::most_viewed_per_category(records))
            }
            Analysis::TopUploaderByViews => {
                AnalysisOutput::TopUploaderByViews(catalog::top_uploader_by_views(records)?)
            }
            Analysis::TopCommentedVideos => {
                AnalysisOutput::TopCommentedVideos(catalog::top_commented_videos(records))
            }
        })
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Analysis {
    type Err = CatalogError;

    /// Accepts a menu label or a command-line name, ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|analysis| {
                analysis.slug().eq_ignore_ascii_case(wanted)
                    || analysis.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CatalogError::Configuration(format!("unknown analysis '{wanted}'")))
    }
}

/// Typed result of one analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    /// Collection-wide view statistics.
    ViewStatistics(ViewStatistics),
    /// Mean rating per category.
    AvgRatingByCategory(Vec<CategoryRating>),
    /// Comment and rating totals per category.
    CommentsAndRatingsByCategory(Vec<CategoryEngagement>),
    /// Mean length per category.
    AvgLengthByCategory(Vec<CategoryLength>),
    /// Mean views per category.
    AvgViewsByCategory(Vec<CategoryViews>),
    /// Top-N videos by views.
    MostViewedVideos(Vec<VideoViews>),
    /// Highest-viewed video per category.
    MostViewedPerCategory(Vec<CategoryTopVideo>),
    /// Uploader with the most total views.
    TopUploaderByViews(UploaderViews),
    /// Five most commented videos.
    TopCommentedVideos(Vec<VideoComments>),
}

impl AnalysisOutput {
    /// Number of result rows.
    pub fn row_count(&self) -> usize {
        match self {
            AnalysisOutput::ViewStatistics(_) | AnalysisOutput::TopUploaderByViews(_) => 1,
            AnalysisOutput::AvgRatingByCategory(rows) => rows.len(),
            AnalysisOutput::CommentsAndRatingsByCategory(rows) => rows.len(),
            AnalysisOutput::AvgLengthByCategory(rows) => rows.len(),
            AnalysisOutput::AvgViewsByCategory(rows) => rows.len(),
            AnalysisOutput::MostViewedVideos(rows) => rows.len(),
            AnalysisOutput::MostViewedPerCategory(rows) => rows.len(),
            AnalysisOutput::TopCommentedVideos(rows) => rows.len(),
        }
    }
}
