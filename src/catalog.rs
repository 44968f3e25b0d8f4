//! Analytical query catalog over video records.
//!
//! Every query is a pure function of the record slice it receives:
//! - grouped queries emit one row per distinct key, in first-encounter order;
//! - ranking queries use a stable descending sort, so ties keep input order;
//! - absent metric values are skipped by means, sums, and extremes, and rank
//!   below every present value.
//!
//! `Catalog` binds the same queries to a `VideoSource` handle owned by the
//! caller, loading current records on each call.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::config::CatalogConfig;
use crate::constants::catalog::{TOP_COMMENTED_LIMIT, TOP_UPLOADER_LIMIT};
use crate::data::{
    CategoryEngagement, CategoryLength, CategoryRating, CategoryTopVideo, CategoryViews,
    UploaderViews, VideoComments, VideoRecord, VideoViews, ViewStatistics,
};
use crate::errors::CatalogError;
use crate::source::{VideoSource, load_records};

/// Running mean that ignores absent values.
#[derive(Clone, Copy, Debug, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn finish(self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Group `records` by `key`, folding each group into an accumulator.
fn group_by<'a, K, A>(
    records: &'a [VideoRecord],
    key: impl Fn(&'a VideoRecord) -> K,
    mut fold: impl FnMut(&mut A, &'a VideoRecord),
) -> IndexMap<K, A>
where
    K: std::hash::Hash + Eq,
    A: Default,
{
    let mut groups: IndexMap<K, A> = IndexMap::new();
    for record in records {
        fold(groups.entry(key(record)).or_default(), record);
    }
    groups
}

/// Count as a sum term; absent counts contribute nothing.
///
/// Sums run in `u128` so totals of `u64` counts cannot overflow.
fn widen(count: Option<u64>) -> u128 {
    count.map_or(0, u128::from)
}

/// Stable descending order on an optional metric; absent values sort last.
fn descending<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    right.cmp(&left)
}

/// Records ordered by `metric` descending, ties in input order.
fn ranked_by<'a>(
    records: &'a [VideoRecord],
    metric: impl Fn(&VideoRecord) -> Option<u64>,
) -> Vec<&'a VideoRecord> {
    let mut ranked: Vec<&VideoRecord> = records.iter().collect();
    ranked.sort_by(|a, b| descending(metric(*a), metric(*b)));
    ranked
}

/// Mean, maximum, and minimum `views` across the whole collection.
///
/// Fails with `NoData` when no record carries a view count.
pub fn view_statistics(records: &[VideoRecord]) -> Result<ViewStatistics, CatalogError> {
    let mut views = records.iter().filter_map(|record| record.views);
    let Some(first) = views.next() else {
        return Err(CatalogError::NoData(
            "view statistics require at least one record with views".into(),
        ));
    };
    let (mut total, mut count) = (u128::from(first), 1u64);
    let (mut max_views, mut min_views) = (first, first);
    for value in views {
        total += u128::from(value);
        count += 1;
        max_views = max_views.max(value);
        min_views = min_views.min(value);
    }
    Ok(ViewStatistics {
        avg_views: total as f64 / count as f64,
        max_views,
        min_views,
    })
}

/// Mean `rate` per category.
pub fn avg_rating_by_category(records: &[VideoRecord]) -> Vec<CategoryRating> {
    group_by(
        records,
        |record| record.category.as_str(),
        |mean: &mut Mean, record| mean.push(record.rate),
    )
    .into_iter()
    .map(|(category, mean)| CategoryRating {
        category: category.to_string(),
        avg_rating: mean.finish(),
    })
    .collect()
}

/// Summed `comments` and `ratings` per category.
pub fn comments_and_ratings_by_category(records: &[VideoRecord]) -> Vec<CategoryEngagement> {
    group_by(
        records,
        |record| record.category.as_str(),
        |totals: &mut (u128, u128), record| {
            totals.0 += widen(record.comments);
            totals.1 += widen(record.ratings);
        },
    )
    .into_iter()
    .map(|(category, (total_comments, total_ratings))| CategoryEngagement {
        category: category.to_string(),
        total_comments,
        total_ratings,
    })
    .collect()
}

/// Mean `length` per category.
pub fn avg_length_by_category(records: &[VideoRecord]) -> Vec<CategoryLength> {
    group_by(
        records,
        |record| record.category.as_str(),
        |mean: &mut Mean, record| mean.push(record.length),
    )
    .into_iter()
    .map(|(category, mean)| CategoryLength {
        category: category.to_string(),
        avg_length: mean.finish(),
    })
    .collect()
}

/// Mean `views` per video, per category.
pub fn avg_views_by_category(records: &[VideoRecord]) -> Vec<CategoryViews> {
    group_by(
        records,
        |record| record.category.as_str(),
        |mean: &mut Mean, record| mean.push(record.views.map(|views| views as f64)),
    )
    .into_iter()
    .map(|(category, mean)| CategoryViews {
        category: category.to_string(),
        avg_views: mean.finish(),
    })
    .collect()
}

/// The `top_n` most viewed videos, highest first.
///
/// Returns `min(top_n, records.len())` rows. `top_n == 0` is rejected.
pub fn most_viewed_videos(
    records: &[VideoRecord],
    top_n: usize,
) -> Result<Vec<VideoViews>, CatalogError> {
    if top_n == 0 {
        return Err(CatalogError::Configuration(
            "top_n must be a positive integer".into(),
        ));
    }
    Ok(ranked_by(records, |record| record.views)
        .into_iter()
        .take(top_n)
        .map(VideoViews::from)
        .collect())
}

/// The highest-viewed video of every category.
///
/// Sorts the whole collection by views first, then keeps the first record
/// seen per category. Rows come out in that sorted encounter order.
pub fn most_viewed_per_category(records: &[VideoRecord]) -> Vec<CategoryTopVideo> {
    let mut firsts: IndexMap<&str, &VideoRecord> = IndexMap::new();
    for record in ranked_by(records, |record| record.views) {
        firsts.entry(record.category.as_str()).or_insert(record);
    }
    firsts.into_values().map(CategoryTopVideo::from).collect()
}

/// The uploader with the largest summed `views`.
///
/// Fails with `NoData` on an empty collection.
pub fn top_uploader_by_views(records: &[VideoRecord]) -> Result<UploaderViews, CatalogError> {
    let mut totals: Vec<(&str, u128)> = group_by(
        records,
        |record| record.uploader.as_str(),
        |total: &mut u128, record| *total += widen(record.views),
    )
    .into_iter()
    .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .take(TOP_UPLOADER_LIMIT)
        .map(|(uploader, total_views)| UploaderViews {
            uploader: uploader.to_string(),
            total_views,
        })
        .next()
        .ok_or_else(|| CatalogError::NoData("top uploader requires at least one record".into()))
}

/// The five most commented videos, highest first.
pub fn top_commented_videos(records: &[VideoRecord]) -> Vec<VideoComments> {
    ranked_by(records, |record| record.comments)
        .into_iter()
        .take(TOP_COMMENTED_LIMIT)
        .map(VideoComments::from)
        .collect()
}

/// Catalog queries bound to a caller-owned `VideoSource`.
///
/// Each method reloads the source, so results always reflect current state.
pub struct Catalog<'a> {
    source: &'a dyn VideoSource,
    config: CatalogConfig,
}

impl<'a> Catalog<'a> {
    /// Bind the catalog to `source` with default configuration.
    pub fn new(source: &'a dyn VideoSource) -> Self {
        Self {
            source,
            config: CatalogConfig::default(),
        }
    }

    /// Replace the catalog configuration.
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The bound source.
    pub fn source(&self) -> &'a dyn VideoSource {
        self.source
    }

    /// Load every record currently held by the source.
    pub fn records(&self) -> Result<Vec<VideoRecord>, CatalogError> {
        load_records(self.source, self.config.page_size)
    }

    /// See [`view_statistics`].
    pub fn view_statistics(&self) -> Result<ViewStatistics, CatalogError> {
        view_statistics(&self.records()?)
    }

    /// See [`avg_rating_by_category`].
    pub fn avg_rating_by_category(&self) -> Result<Vec<CategoryRating>, CatalogError> {
        Ok(avg_rating_by_category(&self.records()?))
    }

    /// See [`comments_and_ratings_by_category`].
    pub fn comments_and_ratings_by_category(
        &self,
    ) -> Result<Vec<CategoryEngagement>, CatalogError> {
        Ok(comments_and_ratings_by_category(&self.records()?))
    }

    /// See [`avg_length_by_category`].
    pub fn avg_length_by_category(&self) -> Result<Vec<CategoryLength>, CatalogError> {
        Ok(avg_length_by_category(&self.records()?))
    }

    /// See [`avg_views_by_category`].
    pub fn avg_views_by_category(&self) -> Result<Vec<CategoryViews>, CatalogError> {
        Ok(avg_views_by_category(&self.records()?))
    }

    /// Most viewed videos using the configured `top_n`.
    pub fn most_viewed_videos(&self) -> Result<Vec<VideoViews>, CatalogError> {
        self.most_viewed_videos_top(self.config.top_n)
    }

    /// Most viewed videos with an explicit `top_n`.
    pub fn most_viewed_videos_top(&self, top_n: usize) -> Result<Vec<VideoViews>, CatalogError> {
        most_viewed_videos(&self.records()?, top_n)
    }

    /// See [`most_viewed_per_category`].
    pub fn most_viewed_per_category(&self) -> Result<Vec<CategoryTopVideo>, CatalogError> {
        Ok(most_viewed_per_category(&self.records()?))
    }

    /// See [`top_uploader_by_views`].
    pub fn top_uploader_by_views(&self) -> Result<UploaderViews, CatalogError> {
        top_uploader_by_views(&self.records()?)
    }

    /// See [`top_commented_videos`].
    pub fn top_commented_videos(&self) -> Result<Vec<VideoComments>, CatalogError> {
        Ok(top_commented_videos(&self.records()?))
    }
}
