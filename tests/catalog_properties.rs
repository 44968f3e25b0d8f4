use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use viewstats::catalog::{
    avg_length_by_category, avg_rating_by_category, avg_views_by_category,
    comments_and_ratings_by_category, most_viewed_per_category, most_viewed_videos,
    top_commented_videos, top_uploader_by_views, view_statistics,
};
use viewstats::{Analysis, CatalogConfig, CatalogError, VideoRecord};

const CATEGORIES: [&str; 5] = ["Music", "Comedy", "News", "Sports", "Education"];
const UPLOADERS: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

fn random_collection(seed: u64, len: usize) -> Vec<VideoRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|idx| {
            let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
            let uploader = UPLOADERS[rng.random_range(0..UPLOADERS.len())];
            // Small view range forces plenty of ties.
            VideoRecord::new(format!("vid_{seed}_{idx}"), uploader, category)
                .with_views(rng.random_range(0..50))
                .with_comments(rng.random_range(0..20))
                .with_ratings(rng.random_range(0..100))
                .with_rate(rng.random_range(0.0..5.0))
                .with_length(rng.random_range(10.0..900.0))
        })
        .collect()
}

fn collections() -> Vec<Vec<VideoRecord>> {
    (0..24u64)
        .map(|seed| random_collection(seed, (seed as usize * 7) % 61 + 1))
        .collect()
}

fn distinct_categories(records: &[VideoRecord]) -> Vec<&str> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.category.as_str()) {
            seen.push(record.category.as_str());
        }
    }
    seen
}

#[test]
fn view_statistics_mean_lies_between_min_and_max() {
    for records in collections() {
        let stats = view_statistics(&records).unwrap();
        assert!(stats.min_views as f64 <= stats.avg_views);
        assert!(stats.avg_views <= stats.max_views as f64);
        let expected_max = records.iter().filter_map(|r| r.views).max().unwrap();
        assert_eq!(stats.max_views, expected_max);
    }
}

#[test]
fn grouped_queries_have_one_row_per_distinct_category() {
    for records in collections() {
        let categories = distinct_categories(&records);

        let ratings: Vec<String> = avg_rating_by_category(&records)
            .into_iter()
            .map(|row| row.category)
            .collect();
        let engagement: Vec<String> = comments_and_ratings_by_category(&records)
            .into_iter()
            .map(|row| row.category)
            .collect();
        let lengths: Vec<String> = avg_length_by_category(&records)
            .into_iter()
            .map(|row| row.category)
            .collect();
        let views: Vec<String> = avg_views_by_category(&records)
            .into_iter()
            .map(|row| row.category)
            .collect();

        for rows in [ratings, engagement, lengths, views] {
            assert_eq!(rows, categories);
        }
    }
}

#[test]
fn grouped_sums_and_means_match_direct_computation() {
    for records in collections() {
        for row in comments_and_ratings_by_category(&records) {
            let in_group = records.iter().filter(|r| r.category == row.category);
            let comments: u128 = in_group
                .clone()
                .filter_map(|r| r.comments)
                .map(u128::from)
                .sum();
            let ratings: u128 = in_group.filter_map(|r| r.ratings).map(u128::from).sum();
            assert_eq!(row.total_comments, comments);
            assert_eq!(row.total_ratings, ratings);
        }
        for row in avg_views_by_category(&records) {
            let values: Vec<u64> = records
                .iter()
                .filter(|r| r.category == row.category)
                .filter_map(|r| r.views)
                .collect();
            let expected = values.iter().sum::<u64>() as f64 / values.len() as f64;
            assert!((row.avg_views.unwrap() - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn most_viewed_videos_returns_bounded_non_increasing_rows() {
    for records in collections() {
        for top_n in [1, 2, 5, 10, 100] {
            let rows = most_viewed_videos(&records, top_n).unwrap();
            assert_eq!(rows.len(), top_n.min(records.len()));
            assert!(rows.windows(2).all(|pair| pair[0].views >= pair[1].views));
        }
    }
}

#[test]
fn ranking_ties_follow_input_order() {
    for records in collections() {
        let position: HashMap<&str, usize> = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.video_id.as_str(), idx))
            .collect();
        let rows = most_viewed_videos(&records, records.len()).unwrap();
        for pair in rows.windows(2) {
            if pair[0].views == pair[1].views {
                assert!(position[pair[0].video_id.as_str()] < position[pair[1].video_id.as_str()]);
            }
        }
    }
}

#[test]
fn most_viewed_per_category_picks_the_category_maximum() {
    for records in collections() {
        let rows = most_viewed_per_category(&records);
        assert_eq!(rows.len(), distinct_categories(&records).len());
        for row in rows {
            let max = records
                .iter()
                .filter(|r| r.category == row.category)
                .filter_map(|r| r.views)
                .max();
            assert_eq!(row.views, max);
            // First record in input order holding that maximum.
            let first = records
                .iter()
                .find(|r| r.category == row.category && r.views == max)
                .unwrap();
            assert_eq!(row.video_id, first.video_id);
        }
    }
}

#[test]
fn top_uploader_dominates_every_other_uploader() {
    for records in collections() {
        let mut totals: HashMap<&str, u128> = HashMap::new();
        for record in &records {
            *totals.entry(record.uploader.as_str()).or_default() +=
                u128::from(record.views.unwrap_or(0));
        }
        let top = top_uploader_by_views(&records).unwrap();
        assert_eq!(top.total_views, totals[top.uploader.as_str()]);
        assert!(totals.values().all(|total| *total <= top.total_views));
    }
}

#[test]
fn top_commented_videos_never_exceeds_five() {
    for records in collections() {
        let rows = top_commented_videos(&records);
        assert_eq!(rows.len(), records.len().min(5));
        assert!(rows.windows(2).all(|pair| pair[0].comments >= pair[1].comments));
    }
}

#[test]
fn every_analysis_is_idempotent() {
    let config = CatalogConfig::default();
    for records in collections() {
        for analysis in Analysis::ALL {
            let first = analysis.run(&records, &config).unwrap();
            let second = analysis.run(&records, &config).unwrap();
            assert_eq!(first, second, "{analysis}");
        }
    }
}

#[test]
fn empty_collection_behaviour() {
    assert!(matches!(view_statistics(&[]), Err(CatalogError::NoData(_))));
    assert!(matches!(
        top_uploader_by_views(&[]),
        Err(CatalogError::NoData(_))
    ));
    assert!(avg_views_by_category(&[]).is_empty());
    assert!(avg_rating_by_category(&[]).is_empty());
}
