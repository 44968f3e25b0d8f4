//! Timed analysis runs and their text/JSON rendering.

use std::fmt::Display;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::analysis::{Analysis, AnalysisOutput};
use crate::catalog::Catalog;
use crate::constants::report::ABSENT_VALUE;
use crate::errors::CatalogError;
use crate::types::ReportLine;

/// One completed analysis with its wall-clock duration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Analysis that produced this report.
    pub analysis: Analysis,
    /// Typed result rows.
    #[serde(rename = "result")]
    pub output: AnalysisOutput,
    /// Time spent loading records and computing the result.
    #[serde(rename = "elapsedSeconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Load current records through `catalog` and run `analysis`, timing both.
pub fn timed_run(catalog: &Catalog<'_>, analysis: Analysis) -> Result<AnalysisReport, CatalogError> {
    let started = Instant::now();
    let records = catalog.records()?;
    let output = analysis.run(&records, catalog.config())?;
    let elapsed = started.elapsed();
    info!(
        analysis = analysis.slug(),
        source = catalog.source().id(),
        records = records.len(),
        rows = output.row_count(),
        elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
        "analysis finished"
    );
    Ok(AnalysisReport {
        analysis,
        output,
        elapsed,
        generated_at: Utc::now(),
    })
}

impl AnalysisReport {
    /// Result lines followed by a blank line and the execution time.
    pub fn render_lines(&self) -> Vec<ReportLine> {
        let mut lines = render_output(&self.output);
        lines.push(String::new());
        lines.push(format!(
            "Execution Time: {:.4} seconds",
            self.elapsed.as_secs_f64()
        ));
        lines
    }

    /// Pretty-printed JSON document for this report.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render result rows as human-readable lines.
pub fn render_output(output: &AnalysisOutput) -> Vec<ReportLine> {
    match output {
        AnalysisOutput::ViewStatistics(stats) => vec![
            format!("Average Views: {:.2}", stats.avg_views),
            format!("Maximum Views: {}", stats.max_views),
            format!("Minimum Views: {}", stats.min_views),
        ],
        AnalysisOutput::AvgRatingByCategory(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Category: {}, Avg Rating: {}",
                    row.category,
                    fixed2(row.avg_rating)
                )
            })
            .collect(),
        AnalysisOutput::CommentsAndRatingsByCategory(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Category: {}, Total Comments: {}, Total Ratings: {}",
                    row.category, row.total_comments, row.total_ratings
                )
            })
            .collect(),
        AnalysisOutput::AvgLengthByCategory(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Category: {}, Avg Length: {}",
                    row.category,
                    fixed2(row.avg_length)
                )
            })
            .collect(),
        AnalysisOutput::AvgViewsByCategory(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Category: {}, Avg Views: {}",
                    row.category,
                    fixed2(row.avg_views)
                )
            })
            .collect(),
        AnalysisOutput::MostViewedVideos(rows) => rows
            .iter()
            .map(|row| format!("Video ID: {}, Views: {}", row.video_id, or_absent(row.views)))
            .collect(),
        AnalysisOutput::MostViewedPerCategory(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Category: {}, Video ID: {}, Views: {}",
                    row.category,
                    row.video_id,
                    or_absent(row.views)
                )
            })
            .collect(),
        AnalysisOutput::TopUploaderByViews(row) => vec![format!(
            "Uploader: {}, Total Views: {}",
            row.uploader, row.total_views
        )],
        AnalysisOutput::TopCommentedVideos(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "Video ID: {}, Comments: {}, Uploader: {}",
                    row.video_id,
                    or_absent(row.comments),
                    row.uploader
                )
            })
            .collect(),
    }
}

fn fixed2(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| ABSENT_VALUE.to_string())
}

fn or_absent<T: Display>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| ABSENT_VALUE.to_string())
}
