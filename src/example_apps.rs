use std::env;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use serde_json::json;
use tracing::{info, warn};

use crate::analysis::Analysis;
use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::constants::catalog::DEFAULT_TOP_N;
use crate::constants::report::{DATA_PATH_ENV, DEFAULT_DATA_CANDIDATES};
use crate::constants::source::{DEFAULT_JSON_SOURCE_ID, DEFAULT_PAGE_SIZE};
use crate::report::timed_run;
use crate::source::{JsonLinesSource, JsonLinesSourceConfig, VideoSource};

type DynSource = Box<dyn VideoSource + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "video_report",
    disable_help_subcommand = true,
    about = "Run canned analyses over video records",
    long_about = "Load video records from JSON Lines or JSON array files and run one or more catalog analyses, reporting results and execution time.",
    after_help = "The data path is resolved in order by --data, the VIEWSTATS_DATA environment variable, then data/videos.jsonl."
)]
/// CLI for `video_report`.
///
/// Common usage:
/// - Run every analysis: `--data videos.jsonl`
/// - Run one analysis by name or menu label: `--analysis most-viewed-videos --top-n 10`
/// - Machine-readable output: `--format json`
struct VideoReportCli {
    #[arg(long, value_name = "PATH", help = "JSON Lines/JSON file or directory of them")]
    data: Option<PathBuf>,
    #[arg(
        long = "source-id",
        default_value = DEFAULT_JSON_SOURCE_ID,
        help = "Source id used in logs and errors"
    )]
    source_id: String,
    #[arg(
        long = "analysis",
        value_name = "NAME",
        value_parser = parse_analysis_arg,
        help = "Analysis to run, repeat as needed (default: all)"
    )]
    analyses: Vec<Analysis>,
    #[arg(
        long = "top-n",
        default_value_t = DEFAULT_TOP_N,
        value_parser = parse_positive_usize,
        help = "Row count for the most viewed videos ranking"
    )]
    top_n: usize,
    #[arg(
        long = "page-size",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_positive_usize,
        help = "Records requested per source page"
    )]
    page_size: usize,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,
    #[arg(long = "list-analyses", help = "Print available analyses and exit")]
    list_analyses: bool,
}

/// Run the `video_report` command line against JSON document files.
pub fn run_video_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_video_report_with(args_iter, build_json_source, &mut out)
}

/// Run `video_report` with a custom source builder and output sink.
pub fn run_video_report_with<I, Build, W>(
    args_iter: I,
    build_source: Build,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    Build: FnOnce(&str, PathBuf) -> DynSource,
    W: Write,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<VideoReportCli, _>(
        std::iter::once("video_report".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    if cli.list_analyses {
        for analysis in Analysis::ALL {
            writeln!(out, "{:<34} {}", analysis.slug(), analysis.label())?;
        }
        return Ok(());
    }

    let data_path = resolve_data_path(cli.data)?;
    let source = build_source(&cli.source_id, data_path);
    match source.reported_record_count() {
        Ok(records) => info!(source = source.id(), records, "video source ready"),
        Err(err) => warn!(source = source.id(), error = %err, "video source count unavailable"),
    }
    let config = CatalogConfig::default()
        .with_top_n(cli.top_n)
        .with_page_size(cli.page_size);
    config.validate()?;
    let catalog = Catalog::new(source.as_ref()).with_config(config);

    let analyses = if cli.analyses.is_empty() {
        Analysis::ALL.to_vec()
    } else {
        cli.analyses
    };

    let mut json_entries = Vec::new();
    for analysis in analyses {
        match timed_run(&catalog, analysis) {
            Ok(report) => match cli.format {
                OutputFormat::Text => {
                    writeln!(out, "=== {} ===", analysis.label())?;
                    for line in report.render_lines() {
                        writeln!(out, "{line}")?;
                    }
                    writeln!(out)?;
                }
                OutputFormat::Json => json_entries.push(serde_json::to_value(&report)?),
            },
            Err(err) => {
                warn!(analysis = analysis.slug(), error = %err, "analysis failed");
                match cli.format {
                    OutputFormat::Text => {
                        writeln!(out, "=== {} ===", analysis.label())?;
                        writeln!(out, "Error: An error occurred: {err}")?;
                        writeln!(out)?;
                    }
                    OutputFormat::Json => json_entries.push(json!({
                        "analysis": analysis.slug(),
                        "error": err.to_string(),
                    })),
                }
            }
        }
    }

    if cli.format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&json_entries)?)?;
    }
    Ok(())
}

fn build_json_source(source_id: &str, path: PathBuf) -> DynSource {
    Box::new(JsonLinesSource::new(JsonLinesSourceConfig::new(
        source_id, path,
    )))
}

fn resolve_data_path(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path);
        }
        return Err(format!("Data path not found: {}", path.display()).into());
    }

    if let Ok(value) = env::var(DATA_PATH_ENV) {
        let path = PathBuf::from(value);
        if path.exists() {
            return Ok(path);
        }
    }

    DEFAULT_DATA_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
        .ok_or_else(|| {
            format!("Could not locate video data; pass --data or set {DATA_PATH_ENV}.").into()
        })
}

fn parse_analysis_arg(raw: &str) -> Result<Analysis, String> {
    raw.parse::<Analysis>().map_err(|err| {
        format!("{err}; run with --list-analyses to see available names")
    })
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
