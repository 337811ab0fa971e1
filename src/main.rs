// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sensor_video_sync::config::{GroupMethod, SyncConfig};
use sensor_video_sync::constants::DEFAULT_ADMIN_COLUMNS;
use sensor_video_sync::crate_version;
use sensor_video_sync::data_analysis::aligned_series::AlignedSeries;
use sensor_video_sync::data_analysis::alignment::align;
use sensor_video_sync::data_analysis::trimming::trim;
use sensor_video_sync::data_input::log_parser::parse_sensor_log;
use sensor_video_sync::error::Result;
use sensor_video_sync::export::write_aligned_csv;
use sensor_video_sync::plot_framework::{build_plot_config, format_value_tick};

#[derive(Parser, Debug)]
#[command(name = "sensor_video_sync", version = crate_version())]
#[command(about = "Align a wearable sensor log with a video recording", long_about = None)]
struct Args {
    /// Tab-separated sensor log with a `time` column
    #[arg(value_name = "LOG")]
    log: PathBuf,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interpolate onto this frame rate (Hz) instead of grouping
    #[arg(long, value_name = "HZ")]
    camera_freq: Option<f64>,

    /// Grouping method (NbyN, seconds_passed, noGroup)
    #[arg(long)]
    group_method: Option<GroupMethod>,

    /// Block size for NbyN grouping
    #[arg(long, value_name = "N")]
    group_n: Option<usize>,

    /// Column to drop before alignment (repeatable)
    #[arg(long = "drop-column", value_name = "NAME")]
    drop_columns: Vec<String>,

    /// Trim start in seconds
    #[arg(long, value_name = "S")]
    start_time: Option<f64>,

    /// Trim duration in seconds
    #[arg(long, value_name = "S")]
    duration: Option<f64>,

    /// Channels to prepare for plotting, comma separated
    #[arg(long, value_delimiter = ',')]
    channels: Vec<String>,

    /// Write the aligned series to this CSV file
    #[arg(long, value_name = "FILE.csv")]
    output: Option<PathBuf>,
}

/// File configuration with command line overrides applied.
fn effective_config(args: &Args) -> Result<SyncConfig> {
    let mut config = match &args.config {
        Some(path) => SyncConfig::from_path(path)?,
        None => {
            let mut config = SyncConfig::default();
            if args.drop_columns.is_empty() {
                config.drop_columns = DEFAULT_ADMIN_COLUMNS.iter().map(|c| c.to_string()).collect();
            }
            config
        }
    };

    if args.camera_freq.is_some() {
        config.camera_freq = args.camera_freq;
    }
    if let Some(method) = args.group_method {
        config.group_method = method;
    }
    if let Some(n) = args.group_n {
        config.group_n = n;
    }
    if !args.drop_columns.is_empty() {
        config.drop_columns = args.drop_columns.iter().cloned().collect();
    }
    if args.start_time.is_some() {
        config.start_time = args.start_time;
    }
    if args.duration.is_some() {
        config.video_length = args.duration;
    }
    Ok(config)
}

fn log_summary(series: &AlignedSeries) {
    info!(
        "Aligned series: {} rows, {} channels",
        series.len(),
        series.channels().len()
    );
    if let Some((start, end)) = series.time_span() {
        info!("Time span: {:.3} s to {:.3} s", start, end);
    }
    match series.estimated_sample_rate() {
        Some(rate) => info!("Estimated sample rate: {:.2} Hz", rate),
        None => warn!("Could not estimate sample rate"),
    }
    info!("Channels: {}", series.channels().join(", "));
}

fn run(args: Args) -> Result<()> {
    let config = effective_config(&args)?;
    let align_config = config.align_config();
    let window = config.trim_window();

    info!(
        "Alignment: camera_freq {:?}, groupMethod {}, groupN {}",
        align_config.camera_freq, align_config.group_method, align_config.group_n
    );

    let raw = parse_sensor_log(&args.log)?;
    let aligned = align(&raw, &align_config)?;
    let series = trim(&aligned, &window)?;
    log_summary(&series);

    if !args.channels.is_empty() {
        let plot = build_plot_config(&series, &args.channels, None)?;
        info!(
            "Plot '{}': x {:.3}..{:.3} s, y {}..{}",
            plot.title,
            plot.x_range.start,
            plot.x_range.end,
            format_value_tick(plot.y_range.start),
            format_value_tick(plot.y_range.end)
        );
        for s in &plot.series {
            info!("  {}: {} points", s.label, s.data.len());
        }
    }

    if let Some(output) = &args.output {
        write_aligned_csv(output, &series)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
