use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use person_counter::{CountingPipeline, PipelineConfig, ReplaySource};
use tracing_subscriber::EnvFilter;

/// Count unique persons in a recording of per-frame detections.
#[derive(Parser, Debug)]
#[command(name = "person-count", about = "Replay recorded detections through the person tracker")]
struct Args {
    /// JSON array of frames, each an array of {bbox, class_id, score}
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Optional JSON pipeline config; missing fields use defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print one JSON report per frame instead of text
    #[arg(long)]
    json: bool,
    /// Log progress every N frames (overrides the config file)
    #[arg(long)]
    progress_interval: Option<u64>,
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }

    let source = ReplaySource::from_path(&args.input)
        .with_context(|| format!("reading detections from {}", args.input.display()))?;

    let mut pipeline = CountingPipeline::new(source, config);
    while !pipeline.detector().is_exhausted() {
        let report = pipeline.process_frame(&[], 0, 0)?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "Frame {}: Unique Persons: {}",
                report.frame_index, report.unique_count
            );
        }
    }

    let summary = pipeline.finish();
    if !args.json {
        println!(
            "Total frames: {}, tracks created: {}, peak unique: {}",
            summary.frames, summary.total_tracks_created, summary.peak_unique
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "person-count",
            "--input",
            "frames.json",
            "--json",
            "--progress-interval",
            "5",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("frames.json"));
        assert!(args.json);
        assert_eq!(args.progress_interval, Some(5));
        assert!(args.config.is_none());

        assert!(Args::try_parse_from(["person-count"]).is_err());
    }

    #[test]
    fn test_run_replays_recording() {
        let input = write_temp(
            "cli-frames.json",
            r#"[[{"bbox": [0, 0, 40, 80], "class_id": 0, "score": 0.9}], []]"#,
        );
        let args = Args {
            input: input.clone(),
            config: None,
            json: true,
            progress_interval: Some(0),
        };
        let result = run(args);
        fs::remove_file(&input).unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_rejects_bad_config() {
        let input = write_temp("cli-frames-bad-config.json", "[[]]");
        let config = write_temp("cli-bad-config.json", r#"{"tracker": {"max_distance": 0}}"#);
        let args = Args {
            input: input.clone(),
            config: Some(config.clone()),
            json: false,
            progress_interval: None,
        };
        let result = run(args);
        fs::remove_file(&input).unwrap();
        fs::remove_file(&config).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<person_counter::TrackerError>(),
            Some(person_counter::TrackerError::InvalidConfig(_))
        ));
    }
}
