//! Spine alignment monitor: replays landmark recordings through the posture
//! pipeline and reports feedback.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use spine_alignment::{
    app::SessionRunner,
    cli::{self, Args},
    config::{Config, EXAMPLE_CONFIG},
    feedback::Status,
    frame_source::RecordedFrames,
    render::RecordingSurface,
};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Spine Alignment Monitor ({})", env!("BUILD_TARGET"));

    let config = args.resolve_config()?;
    let recording = cli::recording_path(&config)?;

    let source = RecordedFrames::open(&recording)
        .with_context(|| format!("Failed to open recording {}", recording.display()))?;
    let mut runner = SessionRunner::from_config(source, &config);

    let summary = if config.display.show_window {
        run_window(&mut runner, &config)?
    } else {
        let mut surface = RecordingSurface::new(
            f64::from(config.display.width),
            f64::from(config.display.height),
        );
        let json = args.json;
        let mut frame = 0;
        let summary = runner.run(&mut surface, |report| {
            frame += 1;
            match cli::report_line(frame, report, json) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!("{e}"),
            }
        })?;
        summary.clone()
    };

    println!(
        "Processed {} frames ({} with a person detected)",
        summary.frames, summary.detected
    );
    for status in Status::ALL {
        println!("  {:<10} {}", status, summary.count(status));
    }
    if let Some(feedback) = &summary.last_feedback {
        println!("Last feedback: {}", feedback.message);
    }

    Ok(())
}

#[cfg(feature = "opencv")]
fn run_window(
    runner: &mut SessionRunner<RecordedFrames<std::io::BufReader<std::fs::File>>>,
    config: &Config,
) -> Result<spine_alignment::app::SessionSummary> {
    use spine_alignment::render::opencv_surface::OpenCvSurface;

    let mut surface = OpenCvSurface::new(config.display.width, config.display.height)?;
    let summary = runner.run_window(&mut surface, &config.display.window_title, config.input.fps)?;
    Ok(summary.clone())
}

#[cfg(not(feature = "opencv"))]
fn run_window(
    _runner: &mut SessionRunner<RecordedFrames<std::io::BufReader<std::fs::File>>>,
    _config: &Config,
) -> Result<spine_alignment::app::SessionSummary> {
    anyhow::bail!("Window output needs the `opencv` feature; rebuild with --features opencv")
}
