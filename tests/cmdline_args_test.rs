//! Tests for command line parsing, overrides and the binary's output


use clap::Parser;
use spine_alignment::{
    cli::{self, Args},
    config::Config,
    pipeline::PostureAnalyzer,
    Error,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use test_helpers::{test_surface, PixelBody};

/// Unique path under the system temp dir
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spine_alignment_cli_{}_{name}", std::process::id()))
}

/// Recording with a centred body, an empty frame and a body far off centre
fn write_recording(name: &str) -> PathBuf {
    let path = temp_path(name);
    let centered = serde_json::to_string(&PixelBody::centered().joints()).unwrap();
    let shifted = serde_json::to_string(&PixelBody::centered().shifted(150.0).joints()).unwrap();
    fs::write(&path, format!("{centered}\nnull\n{shifted}\n")).unwrap();
    path
}

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spine-alignment"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_parse_defaults() {
    let args = Args::try_parse_from(["spine-alignment"]).unwrap();

    assert!(args.input.is_none());
    assert!(args.config.is_none());
    assert!(args.width.is_none());
    assert!(args.height.is_none());
    assert!(args.min_visibility.is_none());
    assert!(!args.window);
    assert!(!args.json);
    assert!(!args.print_config);
    assert!(!args.debug);
}

#[test]
fn test_parse_short_and_long_flags() {
    let args = Args::try_parse_from([
        "spine-alignment",
        "-i",
        "session.jsonl",
        "-C",
        "config.yaml",
        "--width",
        "1280",
        "--height",
        "720",
        "--min-visibility",
        "0.6",
        "-w",
        "--json",
        "-d",
    ])
    .unwrap();

    assert_eq!(args.input, Some(PathBuf::from("session.jsonl")));
    assert_eq!(args.config, Some(PathBuf::from("config.yaml")));
    assert_eq!(args.width, Some(1280));
    assert_eq!(args.height, Some(720));
    assert_eq!(args.min_visibility, Some(0.6));
    assert!(args.window);
    assert!(args.json);
    assert!(args.debug);
}

#[test]
fn test_parse_rejects_non_numeric_width() {
    assert!(Args::try_parse_from(["spine-alignment", "--width", "wide"]).is_err());
    assert!(Args::try_parse_from(["spine-alignment", "--height", "-1"]).is_err());
}

#[test]
fn test_overrides_replace_config_values() {
    let args = Args::try_parse_from([
        "spine-alignment",
        "--input",
        "session.jsonl",
        "--width",
        "1280",
        "--height",
        "720",
        "--min-visibility",
        "0.6",
        "--window",
    ])
    .unwrap();

    let mut config = Config::default();
    args.apply_overrides(&mut config);

    assert_eq!(config.display.width, 1280);
    assert_eq!(config.display.height, 720);
    assert_eq!(config.analysis.min_visibility, Some(0.6));
    assert_eq!(config.input.recording, Some(PathBuf::from("session.jsonl")));
    assert!(config.display.show_window);
}

#[test]
fn test_window_flag_does_not_clear_config() {
    let args = Args::try_parse_from(["spine-alignment"]).unwrap();
    let mut config = Config::default();
    config.display.show_window = true;
    config.input.recording = Some(PathBuf::from("from_config.jsonl"));

    args.apply_overrides(&mut config);

    assert!(config.display.show_window);
    assert_eq!(config.input.recording, Some(PathBuf::from("from_config.jsonl")));
}

#[test]
fn test_resolve_rejects_bad_overrides() {
    for bad in [
        vec!["spine-alignment", "--min-visibility", "1.5"],
        vec!["spine-alignment", "--width", "0"],
        vec!["spine-alignment", "--height", "0"],
    ] {
        let args = Args::try_parse_from(bad.iter().copied()).unwrap();
        assert!(matches!(args.resolve_config(), Err(Error::ConfigError(_))), "{bad:?}");
    }
}

#[test]
fn test_resolve_falls_back_to_defaults_for_unreadable_config() {
    let missing = temp_path("missing_config.yaml");
    let args = Args::try_parse_from(["spine-alignment", "-C", path_arg(&missing)]).unwrap();

    assert_eq!(args.resolve_config().unwrap(), Config::default());
}

#[test]
fn test_recording_required() {
    let config = Args::try_parse_from(["spine-alignment"]).unwrap().resolve_config().unwrap();

    match cli::recording_path(&config) {
        Err(Error::ConfigError(message)) => assert!(message.contains("--input"), "{message}"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_report_line_json_shape() {
    let mut analyzer = PostureAnalyzer::default();
    let mut surface = test_surface();
    let detected = analyzer.process_frame(Some(&PixelBody::centered().joints()), &mut surface).unwrap();
    let undetected = analyzer.process_frame(None, &mut surface).unwrap();

    let line: serde_json::Value = serde_json::from_str(&cli::report_line(1, &detected, true).unwrap()).unwrap();
    assert_eq!(line["frame"], 1);
    assert_eq!(line["status"], "excellent");
    assert_eq!(line["message"], detected.feedback.message.as_str());
    assert_eq!(line["alignment"]["state"], "assessed");
    assert_eq!(line["alignment"]["is_aligned"], true);

    let line: serde_json::Value = serde_json::from_str(&cli::report_line(2, &undetected, true).unwrap()).unwrap();
    assert_eq!(line["frame"], 2);
    assert_eq!(line["status"], "checking");
    assert_eq!(line["alignment"]["state"], "undetected");
}

#[test]
fn test_report_line_plain_text() {
    let mut analyzer = PostureAnalyzer::default();
    let report = analyzer.process_frame(None, &mut test_surface()).unwrap();

    let line = cli::report_line(7, &report, false).unwrap();
    assert!(line.starts_with("[    7] checking   "), "{line}");
    assert!(line.ends_with(&report.feedback.message), "{line}");
}

#[test]
fn test_binary_json_output() {
    let recording = write_recording("json.jsonl");
    let output = run_binary(&["--input", path_arg(&recording), "--width", "800", "--height", "800", "--json"]);
    fs::remove_file(&recording).ok();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line["frame"], i + 1);
        assert!(line["status"].is_string());
        assert!(line["message"].is_string());
        assert!(line["alignment"]["state"].is_string());
    }

    assert_eq!(lines[0]["status"], "excellent");
    assert_eq!(lines[0]["alignment"]["state"], "assessed");
    assert_eq!(lines[1]["status"], "checking");
    assert_eq!(lines[1]["alignment"]["state"], "undetected");
    assert_eq!(lines[2]["status"], "severe");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Processed 3 frames (2 with a person detected)"), "{stdout}");
}

#[test]
fn test_binary_size_overrides_change_assessment() {
    // Deviation thresholds are in pixels, so the same normalized offset
    // scores milder on a smaller surface
    let recording = write_recording("size.jsonl");
    let output = run_binary(&["-i", path_arg(&recording), "--width", "160", "--height", "160", "--json"]);
    fs::remove_file(&recording).ok();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2]["alignment"]["max_deviation"], 30);
    assert_eq!(lines[2]["alignment"]["is_aligned"], false);
    assert_eq!(lines[2]["status"], "good");
}

#[test]
fn test_binary_requires_recording() {
    let output = run_binary(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No landmark recording given"), "{stderr}");
}

#[test]
fn test_binary_rejects_invalid_visibility() {
    let recording = write_recording("visibility.jsonl");
    let output = run_binary(&["-i", path_arg(&recording), "--min-visibility", "1.5"]);
    fs::remove_file(&recording).ok();

    assert!(!output.status.success());
    assert!(json_lines(&output).is_empty());
}

#[test]
fn test_binary_print_config() {
    let output = run_binary(&["--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("display:"), "{stdout}");
}
