use clap::Parser;
use tempfile::tempdir;

use bp_tracker_cli::{run, Cli, Outcome};
use bp_tracker_domain::services::create_default_reading_service;

fn exec(data_dir: &str, args: &[&str]) -> (Outcome, String) {
    let argv = ["bp-tracker", "--backend", "file", "--data-dir", data_dir]
        .into_iter()
        .chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).unwrap();

    // Fresh service per command, like separate process runs
    let config = cli.storage_config().unwrap();
    let mut service = create_default_reading_service(&config).unwrap();

    let mut out = Vec::new();
    let outcome = run(&cli.command, &mut service, &mut "".as_bytes(), &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_readings_survive_between_runs() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap();

    let (outcome, _) = exec(
        data_dir,
        &["add", "--systolic", "142", "--diastolic", "91", "--date", "2024-05-01"],
    );
    assert_eq!(outcome, Outcome::Success);
    assert!(dir.path().join("bp_readings.json").exists());

    let (_, latest) = exec(data_dir, &["latest"]);
    assert_eq!(latest, "Latest: 142/91 mmHg on 2024-05-01 (High BP Stage 2, red)\n");
}

#[test]
fn test_rejected_reading_is_not_written() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap();

    let (outcome, text) = exec(
        data_dir,
        &["add", "--systolic", "100", "--diastolic", "100", "--date", "2024-05-01"],
    );
    assert_eq!(outcome, Outcome::Invalid);
    assert!(text.contains("diastolic: Diastolic must be less than systolic"));

    let (_, list) = exec(data_dir, &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert_eq!(json, serde_json::json!([]));
}
