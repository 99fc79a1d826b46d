use std::process::Command;

mod common;

#[test]
fn presets_run_via_cli_and_differ_where_expected() {
    let baseline = run_and_parse(&["--preset", "baseline", "--seed", "3"]);
    let legacy = run_and_parse(&["--preset", "legacy", "--seed", "3"]);
    let discharge = run_and_parse(&["--preset", "discharge", "--seed", "3"]);

    assert!(
        (baseline - legacy).abs() < 1e-9,
        "legacy only changes projections: baseline={baseline:.2}, legacy={legacy:.2}"
    );
    assert!(
        (baseline - discharge).abs() > 1.0,
        "expected the discharge rule to change savings: baseline={baseline:.2}, discharge={discharge:.2}"
    );
}

#[test]
fn input_file_and_exports_via_cli() {
    let records = common::make_records(&[(0.0, 1.0), (3.0, 0.5), (0.0, 2.0), (0.0, 1.0)]);
    let input = common::write_temp(&common::to_input_csv(&records), ".csv");
    let dir = tempfile::tempdir().expect("temp dir");
    let hourly = dir.path().join("hourly.csv");
    let summary = dir.path().join("summary.json");

    let output = Command::new(env!("CARGO_BIN_EXE_solar-savings"))
        .arg("--input")
        .arg(input.path())
        .arg("--hourly-out")
        .arg(&hourly)
        .arg("--summary-out")
        .arg(&summary)
        .output()
        .expect("solar-savings process should run");

    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = std::fs::read_to_string(&hourly).expect("hourly csv written");
    assert_eq!(written.lines().count(), 5);
    assert!(summary.exists());
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_solar-savings"))
        .args(["--preset", "nope"])
        .output()
        .expect("solar-savings process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn malformed_input_fails_with_context() {
    let input = common::write_temp("date,hour,solar\n2021-01-01,0,1.0\n", ".csv");
    let output = Command::new(env!("CARGO_BIN_EXE_solar-savings"))
        .arg("--input")
        .arg(input.path())
        .output()
        .expect("solar-savings process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing required column"));
}

fn run_and_parse(args: &[&str]) -> f64 {
    let output = Command::new(env!("CARGO_BIN_EXE_solar-savings"))
        .args(args)
        .output()
        .expect("solar-savings process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_metric(&stdout, "Annual savings:")
}

fn parse_metric(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    raw.parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{raw}` from line `{line}`"))
}
