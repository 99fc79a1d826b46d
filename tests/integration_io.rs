//! File-based import, export and configuration tests.

mod common;

use solar_savings::config::AnalysisConfig;
use solar_savings::error::InputError;
use solar_savings::io::export::{export_csv, export_summary_json};
use solar_savings::io::import::load_records;
use solar_savings::pipeline::analyze;
use solar_savings::sim::ChargeRule;

#[test]
fn csv_input_runs_through_the_pipeline() {
    let records = common::make_records(&[(0.0, 1.0), (3.0, 0.5), (0.0, 2.0), (0.0, 1.0)]);
    let file = common::write_temp(&common::to_input_csv(&records), ".csv");

    let loaded = load_records(file.path()).expect("input loads");
    assert_eq!(loaded, records);

    let report = analyze(loaded, &AnalysisConfig::baseline());
    let charge: Vec<f64> = report.records.iter().map(|r| r.battery_charge_kwh).collect();
    assert_eq!(charge, vec![0.0, 0.0, 4.5, 5.5]);
}

#[test]
fn malformed_input_fails_fast() {
    let file = common::write_temp("date,hour,solar,electricity\n2021-01-01,0,1.0,oops\n", ".csv");
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(
        err,
        InputError::InvalidValue {
            column: "electricity",
            ..
        }
    ));
    assert!(err.to_string().contains("oops"));
}

#[test]
fn missing_column_is_reported_by_name() {
    let file = common::write_temp("date,hour,electricity\n2021-01-01,0,1.0\n", ".csv");
    let err = load_records(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "missing required column \"solar\"");
}

#[test]
fn corrupt_workbook_is_rejected() {
    let file = common::write_temp("this is not a spreadsheet", ".xlsx");
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(err, InputError::Workbook { .. }));
}

#[test]
fn exports_hourly_csv_and_summary_json() {
    let report = common::baseline_report();
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("hourly.csv");
    let json_path = dir.path().join("summary.json");

    export_csv(&report.records, &csv_path).expect("csv export");
    export_summary_json(&report, &json_path).expect("json export");

    let mut rdr = csv::Reader::from_path(&csv_path).expect("csv readable");
    assert_eq!(rdr.records().count(), 8760);

    let text = std::fs::read_to_string(&json_path).expect("json readable");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let saved = json["annual_savings"].as_f64().expect("annual_savings number");
    assert!((saved - report.annual_savings).abs() < 1e-9);
    assert_eq!(json["projections"][0]["scenario"], "Flat");
    assert_eq!(json["hour_of_day"].as_array().map(Vec::len), Some(24));
    assert_eq!(json["monthly"][0]["name"], "January");
}

#[test]
fn toml_config_file_overrides_defaults() {
    let file = common::write_temp(
        "[battery]\nmax_charge_kwh = 5.0\ncharge_rule = \"discharge\"\n\n[tariff]\nelectricity_price = 0.30\n",
        ".toml",
    );
    let config = AnalysisConfig::from_toml_file(file.path()).expect("config parses");
    assert_eq!(config.battery.max_charge_kwh, 5.0);
    assert_eq!(config.battery.charge_rule, ChargeRule::Discharge);
    assert_eq!(config.tariff.electricity_price, 0.30);
    assert_eq!(config.projection.horizon_years, 20);
    assert!(config.validate().is_empty());
}

#[test]
fn unknown_config_keys_are_rejected() {
    let file = common::write_temp("[battery]\ncapacity = 5.0\n", ".toml");
    assert!(AnalysisConfig::from_toml_file(file.path()).is_err());
}
