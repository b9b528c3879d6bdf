// File: crates/dash-core/tests/presentation.rs
// Purpose: JSON hand-off formats (serialized ChartSpec and Plotly figure) and config loading.

use chrono::NaiveDate;
use dash_core::{plotly, render, Color, ColorRegistry, DashError, DashboardConfig, MetricCatalog, Record};

fn spec() -> dash_core::ChartSpec {
    let d1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
    let records = vec![
        Record::new("FRA", "CPI", d1).with_metric("value", 10.0).with_metric("trend", 9.0).with_anomaly(false),
        Record::new("FRA", "CPI", d2).with_metric("value", 14.0).with_metric("trend", 9.5).with_anomaly(true),
    ];
    let catalog = MetricCatalog::new(["value", "trend"], Some("resid_spike".into()));
    render(&records, &["value", "trend"], "CPI for France", &catalog, &ColorRegistry::new())
}

#[test]
fn chart_spec_serializes_dates_and_colors() {
    let json: serde_json::Value = serde_json::from_str(&spec().to_json().unwrap()).unwrap();
    assert_eq!(json["title"], "CPI for France");
    assert_eq!(json["traces"][0]["points"][0][0], "2020-01-01");
    assert_eq!(json["traces"][0]["style"]["mode"], "markers");
    assert_eq!(json["traces"][1]["style"]["dash"], "dash");
    assert_eq!(json["traces"][1]["style"]["color"], "#2ca02c");
    assert_eq!(json["anomaly_markers"][0]["x"], "2020-02-01");
}

#[test]
fn plotly_figure_shape() {
    let fig = plotly::to_figure(&spec());
    let data = fig["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["mode"], "markers");
    assert_eq!(data[0]["marker"]["color"], "#000000");
    assert!(data[0].get("line").is_none());
    assert_eq!(data[1]["mode"], "lines");
    assert_eq!(data[1]["line"]["dash"], "dash");
    assert_eq!(data[1]["name"], "Trend");
    assert_eq!(data[1]["x"][1], "2020-02-01");

    let layout = &fig["layout"];
    assert_eq!(layout["title"]["text"], "CPI for France");
    assert_eq!(layout["xaxis"]["title"]["text"], "Period");
    assert_eq!(layout["hovermode"], "x unified");
    assert_eq!(layout["width"], 900);
    assert_eq!(layout["height"], 500);
    let shapes = layout["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0]["x0"], "2020-02-01");
    assert_eq!(shapes[0]["line"]["color"], "#ff0000");
}

#[test]
fn config_defaults_and_overrides() {
    let cfg = DashboardConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, DashboardConfig::default());

    let cfg = DashboardConfig::from_toml_str(
        r##"
default_metrics = ["value", "resid"]
palette = ["#010203", "ff0000"]
width = 1200
theme = "dark"
"##,
    )
    .unwrap();
    assert_eq!(cfg.default_metrics, vec!["value", "resid"]);
    assert_eq!(cfg.height, 500);
    assert_eq!(cfg.layout().width, 1200);
    let reg = cfg.color_registry().unwrap();
    assert_eq!(reg.color_for("custom"), Color::rgb(1, 2, 3));
}

#[test]
fn config_rejects_bad_values() {
    assert!(matches!(DashboardConfig::from_toml_str("palette = [\"nope\"]"), Err(DashError::Config(_))));
    assert!(matches!(DashboardConfig::from_toml_str("width = 0"), Err(DashError::Config(_))));
    assert!(matches!(DashboardConfig::from_toml_str("colour = 1"), Err(DashError::Config(_))));
    assert!(matches!(DashboardConfig::from_toml_str("anomaly_column = \" \""), Err(DashError::Config(_))));
}

#[test]
fn config_accepts_anomaly_column_override() {
    let cfg = DashboardConfig::from_toml_str("anomaly_column = \"is_anomaly\"").unwrap();
    assert_eq!(cfg.anomaly_column.as_deref(), Some("is_anomaly"));
    assert_eq!(DashboardConfig::default().anomaly_column, None);
}
