// File: crates/dash-core/src/chart.rs
// Summary: ChartSpec model handed to presentation surfaces (traces, anomaly markers, layout).

use chrono::NaiveDate;
use serde::Serialize;

use crate::color::Color;
use crate::types::{HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Markers,
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dash,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TraceStyle {
    pub mode: TraceMode,
    pub dash: LineDash,
    pub color: Color,
    pub opacity: f64,
    /// Stroke width for lines; ignored for markers.
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    /// Source column.
    pub metric: String,
    /// Legend label.
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub style: TraceStyle,
}

impl Trace {
    pub fn xs(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.0).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

/// Vertical highlight across the full plot height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnomalyMarker {
    pub x: NaiveDate,
    pub color: Color,
    pub dash: LineDash,
    pub opacity: f64,
}

impl AnomalyMarker {
    pub fn at(x: NaiveDate) -> Self {
        Self { x, color: Color::RED, dash: LineDash::Dash, opacity: 0.3 }
    }
}

/// Layout hints; surfaces may ignore what they cannot express.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub x_title: String,
    pub y_title: String,
    pub template: String,
    pub hovermode: String,
    pub width: u32,
    pub height: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x_title: "Period".to_string(),
            y_title: "Value".to_string(),
            template: "plotly_white".to_string(),
            hovermode: "x unified".to_string(),
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub traces: Vec<Trace>,
    pub anomaly_markers: Vec<AnomalyMarker>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), traces: Vec::new(), anomaly_markers: Vec::new(), layout: Layout::default() }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn trace(&self, metric: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.metric == metric)
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.anomaly_markers.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
