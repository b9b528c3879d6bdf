// File: crates/dash-core/src/renderer.rs
// Summary: Maps filtered, time-ordered records and selected metrics to a ChartSpec.

use crate::catalog::{MetricCatalog, MetricInfo, MetricKind};
use crate::chart::{AnomalyMarker, ChartSpec, Layout, LineDash, Trace, TraceMode, TraceStyle};
use crate::color::ColorRegistry;
use crate::record::Record;

const PRIMARY_OPACITY: f64 = 0.9;
const RESIDUAL_OPACITY: f64 = 0.4;
const LINE_WIDTH: f64 = 2.0;

/// Stateless apart from the color registry it borrows.
pub struct ChartRenderer<'a> {
    catalog: &'a MetricCatalog,
    colors: &'a ColorRegistry,
    layout: Layout,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(catalog: &'a MetricCatalog, colors: &'a ColorRegistry) -> Self {
        Self { catalog, colors, layout: Layout::default() }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// `records` must already be filtered to one (entity, indicator) pair and
    /// sorted by period. Selected metrics missing from the catalog, metrics
    /// without any value, and a missing anomaly column all just shrink the
    /// result; this never fails.
    pub fn render<S: AsRef<str>>(&self, records: &[Record], selected_metrics: &[S], title: &str) -> ChartSpec {
        let mut spec = ChartSpec::new(title);
        spec.layout = self.layout.clone();

        let mut seen: Vec<&str> = Vec::with_capacity(selected_metrics.len());
        for metric in selected_metrics.iter().map(AsRef::as_ref) {
            if seen.contains(&metric) {
                continue;
            }
            seen.push(metric);
            let Some(info) = self.catalog.get(metric) else {
                tracing::debug!(metric, "selected metric not in catalog; skipping");
                continue;
            };
            let points: Vec<_> = records
                .iter()
                .filter_map(|r| r.metric(&info.column).map(|y| (r.period, y)))
                .collect();
            if points.is_empty() {
                continue;
            }
            spec.add_trace(Trace {
                metric: info.column.clone(),
                name: info.display_name.clone(),
                points,
                style: self.style_for(info),
            });
        }

        if self.catalog.has_anomaly_flag() {
            spec.anomaly_markers = records
                .iter()
                .filter(|r| r.is_flagged())
                .map(|r| AnomalyMarker::at(r.period))
                .collect();
        }
        spec
    }

    pub fn style_for(&self, info: &MetricInfo) -> TraceStyle {
        let mode = match info.kind {
            MetricKind::Raw => TraceMode::Markers,
            _ => TraceMode::Lines,
        };
        let dash = match info.kind {
            MetricKind::Component => LineDash::Dash,
            _ => LineDash::Solid,
        };
        let opacity = match info.kind {
            MetricKind::Residual => RESIDUAL_OPACITY,
            _ => PRIMARY_OPACITY,
        };
        TraceStyle { mode, dash, color: self.colors.color_for(&info.column), opacity, width: LINE_WIDTH }
    }
}

/// Free-function form of [`ChartRenderer::render`].
pub fn render<S: AsRef<str>>(
    records: &[Record],
    selected_metrics: &[S],
    title: &str,
    catalog: &MetricCatalog,
    colors: &ColorRegistry,
) -> ChartSpec {
    ChartRenderer::new(catalog, colors).render(records, selected_metrics, title)
}
