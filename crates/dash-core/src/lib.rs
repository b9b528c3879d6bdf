// File: crates/dash-core/src/lib.rs
// Summary: Core library entry point; exports dataset loading, metric catalog and chart spec rendering.

pub mod catalog;
pub mod chart;
pub mod color;
pub mod config;
pub mod countries;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod period;
pub mod plotly;
pub mod record;
pub mod renderer;
pub mod types;
pub mod view;

pub use catalog::{KnownMetric, MetricCatalog, MetricInfo, MetricKind};
pub use chart::{AnomalyMarker, ChartSpec, Layout, LineDash, Trace, TraceMode, TraceStyle};
pub use color::{Color, ColorRegistry};
pub use config::DashboardConfig;
pub use countries::CountryResolver;
pub use dashboard::{DashboardView, PanelSelection, Selection};
pub use dataset::{Dataset, DatasetLoader};
pub use error::{DashError, Result};
pub use record::Record;
pub use renderer::{render, ChartRenderer};
pub use view::ViewState;
