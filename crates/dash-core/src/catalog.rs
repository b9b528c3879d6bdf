// File: crates/dash-core/src/catalog.rs
// Summary: Metric catalog; known metrics with fixed styling and dynamic columns.

use serde::Serialize;

use crate::color::Color;

/// Column names that identify a record rather than measure it.
pub const ENTITY_COLUMNS: [&str; 2] = ["iso3", "entity_id"];
pub const INDICATOR_COLUMN: &str = "indicator_name";
pub const PERIOD_COLUMN: &str = "period";
/// Anomaly flag columns in order of preference.
pub const ANOMALY_COLUMNS: [&str; 2] = ["resid_spike", "is_anomaly"];

/// Metrics with designer-chosen colors and fixed styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownMetric {
    Value,
    WeightedStatus,
    EmaStatus,
    WeightedHeritage,
    Trend,
    Seasonal,
    Resid,
}

/// Rendering category; drives mode, dash and opacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Raw observations, drawn as markers.
    Raw,
    /// Decomposition trend or seasonal component, drawn dashed.
    Component,
    /// Decomposition residual, drawn faded.
    Residual,
    /// Everything else, drawn as a solid line.
    Series,
}

impl KnownMetric {
    pub const ALL: [KnownMetric; 7] = [
        KnownMetric::Value,
        KnownMetric::WeightedStatus,
        KnownMetric::EmaStatus,
        KnownMetric::WeightedHeritage,
        KnownMetric::Trend,
        KnownMetric::Seasonal,
        KnownMetric::Resid,
    ];

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == name)
    }

    pub fn column(&self) -> &'static str {
        match self {
            KnownMetric::Value => "value",
            KnownMetric::WeightedStatus => "weighted_status",
            KnownMetric::EmaStatus => "ema_status",
            KnownMetric::WeightedHeritage => "weighted_heritage",
            KnownMetric::Trend => "trend",
            KnownMetric::Seasonal => "seasonal",
            KnownMetric::Resid => "resid",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            KnownMetric::Value => Color::BLACK,
            KnownMetric::WeightedStatus => Color::rgb(0xe3, 0x12, 0x0b),
            KnownMetric::EmaStatus => Color::rgb(0x1f, 0x77, 0xb4),
            KnownMetric::WeightedHeritage => Color::rgb(0x99, 0x99, 0x99),
            KnownMetric::Trend => Color::rgb(0x2c, 0xa0, 0x2c),
            KnownMetric::Seasonal => Color::rgb(0xff, 0x7f, 0x0e),
            KnownMetric::Resid => Color::GRAY,
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            KnownMetric::Value => MetricKind::Raw,
            KnownMetric::Trend | KnownMetric::Seasonal => MetricKind::Component,
            KnownMetric::Resid => MetricKind::Residual,
            _ => MetricKind::Series,
        }
    }
}

/// "weighted_status" -> "Weighted Status".
pub fn display_name(column: &str) -> String {
    column
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricInfo {
    pub column: String,
    pub display_name: String,
    pub known: Option<KnownMetric>,
    pub kind: MetricKind,
}

impl MetricInfo {
    pub fn new(column: impl Into<String>) -> Self {
        let column = column.into();
        let known = KnownMetric::from_column(&column);
        Self {
            display_name: display_name(&column),
            kind: known.map(|k| k.kind()).unwrap_or(MetricKind::Series),
            known,
            column,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.known.is_none()
    }
}

/// Numeric columns available in a dataset, in column order, plus the
/// anomaly flag column if one exists. Built once at load time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricCatalog {
    metrics: Vec<MetricInfo>,
    anomaly_column: Option<String>,
}

impl MetricCatalog {
    pub fn new<I, S>(metric_columns: I, anomaly_column: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut metrics: Vec<MetricInfo> = Vec::new();
        for col in metric_columns {
            let col = col.into();
            if !metrics.iter().any(|m| m.column == col) {
                metrics.push(MetricInfo::new(col));
            }
        }
        Self { metrics, anomaly_column }
    }

    /// Catalog holding every known metric and the preferred anomaly column.
    pub fn known_only() -> Self {
        Self::new(KnownMetric::ALL.iter().map(|m| m.column()), Some(ANOMALY_COLUMNS[0].to_string()))
    }

    pub fn get(&self, column: &str) -> Option<&MetricInfo> {
        self.metrics.iter().find(|m| m.column == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricInfo> {
        self.metrics.iter()
    }

    pub fn known(&self) -> impl Iterator<Item = &MetricInfo> {
        self.metrics.iter().filter(|m| !m.is_dynamic())
    }

    pub fn dynamic(&self) -> impl Iterator<Item = &MetricInfo> {
        self.metrics.iter().filter(|m| m.is_dynamic())
    }

    pub fn len(&self) -> usize { self.metrics.len() }

    pub fn is_empty(&self) -> bool { self.metrics.is_empty() }

    pub fn anomaly_column(&self) -> Option<&str> {
        self.anomaly_column.as_deref()
    }

    pub fn has_anomaly_flag(&self) -> bool {
        self.anomaly_column.is_some()
    }
}
