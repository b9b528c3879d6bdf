// File: crates/dash-core/src/dataset.rs
// Summary: CSV dataset loading, metric column discovery, pair filtering and the process-lifetime loader cache.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::catalog::{MetricCatalog, ANOMALY_COLUMNS, ENTITY_COLUMNS, INDICATOR_COLUMN, PERIOD_COLUMN};
use crate::error::{DashError, Result};
use crate::period::parse_period;
use crate::record::Record;

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub catalog: MetricCatalog,
}

impl Dataset {
    pub fn new(records: Vec<Record>, catalog: MetricCatalog) -> Self {
        Self { records, catalog }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, None)
    }

    /// Like [`Dataset::from_path`], reading anomaly flags from `anomaly_column`
    /// when that column exists.
    pub fn from_path_with(path: impl AsRef<Path>, anomaly_column: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let ds = Self::from_reader_with(file, anomaly_column)?;
        info!(
            path = %path.display(),
            records = ds.records.len(),
            metrics = ds.catalog.len(),
            "loaded dataset"
        );
        Ok(ds)
    }

    /// Read a headered CSV. Key columns are required; any other column whose
    /// non-empty cells all parse as numbers becomes a metric column.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with(reader, None)
    }

    /// Read a headered CSV with an explicit anomaly flag column. Falls back to
    /// the standard flag columns when `anomaly_column` is absent from the header.
    /// Flag columns are never metrics.
    pub fn from_reader_with<R: Read>(reader: R, anomaly_column: Option<&str>) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect::<Vec<_>>();
        let idx = |names: &[&str]| -> Option<usize> {
            names.iter().find_map(|want| headers.iter().position(|h| h == want))
        };

        let i_entity = idx(&ENTITY_COLUMNS[..]).ok_or_else(|| DashError::MissingColumn(ENTITY_COLUMNS[0].to_string()))?;
        let i_indicator = idx(&[INDICATOR_COLUMN][..]).ok_or_else(|| DashError::MissingColumn(INDICATOR_COLUMN.to_string()))?;
        let i_period = idx(&[PERIOD_COLUMN][..]).ok_or_else(|| DashError::MissingColumn(PERIOD_COLUMN.to_string()))?;
        let wanted = anomaly_column.map(|c| c.trim().to_lowercase());
        let i_wanted = wanted.as_deref().and_then(|c| idx(&[c][..]));
        if let (Some(c), None) = (wanted.as_deref(), i_wanted) {
            warn!(column = %c, "configured anomaly column not found; using defaults");
        }
        let i_anomaly = i_wanted.or_else(|| idx(&ANOMALY_COLUMNS[..]));
        let is_flag_column =
            |name: &str| ANOMALY_COLUMNS.iter().any(|c| *c == name) || wanted.as_deref() == Some(name);

        let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

        // Metric discovery needs every row, so classify columns before building records.
        let mut metric_columns: Vec<(usize, String)> = Vec::new();
        for (i, name) in headers.iter().enumerate() {
            if i == i_entity || i == i_indicator || i == i_period || is_flag_column(name) {
                continue;
            }
            let numeric = rows
                .iter()
                .filter_map(|row| row.get(i))
                .all(|cell| parse_number(cell).is_some() || is_missing(cell));
            if numeric {
                metric_columns.push((i, name.clone()));
            } else {
                debug!(column = %name, "non-numeric column ignored");
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (n, row) in rows.iter().enumerate() {
            let cell = move |i: usize| row.get(i).unwrap_or("");
            let period = parse_period(cell(i_period))
                .ok_or_else(|| DashError::InvalidPeriod { row: n + 1, value: cell(i_period).to_string() })?;
            let mut rec = Record::new(cell(i_entity), cell(i_indicator), period);
            for (i, name) in &metric_columns {
                if let Some(v) = parse_number(cell(*i)) {
                    rec.set_metric(name.clone(), v);
                }
            }
            rec.is_anomaly = i_anomaly.and_then(|i| parse_flag(cell(i)));
            records.push(rec);
        }

        let catalog = MetricCatalog::new(
            metric_columns.into_iter().map(|(_, name)| name),
            i_anomaly.map(|i| headers[i].clone()),
        );
        debug!(
            known = catalog.known().count(),
            dynamic = catalog.dynamic().count(),
            anomaly = ?catalog.anomaly_column(),
            "metric catalog built"
        );
        Ok(Self { records, catalog })
    }

    /// Sorted unique entity codes.
    pub fn entities(&self) -> Vec<String> {
        self.records.iter().map(|r| r.entity_id.clone()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Sorted unique indicator names.
    pub fn indicators(&self) -> Vec<String> {
        self.records.iter().map(|r| r.indicator_name.clone()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Records for one (entity, indicator) pair in ascending period order.
    pub fn filter(&self, entity_id: &str, indicator_name: &str) -> Vec<Record> {
        let mut out: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.matches(entity_id, indicator_name))
            .cloned()
            .collect();
        out.sort_by_key(|r| r.period);
        out
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

fn is_missing(cell: &str) -> bool {
    let c = cell.trim();
    c.is_empty() || c.eq_ignore_ascii_case("nan") || c.eq_ignore_ascii_case("null") || c.eq_ignore_ascii_case("none")
}

fn parse_number(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_flag(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" | "yes" => Some(true),
        "false" | "0" | "0.0" | "no" => Some(false),
        _ => None,
    }
}

/// Loads a dataset once and hands out shared references until invalidated.
pub struct DatasetLoader {
    path: PathBuf,
    anomaly_column: Option<String>,
    cached: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), anomaly_column: None, cached: Mutex::new(None) }
    }

    pub fn with_anomaly_column(mut self, column: Option<String>) -> Self {
        self.anomaly_column = column;
        self
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn load(&self) -> Result<Arc<Dataset>> {
        let mut guard = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ds) = guard.as_ref() {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(Dataset::from_path_with(&self.path, self.anomaly_column.as_deref())?);
        *guard = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop the cached dataset; the next `load` re-reads the file.
    pub fn invalidate(&self) {
        let mut guard = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if guard.take().is_some() {
            debug!(path = %self.path.display(), "dataset cache invalidated");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
