// File: crates/dash-core/src/record.rs
// Summary: One (entity, indicator, period) observation with its metric values.

use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub entity_id: String,
    pub indicator_name: String,
    pub period: NaiveDate,
    /// Numeric metric cells keyed by column name. Missing cells are absent.
    pub metrics: BTreeMap<String, f64>,
    /// `None` when the dataset has no anomaly column or the cell was empty.
    pub is_anomaly: Option<bool>,
}

impl Record {
    pub fn new(entity_id: impl Into<String>, indicator_name: impl Into<String>, period: NaiveDate) -> Self {
        Self {
            entity_id: entity_id.into(),
            indicator_name: indicator_name.into(),
            period,
            metrics: BTreeMap::new(),
            is_anomaly: None,
        }
    }

    /// Builder-style metric setter; non-finite values are treated as missing.
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_metric(name, value);
        self
    }

    pub fn with_anomaly(mut self, flag: bool) -> Self {
        self.is_anomaly = Some(flag);
        self
    }

    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.metrics.insert(name.into(), value);
        }
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn is_flagged(&self) -> bool {
        self.is_anomaly.unwrap_or(false)
    }

    pub fn matches(&self, entity_id: &str, indicator_name: &str) -> bool {
        self.entity_id == entity_id && self.indicator_name == indicator_name
    }
}
