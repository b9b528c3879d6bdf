// File: crates/dash-core/src/view.rs
// Visible world ranges for a ChartSpec (X in days since epoch) and world -> pixel mapping.

use crate::chart::ChartSpec;
use crate::period::to_x;
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Extents over every trace point and anomaly marker, with a 2% Y margin.
    /// Falls back to the unit square when there is nothing to show.
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for t in &spec.traces {
            for &(d, y) in &t.points {
                let x = to_x(d);
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        for m in &spec.anomaly_markers {
            let x = to_x(m.x);
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }
        if !x_min.is_finite() || !x_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            // Markers only: keep the X range, use a unit Y range.
            y_min = 0.0;
            y_max = 1.0;
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * 0.02;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn x_to_px(&self, x: f64, width: u32, insets: &Insets) -> f32 {
        let l = insets.left as f64;
        let plot_w = (width as f64 - insets.hsum() as f64).max(1.0);
        let span = (self.x_max - self.x_min).max(1e-9);
        (l + (x - self.x_min) / span * plot_w) as f32
    }

    pub fn y_to_px(&self, y: f64, height: u32, insets: &Insets) -> f32 {
        let b = height as f64 - insets.bottom as f64;
        let plot_h = (height as f64 - insets.vsum() as f64).max(1.0);
        let span = (self.y_max - self.y_min).max(1e-9);
        (b - (y - self.y_min) / span * plot_h) as f32
    }
}
