// File: crates/dash-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

use chrono::NaiveDate;

use crate::period::from_x;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Evenly spaced date ticks across an X range given in days since epoch.
pub fn date_ticks(x_min: f64, x_max: f64, steps: usize) -> Vec<(f64, NaiveDate)> {
    linspace(x_min, x_max, steps)
        .into_iter()
        .filter_map(|x| from_x(x).map(|d| (x, d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 4.0, 1), vec![2.0, 4.0]);
    }
}
