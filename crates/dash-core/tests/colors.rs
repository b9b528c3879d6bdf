// File: crates/dash-core/tests/colors.rs
// Purpose: Color registry assignment rules, including concurrent first sightings.

use dash_core::color::DEFAULT_PALETTE;
use dash_core::{Color, ColorRegistry, KnownMetric};
use std::sync::Arc;

#[test]
fn known_metrics_keep_fixed_colors() {
    let reg = ColorRegistry::with_palette(vec![Color::rgb(9, 9, 9)]);
    for m in KnownMetric::ALL {
        assert_eq!(reg.color_for(m.column()), m.color());
    }
    assert_eq!(reg.assigned_len(), 0);
}

#[test]
fn dynamic_metrics_rotate_through_palette() {
    let palette = vec![Color::rgb(1, 0, 0), Color::rgb(0, 1, 0)];
    let reg = ColorRegistry::with_palette(palette.clone());
    assert_eq!(reg.color_for("a"), palette[0]);
    assert_eq!(reg.color_for("b"), palette[1]);
    assert_eq!(reg.color_for("c"), palette[0]);
    assert_eq!(reg.color_for("a"), palette[0]);
    assert_eq!(reg.assigned_len(), 3);
}

#[test]
fn empty_palette_falls_back_to_gray() {
    let reg = ColorRegistry::with_palette(Vec::new());
    assert_eq!(reg.color_for("anything"), Color::GRAY);
}

#[test]
fn default_palette_starts_with_plotly_blue() {
    let reg = ColorRegistry::default();
    assert_eq!(reg.color_for("first_dynamic"), DEFAULT_PALETTE[0]);
    assert_eq!(DEFAULT_PALETTE[0].to_hex(), "#636efa");
}

#[test]
fn concurrent_first_sighting_agrees_on_one_color() {
    let reg = Arc::new(ColorRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reg = Arc::clone(&reg);
            std::thread::spawn(move || reg.color_for("shared_metric"))
        })
        .collect();
    let colors: Vec<Color> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(colors.iter().all(|c| *c == colors[0]));
    assert_eq!(reg.assigned_len(), 1);
}
