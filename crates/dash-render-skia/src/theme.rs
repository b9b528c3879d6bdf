// File: crates/dash-render-skia/src/theme.rs
// Summary: Light/Dark theming for the raster backend's chart chrome.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    /// Substituted for trace colors that would vanish on the background
    /// (black markers on the dark theme).
    pub foreground: skia::Color,
}

impl Theme {
    pub fn plotly_white() -> Self {
        Self {
            name: "plotly-white",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 235, 240, 248),
            axis_line: skia::Color::from_argb(255, 200, 205, 215),
            axis_label: skia::Color::from_argb(255, 42, 63, 95),
            tick: skia::Color::from_argb(255, 80, 90, 110),
            title: skia::Color::from_argb(255, 42, 63, 95),
            foreground: skia::Color::from_argb(255, 0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 235, 235, 245),
            foreground: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn is_dark(&self) -> bool {
        let c = self.background;
        (c.r() as u32 + c.g() as u32 + c.b() as u32) < 3 * 96
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::plotly_white(), Theme::dark()]
}

/// Find a theme by its `name` (`_` and `-` are interchangeable), falling back to plotly-white.
pub fn find(name: &str) -> Theme {
    let wanted = name.replace('_', "-");
    for t in presets() { if t.name.eq_ignore_ascii_case(&wanted) { return t; } }
    Theme::plotly_white()
}
