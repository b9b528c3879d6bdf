// File: crates/dash-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a ChartSpec using Skia CPU raster surfaces.

pub mod theme;

use anyhow::Result;
use skia_safe as skia;

use dash_core::chart::{AnomalyMarker, ChartSpec, LineDash, Trace, TraceMode};
use dash_core::grid::{date_ticks, linspace};
use dash_core::period::to_x;
use dash_core::types::Insets;
use dash_core::ViewState;

pub use theme::Theme;

const MARKER_RADIUS: f32 = 3.5;
const DASH_INTERVALS: [f32; 2] = [6.0, 4.0];

pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub theme: Theme,
    /// Title, tick labels and legend text. Off for pixel-stable tests.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: dash_core::types::WIDTH,
            height: dash_core::types::HEIGHT,
            insets: Insets::default(),
            theme: Theme::plotly_white(),
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    /// Size from the chart's layout hints, chrome from `theme`.
    pub fn for_spec(spec: &ChartSpec, theme: Theme) -> Self {
        Self { width: spec.layout.width, height: spec.layout.height, theme, ..Self::default() }
    }
}

/// Plot area in pixels.
#[derive(Clone, Copy)]
struct PlotRect {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
}

impl PlotRect {
    fn from_opts(opts: &RenderOptions) -> Self {
        Self {
            l: opts.insets.left as f32,
            t: opts.insets.top as f32,
            r: (opts.width.saturating_sub(opts.insets.right)) as f32,
            b: (opts.height.saturating_sub(opts.insets.bottom)) as f32,
        }
    }
}

/// Render the chart to PNG bytes.
pub fn render_to_png_bytes(spec: &ChartSpec, opts: &RenderOptions) -> Result<Vec<u8>> {
    let w = opts.width.max(1) as i32;
    let h = opts.height.max(1) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    draw_spec(surface.canvas(), spec, opts);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the chart to a PNG at `output_png_path`.
pub fn render_to_png(
    spec: &ChartSpec,
    opts: &RenderOptions,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = render_to_png_bytes(spec, opts)?;
    let path = output_png_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), traces = spec.traces.len(), "wrote png");
    Ok(())
}

fn draw_spec(canvas: &skia::Canvas, spec: &ChartSpec, opts: &RenderOptions) {
    canvas.clear(opts.theme.background);

    let view = ViewState::from_spec(spec);
    let rect = PlotRect::from_opts(opts);

    draw_grid(canvas, rect, &opts.theme);
    draw_axes(canvas, rect, &opts.theme);
    if opts.draw_labels {
        draw_ticks(canvas, rect, &view, opts);
        draw_title(canvas, &spec.title, opts);
    }

    // Anomaly lines sit behind the data.
    for m in &spec.anomaly_markers {
        draw_anomaly(canvas, rect, &view, opts, m);
    }
    for t in &spec.traces {
        match t.style.mode {
            TraceMode::Lines => draw_line_trace(canvas, &view, opts, t),
            TraceMode::Markers => draw_marker_trace(canvas, &view, opts, t),
        }
    }
    if opts.draw_labels && !spec.traces.is_empty() {
        draw_legend(canvas, rect, opts, &spec.traces);
    }
}

// ---- helpers ----------------------------------------------------------------

fn trace_color(c: dash_core::Color, theme: &Theme) -> skia::Color {
    if theme.is_dark() && c == dash_core::Color::BLACK {
        return theme.foreground;
    }
    skia::Color::from_rgb(c.r, c.g, c.b)
}

fn stroke_paint(color: skia::Color, width: f32, opacity: f64, dash: LineDash) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint.set_alpha_f(opacity.clamp(0.0, 1.0) as f32);
    if dash == LineDash::Dash {
        paint.set_path_effect(skia::PathEffect::dash(&DASH_INTERVALS, 0.0));
    }
    paint
}

fn draw_grid(canvas: &skia::Canvas, rect: PlotRect, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for x in linspace(rect.l as f64, rect.r as f64, 10) {
        canvas.draw_line((x as f32, rect.t), (x as f32, rect.b), &paint);
    }
    // horizontals
    for y in linspace(rect.t as f64, rect.b as f64, 6) {
        canvas.draw_line((rect.l, y as f32), (rect.r, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, rect: PlotRect, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    canvas.draw_line((rect.l, rect.b), (rect.r, rect.b), &axis_paint);
    canvas.draw_line((rect.l, rect.t), (rect.l, rect.b), &axis_paint);
}

fn draw_ticks(canvas: &skia::Canvas, rect: PlotRect, view: &ViewState, opts: &RenderOptions) {
    let mut paint = skia::Paint::default();
    paint.set_color(opts.theme.tick);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(11.0);

    for (x, d) in date_ticks(view.x_min, view.x_max, 6) {
        let px = view.x_to_px(x, opts.width, &opts.insets);
        canvas.draw_str(d.format("%Y-%m").to_string(), (px - 18.0, rect.b + 16.0), &font, &paint);
    }
    for y in linspace(view.y_min, view.y_max, 6) {
        let py = view.y_to_px(y, opts.height, &opts.insets);
        canvas.draw_str(format!("{y:.2}"), (rect.l - 56.0, py + 4.0), &font, &paint);
    }

    let mut label = skia::Paint::default();
    label.set_color(opts.theme.axis_label);
    label.set_anti_alias(true);
    font.set_size(13.0);
    canvas.draw_str("Period", ((rect.l + rect.r) * 0.5 - 20.0, rect.b + 40.0), &font, &label);
    canvas.draw_str("Value", (8.0, rect.t - 10.0), &font, &label);
}

fn draw_title(canvas: &skia::Canvas, title: &str, opts: &RenderOptions) {
    if title.is_empty() {
        return;
    }
    let mut paint = skia::Paint::default();
    paint.set_color(opts.theme.title);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(17.0);
    canvas.draw_str(title, (opts.insets.left as f32, opts.insets.top as f32 * 0.6), &font, &paint);
}

fn draw_anomaly(canvas: &skia::Canvas, rect: PlotRect, view: &ViewState, opts: &RenderOptions, m: &AnomalyMarker) {
    let x = view.x_to_px(to_x(m.x), opts.width, &opts.insets);
    let paint = stroke_paint(trace_color(m.color, &opts.theme), 1.0, m.opacity, m.dash);
    canvas.draw_line((x, rect.t), (x, rect.b), &paint);
}

fn draw_line_trace(canvas: &skia::Canvas, view: &ViewState, opts: &RenderOptions, trace: &Trace) {
    let pts = &trace.points;
    let to_px = |i: usize| {
        let (d, y) = pts[i];
        (
            view.x_to_px(to_x(d), opts.width, &opts.insets),
            view.y_to_px(y, opts.height, &opts.insets),
        )
    };
    let style = &trace.style;
    let paint = stroke_paint(trace_color(style.color, &opts.theme), style.width as f32, style.opacity, style.dash);
    match pts.len() {
        0 => return,
        1 => {
            // A single point has no segment to stroke; show it as a dot.
            let mut dot = paint.clone();
            dot.set_style(skia::paint::Style::Fill);
            dot.set_path_effect(None);
            canvas.draw_circle(to_px(0), style.width as f32, &dot);
            return;
        }
        _ => {}
    }

    let mut path = skia::Path::new();
    path.move_to(to_px(0));
    for i in 1..pts.len() {
        path.line_to(to_px(i));
    }
    canvas.draw_path(&path, &paint);
}

fn draw_marker_trace(canvas: &skia::Canvas, view: &ViewState, opts: &RenderOptions, trace: &Trace) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(trace_color(trace.style.color, &opts.theme));
    paint.set_alpha_f(trace.style.opacity.clamp(0.0, 1.0) as f32);
    for &(d, y) in &trace.points {
        let center = (
            view.x_to_px(to_x(d), opts.width, &opts.insets),
            view.y_to_px(y, opts.height, &opts.insets),
        );
        canvas.draw_circle(center, MARKER_RADIUS, &paint);
    }
}

fn draw_legend(canvas: &skia::Canvas, rect: PlotRect, opts: &RenderOptions, traces: &[Trace]) {
    let mut text = skia::Paint::default();
    text.set_color(opts.theme.axis_label);
    text.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    let x0 = rect.r + 12.0;
    for (i, t) in traces.iter().enumerate() {
        let y = rect.t + 8.0 + i as f32 * 20.0;
        let color = trace_color(t.style.color, &opts.theme);
        match t.style.mode {
            TraceMode::Markers => {
                let mut dot = skia::Paint::default();
                dot.set_anti_alias(true);
                dot.set_color(color);
                canvas.draw_circle((x0 + 10.0, y), MARKER_RADIUS, &dot);
            }
            TraceMode::Lines => {
                let paint = stroke_paint(color, t.style.width as f32, t.style.opacity, t.style.dash);
                canvas.draw_line((x0, y), (x0 + 20.0, y), &paint);
            }
        }
        canvas.draw_str(&t.name, (x0 + 28.0, y + 4.0), &font, &text);
    }
}
