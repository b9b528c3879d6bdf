// File: crates/dash-core/src/plotly.rs
// Summary: Converts a ChartSpec into a Plotly figure (data + layout) as JSON.

use serde_json::{json, Value};

use crate::chart::{ChartSpec, LineDash, Trace, TraceMode};

fn dash_name(d: LineDash) -> &'static str {
    match d {
        LineDash::Solid => "solid",
        LineDash::Dash => "dash",
    }
}

fn trace_json(t: &Trace) -> Value {
    let x: Vec<String> = t.xs().iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    let mut v = json!({
        "type": "scatter",
        "name": t.name,
        "x": x,
        "y": t.ys(),
        "opacity": t.style.opacity,
    });
    match t.style.mode {
        TraceMode::Markers => {
            v["mode"] = json!("markers");
            v["marker"] = json!({ "color": t.style.color.to_hex() });
        }
        TraceMode::Lines => {
            v["mode"] = json!("lines");
            v["line"] = json!({
                "color": t.style.color.to_hex(),
                "width": t.style.width,
                "dash": dash_name(t.style.dash),
            });
        }
    }
    v
}

/// Plotly figure: one scatter per trace, anomaly markers as full-height
/// vertical line shapes.
pub fn to_figure(spec: &ChartSpec) -> Value {
    let shapes: Vec<Value> = spec
        .anomaly_markers
        .iter()
        .map(|m| {
            let x = m.x.format("%Y-%m-%d").to_string();
            json!({
                "type": "line",
                "xref": "x",
                "yref": "paper",
                "x0": x,
                "x1": x,
                "y0": 0,
                "y1": 1,
                "opacity": m.opacity,
                "line": { "color": m.color.to_hex(), "dash": dash_name(m.dash) },
            })
        })
        .collect();

    let data: Vec<Value> = spec.traces.iter().map(trace_json).collect();
    let l = &spec.layout;
    json!({
        "data": data,
        "layout": {
            "title": { "text": spec.title },
            "xaxis": { "title": { "text": l.x_title } },
            "yaxis": { "title": { "text": l.y_title } },
            "template": l.template,
            "hovermode": l.hovermode,
            "width": l.width,
            "height": l.height,
            "shapes": shapes,
        }
    })
}
