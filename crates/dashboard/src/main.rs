// File: crates/dashboard/src/main.rs
// Summary: Loads the indicator dataset, resolves the two-panel selection and writes each chart as JSON, Plotly JSON and/or PNG.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dash_core::{
    plotly, ChartRenderer, ChartSpec, CountryResolver, DashboardConfig, DashboardView, Dataset,
    DatasetLoader, PanelSelection, Selection,
};
use dash_render_skia::{render_to_png, theme, RenderOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Serialized chart spec
    Json,
    /// Plotly figure JSON
    Plotly,
    /// Raster image
    Png,
    All,
}

/// Compare two country/indicator time series side by side.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Indicator dataset (CSV with iso3, indicator_name, period and metric columns)
    #[arg(long, env = "DASH_DATA", default_value = "indicators_time_series.csv")]
    data: String,

    /// ISO3 -> country name reference table (CSV)
    #[arg(long, env = "DASH_COUNTRIES")]
    countries: Option<PathBuf>,

    /// TOML config file
    #[arg(long, env = "DASH_CONFIG")]
    config: Option<PathBuf>,

    /// Country for chart 1 (ISO3 code or name)
    #[arg(long)]
    country1: Option<String>,

    /// Country for chart 2 (ISO3 code or name)
    #[arg(long)]
    country2: Option<String>,

    /// Indicator for chart 1
    #[arg(long)]
    indicator1: Option<String>,

    /// Indicator for chart 2
    #[arg(long)]
    indicator2: Option<String>,

    /// Metrics to display, comma separated
    #[arg(long, value_delimiter = ',')]
    metrics: Vec<String>,

    /// What to write per chart
    #[arg(long, value_enum, default_value_t = OutputFormat::All)]
    format: OutputFormat,

    /// Output directory
    #[arg(long, default_value = "target/out")]
    out: PathBuf,

    /// Raster theme (plotly-white, dark); overrides the config file
    #[arg(long)]
    theme: Option<String>,

    /// Print countries, indicators and metrics, then exit
    #[arg(long)]
    list: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(p) => DashboardConfig::from_path(p).with_context(|| format!("failed to load config '{}'", p.display()))?,
        None => DashboardConfig::default(),
    };

    let path = resolve_path(&args.data)?;
    let loader = DatasetLoader::new(&path).with_anomaly_column(config.anomaly_column.clone());
    let dataset = loader
        .load()
        .with_context(|| format!("failed to load dataset '{}'", path.display()))?;
    if dataset.is_empty() {
        anyhow::bail!("no records loaded from {}", path.display());
    }

    let resolver = match &args.countries {
        Some(p) => CountryResolver::from_path(p)
            .with_context(|| format!("failed to load country table '{}'", p.display()))?,
        None => CountryResolver::new(),
    };

    if args.list {
        write_listing(&mut std::io::stdout().lock(), &dataset, &resolver)?;
        return Ok(());
    }

    let selection = resolve_selection(&args, &dataset, &resolver, &config)?;
    info!(
        first = ?selection.first,
        second = ?selection.second,
        metrics = ?selection.metrics,
        "selection resolved"
    );

    let colors = config.color_registry()?;
    let renderer = ChartRenderer::new(&dataset.catalog, &colors).with_layout(config.layout());
    let view = DashboardView::build(&dataset, &selection, &renderer, &resolver);

    let theme = theme::find(args.theme.as_deref().unwrap_or(&config.theme));
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;
    for (i, chart) in view.charts().enumerate() {
        let stem = format!("chart{}", i + 1);
        write_chart(chart, &args.out, &stem, args.format, theme)?;
    }
    if let Some(notice) = &view.notice {
        println!("{notice}");
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolve the dataset path, trying a `.csv` extension when the bare name is missing.
fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    if p.extension().is_none() {
        let alt = p.with_extension("csv");
        if alt.exists() {
            info!(path = %alt.display(), "using .csv variant of dataset path");
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Defaults first, then whatever the user supplied on the command line.
fn resolve_selection(
    args: &Args,
    dataset: &Dataset,
    resolver: &CountryResolver,
    config: &DashboardConfig,
) -> Result<Selection> {
    let mut sel = Selection::with_defaults(dataset).context("dataset has no countries or indicators")?;
    sel.metrics = if args.metrics.is_empty() {
        config.default_metrics.clone()
    } else {
        args.metrics.iter().map(|m| m.trim().to_string()).filter(|m| !m.is_empty()).collect()
    };

    let entities = dataset.entities();
    let indicators = dataset.indicators();
    let apply = |panel: &mut PanelSelection, country: &Option<String>, indicator: &Option<String>| {
        if let Some(c) = country {
            panel.entity_id = resolver.code_for(c).unwrap_or_else(|| c.trim().to_uppercase());
            if !entities.contains(&panel.entity_id) {
                warn!(country = %c, "country not present in dataset; chart will be empty");
            }
        }
        if let Some(i) = indicator {
            panel.indicator_name = i.trim().to_string();
            if !indicators.contains(&panel.indicator_name) {
                warn!(indicator = %i, "indicator not present in dataset; chart will be empty");
            }
        }
    };
    apply(&mut sel.first, &args.country1, &args.indicator1);
    apply(&mut sel.second, &args.country2, &args.indicator2);
    Ok(sel)
}

fn write_chart(chart: &ChartSpec, dir: &Path, stem: &str, format: OutputFormat, theme: theme::Theme) -> Result<()> {
    if matches!(format, OutputFormat::Json | OutputFormat::All) {
        let out = dir.join(format!("{stem}.json"));
        std::fs::write(&out, chart.to_json()?).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }
    if matches!(format, OutputFormat::Plotly | OutputFormat::All) {
        let out = dir.join(format!("{stem}.plotly.json"));
        let fig = serde_json::to_string_pretty(&plotly::to_figure(chart))?;
        std::fs::write(&out, fig).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }
    if matches!(format, OutputFormat::Png | OutputFormat::All) {
        let out = dir.join(format!("{stem}.png"));
        render_to_png(chart, &RenderOptions::for_spec(chart, theme), &out)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

fn write_listing(out: &mut impl Write, dataset: &Dataset, resolver: &CountryResolver) -> std::io::Result<()> {
    writeln!(out, "Countries:")?;
    for code in dataset.entities() {
        writeln!(out, "  {}", resolver.label(&code))?;
    }
    writeln!(out, "Indicators:")?;
    for name in dataset.indicators() {
        writeln!(out, "  {name}")?;
    }
    writeln!(out, "Metrics:")?;
    for m in dataset.catalog.iter() {
        let kind = if m.is_dynamic() { "dynamic" } else { "known" };
        writeln!(out, "  {:<20} {:<20} {kind}", m.column, m.display_name)?;
    }
    match dataset.catalog.anomaly_column() {
        Some(col) => writeln!(out, "Anomaly flag: {col}"),
        None => writeln!(out, "Anomaly flag: (none)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
iso3,indicator_name,period,value,trend
FRA,Inflation,2020-01,10,9
FRA,GDP,2020-01,100,98
DEU,GDP,2020-01,90,91
";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["dashboard"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn resolve_path_appends_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let full = file.path().to_path_buf();
        let bare = full.with_extension("");
        assert_eq!(resolve_path(bare.to_str().unwrap()).unwrap(), full);
        assert!(resolve_path("/no/such/dataset").is_err());
    }

    #[test]
    fn selection_overrides_apply_on_top_of_defaults() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut resolver = CountryResolver::new();
        resolver.insert("FRA", "France");
        let a = args(&["--country1", "france", "--indicator1", "Inflation", "--metrics", "value, trend"]);

        let sel = resolve_selection(&a, &ds, &resolver, &DashboardConfig::default()).unwrap();
        assert_eq!(sel.first, PanelSelection::new("FRA", "Inflation"));
        assert_eq!(sel.second, PanelSelection::new("DEU", "Inflation"));
        assert_eq!(sel.metrics, vec!["value", "trend"]);
    }

    #[test]
    fn config_metrics_used_when_none_given() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let config = DashboardConfig { default_metrics: vec!["trend".into()], ..DashboardConfig::default() };
        let sel = resolve_selection(&args(&[]), &ds, &CountryResolver::new(), &config).unwrap();
        assert_eq!(sel.metrics, vec!["trend"]);
        assert_eq!(sel.first, PanelSelection::new("DEU", "GDP"));
    }

    fn sample_chart() -> ChartSpec {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let colors = dash_core::ColorRegistry::new();
        let renderer = ChartRenderer::new(&ds.catalog, &colors);
        renderer.render(&ds.filter("FRA", "GDP"), &["value", "trend"], "GDP for France")
    }

    fn written(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_chart_honours_format() {
        let chart = sample_chart();
        let dir = tempfile::tempdir().unwrap();

        write_chart(&chart, dir.path(), "chart1", OutputFormat::Json, theme::Theme::plotly_white()).unwrap();
        assert_eq!(written(dir.path()), vec!["chart1.json"]);

        write_chart(&chart, dir.path(), "chart2", OutputFormat::Plotly, theme::Theme::plotly_white()).unwrap();
        assert_eq!(written(dir.path()), vec!["chart1.json", "chart2.plotly.json"]);

        let spec: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("chart1.json")).unwrap()).unwrap();
        assert_eq!(spec["title"], "GDP for France");
        let fig: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("chart2.plotly.json")).unwrap()).unwrap();
        assert_eq!(fig["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn listing_names_countries_indicators_and_metrics() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut resolver = CountryResolver::new();
        resolver.insert("FRA", "France");
        let mut buf = Vec::new();
        write_listing(&mut buf, &ds, &resolver).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("  France (FRA)"));
        assert!(text.contains("  DEU"));
        assert!(text.contains("  Inflation"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("trend") && l.ends_with("known")));
        assert!(text.ends_with("Anomaly flag: (none)\n"));
    }

    #[test]
    fn format_flag_parses() {
        assert_eq!(args(&["--format", "png"]).format, OutputFormat::Png);
        assert_eq!(args(&[]).format, OutputFormat::All);
    }
}
