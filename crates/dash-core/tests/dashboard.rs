// File: crates/dash-core/tests/dashboard.rs
// Purpose: Default selection, second-panel suppression and panel titles.

use dash_core::dashboard::SAME_SELECTION_NOTICE;
use dash_core::{ChartRenderer, ColorRegistry, CountryResolver, Dataset, DashboardView, PanelSelection, Selection};

const SAMPLE: &str = "\
iso3,indicator_name,period,value,trend,resid_spike
FRA,Inflation,2020-01,10,9,false
FRA,Inflation,2020-02,14,9.5,true
FRA,GDP,2020-01,100,98,false
DEU,GDP,2020-01,90,91,false
";

const COUNTRIES: &str = "\
iso3,name
FRA,France
DEU,Germany
";

fn fixtures() -> (Dataset, CountryResolver) {
    (
        Dataset::from_reader(SAMPLE.as_bytes()).unwrap(),
        CountryResolver::from_reader(COUNTRIES.as_bytes()).unwrap(),
    )
}

#[test]
fn defaults_pick_first_country_and_two_indicators() {
    let (ds, _) = fixtures();
    let sel = Selection::with_defaults(&ds).expect("non-empty dataset");
    assert_eq!(sel.first, PanelSelection::new("DEU", "GDP"));
    assert_eq!(sel.second, PanelSelection::new("DEU", "Inflation"));
    assert_eq!(sel.metrics, vec!["value", "weighted_status", "ema_status", "trend"]);
    assert!(sel.shows_second());
}

#[test]
fn single_indicator_defaults_collapse_to_one_panel() {
    let csv = "iso3,indicator_name,period,value\nFRA,CPI,2020-01,1\n";
    let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
    let sel = Selection::with_defaults(&ds).unwrap();
    assert_eq!(sel.first, sel.second);
    assert!(!sel.shows_second());
}

#[test]
fn empty_dataset_has_no_default_selection() {
    assert!(Selection::with_defaults(&Dataset::default()).is_none());
}

#[test]
fn view_renders_both_panels_with_resolved_titles() {
    let (ds, countries) = fixtures();
    let colors = ColorRegistry::new();
    let renderer = ChartRenderer::new(&ds.catalog, &colors);
    let sel = Selection {
        first: PanelSelection::new("FRA", "Inflation"),
        second: PanelSelection::new("DEU", "GDP"),
        metrics: vec!["value".into(), "trend".into()],
    };

    let view = DashboardView::build(&ds, &sel, &renderer, &countries);
    assert_eq!(view.first.title, "Inflation for France");
    assert_eq!(view.first.traces.len(), 2);
    assert_eq!(view.first.anomaly_markers.len(), 1);

    let second = view.second.as_ref().expect("second panel");
    assert_eq!(second.title, "GDP for Germany");
    assert!(second.anomaly_markers.is_empty());
    assert!(view.notice.is_none());
    assert_eq!(view.charts().count(), 2);
}

#[test]
fn identical_panels_suppress_second_with_notice() {
    let (ds, countries) = fixtures();
    let colors = ColorRegistry::new();
    let renderer = ChartRenderer::new(&ds.catalog, &colors);
    let sel = Selection {
        first: PanelSelection::new("FRA", "GDP"),
        second: PanelSelection::new("FRA", "GDP"),
        metrics: vec!["value".into()],
    };

    let view = DashboardView::build(&ds, &sel, &renderer, &countries);
    assert!(view.second.is_none());
    assert_eq!(view.notice.as_deref(), Some(SAME_SELECTION_NOTICE));
    assert_eq!(view.charts().count(), 1);
}

#[test]
fn unknown_country_title_falls_back_to_code() {
    let (ds, _) = fixtures();
    let colors = ColorRegistry::new();
    let renderer = ChartRenderer::new(&ds.catalog, &colors);
    let sel = Selection {
        first: PanelSelection::new("ESP", "GDP"),
        second: PanelSelection::new("FRA", "GDP"),
        metrics: vec!["value".into()],
    };
    let view = DashboardView::build(&ds, &sel, &renderer, &CountryResolver::new());
    assert_eq!(view.first.title, "GDP for ESP");
    assert!(view.first.traces.is_empty());
}
