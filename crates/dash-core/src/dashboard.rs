// File: crates/dash-core/src/dashboard.rs
// Summary: Two-panel selection and the filter -> sort -> render pipeline for each panel.

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::config::DEFAULT_METRICS;
use crate::countries::CountryResolver;
use crate::dataset::Dataset;
use crate::renderer::ChartRenderer;

/// Shown in place of the second chart when both panels select the same pair.
pub const SAME_SELECTION_NOTICE: &str = "Select a different indicator or country to compare.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelSelection {
    pub entity_id: String,
    pub indicator_name: String,
}

impl PanelSelection {
    pub fn new(entity_id: impl Into<String>, indicator_name: impl Into<String>) -> Self {
        Self { entity_id: entity_id.into(), indicator_name: indicator_name.into() }
    }

    /// `"{indicator} for {country name}"`.
    pub fn title(&self, resolver: &CountryResolver) -> String {
        format!("{} for {}", self.indicator_name, resolver.name_for(&self.entity_id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub first: PanelSelection,
    pub second: PanelSelection,
    pub metrics: Vec<String>,
}

impl Selection {
    /// Both countries default to the first entity; the second indicator
    /// defaults to the second one when there is more than one.
    /// Returns `None` for an empty dataset.
    pub fn with_defaults(dataset: &Dataset) -> Option<Self> {
        let entities = dataset.entities();
        let indicators = dataset.indicators();
        let country = entities.first()?;
        let ind1 = indicators.first()?;
        let ind2 = indicators.get(1).unwrap_or(ind1);
        Some(Self {
            first: PanelSelection::new(country.clone(), ind1.clone()),
            second: PanelSelection::new(country.clone(), ind2.clone()),
            metrics: DEFAULT_METRICS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn shows_second(&self) -> bool {
        self.first != self.second
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub first: ChartSpec,
    pub second: Option<ChartSpec>,
    pub notice: Option<String>,
}

impl DashboardView {
    pub fn build(
        dataset: &Dataset,
        selection: &Selection,
        renderer: &ChartRenderer<'_>,
        resolver: &CountryResolver,
    ) -> Self {
        let render_panel = |panel: &PanelSelection| {
            let records = dataset.filter(&panel.entity_id, &panel.indicator_name);
            tracing::debug!(
                entity = %panel.entity_id,
                indicator = %panel.indicator_name,
                rows = records.len(),
                "rendering panel"
            );
            renderer.render(&records, &selection.metrics, &panel.title(resolver))
        };

        let first = render_panel(&selection.first);
        if selection.shows_second() {
            Self { first, second: Some(render_panel(&selection.second)), notice: None }
        } else {
            Self { first, second: None, notice: Some(SAME_SELECTION_NOTICE.to_string()) }
        }
    }

    /// Panels in display order.
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        std::iter::once(&self.first).chain(self.second.iter())
    }
}
