use std::collections::BTreeSet;

use eframe::egui::{self, Align, Context, Layout};

use crate::catalog::{Catalog, CatalogConfig, IconSpec};
use crate::util::kebab_case;

use super::super::events::EventBus;
use super::super::filter::FilterSet;
use super::super::physics::Simulation;
use super::super::transition::{LayoutMode, ModeMachine};
use super::super::{FilterChoice, Loaded, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(loaded: Loaded, select: Option<&str>) -> Self {
        let Loaded { catalog, config } = loaded;

        let others = derive_other_values(&catalog, &config);
        let license_choices = choices_from(config.icons.license.iter());
        let os_choices = choices_from(config.icons.os.iter());
        let selected = select
            .map(kebab_case)
            .and_then(|kebab| catalog.find_by_kebab_name(&kebab));

        Self {
            catalog,
            config,
            filters: FilterSet::with_others(others),
            bus: EventBus::default(),
            mode: ModeMachine::new(LayoutMode::Domain),
            simulation: Simulation::new(),
            chart: None,
            chart_dirty: true,
            hovered: None,
            selected,
            dragged: None,
            keyword_input: String::new(),
            license_choices,
            os_choices,
            region_colors: Default::default(),
            visible_count: 0,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.advance_frame(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("oss-atlas");
                    ui.separator();
                    ui.label(format!("catalog: {data_path}"));
                    ui.label(format!("projects: {}", self.catalog.len()));
                    ui.label(format!(
                        "regions: {}",
                        self.chart
                            .as_ref()
                            .map(|chart| chart.regions.len())
                            .unwrap_or(0)
                    ));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload catalog"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.mode_status_text());
                        ui.label(format!(
                            "visible: {}/{}",
                            self.visible_count,
                            self.catalog.len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading project catalog...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_chart(ui);
            }
        });
    }

    fn advance_frame(&mut self, ctx: &Context) {
        self.apply_events();

        let dt_ms = ctx.input(|input| input.stable_dt).min(0.1) * 1000.0;
        let signal = self.mode.advance(dt_ms);
        self.handle_simulation_signal(signal);

        self.ensure_chart();

        let moved = if let Some(chart) = self.chart.as_mut() {
            self.simulation
                .step(&mut chart.nodes, &chart.wheel, self.dragged)
        } else {
            false
        };

        if moved || self.mode.is_transitioning() {
            ctx.request_repaint();
        }
    }

    fn mode_status_text(&self) -> String {
        match self.mode.settled() {
            Some(LayoutMode::Domain) => "domain view".to_owned(),
            Some(LayoutMode::Timeline) => "timeline view".to_owned(),
            None => match self.mode.target() {
                LayoutMode::Domain => "switching to domain...".to_owned(),
                LayoutMode::Timeline => "switching to timeline...".to_owned(),
            },
        }
    }
}

fn choices_from<'a>(
    icons: impl Iterator<Item = (&'a String, &'a IconSpec)>,
) -> Vec<FilterChoice> {
    let mut choices: Vec<FilterChoice> = icons
        .map(|(key, icon)| FilterChoice {
            key: key.clone(),
            label: icon.label.clone(),
            checked: false,
        })
        .collect();
    choices.push(FilterChoice {
        key: "other".to_owned(),
        label: "Other".to_owned(),
        checked: false,
    });
    choices
}

/// Values present in the catalog that no multiselect choice covers; they sit
/// behind the `Other` option of their category.
fn derive_other_values(catalog: &Catalog, config: &CatalogConfig) -> Vec<String> {
    fn covered<'a>(value: &str, mut keys: impl Iterator<Item = &'a String>) -> bool {
        let lowered = value.to_lowercase();
        keys.any(|key| lowered.contains(key.as_str()))
    }

    let mut others = BTreeSet::new();
    for record in &catalog.records {
        if !covered(&record.license, config.icons.license.keys()) {
            others.insert(record.license.to_lowercase());
        }
        for os in &record.os {
            if !covered(os, config.icons.os.keys()) {
                others.insert(os.to_lowercase());
            }
        }
    }

    others.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{Loaded, ViewModel, choices_from, derive_other_values};
    use crate::catalog::{CatalogConfig, parse_catalog};

    const SAMPLE: &str = r#"[
        {
            "Domain": "Forensics",
            "SOFTWARE": "volatility",
            "LICENSE": "GPL",
            "OS": "Linux, BeOS",
            "Date of Release": "2011-03-01",
            "Date of Last Update": "2015-09-01"
        },
        {
            "Domain": "Network Security",
            "SOFTWARE": "suricata",
            "LICENSE": "Custom Research License",
            "OS": "Linux",
            "Date of Release": "2009-12-01",
            "Date of Last Update": "2016-02-01"
        }
    ]"#;

    fn loaded() -> Loaded {
        let config = CatalogConfig::default();
        let catalog = parse_catalog(SAMPLE, &config).expect("sample parses");
        Loaded { catalog, config }
    }

    #[test]
    fn uncovered_values_land_in_others() {
        let Loaded { catalog, config } = loaded();
        let others = derive_other_values(&catalog, &config);
        assert!(others.contains(&"beos".to_string()));
        assert!(others.contains(&"custom research license".to_string()));
        assert!(!others.contains(&"linux".to_string()));
        assert!(!others.contains(&"gpl".to_string()));
    }

    #[test]
    fn choices_end_with_other() {
        let config = CatalogConfig::default();
        let choices = choices_from(config.icons.os.iter());
        assert_eq!(choices.last().map(|choice| choice.key.as_str()), Some("other"));
        assert!(choices.iter().any(|choice| choice.key == "linux"));
        assert!(choices.iter().all(|choice| !choice.checked));
    }

    #[test]
    fn start_selection_matches_by_kebab_name() {
        let model = ViewModel::new(loaded(), Some("Suricata"));
        let selected = model.selected.expect("suricata should be preselected");
        assert_eq!(model.catalog.records[selected].name, "suricata");

        let none = ViewModel::new(loaded(), Some("unknown-project"));
        assert!(none.selected.is_none());
    }
}
