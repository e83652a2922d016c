use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Ui};

use crate::catalog::{IconSets, IconSpec, ProjectRecord};

use super::super::ViewModel;
use super::super::render_utils::with_opacity;

const CHIP_KNOWN: Color32 = Color32::from_rgb(0x0f, 0x75, 0x72);
const CHIP_FALLBACK: Color32 = Color32::from_rgb(70, 74, 82);

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Project Details");
        ui.add_space(6.0);

        let Some(index) = self.hovered.or(self.selected) else {
            ui.label("Hover over or select a project mark.");
            return;
        };
        let Some(record) = self.catalog.records.get(index) else {
            ui.label("The selected project is no longer in the catalog.");
            return;
        };

        let region = record.region(&self.config.region_attribute);
        let region_color = self
            .region_colors
            .get(region)
            .copied()
            .unwrap_or(Color32::GRAY);

        ui.label(
            RichText::new(&record.name)
                .strong()
                .size(18.0)
                .color(region_color),
        );
        ui.small(region);
        ui.add_space(6.0);

        if let Some(description) = &record.description {
            ui.label(description);
            ui.add_space(6.0);
        }

        if !record.project_name.is_empty() {
            ui.label(format!("Project: {}", record.project_name));
        }
        if !record.organization.is_empty() {
            ui.label(format!("Organization: {}", record.organization));
        }
        if !record.sectors.is_empty() {
            ui.label(format!("Sectors: {}", record.sectors.join(", ")));
        }
        if !record.program.is_empty() {
            ui.label(format!("Program: {}", record.program));
        }
        ui.label(format!("First released: {}", record.start_date));
        ui.label(format!("Last update: {}", record.last_update));

        if !record.code_location.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.label("Code:");
                ui.hyperlink_to(record.code_location.as_str(), record.code_location.as_str());
            });
        }

        ui.separator();
        ui.label(RichText::new("License").strong());
        ui.horizontal_wrapped(|ui| {
            icon_chip(ui, &self.config.icons.license, &record.license);
        });

        ui.add_space(4.0);
        ui.label(RichText::new("Languages").strong());
        ui.horizontal_wrapped(|ui| {
            for language in &record.language {
                icon_chip(ui, &self.config.icons.languages, language);
            }
        });

        ui.add_space(4.0);
        ui.label(RichText::new("Operating Systems").strong());
        ui.horizontal_wrapped(|ui| {
            for os in &record.os {
                icon_chip(ui, &self.config.icons.os, os);
            }
        });
    }
}

/// Known values render as tinted chips carrying the canonical icon label;
/// values without icon metadata fall back to a neutral chip instead of
/// failing the lookup.
fn icon_chip(ui: &mut Ui, icons: &BTreeMap<String, IconSpec>, value: &str) {
    let (label, background) = match IconSets::find_by_label(icons, value) {
        Some(icon) => (icon.label.as_str(), CHIP_KNOWN),
        None => (value, CHIP_FALLBACK),
    };

    ui.label(
        RichText::new(format!("  {label}  "))
            .background_color(with_opacity(background, 0.9))
            .color(Color32::WHITE),
    );
}

pub(in crate::app) fn record_summary(record: &ProjectRecord) -> String {
    format!(
        "{} ({}) {} - {}",
        record.name, record.license, record.start_date, record.last_update
    )
}
