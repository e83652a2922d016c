use eframe::egui::{RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::events::VizEvent;
use super::super::transition::LayoutMode;

const SUGGESTION_LIMIT: usize = 8;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.add_space(4.0);

        let target = self.mode.target();
        ui.horizontal(|ui| {
            if ui
                .selectable_label(target == LayoutMode::Domain, "Domain")
                .clicked()
            {
                self.bus.publish(VizEvent::DrawDomain);
            }
            if ui
                .selectable_label(target == LayoutMode::Timeline, "Timeline")
                .clicked()
            {
                self.bus.publish(VizEvent::DrawTimeline);
            }
        });

        ui.separator();
        ui.heading("Filters");
        ui.add_space(4.0);

        let mut changed = false;

        ui.label(RichText::new("License").strong());
        for choice in &mut self.license_choices {
            if ui.checkbox(&mut choice.checked, choice.label.as_str()).changed() {
                changed = true;
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Operating System").strong());
        for choice in &mut self.os_choices {
            if ui.checkbox(&mut choice.checked, choice.label.as_str()).changed() {
                changed = true;
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Keyword").strong());
        let response = ui.text_edit_singleline(&mut self.keyword_input);
        if response.changed() {
            changed = true;
        }

        let suggestions = self.keyword_suggestions();
        for suggestion in suggestions {
            if ui.small_button(&suggestion).clicked() {
                self.keyword_input = suggestion;
                changed = true;
            }
        }

        ui.add_space(8.0);
        if ui.button("Clear filters").clicked() {
            for choice in self
                .license_choices
                .iter_mut()
                .chain(self.os_choices.iter_mut())
            {
                choice.checked = false;
            }
            self.keyword_input.clear();
            changed = true;
        }

        if changed {
            self.sync_filters();
            self.bus.publish(VizEvent::FilterUpdate);
        }
    }

    fn sync_filters(&mut self) {
        self.filters.license = self
            .license_choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.key.to_lowercase())
            .collect();
        self.filters.os = self
            .os_choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.key.to_lowercase())
            .collect();
        self.filters.keyword = self.keyword_input.trim().to_lowercase();
    }

    fn keyword_suggestions(&self) -> Vec<String> {
        let query = self.keyword_input.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &str)> = self
            .catalog
            .records
            .iter()
            .filter_map(|record| {
                fuzzy_match_score(&matcher, &record.name, query)
                    .map(|score| (score, record.name.as_str()))
            })
            .filter(|(_, name)| !name.eq_ignore_ascii_case(query))
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.truncate(SUGGESTION_LIMIT);
        scored
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
