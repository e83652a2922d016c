mod interaction;
mod view;

use eframe::egui::{Vec2, vec2};

use crate::catalog::Catalog;
use crate::layout::{
    BAR_HEIGHT, LABEL_DISTANCE, NODE_RADIUS, OUTER_RADIUS, TimelineGeometry, TimelineItem,
    WheelGeometry, compute_timeline, compute_wheel,
};
use crate::util::stable_pair;

use super::ViewModel;
use super::render_utils::region_color;
use super::transition::LayoutMode;

pub(in crate::app) const VIRTUAL_WIDTH: f32 = 960.0;
pub(in crate::app) const MARGIN_LEFT: f32 = 10.0;
pub(in crate::app) const MARGIN_RIGHT: f32 = 10.0;
pub(in crate::app) const MARGIN_TOP: f32 = 20.0;
pub(in crate::app) const MARGIN_BOTTOM: f32 = 20.0;

const SEED_JITTER: f32 = 2.0;

/// Everything the chart adapter needs per frame: both geometries plus one
/// render node per catalog record, in catalog display order.
pub(in crate::app) struct ChartState {
    pub(in crate::app) regions: Vec<String>,
    pub(in crate::app) wheel: WheelGeometry,
    pub(in crate::app) timeline: TimelineGeometry,
    pub(in crate::app) nodes: Vec<ChartNode>,
    pub(in crate::app) virtual_size: Vec2,
    pub(in crate::app) center: Vec2,
}

pub(in crate::app) struct ChartNode {
    pub(in crate::app) record_index: usize,
    pub(in crate::app) region_index: usize,
    /// Simulation position, wheel-centered coordinates.
    pub(in crate::app) pos: Vec2,
    pub(in crate::app) radius: f32,
    /// Mark center in timeline band coordinates (y relative to the band
    /// stack top).
    pub(in crate::app) timeline_pos: Vec2,
    /// Date-span width of the extended timeline bar.
    pub(in crate::app) bar_width: f32,
    pub(in crate::app) visible: bool,
}

impl ChartState {
    pub(in crate::app) fn build(catalog: &Catalog, region_attribute: &str) -> Self {
        let regions = catalog.regions(region_attribute);
        let wheel = compute_wheel(&regions);

        let chart_width = VIRTUAL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let items: Vec<TimelineItem<'_>> = catalog
            .records
            .iter()
            .map(|record| TimelineItem {
                region: record.region(region_attribute),
                name: &record.name,
                start_day: record.start_date.day_number(),
                last_day: record.last_update.day_number(),
            })
            .collect();
        let timeline = compute_timeline(&items, &regions, (MARGIN_LEFT, chart_width));

        let wheel_extent = 2.0 * (OUTER_RADIUS + LABEL_DISTANCE) + MARGIN_TOP + MARGIN_BOTTOM;
        let timeline_extent = MARGIN_TOP + timeline.total_height + 30.0 + MARGIN_BOTTOM;
        let virtual_size = vec2(VIRTUAL_WIDTH, wheel_extent.max(timeline_extent));
        let center = virtual_size * 0.5;

        let nodes = catalog
            .records
            .iter()
            .enumerate()
            .map(|(record_index, record)| {
                let region = record.region(region_attribute);
                let region_index = regions
                    .iter()
                    .position(|known| known == region)
                    .unwrap_or(0);

                let (jx, jy) = stable_pair(&record.name);
                let centroid = wheel.slices[region_index].centroid;
                let pos = centroid + vec2(jx, jy) * SEED_JITTER;

                let band = &timeline.bands[region_index];
                let slot_y = band.slot_y(&record.name).unwrap_or(band.first_bar);
                let start_x = timeline.x.position(record.start_date.day_number());
                let end_x = timeline.x.position(record.last_update.day_number());

                ChartNode {
                    record_index,
                    region_index,
                    pos,
                    radius: NODE_RADIUS,
                    timeline_pos: vec2(start_x, slot_y + NODE_RADIUS),
                    bar_width: (end_x - start_x).max(0.0) + BAR_HEIGHT,
                    visible: true,
                }
            })
            .collect();

        Self {
            regions,
            wheel,
            timeline,
            nodes,
            virtual_size,
            center,
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn ensure_chart(&mut self) {
        if !self.chart_dirty && self.chart.is_some() {
            return;
        }

        let chart = ChartState::build(&self.catalog, &self.config.region_attribute);
        self.region_colors = chart
            .regions
            .iter()
            .enumerate()
            .map(|(index, region)| (region.clone(), region_color(index)))
            .collect();
        self.chart = Some(chart);
        self.chart_dirty = false;
        self.apply_filters();

        if self.mode.settled() == Some(LayoutMode::Domain) {
            self.simulation.start();
        }
    }

    pub(in crate::app) fn apply_filters(&mut self) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };

        let mut visible = 0usize;
        for node in &mut chart.nodes {
            let accepted = self
                .catalog
                .records
                .get(node.record_index)
                .is_some_and(|record| self.filters.accepts(record));
            node.visible = accepted;
            visible += accepted as usize;
        }
        self.visible_count = visible;
    }
}
