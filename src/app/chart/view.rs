use eframe::egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui, epaint::TextShape,
    pos2, vec2,
};

use crate::layout::{BAR_HEIGHT, LABEL_DISTANCE, OUTER_RADIUS, slice_direction};

use super::super::ViewModel;
use super::super::events::VizEvent;
use super::super::render_utils::{
    BACKDROP_COLOR, CanvasTransform, LABEL_BAND_COLOR, blend_color, region_color, rotate_vec,
    with_opacity,
};
use super::super::transition::LayoutMode;
use super::{MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, VIRTUAL_WIDTH};

const AXIS_COLOR: Color32 = Color32::from_gray(150);
const SECTOR_FILL_OPACITY: f32 = 0.18;
const DIVIDER_OPACITY: f32 = 0.4;

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        self.ensure_chart();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKDROP_COLOR);

        let visuals = self.mode.visuals();
        let in_domain = self.mode.settled() == Some(LayoutMode::Domain);
        let hovered_before = self.hovered;
        let selected = self.selected;
        let dragged = self.dragged;
        let pointer = ui.input(|input| input.pointer.hover_pos());

        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let transform = CanvasTransform::fit(rect, chart.virtual_size);
        let center = chart.center;
        let chart_width = VIRTUAL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let mut events: Vec<VizEvent> = Vec::new();

        // Timeline decorations come first so the wheel draws over them while
        // it is still visible.
        if visuals.axis_reveal > 0.0 {
            let axis_y = chart.virtual_size.y - MARGIN_BOTTOM;
            let axis_alpha = visuals.axis_reveal;
            let axis_stroke = Stroke::new(1.0, with_opacity(AXIS_COLOR, axis_alpha));

            painter.line_segment(
                [
                    transform.to_screen(vec2(MARGIN_LEFT, axis_y)),
                    transform.to_screen(vec2(chart_width, axis_y)),
                ],
                axis_stroke,
            );

            for (year, x) in chart.timeline.x.year_ticks() {
                let top = transform.to_screen(vec2(x, axis_y));
                let bottom = transform.to_screen(vec2(x, axis_y + 5.0));
                painter.line_segment([top, bottom], axis_stroke);
                painter.text(
                    bottom + vec2(0.0, 2.0),
                    Align2::CENTER_TOP,
                    year.to_string(),
                    FontId::proportional(11.0),
                    with_opacity(AXIS_COLOR, axis_alpha),
                );
            }

            // Region divider lines grow out from the left edge.
            let divider_reach = MARGIN_LEFT + (chart_width - MARGIN_LEFT) * visuals.axis_reveal;
            for (index, band) in chart.timeline.bands.iter().enumerate() {
                let y = MARGIN_TOP + band.label_y;
                painter.line_segment(
                    [
                        transform.to_screen(vec2(MARGIN_LEFT, y)),
                        transform.to_screen(vec2(divider_reach, y)),
                    ],
                    Stroke::new(
                        1.0,
                        with_opacity(region_color(index), DIVIDER_OPACITY * axis_alpha),
                    ),
                );
            }
        }

        // Wheel decorations: background sectors plus the label band arc.
        if visuals.decoration_opacity > 0.0 {
            let opacity = visuals.decoration_opacity;
            for (index, slice) in chart.wheel.slices.iter().enumerate() {
                let fill = with_opacity(region_color(index), SECTOR_FILL_OPACITY * opacity);
                if chart.wheel.slices.len() == 1 {
                    painter.circle_filled(
                        transform.to_screen(center),
                        OUTER_RADIUS * transform.scale,
                        fill,
                    );
                } else {
                    let mut points: Vec<Pos2> = Vec::with_capacity(26);
                    points.push(transform.to_screen(center));
                    for sample in 0..=24 {
                        let t = sample as f32 / 24.0;
                        let angle = slice.start_angle + slice.angular_span() * t;
                        points.push(
                            transform.to_screen(center + slice_direction(angle) * OUTER_RADIUS),
                        );
                    }
                    painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
                }

                let band_radius = OUTER_RADIUS + LABEL_DISTANCE * 0.5;
                let band_points: Vec<Pos2> = (0..=24)
                    .map(|sample| {
                        let t = sample as f32 / 24.0;
                        let pad = 0.005;
                        let angle = (slice.start_angle + pad)
                            + (slice.angular_span() - 2.0 * pad) * t;
                        transform.to_screen(center + slice_direction(angle) * band_radius)
                    })
                    .collect();
                painter.add(Shape::line(
                    band_points,
                    Stroke::new(
                        LABEL_DISTANCE * transform.scale,
                        with_opacity(LABEL_BAND_COLOR, opacity),
                    ),
                ));
            }
        }

        // Region labels morph between the arc anchors and the band anchors.
        for (index, slice) in chart.wheel.slices.iter().enumerate() {
            let band = &chart.timeline.bands[index];
            let arc_anchor =
                center + slice_direction(slice.mid_angle()) * (OUTER_RADIUS + LABEL_DISTANCE * 0.5);
            let band_anchor = vec2(MARGIN_LEFT + 60.0, MARGIN_TOP + band.label_y);

            let place = visuals.label_place;
            let anchor = arc_anchor + (band_anchor - arc_anchor) * place;
            let angle = slice.mid_angle() * (1.0 - place);
            let color = blend_color(region_color(index), Color32::WHITE, visuals.decoration_opacity);

            let galley = painter.layout_no_wrap(
                slice.region.clone(),
                FontId::proportional(14.0),
                color,
            );
            let pivot = transform.to_screen(anchor);
            let top_left = pivot - rotate_vec(galley.size() * 0.5, angle);
            painter.add(TextShape::new(top_left, galley, color).with_angle(angle));
        }

        // Nodes: position, size, and styling all interpolate with the mode.
        let mut marks: Vec<(usize, Rect, f32)> = Vec::with_capacity(chart.nodes.len());
        for (index, node) in chart.nodes.iter().enumerate() {
            let alpha = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-visible", node.record_index)),
                node.visible,
            );
            if alpha <= 0.01 {
                continue;
            }

            let domain_pos = center + node.pos;
            let timeline_pos = vec2(
                node.timeline_pos.x,
                MARGIN_TOP + node.timeline_pos.y,
            );
            let mark_center = domain_pos + (timeline_pos - domain_pos) * visuals.node_place;

            let width = BAR_HEIGHT + (node.bar_width - BAR_HEIGHT) * visuals.axis_reveal;
            let height = BAR_HEIGHT;
            let screen_center = transform.to_screen(mark_center);
            let mark = Rect::from_min_size(
                pos2(
                    screen_center.x - height * 0.5 * transform.scale,
                    screen_center.y - height * 0.5 * transform.scale,
                ),
                vec2(width * transform.scale, height * transform.scale),
            );
            marks.push((index, mark, alpha));
        }

        let hovered_now = super::interaction::hovered_mark(&marks, pointer);

        for &(index, mark, alpha) in &marks {
            let node = &chart.nodes[index];
            let is_hovered = hovered_now == Some(index);
            let is_selected = selected == Some(node.record_index);

            let mut fill_alpha = alpha;
            if is_hovered {
                fill_alpha *= 0.6;
            }
            let fill = with_opacity(region_color(node.region_index), fill_alpha);
            let rounding = BAR_HEIGHT * 0.5 * transform.scale;
            painter.rect_filled(mark, rounding, fill);

            if is_selected {
                painter.rect_stroke(
                    mark,
                    rounding,
                    Stroke::new(2.0, with_opacity(Color32::BLACK, alpha)),
                    StrokeKind::Outside,
                );
            }
        }

        if let Some(index) = hovered_now {
            ui.output_mut(|output| {
                output.cursor_icon = eframe::egui::CursorIcon::PointingHand;
            });

            if let Some(record) = self.catalog.records.get(chart.nodes[index].record_index) {
                painter.text(
                    rect.left_top() + vec2(10.0, 10.0),
                    Align2::LEFT_TOP,
                    super::super::ui::record_summary(record),
                    FontId::proportional(13.0),
                    Color32::from_gray(240),
                );
            }
        }

        let hovered_records = (
            hovered_before,
            hovered_now.map(|index| chart.nodes[index].record_index),
        );
        if hovered_records.0 != hovered_records.1 {
            match hovered_records.1 {
                Some(record_index) => events.push(VizEvent::NodeHovered(record_index)),
                None => events.push(VizEvent::NodeUnhovered),
            }
        }

        if response.clicked()
            && let Some(index) = hovered_now
        {
            events.push(VizEvent::NodeSelected(chart.nodes[index].record_index));
        }

        // Node dragging only makes sense while the simulation layout is live.
        let mut drag_finished = false;
        let mut drag_started_on = None;
        if in_domain {
            if response.drag_started()
                && let Some(index) = hovered_now
            {
                drag_started_on = Some(index);
            }
            if response.dragged()
                && let Some(index) = dragged
                && let Some(node) = chart.nodes.get_mut(index)
            {
                node.pos += response.drag_delta() / transform.scale;
            }
            if response.drag_stopped() && dragged.is_some() {
                drag_finished = true;
            }
        }

        if let Some(index) = drag_started_on {
            self.dragged = Some(index);
        }
        if drag_finished {
            self.dragged = None;
            self.simulation.start();
        }

        for event in events {
            self.bus.publish(event);
        }
        if !self.bus.is_empty() {
            ui.ctx().request_repaint();
        }
    }
}
