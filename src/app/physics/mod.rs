mod quadtree;

use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::layout::{COLLISION_PADDING, WheelGeometry, point_in_polygon};

use super::chart::ChartNode;
use quadtree::QuadNode;

const ALPHA_START: f32 = 0.1;
const ALPHA_DECAY: f32 = 0.99;
const ALPHA_MIN: f32 = 0.005;
const CENTROID_PULL: f32 = 0.1;
const ESCAPE_NUDGE: f32 = 1.0;
const COLLIDE_ALPHA: f32 = 0.5;

/// Velocity-free tick relaxation. Each tick pulls nodes toward their region
/// centroid (or nudges strays back inside the region polygon) and then
/// resolves pairwise circle overlap through the quad-tree.
pub(in crate::app) struct Simulation {
    alpha: f32,
    running: bool,
}

impl Simulation {
    pub(in crate::app) fn new() -> Self {
        Self {
            alpha: 0.0,
            running: false,
        }
    }

    pub(in crate::app) fn start(&mut self) {
        self.alpha = ALPHA_START;
        self.running = true;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.running = false;
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn step(
        &mut self,
        nodes: &mut [ChartNode],
        wheel: &WheelGeometry,
        dragged: Option<usize>,
    ) -> bool {
        if !self.running || nodes.is_empty() {
            return false;
        }

        tick(nodes, wheel, self.alpha, dragged);

        self.alpha *= ALPHA_DECAY;
        if self.alpha < ALPHA_MIN {
            self.running = false;
        }
        true
    }
}

fn tick(nodes: &mut [ChartNode], wheel: &WheelGeometry, alpha: f32, dragged: Option<usize>) {
    let k = CENTROID_PULL * alpha;

    for (index, node) in nodes.iter_mut().enumerate() {
        if Some(index) == dragged {
            continue;
        }
        let Some(slice) = wheel.slices.get(node.region_index) else {
            continue;
        };

        let centroid = slice.centroid;
        if point_in_polygon(node.pos, &slice.polygon) {
            node.pos += (centroid - node.pos) * k;
        } else {
            node.pos.x += if node.pos.x < centroid.x {
                ESCAPE_NUDGE
            } else {
                -ESCAPE_NUDGE
            };
            node.pos.y += if node.pos.y < centroid.y {
                ESCAPE_NUDGE
            } else {
                -ESCAPE_NUDGE
            };
        }
    }

    collide(nodes, dragged, COLLIDE_ALPHA);
}

/// Pairwise overlap resolution: every node visits the quad-tree range that
/// could still hold a colliding neighbor and both parties shift apart along
/// the connecting vector.
fn collide(nodes: &mut [ChartNode], dragged: Option<usize>, alpha: f32) {
    let positions: Vec<Vec2> = nodes.iter().map(|node| node.pos).collect();
    let Some(tree) = QuadNode::build(&positions) else {
        return;
    };

    let max_radius = nodes
        .iter()
        .map(|node| node.radius)
        .fold(0.0_f32, f32::max);

    let mut candidates = Vec::new();
    for index in 0..nodes.len() {
        let center = nodes[index].pos;
        let reach = nodes[index].radius + max_radius + COLLISION_PADDING;
        let reach = vec2(reach, reach);

        candidates.clear();
        tree.visit_range(center - reach, center + reach, &mut |other| {
            if other != index {
                candidates.push(other);
            }
        });

        for &other in &candidates {
            let delta = nodes[index].pos - nodes[other].pos;
            let distance = delta.length();
            let threshold = nodes[index].radius + nodes[other].radius + COLLISION_PADDING;
            if distance >= threshold {
                continue;
            }

            let shift = if distance > 1e-4 {
                delta * ((distance - threshold) / distance * alpha)
            } else {
                let angle =
                    ((index as f32) * 0.618_034 + (other as f32) * 0.414_214) * TAU;
                vec2(angle.cos(), angle.sin()) * (-threshold * alpha)
            };

            if Some(index) != dragged {
                nodes[index].pos -= shift;
            }
            if Some(other) != dragged {
                nodes[other].pos += shift;
            }
        }
    }
}
