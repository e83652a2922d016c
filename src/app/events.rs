use std::collections::VecDeque;

use super::ViewModel;
use super::transition::{LayoutMode, SimulationSignal};

/// The one bus shared by the chart, the info panel, and the controls.
/// Events published during a frame are drained at the start of the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum VizEvent {
    DrawDomain,
    DrawTimeline,
    FilterUpdate,
    NodeHovered(usize),
    NodeUnhovered,
    NodeSelected(usize),
}

#[derive(Default)]
pub(in crate::app) struct EventBus {
    queue: VecDeque<VizEvent>,
}

impl EventBus {
    pub(in crate::app) fn publish(&mut self, event: VizEvent) {
        self.queue.push_back(event);
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn drain(&mut self) -> VecDeque<VizEvent> {
        std::mem::take(&mut self.queue)
    }
}

impl ViewModel {
    pub(in crate::app) fn apply_events(&mut self) {
        for event in self.bus.drain() {
            match event {
                VizEvent::DrawDomain => self.request_mode(LayoutMode::Domain),
                VizEvent::DrawTimeline => self.request_mode(LayoutMode::Timeline),
                VizEvent::FilterUpdate => self.apply_filters(),
                VizEvent::NodeHovered(index) => self.hovered = Some(index),
                VizEvent::NodeUnhovered => self.hovered = None,
                VizEvent::NodeSelected(index) => self.toggle_selected(index),
            }
        }
    }

    fn request_mode(&mut self, to: LayoutMode) {
        let (_outcome, signal) = self.mode.request(to);
        self.handle_simulation_signal(signal);
    }

    pub(in crate::app) fn handle_simulation_signal(&mut self, signal: Option<SimulationSignal>) {
        match signal {
            Some(SimulationSignal::Stop) => self.simulation.stop(),
            Some(SimulationSignal::Restart) => self.simulation.start(),
            None => {}
        }
    }

    fn toggle_selected(&mut self, index: usize) {
        if self.selected == Some(index) {
            self.selected = None;
        } else {
            self.selected = Some(index);
        }
    }
}
