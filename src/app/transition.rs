/// Layout-mode state machine. A mode switch is a fixed sequence of timed
/// stages; a request arriving mid-flight is queued (capacity one, latest
/// wins) and applied once the running sequence settles, so a stage sequence
/// is never interrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum LayoutMode {
    Domain,
    Timeline,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Settled(LayoutMode),
    Transitioning {
        to: LayoutMode,
        elapsed_ms: f32,
        pending: Option<LayoutMode>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum RequestOutcome {
    Started,
    Queued,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum SimulationSignal {
    Stop,
    Restart,
}

/// Interpolation factors consumed by the chart adapter. All values are in
/// [0, 1]; 0 is the pure domain rendering, 1 the pure timeline rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ModeVisuals {
    /// Pie slices, label band backdrop, label tint (1 = fully shown).
    pub decoration_opacity: f32,
    /// Region labels: 0 = arc anchors, 1 = band anchors.
    pub label_place: f32,
    /// Node marks: 0 = simulation positions, 1 = timeline positions.
    pub node_place: f32,
    /// Axis opacity, divider extension, and date-span bar extension.
    pub axis_reveal: f32,
}

// Stage windows in milliseconds, derived from the original's chained
// transitions: decorations, labels, nodes, then axis on the way out;
// the same stages reversed on the way back.
const TL_DECOR_END: f32 = 250.0;
const TL_LABEL_END: f32 = 1250.0;
const TL_NODES_END: f32 = 1750.0;
const TL_AXIS_END: f32 = 2250.0;

const DOM_AXIS_END: f32 = 500.0;
const DOM_NODES_END: f32 = 1000.0;
const DOM_LABEL_END: f32 = 2000.0;
const DOM_DECOR_END: f32 = 2750.0;

pub(in crate::app) struct ModeMachine {
    state: State,
}

impl ModeMachine {
    pub(in crate::app) fn new(mode: LayoutMode) -> Self {
        Self {
            state: State::Settled(mode),
        }
    }

    /// The mode the machine will end up in once all queued work settles.
    pub(in crate::app) fn target(&self) -> LayoutMode {
        match self.state {
            State::Settled(mode) => mode,
            State::Transitioning { to, pending, .. } => pending.unwrap_or(to),
        }
    }

    pub(in crate::app) fn settled(&self) -> Option<LayoutMode> {
        match self.state {
            State::Settled(mode) => Some(mode),
            State::Transitioning { .. } => None,
        }
    }

    pub(in crate::app) fn is_transitioning(&self) -> bool {
        matches!(self.state, State::Transitioning { .. })
    }

    pub(in crate::app) fn request(
        &mut self,
        to: LayoutMode,
    ) -> (RequestOutcome, Option<SimulationSignal>) {
        match &mut self.state {
            State::Settled(mode) if *mode == to => (RequestOutcome::Ignored, None),
            State::Settled(_) => {
                self.state = State::Transitioning {
                    to,
                    elapsed_ms: 0.0,
                    pending: None,
                };
                let signal = (to == LayoutMode::Timeline).then_some(SimulationSignal::Stop);
                (RequestOutcome::Started, signal)
            }
            State::Transitioning { to: current, pending, .. } => {
                if *current == to && pending.is_none() {
                    (RequestOutcome::Ignored, None)
                } else if *current == to {
                    *pending = None;
                    (RequestOutcome::Queued, None)
                } else {
                    *pending = Some(to);
                    (RequestOutcome::Queued, None)
                }
            }
        }
    }

    pub(in crate::app) fn advance(&mut self, dt_ms: f32) -> Option<SimulationSignal> {
        let State::Transitioning {
            to,
            elapsed_ms,
            pending,
        } = &mut self.state
        else {
            return None;
        };

        let before = *elapsed_ms;
        *elapsed_ms += dt_ms.max(0.0);
        let mut signal = None;

        // The simulation resumes the moment nodes are back in place,
        // not when the whole sequence ends.
        if *to == LayoutMode::Domain && before < DOM_NODES_END && *elapsed_ms >= DOM_NODES_END {
            signal = Some(SimulationSignal::Restart);
        }

        let total = match *to {
            LayoutMode::Timeline => TL_AXIS_END,
            LayoutMode::Domain => DOM_DECOR_END,
        };

        if *elapsed_ms >= total {
            let settled = *to;
            let next = pending.take();
            self.state = State::Settled(settled);

            if let Some(next) = next
                && next != settled
            {
                self.state = State::Transitioning {
                    to: next,
                    elapsed_ms: 0.0,
                    pending: None,
                };
                if next == LayoutMode::Timeline {
                    signal = Some(SimulationSignal::Stop);
                }
            }
        }

        signal
    }

    pub(in crate::app) fn visuals(&self) -> ModeVisuals {
        match self.state {
            State::Settled(LayoutMode::Domain) => ModeVisuals {
                decoration_opacity: 1.0,
                label_place: 0.0,
                node_place: 0.0,
                axis_reveal: 0.0,
            },
            State::Settled(LayoutMode::Timeline) => ModeVisuals {
                decoration_opacity: 0.0,
                label_place: 1.0,
                node_place: 1.0,
                axis_reveal: 1.0,
            },
            State::Transitioning {
                to: LayoutMode::Timeline,
                elapsed_ms,
                ..
            } => ModeVisuals {
                decoration_opacity: 1.0 - stage(elapsed_ms, 0.0, TL_DECOR_END),
                label_place: ease_cubic_in_out(stage(elapsed_ms, TL_DECOR_END, TL_LABEL_END)),
                node_place: ease_cubic_in_out(stage(elapsed_ms, TL_LABEL_END, TL_NODES_END)),
                axis_reveal: ease_cubic_in_out(stage(elapsed_ms, TL_NODES_END, TL_AXIS_END)),
            },
            State::Transitioning {
                to: LayoutMode::Domain,
                elapsed_ms,
                ..
            } => ModeVisuals {
                axis_reveal: 1.0 - ease_cubic_in_out(stage(elapsed_ms, 0.0, DOM_AXIS_END)),
                node_place: 1.0 - ease_cubic_in_out(stage(elapsed_ms, DOM_AXIS_END, DOM_NODES_END)),
                label_place: 1.0
                    - ease_cubic_in_out(stage(elapsed_ms, DOM_NODES_END, DOM_LABEL_END)),
                decoration_opacity: stage(elapsed_ms, DOM_LABEL_END, DOM_DECOR_END),
            },
        }
    }
}

fn stage(elapsed: f32, start: f32, end: f32) -> f32 {
    ((elapsed - start) / (end - start)).clamp(0.0, 1.0)
}

fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - (u * u * u) / 2.0
    }
}
