// File: crates/curve-core/src/marker.rs
// Summary: Scroll-driven reading marker: probe intersection, edge clamping, nearest point lookup.
// Notes:
// - Scroll events do the full update and request at most one refresh; the
//   refresh re-places the marker and returns the machine to `Idle`.
// - Per-curve state is kept so a curve that regains focus resumes from its
//   last known intersection.

use log::trace;

use crate::backend::{Graphics, PathHandle};
use crate::geometry::Point;
use crate::hierarchy::CurveId;
use crate::hit::ProbeLine;
use crate::path::CurvePath;
use crate::series::{LabelFormatter, Rgba, Series};

/// Half the marker's on-screen size; the marker is drawn centred on its point.
pub const MARKER_RADIUS: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    PendingRefresh,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerState {
    pub scroll_offset: f64,
    pub nearest_index: usize,
    /// Last point where the probe crossed the curve. Only ever overwritten
    /// by a newer crossing.
    pub intersection_point: Point,
}

/// What the host needs to draw the marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerFrame {
    pub curve: String,
    pub color: Rgba,
    /// Screen offset of the marker's top-left corner.
    pub left: f64,
    pub top: f64,
    /// Curve point the marker is attached to, in canvas pixels.
    pub point: Point,
    pub nearest_index: usize,
    pub label: String,
    pub value: String,
}

/// The focused curve as the synchronizer sees it.
#[derive(Clone, Copy, Debug)]
pub struct MarkerTarget<'a> {
    pub id: CurveId,
    pub line: PathHandle,
    pub series: &'a Series,
    pub path: &'a CurvePath,
    pub formatter: &'a LabelFormatter,
}

/// `round(scroll / width)` clamped into `0..len`.
pub fn nearest_index(scroll: f64, width: f64, len: usize) -> usize {
    if len == 0 || !(width > 0.0) || !scroll.is_finite() {
        return 0;
    }
    let raw = (scroll / width).round();
    raw.clamp(0.0, (len - 1) as f64) as usize
}

#[derive(Clone, Debug)]
pub struct MarkerSynchronizer {
    probe: ProbeLine,
    states: Vec<MarkerState>,
    refresh: RefreshState,
    viewport_width: f64,
    canvas_height: f64,
}

impl MarkerSynchronizer {
    /// One state per curve, each starting at that curve's last point.
    pub fn new(last_points: impl IntoIterator<Item = Point>, viewport_width: f64, canvas_height: f64) -> Self {
        let states = last_points
            .into_iter()
            .map(|p| MarkerState { scroll_offset: 0.0, nearest_index: 0, intersection_point: p })
            .collect();
        Self { probe: ProbeLine::new(), states, refresh: RefreshState::Idle, viewport_width, canvas_height }
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh
    }

    pub fn state(&self, id: CurveId) -> Option<&MarkerState> {
        self.states.get(id.0)
    }

    pub fn probe(&self) -> &ProbeLine {
        &self.probe
    }

    /// Scroll offset of the most recent update.
    pub fn scroll_offset(&self) -> f64 {
        self.probe.x()
    }

    /// Full update for a scroll event. Returns `true` when the caller should
    /// schedule a refresh on the next display frame.
    pub fn on_scroll<G: Graphics>(&mut self, graphics: &mut G, target: MarkerTarget<'_>, scroll: f64) -> bool {
        self.sync(graphics, target, scroll);
        match self.refresh {
            RefreshState::Idle => {
                self.refresh = RefreshState::PendingRefresh;
                true
            }
            RefreshState::PendingRefresh => false,
        }
    }

    /// Next-frame callback: re-run the intersection against the latest probe
    /// position and go back to `Idle`.
    pub fn refresh<G: Graphics>(&mut self, graphics: &G, target: MarkerTarget<'_>) -> MarkerFrame {
        self.intersect(graphics, target);
        self.refresh = RefreshState::Idle;
        self.frame(target)
    }

    /// Bring `target`'s state up to date with `scroll` without touching the
    /// refresh machine. Used directly when focus changes.
    pub fn sync<G: Graphics>(&mut self, graphics: &mut G, target: MarkerTarget<'_>, scroll: f64) {
        self.probe.position(graphics, scroll, self.canvas_height);
        self.ensure_state(target);
        let len = target.series.data.len();
        if let Some(state) = self.states.get_mut(target.id.0) {
            state.scroll_offset = scroll;
            state.nearest_index = nearest_index(scroll, target.path.width, len);
        }
        self.intersect(graphics, target);
        trace!("marker sync: curve {:?} scroll {scroll}", target.id);
    }

    fn ensure_state(&mut self, target: MarkerTarget<'_>) {
        while self.states.len() <= target.id.0 {
            self.states.push(MarkerState {
                scroll_offset: 0.0,
                nearest_index: 0,
                intersection_point: target.path.last_point(),
            });
        }
    }

    fn intersect<G: Graphics>(&mut self, graphics: &G, target: MarkerTarget<'_>) {
        let Some(probe) = self.probe.handle() else { return };
        let Some(hit) = graphics.intersection(probe, target.line).first().copied() else { return };
        if let Some(state) = self.states.get_mut(target.id.0) {
            state.intersection_point = hit;
        }
    }

    /// Marker placement for `target` from its current state.
    pub fn frame(&self, target: MarkerTarget<'_>) -> MarkerFrame {
        let fallback = MarkerState {
            scroll_offset: self.scroll_offset(),
            nearest_index: 0,
            intersection_point: target.path.last_point(),
        };
        let state = self.states.get(target.id.0).copied().unwrap_or(fallback);
        let scroll = state.scroll_offset;
        let content_width = target.path.content_width();
        let centre = self.viewport_width / 2.0 - MARKER_RADIUS;

        let (point, left) = if scroll <= 0.0 {
            (target.path.first_point(), centre - scroll)
        } else if scroll >= content_width {
            (target.path.last_point(), centre - (scroll - content_width))
        } else {
            (state.intersection_point, centre)
        };

        let (label, value) = match target.series.point_clamped(state.nearest_index as i64) {
            Some(p) => (target.formatter.label(p), target.formatter.value_text(p)),
            None => (String::new(), String::new()),
        };

        MarkerFrame {
            curve: target.series.name.clone(),
            color: target.series.color,
            left,
            top: point.y - MARKER_RADIUS,
            point,
            nearest_index: state.nearest_index,
            label,
            value,
        }
    }

    pub fn clear<G: Graphics>(&mut self, graphics: &mut G) {
        self.probe.remove(graphics);
    }
}
