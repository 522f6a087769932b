// File: crates/curve-core/src/hit.rs
// Summary: Closest-curve resolution for pointer clicks via vertical probe line intersection.

use log::trace;

use crate::backend::{Graphics, PathHandle};
use crate::geometry::PathData;
use crate::hierarchy::CurveId;
use crate::style::PathStyle;

/// Pointer position in viewport coordinates (`clientX`, `clientY`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickPosition {
    pub x: f64,
    pub y: f64,
}

impl ClickPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A vertical line used only for intersection tests. The drawable is
/// created on first use and repositioned afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProbeLine {
    handle: Option<PathHandle>,
    x: f64,
}

impl ProbeLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<PathHandle> {
        self.handle
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Move the probe to `x`, spanning `height` px.
    pub fn position<G: Graphics>(&mut self, graphics: &mut G, x: f64, height: f64) -> PathHandle {
        let data = PathData::vertical_probe(x, height);
        self.x = x;
        match self.handle {
            Some(h) => {
                graphics.update_path(h, &data);
                h
            }
            None => {
                let h = graphics.create_path(&data);
                graphics.set_style(h, &PathStyle::INVISIBLE);
                self.handle = Some(h);
                h
            }
        }
    }

    pub fn remove<G: Graphics>(&mut self, graphics: &mut G) {
        if let Some(h) = self.handle.take() {
            graphics.remove_path(h);
        }
    }
}

/// A curve that takes part in hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitTarget {
    pub id: CurveId,
    pub line: PathHandle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub curve: CurveId,
    /// Y where the probe crosses the curve.
    pub y: f64,
    pub distance: f64,
}

/// Finds the curve nearest to a click. Owns one cached probe per curve.
#[derive(Clone, Debug, Default)]
pub struct HitResolver {
    probes: Vec<ProbeLine>,
}

impl HitResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content x under a viewport click: the canvas is scrolled by
    /// `scroll_left` and the first point sits at the container's centre.
    pub fn probe_x(click: ClickPosition, scroll_left: f64, container_width: f64) -> f64 {
        click.x + scroll_left - container_width / 2.0
    }

    /// Intersect a probe at `probe_x` with every target and return the one
    /// whose crossing is vertically nearest `click_y`. Targets the probe does
    /// not cross are skipped; ties keep the earlier target.
    pub fn resolve_closest<G: Graphics>(
        &mut self,
        graphics: &mut G,
        targets: &[HitTarget],
        probe_x: f64,
        click_y: f64,
        height: f64,
    ) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for target in targets {
            if self.probes.len() <= target.id.0 {
                self.probes.resize(target.id.0 + 1, ProbeLine::new());
            }
            let probe = self.probes[target.id.0].position(graphics, probe_x, height);
            let Some(point) = graphics.intersection(probe, target.line).first().copied() else {
                trace!("probe at x={probe_x} misses curve {:?}", target.id);
                continue;
            };
            let distance = (click_y - point.y).abs();
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Hit { curve: target.id, y: point.y, distance });
            }
        }
        best
    }

    pub fn probe(&self, id: CurveId) -> Option<&ProbeLine> {
        self.probes.get(id.0)
    }

    pub fn clear<G: Graphics>(&mut self, graphics: &mut G) {
        for probe in &mut self.probes {
            probe.remove(graphics);
        }
        self.probes.clear();
    }
}
