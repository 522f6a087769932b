// File: crates/curve-core/src/path.rs
// Summary: Smooth curve construction: Bezier handles per point with extremum damping.
// Notes:
// - Input values are already in pixel space (see `scale::VerticalMapper`).
// - Point i sits at x = i * width; handles reach half a spacing either side.

use crate::error::{ChartError, Result};
use crate::geometry::{PathData, Point};

/// Horizontal spacing between consecutive points when none is configured.
pub const DEFAULT_WIDTH: f64 = 100.0;
/// Distance (px) at which a handle is considered to have reached its neighbour.
pub const DEFAULT_ALLOW: f64 = 1.0;

/// Incoming (`x1, y1`) and outgoing (`x2, y2`) control points of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handles {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A point on the curve with its control handles. The first node has no
/// incoming handle and the last has no outgoing one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveNode {
    pub point: Point,
    pub handle_in: Option<Point>,
    pub handle_out: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveBuilder {
    pub width: f64,
    pub allow: f64,
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, allow: DEFAULT_ALLOW }
    }
}

impl CurveBuilder {
    pub fn new(width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ChartError::invalid(format!("point spacing must be positive, got {width}")));
        }
        Ok(Self { width, allow: DEFAULT_ALLOW })
    }

    pub fn with_allow(mut self, allow: f64) -> Self {
        self.allow = allow.max(0.0);
        self
    }

    #[inline]
    pub fn handle_offset(&self) -> f64 {
        self.width / 2.0
    }

    /// Handles for interior index `i` (0 < i < len - 1). `None` for the
    /// boundary points and out-of-range indices.
    pub fn handles(&self, values: &[f64], i: usize) -> Option<Handles> {
        if i == 0 || i + 1 >= values.len() {
            return None;
        }
        let offset = self.handle_offset();
        let this = values[i];
        let prev_value = values[i - 1];
        let next_value = values[i + 1];
        let prev_diff = this - prev_value;
        let next_diff = next_value - this;

        let x = i as f64 * self.width;
        let mut h = Handles { x1: x - offset, y1: this, x2: x + offset, y2: this };

        let monotonic = (prev_diff < 0.0 && next_diff < 0.0) || (prev_diff > 0.0 && next_diff > 0.0);
        if !monotonic {
            // peak, trough or plateau: flat tangent
            return Some(h);
        }

        h.y1 = this - next_diff / 2.0;
        h.y2 = this + next_diff / 2.0;
        let handle_diff =
            ((prev_diff / 2.0) * next_diff - (next_diff / 2.0) * next_diff) / (next_diff + prev_diff);
        h.y1 -= handle_diff;
        h.y2 += handle_diff;

        if (next_value - h.y2).abs() < self.allow {
            h.x2 -= offset / 2.0;
            h.y2 -= (h.y2 - this) / 2.0;
        }
        if (prev_value - h.y1).abs() < self.allow {
            h.x1 += offset / 2.0;
            h.y1 -= (h.y1 - this) / 2.0;
        }
        Some(h)
    }

    /// Build the curve through `values`. Fails for fewer than two points or
    /// non-finite input.
    pub fn build(&self, values: &[f64]) -> Result<CurvePath> {
        let n = values.len();
        if n < 2 {
            return Err(ChartError::InsufficientData { series: String::new(), len: n });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::invalid("curve values must be finite"));
        }
        let offset = self.handle_offset();
        let last = n - 1;

        let nodes = values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let point = Point::new(i as f64 * self.width, y);
                if i == 0 {
                    let next_diff = values[1] - y;
                    CurveNode { point, handle_in: None, handle_out: Some(Point::new(offset, y + next_diff / 2.0)) }
                } else if i == last {
                    let prev_diff = y - values[i - 1];
                    CurveNode {
                        point,
                        handle_in: Some(Point::new(point.x - offset, y - prev_diff / 2.0)),
                        handle_out: None,
                    }
                } else {
                    let h = self.handles(values, i).unwrap_or(Handles { x1: point.x, y1: y, x2: point.x, y2: y });
                    CurveNode {
                        point,
                        handle_in: Some(Point::new(h.x1, h.y1)),
                        handle_out: Some(Point::new(h.x2, h.y2)),
                    }
                }
            })
            .collect();

        Ok(CurvePath { nodes, width: self.width })
    }
}

/// Built curve: nodes in x order.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePath {
    pub nodes: Vec<CurveNode>,
    pub width: f64,
}

impl CurvePath {
    pub fn first_point(&self) -> Point {
        self.nodes.first().map(|n| n.point).unwrap_or_default()
    }

    pub fn last_point(&self) -> Point {
        self.nodes.last().map(|n| n.point).unwrap_or_default()
    }

    /// Horizontal extent from the first to the last point.
    pub fn content_width(&self) -> f64 {
        self.nodes.len().saturating_sub(1) as f64 * self.width
    }

    /// Stroke outline: one cubic per pair of consecutive nodes.
    pub fn line(&self) -> PathData {
        let mut d = PathData::new();
        let Some(first) = self.nodes.first() else { return d };
        d = d.move_to(first.point);
        for pair in self.nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            d = d.cubic_to(
                a.handle_out.unwrap_or(a.point),
                b.handle_in.unwrap_or(b.point),
                b.point,
            );
        }
        d
    }

    /// Outline closed down to `baseline` for the area fill.
    pub fn area(&self, baseline: f64) -> PathData {
        let d = self.line();
        if d.is_empty() {
            return d;
        }
        d.vertical_to(baseline).horizontal_to(0.0).close()
    }

    pub fn to_svg(&self) -> String {
        self.line().to_svg()
    }
}
