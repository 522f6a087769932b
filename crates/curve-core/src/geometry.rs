// File: crates/curve-core/src/geometry.rs
// Summary: Path outlines on kurbo: builder with pen tracking, SVG text, bounds and exact line crossings.

use kurbo::{BezPath, Line, ParamCurve, Shape};

pub use kurbo::{PathEl, Point, Rect};

/// Tolerance used when `a` in `intersect` carries curved segments.
const FLATTEN_TOLERANCE: f64 = 0.01;
const EPS: f64 = 1e-9;

/// A drawable outline. Wraps a `BezPath` and tracks the pen so vertical and
/// horizontal moves can be expressed without repeating the other coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    path: BezPath,
    pen: Point,
    start: Point,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: impl Into<Point>) -> Self {
        let p = p.into();
        self.path.move_to(p);
        self.pen = p;
        self.start = p;
        self
    }

    pub fn line_to(mut self, p: impl Into<Point>) -> Self {
        let p = p.into();
        self.path.line_to(p);
        self.pen = p;
        self
    }

    pub fn cubic_to(mut self, c1: impl Into<Point>, c2: impl Into<Point>, to: impl Into<Point>) -> Self {
        let to = to.into();
        self.path.curve_to(c1.into(), c2.into(), to);
        self.pen = to;
        self
    }

    pub fn vertical_to(self, y: f64) -> Self {
        let x = self.pen.x;
        self.line_to((x, y))
    }

    pub fn horizontal_to(self, x: f64) -> Self {
        let y = self.pen.y;
        self.line_to((x, y))
    }

    pub fn close(mut self) -> Self {
        self.path.close_path();
        self.pen = self.start;
        self
    }

    /// Vertical line from the top of the canvas down to `height` at `x`.
    pub fn vertical_probe(x: f64, height: f64) -> Self {
        PathData::new().move_to((x, 0.0)).vertical_to(height)
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    /// Tight bounds of the outline, curves included; `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.path.bounding_box())
    }

    /// SVG path text, e.g. `M0,10 C50,12.5 50,20 100,20`.
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }
}

/// Point at fractional position `(fx, fy)` inside `rect`.
pub fn at_fraction(rect: Rect, fx: f64, fy: f64) -> Point {
    Point::new(rect.x0 + rect.width() * fx, rect.y0 + rect.height() * fy)
}

/// Parameter along `line` of `p` when `p` lies on it.
fn param_on_line(line: Line, p: Point) -> Option<f64> {
    let d = line.p1 - line.p0;
    let len2 = d.hypot2();
    if len2 == 0.0 {
        return None;
    }
    let v = p - line.p0;
    if d.cross(v).abs() > EPS * len2.sqrt() {
        return None;
    }
    let t = d.dot(v) / len2;
    (-EPS..=1.0 + EPS).contains(&t).then_some(t.clamp(0.0, 1.0))
}

/// Crossings of one straight piece of `a` with every segment of `b`, as
/// `(line parameter, point, is_vertex)`.
fn crossings(line: Line, b: &BezPath, out: &mut Vec<(f64, Point, bool)>) {
    for seg in b.segments() {
        for end in [seg.start(), seg.end()] {
            if let Some(t) = param_on_line(line, end) {
                out.push((t, end, true));
            }
        }
        for hit in seg.intersect_line(line) {
            let mut p = seg.eval(hit.segment_t);
            // axis-aligned probes keep their constant coordinate
            if line.p0.x == line.p1.x {
                p.x = line.p0.x;
            }
            if line.p0.y == line.p1.y {
                p.y = line.p0.y;
            }
            out.push((hit.line_t, p, false));
        }
    }
}

/// Intersection points of two paths, ordered along `a`. Straight pieces of
/// `a` are exact; curved pieces are flattened first.
pub fn intersect(a: &PathData, b: &PathData) -> Vec<Point> {
    let mut pieces: Vec<Line> = Vec::new();
    let mut pen: Option<Point> = None;
    let mut start = Point::ZERO;
    a.path.flatten(FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            pen = Some(p);
            start = p;
        }
        PathEl::LineTo(p) => {
            if let Some(from) = pen {
                pieces.push(Line::new(from, p));
            }
            pen = Some(p);
        }
        PathEl::ClosePath => {
            if let Some(from) = pen {
                pieces.push(Line::new(from, start));
            }
            pen = Some(start);
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });

    // segment end points win over solved crossings at the same spot, so
    // curve nodes come back unchanged
    let mut hits: Vec<(Point, bool)> = Vec::new();
    for line in pieces {
        let mut found = Vec::new();
        crossings(line, &b.path, &mut found);
        found.sort_by(|x, y| x.0.total_cmp(&y.0));
        for (_, p, vertex) in found {
            match hits.last_mut() {
                Some(last) if (last.0.x - p.x).abs() < 1e-6 && (last.0.y - p.y).abs() < 1e-6 => {
                    if vertex && !last.1 {
                        *last = (p, true);
                    }
                }
                _ => hits.push((p, vertex)),
            }
        }
    }
    hits.into_iter().map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_text() {
        let d = PathData::new()
            .move_to((0.0, 10.0))
            .cubic_to((50.0, 12.5), (50.0, 20.0), (100.0, 20.0))
            .vertical_to(300.0)
            .horizontal_to(0.0)
            .close();
        assert_eq!(d.to_svg(), "M0,10 C50,12.5 50,20 100,20 L100,300 L0,300 Z");
    }

    #[test]
    fn vertical_line_hits_line_once() {
        let line = PathData::new().move_to((0.0, 0.0)).line_to((100.0, 100.0));
        let hits = intersect(&PathData::vertical_probe(25.0, 200.0), &line);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].x, 25.0);
        assert!((hits[0].y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn crossing_at_a_vertex_is_not_duplicated() {
        let line = PathData::new().move_to((0.0, 0.0)).line_to((50.0, 10.0)).line_to((100.0, 0.0));
        let hits = intersect(&PathData::vertical_probe(50.0, 100.0), &line);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], Point::new(50.0, 10.0));
    }

    #[test]
    fn vertical_line_outside_misses() {
        let line = PathData::new().move_to((0.0, 0.0)).line_to((100.0, 0.0));
        assert!(intersect(&PathData::vertical_probe(150.0, 100.0), &line).is_empty());
    }

    #[test]
    fn cubic_crossing_is_exact() {
        // symmetric S-curve: the midpoint x = 50 lies at y = 50
        let curve = PathData::new().move_to((0.0, 0.0)).cubic_to((50.0, 0.0), (50.0, 100.0), (100.0, 100.0));
        let hits = intersect(&PathData::vertical_probe(50.0, 200.0), &curve);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y - 50.0).abs() < 1e-9, "{:?}", hits[0]);

        let node = intersect(&PathData::vertical_probe(100.0, 200.0), &curve);
        assert_eq!(node, vec![Point::new(100.0, 100.0)]);
    }

    #[test]
    fn bounds_of_closed_area() {
        let d = PathData::new().move_to((0.0, 10.0)).line_to((100.0, 20.0)).vertical_to(300.0).horizontal_to(0.0).close();
        let b = d.bounds().unwrap();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, 10.0, 100.0, 300.0));
        assert_eq!(at_fraction(b, 0.5, 0.5), Point::new(50.0, 155.0));
        assert!(PathData::new().bounds().is_none());
    }
}
