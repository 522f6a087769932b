// File: crates/curve-core/src/style.rs
// Summary: Visual states of a curve and the stroke/fill styles each state maps to.

use crate::backend::FillHandle;
use crate::series::Rgba;

/// Emphasis of a rendered curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// The focused curve.
    Current,
    /// Drawn thin behind the focused curve.
    InView,
    /// Not drawn.
    Hidden,
}

/// Alpha of the focused area gradient at its opaque stop.
pub const AREA_ALPHA: f32 = 0.5;
/// White wash used behind curves that are not focused.
pub const OVERLAY: Rgba = Rgba::new(255, 255, 255, 0.35);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Linear gradient in fractions of the filled path's bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Vertical fade from `color` at `stop` down to transparent.
    pub fn fade(color: Rgba, opaque_alpha: f32, stop: f64) -> Self {
        Self {
            from: (0.5, 0.4),
            to: (0.5, 0.8),
            stops: vec![
                GradientStop { offset: stop.clamp(0.0, 1.0), color: color.with_alpha(opaque_alpha) },
                GradientStop { offset: 0.0, color: color.with_alpha(0.0) },
            ],
        }
    }

    /// Stops ordered by offset, as most rasterizers expect them.
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        stops
    }
}

/// Opaque gradient stop for a series: `1 - median / biggest`.
pub fn gradient_stop(median: f64, biggest_value: f64) -> f64 {
    if biggest_value > 0.0 { (1.0 - median / biggest_value).clamp(0.0, 1.0) } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    None,
    Gradient(FillHandle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    pub fill: Fill,
    pub round_cap: bool,
}

impl PathStyle {
    /// Style of helper geometry that is never drawn (probe lines).
    pub const INVISIBLE: PathStyle = PathStyle { stroke: None, stroke_width: 0.0, fill: Fill::None, round_cap: false };
}

/// The two gradients a curve switches between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveFills {
    pub focused: FillHandle,
    pub overlay: FillHandle,
}

/// Stroke style of the curve outline in `state`.
pub fn line_style(color: Rgba, state: VisualState) -> PathStyle {
    let stroke_width = match state {
        VisualState::Current => 2.0,
        VisualState::InView => 1.0,
        VisualState::Hidden => 0.0,
    };
    PathStyle { stroke: Some(color), stroke_width, fill: Fill::None, round_cap: true }
}

/// Fill style of the area under the curve in `state`.
pub fn area_style(fills: CurveFills, state: VisualState) -> PathStyle {
    let fill = match state {
        VisualState::Current => Fill::Gradient(fills.focused),
        VisualState::InView => Fill::Gradient(fills.overlay),
        VisualState::Hidden => Fill::None,
    };
    PathStyle { stroke: None, stroke_width: 0.0, fill, round_cap: false }
}
