// File: crates/curve-core/src/lib.rs
// Summary: Core library entry point; exports the curve chart engine's public API.

pub mod error;
pub mod scale;
pub mod geometry;
pub mod path;
pub mod series;
pub mod config;
pub mod style;
pub mod backend;
pub mod hierarchy;
pub mod hit;
pub mod marker;
pub mod chart;
pub mod binding;

pub use error::{ChartError, Result};
pub use scale::{map_range, VerticalMapper};
pub use geometry::{PathData, Point, Rect};
pub use path::{CurveBuilder, CurvePath};
pub use series::{DataPoint, LabelFormatter, Rgba, Series};
pub use config::{ChartConfig, SeriesConfig};
pub use style::VisualState;
pub use backend::{Display, FillHandle, Graphics, PathHandle, SceneGraphics};
pub use hierarchy::{CurveId, Hierarchy};
pub use hit::{ClickPosition, HitResolver};
pub use marker::{MarkerFrame, MarkerSynchronizer, RefreshState, MARKER_RADIUS};
pub use chart::{Chart, ChartState, RenderedCurve, Viewport};
pub use binding::ChartBinding;
