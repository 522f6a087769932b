// File: crates/curve-core/src/chart.rs
// Summary: Chart assembly from config and dispatch of clicks, scrolls and refreshes.
// Notes:
// - Pure construction: no display access here. `binding::ChartBinding`
//   connects a chart to a `Display`.
// - Each component owns its state; the chart only passes values between them.

use log::{debug, warn};

use crate::backend::{Display, Graphics, PathHandle};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::hierarchy::{CurveId, Hierarchy};
use crate::hit::{ClickPosition, HitResolver, HitTarget};
use crate::marker::{MarkerFrame, MarkerSynchronizer, MarkerTarget};
use crate::path::{CurveBuilder, CurvePath};
use crate::scale::{biggest_value, median, VerticalMapper};
use crate::series::{DataPoint, LabelFormatter, Series};
use crate::style::{
    area_style, gradient_stop, line_style, CurveFills, LinearGradient, VisualState, AREA_ALPHA, OVERLAY,
};

/// Offset kept from the right edge when scrolling to the end initially.
const END_SCROLL_INSET: f64 = 0.1;

/// Element metrics the chart is laid out against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub container_width: f64,
    pub container_height: f64,
    pub container_top: f64,
    pub viewport_width: f64,
}

impl Viewport {
    pub fn from_display<D: Display>(display: &D) -> Self {
        Self {
            container_width: display.container_width(),
            container_height: display.container_height(),
            container_top: display.container_top(),
            viewport_width: display.viewport_width(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartState {
    pub biggest_value: f64,
    pub canvas_height: f64,
    pub closest_curve: CurveId,
}

/// A series built into the chart with its geometry and graphics handles.
#[derive(Clone, Debug)]
pub struct RenderedCurve {
    pub id: CurveId,
    pub series: Series,
    pub path: CurvePath,
    pub formatter: LabelFormatter,
    pub state: VisualState,
    line: PathHandle,
    area: PathHandle,
    fills: CurveFills,
}

impl RenderedCurve {
    pub fn name(&self) -> &str {
        &self.series.name
    }

    pub fn line_handle(&self) -> PathHandle {
        self.line
    }

    pub fn area_handle(&self) -> PathHandle {
        self.area
    }

    pub fn fills(&self) -> CurveFills {
        self.fills
    }

    fn marker_target(&self) -> MarkerTarget<'_> {
        MarkerTarget {
            id: self.id,
            line: self.line,
            series: &self.series,
            path: &self.path,
            formatter: &self.formatter,
        }
    }
}

pub struct Chart<G: Graphics> {
    graphics: G,
    curves: Vec<RenderedCurve>,
    hierarchy: Hierarchy,
    hit: HitResolver,
    marker: MarkerSynchronizer,
    mapper: VerticalMapper,
    builder: CurveBuilder,
    viewport: Viewport,
}

fn fills_for<G: Graphics>(graphics: &mut G, series: &Series, biggest: f64) -> CurveFills {
    let stop = gradient_stop(median(&series.values()).unwrap_or(0.0), biggest);
    CurveFills {
        focused: graphics.linear_gradient(&LinearGradient::fade(series.color, AREA_ALPHA, stop)),
        overlay: graphics.linear_gradient(&LinearGradient::fade(OVERLAY, OVERLAY.a, stop)),
    }
}

impl<G: Graphics> Chart<G> {
    /// Build every curve described by `config`. Fails without drawing
    /// anything when the config or any series is invalid.
    pub fn new(config: &ChartConfig, mut graphics: G, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let series = config.to_series()?;
        let hierarchy = Hierarchy::build(&series)?;
        let mapper = VerticalMapper::new(biggest_value(&series), viewport.container_height)?;
        let builder = CurveBuilder::new(config.width)?;

        let mut paths = Vec::with_capacity(hierarchy.len());
        for member in hierarchy.members() {
            let s = &series[member.source_index];
            let path = builder.build(&mapper.convert_series(s)?).map_err(|e| match e {
                ChartError::InsufficientData { len, .. } => ChartError::InsufficientData { series: s.name.clone(), len },
                other => other,
            })?;
            paths.push(path);
        }

        let mut curves = Vec::with_capacity(paths.len());
        for (i, (member, path)) in hierarchy.members().iter().zip(paths).enumerate() {
            let s = series[member.source_index].clone();
            let area = graphics.create_path(&path.area(mapper.canvas_height));
            let line = graphics.create_path(&path.line());
            let fills = fills_for(&mut graphics, &s, mapper.biggest_value);
            let formatter = LabelFormatter::new(config.series[member.source_index].label_name());
            curves.push(RenderedCurve {
                id: CurveId(i),
                series: s,
                path,
                formatter,
                state: VisualState::InView,
                line,
                area,
                fills,
            });
        }

        let marker = MarkerSynchronizer::new(
            curves.iter().map(|c| c.path.last_point()),
            viewport.viewport_width,
            mapper.canvas_height,
        );

        let mut chart = Self {
            graphics,
            curves,
            hierarchy,
            hit: HitResolver::new(),
            marker,
            mapper,
            builder,
            viewport,
        };
        chart.apply_states();
        debug!(
            "chart built: {} curves, biggest value {}, content width {}",
            chart.curves.len(),
            chart.mapper.biggest_value,
            chart.content_width()
        );
        Ok(chart)
    }

    pub fn state(&self) -> ChartState {
        ChartState {
            biggest_value: self.mapper.biggest_value,
            canvas_height: self.mapper.canvas_height,
            closest_curve: self.hierarchy.focused(),
        }
    }

    pub fn curves(&self) -> &[RenderedCurve] {
        &self.curves
    }

    pub fn curve(&self, id: CurveId) -> Option<&RenderedCurve> {
        self.curves.get(id.0)
    }

    pub fn curve_by_name(&self, name: &str) -> Option<&RenderedCurve> {
        self.hierarchy.id_of(name).and_then(|id| self.curve(id))
    }

    pub fn focused(&self) -> CurveId {
        self.hierarchy.focused()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn marker(&self) -> &MarkerSynchronizer {
        &self.marker
    }

    pub fn hit_resolver(&self) -> &HitResolver {
        &self.hit
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.graphics
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Point spacing in px.
    pub fn width(&self) -> f64 {
        self.builder.width
    }

    /// Pixel Y of point `index` of curve `id`.
    pub fn convert(&self, id: CurveId, index: usize) -> Result<f64> {
        let curve = self
            .curve(id)
            .ok_or_else(|| ChartError::invalid(format!("no curve with id {}", id.0)))?;
        let point = curve.series.data.get(index).ok_or_else(|| {
            ChartError::invalid(format!("`{}` has no point {index}", curve.series.name))
        })?;
        self.mapper.convert(point.value)
    }

    /// Scrollable width: the longest curve's span.
    pub fn content_width(&self) -> f64 {
        self.curves.iter().map(|c| c.path.content_width()).fold(0.0, f64::max)
    }

    /// Scroll offset that shows the most recent point.
    pub fn initial_scroll(&self) -> f64 {
        (self.content_width() - END_SCROLL_INSET).max(0.0)
    }

    pub fn set_label_formatter(&mut self, name: &str, formatter: LabelFormatter) -> Result<()> {
        let id = self
            .hierarchy
            .id_of(name)
            .ok_or_else(|| ChartError::invalid(format!("no series named `{name}`")))?;
        self.curves[id.0].formatter = formatter;
        Ok(())
    }

    fn apply_states(&mut self) {
        let states = self.hierarchy.states();
        for (curve, state) in self.curves.iter_mut().zip(states) {
            curve.state = state;
            self.graphics.set_style(curve.line, &line_style(curve.series.color, state));
            self.graphics.set_style(curve.area, &area_style(curve.fills, state));
        }
    }

    /// Make `id` the current curve, restyle every curve and move the marker
    /// onto it at the current scroll offset.
    pub fn focus(&mut self, id: CurveId) -> Result<()> {
        self.hierarchy.focus(id)?;
        self.apply_states();
        let scroll = self.marker.scroll_offset();
        let curve = &self.curves[id.0];
        self.marker.sync(&mut self.graphics, curve.marker_target(), scroll);
        Ok(())
    }

    /// Curve whose crossing with a vertical probe under `click` is nearest
    /// the click vertically. Repositions the cached probes; focus is left
    /// alone.
    pub fn resolve_closest(&mut self, click: ClickPosition, scroll_left: f64) -> Option<CurveId> {
        let probe_x = HitResolver::probe_x(click, scroll_left, self.viewport.container_width);
        let click_y = click.y - self.viewport.container_top;
        let targets: Vec<HitTarget> = self.curves.iter().map(|c| HitTarget { id: c.id, line: c.line }).collect();
        self.hit
            .resolve_closest(&mut self.graphics, &targets, probe_x, click_y, self.mapper.canvas_height)
            .map(|hit| hit.curve)
    }

    /// Resolve the closest curve and focus it. Focus is unchanged when the
    /// click hits no curve.
    pub fn click(&mut self, click: ClickPosition, scroll_left: f64) -> Option<CurveId> {
        let Some(id) = self.resolve_closest(click, scroll_left) else {
            warn!("click at ({}, {}) hit no curve", click.x, click.y);
            return None;
        };
        self.focus(id).ok().map(|_| id)
    }

    /// Scroll event. Returns `true` when a refresh should be scheduled.
    pub fn scroll(&mut self, offset: f64) -> bool {
        let curve = &self.curves[self.hierarchy.focused().0];
        self.marker.on_scroll(&mut self.graphics, curve.marker_target(), offset)
    }

    /// Next-frame refresh of the marker.
    pub fn refresh(&mut self) -> MarkerFrame {
        let curve = &self.curves[self.hierarchy.focused().0];
        self.marker.refresh(&self.graphics, curve.marker_target())
    }

    /// Marker placement for the focused curve without recomputing anything.
    pub fn marker_frame(&self) -> MarkerFrame {
        self.marker.frame(self.curves[self.hierarchy.focused().0].marker_target())
    }

    /// Replace the data of series `name`. The biggest value and every curve
    /// are rebuilt; on error the chart is left untouched.
    pub fn update_series(&mut self, name: &str, data: Vec<DataPoint>) -> Result<()> {
        let id = self
            .hierarchy
            .id_of(name)
            .ok_or_else(|| ChartError::invalid(format!("no series named `{name}`")))?;
        let mut updated = self.curves[id.0].series.clone();
        updated.data = data;
        updated.validate()?;

        let all: Vec<&Series> = self
            .curves
            .iter()
            .map(|c| if c.id == id { &updated } else { &c.series })
            .collect();
        let mapper = VerticalMapper::new(biggest_value(all.iter().copied()), self.mapper.canvas_height)?;
        let paths = all
            .iter()
            .map(|s| mapper.convert_series(s).and_then(|v| self.builder.build(&v)))
            .collect::<Result<Vec<_>>>()?;

        self.curves[id.0].series = updated;
        self.mapper = mapper;
        for (curve, path) in self.curves.iter_mut().zip(paths) {
            self.graphics.update_path(curve.area, &path.area(mapper.canvas_height));
            self.graphics.update_path(curve.line, &path.line());
            self.graphics.remove_gradient(curve.fills.focused);
            self.graphics.remove_gradient(curve.fills.overlay);
            curve.fills = fills_for(&mut self.graphics, &curve.series, mapper.biggest_value);
            curve.path = path;
        }
        self.apply_states();
        let scroll = self.marker.scroll_offset();
        let focused = &self.curves[self.hierarchy.focused().0];
        self.marker.sync(&mut self.graphics, focused.marker_target(), scroll);
        debug!("series `{name}` updated; biggest value {}", mapper.biggest_value);
        Ok(())
    }

    /// Remove every drawable and hand the graphics provider back.
    pub fn destroy(mut self) -> G {
        for curve in &self.curves {
            self.graphics.remove_path(curve.line);
            self.graphics.remove_path(curve.area);
            self.graphics.remove_gradient(curve.fills.focused);
            self.graphics.remove_gradient(curve.fills.overlay);
        }
        self.hit.clear(&mut self.graphics);
        self.marker.clear(&mut self.graphics);
        self.graphics
    }
}
