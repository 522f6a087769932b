// File: crates/curve-core/src/binding.rs
// Summary: Event binding between a `Chart` and the `Display` hosting it.

use log::debug;

use crate::backend::{Display, Graphics};
use crate::chart::{Chart, Viewport};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::hierarchy::CurveId;
use crate::hit::ClickPosition;

/// Owns a chart and its display and turns host events into chart calls.
///
/// The host forwards its scroll, click and frame callbacks to `on_scroll`,
/// `on_click` and `on_frame`. `on_frame` should be called once for every
/// `Display::request_frame` issued.
pub struct ChartBinding<G: Graphics, D: Display> {
    chart: Chart<G>,
    display: D,
}

impl<G: Graphics, D: Display> ChartBinding<G, D> {
    /// Build the chart against the display's current metrics, size the
    /// scroll content and scroll to the most recent point.
    pub fn attach(config: &ChartConfig, graphics: G, mut display: D) -> Result<Self> {
        let chart = Chart::new(config, graphics, Viewport::from_display(&display))?;
        display.set_content_width(chart.content_width());
        display.set_scroll_left(chart.initial_scroll());
        debug!("chart attached to `{}` / `{}`", config.container, config.scroll);
        let mut binding = Self { chart, display };
        binding.on_scroll();
        Ok(binding)
    }

    pub fn chart(&self) -> &Chart<G> {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart<G> {
        &mut self.chart
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn on_scroll(&mut self) {
        let offset = self.display.scroll_left();
        self.display.translate_canvas(-offset);
        if self.chart.scroll(offset) {
            self.display.request_frame();
        }
        self.display.place_marker(&self.chart.marker_frame());
    }

    pub fn on_frame(&mut self) {
        let frame = self.chart.refresh();
        self.display.place_marker(&frame);
    }

    /// Pointer click in viewport coordinates.
    pub fn on_click(&mut self, x: f64, y: f64) -> Option<CurveId> {
        let focused = self.chart.click(ClickPosition::new(x, y), self.display.scroll_left())?;
        self.display.place_marker(&self.chart.marker_frame());
        Some(focused)
    }

    /// Tear the chart down and return its collaborators.
    pub fn detach(self) -> (G, D) {
        (self.chart.destroy(), self.display)
    }
}
