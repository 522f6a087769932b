// File: crates/curve-core/src/config.rs
// Summary: Chart configuration input (JSON via serde), defaults and validation.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::path::DEFAULT_WIDTH;
use crate::series::{DataPoint, Rgba, Series};

pub const DEFAULT_COLOR: &str = "#fff";
pub const DEFAULT_CONTAINER: &str = "canvas";
pub const DEFAULT_SCROLL: &str = "scroll";

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

fn default_scroll() -> String {
    DEFAULT_SCROLL.to_string()
}

/// One series as given by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub name: String,
    pub data: Vec<DataPoint>,
    #[serde(default, alias = "parent", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// `#rgb` / `#rrggbb`; white when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, alias = "default")]
    pub is_default: bool,
    /// Unit name shown after the marker value; the series name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SeriesConfig {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self { name: name.into(), data, parent_name: None, color: None, is_default: false, label: None }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn default_focus(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Validated `Series` for this entry.
    pub fn to_series(&self) -> Result<Series> {
        let color = Rgba::from_hex(self.color.as_deref().unwrap_or(DEFAULT_COLOR))?;
        let series = Series {
            name: self.name.clone(),
            data: self.data.clone(),
            parent_name: self.parent_name.clone(),
            color,
            is_default: self.is_default,
        };
        series.validate()?;
        Ok(series)
    }
}

/// Everything needed to construct a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub series: Vec<SeriesConfig>,
    /// Horizontal spacing between points, in px.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Id of the canvas container element, resolved by the host.
    #[serde(default = "default_container")]
    pub container: String,
    /// Id of the scrolling element, resolved by the host.
    #[serde(default = "default_scroll")]
    pub scroll: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            width: DEFAULT_WIDTH,
            container: default_container(),
            scroll: default_scroll(),
        }
    }
}

impl ChartConfig {
    pub fn new(series: Vec<SeriesConfig>) -> Self {
        Self { series, ..Self::default() }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ChartConfig = serde_json::from_str(json)
            .map_err(|e| ChartError::invalid(format!("chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChartError::invalid(format!("chart config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(ChartError::invalid("config has no series"));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ChartError::invalid(format!("width must be positive, got {}", self.width)));
        }
        for s in &self.series {
            s.to_series()?;
        }
        Ok(())
    }

    pub fn to_series(&self) -> Result<Vec<Series>> {
        self.series.iter().map(SeriesConfig::to_series).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_defaults() {
        let cfg = ChartConfig::from_json(
            r##"{ "series": [ { "name": "a", "data": [["Jan", 10], ["Feb", 40]] } ] }"##,
        )
        .unwrap();
        assert_eq!(cfg.width, 100.0);
        assert_eq!(cfg.container, "canvas");
        assert_eq!(cfg.scroll, "scroll");
        let s = cfg.to_series().unwrap();
        assert_eq!(s[0].color, Rgba::WHITE);
        assert_eq!(s[0].data[1], DataPoint::new("Feb", 40.0));
        assert_eq!(cfg.series[0].label_name(), "a");
    }

    #[test]
    fn json_aliases_and_camel_case() {
        let cfg = ChartConfig::from_json(
            r##"{ "width": 50, "series": [
                { "name": "root", "data": [["a", 1], ["b", 2]], "default": true, "color": "#ff0000" },
                { "name": "kid", "data": [["a", 1], ["b", 2]], "parentName": "root" },
                { "name": "kid2", "data": [["a", 1], ["b", 2]], "parent": "root", "label": "mentions" }
            ] }"##,
        )
        .unwrap();
        assert!(cfg.series[0].is_default);
        assert_eq!(cfg.series[1].parent_name.as_deref(), Some("root"));
        assert_eq!(cfg.series[2].parent_name.as_deref(), Some("root"));
        assert_eq!(cfg.series[2].label_name(), "mentions");
        assert_eq!(cfg.to_series().unwrap()[0].color, Rgba::new(255, 0, 0, 1.0));
    }

    #[test]
    fn invalid_configs_fail_fast() {
        assert!(matches!(ChartConfig::from_json("{"), Err(ChartError::InvalidInput(_))));
        assert!(matches!(ChartConfig::from_json(r#"{ "series": [] }"#), Err(ChartError::InvalidInput(_))));
        assert!(matches!(
            ChartConfig::from_json(r#"{ "series": [ { "name": "a", "data": [["x", 1]] } ] }"#),
            Err(ChartError::InsufficientData { len: 1, .. })
        ));
        let bad_width = ChartConfig::new(vec![SeriesConfig::new("a", vec![("x", 1.0).into(), ("y", 2.0).into()])])
            .with_width(0.0);
        assert!(bad_width.validate().is_err());
        let bad_color = ChartConfig::new(vec![
            SeriesConfig::new("a", vec![("x", 1.0).into(), ("y", 2.0).into()]).color("blue"),
        ]);
        assert!(bad_color.validate().is_err());
    }

    #[test]
    fn non_hex_colors_are_rejected_not_sliced() {
        for color in ["#aébcd", "#+f+f+f", "#ff ff"] {
            let json = format!(r#"{{ "series": [ {{ "name": "a", "data": [["x", 1], ["y", 2]], "color": "{color}" }} ] }}"#);
            assert!(
                matches!(ChartConfig::from_json(&json), Err(ChartError::InvalidInput(_))),
                "`{color}` should be rejected"
            );
        }
    }
}
