// File: crates/curve-core/src/series.rs
// Summary: Series model: labelled data points, parent grouping, colors and label formatting.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// One labelled value, serialized as `["Jan", 10]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value }
    }
}

impl From<(String, f64)> for DataPoint {
    fn from((label, value): (String, f64)) -> Self {
        Self { label, value }
    }
}

impl From<DataPoint> for (String, f64) {
    fn from(p: DataPoint) -> Self {
        (p.label, p.value)
    }
}

impl<'a> From<(&'a str, f64)> for DataPoint {
    fn from((label, value): (&'a str, f64)) -> Self {
        Self::new(label, value)
    }
}

/// 8-bit RGB color with a float alpha, matching CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::invalid(format!("`{hex}` is not a #rgb or #rrggbb color")));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ChartError::invalid(format!("`{hex}` is not a #rgb or #rrggbb color"))),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ChartError::invalid(format!("`{hex}` is not a #rgb or #rrggbb color")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Alpha as a 0..=255 channel.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A named sequence of points drawn as one curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub data: Vec<DataPoint>,
    /// Name of the root series this one is grouped under.
    pub parent_name: Option<String>,
    pub color: Rgba,
    pub is_default: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self { name: name.into(), data, parent_name: None, color: Rgba::WHITE, is_default: false }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_name.is_none()
    }

    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.value).collect()
    }

    /// Point at `index`, clamped into the valid range. `None` only when empty.
    pub fn point_clamped(&self, index: i64) -> Option<&DataPoint> {
        let last = self.data.len().checked_sub(1)?;
        let i = index.clamp(0, last as i64) as usize;
        self.data.get(i)
    }

    /// Checks the invariants a curve needs: a name, at least two points and
    /// finite values.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ChartError::invalid("series name must not be empty"));
        }
        if self.data.len() < 2 {
            return Err(ChartError::InsufficientData { series: self.name.clone(), len: self.data.len() });
        }
        if let Some(p) = self.data.iter().find(|p| !p.value.is_finite()) {
            return Err(ChartError::invalid(format!(
                "series `{}` has a non-finite value at `{}`",
                self.name, p.label
            )));
        }
        Ok(())
    }
}

type FormatFn = dyn Fn(&DataPoint) -> String + Send + Sync;

/// Turns the point under the marker into its label text; `name` is the unit
/// suffix shown next to the value.
#[derive(Clone)]
pub struct LabelFormatter {
    pub name: String,
    format: Arc<FormatFn>,
}

impl LabelFormatter {
    /// Formatter that shows the point's own label.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), format: Arc::new(|p: &DataPoint| p.label.clone()) }
    }

    pub fn with_format<F>(name: impl Into<String>, format: F) -> Self
    where
        F: Fn(&DataPoint) -> String + Send + Sync + 'static,
    {
        Self { name: name.into(), format: Arc::new(format) }
    }

    pub fn label(&self, point: &DataPoint) -> String {
        (self.format)(point)
    }

    pub fn value_text(&self, point: &DataPoint) -> String {
        if self.name.is_empty() {
            format!("{}", point.value)
        } else {
            format!("{} {}", point.value, self.name)
        }
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFormatter").field("name", &self.name).finish_non_exhaustive()
    }
}
