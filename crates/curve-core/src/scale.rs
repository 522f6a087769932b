// File: crates/curve-core/src/scale.rs
// Summary: Linear range remapping and the chart's value -> vertical pixel transform.

use crate::error::{ChartError, Result};
use crate::series::Series;

/// Pixels kept free above the biggest value so the stroke is not clipped.
pub const TOP_PADDING: f64 = 4.0;

/// Linearly remap `value` from `from = (low, high)` onto `to = (low, high)`.
///
/// With `clamp` the result is bounded to `to`, whichever way round it is
/// (pixel ranges usually run opposite to data ranges). The endpoints of
/// `from` map exactly onto the endpoints of `to`. Empty or non-finite ranges
/// fail with `InvalidRange`.
pub fn map_range(value: f64, from: (f64, f64), to: (f64, f64), clamp: bool) -> Result<f64> {
    let (from_low, from_high) = from;
    let (to_low, to_high) = to;
    if !(to_low.is_finite() && to_high.is_finite()) {
        return Err(ChartError::InvalidRange { low: to_low, high: to_high });
    }
    if from_high == from_low || !(from_low.is_finite() && from_high.is_finite()) {
        return Err(ChartError::InvalidRange { low: from_low, high: from_high });
    }

    let result = if value == from_low {
        to_low
    } else if value == from_high {
        to_high
    } else {
        to_low + ((value - from_low) / (from_high - from_low)) * (to_high - to_low)
    };

    if !clamp {
        return Ok(result);
    }
    let (lo, hi) = if to_low < to_high { (to_low, to_high) } else { (to_high, to_low) };
    Ok(result.clamp(lo, hi))
}

/// Maps series values onto the canvas: `0` sits on the bottom edge and the
/// biggest value sits `TOP_PADDING` px below the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMapper {
    pub biggest_value: f64,
    pub canvas_height: f64,
}

impl VerticalMapper {
    /// Fails with `InvalidRange` unless `biggest_value > 0`.
    pub fn new(biggest_value: f64, canvas_height: f64) -> Result<Self> {
        if !(biggest_value > 0.0) {
            return Err(ChartError::InvalidRange { low: 0.0, high: biggest_value });
        }
        if !canvas_height.is_finite() {
            return Err(ChartError::invalid(format!("canvas height {canvas_height} is not finite")));
        }
        Ok(Self { biggest_value, canvas_height })
    }

    #[inline]
    pub fn convert(&self, value: f64) -> Result<f64> {
        map_range(value, (0.0, self.biggest_value), (self.canvas_height, TOP_PADDING), false)
    }

    /// Convert every value of `series` into pixel Y.
    pub fn convert_series(&self, series: &Series) -> Result<Vec<f64>> {
        series.data.iter().map(|p| self.convert(p.value)).collect()
    }
}

/// Largest value over all series' points, starting from zero.
pub fn biggest_value<'a>(series: impl IntoIterator<Item = &'a Series>) -> f64 {
    series
        .into_iter()
        .flat_map(|s| s.data.iter())
        .fold(0.0f64, |acc, p| if p.value > acc { p.value } else { acc })
}

/// Median of `values`; `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let half = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[half])
    } else {
        Some((sorted[half - 1] + sorted[half]) / 2.0)
    }
}
