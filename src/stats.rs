//! Summaries of recorded series: histograms and basic moments.
//!
//! These produce the numbers behind position/velocity histograms; drawing
//! them is left to the caller.

use serde::Serialize;

use crate::error::{Error, Result};

/// Fixed-width histogram.
///
/// `edges` has `bins + 1` entries and `counts` has `bins`. Bin `k` covers
/// `[edges[k], edges[k + 1])`, except the last bin which also includes its
/// right edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins over `range`.
    ///
    /// With `range = None` the data min/max is used; if all values are equal the
    /// range is widened to `[v - 0.5, v + 0.5]`. Values outside an explicit range
    /// and non-finite values are skipped.
    ///
    /// Errors: `Error::InvalidArgument` for `bins == 0` or an empty, reversed or
    /// non-finite range.
    pub fn from_values(values: &[f64], bins: usize, range: Option<(f64, f64)>) -> Result<Self> {
        if bins == 0 {
            return Err(Error::invalid("bins must be > 0"));
        }
        let (lo, hi) = match range {
            Some((lo, hi)) => {
                if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                    return Err(Error::invalid(format!(
                        "histogram range must be finite with min < max, got ({lo}, {hi})"
                    )));
                }
                (lo, hi)
            }
            None => data_range(values),
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|k| lo + width * k as f64).collect();
        let mut counts = vec![0u64; bins];
        for &v in values {
            if !v.is_finite() || v < lo || v > hi {
                continue;
            }
            let k = (((v - lo) / width) as usize).min(bins - 1);
            counts[k] += 1;
        }
        Ok(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of values that landed in some bin.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

fn data_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        // no finite data
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Count, extrema and mean of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Summary {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(Self {
            count: values.len(),
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}
