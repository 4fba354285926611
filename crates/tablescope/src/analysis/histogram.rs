//! Equal-width histogram binning.

use serde::Serialize;

/// Histogram of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin boundaries, ascending (length = bins + 1, or 0 when empty).
    #[serde(rename = "bins")]
    pub bin_edges: Vec<f64>,
    /// Count of values in each bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Histogram of a column with no present values.
    pub fn empty() -> Self {
        Self {
            bin_edges: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin `values` into `bins` equal-width intervals over `[min, max]`.
///
/// Intervals are half-open `[e_i, e_{i+1})` except the last, which also holds
/// the maximum. When every value is equal, the range is padded by 0.1% of the
/// value (0.001 around zero) on both sides, clamped to the finite range. Zero
/// bins yields an empty histogram.
pub(crate) fn compute_histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::empty();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if lo == hi {
        let pad = if lo != 0.0 {
            (0.001 * lo.abs()).max(f64::MIN_POSITIVE)
        } else {
            0.001
        };
        lo = (lo - pad).max(f64::MIN);
        hi = (hi + pad).min(f64::MAX);
    }

    // Ranges wider than f64::MAX are measured in halves
    let span = hi - lo;
    let wide = !span.is_finite();
    let half_span = hi / 2.0 - lo / 2.0;

    let bin_edges: Vec<f64> = (0..=bins)
        .map(|i| {
            let t = i as f64 / bins as f64;
            if i == bins {
                hi
            } else if wide {
                lo * (1.0 - t) + hi * t
            } else {
                lo + span * t
            }
        })
        .collect();

    let mut counts = vec![0usize; bins];
    for &value in values {
        let fraction = if wide {
            (value / 2.0 - lo / 2.0) / half_span
        } else {
            (value - lo) / span
        };
        let mut idx = ((fraction * bins as f64) as usize).min(bins - 1);

        // Float rounding can land one bin off near an edge
        while idx > 0 && value < bin_edges[idx] {
            idx -= 1;
        }
        while idx + 1 < bins && value >= bin_edges[idx + 1] {
            idx += 1;
        }

        counts[idx] += 1;
    }

    Histogram { bin_edges, counts }
}
