//! # Module: Panel Statistics
//!
//! ## Responsibility
//! Turn dataset columns into the numbers the panels draw: histogram bins, a
//! smoothed density overlay, and descending category counts with colours.
//!
//! ## Guarantees
//! - Pure functions over slices; no I/O, no shared state
//! - Empty input yields empty output, never a panic or NaN
//! - Category counts are ordered by count, ties by first appearance
//!
//! ## NOT Responsible For
//! - Grid placement (see: `layout`)
//! - Drawing (see: `dash::widgets`)

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::palette::{CategoryColorTable, Rgb};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Number of points the density overlay is evaluated at.
pub const DENSITY_POINTS: usize = 100;

/// A named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    /// Column name as it appears in the file header.
    pub name: String,
    /// Column values in row order.
    pub values: Vec<f64>,
}

impl NumericField {
    /// Creates a field from a name and values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Smallest and largest value, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        bounds(&self.values)
    }
}

/// One histogram bin covering `[start, end)` (the last bin includes `end`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Number of values in the bin.
    pub count: u64,
}

impl HistogramBin {
    /// Centre of the bin.
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Width of the bin.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Splits `values` into `bins` equal-width bins spanning their range.
///
/// A constant column gets a unit-wide range centred on its value. Non-finite
/// values are ignored.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((mut lo, mut hi)) = bounds(values) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values.iter().copied().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Gaussian kernel density estimate scaled to histogram counts.
///
/// Uses Scott's rule for the bandwidth and evaluates `points` samples across
/// the histogram range, multiplying the density by `n * bin_width` so the
/// curve overlays the bars. Returns an empty curve when fewer than two values
/// are present or the values have no spread.
pub fn density_overlay(values: &[f64], bins: &[HistogramBin], points: usize) -> Vec<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Vec::new();
    };
    if n < 2 || points < 2 {
        return Vec::new();
    }

    let mean = finite.iter().sum::<f64>() / n as f64;
    let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if std <= 0.0 {
        return Vec::new();
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (bandwidth * (2.0 * std::f64::consts::PI).sqrt() * n as f64);
    let scale = n as f64 * first.width();
    let (lo, hi) = (first.start, last.end);
    let step = (hi - lo) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = finite
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}

/// Counts category labels, most frequent first.
///
/// Ties keep the order in which each label was first seen. Missing labels are
/// not counted.
///
/// # Example
///
/// ```rust
/// use dexstream::categorical_counts;
///
/// let labels = ["B", "A", "A", "B", "C"].map(Some);
/// let counts = categorical_counts(labels);
/// assert_eq!(counts[0], ("B".to_string(), 2));
/// assert_eq!(counts[2], ("C".to_string(), 1));
/// ```
pub fn categorical_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut tally: Vec<(usize, &'a str, usize)> = Vec::new();

    for label in values.into_iter().flatten() {
        match slots.get(label) {
            Some(&slot) => tally[slot].2 += 1,
            None => {
                slots.insert(label, tally.len());
                tally.push((tally.len(), label, 1));
            }
        }
    }

    tally.sort_unstable_by_key(|&(first_seen, _, count)| (Reverse(count), first_seen));
    tally
        .into_iter()
        .map(|(_, label, count)| (label.to_string(), count))
        .collect()
}

/// A bar of the category panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBar {
    /// Category label.
    pub label: String,
    /// Number of rows with this label.
    pub count: usize,
    /// Fill colour from the category table.
    pub color: Rgb,
}

/// Attaches a fill colour to each `(label, count)` pair, keeping order.
pub fn category_bars(counts: &[(String, usize)], table: &CategoryColorTable) -> Vec<CategoryBar> {
    counts
        .iter()
        .map(|(label, count)| CategoryBar {
            label: label.clone(),
            count: *count,
            color: table.color_of(Some(label)),
        })
        .collect()
}
