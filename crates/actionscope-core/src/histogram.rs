// crates/actionscope-core/src/histogram.rs
//
// Time histogram of a filtered selection, one series per source file.
//
// Binning and bar geometry live here rather than in the UI so the drawn bars
// and click hit-testing come from the same numbers. The chart widget only
// paints the `BarSpec`s it is handed.
//
// Two bucketing policies:
//   GroupedCount: fixed number of equal buckets spanning [min, max] of the
//                 observed times; files side by side inside a bucket.
//   StackedWidth: fixed bucket width, buckets aligned on multiples of the
//                 width; files stacked inside a bucket. A span that would
//                 need more than MAX_BUCKETS buckets falls back to
//                 DEFAULT_BINS equal buckets, still stacked.

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::filter::Selection;
use crate::selection::{BucketSelection, PointClick};

pub const DEFAULT_BINS:  usize = 20;
pub const DEFAULT_WIDTH: f64   = 4.0;
/// Upper bound on buckets per series, in either mode.
pub const MAX_BUCKETS:   usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HistogramMode {
    GroupedCount { bins: usize },
    StackedWidth { width: f64 },
}

impl Default for HistogramMode {
    fn default() -> Self { HistogramMode::StackedWidth { width: DEFAULT_WIDTH } }
}

impl HistogramMode {
    pub fn grouped() -> Self { HistogramMode::GroupedCount { bins: DEFAULT_BINS } }

    pub fn is_stacked(&self) -> bool { matches!(self, HistogramMode::StackedWidth { .. }) }

    pub fn validate(&self) -> Result<(), String> {
        match *self {
            HistogramMode::GroupedCount { bins } if bins == 0 =>
                Err("bin count must be at least 1".into()),
            HistogramMode::StackedWidth { width } if !(width.is_finite() && width > 0.0) =>
                Err(format!("bucket width must be a positive number, got {width}")),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    pub low:  f64,
    pub high: f64,
}

impl Bucket {
    pub fn center(&self) -> f64 { (self.low + self.high) / 2.0 }
    pub fn width(&self) -> f64 { self.high - self.low }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub file:   String,
    /// One count per bucket.
    pub counts: Vec<u64>,
}

/// One drawable bar in plot coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub series: usize,
    pub bucket: usize,
    pub center: f64,
    pub width:  f64,
    pub base:   f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    mode:    HistogramMode,
    width:   f64,
    /// False when buckets are equal divisions of the observed range,
    /// including a stacked chart that fell back to them.
    fixed_width: bool,
    buckets: Vec<Bucket>,
    series:  Vec<Series>,
}

impl Histogram {
    pub fn build(selection: &Selection, mode: HistogramMode) -> Self {
        let files = selection.files();

        let Some((lo, hi)) = selection.time_range() else {
            let width = match mode {
                HistogramMode::StackedWidth { width } => width,
                HistogramMode::GroupedCount { .. }   => 1.0,
            };
            return Self {
                mode, width,
                fixed_width: mode.is_stacked(),
                buckets: Vec::new(),
                series:  Vec::new(),
            };
        };

        let mut fixed_width = false;
        let (origin, width, n) = match mode {
            HistogramMode::GroupedCount { bins } => equal_bins(lo, hi, bins),
            HistogramMode::StackedWidth { width } => {
                let first = (lo / width).floor();
                // Counted in f64: far-apart times must not overflow usize.
                let span  = (hi / width).floor() - first + 1.0;
                if span <= MAX_BUCKETS as f64 {
                    fixed_width = true;
                    (first * width, width, span as usize)
                } else {
                    tracing::warn!(
                        "time range {lo}..{hi} needs {span:e} buckets of width {width}; \
                         using {DEFAULT_BINS} equal buckets instead"
                    );
                    equal_bins(lo, hi, DEFAULT_BINS)
                }
            }
        };

        let buckets: Vec<Bucket> = (0..n)
            .map(|i| Bucket {
                low:  origin + i as f64 * width,
                high: origin + (i + 1) as f64 * width,
            })
            .collect();

        let mut series: Vec<Series> = files.iter()
            .map(|f| Series { file: f.to_string(), counts: vec![0; n] })
            .collect();

        for row in selection.rows() {
            if !row.time.is_finite() { continue; }
            // `hi` sits exactly on the upper edge in grouped mode; fold it
            // into the last bucket.
            let i = (((row.time - origin) / width).floor().max(0.0) as usize).min(n - 1);
            if let Some(s) = series.iter_mut().find(|s| s.file == row.file) {
                s.counts[i] += 1;
            }
        }

        Self { mode, width, fixed_width, buckets, series }
    }

    pub fn mode(&self) -> HistogramMode { self.mode }

    pub fn bucket_width(&self) -> f64 { self.width }

    pub fn buckets(&self) -> &[Bucket] { &self.buckets }

    pub fn series(&self) -> &[Series] { &self.series }

    pub fn is_empty(&self) -> bool { self.buckets.is_empty() }

    pub fn count(&self, series: usize, bucket: usize) -> u64 {
        self.series.get(series)
            .and_then(|s| s.counts.get(bucket))
            .copied()
            .unwrap_or(0)
    }

    /// Number of samples binned (non-finite times excluded).
    pub fn total(&self) -> u64 {
        self.series.iter().flat_map(|s| s.counts.iter()).sum()
    }

    /// Tallest bar (grouped) or tallest stack (stacked).
    pub fn y_max(&self) -> u64 {
        (0..self.buckets.len())
            .map(|b| {
                let col = self.series.iter().map(|s| s.counts[b]);
                if self.mode.is_stacked() { col.sum::<u64>() } else { col.max().unwrap_or(0) }
            })
            .max()
            .unwrap_or(0)
    }

    /// Non-empty bars in draw order.
    pub fn bars(&self) -> Vec<BarSpec> {
        let mut out = Vec::new();
        let slots = self.series.len().max(1) as f64;
        for (b, bucket) in self.buckets.iter().enumerate() {
            let mut base = 0.0;
            for (si, s) in self.series.iter().enumerate() {
                let h = s.counts[b] as f64;
                if h == 0.0 { continue; }
                let bar = if self.mode.is_stacked() {
                    BarSpec {
                        series: si, bucket: b,
                        center: bucket.center(), width: self.width,
                        base, height: h,
                    }
                } else {
                    let slot_w = self.width / slots;
                    BarSpec {
                        series: si, bucket: b,
                        center: bucket.low + slot_w * (si as f64 + 0.5), width: slot_w,
                        base: 0.0, height: h,
                    }
                };
                base += h;
                out.push(bar);
            }
        }
        out
    }

    /// Bucket record for a clicked bar.
    ///
    /// Fixed-width buckets at least one time unit wide report the centered
    /// range `x ± (width - 1) / 2`. Equal-division buckets and sub-unit widths
    /// report the clicked bucket's own bounds.
    pub fn select(&self, click: &PointClick) -> Result<BucketSelection, SelectionError> {
        if self.fixed_width && self.width >= 1.0 {
            return BucketSelection::from_click(click, self.width);
        }
        let bucket = self.buckets.iter()
            .find(|b| click.x >= b.low && click.x <= b.high)
            .ok_or(SelectionError::NoBucket(click.x))?;
        BucketSelection::from_bounds(click, (bucket.low, bucket.high))
    }

    /// Map a plot-space pointer position to the bar under it, reporting the
    /// bucket center, that bar's count and its file.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PointClick> {
        if !(x.is_finite() && y.is_finite()) { return None; }
        self.bars().into_iter()
            .find(|bar| {
                (x - bar.center).abs() <= bar.width / 2.0
                    && y >= bar.base
                    && y <= bar.base + bar.height
            })
            .map(|bar| PointClick {
                x:     self.buckets[bar.bucket].center(),
                y:     bar.height,
                group: self.series[bar.series].file.clone(),
            })
    }
}

/// `bins` equal buckets over `[lo, hi]`. A single distinct value gets one
/// unit-wide bucket around it.
fn equal_bins(lo: f64, hi: f64, bins: usize) -> (f64, f64, usize) {
    let bins = bins.clamp(1, MAX_BUCKETS);
    if hi > lo {
        (lo, (hi - lo) / bins as f64, bins)
    } else {
        (lo - 0.5, 1.0, 1)
    }
}
