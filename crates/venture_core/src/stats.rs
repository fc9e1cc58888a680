//! Statistical aggregation over Monte Carlo path collections.
//!
//! Every function here is a pure transform over its inputs and is
//! order-independent: it sorts or reduces an unordered collection, so the
//! orchestrator is free to produce paths in any execution order.

use crate::model::{
    ConfidenceBand, DistributionStats, Histogram, HistogramBucket, MetricSummary, PercentileSet,
    SingleSimulationResult,
};

/// Bucket count used for outcome histograms.
pub const HISTOGRAM_BUCKETS: usize = 25;

/// Mean, population standard deviation, median, and skewness.
///
/// Skewness is `mean(((x - mean) / std_dev)^3)` and is undefined when the
/// standard deviation is zero; that case returns 0.0 rather than NaN so a
/// single-iteration run stays well-behaved downstream.
#[must_use]
pub fn distribution_stats(values: &[f64]) -> DistributionStats {
    if values.is_empty() {
        return DistributionStats::default();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = nearest_rank(&sorted, 50.0);

    let skewness = if std_dev > 0.0 {
        values
            .iter()
            .map(|v| ((v - mean) / std_dev).powi(3))
            .sum::<f64>()
            / n
    } else {
        0.0
    };

    DistributionStats {
        mean,
        std_dev,
        median,
        skewness,
    }
}

/// Nearest-rank percentile: `sorted[floor(p/100 * n)]`, clamped to the last
/// index. Deliberately not linear interpolation; the index method must be
/// preserved for reproducibility.
#[must_use]
pub fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((percentile / 100.0) * sorted.len() as f64).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// The standard seven-percentile set of a sample.
#[must_use]
pub fn percentile_set(values: &[f64]) -> PercentileSet {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    PercentileSet {
        p5: nearest_rank(&sorted, 5.0),
        p10: nearest_rank(&sorted, 10.0),
        p25: nearest_rank(&sorted, 25.0),
        p50: nearest_rank(&sorted, 50.0),
        p75: nearest_rank(&sorted, 75.0),
        p90: nearest_rank(&sorted, 90.0),
        p95: nearest_rank(&sorted, 95.0),
    }
}

/// Stats plus percentiles for one outcome metric.
#[must_use]
pub fn metric_summary(values: &[f64]) -> MetricSummary {
    MetricSummary {
        stats: distribution_stats(values),
        percentiles: percentile_set(values),
    }
}

/// Fixed-bucket histogram spanning observed min to max.
///
/// Buckets are right-open `[min, max)` except the final bucket, which
/// absorbs the sample maximum.
#[must_use]
pub fn histogram(values: &[f64], bucket_count: usize) -> Histogram {
    if values.is_empty() || bucket_count == 0 {
        return Histogram::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let width = if span > 0.0 {
        span / bucket_count as f64
    } else {
        // Degenerate sample (all values identical): one effective bucket
        1.0
    };

    let mut counts = vec![0usize; bucket_count];
    for &value in values {
        let raw = ((value - min) / width).floor() as usize;
        counts[raw.min(bucket_count - 1)] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            min: min + width * i as f64,
            max: min + width * (i + 1) as f64,
            count,
        })
        .collect();

    Histogram { buckets }
}

/// Fraction of paths still alive at each month, index 0 = month 1.
#[must_use]
pub fn survival_curve(paths: &[SingleSimulationResult], horizon_months: u32) -> Vec<f64> {
    if paths.is_empty() {
        return vec![0.0; horizon_months as usize];
    }

    let total = paths.len() as f64;
    (1..=horizon_months)
        .map(|month| {
            let alive = paths
                .iter()
                .filter(|p| p.month_of_death.is_none_or(|d| d > month))
                .count();
            alive as f64 / total
        })
        .collect()
}

/// Per-month ARR bands over the paths still alive at each month.
///
/// A path that died in month `d` has snapshots through `d` and contributes
/// nothing afterwards; the bands are survivorship-biased by construction.
/// Note the death-month sample IS included: the band for month `d` counts
/// the dying path's final observed ARR even though [`survival_curve`]
/// already counts that path as dead at `d`. Bands describe observed values,
/// the curve describes who remains.
#[must_use]
pub fn confidence_bands(
    paths: &[SingleSimulationResult],
    horizon_months: u32,
) -> Vec<ConfidenceBand> {
    (1..=horizon_months)
        .map(|month| {
            let index = (month - 1) as usize;
            let samples: Vec<f64> = paths
                .iter()
                .filter_map(|p| p.months.get(index).map(|snapshot| snapshot.arr))
                .collect();

            ConfidenceBand {
                month,
                band: percentile_set(&samples),
                samples: samples.len(),
            }
        })
        .collect()
}

/// Indices of the worst, median, and best case in a path collection.
///
/// Index-based selection on the array sorted by final ARR (5th, 50th, 95th
/// percentile positions), so each selected case is an actual simulated path
/// rather than an interpolated value. Returns `(0, 0, 0)` for an empty
/// collection.
#[must_use]
pub fn select_case_indices(paths: &[SingleSimulationResult]) -> (usize, usize, usize) {
    if paths.is_empty() {
        return (0, 0, 0);
    }
    let mut order: Vec<usize> = (0..paths.len()).collect();
    order.sort_by(|&a, &b| paths[a].final_arr.total_cmp(&paths[b].final_arr));

    let n = paths.len();
    let pick = |percentile: f64| -> usize {
        let index = ((percentile / 100.0) * n as f64).floor() as usize;
        order[index.min(n - 1)]
    };

    (pick(5.0), pick(50.0), pick(95.0))
}
