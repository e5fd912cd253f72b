//! Chart inputs computed from the cleaned training table

use std::collections::BTreeMap;

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;

use crate::pipeline::schema::SURVIVED;

/// z-score for a two-sided 95% interval
const Z_95: f64 = 1.959_963_984_540_054;

/// Number of passengers per outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub died: usize,
    pub survived: usize,
}

/// Survival rate of one group with a normal-approximation 95% interval
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRate {
    pub group: i64,
    pub rate: f64,
    pub count: usize,
    pub ci_low: f64,
    pub ci_high: f64,
}

/// Equal-width bin counts. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Points tracing the outline of the histogram as a step line
    pub fn step_points(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.counts.len() * 2 + 2);
        if let Some(first) = self.edges.first() {
            points.push((*first, 0.0));
        }
        for (i, count) in self.counts.iter().enumerate() {
            points.push((self.edges[i], *count as f64));
            points.push((self.edges[i + 1], *count as f64));
        }
        if let Some(last) = self.edges.last() {
            points.push((*last, 0.0));
        }
        points
    }

    /// Keep only the part of the histogram inside `lo..=hi`, clamping edge bins
    pub fn clipped(&self, lo: f64, hi: f64) -> Histogram {
        let mut edges = Vec::new();
        let mut counts = Vec::new();
        for (i, count) in self.counts.iter().enumerate() {
            let (left, right) = (self.edges[i], self.edges[i + 1]);
            if right <= lo || left >= hi {
                continue;
            }
            if edges.is_empty() {
                edges.push(left.max(lo));
            }
            edges.push(right.min(hi));
            counts.push(*count);
        }
        Histogram { edges, counts }
    }
}

/// Pearson correlations between numeric columns
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Mat<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[(row, col)]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column values as f64 (nulls preserved)
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

/// Training outcomes as integers (nulls preserved)
pub fn outcomes(df: &DataFrame) -> Result<Vec<Option<i64>>> {
    let values = df.column(SURVIVED)?.cast(&DataType::Int64)?;
    Ok(values.i64()?.into_iter().collect())
}

pub fn outcome_counts(df: &DataFrame) -> Result<OutcomeCounts> {
    let mut counts = OutcomeCounts {
        died: 0,
        survived: 0,
    };
    for outcome in outcomes(df)?.into_iter().flatten() {
        if outcome == 0 {
            counts.died += 1;
        } else {
            counts.survived += 1;
        }
    }
    Ok(counts)
}

/// Survival rate per distinct value of `column`, groups ascending
pub fn survival_rate_by(df: &DataFrame, column: &str) -> Result<Vec<GroupRate>> {
    let groups = df.column(column)?.cast(&DataType::Int64)?;
    let outcomes = outcomes(df)?;

    let mut tally: BTreeMap<i64, (usize, usize)> = BTreeMap::new();
    for (group, outcome) in groups.i64()?.into_iter().zip(outcomes) {
        if let (Some(group), Some(outcome)) = (group, outcome) {
            let entry = tally.entry(group).or_insert((0, 0));
            entry.0 += 1;
            if outcome != 0 {
                entry.1 += 1;
            }
        }
    }

    Ok(tally
        .into_iter()
        .map(|(group, (count, survived))| {
            let rate = survived as f64 / count as f64;
            let half_width = Z_95 * (rate * (1.0 - rate) / count as f64).sqrt();
            GroupRate {
                group,
                rate,
                count,
                ci_low: (rate - half_width).max(0.0),
                ci_high: (rate + half_width).min(1.0),
            }
        })
        .collect())
}

/// Non-null values of `column` split by outcome as (died, survived)
pub fn values_by_outcome(df: &DataFrame, column: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let values = numeric_values(df, column)?;
    let outcomes = outcomes(df)?;

    let mut died = Vec::new();
    let mut survived = Vec::new();
    for (value, outcome) in values.into_iter().zip(outcomes) {
        match (value, outcome) {
            (Some(v), Some(0)) => died.push(v),
            (Some(v), Some(_)) => survived.push(v),
            _ => {}
        }
    }
    Ok((died, survived))
}

/// Smallest and largest finite value
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Equal-width histogram over `range`.
///
/// Bins are half-open except the last, which also includes the upper edge.
/// Values outside the range are ignored. A degenerate range is widened by
/// 0.5 on each side.
pub fn histogram(values: &[f64], bins: usize, range: (f64, f64)) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = range;
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        if !(lo..=hi).contains(&v) {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

/// Scott's rule bandwidth: sample standard deviation times n^(-1/5).
///
/// `None` for fewer than two values or a zero spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = var.sqrt() * (n as f64).powf(-0.2);
    (bandwidth > 0.0 && bandwidth.is_finite()).then_some(bandwidth)
}

/// Gaussian kernel density of `values` at `points` evenly spaced positions over `range`.
///
/// The curve integrates to `weight`, so per-outcome curves drawn with
/// `weight = group size / total` share one normalization. Empty when no
/// bandwidth can be estimated.
pub fn density_curve(values: &[f64], range: (f64, f64), points: usize, weight: f64) -> Vec<(f64, f64)> {
    let Some(bandwidth) = scott_bandwidth(values) else {
        return Vec::new();
    };
    let points = points.max(2);
    let step = (range.1 - range.0) / (points - 1) as f64;
    let norm = weight / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..points)
        .map(|i| {
            let x = range.0 + i as f64 * step;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            (x, sum * norm)
        })
        .collect()
}

/// Pearson correlation over the rows where both values are present
fn pairwise_pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.is_empty() {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x) * (a - mean_x);
        var_y += (b - mean_y) * (b - mean_y);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Pearson correlation matrix over every numeric column of `df`.
///
/// Uses population moments. Complete columns go through one standardized
/// `Z^T * Z` product; any pair involving a column with nulls is computed over
/// its pairwise-complete rows instead. A constant or all-null column has NaN
/// in its whole row and column, including the diagonal.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let numeric: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect();

    let n_rows = df.height();
    let n_cols = numeric.len();

    // Standardized data matrix Z scaled by 1/sqrt(n) so that R = Z^T * Z
    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    let mut constant = vec![false; n_cols];
    let mut has_nulls = vec![false; n_cols];
    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(n_cols);

    for (col_idx, name) in numeric.iter().enumerate() {
        let values = numeric_values(df, name)?;
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        has_nulls[col_idx] = observed.len() < values.len();
        columns.push(values);
        if observed.is_empty() {
            constant[col_idx] = true;
            continue;
        }

        let count = observed.len() as f64;
        let mean = observed.iter().sum::<f64>() / count;
        let var = observed.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / count;
        let std = var.sqrt();
        if std == 0.0 {
            constant[col_idx] = true;
            continue;
        }
        if has_nulls[col_idx] {
            continue;
        }

        let scale = count.sqrt();
        for (row_idx, value) in columns[col_idx].iter().enumerate() {
            if let Some(x) = value {
                z[(row_idx, col_idx)] = (x - mean) / (std * scale);
            }
        }
    }

    let mut values = z.transpose() * &z;
    for i in 0..n_cols {
        for j in 0..n_cols {
            if constant[i] || constant[j] {
                values[(i, j)] = f64::NAN;
            } else if i == j {
                values[(i, j)] = 1.0;
            } else if has_nulls[i] || has_nulls[j] {
                values[(i, j)] = pairwise_pearson(&columns[i], &columns[j]);
            }
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric,
        values,
    })
}
