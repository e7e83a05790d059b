//! Age grouping strategies
//!
//! Derives a categorical partition of the age column under one of three
//! policies. Every bin is converted to a plain string label before it leaves
//! this module - interval objects are not serialization-safe and must never
//! reach the presentation layer.

use super::error::PipelineError;

/// Tolerance below which two age values count as the same distinct value.
const DISTINCT_EPSILON: f64 = 1e-9;

/// How to partition the age column into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGrouping {
    /// `floor(age / 10) * 10` with an "s" suffix: 43 -> "40s".
    Decade,
    /// Four equal-population bins labeled "Q1".."Q4" in ascending age order.
    Quartile,
    /// `n` equal-width half-open bins over `[min, max]`, labeled "lo-hi".
    CustomBins(usize),
}

impl std::fmt::Display for AgeGrouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeGrouping::Decade => write!(f, "decade"),
            AgeGrouping::Quartile => write!(f, "quartile"),
            AgeGrouping::CustomBins(n) => write!(f, "custom({})", n),
        }
    }
}

/// Assign one group label per input age.
///
/// The output has the same length and order as the input. Distinct labels
/// ascend with the underlying age values, which downstream chart axes rely
/// on. A zero-length input yields a zero-length output for every strategy.
///
/// # Errors
/// - `InsufficientVariance` when quartile grouping sees fewer than 4 distinct
///   ages (boundaries would collapse); the caller should fall back to a
///   different strategy rather than accept fewer labeled groups.
/// - `InvalidBinCount` when custom binning is requested with 0 bins.
pub fn assign_age_groups(
    ages: &[f64],
    grouping: AgeGrouping,
) -> Result<Vec<String>, PipelineError> {
    if ages.is_empty() {
        return Ok(Vec::new());
    }

    match grouping {
        AgeGrouping::Decade => Ok(ages.iter().map(|&age| decade_label(age)).collect()),
        AgeGrouping::Quartile => assign_quartiles(ages),
        AgeGrouping::CustomBins(n) => assign_custom_bins(ages, n),
    }
}

fn decade_label(age: f64) -> String {
    let decade = ((age / 10.0).floor() * 10.0) as i64;
    format!("{}s", decade)
}

fn assign_quartiles(ages: &[f64]) -> Result<Vec<String>, PipelineError> {
    let distinct = count_distinct(ages);
    if distinct < 4 {
        return Err(PipelineError::InsufficientVariance { distinct });
    }

    let boundaries = [
        quantile(ages, 0.25),
        quantile(ages, 0.50),
        quantile(ages, 0.75),
    ];

    let labels = ages
        .iter()
        .map(|&age| {
            // Right-closed bins: values on a boundary fall in the lower bin.
            if age <= boundaries[0] {
                "Q1"
            } else if age <= boundaries[1] {
                "Q2"
            } else if age <= boundaries[2] {
                "Q3"
            } else {
                "Q4"
            }
            .to_string()
        })
        .collect();

    Ok(labels)
}

fn assign_custom_bins(ages: &[f64], n: usize) -> Result<Vec<String>, PipelineError> {
    if n == 0 {
        return Err(PipelineError::InvalidBinCount { n });
    }

    let min = ages.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = ages.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Degenerate range: every value lands in one bin.
    if (max - min).abs() < DISTINCT_EPSILON {
        let label = bin_label(min, max);
        return Ok(vec![label; ages.len()]);
    }

    let width = (max - min) / n as f64;
    let labels = ages
        .iter()
        .map(|&age| {
            let mut idx = ((age - min) / width).floor() as usize;
            // The maximum value closes the last bin instead of opening a new one.
            if idx >= n {
                idx = n - 1;
            }
            let lo = min + idx as f64 * width;
            let hi = min + (idx + 1) as f64 * width;
            bin_label(lo, hi)
        })
        .collect();

    Ok(labels)
}

/// Canonical string label for a bin; round-trips to its boundaries within
/// integer rounding tolerance.
fn bin_label(lo: f64, hi: f64) -> String {
    format!("{:.0}-{:.0}", lo, hi)
}

/// Linear-interpolation quantile over unsorted values.
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup_by(|a, b| (*a - *b).abs() < DISTINCT_EPSILON);
    sorted.len()
}

/// Distinct labels ordered ascending by the smallest age carrying each label.
///
/// Gives the presentation layer a stable axis order without leaking any
/// numeric bin structure.
pub fn ordered_labels(ages: &[f64], labels: &[String]) -> Vec<String> {
    let mut seen: Vec<(String, f64)> = Vec::new();
    for (age, label) in ages.iter().zip(labels.iter()) {
        match seen.iter_mut().find(|(known, _)| known == label) {
            Some((_, min_age)) => {
                if *age < *min_age {
                    *min_age = *age;
                }
            }
            None => seen.push((label.clone(), *age)),
        }
    }
    seen.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    seen.into_iter().map(|(label, _)| label).collect()
}
