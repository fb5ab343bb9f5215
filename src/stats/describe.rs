//! Descriptive statistics over a numeric column.

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    /// 50th percentile, continuous interpolation.
    pub median: f64,
    /// Sample standard deviation; `None` below two values, matching SQL
    /// `STDDEV` returning NULL.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

/// Computes summary statistics, or `None` for an empty column.
pub fn describe(values: &[f64]) -> Option<Descriptive> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    let std_dev = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };

    let median = percentile_cont(values, 0.5).expect("non-empty column has a median");

    Some(Descriptive {
        count,
        mean,
        median,
        std_dev,
        min,
        max,
        sum,
    })
}

/// Continuous percentile with linear interpolation, matching PostgreSQL
/// `PERCENTILE_CONT(fraction) WITHIN GROUP (ORDER BY ...)`.
///
/// Returns `None` for an empty column or a fraction outside `[0, 1]`.
pub fn percentile_cont(values: &[f64], fraction: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&fraction) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("column values are comparable"));

    let position = (sorted.len() - 1) as f64 * fraction;
    let lower = position.floor() as usize;
    let weight = position - lower as f64;

    if weight == 0.0 {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] + weight * (sorted[lower + 1] - sorted[lower]))
    }
}
