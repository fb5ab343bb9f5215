//! Quantile-based outlier fences.
//!
//! The fence is one-sided: only values strictly above
//! `Q3 + 1.5 * (Q3 - Q1)` are flagged. There is no lower fence.

use crate::stats::describe::percentile_cont;

/// Quartiles and the upper fence derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct FenceSummary {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub upper_fence: f64,
}

/// Computes the upper fence for a column, or `None` when it is empty.
pub fn upper_fence(values: &[f64]) -> Option<FenceSummary> {
    let q1 = percentile_cont(values, 0.25)?;
    let q3 = percentile_cont(values, 0.75)?;
    let iqr = q3 - q1;

    Some(FenceSummary {
        q1,
        q3,
        iqr,
        upper_fence: q3 + 1.5 * iqr,
    })
}

/// Flags each value strictly above the upper fence.
///
/// `flags[i]` corresponds to `values[i]`. Returns `None` for an empty
/// column.
pub fn flag_upper_outliers(values: &[f64]) -> Option<(FenceSummary, Vec<bool>)> {
    let summary = upper_fence(values)?;
    let flags = values.iter().map(|&v| v > summary.upper_fence).collect();
    Some((summary, flags))
}
