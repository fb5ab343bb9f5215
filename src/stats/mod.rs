//! Client-side aggregate helpers.
//!
//! Descriptive statistics, quantile-based outlier fences, and fixed-k
//! clustering over a single numeric column. The descriptive helpers match
//! the SQL aggregates (`AVG`, `PERCENTILE_CONT`, `STDDEV`, ...) so the
//! in-query and client-side styles stay numerically consistent.

mod cluster;
mod describe;
mod outliers;

pub use cluster::{cluster_1d, CLUSTERS_DEFAULT, CLUSTERS_MAX, CLUSTERS_MIN};
pub use describe::{describe, percentile_cont, Descriptive};
pub use outliers::{flag_upper_outliers, upper_fence, FenceSummary};
