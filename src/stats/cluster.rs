//! Fixed-k clustering over a single numeric column.
//!
//! 1-D k-means with seeded initialization, so a fixed seed always produces
//! the same partition. Starting centroids are drawn one per contiguous
//! stratum of the sorted distinct values, which keeps every region of the
//! column represented. Labels are remapped by ascending centroid: cluster 0
//! holds the smallest values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest selectable cluster count.
pub const CLUSTERS_MIN: usize = 2;
/// Largest selectable cluster count.
pub const CLUSTERS_MAX: usize = 8;
/// Default cluster count.
pub const CLUSTERS_DEFAULT: usize = 3;

const MAX_ITERATIONS: usize = 100;

/// Partitions `values` into at most `k` clusters by value similarity.
///
/// Returns one label per input value, in input order. `k` is clamped to
/// the selectable range and to the number of distinct values; an empty
/// column yields an empty assignment.
pub fn cluster_1d(values: &[f64], k: usize, seed: u64) -> Vec<usize> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut distinct: Vec<f64> = values.to_vec();
    distinct.sort_by(|a, b| a.partial_cmp(b).expect("column values are comparable"));
    distinct.dedup();

    let k = k.clamp(CLUSTERS_MIN, CLUSTERS_MAX).min(distinct.len());
    if k <= 1 {
        return vec![0; values.len()];
    }

    let mut centroids = initial_centroids(&distinct, k, seed);

    let mut assignments = vec![0usize; values.len()];
    for _ in 0..MAX_ITERATIONS {
        let next: Vec<usize> = values
            .iter()
            .map(|&v| nearest_centroid(&centroids, v))
            .collect();

        let converged = next == assignments;
        assignments = next;
        if converged {
            break;
        }

        // Recompute each centroid as the mean of its members; an emptied
        // cluster keeps its previous centroid.
        for (label, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<f64> = values
                .iter()
                .zip(&assignments)
                .filter(|(_, &a)| a == label)
                .map(|(&v, _)| v)
                .collect();
            if !members.is_empty() {
                *centroid = members.iter().sum::<f64>() / members.len() as f64;
            }
        }
    }

    relabel_by_centroid(&centroids, &assignments)
}

/// One seeded pick per stratum of the sorted distinct values.
fn initial_centroids(distinct: &[f64], k: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = distinct.len() / k;
    let extra = distinct.len() % k;

    let mut centroids = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let len = base + usize::from(i < extra);
        centroids.push(distinct[start + rng.gen_range(0..len)]);
        start += len;
    }
    centroids
}

fn nearest_centroid(centroids: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let distance = (value - c).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}

/// Remaps labels so cluster 0 has the smallest centroid.
fn relabel_by_centroid(centroids: &[f64], assignments: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..centroids.len()).collect();
    order.sort_by(|&a, &b| {
        centroids[a]
            .partial_cmp(&centroids[b])
            .expect("centroids are comparable")
    });

    let mut remap = vec![0usize; centroids.len()];
    for (new_label, &old_label) in order.iter().enumerate() {
        remap[old_label] = new_label;
    }

    assignments.iter().map(|&a| remap[a]).collect()
}
