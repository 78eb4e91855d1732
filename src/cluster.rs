//! K-means cluster assignment for geolocated coordinates.

use linfa::prelude::*;
use linfa_clustering::KMeans;
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, KMEANS_MAX_ITERATIONS, KMEANS_TOLERANCE};
use crate::error_handling::ClusterError;

/// K-means parameters for one run.
#[derive(Debug, Clone)]
pub struct ClusterSettings {
    /// Upper bound on k; the actual k is `min(max_clusters, n_points)`
    pub max_clusters: usize,
    /// Number of random initializations; the lowest-inertia partition wins
    pub n_init: usize,
    pub max_iterations: u64,
    pub tolerance: f64,
    /// Fixed seed for reproducible labels; entropy when `None`
    pub seed: Option<u64>,
}

impl From<&Config> for ClusterSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_clusters: config.max_clusters,
            n_init: config.n_init,
            max_iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
            seed: config.seed,
        }
    }
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Result of clustering: one label per input row, in input order.
#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    pub labels: Vec<usize>,
    /// The k that was fitted; every label is in `[0, n_clusters)`
    pub n_clusters: usize,
    /// Within-cluster sum of squares of the selected partition
    pub inertia: f64,
}

impl ClusterAssignment {
    /// Number of points assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in &self.labels {
            if label < self.n_clusters {
                sizes[label] += 1;
            }
        }
        sizes
    }
}

/// Number of clusters to request for `n_points` points.
///
/// Never more clusters than points.
pub fn cluster_count(max_clusters: usize, n_points: usize) -> usize {
    max_clusters.min(n_points)
}

/// Clusters `[latitude, longitude]` rows with k-means.
///
/// Runs `settings.n_init` k-means++ initializations and keeps the partition
/// with the lowest inertia. Label identity is arbitrary: two runs without a
/// fixed seed may permute labels even when cluster membership agrees.
///
/// # Errors
///
/// Fails on an empty matrix, a non-finite coordinate, or any error raised by
/// the k-means routine. There is no fallback clustering.
pub fn assign_clusters(
    coordinates: &Array2<f64>,
    settings: &ClusterSettings,
) -> Result<ClusterAssignment, ClusterError> {
    let n_points = coordinates.nrows();
    if n_points == 0 {
        return Err(ClusterError::Empty);
    }
    if let Some(row) = coordinates
        .outer_iter()
        .position(|point| point.iter().any(|v| !v.is_finite()))
    {
        return Err(ClusterError::NonFinite { row });
    }

    let n_clusters = cluster_count(settings.max_clusters, n_points);
    info!("Clustering {n_points} locations into {n_clusters} clusters");

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = DatasetBase::from(coordinates.view());
    let model = KMeans::params_with_rng(n_clusters, rng)
        .n_runs(settings.n_init)
        .max_n_iterations(settings.max_iterations)
        .tolerance(settings.tolerance)
        .fit(&dataset)?;

    let labels: Array1<usize> = model.predict(coordinates);
    if labels.len() != n_points {
        return Err(ClusterError::LabelMismatch {
            expected: n_points,
            actual: labels.len(),
        });
    }

    let inertia = compute_inertia(coordinates, &labels, model.centroids());
    debug!("Selected partition inertia: {inertia:.4}");

    Ok(ClusterAssignment {
        labels: labels.to_vec(),
        n_clusters,
        inertia,
    })
}

/// Compute within-cluster sum of squares (inertia)
fn compute_inertia(points: &Array2<f64>, labels: &Array1<usize>, centroids: &Array2<f64>) -> f64 {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, &cluster)| {
            (cluster < centroids.nrows())
                .then(|| squared_distance(points.row(i), centroids.row(cluster)))
        })
        .sum()
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn seeded(seed: u64) -> ClusterSettings {
        ClusterSettings {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Three tight groups: US east coast, western Europe, eastern Australia.
    fn three_regions() -> Array2<f64> {
        array![
            [39.03, -77.50],
            [40.71, -74.01],
            [38.90, -77.04],
            [48.86, 2.35],
            [50.11, 8.68],
            [52.52, 13.40],
            [-33.87, 151.21],
            [-37.81, 144.96],
            [-27.47, 153.03],
        ]
    }

    #[test]
    fn test_cluster_count_is_bounded() {
        assert_eq!(cluster_count(5, 1), 1);
        assert_eq!(cluster_count(5, 3), 3);
        assert_eq!(cluster_count(5, 5), 5);
        assert_eq!(cluster_count(5, 100), 5);
    }

    #[test]
    fn test_labels_cover_every_point_in_range() {
        for n in 1..=8 {
            let coords = Array2::from_shape_fn((n, 2), |(i, j)| (i * 17 + j * 5) as f64);
            let assignment = assign_clusters(&coords, &seeded(42)).unwrap();
            let k = cluster_count(5, n);
            assert_eq!(assignment.n_clusters, k);
            assert_eq!(assignment.labels.len(), n);
            assert!(assignment.labels.iter().all(|&l| l < k));
        }
    }

    #[test]
    fn test_single_point() {
        let assignment = assign_clusters(&array![[51.5, -0.12]], &seeded(1)).unwrap();
        assert_eq!(assignment.labels, vec![0]);
        assert_eq!(assignment.n_clusters, 1);
        assert_eq!(assignment.inertia, 0.0);
    }

    #[test]
    fn test_separated_regions_group_together() {
        let settings = ClusterSettings {
            max_clusters: 3,
            ..seeded(7)
        };
        let assignment = assign_clusters(&three_regions(), &settings).unwrap();
        let labels = &assignment.labels;

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_eq!(labels[6], labels[7]);
        assert_eq!(labels[7], labels[8]);
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[0], labels[6]);
        assert_ne!(labels[3], labels[6]);
        assert_eq!(assignment.cluster_sizes(), vec![3, 3, 3]);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let coords = three_regions();
        let first = assign_clusters(&coords, &seeded(99)).unwrap();
        let second = assign_clusters(&coords, &seeded(99)).unwrap();
        assert_eq!(first.labels, second.labels);
    }

    #[test]
    fn test_empty_input_is_error() {
        let coords = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            assign_clusters(&coords, &seeded(1)),
            Err(ClusterError::Empty)
        ));
    }

    #[test]
    fn test_non_finite_input_is_error() {
        let coords = array![[1.0, 2.0], [f64::NAN, 3.0]];
        assert!(matches!(
            assign_clusters(&coords, &seeded(1)),
            Err(ClusterError::NonFinite { row: 1 })
        ));
    }

    #[test]
    fn test_cluster_sizes_sum_to_points() {
        let assignment = assign_clusters(&three_regions(), &seeded(3)).unwrap();
        assert_eq!(assignment.cluster_sizes().len(), 5);
        assert_eq!(assignment.cluster_sizes().iter().sum::<usize>(), 9);
    }

    #[test]
    fn test_compute_inertia() {
        let points = array![[0.0, 0.0], [2.0, 0.0], [10.0, 10.0]];
        let labels = Array1::from(vec![0, 0, 1]);
        let centroids = array![[1.0, 0.0], [10.0, 10.0]];
        assert_eq!(compute_inertia(&points, &labels, &centroids), 2.0);
    }
}
