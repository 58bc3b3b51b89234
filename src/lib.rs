//! Agglomerative hierarchical clustering of geographic locations in Rust. Generic over floating
//! point numeric types.
//!
//! Points given as latitude and longitude are compared pairwise with the great-circle (Haversine)
//! distance, and the dissimilarities are stored in a condensed matrix: the upper triangle of the
//! full distance matrix, flattened row by row. The matrix is then clustered bottom up. Every
//! observation starts in its own cluster and the two closest clusters are merged until a single
//! cluster remains. How close two clusters are is decided by the linkage criterion:
//!  * single: the distance between their closest members;
//!  * complete: the distance between their farthest members;
//!  * average (UPGMA): the mean distance over all pairs of members;
//!  * weighted (WPGMA): the mean of the distances of the two merged halves; and
//!  * ward: the increase in within cluster variance caused by the merge.
//!
//! The result is a stepwise dendrogram. For `N` observations it has `N - 1` steps; step `k`
//! merges two existing clusters into the new cluster `N + k`.
//!
//! The nearest neighbour chain algorithm does the clustering in O(N²) time, using the matrix
//! itself as working storage. Condensed matrices can be saved and loaded as a flat sequence of
//! little endian 64 bit floats, so expensive distance computations need only be done once.
//!
//! # Examples
//! ```
//!use geolinkage::{GeoLinkage, LinkageConfig, LinkageCriterion, Point};
//!
//!let points = vec![
//!    Point::new(0, "Boston", 42.3584, -71.0598),
//!    Point::new(1, "Springfield", 42.1015, -72.5898),
//!    Point::new(2, "Cambridge", 42.3751, -71.1056),
//!    Point::new(3, "Holyoke", 42.2043, -72.6162),
//!];
//!let config = LinkageConfig::builder()
//!    .criterion(LinkageCriterion::Average)
//!    .build();
//!let clusterer = GeoLinkage::new(&points, config);
//!let dendrogram = clusterer.cluster().unwrap();
//!
//!assert_eq!(3, dendrogram.len());
//! // Boston and Cambridge form cluster 4, Springfield and Holyoke cluster 5
//!assert_eq!((0, 2), (dendrogram[0].cluster1, dendrogram[0].cluster2));
//!assert_eq!((1, 3), (dendrogram[1].cluster1, dendrogram[1].cluster2));
//!assert_eq!((4, 5), (dendrogram[2].cluster1, dendrogram[2].cluster2));
//!assert_eq!(4, dendrogram[2].size);
//! ```
//!
//! # References
//! * [Müllner, D. Modern hierarchical, agglomerative clustering algorithms.](https://arxiv.org/abs/1109.2378)
//! * [Murtagh, F.; Contreras, P. Algorithms for hierarchical clustering: an overview.](https://doi.org/10.1002/widm.53)

pub use crate::condensed::{condensed_index, condensed_pair, observations_for_len, CondensedMatrix};
pub use crate::config::{LinkageConfig, LinkageConfigBuilder};
pub use crate::criterion::{LanceWilliams, LinkageCriterion};
pub use crate::dendrogram::{Dendrogram, MergeStep};
#[cfg(feature = "parallel")]
pub use crate::dissimilarity::build_condensed_par;
pub use crate::dissimilarity::build_condensed;
pub use crate::distance::DistanceMetric;
pub use crate::error::LinkageError;
pub use crate::geo_linkage::GeoLinkage;
pub use crate::linkage::{linkage, linkage_from_vec, linkage_with, mst, nnchain, primitive, LinkageAlgorithm};
pub use crate::point::Point;

mod active;
mod condensed;
mod config;
mod criterion;
mod dendrogram;
mod dissimilarity;
pub mod distance;
mod error;
mod geo_linkage;
mod linkage;
pub mod point;
mod union_find;
mod validation;
