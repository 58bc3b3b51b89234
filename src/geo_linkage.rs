#[cfg(feature = "parallel")]
use crate::dissimilarity::parallel::DissimilarityCalculatorPar;
use crate::dissimilarity::serial::DissimilarityCalculator;
use crate::validation::DataValidator;
use crate::{linkage_with, CondensedMatrix, Dendrogram, LinkageConfig, LinkageError, Point};
use num_traits::Float;
use tracing::debug;

/// Agglomerative hierarchical clustering of geographic points. Generic over floating point
/// numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLinkage<'a, T> {
    points: &'a [Point<T>],
    config: LinkageConfig,
}

impl<'a, T: Float + Send + Sync> GeoLinkage<'a, T> {
    /// Creates a clusterer for the points using a custom configuration.
    ///
    /// # Parameters
    /// * `points` - the points to cluster. Their index in the slice is their observation id.
    /// * `config` - the clustering configuration.
    ///
    /// # Returns
    /// * The clusterer.
    ///
    /// # Examples
    /// ```
    ///use geolinkage::{DistanceMetric, GeoLinkage, LinkageConfig, LinkageCriterion, Point};
    ///
    ///let points = vec![
    ///    Point::new(0, "Boston", 42.3584, -71.0598),
    ///    Point::new(1, "Cambridge", 42.3751, -71.1056),
    ///    Point::new(2, "Worcester", 42.2626, -71.8023),
    ///];
    ///let config = LinkageConfig::builder()
    ///    .criterion(LinkageCriterion::Average)
    ///    .dist_metric(DistanceMetric::Haversine)
    ///    .build();
    ///let clusterer = GeoLinkage::new(&points, config);
    /// ```
    pub fn new(points: &'a [Point<T>], config: LinkageConfig) -> Self {
        GeoLinkage { points, config }
    }

    /// Creates a clusterer for the points using single linkage on great-circle distances in
    /// kilometres.
    pub fn default_config(points: &'a [Point<T>]) -> GeoLinkage<'a, T> {
        GeoLinkage::new(points, LinkageConfig::default())
    }

    pub fn config(&self) -> &LinkageConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point<T>] {
        self.points
    }

    /// The label of an observation, or `None` for ids that aren't observations (including the
    /// ids of merged clusters).
    pub fn label(&self, id: usize) -> Option<&str> {
        self.points.get(id).map(|point| point.label.as_str())
    }

    /// Clusters the points passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the dendrogram of the `N - 1` merges. An error
    ///   is returned for fewer than two points, for non-finite or out of range coordinates, or
    ///   when the criterion can't be used with the configured algorithm.
    ///
    /// # Examples
    /// ```
    ///use geolinkage::{GeoLinkage, Point};
    ///
    ///let points = vec![
    ///    Point::new(0, "Boston", 42.3584, -71.0598),
    ///    Point::new(1, "Springfield", 42.1015, -72.5898),
    ///    Point::new(2, "Cambridge", 42.3751, -71.1056),
    ///];
    ///let clusterer = GeoLinkage::default_config(&points);
    ///let dendrogram = clusterer.cluster().unwrap();
    ///
    /// // Boston and Cambridge are merged first
    ///assert_eq!((0, 2), (dendrogram[0].cluster1, dendrogram[0].cluster2));
    ///assert_eq!(3, dendrogram[1].size);
    /// ```
    #[cfg(feature = "serial")]
    pub fn cluster(&self) -> Result<Dendrogram<T>, LinkageError> {
        let matrix = self.condensed_matrix()?;
        self.cluster_precomputed(matrix)
    }

    /// Clusters the points passed to the constructor, computing the dissimilarity matrix in
    /// parallel. Only worthwhile for larger sets of points.
    ///
    /// # Returns
    /// * The same dendrogram, or the same errors, as `cluster`.
    #[cfg(feature = "parallel")]
    pub fn cluster_par(&self) -> Result<Dendrogram<T>, LinkageError> {
        let matrix = self.condensed_matrix_par()?;
        self.cluster_precomputed(matrix)
    }

    /// Computes the condensed dissimilarity matrix of the points with the configured metric,
    /// without clustering. Useful to persist the matrix and cluster it later.
    pub fn condensed_matrix(&self) -> Result<CondensedMatrix<T>, LinkageError> {
        DataValidator::new(self.points, &self.config).validate_input_data()?;
        debug!(n_samples = self.points.len(), metric = ?self.config.dist_metric, "computing dissimilarities");
        DissimilarityCalculator::new(self.points, &self.config).calc_condensed_matrix()
    }

    /// As `condensed_matrix`, but the rows are computed in parallel.
    #[cfg(feature = "parallel")]
    pub fn condensed_matrix_par(&self) -> Result<CondensedMatrix<T>, LinkageError> {
        DataValidator::new(self.points, &self.config).validate_input_data()?;
        debug!(n_samples = self.points.len(), metric = ?self.config.dist_metric, "computing dissimilarities in parallel");
        DissimilarityCalculatorPar::new(self.points, &self.config).calc_condensed_matrix()
    }

    /// Clusters a previously computed (or loaded) condensed matrix of these points with the
    /// configured criterion and algorithm. The matrix is consumed as working storage.
    ///
    /// # Returns
    /// * The dendrogram, or an error if the matrix doesn't describe exactly as many
    ///   observations as there are points.
    pub fn cluster_precomputed(&self, matrix: CondensedMatrix<T>) -> Result<Dendrogram<T>, LinkageError> {
        if matrix.observations() != self.points.len() {
            return Err(LinkageError::MalformedMatrix(format!(
                "matrix describes {} observations, but {} points were given",
                matrix.observations(),
                self.points.len()
            )));
        }
        linkage_with(matrix, self.config.criterion, self.config.algorithm)
    }
}
