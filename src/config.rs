use crate::distance::{DistanceMetric, EARTH_MEAN_RADIUS_KM};
use crate::{LinkageAlgorithm, LinkageCriterion};
use tracing::warn;

// Defaults for parameters
const CRITERION_DEFAULT: LinkageCriterion = LinkageCriterion::Single;
const ALGORITHM_DEFAULT: LinkageAlgorithm = LinkageAlgorithm::NnChain;
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Haversine;
const SPHERE_RADIUS_DEFAULT: f64 = EARTH_MEAN_RADIUS_KM;

/// The settings used when clustering points: how points are compared and how clusters are
/// merged. Use `LinkageConfig::default()` for single linkage on great-circle distances in
/// kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkageConfig {
    pub(crate) criterion: LinkageCriterion,
    pub(crate) algorithm: LinkageAlgorithm,
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) sphere_radius: f64,
}

/// Builder object to set a custom configuration.
#[derive(Debug, Clone, Default)]
pub struct LinkageConfigBuilder {
    criterion: Option<LinkageCriterion>,
    algorithm: Option<LinkageAlgorithm>,
    dist_metric: Option<DistanceMetric>,
    sphere_radius: Option<f64>,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LinkageConfig {
    /// Enters the builder pattern, allowing custom settings to be chosen using the various
    /// setter methods.
    ///
    /// # Returns
    /// * the configuration builder
    pub fn builder() -> LinkageConfigBuilder {
        LinkageConfigBuilder::default()
    }

    pub fn criterion(&self) -> LinkageCriterion {
        self.criterion
    }

    pub fn algorithm(&self) -> LinkageAlgorithm {
        self.algorithm
    }

    pub fn dist_metric(&self) -> DistanceMetric {
        self.dist_metric
    }

    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }
}

impl LinkageConfigBuilder {
    /// Sets the linkage criterion, which decides the dissimilarity between a merged cluster and
    /// the others. Defaults to single linkage.
    ///
    /// # Parameters
    /// * criterion - the linkage criterion
    ///
    /// # Returns
    /// * the configuration builder
    pub fn criterion(mut self, criterion: LinkageCriterion) -> LinkageConfigBuilder {
        self.criterion = Some(criterion);
        self
    }

    /// Sets the clustering algorithm. The choice only affects performance, except that the
    /// minimum spanning tree algorithm supports single linkage alone. Defaults to the nearest
    /// neighbour chain.
    ///
    /// # Parameters
    /// * algorithm - the linkage algorithm
    ///
    /// # Returns
    /// * the configuration builder
    pub fn algorithm(mut self, algorithm: LinkageAlgorithm) -> LinkageConfigBuilder {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets the distance metric used to compare points. Defaults to Haversine.
    ///
    /// # Parameters
    /// * dist_metric - the distance metric
    ///
    /// # Returns
    /// * the configuration builder
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> LinkageConfigBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets the radius of the sphere used by the Haversine metric, which also sets the unit of
    /// the distances. Defaults to the mean radius of the Earth in kilometres. Values that
    /// aren't finite and positive are ignored.
    ///
    /// # Parameters
    /// * sphere_radius - the sphere radius
    ///
    /// # Returns
    /// * the configuration builder
    pub fn sphere_radius(mut self, sphere_radius: f64) -> LinkageConfigBuilder {
        if sphere_radius.is_finite() && sphere_radius > 0.0 {
            self.sphere_radius = Some(sphere_radius);
        } else {
            warn!(
                sphere_radius,
                default = SPHERE_RADIUS_DEFAULT,
                "sphere radius must be finite and positive, using the default"
            );
            self.sphere_radius = None;
        }
        self
    }

    /// Finishes building the configuration.
    ///
    /// # Returns
    /// * The completed configuration.
    pub fn build(self) -> LinkageConfig {
        LinkageConfig {
            criterion: self.criterion.unwrap_or(CRITERION_DEFAULT),
            algorithm: self.algorithm.unwrap_or(ALGORITHM_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
            sphere_radius: self.sphere_radius.unwrap_or(SPHERE_RADIUS_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LinkageConfig::default();
        assert_eq!(LinkageCriterion::Single, config.criterion());
        assert_eq!(LinkageAlgorithm::NnChain, config.algorithm());
        assert_eq!(DistanceMetric::Haversine, config.dist_metric());
        assert_eq!(EARTH_MEAN_RADIUS_KM, config.sphere_radius());
    }

    #[test]
    fn builder_sets_values() {
        let config = LinkageConfig::builder()
            .criterion(LinkageCriterion::Ward)
            .algorithm(LinkageAlgorithm::Primitive)
            .dist_metric(DistanceMetric::Euclidean)
            .sphere_radius(3958.756)
            .build();
        assert_eq!(LinkageCriterion::Ward, config.criterion());
        assert_eq!(LinkageAlgorithm::Primitive, config.algorithm());
        assert_eq!(DistanceMetric::Euclidean, config.dist_metric());
        assert_eq!(3958.756, config.sphere_radius());
    }

    #[test]
    fn invalid_radius_falls_back_to_default() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = LinkageConfig::builder().sphere_radius(radius).build();
            assert_eq!(SPHERE_RADIUS_DEFAULT, config.sphere_radius());
        }
    }
}
