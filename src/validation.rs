use crate::{DistanceMetric, LinkageConfig, LinkageError, Point};
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    points: &'a [Point<T>],
    dist_metric: Option<DistanceMetric>,
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(points: &'a [Point<T>], config: &LinkageConfig) -> Self {
        Self {
            points,
            dist_metric: Some(config.dist_metric),
        }
    }

    /// Only the checks every metric needs: enough points with finite coordinates.
    pub(crate) fn metric_agnostic(points: &'a [Point<T>]) -> Self {
        Self {
            points,
            dist_metric: None,
        }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), LinkageError> {
        if self.points.len() < 2 {
            return Err(LinkageError::InsufficientData(self.points.len()));
        }
        for (n, point) in self.points.iter().enumerate() {
            if point.id != n {
                return Err(LinkageError::InvalidInput(format!(
                    "{n}th point ('{}') has id {}; ids must match input positions",
                    point.label, point.id
                )));
            }
            if !point.latitude.is_finite() || !point.longitude.is_finite() {
                return Err(LinkageError::InvalidInput(format!(
                    "{n}th point ('{}') has non-finite coordinate(s)",
                    point.label
                )));
            }
        }
        if self.dist_metric == Some(DistanceMetric::Haversine) {
            self.validate_geographical_coords()?
        }
        Ok(())
    }

    fn validate_geographical_coords(&self) -> Result<(), LinkageError> {
        let max_lat = T::from(90.0).unwrap_or_else(T::max_value);
        let max_lon = T::from(180.0).unwrap_or_else(T::max_value);
        for (n, point) in self.points.iter().enumerate() {
            if point.latitude < -max_lat || point.latitude > max_lat {
                return Err(LinkageError::InvalidInput(format!(
                    "{n}th point ('{}') should have a latitude in range -90 to 90 \
                    for use with Haversine distance",
                    point.label
                )));
            }
            if point.longitude < -max_lon || point.longitude > max_lon {
                return Err(LinkageError::InvalidInput(format!(
                    "{n}th point ('{}') should have a longitude in range -180 to 180 \
                    for use with Haversine distance",
                    point.label
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(points: &[Point<f64>], metric: DistanceMetric) -> Result<(), LinkageError> {
        let config = LinkageConfig::builder().dist_metric(metric).build();
        DataValidator::new(points, &config).validate_input_data()
    }

    #[test]
    fn too_few_points() {
        let points = vec![Point::new(0, "a", 1.0, 1.0)];
        assert!(matches!(
            validate(&points, DistanceMetric::Euclidean),
            Err(LinkageError::InsufficientData(1))
        ));
        assert!(matches!(
            validate(&[], DistanceMetric::Euclidean),
            Err(LinkageError::InsufficientData(0))
        ));
    }

    #[test]
    fn non_finite() {
        let points = vec![Point::new(0, "a", 1.0, 1.0), Point::new(1, "b", f64::NAN, 1.0)];
        assert!(matches!(
            validate(&points, DistanceMetric::Euclidean),
            Err(LinkageError::InvalidInput(..))
        ));
        let points = vec![Point::new(0, "a", 1.0, f64::INFINITY), Point::new(1, "b", 1.0, 1.0)];
        let result = DataValidator::metric_agnostic(&points).validate_input_data();
        assert!(matches!(result, Err(LinkageError::InvalidInput(..))));
    }

    #[test]
    fn ids_must_match_positions() {
        let points = vec![Point::new(1, "a", 1.0, 1.0), Point::new(0, "b", 1.0, 2.0)];
        let result = DataValidator::metric_agnostic(&points).validate_input_data();
        assert!(matches!(result, Err(LinkageError::InvalidInput(message)) if message.contains("id 1")));

        let points = vec![Point::new(0, "a", 1.0, 1.0), Point::new(0, "b", 1.0, 2.0)];
        assert!(validate(&points, DistanceMetric::Haversine).is_err());
    }

    #[test]
    fn geographical_ranges_only_for_haversine() {
        let points = vec![Point::new(0, "a", 95.0, 1.0), Point::new(1, "b", 1.0, 1.0)];
        assert!(matches!(
            validate(&points, DistanceMetric::Haversine),
            Err(LinkageError::InvalidInput(..))
        ));
        assert!(validate(&points, DistanceMetric::Euclidean).is_ok());

        let points = vec![Point::new(0, "a", 5.0, -181.0), Point::new(1, "b", 1.0, 1.0)];
        assert!(validate(&points, DistanceMetric::Haversine).is_err());
    }
}
