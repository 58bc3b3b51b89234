use super::allocate;
use crate::{CondensedMatrix, DistanceMetric, LinkageConfig, LinkageError, Point};
use num_traits::Float;

pub(crate) struct DissimilarityCalculator<'a, T> {
    points: &'a [Point<T>],
    dist_metric: DistanceMetric,
    sphere_radius: T,
}

impl<'a, T: Float> DissimilarityCalculator<'a, T> {
    pub(crate) fn new(points: &'a [Point<T>], config: &LinkageConfig) -> Self {
        Self {
            points,
            dist_metric: config.dist_metric,
            sphere_radius: T::from(config.sphere_radius).unwrap_or_else(T::one),
        }
    }

    pub(crate) fn calc_condensed_matrix(&self) -> Result<CondensedMatrix<T>, LinkageError> {
        let (metric, radius) = (self.dist_metric, self.sphere_radius);
        fill_condensed(self.points, |a, b| metric.calc_dist(a, b, radius))
    }
}

pub(crate) fn fill_condensed<T, F>(points: &[Point<T>], dist_func: F) -> Result<CondensedMatrix<T>, LinkageError>
where
    T: Float,
    F: Fn(&Point<T>, &Point<T>) -> T,
{
    let n_samples = points.len();
    let mut data = allocate(n_samples)?;
    for (i, point) in points.iter().enumerate() {
        data.extend(points[i + 1..].iter().map(|other| dist_func(point, other)));
    }
    Ok(CondensedMatrix::from_parts(data, n_samples))
}
