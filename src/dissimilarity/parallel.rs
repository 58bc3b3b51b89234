#![cfg(feature = "parallel")]
use super::allocate;
use crate::{CondensedMatrix, DistanceMetric, LinkageConfig, LinkageError, Point};
use num_traits::Float;
use rayon::prelude::*;

pub(crate) struct DissimilarityCalculatorPar<'a, T> {
    points: &'a [Point<T>],
    dist_metric: DistanceMetric,
    sphere_radius: T,
}

impl<'a, T: Float + Send + Sync> DissimilarityCalculatorPar<'a, T> {
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

/// Every row of the upper triangle is a disjoint slice of the output, so rows are filled
/// independently and the layout matches the serial version exactly.
pub(crate) fn fill_condensed<T, F>(points: &[Point<T>], dist_func: F) -> Result<CondensedMatrix<T>, LinkageError>
where
    T: Float + Send + Sync,
    F: Fn(&Point<T>, &Point<T>) -> T + Sync,
{
    let n_samples = points.len();
    let mut data = allocate(n_samples)?;
    data.resize(n_samples * (n_samples - 1) / 2, T::zero());

    let mut rows: Vec<(usize, &mut [T])> = Vec::with_capacity(n_samples);
    let mut rest = data.as_mut_slice();
    for i in 0..n_samples.saturating_sub(1) {
        let (row, tail) = std::mem::take(&mut rest).split_at_mut(n_samples - 1 - i);
        rows.push((i, row));
        rest = tail;
    }

    rows.into_par_iter().for_each(|(i, row)| {
        let point = &points[i];
        for (slot, other) in row.iter_mut().zip(&points[i + 1..]) {
            *slot = dist_func(point, other);
        }
    });

    Ok(CondensedMatrix::from_parts(data, n_samples))
}
