use crate::validation::DataValidator;
use crate::{CondensedMatrix, LinkageError, Point};
use num_traits::Float;
use tracing::debug;

#[cfg(feature = "parallel")]
pub(super) mod parallel;
pub(super) mod serial;

/// Builds the condensed dissimilarity matrix of a set of points with any distance function, so
/// metrics other than the built in ones can be plugged in.
///
/// Entry `condensed_index(n, i, j)` of the result holds `distance(&points[i], &points[j])` for
/// every `i < j`.
///
/// # Parameters
/// * `points` - the points to compare. There must be at least two, all with finite coordinates.
/// * `distance` - a symmetric distance function returning finite, non negative values.
///
/// # Returns
/// * The condensed matrix, or an error if there are fewer than two points, a coordinate is not
///   finite, or the matrix can't be allocated.
///
/// # Examples
/// ```
///use geolinkage::{build_condensed, Point};
///
///let points = vec![
///    Point::new(0, "a", 0.0, 0.0),
///    Point::new(1, "b", 0.0, 3.0),
///    Point::new(2, "c", 4.0, 0.0),
///];
///let matrix = build_condensed(&points, |a: &Point<f64>, b: &Point<f64>| {
///    (a.latitude - b.latitude).abs() + (a.longitude - b.longitude).abs()
///}).unwrap();
///assert_eq!(&[3.0, 4.0, 7.0], matrix.as_slice());
/// ```
pub fn build_condensed<T, F>(points: &[Point<T>], distance: F) -> Result<CondensedMatrix<T>, LinkageError>
where
    T: Float,
    F: Fn(&Point<T>, &Point<T>) -> T,
{
    DataValidator::metric_agnostic(points).validate_input_data()?;
    serial::fill_condensed(points, distance)
}

/// As [`build_condensed`], but the rows of the matrix are computed in parallel. The result is
/// identical to the serial one.
#[cfg(feature = "parallel")]
pub fn build_condensed_par<T, F>(points: &[Point<T>], distance: F) -> Result<CondensedMatrix<T>, LinkageError>
where
    T: Float + Send + Sync,
    F: Fn(&Point<T>, &Point<T>) -> T + Sync,
{
    DataValidator::metric_agnostic(points).validate_input_data()?;
    parallel::fill_condensed(points, distance)
}

/// Reserves room for the N(N-1)/2 entries of a condensed matrix without aborting the process
/// when the allocation fails.
pub(crate) fn allocate<T>(n_samples: usize) -> Result<Vec<T>, LinkageError> {
    let len = n_samples
        .checked_mul(n_samples.saturating_sub(1))
        .map(|pairs| pairs / 2)
        .ok_or(LinkageError::Allocation(n_samples))?;
    len.checked_mul(std::mem::size_of::<T>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(LinkageError::Allocation(n_samples))?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| LinkageError::Allocation(n_samples))?;
    debug!(n_samples, entries = len, "allocated condensed matrix");
    Ok(data)
}
