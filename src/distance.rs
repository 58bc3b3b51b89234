use crate::Point;
use num_traits::Float;

/// Mean radius of the Earth in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Possible distance metrics that can be used when building the dissimilarity matrix between
/// points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DistanceMetric {
    /// Great-circle distance on a sphere, in the units of the configured sphere radius.
    /// Coordinates must be a latitude in range -90 to 90 and a longitude in range -180 to 180.
    Haversine,
    /// Straight line distance treating (latitude, longitude) as planar coordinates.
    Euclidean,
}

impl DistanceMetric {
    pub(crate) fn calc_dist<T: Float>(&self, a: &Point<T>, b: &Point<T>, radius: T) -> T {
        match *self {
            Self::Haversine => haversine_distance(a, b, radius),
            Self::Euclidean => euclidean_distance(a, b),
        }
    }
}

/// Great-circle distance between two points on a sphere of the given radius.
///
/// The haversine term is clamped to `[0, 1]` so rounding can never push the square root or
/// inverse sine out of their domains. Identical coordinates give exactly zero.
///
/// # Examples
/// ```
///use geolinkage::{distance::{haversine_distance, EARTH_MEAN_RADIUS_KM}, Point};
///
///let london = Point::new(0, "London", 51.5085, -0.1257);
///let paris = Point::new(1, "Paris", 48.8534, 2.3488);
///let dist = haversine_distance(&london, &paris, EARTH_MEAN_RADIUS_KM);
///assert!((dist - 343.9).abs() < 1.0);
/// ```
pub fn haversine_distance<T: Float>(a: &Point<T>, b: &Point<T>, radius: T) -> T {
    let two = T::one() + T::one();
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());

    let half_delta_lat = (lat2 - lat1) / two;
    let half_delta_lon = (lon2 - lon1) / two;
    let h = half_delta_lat.sin().powi(2)
        + lat1.cos() * lat2.cos() * half_delta_lon.sin().powi(2);
    let h = h.max(T::zero()).min(T::one());

    two * radius * h.sqrt().asin()
}

/// Planar distance between the raw coordinates of two points.
pub fn euclidean_distance<T: Float>(a: &Point<T>, b: &Point<T>) -> T {
    (a.latitude - b.latitude).hypot(a.longitude - b.longitude)
}
