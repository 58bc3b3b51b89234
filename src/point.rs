/// A labelled observation located by its latitude and longitude, in degrees.
///
/// The `id` is the position of the point in the input and doubles as the leaf id of the
/// dendrogram. Clustering rejects points whose ids don't match their positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T> {
    pub id: usize,
    pub label: String,
    pub latitude: T,
    pub longitude: T,
}

impl<T> Point<T> {
    pub fn new(id: usize, label: impl Into<String>, latitude: T, longitude: T) -> Self {
        Point {
            id,
            label: label.into(),
            latitude,
            longitude,
        }
    }
}

/// Numbers a sequence of `(label, latitude, longitude)` records by input order.
///
/// # Examples
/// ```
///use geolinkage::point::points_from_records;
///
///let points = points_from_records(vec![
///    ("Fitchburg", 42.5833333, -71.8027778),
///    ("Framingham", 42.2791667, -71.4166667),
///]);
///assert_eq!(1, points[1].id);
///assert_eq!("Framingham", points[1].label);
/// ```
pub fn points_from_records<T, S, I>(records: I) -> Vec<Point<T>>
where
    S: Into<String>,
    I: IntoIterator<Item = (S, T, T)>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(id, (label, latitude, longitude))| Point::new(id, label, latitude, longitude))
        .collect()
}
