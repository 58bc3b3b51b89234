use geolinkage::{
    Dendrogram, DistanceMetric, GeoLinkage, LinkageAlgorithm, LinkageConfig, LinkageCriterion,
    LinkageError, Point,
};

pub type ClusterFn = fn(&GeoLinkage<f64>) -> Result<Dendrogram<f64>, LinkageError>;

pub fn test_massachusetts_single(cluster_fn: ClusterFn) {
    let points = massachusetts();
    let clusterer = GeoLinkage::default_config(&points);
    let dendrogram = cluster_fn(&clusterer).unwrap();

    let expected = [
        (1, 2, 1.477, 2),
        (0, 7, 4.196, 3),
        (4, 5, 11.636, 2),
        (9, 6, 58.502, 3),
        (8, 3, 58.632, 4),
        (11, 10, 67.315, 7),
    ];
    assert_eq!(expected.len(), dendrogram.len());
    for (step, (cluster1, cluster2, dissimilarity, size)) in dendrogram.steps().iter().zip(expected) {
        assert_eq!((cluster1, cluster2, size), (step.cluster1, step.cluster2, step.size));
        assert!((step.dissimilarity - dissimilarity).abs() < 1e-3);
    }
}

pub fn test_builder_cluster(cluster_fn: ClusterFn) {
    let points = massachusetts();
    let config = LinkageConfig::builder()
        .criterion(LinkageCriterion::Complete)
        .algorithm(LinkageAlgorithm::NnChain)
        .dist_metric(DistanceMetric::Haversine)
        .build();
    let clusterer = GeoLinkage::new(&points, config);
    let dendrogram = cluster_fn(&clusterer).unwrap();

    // The eastern cities and Worcester against the western ones
    let root = dendrogram.root();
    let last = dendrogram[dendrogram.len() - 1];
    assert_eq!(12, root);
    assert_eq!(vec![0, 1, 2, 3], dendrogram.members(last.cluster1));
    assert_eq!(vec![4, 5, 6], dendrogram.members(last.cluster2));
    // Boston to Pittsfield
    assert!((last.dissimilarity - 179.738).abs() < 1e-3);
}

pub fn test_sphere_radius_sets_unit(cluster_fn: ClusterFn) {
    const EARTH_MEAN_RADIUS_MILES: f64 = 3958.756;
    let points = massachusetts();
    let km = GeoLinkage::default_config(&points);
    let config = LinkageConfig::builder()
        .sphere_radius(EARTH_MEAN_RADIUS_MILES)
        .build();
    let miles = GeoLinkage::new(&points, config);

    let in_km = cluster_fn(&km).unwrap();
    let in_miles = cluster_fn(&miles).unwrap();
    let ratio = EARTH_MEAN_RADIUS_MILES / geolinkage::distance::EARTH_MEAN_RADIUS_KM;
    for (a, b) in in_km.steps().iter().zip(in_miles.steps()) {
        assert_eq!((a.cluster1, a.cluster2, a.size), (b.cluster1, b.cluster2, b.size));
        assert!((a.dissimilarity * ratio - b.dissimilarity).abs() < 1e-9);
    }
}

pub fn test_every_criterion(cluster_fn: ClusterFn) {
    let points = massachusetts();
    for criterion in LinkageCriterion::ALL {
        let config = LinkageConfig::builder().criterion(criterion).build();
        let clusterer = GeoLinkage::new(&points, config);
        let dendrogram = cluster_fn(&clusterer).unwrap();

        assert_eq!(points.len() - 1, dendrogram.len());
        assert_eq!(points.len(), dendrogram[dendrogram.len() - 1].size);
        // Cambridge and Somerville are the closest pair whatever the criterion
        assert_eq!((1, 2), (dendrogram[0].cluster1, dendrogram[0].cluster2));
        assert!(dendrogram
            .steps()
            .windows(2)
            .all(|w| w[0].dissimilarity <= w[1].dissimilarity));
    }
}

pub fn test_empty_data(cluster_fn: ClusterFn) {
    let points: Vec<Point<f64>> = Vec::new();
    let clusterer = GeoLinkage::default_config(&points);
    let result = cluster_fn(&clusterer);
    assert!(matches!(result, Err(LinkageError::InsufficientData(0))));
}

pub fn test_single_point(cluster_fn: ClusterFn) {
    let points = vec![Point::new(0, "Boston", 42.3584, -71.0598)];
    let clusterer = GeoLinkage::default_config(&points);
    let result = cluster_fn(&clusterer);
    assert!(matches!(result, Err(LinkageError::InsufficientData(1))));
}

pub fn test_two_points(cluster_fn: ClusterFn) {
    let points = vec![
        Point::new(0, "Boston", 42.3584, -71.0598),
        Point::new(1, "Cambridge", 42.3751, -71.1056),
    ];
    let clusterer = GeoLinkage::default_config(&points);
    let dendrogram = cluster_fn(&clusterer).unwrap();
    assert_eq!(1, dendrogram.len());
    assert_eq!((0, 1, 2), (dendrogram[0].cluster1, dendrogram[0].cluster2, dendrogram[0].size));
}

pub fn test_non_finite_coordinate(cluster_fn: ClusterFn) {
    let mut points = massachusetts();
    points[3].longitude = f64::NAN;
    let clusterer = GeoLinkage::default_config(&points);
    let result = cluster_fn(&clusterer);
    assert!(matches!(result, Err(LinkageError::InvalidInput(..))));
}

pub fn test_out_of_range_coordinate(cluster_fn: ClusterFn) {
    let mut points = massachusetts();
    points[0].latitude = -90.5;
    let clusterer = GeoLinkage::default_config(&points);
    let result = cluster_fn(&clusterer);
    assert!(matches!(result, Err(LinkageError::InvalidInput(..))));
}

pub fn test_mst_rejects_complete(cluster_fn: ClusterFn) {
    let points = massachusetts();
    let config = LinkageConfig::builder()
        .criterion(LinkageCriterion::Complete)
        .algorithm(LinkageAlgorithm::MinSpanningTree)
        .build();
    let clusterer = GeoLinkage::new(&points, config);
    let result = cluster_fn(&clusterer);
    assert!(matches!(result, Err(LinkageError::UnsupportedCriterion(..))));
}

pub fn test_duplicate_locations(cluster_fn: ClusterFn) {
    let points = vec![
        Point::new(0, "Boston", 42.3584, -71.0598),
        Point::new(1, "Worcester", 42.2626, -71.8023),
        Point::new(2, "Boston again", 42.3584, -71.0598),
    ];
    let clusterer = GeoLinkage::default_config(&points);
    let dendrogram = cluster_fn(&clusterer).unwrap();
    assert_eq!((0, 2, 0.0), (dendrogram[0].cluster1, dendrogram[0].cluster2, dendrogram[0].dissimilarity));
    assert_eq!((1, 3), (dendrogram[1].cluster1, dendrogram[1].cluster2));
}

pub fn test_geo_cluster_across_180th_meridian(cluster_fn: ClusterFn) {
    let points = vec![
        Point::new(0, "Taveuni", -16.8, 179.9),
        Point::new(1, "Lomaloma", -17.3, -178.9),
        Point::new(2, "Rabi", -16.5, -179.9),
        Point::new(3, "Suva", -18.1, 178.4),
        Point::new(4, "Auckland", -36.8, 174.7),
        Point::new(5, "Wellington", -41.3, 174.8),
    ];
    let clusterer = GeoLinkage::default_config(&points);
    let dendrogram = cluster_fn(&clusterer).unwrap();

    // Taveuni and Rabi are under 40 km apart, across the date line
    assert_eq!((0, 2), (dendrogram[0].cluster1, dendrogram[0].cluster2));
    assert!(dendrogram[0].dissimilarity < 40.0);

    // The Fijian islands all join before New Zealand
    let fiji = dendrogram
        .steps()
        .iter()
        .position(|step| step.size == 4)
        .map(|k| dendrogram.observations() + k)
        .unwrap();
    assert_eq!(vec![0, 1, 2, 3], sorted(dendrogram.members(fiji)));
}

pub fn massachusetts() -> Vec<Point<f64>> {
    geolinkage::point::points_from_records([
        ("Boston", 42.3584, -71.0598),
        ("Cambridge", 42.3751, -71.1056),
        ("Somerville", 42.3876, -71.0995),
        ("Worcester", 42.2626, -71.8023),
        ("Springfield", 42.1015, -72.5898),
        ("Holyoke", 42.2043, -72.6162),
        ("Pittsfield", 42.4501, -73.2454),
    ])
}

fn sorted(mut ids: Vec<usize>) -> Vec<usize> {
    ids.sort_unstable();
    ids
}
