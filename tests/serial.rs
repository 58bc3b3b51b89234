#![cfg(feature = "serial")]
use geolinkage::{Dendrogram, GeoLinkage, LinkageError};

mod common;

macro_rules! define_serial_test {
    ($test_fn:ident) => {
        #[test]
        fn $test_fn() {
            fn cluster_fn(clusterer: &GeoLinkage<f64>) -> Result<Dendrogram<f64>, LinkageError> {
                clusterer.cluster()
            }

            common::$test_fn(cluster_fn);
        }
    };
}

define_serial_test!(test_massachusetts_single);
define_serial_test!(test_builder_cluster);
define_serial_test!(test_sphere_radius_sets_unit);
define_serial_test!(test_every_criterion);
define_serial_test!(test_empty_data);
define_serial_test!(test_single_point);
define_serial_test!(test_two_points);
define_serial_test!(test_non_finite_coordinate);
define_serial_test!(test_out_of_range_coordinate);
define_serial_test!(test_mst_rejects_complete);
define_serial_test!(test_duplicate_locations);
define_serial_test!(test_geo_cluster_across_180th_meridian);
