use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use geolinkage::{
    CondensedMatrix, DistanceMetric, GeoLinkage, LinkageAlgorithm, LinkageConfig,
    LinkageCriterion,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Hierarchical clustering of geographic locations
///
/// Reads locations from a CSV file, clusters them by great-circle distance and writes the
/// dendrogram to stdout as CSV, one merge step per row.
#[derive(Parser, Debug)]
#[command(name = "geolinkage")]
#[command(version)]
#[command(about = "Hierarchical clustering of geographic locations")]
struct Cli {
    /// CSV file with the header City,Region,Country,Latitude,Longitude. Coordinates are signed
    /// decimal degrees.
    location_data: PathBuf,

    /// Linkage criterion: single, complete, average, weighted or ward
    #[arg(short, long, default_value = "single")]
    method: String,

    /// Clustering algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::NnChain)]
    algorithm: Algorithm,

    /// Distance between two locations
    #[arg(long, value_enum, default_value_t = Metric::Haversine)]
    metric: Metric,

    /// Sphere radius for the haversine metric, which sets the distance unit. Defaults to the
    /// mean radius of the Earth in kilometres.
    #[arg(long)]
    radius: Option<f64>,

    /// Load the condensed distance matrix from this file instead of computing it
    #[arg(long, value_name = "PATH")]
    load_dist_from: Option<PathBuf>,

    /// Save the condensed distance matrix to this file
    #[arg(long, value_name = "PATH")]
    save_dist_to: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Algorithm {
    NnChain,
    Mst,
    Primitive,
}

impl From<Algorithm> for LinkageAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::NnChain => LinkageAlgorithm::NnChain,
            Algorithm::Mst => LinkageAlgorithm::MinSpanningTree,
            Algorithm::Primitive => LinkageAlgorithm::Primitive,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Metric {
    Haversine,
    Euclidean,
}

impl From<Metric> for DistanceMetric {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Haversine => DistanceMetric::Haversine,
            Metric::Euclidean => DistanceMetric::Euclidean,
        }
    }
}

/// A CSV record of the location data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Location {
    city: String,
    region: String,
    country: String,
    latitude: f64,
    longitude: f64,
}

/// A CSV record of the output, one step of the dendrogram.
#[derive(Debug, Serialize)]
struct Step {
    cluster1: usize,
    cluster2: usize,
    dissimilarity: f64,
    size: usize,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let criterion: LinkageCriterion = cli.method.parse()?;
    let locations = read_locations(&cli.location_data)?;
    let points = geolinkage::point::points_from_records(locations.iter().map(|location| {
        let label = format!("{}, {}, {}", location.city, location.region, location.country);
        (label, location.latitude, location.longitude)
    }));

    let mut builder = LinkageConfig::builder()
        .criterion(criterion)
        .algorithm(cli.algorithm.into())
        .dist_metric(cli.metric.into());
    if let Some(radius) = cli.radius {
        builder = builder.sphere_radius(radius);
    }
    let clusterer = GeoLinkage::new(&points, builder.build());

    let start = Instant::now();
    let matrix = match &cli.load_dist_from {
        Some(path) => load_matrix(path)?,
        None => compute_matrix(&clusterer)?,
    };
    info!(elapsed = ?start.elapsed(), entries = matrix.len(), "condensed matrix ready");

    if let Some(path) = &cli.save_dist_to {
        let start = Instant::now();
        save_matrix(path, &matrix)?;
        info!(elapsed = ?start.elapsed(), path = %path.display(), "saved condensed matrix");
    }

    let start = Instant::now();
    let dendrogram = clusterer.cluster_precomputed(matrix)?;
    info!(elapsed = ?start.elapsed(), %criterion, "linkage done");

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    for step in dendrogram.steps() {
        writer.serialize(Step {
            cluster1: step.cluster1,
            cluster2: step.cluster2,
            dissimilarity: step.dissimilarity,
            size: step.size,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn read_locations(path: &Path) -> anyhow::Result<Vec<Location>> {
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let locations = reader
        .deserialize()
        .collect::<Result<Vec<Location>, _>>()
        .with_context(|| format!("invalid location record in {}", path.display()))?;
    info!(count = locations.len(), "read locations");
    Ok(locations)
}

#[cfg(feature = "parallel")]
fn compute_matrix(clusterer: &GeoLinkage<f64>) -> anyhow::Result<CondensedMatrix<f64>> {
    Ok(clusterer.condensed_matrix_par()?)
}

#[cfg(not(feature = "parallel"))]
fn compute_matrix(clusterer: &GeoLinkage<f64>) -> anyhow::Result<CondensedMatrix<f64>> {
    Ok(clusterer.condensed_matrix()?)
}

fn load_matrix(path: &Path) -> anyhow::Result<CondensedMatrix<f64>> {
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
    CondensedMatrix::read_from(BufReader::new(file))
        .with_context(|| format!("unable to load condensed matrix from {}", path.display()))
}

fn save_matrix(path: &Path, matrix: &CondensedMatrix<f64>) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    matrix.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
