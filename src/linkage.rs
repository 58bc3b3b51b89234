use crate::active::ActiveSet;
use crate::union_find::UnionFind;
use crate::{CondensedMatrix, Dendrogram, LanceWilliams, LinkageCriterion, LinkageError, MergeStep};
use num_traits::Float;
use tracing::debug;

pub use self::mst::mst;
pub use self::nnchain::nnchain;
pub use self::primitive::primitive;

mod mst;
mod nnchain;
mod primitive;

/// The algorithm used to find which clusters merge next.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LinkageAlgorithm {
    /// Follows chains of nearest neighbours until two clusters are each other's nearest
    /// neighbour. O(N²) time for every supported criterion.
    NnChain,
    /// Builds a minimum spanning tree with Prim's algorithm. Single linkage only.
    MinSpanningTree,
    /// Rescans every pair of live clusters before each merge. O(N³) time; mostly useful as a
    /// reference to check the faster algorithms against.
    Primitive,
}

/// Performs hierarchical clustering of a condensed dissimilarity matrix with the nearest
/// neighbour chain algorithm.
///
/// The matrix is consumed and used as working storage, so no second O(N²) buffer is needed.
/// Clone it first to keep the original dissimilarities.
///
/// # Returns
/// * A dendrogram of exactly `N - 1` steps. Step `k` creates cluster `N + k` and steps are
///   ordered by dissimilarity.
///
/// # Examples
/// ```
///use geolinkage::{linkage, CondensedMatrix, LinkageCriterion};
///
///// d(0,1) = 1.0, d(0,2) = 3.0, d(1,2) = 2.0
///let matrix = CondensedMatrix::from_vec(vec![1.0, 3.0, 2.0]).unwrap();
///let dendrogram = linkage(matrix, LinkageCriterion::Single).unwrap();
///
///let first = dendrogram[0];
///assert_eq!((0, 1, 1.0, 2), (first.cluster1, first.cluster2, first.dissimilarity, first.size));
///let second = dendrogram[1];
///assert_eq!((3, 2, 2.0, 3), (second.cluster1, second.cluster2, second.dissimilarity, second.size));
/// ```
pub fn linkage<T: Float>(
    matrix: CondensedMatrix<T>,
    criterion: LinkageCriterion,
) -> Result<Dendrogram<T>, LinkageError> {
    linkage_with(matrix, criterion, LinkageAlgorithm::NnChain)
}

/// Like `linkage`, but with an explicit choice of algorithm.
///
/// # Returns
/// * The dendrogram, or `UnsupportedCriterion` if the minimum spanning tree algorithm is asked
///   for anything other than single linkage.
pub fn linkage_with<T: Float>(
    matrix: CondensedMatrix<T>,
    criterion: LinkageCriterion,
    algorithm: LinkageAlgorithm,
) -> Result<Dendrogram<T>, LinkageError> {
    debug!(
        observations = matrix.observations(),
        %criterion,
        ?algorithm,
        "starting linkage"
    );
    let dendrogram = match (algorithm, criterion) {
        (LinkageAlgorithm::NnChain, _) => nnchain(matrix, criterion),
        (LinkageAlgorithm::MinSpanningTree, LinkageCriterion::Single) => mst(&matrix),
        (LinkageAlgorithm::MinSpanningTree, _) => {
            return Err(LinkageError::UnsupportedCriterion(format!(
                "{criterion} linkage cannot be computed from a minimum spanning tree"
            )))
        }
        (LinkageAlgorithm::Primitive, _) => primitive(matrix, criterion),
    };
    debug!(steps = dendrogram.len(), "finished linkage");
    Ok(dendrogram)
}

/// Clusters a raw condensed matrix with a criterion given by name. Every check happens before
/// any clustering work.
///
/// # Returns
/// * The dendrogram, or `UnsupportedCriterion` for an unknown method name, `MalformedMatrix`
///   for a length that isn't triangular, or `InsufficientData` for fewer than two observations.
pub fn linkage_from_vec<T: Float>(data: Vec<T>, method: &str) -> Result<Dendrogram<T>, LinkageError> {
    let criterion: LinkageCriterion = method.parse()?;
    let matrix = CondensedMatrix::from_vec(data)?;
    linkage(matrix, criterion)
}

/// A merge recorded against matrix slots rather than cluster labels. Slot `a` is retired and
/// slot `b` holds the merged cluster from then on.
#[derive(Debug, Clone, Copy)]
struct SlotMerge<T> {
    a: usize,
    b: usize,
    dissimilarity: T,
}

/// Overwrites the dissimilarities from slot `b` to every other live cluster with those of the
/// cluster formed by merging slots `a` and `b`. The coefficients are resolved once per merge,
/// except for Ward where they depend on the size of each third cluster.
fn update_dissimilarities<T: Float>(
    matrix: &mut CondensedMatrix<T>,
    active: &ActiveSet,
    sizes: &[usize],
    criterion: LinkageCriterion,
    a: usize,
    b: usize,
) {
    debug_assert!(active.contains(a) && active.contains(b));
    let d_ab = matrix.get(a, b);
    let (size_a, size_b) = (sizes[a], sizes[b]);

    match criterion {
        LinkageCriterion::Ward => update_each(matrix, active, sizes, a, b, |d_ax, d_bx, size_x| {
            LanceWilliams::ward(size_a, size_b, size_x).apply(d_ax, d_bx, d_ab)
        }),
        _ => {
            let lw = criterion.coefficients::<T>(size_a, size_b, 1);
            update_each(matrix, active, sizes, a, b, |d_ax, d_bx, _| lw.apply(d_ax, d_bx, d_ab))
        }
    }
}

fn update_each<T, F>(
    matrix: &mut CondensedMatrix<T>,
    active: &ActiveSet,
    sizes: &[usize],
    a: usize,
    b: usize,
    update: F,
) where
    T: Float,
    F: Fn(T, T, usize) -> T,
{
    for x in active.iter() {
        if x == a || x == b {
            continue;
        }
        let merged = update(matrix.get(a, x), matrix.get(b, x), sizes[x]);
        matrix.set(b, x, merged);
    }
}

/// Turns merges recorded in construction order into a dendrogram.
///
/// Each merge is keyed by its dissimilarity raised to the keys of the merges that built its
/// inputs, so sorting by key never places a merge before one it depends on. The keys are what
/// the dendrogram reports, which keeps the dissimilarities non-decreasing even where rounding
/// produced a tiny inversion.
fn merges_into_dendrogram<T: Float>(
    merges: Vec<SlotMerge<T>>,
    observations: usize,
    criterion: LinkageCriterion,
) -> Dendrogram<T> {
    let mut last_merge_into = vec![None; observations];
    let mut keys: Vec<T> = Vec::with_capacity(merges.len());
    for (k, merge) in merges.iter().enumerate() {
        let key = [merge.a, merge.b]
            .iter()
            .filter_map(|&slot| last_merge_into[slot])
            .fold(sortable(merge.dissimilarity), |key, child: usize| key.max(keys[child]));
        keys.push(key);
        last_merge_into[merge.b] = Some(k);
    }
    relabel(&merges, keys, observations, criterion.on_squares())
}

/// Orders merges by key, keeping construction order among equal keys, and names the clusters
/// so that step `k` creates cluster `observations + k`.
///
/// Within a step the cluster in the lower slot comes first. A cluster's slot is its highest
/// observation id, which is where the chain and the naive search keep it, so every algorithm
/// orders the pair the same way.
fn relabel<T: Float>(
    merges: &[SlotMerge<T>],
    keys: Vec<T>,
    observations: usize,
    on_squares: bool,
) -> Dendrogram<T> {
    let mut order: Vec<usize> = (0..merges.len()).collect();
    order.sort_by(|&x, &y| keys[x].partial_cmp(&keys[y]).unwrap_or(std::cmp::Ordering::Equal));

    let mut union_find = UnionFind::new(observations);
    let mut slots: Vec<usize> = (0..observations).chain(std::iter::repeat(0).take(merges.len())).collect();
    let steps = order
        .into_iter()
        .map(|k| {
            let merge = &merges[k];
            let (mut cluster1, mut cluster2) = (union_find.find(merge.a), union_find.find(merge.b));
            if slots[cluster1] > slots[cluster2] {
                std::mem::swap(&mut cluster1, &mut cluster2);
            }
            let label = union_find.union(cluster1, cluster2);
            slots[label] = slots[cluster2];
            let dissimilarity = if on_squares {
                keys[k].max(T::zero()).sqrt()
            } else {
                keys[k]
            };
            MergeStep {
                cluster1,
                cluster2,
                dissimilarity,
                size: union_find.size_of(label),
            }
        })
        .collect();
    Dendrogram::new(steps, observations)
}

/// NaNs sort last so ordering stays total.
fn sortable<T: Float>(value: T) -> T {
    if value.is_nan() {
        T::infinity()
    } else {
        value
    }
}
