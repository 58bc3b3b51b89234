use super::{merges_into_dendrogram, update_dissimilarities, SlotMerge};
use crate::active::ActiveSet;
use crate::{CondensedMatrix, Dendrogram, LinkageCriterion};
use num_traits::Float;
use tracing::trace;

/// Performs hierarchical clustering with the nearest neighbour chain algorithm.
///
/// A chain is grown from a live cluster by repeatedly appending the nearest neighbour of its
/// last element. Once the last two elements are each other's nearest neighbour they are merged,
/// and the chain carries on from whatever is left of it. This needs O(N²) time and O(N) memory
/// on top of the matrix, which is consumed as working storage.
pub fn nnchain<T: Float>(mut matrix: CondensedMatrix<T>, criterion: LinkageCriterion) -> Dendrogram<T> {
    let n_samples = matrix.observations();
    if criterion.on_squares() {
        matrix.map_in_place(|d| d * d);
    }

    let mut sizes = vec![1_usize; n_samples];
    let mut active = ActiveSet::new(n_samples);
    let mut chain: Vec<usize> = Vec::with_capacity(n_samples);
    let mut merges = Vec::with_capacity(n_samples.saturating_sub(1));

    while active.len() > 1 {
        if chain.is_empty() {
            match active.first() {
                Some(cluster) => chain.push(cluster),
                None => break,
            }
        }
        let top = chain[chain.len() - 1];
        let predecessor = chain.len().checked_sub(2).map(|i| chain[i]);

        let (nearest, dissimilarity) = match nearest_neighbour(&matrix, &active, top, predecessor) {
            Some(found) => found,
            None => break,
        };
        if Some(nearest) != predecessor {
            chain.push(nearest);
            continue;
        }

        // Reciprocal nearest neighbours
        chain.truncate(chain.len() - 2);
        let (a, b) = if top < nearest { (top, nearest) } else { (nearest, top) };
        trace!(a, b, "merging reciprocal nearest neighbours");
        update_dissimilarities(&mut matrix, &active, &sizes, criterion, a, b);
        sizes[b] += sizes[a];
        active.remove(a);
        merges.push(SlotMerge { a, b, dissimilarity });
    }

    merges_into_dendrogram(merges, n_samples, criterion)
}

/// Finds the live cluster nearest to `top`. Ties go to the chain predecessor, so the chain can't
/// cycle, and then to the lowest slot.
fn nearest_neighbour<T: Float>(
    matrix: &CondensedMatrix<T>,
    active: &ActiveSet,
    top: usize,
    predecessor: Option<usize>,
) -> Option<(usize, T)> {
    let mut nearest = predecessor.map(|p| (p, matrix.get(top, p)));
    for x in active.iter() {
        if x == top || Some(x) == predecessor {
            continue;
        }
        let dist = matrix.get(top, x);
        match nearest {
            Some((_, min_dist)) if !(dist < min_dist) => {}
            _ => nearest = Some((x, dist)),
        }
    }
    nearest
}
