use super::{merges_into_dendrogram, update_dissimilarities, SlotMerge};
use crate::active::ActiveSet;
use crate::{CondensedMatrix, Dendrogram, LinkageCriterion};
use num_traits::Float;

/// Performs hierarchical clustering by searching every pair of live clusters for the closest
/// one before each merge. O(N³) time; ties go to the lowest pair of clusters.
pub fn primitive<T: Float>(mut matrix: CondensedMatrix<T>, criterion: LinkageCriterion) -> Dendrogram<T> {
    let n_samples = matrix.observations();
    if criterion.on_squares() {
        matrix.map_in_place(|d| d * d);
    }

    let mut sizes = vec![1_usize; n_samples];
    let mut active = ActiveSet::new(n_samples);
    let mut merges = Vec::with_capacity(n_samples.saturating_sub(1));

    while active.len() > 1 {
        let Some((a, b, dissimilarity)) = closest_pair(&matrix, &active) else {
            break;
        };
        update_dissimilarities(&mut matrix, &active, &sizes, criterion, a, b);
        sizes[b] += sizes[a];
        active.remove(a);
        merges.push(SlotMerge { a, b, dissimilarity });
    }

    merges_into_dendrogram(merges, n_samples, criterion)
}

fn closest_pair<T: Float>(matrix: &CondensedMatrix<T>, active: &ActiveSet) -> Option<(usize, usize, T)> {
    let mut closest: Option<(usize, usize, T)> = None;
    for a in active.iter() {
        for b in active.iter().filter(|&b| b > a) {
            let dist = matrix.get(a, b);
            match closest {
                Some((_, _, min_dist)) if !(dist < min_dist) => {}
                _ => closest = Some((a, b, dist)),
            }
        }
    }
    closest
}
