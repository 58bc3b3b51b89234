use super::{relabel, sortable, SlotMerge};
use crate::{CondensedMatrix, Dendrogram};
use num_traits::Float;

/// Performs single linkage clustering through a minimum spanning tree built with Prim's
/// algorithm. O(N²) time and, unlike the other algorithms, leaves the matrix untouched.
pub fn mst<T: Float>(matrix: &CondensedMatrix<T>) -> Dendrogram<T> {
    let n_samples = matrix.observations();
    let mut in_tree = vec![false; n_samples];
    let mut distances = vec![T::infinity(); n_samples];
    let mut edges = Vec::with_capacity(n_samples.saturating_sub(1));

    let mut left_node_id = 0;
    for _ in 1..n_samples {
        in_tree[left_node_id] = true;
        let mut nearest: Option<(usize, T)> = None;

        for right_node_id in 0..n_samples {
            if in_tree[right_node_id] {
                continue;
            }
            let dist = matrix.get(left_node_id, right_node_id);
            if dist < distances[right_node_id] {
                distances[right_node_id] = dist;
            }
            match nearest {
                Some((_, min_dist)) if !(distances[right_node_id] < min_dist) => {}
                _ => nearest = Some((right_node_id, distances[right_node_id])),
            }
        }

        let Some((right_node_id, dissimilarity)) = nearest else {
            break;
        };
        edges.push(SlotMerge {
            a: left_node_id,
            b: right_node_id,
            dissimilarity,
        });
        left_node_id = right_node_id;
    }

    let keys = edges.iter().map(|edge| sortable(edge.dissimilarity)).collect();
    relabel(&edges, keys, n_samples, false)
}
