use num_traits::Float;
use std::ops::Index;

/// One merge of a hierarchical clustering.
///
/// Labels below the number of observations `N` are original points; the `k`-th step of a
/// dendrogram creates the cluster labelled `N + k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeStep<T> {
    pub cluster1: usize,
    pub cluster2: usize,
    /// The criterion-specific dissimilarity at which the clusters merged.
    pub dissimilarity: T,
    /// The number of original points in the merged cluster.
    pub size: usize,
}

impl<T: Float> MergeStep<T> {
    /// Compares two steps, allowing the dissimilarities to differ by at most `epsilon`.
    pub fn eq_with_epsilon(&self, other: &MergeStep<T>, epsilon: T) -> bool {
        (self.cluster1, self.cluster2, self.size) == (other.cluster1, other.cluster2, other.size)
            && (self.dissimilarity - other.dissimilarity).abs() <= epsilon
    }
}

/// A stepwise dendrogram: the `N - 1` merges that join `N` observations into a single cluster,
/// in the order the clusters were created.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram<T> {
    steps: Vec<MergeStep<T>>,
    observations: usize,
}

impl<T> Dendrogram<T> {
    pub(crate) fn new(steps: Vec<MergeStep<T>>, observations: usize) -> Self {
        debug_assert_eq!(steps.len(), observations.saturating_sub(1));
        Dendrogram { steps, observations }
    }

    pub fn steps(&self) -> &[MergeStep<T>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<MergeStep<T>> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The number of original points clustered.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// The label of the cluster containing every observation.
    pub fn root(&self) -> usize {
        self.observations + self.steps.len() - 1
    }

    /// Returns the number of original points in the cluster with the given label.
    ///
    /// # Panics
    /// If `label` is greater than `root()`.
    pub fn cluster_size(&self, label: usize) -> usize {
        if label < self.observations {
            1
        } else {
            self.steps[label - self.observations].size
        }
    }

    /// Returns the ids of the original points under the given cluster label, in the left to
    /// right order a tree renderer would draw them.
    ///
    /// # Panics
    /// If `label` is greater than `root()`.
    pub fn members(&self, label: usize) -> Vec<usize> {
        let mut members = Vec::with_capacity(self.cluster_size(label));
        let mut stack = vec![label];
        while let Some(current) = stack.pop() {
            if current < self.observations {
                members.push(current);
                continue;
            }
            let step = &self.steps[current - self.observations];
            stack.push(step.cluster2);
            stack.push(step.cluster1);
        }
        members
    }
}

impl<T: Float> Dendrogram<T> {
    /// Compares two dendrograms step by step, allowing dissimilarities to differ by at most
    /// `epsilon`.
    pub fn eq_with_epsilon(&self, other: &Dendrogram<T>, epsilon: T) -> bool {
        self.observations == other.observations
            && self.len() == other.len()
            && self
                .steps
                .iter()
                .zip(other.steps())
                .all(|(a, b)| a.eq_with_epsilon(b, epsilon))
    }
}

impl<T> Index<usize> for Dendrogram<T> {
    type Output = MergeStep<T>;

    fn index(&self, i: usize) -> &MergeStep<T> {
        &self.steps[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(cluster1: usize, cluster2: usize, dissimilarity: f64, size: usize) -> MergeStep<f64> {
        MergeStep { cluster1, cluster2, dissimilarity, size }
    }

    fn sample() -> Dendrogram<f64> {
        // ((0, 2), (1, 3))
        Dendrogram::new(vec![step(0, 2, 1.0, 2), step(1, 3, 1.5, 2), step(4, 5, 3.0, 4)], 4)
    }

    #[test]
    fn sizes_and_root() {
        let dendrogram = sample();
        assert_eq!(6, dendrogram.root());
        assert_eq!(1, dendrogram.cluster_size(3));
        assert_eq!(2, dendrogram.cluster_size(5));
        assert_eq!(4, dendrogram.cluster_size(6));
    }

    #[test]
    #[should_panic]
    fn cluster_size_past_the_root() {
        sample().cluster_size(7);
    }

    #[test]
    #[should_panic]
    fn members_past_the_root() {
        sample().members(7);
    }

    #[test]
    fn members_in_drawing_order() {
        let dendrogram = sample();
        assert_eq!(vec![0, 2, 1, 3], dendrogram.members(6));
        assert_eq!(vec![1, 3], dendrogram.members(5));
        assert_eq!(vec![2], dendrogram.members(2));
    }

    #[test]
    fn approximate_equality() {
        let a = sample();
        let mut steps = sample().into_steps();
        steps[2].dissimilarity += 1e-12;
        let b = Dendrogram::new(steps, 4);
        assert!(a.eq_with_epsilon(&b, 1e-9));
        assert!(!a.eq_with_epsilon(&b, 0.0));
    }
}
