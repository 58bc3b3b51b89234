/// Union-find over dendrogram labels. For `n_samples` leaves there are `2 * n_samples - 1`
/// labels; every union creates the next unused label as the parent of both inputs.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    next_label: usize,
    size: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n_samples: usize) -> Self {
        let length = (2 * n_samples).saturating_sub(1);
        // A parent equal to the length marks a root
        let parent = vec![length; length];
        let size = (0..length).map(|n| if n < n_samples { 1 } else { 0 }).collect();

        UnionFind { parent, next_label: n_samples, size }
    }

    /// Joins two roots under a fresh label and returns it.
    pub(crate) fn union(&mut self, m: usize, n: usize) -> usize {
        let label = self.next_label;
        self.parent[m] = label;
        self.parent[n] = label;
        self.size[label] = self.size[m] + self.size[n];
        self.next_label += 1;
        label
    }

    pub(crate) fn find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while !self.is_root(root) {
            root = self.parent[root];
        }
        while !self.is_root(n) {
            let parent = self.parent[n];
            self.parent[n] = root;
            n = parent;
        }
        root
    }

    pub(crate) fn size_of(&self, n: usize) -> usize {
        self.size[n]
    }

    fn is_root(&self, n: usize) -> bool {
        self.parent[n] == self.parent.len()
    }
}
