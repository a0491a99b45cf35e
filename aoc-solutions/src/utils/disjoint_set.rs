//! Union-find over dense `usize` ids

/// Disjoint sets with path compression and union by size
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// `n` singleton sets, ids `0..n`
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets holding `a` and `b`; `false` if they were already one
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut a = self.find(a);
        let mut b = self.find(b);
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.components -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Size of the set containing `node`
    pub fn size_of(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.size[root]
    }

    /// Number of disjoint sets
    pub fn components(&self) -> usize {
        self.components
    }

    /// Sizes of every set, largest first
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = (0..self.parent.len())
            .filter(|&i| self.parent[i] == i)
            .map(|i| self.size[i])
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn union_reports_merges() {
        let mut set = DisjointSet::new(5);
        assert!(set.union(0, 1));
        assert!(set.union(3, 4));
        assert!(!set.union(1, 0));
        assert!(set.union(1, 4));
        assert_eq!(set.components(), 2);
        assert_eq!(set.size_of(3), 4);
        assert_eq!(set.component_sizes(), vec![4, 1]);
        assert!(set.connected(0, 3));
        assert!(!set.connected(2, 3));
    }

    /// Label propagation over an adjacency list, for comparison
    fn naive_labels(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut label: Vec<usize> = (0..n).collect();
        loop {
            let mut changed = false;
            for &(a, b) in edges {
                let low = label[a].min(label[b]);
                for node in [a, b] {
                    if label[node] != low {
                        label[node] = low;
                        changed = true;
                    }
                }
            }
            if !changed {
                return label;
            }
        }
    }

    proptest! {
        #[test]
        fn matches_label_propagation(
            edges in prop::collection::vec((0usize..30, 0usize..30), 0..60)
        ) {
            let mut set = DisjointSet::new(30);
            for &(a, b) in &edges {
                set.union(a, b);
            }
            let labels = naive_labels(30, &edges);

            for a in 0..30 {
                for b in 0..30 {
                    prop_assert_eq!(set.connected(a, b), labels[a] == labels[b]);
                }
            }

            let mut distinct = labels.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(set.components(), distinct.len());
            prop_assert_eq!(set.component_sizes().iter().sum::<usize>(), 30);
        }
    }
}
