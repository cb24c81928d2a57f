//! Disjoint-set forest used by Kruskal's generator.

/// Union-find over the indices `0..len` with path compression and union by rank.
///
/// Parents and ranks are kept in two parallel vectors rather than as linked nodes, and `find` is
/// iterative, so large grids cannot exhaust the stack.
#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    /// Parent pointer of every element. Roots point at themselves.
    parent: Vec<usize>,
    /// Upper bound on the height of the tree rooted at each element.
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Number of elements tracked by the forest.
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns the representative of the set containing `element`.
    ///
    /// Every node visited on the way up is re-pointed at the root.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not below [`DisjointSet::len`].
    #[expect(
        clippy::indexing_slicing,
        reason = "Parent pointers always hold indices created by the forest itself."
    )]
    pub(crate) fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merges the sets containing `first` and `second`.
    ///
    /// Returns `false` when both already belong to the same set, which for a maze means the wall
    /// between them would close a cycle.
    ///
    /// # Panics
    ///
    /// Panics if either element is not below [`DisjointSet::len`].
    #[expect(
        clippy::indexing_slicing,
        reason = "Roots come from `find`, which only returns valid indices."
    )]
    pub(crate) fn union(&mut self, first: usize, second: usize) -> bool {
        let first_root = self.find(first);
        let second_root = self.find(second);
        if first_root == second_root {
            return false;
        }

        match self.rank[first_root].cmp(&self.rank[second_root]) {
            std::cmp::Ordering::Less => self.parent[first_root] = second_root,
            std::cmp::Ordering::Greater => self.parent[second_root] = first_root,
            std::cmp::Ordering::Equal => {
                self.parent[second_root] = first_root;
                self.rank[first_root] = self.rank[first_root].saturating_add(1);
            }
        }

        true
    }

    /// Whether two elements currently belong to the same set.
    pub(crate) fn connected(&mut self, first: usize, second: usize) -> bool {
        self.find(first) == self.find(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut set = DisjointSet::new(4);

        assert_eq!(set.len(), 4);
        for element in 0..4 {
            assert_eq!(set.find(element), element);
        }
        assert!(!set.connected(0, 1));
    }

    #[test]
    fn test_union_merges_and_rejects_cycles() {
        let mut set = DisjointSet::new(5);

        assert!(set.union(0, 1));
        assert!(set.union(1, 2));
        assert!(set.union(3, 4));
        assert!(!set.union(0, 2));
        assert!(set.connected(0, 2));
        assert!(!set.connected(2, 3));

        assert!(set.union(2, 4));
        assert!(set.connected(0, 3));
        assert!(!set.union(4, 1));
    }

    #[test]
    fn test_spanning_union_count() {
        let len = 64;
        let mut set = DisjointSet::new(len);

        let merged = (1..len).filter(|element| set.union(element - 1, *element)).count();
        assert_eq!(merged, len - 1);

        let root = set.find(0);
        assert!((0..len).all(|element| set.find(element) == root));
    }

    #[test]
    fn test_long_chain_is_compressed() {
        let len = 100_000;
        let mut set = DisjointSet::new(len);

        for element in 1..len {
            let _ = set.union(element, element - 1);
        }

        let root = set.find(len - 1);
        for element in 0..len {
            assert_eq!(set.find(element), root);
        }
        assert!(set.parent.iter().all(|parent| *parent == root));
    }
}
