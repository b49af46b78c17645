//! Union-Find (disjoint set union).
//!
//! Maintains a partition of `0..n` under incremental merges. `find` uses
//! path compression and merges are by rank, giving near-constant amortized
//! operations.

use crate::error::{Error, Result};

/// Disjoint set forest over the elements `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
    components: usize,
}

impl UnionFind {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Canonical root of the set containing `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `x` is not in `0..len()`.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(self.root(x))
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns `false` without changing anything if they are already in the
    /// same set, `true` if a merge happened (the component count drops by one).
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if either element is out of range.
    pub fn unite(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check(x)?;
        self.check(y)?;
        Ok(self.merge(x, y))
    }

    /// Whether `x` and `y` are in the same set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if either element is out of range.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Size of the set containing `x`.
    ///
    /// Counted with an O(n) scan on every call; sizes are not cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `x` is out of range.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok((0..self.len()).filter(|&i| self.root(i) == root).count())
    }

    /// Merge without bounds checks; callers guarantee valid indices.
    pub(crate) fn merge(&mut self, x: usize, y: usize) -> bool {
        let mut rx = self.root(x);
        let mut ry = self.root(y);
        if rx == ry {
            return false;
        }

        if self.rank[rx] < self.rank[ry] {
            std::mem::swap(&mut rx, &mut ry);
        }
        self.parent[ry] = rx;
        if self.rank[rx] == self.rank[ry] {
            self.rank[rx] += 1;
        }
        self.components -= 1;
        true
    }

    fn root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex: x,
                vertex_count: self.parent.len(),
            })
        }
    }
}
