//! Disjoint-set forest (union-find).
//!
//! Union by rank plus full path compression gives amortized
//! near-constant time per operation (inverse Ackermann).
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good But Not Linear Set Union Algorithm"
//! - Cormen et al. (2009), *Introduction to Algorithms*, ch. 21

use crate::error::{Error, Result};

/// Union-find over the fixed universe `0..n`.
///
/// # Examples
///
/// ```
/// use u_locus::DisjointSet;
///
/// let mut ds = DisjointSet::new(4);
/// ds.union(0, 1).unwrap();
/// ds.union(2, 3).unwrap();
/// assert!(ds.same_set(0, 1).unwrap());
/// assert!(!ds.same_set(1, 2).unwrap());
/// assert_eq!(ds.set_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    sets: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Size of the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` for an empty universe.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    /// Returns the representative of `x`'s set.
    ///
    /// Every node on the path from `x` to the root is re-pointed directly
    /// at the root.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;

        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }

        Ok(root)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// The lower-rank root goes under the higher-rank root. On equal rank
    /// `x`'s root goes under `y`'s root and `y`'s root rank grows by one.
    pub fn union(&mut self, x: usize, y: usize) -> Result<()> {
        let rx = self.find(x)?;
        let ry = self.find(y)?;
        if rx == ry {
            return Ok(());
        }

        if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[rx] = ry;
            if self.rank[rx] == self.rank[ry] {
                self.rank[ry] += 1;
            }
        }
        self.sets -= 1;
        Ok(())
    }

    /// Returns `true` if `x` and `y` share a representative.
    pub fn same_set(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }
}
