//! Offline Kruskal, used only as a test oracle and CLI timing baseline —
//! never by the incremental driver itself.
//!
//! A union-find with path compression and union by rank, over edges
//! sorted by ascending weight.

use std::collections::HashMap;

/// A disjoint-set forest over an arbitrary `i64` vertex universe,
/// discovered lazily as vertices are named.
struct UnionFind {
    /// Parent pointer per vertex, keyed by vertex name.
    parent: HashMap<i64, i64>,
    /// Union-by-rank upper bound per vertex.
    rank: HashMap<i64, u32>,
}

impl UnionFind {
    /// Registers `v` as its own singleton set if not already known.
    fn touch(&mut self, v: i64) {
        self.parent.entry(v).or_insert(v);
        self.rank.entry(v).or_insert(0);
    }

    /// Finds `v`'s set representative, compressing the path as it climbs.
    fn find(&mut self, v: i64) -> i64 {
        let p = *self
            .parent
            .get(&v)
            .unwrap_or_else(|| unreachable!("find called on an untouched vertex {v}"));
        if p == v {
            return v;
        }
        let root = self.find(p);
        self.parent.insert(v, root);
        root
    }

    /// Unions the sets containing `u` and `v`; returns whether they were
    /// previously distinct.
    fn union(&mut self, u: i64, v: i64) -> bool {
        let root_u = self.find(u);
        let root_v = self.find(v);
        if root_u == root_v {
            return false;
        }
        let rank_u = self.rank[&root_u];
        let rank_v = self.rank[&root_v];
        if rank_u < rank_v {
            self.parent.insert(root_u, root_v);
        } else {
            self.parent.insert(root_v, root_u);
            if rank_u == rank_v {
                self.rank.insert(root_u, rank_u + 1);
            }
        }
        true
    }
}

/// Computes the minimum spanning forest of `edges` by offline Kruskal.
///
/// Returns the chosen edges in the order Kruskal selected them (weight
/// ascending), not input order. Used only as a test oracle
/// and timing baseline, never by the
/// incremental driver.
#[must_use]
pub fn minimum_spanning_forest(edges: &[(i64, i64, i64)]) -> Vec<(i64, i64, i64)> {
    let mut uf = UnionFind {
        parent: HashMap::new(),
        rank: HashMap::new(),
    };
    for &(u, v, _) in edges {
        uf.touch(u);
        uf.touch(v);
    }

    let mut sorted: Vec<(i64, i64, i64)> = edges.to_vec();
    sorted.sort_by_key(|&(_, _, w)| w);

    let mut forest = Vec::new();
    for (u, v, w) in sorted {
        if uf.union(u, v) {
            forest.push((u, v, w));
        }
    }
    forest
}
