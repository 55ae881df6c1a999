//! A naive, deliberately unoptimized dynamic minimum spanning tree
//! maintainer, used only as a second, independent-in-approach oracle.
//!
//! A plain adjacency-list forest, BFS for connectivity, DFS for the path
//! between two already-connected vertices. O(n) work per edge — its only
//! job is to be obviously correct, not fast.

use std::collections::{HashSet, VecDeque};

/// A dynamically-maintained minimum spanning tree over an adjacency list.
#[derive(Debug, Default)]
pub struct DynamicMst {
    /// Adjacency list: vertex name to `(neighbor, weight)` pairs.
    forest: std::collections::HashMap<i64, Vec<(i64, i64)>>,
    /// The edges currently in the tree, keyed by `(min(u,v), max(u,v), w)`.
    mst_edges: HashSet<(i64, i64, i64)>,
}

impl DynamicMst {
    /// Creates an empty dynamic MST.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers the edge `(u, v, w)`. If `u` and `v` are not yet connected,
    /// the edge is inserted. If they are connected and `w` is strictly
    /// less than the heaviest edge on their current path, that edge is
    /// evicted and `(u, v, w)` takes its place. Returns whether the tree
    /// changed.
    pub fn add_edge(&mut self, u: i64, v: i64, w: i64) -> bool {
        self.forest.entry(u).or_default();
        self.forest.entry(v).or_default();

        if !self.is_connected(u, v) {
            self.insert_edge(u, v, w);
            return true;
        }

        let Some(path) = self.find_path(u, v) else {
            return false;
        };
        let Some(&max_edge) = path.iter().max_by_key(|&&(_, _, weight)| weight) else {
            return false;
        };
        if max_edge.2 > w {
            self.remove_edge(max_edge.0, max_edge.1, max_edge.2);
            self.insert_edge(u, v, w);
            true
        } else {
            false
        }
    }

    /// The edges currently spanning the forest.
    #[must_use]
    pub fn mst_edges(&self) -> &HashSet<(i64, i64, i64)> {
        &self.mst_edges
    }

    /// Adds `u`–`v` to the adjacency list in both directions and records
    /// it in `mst_edges`.
    fn insert_edge(&mut self, u: i64, v: i64, w: i64) {
        self.forest.entry(u).or_default().push((v, w));
        self.forest.entry(v).or_default().push((u, w));
        self.mst_edges.insert((u.min(v), u.max(v), w));
    }

    /// Removes `u`–`v` from the adjacency list and from `mst_edges`.
    fn remove_edge(&mut self, u: i64, v: i64, w: i64) {
        if let Some(nbrs) = self.forest.get_mut(&u) {
            nbrs.retain(|&(n, weight)| !(n == v && weight == w));
        }
        if let Some(nbrs) = self.forest.get_mut(&v) {
            nbrs.retain(|&(n, weight)| !(n == u && weight == w));
        }
        self.mst_edges.remove(&(u.min(v), u.max(v), w));
    }

    /// BFS reachability check between `start` and `goal`.
    fn is_connected(&self, start: i64, goal: i64) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(cur) = queue.pop_front() {
            if cur == goal {
                return true;
            }
            if !visited.insert(cur) {
                continue;
            }
            for &(neighbor, _) in self.forest.get(&cur).into_iter().flatten() {
                if !visited.contains(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        false
    }

    /// DFS path from `start` to `goal`, as the edges walked.
    fn find_path(&self, start: i64, goal: i64) -> Option<Vec<(i64, i64, i64)>> {
        let mut visited = HashSet::new();
        self.find_path_inner(start, goal, &mut visited)
    }

    /// Recursive DFS helper for [`Self::find_path`].
    fn find_path_inner(
        &self,
        start: i64,
        goal: i64,
        visited: &mut HashSet<i64>,
    ) -> Option<Vec<(i64, i64, i64)>> {
        if start == goal {
            return Some(Vec::new());
        }
        visited.insert(start);
        for &(neighbor, w) in self.forest.get(&start).into_iter().flatten() {
            if visited.contains(&neighbor) {
                continue;
            }
            if let Some(mut sub) = self.find_path_inner(neighbor, goal, visited) {
                sub.insert(0, (start, neighbor, w));
                return Some(sub);
            }
        }
        None
    }
}
