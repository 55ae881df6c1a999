//! The public facade: `link`, `cut`, `expose` over a private [`Forest`].

use crate::cluster::ClusterId;
use crate::forest::Forest;

/// The result of a successful [`Tree::expose`]: a cluster summarising the
/// unique path between the two exposed vertices.
#[derive(Debug, Clone, Copy)]
pub struct ExposedPath {
    /// The maximum edge weight on the path.
    pub max_cost: i64,
    /// The leaf cluster, in the live hierarchy, that achieves `max_cost`.
    /// Pass this to [`Tree::cut`] to remove that edge.
    pub leaf: ClusterId,
}

/// A self-adjusting top tree over named `i64` vertices.
///
/// Wraps a [`Forest`] and publishes exactly three operations: `link`,
/// `cut`, `expose`. See `crate::forest` for the level engine these are
/// built from.
#[derive(Debug, Default)]
pub struct Tree {
    forest: Forest,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to the underlying forest, for callers (the MSF
    /// driver) that need `data`/`boundary`/`kind` on a handle returned by
    /// `expose`.
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Internal-only mutable access, for the property tests in
    /// `crate::proptests` that need to poke at arcs directly.
    #[cfg(test)]
    pub(crate) fn forest_mut(&mut self) -> &mut Forest {
        &mut self.forest
    }

    /// The current top-level root clusters, one per component.
    #[must_use]
    pub fn roots(&self) -> &[ClusterId] {
        &self.forest.roots
    }

    /// Adds the edge `u`–`v` with weight `weight`.
    ///
    /// # Panics
    ///
    /// Panics if `u == v`, or if `u` and `v` are already connected.
    pub fn link(&mut self, u: i64, v: i64, weight: i64) {
        assert!(u != v, "link: u and v must be distinct vertices");
        let u_id = self.forest.vertices.get_or_insert(u);
        let v_id = self.forest.vertices.get_or_insert(v);

        let u_isolated = self.forest.vertices.vertex(u_id).is_isolated();
        let v_isolated = self.forest.vertices.vertex(v_id).is_isolated();
        if !u_isolated && !v_isolated {
            assert!(
                self.forest.root_of(u_id) != self.forest.root_of(v_id),
                "link: u and v are already connected"
            );
        }

        let leaf_id = self.forest.insert_leaf(u_id, v_id, weight);
        self.forest.update(vec![leaf_id], Vec::new(), None, None);
    }

    /// Removes the edge represented by `leaf`.
    ///
    /// # Panics
    ///
    /// Panics if `leaf` does not name a `Leaf` cluster.
    pub fn cut(&mut self, leaf: ClusterId) {
        assert!(
            self.forest.kind(leaf) == crate::cluster::ClusterKind::Leaf,
            "cut: handle does not name a leaf cluster"
        );
        self.forest.cluster_mut(leaf).in_list = true;
        self.forest.update(Vec::new(), vec![leaf], None, None);
    }

    /// Returns the cluster summarising the unique path between `u` and
    /// `v`, or `None` if either is isolated or they lie in different
    /// components.
    ///
    /// Implemented by simulated rebuild: the live hierarchy is never
    /// mutated by this call.
    #[must_use]
    pub fn expose(&mut self, u: i64, v: i64) -> Option<ExposedPath> {
        let u_id = self.forest.vertices.get(u)?;
        let v_id = self.forest.vertices.get(v)?;
        if self.forest.vertices.vertex(u_id).is_isolated()
            || self.forest.vertices.vertex(v_id).is_isolated()
        {
            return None;
        }
        if self.forest.root_of(u_id) != self.forest.root_of(v_id) {
            return None;
        }

        let mut internals = self.forest.internal_clusters(u_id);
        internals.extend(self.forest.internal_clusters(v_id));

        if internals.is_empty() {
            let root = self.forest.root_of(u_id);
            let data = self.forest.data(root);
            return Some(ExposedPath { max_cost: data.max_cost, leaf: data.ptr });
        }

        let mut frontier = Vec::new();
        for &id in &internals {
            let (left, right) = {
                let c = self.forest.cluster(id);
                (c.left, c.right)
            };
            for child in [left, right].into_iter().flatten() {
                if !self.forest.cluster(child).marked {
                    self.forest.cluster_mut(child).marked = true;
                    frontier.push(child);
                }
            }
        }
        for &id in internals.iter().chain(frontier.iter()) {
            self.forest.cluster_mut(id).marked = false;
        }

        let mut temp = Forest::new();
        let mut fresh = Vec::new();
        for &id in &frontier {
            let (h1, h2) = self.forest.boundary(id);
            let name1 = self.forest.vertices.vertex(h1).name();
            let name2 = self.forest.vertices.vertex(h2).name();
            let data = self.forest.data(id);
            let t1 = temp.vertices.get_or_insert(name1);
            let t2 = temp.vertices.get_or_insert(name2);
            fresh.push(temp.insert_clone_leaf(t1, t2, data));
        }

        let temp_u = temp.vertices.get_or_insert(u);
        let temp_v = temp.vertices.get_or_insert(v);
        temp.update(fresh, Vec::new(), Some(temp_u), Some(temp_v));

        assert!(temp.roots.len() == 1, "expose: temporary tree settled on more than one root");
        let data = temp.data(temp.roots[0]);
        Some(ExposedPath { max_cost: data.max_cost, leaf: data.ptr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_connects_two_fresh_vertices() {
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        let path = tree.expose(1, 2).expect("1 and 2 should be connected");
        assert_eq!(path.max_cost, 5);
    }

    #[test]
    fn expose_on_isolated_vertex_is_none() {
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        assert!(tree.expose(3, 3).is_none());
    }

    #[test]
    fn expose_across_disconnected_components_is_none() {
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        tree.link(3, 4, 7);
        assert!(tree.expose(1, 4).is_none());
    }

    #[test]
    fn three_vertex_path_exposes_the_max_edge() {
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        tree.link(2, 3, 7);
        let path = tree.expose(1, 3).expect("1 and 3 should be connected");
        assert_eq!(path.max_cost, 7);
    }

    #[test]
    fn cut_disconnects_the_removed_edge() {
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        tree.link(2, 3, 7);
        let path = tree.expose(1, 3).unwrap();
        assert_eq!(path.max_cost, 7);
        tree.cut(path.leaf);
        assert!(tree.expose(1, 3).is_none());
        assert!(tree.expose(1, 2).is_some());
    }

    #[test]
    fn four_vertex_path_swap_scenario() {
        // A four-vertex path, then a cut-and-swap.
        let mut tree = Tree::new();
        tree.link(1, 2, 5);
        tree.link(2, 3, 7);
        tree.link(3, 4, 3);

        let path = tree.expose(2, 3).unwrap();
        assert_eq!(path.max_cost, 7);
        tree.cut(path.leaf);
        tree.link(1, 4, 2);

        let path = tree.expose(2, 3).unwrap();
        assert_eq!(path.max_cost, 5);
    }
}
