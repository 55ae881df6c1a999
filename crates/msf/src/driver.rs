//! The incremental MSF driver loop: the one collaborator that actually
//! drives `top_tree::Tree`.
//!
//! The loop: `expose`; `link` if disconnected; `cut`-then-`link` if the
//! exposed path's max strictly exceeds the new edge; otherwise drop.

use top_tree::{ClusterId, ClusterKind, Tree};

/// What happened when an edge was offered to an [`MsfDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The two endpoints were not yet connected; the edge was linked in.
    Linked,
    /// The edge closed a cycle whose existing max-cost edge was heavier;
    /// that edge was cut and this one linked in its place.
    Swapped {
        /// The `(u, v, weight)` of the edge that was evicted.
        evicted: (i64, i64, i64),
    },
    /// The edge closed a cycle no heavier than its existing max-cost
    /// edge, and was dropped.
    Dropped,
}

/// Wraps a [`top_tree::Tree`] and drives it with the MSF update rule.
#[derive(Debug, Default)]
pub struct MsfDriver {
    /// The live top tree this driver maintains as an MSF.
    tree: Tree,
}

impl MsfDriver {
    /// Creates a driver over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to the underlying tree, for callers that want to
    /// inspect roots or summaries directly.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the underlying tree, for callers (tests, and
    /// `msf-cli`'s timing harness) that need to call `expose` directly
    /// rather than through [`Self::process_edge`].
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Offers the edge `(u, v, weight)` to the maintained forest,
    /// applying the incremental MSF update rule.
    ///
    /// # Panics
    ///
    /// Panics if `u == v`.
    pub fn process_edge(&mut self, u: i64, v: i64, weight: i64) -> EdgeOutcome {
        assert!(u != v, "process_edge: self-loops are not meaningful edges");

        match self.tree.expose(u, v) {
            None => {
                self.tree.link(u, v, weight);
                mt_logger::mt_log!(mt_logger::Level::Debug, "linked ({u}, {v}, {weight})");
                EdgeOutcome::Linked
            }
            Some(path) if path.max_cost > weight => {
                let (bu, bv) = self.tree.forest().boundary(path.leaf);
                let eu = self.tree.forest().vertex_name(bu);
                let ev = self.tree.forest().vertex_name(bv);
                let evicted = (eu, ev, path.max_cost);
                self.tree.cut(path.leaf);
                self.tree.link(u, v, weight);
                mt_logger::mt_log!(
                    mt_logger::Level::Debug,
                    "swapped ({u}, {v}, {weight}) for evicted edge {evicted:?}"
                );
                EdgeOutcome::Swapped { evicted }
            }
            Some(_) => {
                mt_logger::mt_log!(mt_logger::Level::Debug, "dropped ({u}, {v}, {weight})");
                EdgeOutcome::Dropped
            }
        }
    }

    /// The sum of every leaf's weight over every root — the total
    /// weight of the maintained forest. A
    /// root's own `max_cost` is only its *heaviest* edge, not the sum,
    /// so this walks down to the leaves rather than reading summaries.
    #[must_use]
    pub fn total_weight(&self) -> i64 {
        let forest = self.tree.forest();
        self.tree
            .roots()
            .iter()
            .map(|&root| sum_leaf_weights(forest, root))
            .sum()
    }
}

/// Sums the weight of every leaf reachable from `id`.
fn sum_leaf_weights(forest: &top_tree::Forest, id: ClusterId) -> i64 {
    match forest.kind(id) {
        ClusterKind::Leaf => forest.data(id).max_cost,
        ClusterKind::Dummy => {
            forest.left(id).map_or(0, |left| sum_leaf_weights(forest, left))
        }
        ClusterKind::Rake | ClusterKind::Compress => {
            let left = forest.left(id).map_or(0, |left| sum_leaf_weights(forest, left));
            let right = forest.right(id).map_or(0, |right| sum_leaf_weights(forest, right));
            left + right
        }
    }
}
