//! Property tests for the hierarchy's structural invariants, over
//! randomized sequences of `link`/`cut`/`expose`.
//!
//! These live inside the crate (rather than in `tests/`) because they
//! need to walk raw arcs and transient flags — deliberately not part of
//! the public facade (the arc algebra is an implementation detail of the
//! hierarchy, not something an MSF driver ever touches). Drives a
//! stateful structure through a randomized operation sequence and checks
//! invariants after each step, rather than checking one-shot random
//! inputs.

use std::collections::{HashMap, HashSet, VecDeque};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arc::{ArcId, ArcSlot};
use crate::cluster::{ClusterId, ClusterKind};
use crate::forest::Forest;
use crate::tree::Tree;

/// Every cluster reachable from `roots`, found by walking `left`/`right`
/// down to the leaves.
fn all_clusters(forest: &Forest, roots: &[ClusterId]) -> Vec<ClusterId> {
    let mut out = Vec::new();
    let mut stack: Vec<ClusterId> = roots.to_vec();
    while let Some(id) = stack.pop() {
        out.push(id);
        if let Some(l) = forest.left(id) {
            stack.push(l);
        }
        if let Some(r) = forest.right(id) {
            stack.push(r);
        }
    }
    out
}

/// Property 3: `a.next.prev == a` and `a.prev.next == a` for both of a
/// cluster's arcs.
fn check_tour_integrity(forest: &Forest, id: ClusterId) {
    for slot in [ArcSlot::First, ArcSlot::Second] {
        let a = ArcId::new(id, slot);
        let n = forest.next(a);
        let p = forest.prev(a);
        assert_eq!(forest.prev(n), a, "tour integrity: next({a:?}).prev != {a:?}");
        assert_eq!(forest.next(p), a, "tour integrity: prev({a:?}).next != {a:?}");
    }
}

/// Property 4: a cluster's boundary is exactly the heads of its two arcs.
fn check_boundary_is_heads(forest: &Forest, id: ClusterId) {
    let (b1, b2) = forest.boundary(id);
    let a1 = ArcId::new(id, ArcSlot::First);
    let a2 = ArcId::new(id, ArcSlot::Second);
    assert_eq!(b1, forest.head(a1));
    assert_eq!(b2, forest.head(a2));
}

/// Property 5: a non-leaf's `max_cost` is the heavier child's, and
/// `ptr` resolves to a `Leaf` whose weight equals `max_cost`.
fn check_max_cost_locality(forest: &Forest, id: ClusterId) {
    let data = forest.data(id);
    match forest.kind(id) {
        ClusterKind::Leaf => assert_eq!(data.ptr, id),
        ClusterKind::Dummy => {
            let left = forest.left(id).expect("DUMMY must have a left child");
            assert_eq!(data.max_cost, forest.data(left).max_cost);
        }
        ClusterKind::Rake | ClusterKind::Compress => {
            let left = forest.left(id).expect("non-leaf must have a left child");
            let right = forest.right(id).expect("RAKE/COMPRESS must have a right child");
            let expected = forest.data(left).max_cost.max(forest.data(right).max_cost);
            assert_eq!(data.max_cost, expected);
        }
    }
    assert_eq!(forest.kind(data.ptr), ClusterKind::Leaf);
    assert_eq!(forest.data(data.ptr).max_cost, data.max_cost);
}

/// Property 6: no cluster has `in_list` or `marked` set.
fn check_flags_clean(forest: &Forest, id: ClusterId) {
    assert!(!forest.in_list(id), "in_list left set on {id:?} between facade calls");
    assert!(!forest.marked(id), "marked left set on {id:?} between facade calls");
}

/// Property 1: the leaves of all roots form an acyclic graph.
fn check_forest_acyclic(forest: &Forest, roots: &[ClusterId]) {
    let mut parent: HashMap<crate::vertex::VertexId, crate::vertex::VertexId> = HashMap::new();
    fn find(
        parent: &mut HashMap<crate::vertex::VertexId, crate::vertex::VertexId>,
        v: crate::vertex::VertexId,
    ) -> crate::vertex::VertexId {
        let p = *parent.entry(v).or_insert(v);
        if p == v {
            v
        } else {
            let root = find(parent, p);
            parent.insert(v, root);
            root
        }
    }

    for &root in roots {
        for id in all_clusters(forest, &[root]) {
            if forest.kind(id) == ClusterKind::Leaf {
                let (u, v) = forest.boundary(id);
                let ru = find(&mut parent, u);
                let rv = find(&mut parent, v);
                assert_ne!(ru, rv, "forest invariant: edge {u:?}-{v:?} closes a cycle");
                parent.insert(ru, rv);
            }
        }
    }
}

/// Runs every per-cluster invariant over the whole live hierarchy.
fn check_all_invariants(tree: &Tree) {
    let forest = tree.forest();
    let roots = tree.roots();
    check_forest_acyclic(forest, roots);
    for &root in roots {
        for id in all_clusters(forest, &[root]) {
            check_tour_integrity(forest, id);
            check_boundary_is_heads(forest, id);
            check_max_cost_locality(forest, id);
            check_flags_clean(forest, id);
        }
    }
}

/// A structural fingerprint of the live hierarchy reachable from `tree`'s
/// roots, used to check that `expose` does not mutate it
/// Built entirely from the public read-only
/// accessors, so it is meaningful across two calls on the same tree.
fn fingerprint(tree: &Tree) -> Vec<(ClusterId, Option<ClusterId>, Option<ClusterId>, i64, ClusterId)> {
    // `all_clusters` walks the same `left`/`right` pointers in the same
    // order every time, and `expose` never mutates the live hierarchy,
    // so two calls on an untouched tree produce identically-ordered
    // traversals — no sort needed (and `ClusterId`'s `Ord` is not part
    // of its public contract to lean on here).
    let forest = tree.forest();
    let mut out = Vec::new();
    for &root in tree.roots() {
        for id in all_clusters(forest, &[root]) {
            let data = forest.data(id);
            out.push((id, forest.left(id), forest.right(id), data.max_cost, data.ptr));
        }
    }
    out
}

/// A plain adjacency-map shadow of the forest, used as an independent
/// BFS oracle for cross-checking `expose`'s answers.
#[derive(Default)]
struct ShadowGraph {
    /// Adjacency list keyed by vertex name.
    adj: HashMap<i64, Vec<(i64, i64)>>,
}

impl ShadowGraph {
    fn link(&mut self, u: i64, v: i64, w: i64) {
        self.adj.entry(u).or_default().push((v, w));
        self.adj.entry(v).or_default().push((u, w));
    }

    fn cut(&mut self, u: i64, v: i64, w: i64) {
        if let Some(nbrs) = self.adj.get_mut(&u) {
            nbrs.retain(|&(n, weight)| !(n == v && weight == w));
        }
        if let Some(nbrs) = self.adj.get_mut(&v) {
            nbrs.retain(|&(n, weight)| !(n == u && weight == w));
        }
    }

    /// BFS for the unique path between `u` and `v`, returning the
    /// maximum edge weight on it, or `None` if disconnected.
    fn path_max(&self, u: i64, v: i64) -> Option<i64> {
        if u == v {
            return None;
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((u, i64::MIN));
        visited.insert(u);
        let mut parent_edge: HashMap<i64, (i64, i64)> = HashMap::new();
        while let Some((cur, _)) = queue.pop_front() {
            if cur == v {
                let mut max = i64::MIN;
                let mut walk = v;
                while walk != u {
                    let (prev, w) = parent_edge[&walk];
                    max = max.max(w);
                    walk = prev;
                }
                return Some(max);
            }
            for &(nbr, w) in self.adj.get(&cur).into_iter().flatten() {
                if visited.insert(nbr) {
                    parent_edge.insert(nbr, (cur, w));
                    queue.push_back((nbr, w));
                }
            }
        }
        None
    }
}

/// Drives `tree` and `shadow` through the same randomized sequence of
/// link/cut/expose operations over `n` vertices, checking every
/// per-step invariant plus the BFS cross-check, for `steps` iterations.
fn run_randomized_session(seed: u64, n: i64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = Tree::new();
    let mut shadow = ShadowGraph::default();
    let mut active_edges: Vec<(i64, i64, i64, ClusterId)> = Vec::new();

    for _ in 0..steps {
        check_all_invariants(&tree);

        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }

        // Occasionally cut a previously-linked edge instead of linking.
        if !active_edges.is_empty() && rng.gen_bool(0.3) {
            let idx = rng.gen_range(0..active_edges.len());
            let (eu, ev, ew, leaf) = active_edges.swap_remove(idx);

            let before = fingerprint(&tree);
            let path_before = tree.expose(eu, ev);
            let after_expose = fingerprint(&tree);
            assert_eq!(before, after_expose, "expose purity violated before a cut");
            assert_eq!(
                path_before.map(|p| p.max_cost),
                shadow.path_max(eu, ev),
                "expose disagreed with the BFS shadow before a cut"
            );

            tree.cut(leaf);
            shadow.cut(eu, ev, ew);
            continue;
        }

        let already_connected = tree.expose(u, v).is_some();
        if already_connected {
            // Already connected: exercise `expose` as a read, matching
            // the MSF driver's query-before-decide pattern, without
            // mutating.
            let before = fingerprint(&tree);
            let path = tree.expose(u, v);
            let after = fingerprint(&tree);
            assert_eq!(before, after, "expose purity violated on a read-only query");
            assert_eq!(
                path.map(|p| p.max_cost),
                shadow.path_max(u, v),
                "expose disagreed with the BFS shadow on a connected pair"
            );
            continue;
        }

        let w = rng.gen_range(1..1000);
        tree.link(u, v, w);
        shadow.link(u, v, w);
        let leaf = tree.expose(u, v).expect("freshly linked edge must expose").leaf;
        active_edges.push((u, v, w, leaf));
    }

    check_all_invariants(&tree);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_randomized_sessions(seed in any::<u64>(), n in 3_i64..12, steps in 10_usize..80) {
        run_randomized_session(seed, n, steps);
    }
}
