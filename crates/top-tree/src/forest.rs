//! The `Forest`: the arena of vertices and clusters, and the low-level
//! arc/cluster algebra the level engine is built from.

use generational_arena::Arena;

use crate::arc::{ArcId, ArcRecord, ArcSlot};
use crate::cluster::{self, Cluster, ClusterId, ClusterKind, Data};
use crate::vertex::{VertexId, VertexStore};

/// Owner of the vertex and cluster arenas, and the roster of top-level
/// roots (one per component).
///
/// `Forest` provides the arc/cluster algebra and the level engine that
/// maintains the hierarchy. The public `link`/`cut`/`expose` facade
/// lives on `crate::tree::Tree`, which wraps a `Forest`.
#[derive(Debug, Default)]
pub struct Forest {
    pub(crate) vertices: VertexStore,
    pub(crate) clusters: Arena<Cluster>,
    pub(crate) roots: Vec<ClusterId>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- basic accessors -----------------------------------------------

    pub(crate) fn cluster(&self, id: ClusterId) -> &Cluster {
        self.clusters
            .get(id)
            .unwrap_or_else(|| unreachable!("cluster id {id:?} not present in forest"))
    }

    pub(crate) fn cluster_mut(&mut self, id: ClusterId) -> &mut Cluster {
        self.clusters
            .get_mut(id)
            .unwrap_or_else(|| unreachable!("cluster id {id:?} not present in forest"))
    }

    /// The derived kind of a cluster: `Leaf`, `Dummy`, `Rake` or `Compress`.
    #[must_use]
    pub fn kind(&self, id: ClusterId) -> ClusterKind {
        cluster::kind_of(id, &self.clusters)
    }

    /// The boundary vertices of a cluster — the heads of its two arcs.
    #[must_use]
    pub fn boundary(&self, id: ClusterId) -> (VertexId, VertexId) {
        self.cluster(id).boundary()
    }

    /// The summary payload (max-cost edge and its leaf) of a cluster.
    #[must_use]
    pub fn data(&self, id: ClusterId) -> Data {
        self.cluster(id).data
    }

    /// The public integer name of a vertex, for callers (the MSF driver)
    /// that only have a `VertexId` from a cluster's boundary.
    #[must_use]
    pub fn vertex_name(&self, id: VertexId) -> i64 {
        self.vertices.vertex(id).name()
    }

    /// This cluster's parent, if any.
    #[must_use]
    pub fn parent(&self, id: ClusterId) -> Option<ClusterId> {
        self.cluster(id).parent()
    }

    /// This cluster's left child, if any.
    #[must_use]
    pub fn left(&self, id: ClusterId) -> Option<ClusterId> {
        self.cluster(id).left()
    }

    /// This cluster's right child, if any.
    #[must_use]
    pub fn right(&self, id: ClusterId) -> Option<ClusterId> {
        self.cluster(id).right()
    }

    /// Whether `id`'s work-queue membership flag is set. Always `false`
    /// between facade calls.
    #[must_use]
    pub fn in_list(&self, id: ClusterId) -> bool {
        self.cluster(id).in_list()
    }

    /// Whether `id`'s `expose`-ancestor-walk flag is set. Always `false`
    /// between facade calls.
    #[must_use]
    pub fn marked(&self, id: ClusterId) -> bool {
        self.cluster(id).marked()
    }

    pub(crate) fn arc(&self, a: ArcId) -> &ArcRecord {
        self.cluster(a.cluster()).arc(a.slot)
    }

    pub(crate) fn arc_mut(&mut self, a: ArcId) -> &mut ArcRecord {
        self.cluster_mut(a.cluster()).arc_mut(a.slot)
    }

    /// The vertex this arc points at.
    #[must_use]
    pub fn head(&self, a: ArcId) -> VertexId {
        self.arc(a).head
    }

    /// The vertex at the other end of this arc's cluster — the head of its twin.
    #[must_use]
    pub fn tail(&self, a: ArcId) -> VertexId {
        self.head(a.twin())
    }

    pub(crate) fn raw_next(&self, a: ArcId) -> Option<ArcId> {
        self.arc(a).next
    }

    pub(crate) fn raw_prev(&self, a: ArcId) -> Option<ArcId> {
        self.arc(a).prev
    }

    /// The tour-successor of an arc.
    ///
    /// # Panics
    ///
    /// Panics if `a` has not yet been spliced into a tour — invariant 2
    /// guarantees this never happens for an arc reachable
    /// from a `Tree` root.
    #[must_use]
    pub fn next(&self, a: ArcId) -> ArcId {
        self.raw_next(a)
            .unwrap_or_else(|| unreachable!("arc {a:?} is not in a tour"))
    }

    /// The tour-predecessor of an arc. See [`Self::next`] for panics.
    #[must_use]
    pub fn prev(&self, a: ArcId) -> ArcId {
        self.raw_prev(a)
            .unwrap_or_else(|| unreachable!("arc {a:?} is not in a tour"))
    }

    // -- predicates --------------------------------------------------

    /// `can_rake(a)`: `a` is immediately preceded by its own twin, so its
    /// cluster dangles as a leaf off the endpoint `head(a)`.
    #[must_use]
    pub fn can_rake(&self, a: ArcId) -> bool {
        self.raw_prev(a) == Some(a.twin())
    }

    /// `can_compress(a)`: `a` and its tour-successor share the single
    /// interior vertex `head(a)`.
    #[must_use]
    pub fn can_compress(&self, a: ArcId) -> bool {
        let b = self.next(a);
        self.raw_next(b.twin()) == Some(a.twin())
    }

    /// Whether a cluster is the sole cluster of its component's current
    /// level, i.e. its own two-arc tour closes on itself.
    #[must_use]
    pub fn is_root(&self, id: ClusterId) -> bool {
        let a1 = ArcId::new(id, ArcSlot::First);
        let a2 = ArcId::new(id, ArcSlot::Second);
        self.raw_next(a1) == Some(a2) && self.raw_next(a2) == Some(a1)
    }

    /// Whether a cluster is free to attempt a new move this level: it
    /// has no parent, its parent is a `Dummy`, or its parent is already
    /// slated for deletion at the next level.
    #[must_use]
    pub fn is_free(&self, id: ClusterId, delete_next: &[ClusterId]) -> bool {
        match self.cluster(id).par {
            None => true,
            Some(p) => self.kind(p) == ClusterKind::Dummy || delete_next.contains(&p),
        }
    }

    /// Whether `is_cluster_valid` holds for a non-leaf cluster: for
    /// `Rake`, the left child's relevant arc `can_rake` and is
    /// tour-adjacent to the right child; for `Compress`, analogously
    /// with `can_compress`.
    #[must_use]
    pub fn is_cluster_valid(&self, id: ClusterId) -> bool {
        let c = self.cluster(id);
        let left = c
            .left
            .unwrap_or_else(|| unreachable!("is_cluster_valid on a cluster with no left child"));
        let right = c
            .right
            .unwrap_or_else(|| unreachable!("is_cluster_valid on a cluster with no right child"));
        let kind = self.kind(id);
        let check = |slot: ArcSlot| {
            let a = ArcId::new(left, slot);
            match kind {
                ClusterKind::Rake => self.can_rake(a) && self.next(a).cluster() == right,
                ClusterKind::Compress => self.can_compress(a) && self.next(a).cluster() == right,
                ClusterKind::Leaf | ClusterKind::Dummy => {
                    unreachable!("is_cluster_valid only applies to RAKE/COMPRESS clusters")
                }
            }
        };
        check(ArcSlot::First) || check(ArcSlot::Second)
    }

    /// Appends this cluster's four tour-neighbours to `neighbors`,
    /// deduplicated via each candidate's `in_list` flag.
    pub(crate) fn add_neighbors(&mut self, id: ClusterId, neighbors: &mut Vec<ClusterId>) {
        let a1 = ArcId::new(id, ArcSlot::First);
        let a2 = ArcId::new(id, ArcSlot::Second);
        for arc in [self.next(a1), self.prev(a1), self.next(a2), self.prev(a2)] {
            let neighbor = arc.cluster();
            if !self.cluster(neighbor).in_list {
                neighbors.push(neighbor);
                self.cluster_mut(neighbor).in_list = true;
            }
        }
    }

    // -- join / split / dummy promotion --------------------------------

    /// Splices `arc` into the tour between `predecessor` and `successor`.
    pub(crate) fn splice_arc(&mut self, arc: ArcId, predecessor: ArcId, successor: ArcId) {
        self.arc_mut(arc).prev = Some(predecessor);
        self.arc_mut(arc).next = Some(successor);
        self.arc_mut(predecessor).next = Some(arc);
        self.arc_mut(successor).prev = Some(arc);
    }

    /// Joins the cluster owning `a` with its tour-successor's cluster
    /// via a RAKE or COMPRESS move, producing the new parent cluster.
    ///
    /// `a` must be the specific arc that satisfied `can_rake`/`can_compress`
    /// for this move — the move always involves `a`'s own cluster as the
    /// "self" side and `next(a)`'s cluster as the sibling, so `a` alone
    /// identifies both the move and (with `kind`) which boundaries survive.
    pub(crate) fn join(&mut self, a: ArcId, kind: ClusterKind) -> ClusterId {
        let sibling = self.next(a);
        let left_id = a.cluster();
        let right_id = sibling.cluster();

        let left_data = self.cluster(left_id).data;
        let right_data = self.cluster(right_id).data;
        let data = if left_data.max_cost > right_data.max_cost {
            left_data
        } else {
            right_data
        };

        let (b1, b2, interior) = match kind {
            ClusterKind::Compress => (self.head(sibling), self.tail(a), self.head(a)),
            ClusterKind::Rake => (self.head(sibling), self.tail(sibling), self.tail(a)),
            ClusterKind::Leaf | ClusterKind::Dummy => unreachable!("join is only valid for RAKE/COMPRESS moves"),
        };

        let new_id = self.clusters.insert(Cluster {
            par: None,
            left: Some(left_id),
            right: Some(right_id),
            data,
            in_list: false,
            marked: false,
            arc1: ArcRecord::new(b1),
            arc2: ArcRecord::new(b2),
        });
        self.vertices.vertex_mut(interior).first_internal_cluster = Some(new_id);
        new_id
    }

    /// Detaches both children of `id`, clearing their `par` and clearing
    /// any `first_internal_cluster` back-pointer to `id`. Idempotent.
    pub(crate) fn split(&mut self, id: ClusterId) {
        let (left, right) = {
            let c = self.cluster(id);
            (c.left, c.right)
        };
        if let Some(left_id) = left {
            let (h1, h2) = self.cluster(left_id).boundary();
            for h in [h1, h2] {
                let v = self.vertices.vertex_mut(h);
                if v.first_internal_cluster == Some(id) {
                    v.first_internal_cluster = None;
                }
            }
            self.cluster_mut(left_id).par = None;
        }
        if let Some(right_id) = right {
            self.cluster_mut(right_id).par = None;
        }
        let c = self.cluster_mut(id);
        c.left = None;
        c.right = None;
    }

    /// Wraps `id` in a single-child DUMMY parent with the same boundary
    /// and payload, carrying it up one level unchanged.
    pub(crate) fn create_dummy(&mut self, id: ClusterId) -> ClusterId {
        let (h1, h2) = self.cluster(id).boundary();
        let data = self.cluster(id).data;
        self.clusters.insert(Cluster {
            par: None,
            left: Some(id),
            right: None,
            data,
            in_list: false,
            marked: false,
            arc1: ArcRecord::new(h1),
            arc2: ArcRecord::new(h2),
        })
    }

    /// Inserts a fresh self-referencing leaf cluster for the edge `u`–`v`.
    ///
    /// The cluster's id is not known until after it is placed in the
    /// arena, so this inserts with a throwaway `data.ptr` and patches it
    /// in place once the real id comes back.
    pub(crate) fn insert_leaf(&mut self, u: VertexId, v: VertexId, weight: i64) -> ClusterId {
        let placeholder = ClusterId::from_raw_parts(0, 0);
        let id = self
            .clusters
            .insert(Cluster::leaf(u, v, weight, placeholder));
        let c = self.cluster_mut(id);
        c.data.ptr = id;
        c.in_list = true;
        id
    }

    /// Inserts a fresh childless cluster carrying someone else's `data`
    /// by value (not a self-referencing leaf) — used by `expose` to
    /// clone a frontier cluster into its temporary tree while keeping
    /// `data.ptr` pointing at the original hierarchy's leaf.
    pub(crate) fn insert_clone_leaf(&mut self, u: VertexId, v: VertexId, data: Data) -> ClusterId {
        self.clusters.insert(Cluster {
            par: None,
            left: None,
            right: None,
            data,
            in_list: true,
            marked: false,
            arc1: ArcRecord::new(u),
            arc2: ArcRecord::new(v),
        })
    }

    /// Climbs from `v`'s tour handle to its component's current root.
    ///
    /// # Panics
    ///
    /// Panics if `v` is isolated (no handle).
    pub(crate) fn root_of(&self, v: VertexId) -> ClusterId {
        let start = self
            .vertices
            .vertex(v)
            .handle
            .unwrap_or_else(|| unreachable!("root_of called on an isolated vertex"))
            .cluster();
        let mut c = start;
        while let Some(p) = self.cluster(c).par {
            c = p;
        }
        c
    }

    /// Walks `v`'s `first_internal_cluster` chain up through `par`,
    /// collecting every ancestor in which `v` is interior, deduplicated
    /// (and left marked) via each cluster's `marked` flag.
    pub(crate) fn internal_clusters(&mut self, v: VertexId) -> Vec<ClusterId> {
        let mut out = Vec::new();
        let mut ptr = self.vertices.vertex(v).first_internal_cluster;
        while let Some(id) = ptr {
            if self.cluster(id).marked {
                break;
            }
            out.push(id);
            self.cluster_mut(id).marked = true;
            ptr = self.cluster(id).par;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(forest: &mut Forest, u: i64, v: i64, w: i64) -> ClusterId {
        let uid = forest.vertices.get_or_insert(u);
        let vid = forest.vertices.get_or_insert(v);
        forest.insert_leaf(uid, vid, w)
    }

    fn singleton_tour(forest: &mut Forest, id: ClusterId) {
        let a1 = ArcId::new(id, ArcSlot::First);
        let a2 = ArcId::new(id, ArcSlot::Second);
        forest.splice_arc(a1, a2, a2);
        forest.splice_arc(a2, a1, a1);
    }

    #[test]
    fn fresh_leaf_is_root_once_tour_is_seeded() {
        let mut forest = Forest::new();
        let leaf_id = leaf(&mut forest, 1, 2, 5);
        singleton_tour(&mut forest, leaf_id);
        assert!(forest.is_root(leaf_id));
        assert_eq!(forest.kind(leaf_id), ClusterKind::Leaf);
    }

    #[test]
    fn can_rake_detects_dangling_twin_pair() {
        let mut forest = Forest::new();
        let leaf_id = leaf(&mut forest, 1, 2, 5);
        singleton_tour(&mut forest, leaf_id);
        let a1 = ArcId::new(leaf_id, ArcSlot::First);
        assert!(forest.can_rake(a1));
        assert!(forest.can_rake(a1.twin()));
    }

    #[test]
    fn is_free_respects_dummy_and_delete_next() {
        let mut forest = Forest::new();
        let leaf_id = leaf(&mut forest, 1, 2, 5);
        singleton_tour(&mut forest, leaf_id);
        assert!(forest.is_free(leaf_id, &[]));

        let dummy_id = forest.create_dummy(leaf_id);
        forest.cluster_mut(leaf_id).par = Some(dummy_id);
        assert!(forest.is_free(leaf_id, &[]));
        assert!(forest.is_free(leaf_id, &[dummy_id]));

        let compress_id = forest.clusters.insert(Cluster {
            par: None,
            left: Some(leaf_id),
            right: Some(leaf_id),
            data: forest.cluster(leaf_id).data,
            in_list: false,
            marked: false,
            arc1: ArcRecord::new(forest.boundary(leaf_id).0),
            arc2: ArcRecord::new(forest.boundary(leaf_id).1),
        });
        forest.cluster_mut(leaf_id).par = Some(compress_id);
        assert!(!forest.is_free(leaf_id, &[]));
        assert!(forest.is_free(leaf_id, &[compress_id]));
    }
}
