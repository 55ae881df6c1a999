//! Clusters: hierarchy nodes summarising a subgraph with at most two
//! boundary vertices.

use generational_arena::{Arena, Index};

use crate::arc::{ArcRecord, ArcSlot};
use crate::vertex::VertexId;

/// Stable id of a cluster in a `Forest`'s arena.
pub type ClusterId = Index;

/// The payload a cluster carries: the maximum edge weight under it, and
/// a pointer to the leaf cluster that achieves that maximum.
///
/// `ptr` always resolves to a `Leaf` cluster whose weight equals
/// `max_cost`; for a leaf cluster itself, `ptr`
/// points back at the leaf.
#[derive(Debug, Clone, Copy)]
pub struct Data {
    pub max_cost: i64,
    pub ptr: ClusterId,
}

/// The derived, never-stored kind of a cluster — computed from its
/// children and, for an internal cluster, the boundary vertices it
/// shares with its right child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterKind {
    /// No children; represents one edge.
    Leaf,
    /// Exactly one child, carrying an orphan up one level.
    Dummy,
    /// Two children with an identical boundary pair.
    Rake,
    /// Two children sharing exactly one boundary vertex.
    Compress,
}

/// A hierarchy node summarising a connected subgraph with at most two
/// boundary vertices (the heads of its two arcs).
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    pub(crate) par: Option<ClusterId>,
    pub(crate) left: Option<ClusterId>,
    pub(crate) right: Option<ClusterId>,
    pub data: Data,
    /// Transient work-queue-membership flag, owned by the level engine.
    pub(crate) in_list: bool,
    /// Transient flag owned by `expose`'s ancestor walk.
    pub(crate) marked: bool,
    pub(crate) arc1: ArcRecord,
    pub(crate) arc2: ArcRecord,
}

impl Cluster {
    pub(crate) fn leaf(u: VertexId, v: VertexId, weight: i64, self_id: ClusterId) -> Self {
        Self {
            par: None,
            left: None,
            right: None,
            data: Data {
                max_cost: weight,
                ptr: self_id,
            },
            in_list: false,
            marked: false,
            arc1: ArcRecord::new(u),
            arc2: ArcRecord::new(v),
        }
    }

    /// Returns the boundary vertices, the heads of this cluster's two arcs.
    #[must_use]
    pub fn boundary(&self) -> (VertexId, VertexId) {
        (self.arc1.head, self.arc2.head)
    }

    /// This cluster's parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ClusterId> {
        self.par
    }

    /// This cluster's left child, if any (the sole child, for a DUMMY).
    #[must_use]
    pub fn left(&self) -> Option<ClusterId> {
        self.left
    }

    /// This cluster's right child, if any — absent for LEAF and DUMMY.
    #[must_use]
    pub fn right(&self) -> Option<ClusterId> {
        self.right
    }

    /// The transient work-queue membership flag the level engine owns.
    /// Always `false` between facade calls.
    #[must_use]
    pub fn in_list(&self) -> bool {
        self.in_list
    }

    /// The transient flag `expose`'s ancestor walk owns. Always `false`
    /// between facade calls.
    #[must_use]
    pub fn marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn arc(&self, slot: ArcSlot) -> &ArcRecord {
        match slot {
            ArcSlot::First => &self.arc1,
            ArcSlot::Second => &self.arc2,
        }
    }

    pub(crate) fn arc_mut(&mut self, slot: ArcSlot) -> &mut ArcRecord {
        match slot {
            ArcSlot::First => &mut self.arc1,
            ArcSlot::Second => &mut self.arc2,
        }
    }
}

/// Computes a cluster's kind from its children and, for internal
/// clusters, whether the right child's boundary matches this cluster's.
#[must_use]
pub(crate) fn kind_of(id: ClusterId, arena: &Arena<Cluster>) -> ClusterKind {
    let c = arena
        .get(id)
        .unwrap_or_else(|| unreachable!("cluster id {id:?} not present"));
    match (c.left, c.right) {
        (None, None) => ClusterKind::Leaf,
        (Some(_), None) | (None, Some(_)) => ClusterKind::Dummy,
        (Some(_), Some(right)) => {
            let r = arena
                .get(right)
                .unwrap_or_else(|| unreachable!("cluster id {right:?} not present"));
            let (a1, a2) = c.boundary();
            let (r1, r2) = r.boundary();
            if (r1 == a1 && r2 == a2) || (r1 == a2 && r2 == a1) {
                ClusterKind::Rake
            } else {
                ClusterKind::Compress
            }
        }
    }
}
