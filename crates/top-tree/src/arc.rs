//! Arcs: directed half-edges of a level's circular Euler tour.

use crate::cluster::ClusterId;
use crate::vertex::VertexId;

/// Which of a cluster's two arcs is referenced.
///
/// Every cluster owns exactly two arcs for its entire lifetime
/// for its whole lifetime, so an arc never needs its own arena slot:
/// it is addressed as the pair of (owning cluster, slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcSlot {
    /// The cluster's first arc.
    First,
    /// The cluster's second arc.
    Second,
}

impl ArcSlot {
    /// The other slot of the same cluster.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// A stable reference to one of a cluster's two arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcId {
    pub(crate) cluster: ClusterId,
    pub(crate) slot: ArcSlot,
}

impl ArcId {
    pub(crate) fn new(cluster: ClusterId, slot: ArcSlot) -> Self {
        Self { cluster, slot }
    }

    /// The cluster that owns this arc.
    #[must_use]
    pub fn cluster(self) -> ClusterId {
        self.cluster
    }

    /// The twin arc of the same cluster — the other arc it owns.
    #[must_use]
    pub fn twin(self) -> Self {
        Self {
            cluster: self.cluster,
            slot: self.slot.other(),
        }
    }
}

/// The mutable state of one arc: its head vertex and its neighbours in
/// the circular Euler tour of its level.
///
/// `next`/`prev` are `None` only for a brand-new arc that has not yet
/// been spliced into a tour; every arc reachable from a `Tree` root has
/// both set.
#[derive(Debug, Clone, Copy)]
pub struct ArcRecord {
    pub(crate) head: VertexId,
    pub(crate) next: Option<ArcId>,
    pub(crate) prev: Option<ArcId>,
}

impl ArcRecord {
    pub(crate) fn new(head: VertexId) -> Self {
        Self {
            head,
            next: None,
            prev: None,
        }
    }

    /// The vertex this arc points at.
    #[must_use]
    pub fn head(&self) -> VertexId {
        self.head
    }
}
