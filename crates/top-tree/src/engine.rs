//! The level engine: the private hierarchy-rebuilding pass shared by
//! `link`, `cut` and `expose`.
//!
//! Everything here operates on arbitrary `insert`/`delete` frontiers at
//! level 1 and iterates level by level until both are empty. The public
//! facade (`crate::tree::Tree`) only ever calls [`Forest::update`].

use crate::arc::{ArcId, ArcSlot};
use crate::cluster::{ClusterId, ClusterKind};
use crate::forest::Forest;
use crate::vertex::VertexId;

impl Forest {
    /// Rebuilds the hierarchy above `insert`/`delete`, level by level,
    /// until both frontiers are empty.
    ///
    /// `exposed_u`/`exposed_v`, when set, forbid any move that would
    /// absorb either vertex — this is how `expose`'s temporary engine
    /// keeps the two endpoints as boundaries of the final root.
    pub(crate) fn update(
        &mut self,
        mut insert: Vec<ClusterId>,
        mut delete: Vec<ClusterId>,
        exposed_u: Option<VertexId>,
        exposed_v: Option<VertexId>,
    ) {
        let mut level: u32 = 1;
        let mut retired = Vec::new();
        while !insert.is_empty() || !delete.is_empty() {
            let mut insert_next = Vec::new();
            let mut delete_next = Vec::new();
            let mut neighbors = Vec::new();

            self.remove_from_euler_tour(&delete, &mut neighbors, &mut delete_next, &mut retired);
            self.insert_into_euler_tour(&insert, &mut neighbors, level);
            self.verify_moves(&mut neighbors, &mut delete_next);
            self.new_moves(
                &insert,
                &mut neighbors,
                &mut delete_next,
                &mut insert_next,
                exposed_u,
                exposed_v,
            );

            level += 1;
            for &id in insert.iter().chain(delete.iter()).chain(neighbors.iter()) {
                self.cluster_mut(id).in_list = false;
            }

            delete = delete_next;
            insert = insert_next;
        }

        // Every cluster retired by `remove_from_euler_tour` has had its
        // parent link and tour splice unwound by this point and is
        // unreachable from any root; free its arena slot.
        for id in retired {
            self.clusters.remove(id);
        }
    }

    /// Splices each cluster in `clusters` out of its level's tour,
    /// gathering its tour-neighbours and scheduling its parent (if any)
    /// for deletion at the next level.
    fn remove_from_euler_tour(
        &mut self,
        clusters: &[ClusterId],
        neighbors: &mut Vec<ClusterId>,
        delete_next: &mut Vec<ClusterId>,
        retired: &mut Vec<ClusterId>,
    ) {
        for &id in clusters {
            let a = ArcId::new(id, ArcSlot::First);
            let b = ArcId::new(id, ArcSlot::Second);
            if self.raw_next(a).is_none() || self.raw_next(b).is_none() {
                continue;
            }
            self.add_neighbors(id, neighbors);
            self.roots.retain(|&r| r != id);
            retired.push(id);

            let a_prev = self.prev(a);
            let a_next = self.next(a);
            let b_prev = self.prev(b);
            let b_next = self.next(b);
            self.arc_mut(a_prev).next = Some(b_next);
            self.arc_mut(b_next).prev = Some(a_prev);
            self.arc_mut(b_prev).next = Some(a_next);
            self.arc_mut(a_next).prev = Some(b_prev);

            if let Some(p) = self.cluster(id).par {
                if !self.cluster(p).in_list {
                    delete_next.push(p);
                    self.cluster_mut(p).in_list = true;
                }
                let was_root = self.roots.contains(&p);
                let (left, right) = {
                    let c = self.cluster(p);
                    (c.left, c.right)
                };
                self.split(p);
                if was_root {
                    self.roots.retain(|&r| r != p);
                    if let Some(l) = left {
                        self.roots.push(l);
                    }
                    if let Some(r) = right {
                        self.roots.push(r);
                    }
                }
            }

            let a_head = self.head(a);
            if self.vertices.vertex(a_head).handle == Some(a) {
                self.vertices.vertex_mut(a_head).handle = if b_prev == a { None } else { Some(b_prev) };
            }
            let b_head = self.head(b);
            if self.vertices.vertex(b_head).handle == Some(b) {
                self.vertices.vertex_mut(b_head).handle = if a_prev == b { None } else { Some(a_prev) };
            }
        }
    }

    fn insert_into_euler_tour(&mut self, clusters: &[ClusterId], neighbors: &mut Vec<ClusterId>, level: u32) {
        if level == 1 {
            self.insert_into_euler_tour_base(clusters, neighbors);
        } else {
            self.insert_into_euler_tour_rest(clusters, neighbors);
        }
    }

    /// Boundary-aware splice used only at level 1: a new leaf's
    /// insertion point is found directly from its boundaries' handles,
    /// with no hierarchy to walk yet.
    fn insert_into_euler_tour_base(&mut self, clusters: &[ClusterId], neighbors: &mut Vec<ClusterId>) {
        for &id in clusters {
            let arc1 = ArcId::new(id, ArcSlot::First);
            let arc2 = ArcId::new(id, ArcSlot::Second);

            let mut predecessor_arc1 = self.vertices.vertex(self.tail(arc1)).handle;
            let mut predecessor_arc2 = self.vertices.vertex(self.tail(arc2)).handle;

            let successor_arc1 = if let Some(p2) = predecessor_arc2 {
                self.next(p2)
            } else {
                predecessor_arc2 = Some(arc1);
                arc2
            };

            let successor_arc2 = if let Some(p1) = predecessor_arc1 {
                self.next(p1)
            } else {
                predecessor_arc1 = Some(arc2);
                arc1
            };

            let predecessor_arc1 =
                predecessor_arc1.unwrap_or_else(|| unreachable!("predecessor_arc1 left unset"));
            let predecessor_arc2 =
                predecessor_arc2.unwrap_or_else(|| unreachable!("predecessor_arc2 left unset"));
            self.splice_arc(arc1, predecessor_arc1, successor_arc1);
            self.splice_arc(arc2, predecessor_arc2, successor_arc2);
            self.add_neighbors(id, neighbors);

            let h1 = self.head(arc1);
            let h2 = self.head(arc2);
            self.vertices.vertex_mut(h1).handle = Some(arc1);
            self.vertices.vertex_mut(h2).handle = Some(arc2);
        }
    }

    /// Splice used above level 1: the insertion point is found by
    /// walking down into the child hierarchy (`find_arc_predecessor`/
    /// `find_arc_successor`).
    fn insert_into_euler_tour_rest(&mut self, clusters: &[ClusterId], neighbors: &mut Vec<ClusterId>) {
        for &id in clusters {
            let arc1 = ArcId::new(id, ArcSlot::First);
            let pred = self.find_arc_predecessor(arc1);
            let succ = self.find_arc_successor(arc1);
            self.splice_arc(arc1, pred, succ);

            let arc2 = ArcId::new(id, ArcSlot::Second);
            let pred = self.find_arc_predecessor(arc2);
            let succ = self.find_arc_successor(arc2);
            self.splice_arc(arc2, pred, succ);

            self.add_neighbors(id, neighbors);
        }
    }

    /// Finds the arc that should immediately follow `arc` once spliced
    /// in, by walking down to the child that owns the side of `arc.head`
    /// and climbing back out through that child's current parent.
    ///
    /// # Panics
    ///
    /// Panics if `arc`'s cluster is a LEAF — a leaf is never mid-splice
    /// above level 1.
    fn find_arc_successor(&self, arc: ArcId) -> ArcId {
        let cluster_id = arc.cluster();
        let w = self.head(arc);
        let kind = self.kind(cluster_id);
        let c = self.cluster(cluster_id);
        let left = c.left;
        let a_cluster = match kind {
            ClusterKind::Rake => c.right.unwrap_or_else(|| unreachable!("RAKE cluster missing right child")),
            ClusterKind::Dummy => left.unwrap_or_else(|| unreachable!("DUMMY cluster missing child")),
            ClusterKind::Compress => {
                let left = left.unwrap_or_else(|| unreachable!("COMPRESS cluster missing left child"));
                let (l1, l2) = self.cluster(left).boundary();
                if l1 == w || l2 == w {
                    left
                } else {
                    c.right.unwrap_or_else(|| unreachable!("COMPRESS cluster missing right child"))
                }
            }
            ClusterKind::Leaf => unreachable!("find_arc_successor called on a LEAF cluster"),
        };

        let a1 = ArcId::new(a_cluster, ArcSlot::First);
        let a = if self.head(a1) == w { a1 } else { ArcId::new(a_cluster, ArcSlot::Second) };
        let mut b = self.next(a);
        while kind == ClusterKind::Rake && b.cluster() == left.unwrap_or_else(|| unreachable!("checked above")) {
            b = self.next(b);
        }

        let parent = self
            .cluster(b.cluster())
            .par
            .unwrap_or_else(|| unreachable!("tour neighbour has no parent to climb into"));
        let p1 = ArcId::new(parent, ArcSlot::First);
        if w == self.tail(p1) {
            p1
        } else {
            ArcId::new(parent, ArcSlot::Second)
        }
    }

    /// Predecessor counterpart of [`Self::find_arc_successor`], walking
    /// down to the child owning the side of `arc`'s tail.
    fn find_arc_predecessor(&self, arc: ArcId) -> ArcId {
        let cluster_id = arc.cluster();
        let v = self.tail(arc);
        let kind = self.kind(cluster_id);
        let c = self.cluster(cluster_id);
        let left = c.left;
        let a_cluster = match kind {
            ClusterKind::Rake => c.right.unwrap_or_else(|| unreachable!("RAKE cluster missing right child")),
            ClusterKind::Dummy => left.unwrap_or_else(|| unreachable!("DUMMY cluster missing child")),
            ClusterKind::Compress => {
                let left = left.unwrap_or_else(|| unreachable!("COMPRESS cluster missing left child"));
                let l1t = self.tail(ArcId::new(left, ArcSlot::First));
                let l2t = self.tail(ArcId::new(left, ArcSlot::Second));
                if l1t == v || l2t == v {
                    left
                } else {
                    c.right.unwrap_or_else(|| unreachable!("COMPRESS cluster missing right child"))
                }
            }
            ClusterKind::Leaf => unreachable!("find_arc_predecessor called on a LEAF cluster"),
        };

        let a1 = ArcId::new(a_cluster, ArcSlot::First);
        let a = if self.tail(a1) == v { a1 } else { ArcId::new(a_cluster, ArcSlot::Second) };
        let mut b = self.prev(a);
        while kind == ClusterKind::Rake && b.cluster() == left.unwrap_or_else(|| unreachable!("checked above")) {
            b = self.prev(b);
        }

        let parent = self
            .cluster(b.cluster())
            .par
            .unwrap_or_else(|| unreachable!("tour neighbour has no parent to climb into"));
        let p1 = ArcId::new(parent, ArcSlot::First);
        if v == self.head(p1) {
            p1
        } else {
            ArcId::new(parent, ArcSlot::Second)
        }
    }

    /// Checks every tour-neighbour's parent for continued validity;
    /// parents that broke are scheduled for deletion (and their other
    /// child re-enqueued), parents still valid drop their child from
    /// further consideration this level.
    fn verify_moves(&mut self, neighbors: &mut Vec<ClusterId>, delete_next: &mut Vec<ClusterId>) {
        let mut matched = Vec::new();
        let mut i = 0;
        while i < neighbors.len() {
            let id = neighbors[i];
            i += 1;

            let Some(p) = self.cluster(id).par else { continue };
            if self.kind(p) == ClusterKind::Dummy {
                continue;
            }

            if self.is_cluster_valid(p) {
                matched.push(id);
                continue;
            }

            let (left, right) = {
                let c = self.cluster(p);
                (c.left, c.right)
            };
            let sibling = if left == Some(id) { right } else { left };
            if let Some(s) = sibling {
                if !self.cluster(s).in_list {
                    neighbors.push(s);
                    self.cluster_mut(s).in_list = true;
                }
            }
            if !self.cluster(p).in_list {
                delete_next.push(p);
                self.cluster_mut(p).in_list = true;
            }
        }

        neighbors.retain(|id| !matched.contains(id));
        for id in matched {
            self.cluster_mut(id).in_list = false;
        }
    }

    /// Attempts a RAKE/COMPRESS join along `a` with its tour-successor,
    /// if both sides are free and the move is valid.
    #[allow(clippy::too_many_arguments)]
    fn perform_valid_move(
        &mut self,
        a: ArcId,
        delete_next: &mut Vec<ClusterId>,
        insert_next: &mut Vec<ClusterId>,
        performed_moves: &mut Vec<ClusterId>,
        exposed_u: Option<VertexId>,
        exposed_v: Option<VertexId>,
    ) -> bool {
        let cluster_id = a.cluster();
        let b = self.next(a);
        let b_id = b.cluster();
        if !(self.is_free(cluster_id, delete_next) && self.is_free(b_id, delete_next)) {
            return false;
        }
        let Some(kind) = self.is_move_valid(a, exposed_u, exposed_v) else {
            return false;
        };

        if let Some(p) = self.cluster(cluster_id).par {
            if !self.cluster(p).in_list {
                delete_next.push(p);
                self.cluster_mut(p).in_list = true;
            }
        }
        if let Some(p) = self.cluster(b_id).par {
            if !self.cluster(p).in_list {
                delete_next.push(p);
                self.cluster_mut(p).in_list = true;
            }
        }

        let new_id = self.join(a, kind);

        self.roots.retain(|&r| r != cluster_id && r != b_id);
        self.cluster_mut(cluster_id).par = Some(new_id);
        self.cluster_mut(b_id).par = Some(new_id);
        insert_next.push(new_id);
        self.cluster_mut(new_id).in_list = true;
        performed_moves.push(cluster_id);
        performed_moves.push(b_id);
        true
    }

    /// `a`'s candidate move kind against its tour-successor, or `None`
    /// if no move is valid — COMPRESS is preferred over RAKE, and either
    /// is refused if it would absorb `exposed_u`/`exposed_v`.
    fn is_move_valid(
        &self,
        a: ArcId,
        exposed_u: Option<VertexId>,
        exposed_v: Option<VertexId>,
    ) -> Option<ClusterKind> {
        let b = self.next(a);
        if a.cluster() == b.cluster() {
            return None;
        }

        let a_head = self.head(a);
        let b_tail = self.tail(b);
        let compress_clear = |endpoint: VertexId| a_head != endpoint && b_tail != endpoint;
        if exposed_u.map_or(true, compress_clear)
            && exposed_v.map_or(true, compress_clear)
            && self.can_compress(a)
        {
            return Some(ClusterKind::Compress);
        }

        let a_tail = self.tail(a);
        let rake_clear = |endpoint: VertexId| a_tail != endpoint;
        if exposed_u.map_or(true, rake_clear) && exposed_v.map_or(true, rake_clear) && self.can_rake(a) {
            return Some(ClusterKind::Rake);
        }

        None
    }

    /// Tries every cluster in `clusters ∪ neighbors` against its
    /// tour-successor; clusters left unmatched either become a root (if
    /// already a tour-root) or are wrapped in a DUMMY to be revisited
    /// one level up. Returns whether any move was performed.
    fn new_moves(
        &mut self,
        clusters: &[ClusterId],
        neighbors: &mut Vec<ClusterId>,
        delete_next: &mut Vec<ClusterId>,
        insert_next: &mut Vec<ClusterId>,
        exposed_u: Option<VertexId>,
        exposed_v: Option<VertexId>,
    ) -> bool {
        let mut performed = Vec::new();
        let all: Vec<ClusterId> = clusters.iter().chain(neighbors.iter()).copied().collect();

        for &id in &all {
            let a1 = ArcId::new(id, ArcSlot::First);
            if !self.perform_valid_move(a1, delete_next, insert_next, &mut performed, exposed_u, exposed_v) {
                let a2 = ArcId::new(id, ArcSlot::Second);
                self.perform_valid_move(a2, delete_next, insert_next, &mut performed, exposed_u, exposed_v);
            }
        }

        for &id in &all {
            if performed.contains(&id) {
                continue;
            }
            if self.is_root(id) {
                self.roots.push(id);
                continue;
            }
            if let Some(p) = self.cluster(id).par {
                if !self.cluster(p).in_list {
                    delete_next.push(p);
                    self.cluster_mut(p).in_list = true;
                }
            }
            self.roots.retain(|&r| r != id);
            let dummy = self.create_dummy(id);
            self.cluster_mut(id).par = Some(dummy);
            insert_next.push(dummy);
            self.cluster_mut(dummy).in_list = true;
        }

        !performed.is_empty()
    }
}
