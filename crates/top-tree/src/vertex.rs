//! The vertex store: named vertices and the two mutable handles higher
//! layers use to climb back into the hierarchy.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

use crate::arc::ArcId;
use crate::cluster::ClusterId;

/// Stable id of a vertex in a [`VertexStore`].
pub type VertexId = Index;

/// A named vertex.
///
/// `handle` points at an arc of the base-level Euler tour whose head is
/// this vertex, or is `None` while the vertex is isolated. `first_internal_cluster`
/// is the deepest ancestor cluster in which this vertex is interior (no
/// longer a boundary); climbing `Cluster::par` from it visits exactly the
/// ancestors in which the vertex is interior.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    name: i64,
    pub(crate) handle: Option<ArcId>,
    pub(crate) first_internal_cluster: Option<ClusterId>,
}

impl Vertex {
    /// The vertex's public integer name.
    #[must_use]
    pub fn name(&self) -> i64 {
        self.name
    }

    /// Whether this vertex currently belongs to any cluster.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.handle.is_none()
    }
}

/// Arena of [`Vertex`]es, keyed by their public integer name.
///
/// Vertices are independent of any particular cluster and outlive any
/// cluster that references them.
#[derive(Debug, Default)]
pub struct VertexStore {
    vertices: Arena<Vertex>,
    by_name: HashMap<i64, VertexId>,
}

impl VertexStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `name`, creating a fresh isolated vertex if it
    /// has not been seen before.
    pub fn get_or_insert(&mut self, name: i64) -> VertexId {
        if let Some(&id) = self.by_name.get(&name) {
            id
        } else {
            let id = self.vertices.insert(Vertex {
                name,
                handle: None,
                first_internal_cluster: None,
            });
            self.by_name.insert(name, id);
            id
        }
    }

    /// Looks up a vertex by name without creating it.
    #[must_use]
    pub fn get(&self, name: i64) -> Option<VertexId> {
        self.by_name.get(&name).copied()
    }

    /// Returns a shared reference to the vertex at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not present in the store; an invalid id is
    /// always a programming error on the caller's part, never a runtime
    /// condition.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        self.vertices
            .get(id)
            .unwrap_or_else(|| unreachable!("vertex id {id:?} not present in store"))
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        self.vertices
            .get_mut(id)
            .unwrap_or_else(|| unreachable!("vertex id {id:?} not present in store"))
    }
}
