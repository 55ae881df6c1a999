#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod arc;
mod cluster;
mod engine;
mod forest;
#[cfg(test)]
mod proptests;
mod tree;
mod vertex;

pub use crate::cluster::{ClusterId, ClusterKind, Data};
pub use crate::forest::Forest;
pub use crate::tree::{ExposedPath, Tree};
pub use crate::vertex::{Vertex, VertexId};
