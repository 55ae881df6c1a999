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

pub mod driver;
pub mod kruskal;
pub mod naive;
pub mod parser;

pub use crate::driver::{EdgeOutcome, MsfDriver};
pub use crate::parser::{ParseError, ParsedGraph};
