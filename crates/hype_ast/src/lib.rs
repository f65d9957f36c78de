//! hype_ast: Syntax tree shapes handed over by the parser.
//!
//! The tree is plain owned data that derives `serde`, so an external parser
//! can pass it in as JSON. The [`build`] module offers terse constructors for
//! tests, benchmarks and tools that assemble trees in code.

pub mod build;
pub mod node;

pub use node::*;
