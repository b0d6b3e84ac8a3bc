//! # adgraph-core
//!
//! adgraph-core is core part of adgraph, lazy computation graph library
//! with symbolic reverse-mode differentiation.
//! adgraph-core contains definitions of nodes and the arena owning them,
//! topological sorting, evaluation, construction of derivative subgraphs,
//! cached graphs and sessions running them.
//!
//! Differentiation does not compute numbers, it builds new nodes:
//! ```
//! use adgraph_core::{context::Context, session::Session, graph::Graph};
//! let mut ctx = Context::<f64>::new();
//! let a = ctx.variable(2.);
//! let b = ctx.variable(3.);
//! let c = ctx.mul(&[a, b])?;
//! let dc_da = ctx.grad(c, &[a])?;
//! let mut graph = Graph::new();
//! let out = Session::new(&mut graph).run(&mut ctx, dc_da, None)?;
//! assert_eq!(ctx.value(out)?, Some(3.));
//! # Ok::<(), adgraph_core::error::AdError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![forbid(rustdoc::private_intra_doc_links)]
#![forbid(rustdoc::invalid_codeblock_attributes)]
#![forbid(rustdoc::invalid_rust_codeblocks)]
#![forbid(rustdoc::bare_urls)]

/// Derivative subgraph construction, see [Context::grad](context::Context::grad)
pub mod autograd;
/// See [Context](context::Context)
pub mod context;
/// See [DebugMask](debug::DebugMask)
pub mod debug;
/// See [AdError](error::AdError)
pub mod error;
/// Evaluation of nodes, see [Feed](eval::Feed)
pub mod eval;
/// See [Graph](graph::Graph) and [GraphSet](graph::GraphSet)
pub mod graph;
/// See [Node](node::Node)
pub mod node;
/// Constructors of leaves and operators
pub mod ops;
/// See [Scalar](scalar::Scalar)
pub mod scalar;
/// See [Session](session::Session)
pub mod session;
/// Topological sorting
pub mod topo;
/// Some common utilities.
pub mod utils;
