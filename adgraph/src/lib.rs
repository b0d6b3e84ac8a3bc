//! # adgraph
//!
//! Lazy computation graphs with symbolic reverse-mode differentiation.
//!
//! Graph is built from leaves ([variables](Context::variable),
//! [constants](Context::constant), [placeholders](Context::placeholder))
//! and operators. Asking for a gradient builds new nodes, which are
//! evaluated like any other node by a [Session].
//!
//! ```
//! use adgraph::prelude::*;
//! let mut ctx: Context<f64> = Config::load().context();
//! let x = ctx.placeholder("x");
//! let w = ctx.variable_named(3., "w");
//! let y = ctx.mul(&[w, x])?;
//! let dy_dw = ctx.grad(y, &[w])?;
//! let mut graphs = GraphSet::new();
//! let mut sess = Session::with_registry(&mut graphs);
//! let feed = Feed::from([("x".to_string(), 2.)]);
//! let out = sess.run(&mut ctx, dy_dw, Some(&feed))?;
//! assert_eq!(ctx.value(out)?, Some(2.));
//! # Ok::<(), AdError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod shared;

pub use adgraph_core::{
    context::{Context, ContextId},
    debug::DebugMask,
    error::AdError,
    eval::Feed,
    graph::{Graph, GraphRegistry, GraphSet},
    node::{Node, NodeId, NodeKind},
    scalar::Scalar,
    session::Session,
    utils::contains,
};
pub use config::Config;
pub use shared::SharedGraphSet;

/// Includes everything needed to build and run graphs
pub mod prelude {
    pub use crate::{
        AdError, Config, Context, Feed, Graph, GraphRegistry, GraphSet, NodeId, NodeKind,
        Scalar, Session, SharedGraphSet,
    };
}
