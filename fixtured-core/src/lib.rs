//! fixtured-core: users CRUD for a reused execution environment
//!
//! The core is transport-agnostic: it consumes an HTTP-shaped request event
//! (method, path, optional body) and produces a response envelope. Routing is
//! an explicit, fixed-order table; storage access goes through a lazily
//! initialized connection pool that revalidates itself on every use, so a
//! pool torn down between invocations of a reused process is rebuilt
//! transparently.

pub mod body;
pub mod db;
pub mod envelope;
pub mod error;
pub mod event;
pub mod handler;
pub mod routes;

pub use db::pool::{DbConfig, PoolManager};
pub use error::Error;
pub use event::{ApiRequest, ApiResponse};
pub use handler::Handler;
