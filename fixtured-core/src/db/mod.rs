//! Database layer - pool lifecycle and the users repository
//!
//! The pool is the only shared mutable state in the process. Everything else
//! re-reads storage on every request; nothing is cached across invocations.

pub mod migrations;
pub mod pool;
pub mod users;

pub use pool::{DbConfig, PoolManager};
pub use users::{User, UserRepo};
