//! SQLite backend for the vitrine site store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every multi-step sequence
//! (get-or-create, list append, status update) executes inside a single
//! connection call, so concurrent requests cannot interleave between the
//! read and the write.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
