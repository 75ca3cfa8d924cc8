//! SQLite backend for the commerce store.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
