//! Storage Module
//!
//! Flat, single-directory storage for plain-text files. There is no index or
//! metadata database: the directory itself is the source of truth.

pub mod file_store;

pub use file_store::FileStore;
