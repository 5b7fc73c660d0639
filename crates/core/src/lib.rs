//! Functional core for mvclab.
//!
//! Holds the item entity and the storage contracts the server crate
//! implements. Nothing in here performs I/O.

pub mod item;
pub mod storage;
