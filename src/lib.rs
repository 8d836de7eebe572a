// src/lib.rs

pub mod core;
pub mod persistence;

pub use crate::core::collection::Collection;
pub use crate::core::engine::{Command, SearchEngine, SearchResult};
pub use crate::core::types::Card;
