// src/core/mod.rs
pub mod collection;
pub mod engine;
pub mod homonyms;
pub mod syllable;
pub mod types;
