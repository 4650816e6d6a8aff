//! Core movable domain types and traits.

pub mod entity;
pub mod error;
pub mod sorting;
