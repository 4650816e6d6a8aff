//! Position-ordered collections: entities, storage, the cached service,
//! validation and facades.

pub mod core;
pub mod facade;
pub mod service;
pub mod storage;
pub mod validation;
