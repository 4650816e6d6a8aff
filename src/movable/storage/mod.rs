//! Storage collaborators: repositories and the collection cache.

mod cache;
mod collection;
mod json_file;
mod memory;
mod repository;

pub use cache::{CollectionCache, InMemoryCache};
pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use repository::Repository;
