//! Filesystem helpers shared by the storage backends.

mod atomic;

pub use atomic::atomic_write;
