//! Storage abstraction and implementations for OKR entities.
//!
//! The status engine never touches storage; these repositories are what a
//! caller uses to load inputs and persist computed statuses.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{
    CycleRepository, KeyResultRepository, ObjectiveRepository, Result, Storage, StorageError,
};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
