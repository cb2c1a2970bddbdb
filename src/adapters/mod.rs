//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. The file-backed adapters are what the binary uses;
//! the in-memory ones back the tests.

pub mod atomic_file;
pub mod file_channel;
pub mod in_memory_repository;
pub mod json_repository;
pub mod scripted_channel;

pub use file_channel::FileChannel;
pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonTableRepository;
pub use scripted_channel::ScriptedChannel;
