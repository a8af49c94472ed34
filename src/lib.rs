//! Verdant library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the headless demo driver. This library
//! crate exposes the same modules so that `tests/` integration tests can
//! import simulation types, systems, and resources directly.

pub mod shared;
pub mod data;
pub mod environment;
pub mod garden;
pub mod pests;
pub mod economy;
pub mod save;
