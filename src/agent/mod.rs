//! Agent module.
//!
//! Contains the [`Agent`] record: role, goal and backstory.

pub mod core;

pub use self::core::Agent;
