//! Utility functions and helpers
//!
//! This module contains file helpers shared by the snapshot code.

pub mod atomic;

pub use atomic::atomic_write_with;
