//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the adapter:
//! - Math types and the named direction table
//! - Handle types for objects living in the object model
//! - Time source for the host environment
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
