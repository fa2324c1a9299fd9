//! Utility types and functions

pub mod diagnostic;
pub mod logger;
pub mod pair;
pub mod span;
