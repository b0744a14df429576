//! garnet_core: Core utilities shared by the garnet front end.
//!
//! Provides the source location types used by tokens and diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
