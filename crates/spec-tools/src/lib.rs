//! Shared OpenAPI document tooling.
//!
//! This crate is intended to be used by:
//! - `apiview-server` (the standalone docs server)
//!
//! It loads, validates, and classifies the specification document the viewer
//! renders. It intentionally contains **no** HTTP serving logic and **no**
//! viewer configuration.

pub mod content_type;
pub mod document;
pub mod error;
