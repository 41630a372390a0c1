//! Bootstrap layer for the external Swagger UI viewer bundle.
//!
//! This crate is intended to be used by:
//! - `apiview-server` (the standalone docs server)
//!
//! It intentionally contains **no** HTTP serving logic: it models the viewer
//! configuration record, the request interceptor applied to the viewer's
//! outgoing calls, and the generated initializer script the bundle loads at
//! page start.

pub mod config;
pub mod initializer;
pub mod interceptor;
