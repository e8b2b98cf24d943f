//! User-facing command implementations
//!
//! - `graph`: the whole pipeline, from log export to GraphML file

pub mod graph;
