//! Output Generation
//!
//! World snapshots and the text renderer.

pub mod render;
pub mod snapshot;

pub use render::{render, render_rule_legend, WorldView};
pub use snapshot::build_snapshot;
