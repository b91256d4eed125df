//! # Renderer
//!
//! Draws a [`NetworkOutput`](crate::models::NetworkOutput) over a pitch as an
//! SVG document. Pure: the statistics are only read.
//!
//! ## Encoding
//! - Node position: player position table, y up
//! - Node size: pass count mapped from `(0, max)` to `(min_node_size, max_node_size)`
//! - Edge width: pair count mapped from `(0, max)` to `(min_edge_width, max_edge_width)`
//! - Color: value normalized on `(0, max)` through the `nodes_cmap` ramp

pub mod color;
pub mod svg;

pub use color::{ColorRamp, Rgb};
pub use svg::{change_range, render_svg};
