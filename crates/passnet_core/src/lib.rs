//! # passnet_core - Football Passing Network Builder
//!
//! Builds passing networks (player positions, pass volumes and pass values)
//! from either a discrete eventing feed or a tracking feed, and renders them
//! over a pitch.
//!
//! ## Features
//! - Second-period direction alignment for tracking feeds
//! - Possession segmentation from the event stream alone
//! - Optional fusion with a precomputed action-value signal
//! - Context (attacking/defending) and ball-half filters for tracked positions
//! - Deterministic output: the same inputs serialize byte-identically
//!
//! ## Usage
//! ```no_run
//! use passnet_core::pipeline::{build_network, BuildOptions, PlotType, Source};
//! use passnet_core::{render_svg, PlotConfig};
//!
//! let opts = BuildOptions::new("303715", "Barcelona", Source::Eventing, PlotType::Basic);
//! let output = build_network(&opts)?;
//! let svg = render_svg(&output, &PlotConfig::default());
//! # Ok::<(), passnet_core::NetworkError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::{FieldDimensions, PlotConfig};
pub use error::{NetworkError, Result};
pub use models::{BuildDiagnostics, NetworkOutput, PassingNetwork};
pub use pipeline::{build_network, BuildOptions, PlotType, Source};
pub use render::render_svg;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
