//! # Analysis Module
//!
//! The pure core of the build: no I/O, deterministic in its inputs.
//!
//! - `coordinates` - Coordinate range conversion and playing-direction alignment
//! - `possession` - On-ball/off-ball frame segmentation
//! - `passes` - Analysis window, name resolution and pass extraction
//! - `value` - Action-value fusion onto passes
//! - `aggregate` - Node/edge statistics and tracking-based positions

pub mod aggregate;
pub mod coordinates;
pub mod passes;
pub mod possession;
pub mod value;

pub use aggregate::{
    aggregate_passes, median, tracking_positions, BallHalf, Context, FrameFilter, PitchSide,
    TrackedPositions, ValueMode,
};
pub use coordinates::{
    eventing_to_canonical, point_to_canonical, reflect, to_metric, to_single_playing_direction,
};
pub use passes::{extract_passes, pair_key, AnalysisWindow, NameTable, PassRecord, WindowCause};
pub use possession::{segment_possession, PossessionFrames, PossessionWindow, LOOKAHEAD_EVENTS};
pub use value::{combine_values, fuse_values, FuseReport, ValueRow, ValueSignal};
