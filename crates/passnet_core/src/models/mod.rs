//! Data model shared by every stage of the build.

pub mod event;
pub mod network;
pub mod tracking;

pub use event::{CardSeverity, Event, EventKind};
pub use network::{BuildDiagnostics, NetworkOutput, PassingNetwork};
pub use tracking::{display_name, TrackingFrame, TrackingTable};
