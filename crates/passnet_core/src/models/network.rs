//! Passing network output tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node/edge statistics handed to the renderer.
///
/// All tables are keyed by display name (players) or pair key (edges) and
/// ordered, so two builds over the same inputs serialize identically. A
/// player with no retained passes is absent from every table; absence means
/// "not drawn", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassingNetwork {
    /// Median location per player in [0,1]²
    pub player_position: BTreeMap<String, (f64, f64)>,
    /// Passes made per player
    pub player_pass_count: BTreeMap<String, u32>,
    /// Node color value per player; absent when undefined
    pub player_pass_value: BTreeMap<String, f64>,
    /// Passes per unordered pair
    pub pair_pass_count: BTreeMap<String, u32>,
    /// Edge color value per pair; absent when undefined
    pub pair_pass_value: BTreeMap<String, f64>,
}

impl PassingNetwork {
    pub fn max_player_count(&self) -> u32 {
        self.player_pass_count.values().copied().max().unwrap_or(0)
    }

    pub fn max_pair_count(&self) -> u32 {
        self.pair_pass_count.values().copied().max().unwrap_or(0)
    }

    pub fn max_player_value(&self) -> f64 {
        self.player_pass_value.values().copied().fold(0.0, f64::max)
    }

    pub fn max_pair_value(&self) -> f64 {
        self.pair_pass_value.values().copied().fold(0.0, f64::max)
    }
}

/// Non-fatal conditions met while building one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildDiagnostics {
    /// Pass records that survived extraction
    pub passes: usize,
    /// Possession windows discarded for lack of a resuming event
    pub dropped_windows: usize,
    /// Tracking frames left after context/half filtering
    pub retained_frames: usize,
    /// Players with no sample left after filtering
    pub omitted_players: Vec<String>,
    /// Passes without a value-signal row
    pub unmatched_values: usize,
    /// Joined values dropped for being non-positive
    pub discarded_values: usize,
}

/// Complete output contract of one build: the tables plus text metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkOutput {
    /// Stable output identifier (file stem)
    pub plot_name: String,
    pub title: String,
    pub legend: String,
    pub network: PassingNetwork,
    pub diagnostics: BuildDiagnostics,
}
