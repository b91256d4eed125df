//! # Network Aggregation
//!
//! Reduces pass records (and, for the positional variant, tracking frames)
//! into the node and edge tables of the passing network.
//!
//! - Node location: elementwise median of pass origins, or of every retained
//!   tracking sample. Medians keep a few mis-annotated locations from dragging
//!   a player across the pitch.
//! - Node/edge size: number of passes.
//! - Node/edge color: number of passes, or the mean fused value ignoring
//!   passes without one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::passes::PassRecord;
use crate::models::{display_name, PassingNetwork, TrackingFrame, TrackingTable};

/// Pitch midline in canonical coordinates.
pub const MIDLINE_X: f64 = 0.5;

/// What the color statistic measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueMode {
    /// Color repeats the pass count
    Count,
    /// Mean of the fused pass values
    Fused,
}

/// Possession context filter for tracking frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Context {
    /// Frames where the team had the ball
    Attacking,
    /// Frames where the opponent had the ball
    Defending,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Attacking => "attacking",
            Context::Defending => "defending",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attacking" => Ok(Context::Attacking),
            "defending" => Ok(Context::Defending),
            other => Err(format!("unknown context '{}' (attacking|defending)", other)),
        }
    }
}

/// Ball-location filter, relative to the selected team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallHalf {
    OwnHalf,
    OpponentHalf,
}

impl BallHalf {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallHalf::OwnHalf => "own_half",
            BallHalf::OpponentHalf => "opponent_half",
        }
    }

    /// Physical side of the pitch this half maps to, given the team's mean x
    /// at kickoff.
    pub fn pitch_side(&self, kickoff_mean_x: f64) -> PitchSide {
        let defends_left = kickoff_mean_x < MIDLINE_X;
        match (self, defends_left) {
            (BallHalf::OwnHalf, true) | (BallHalf::OpponentHalf, false) => PitchSide::Left,
            (BallHalf::OwnHalf, false) | (BallHalf::OpponentHalf, true) => PitchSide::Right,
        }
    }
}

impl fmt::Display for BallHalf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BallHalf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own_half" => Ok(BallHalf::OwnHalf),
            "opponent_half" => Ok(BallHalf::OpponentHalf),
            other => Err(format!("unknown half '{}' (own_half|opponent_half)", other)),
        }
    }
}

/// Physical half of the pitch in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchSide {
    /// x < 0.5
    Left,
    /// x >= 0.5
    Right,
}

impl PitchSide {
    pub fn contains(&self, x: f64) -> bool {
        match self {
            PitchSide::Left => x < MIDLINE_X,
            PitchSide::Right => x >= MIDLINE_X,
        }
    }
}

/// Median of the values; the mean of the two middle values for even counts.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

fn median_point(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    Some((median(&mut xs)?, median(&mut ys)?))
}

/// Running totals for one node or edge.
#[derive(Debug, Default)]
struct Tally {
    count: u32,
    value_sum: f64,
    value_count: u32,
}

impl Tally {
    fn add(&mut self, value: Option<f64>) {
        self.count += 1;
        if let Some(v) = value {
            self.value_sum += v;
            self.value_count += 1;
        }
    }

    fn value(&self, mode: ValueMode) -> Option<f64> {
        match mode {
            ValueMode::Count => Some(self.count as f64),
            ValueMode::Fused if self.value_count > 0 => {
                Some(self.value_sum / self.value_count as f64)
            }
            ValueMode::Fused => None,
        }
    }
}

/// Build all network tables from pass records, placing players at their
/// median pass origin.
pub fn aggregate_passes(passes: &[PassRecord], mode: ValueMode) -> PassingNetwork {
    let mut origins: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    let mut players: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut pairs: BTreeMap<String, Tally> = BTreeMap::new();

    for pass in passes {
        origins.entry(pass.passer.as_str()).or_default().push(pass.origin);
        players.entry(pass.passer.as_str()).or_default().add(pass.value);
        pairs.entry(pass.pair_key()).or_default().add(pass.value);
    }

    let mut network = PassingNetwork::default();
    for (player, points) in &origins {
        if let Some(pos) = median_point(points) {
            network.player_position.insert(player.to_string(), pos);
        }
    }
    for (player, tally) in &players {
        network.player_pass_count.insert(player.to_string(), tally.count);
        if let Some(value) = tally.value(mode) {
            network.player_pass_value.insert(player.to_string(), value);
        }
    }
    for (key, tally) in &pairs {
        network.pair_pass_count.insert(key.clone(), tally.count);
        if let Some(value) = tally.value(mode) {
            network.pair_pass_value.insert(key.clone(), value);
        }
    }
    network
}

/// Frame selection for the positional variant.
#[derive(Debug, Clone, Default)]
pub struct FrameFilter<'a> {
    /// Keep frames strictly before this frame index
    pub before_frame: Option<u64>,
    /// Keep only frames in this possession subset
    pub context_frames: Option<&'a BTreeSet<u64>>,
    /// Keep only frames with the ball on this side
    pub ball_side: Option<PitchSide>,
}

impl FrameFilter<'_> {
    pub fn keeps(&self, frame: &TrackingFrame) -> bool {
        if self.before_frame.is_some_and(|limit| frame.frame >= limit) {
            return false;
        }
        if self
            .context_frames
            .is_some_and(|frames| !frames.contains(&frame.frame))
        {
            return false;
        }
        match self.ball_side {
            Some(side) => frame.ball.is_some_and(|(x, _)| side.contains(x)),
            None => true,
        }
    }
}

/// Median tracking positions per player over the retained frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedPositions {
    /// Keyed by display name (`Player<jersey>`)
    pub positions: BTreeMap<String, (f64, f64)>,
    pub retained_frames: usize,
    /// Players with no sample in any retained frame
    pub omitted: Vec<String>,
}

pub fn tracking_positions(table: &TrackingTable, filter: &FrameFilter) -> TrackedPositions {
    let retained: Vec<&TrackingFrame> = table.frames.iter().filter(|f| filter.keeps(f)).collect();
    if retained.is_empty() {
        warn!(side = %table.side, "no tracking frame left after filtering");
    }

    let mut result = TrackedPositions {
        retained_frames: retained.len(),
        ..Default::default()
    };

    for (idx, column) in table.players.iter().enumerate() {
        let samples: Vec<(f64, f64)> = retained
            .iter()
            .filter_map(|f| f.positions.get(idx).copied().flatten())
            .collect();
        match median_point(&samples) {
            Some(pos) => {
                result.positions.insert(display_name(column), pos);
            }
            None => result.omitted.push(display_name(column)),
        }
    }
    result
}
