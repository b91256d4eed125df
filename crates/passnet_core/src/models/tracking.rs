//! Frame-sampled player tracking for one team.
//!
//! Player columns follow the `<Side>_<jersey>` naming of the tracking feed.
//! Positions are normalized to [0,1]² and are `None` while a player is off the
//! pitch (bench players before they come on).

use serde::{Deserialize, Serialize};

/// One sampled instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    /// Monotonic frame index
    pub frame: u64,
    pub period: u8,
    /// Seconds since kickoff of the first period
    pub time_s: f64,
    /// Per-player positions, aligned with [`TrackingTable::players`]
    pub positions: Vec<Option<(f64, f64)>>,
    pub ball: Option<(f64, f64)>,
}

/// Tracking data of one team, ordered by frame index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingTable {
    /// "Home" or "Away"
    pub side: String,
    /// Column identities, e.g. `Home_11`
    pub players: Vec<String>,
    pub frames: Vec<TrackingFrame>,
}

impl TrackingTable {
    pub fn new(side: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            side: side.into(),
            players,
            frames: Vec::new(),
        }
    }

    /// Row index of the first frame of the second period.
    pub fn second_period_start(&self) -> Option<usize> {
        self.frames.iter().position(|f| f.period == 2)
    }

    pub fn frame(&self, frame: u64) -> Option<&TrackingFrame> {
        self.frames
            .binary_search_by_key(&frame, |f| f.frame)
            .ok()
            .map(|idx| &self.frames[idx])
    }

    /// First time, in minutes, at which the player column has a position.
    ///
    /// The tracking feed has no substitution event: a bench player's column
    /// turning non-null is the substitution.
    pub fn first_appearance_minute(&self, player_idx: usize) -> Option<f64> {
        self.frames
            .iter()
            .find(|f| f.positions.get(player_idx).copied().flatten().is_some())
            .map(|f| f.time_s / 60.0)
    }

    /// Mean x of every player on the pitch at `frame`.
    pub fn mean_x_at(&self, frame: u64) -> Option<f64> {
        let row = self.frame(frame)?;
        let xs: Vec<f64> = row.positions.iter().flatten().map(|p| p.0).collect();
        if xs.is_empty() {
            None
        } else {
            Some(xs.iter().sum::<f64>() / xs.len() as f64)
        }
    }
}

/// Display name for a tracking column identity: `Home_11` → `Player11`.
pub fn display_name(column_id: &str) -> String {
    let jersey = column_id.rsplit('_').next().unwrap_or(column_id);
    format!("Player{}", jersey)
}
