//! # Value Fuser
//!
//! Attaches an externally computed action value (VAEP) to each pass.
//!
//! The value signal arrives either pre-combined or as per-action scoring and
//! conceding probabilities. In the second case the value of an action is the
//! change in those probabilities it caused:
//!
//! ```text
//! offensive = scores[i] - scores[i-1]
//! defensive = -(concedes[i] - concedes[i-1])
//! value     = offensive + defensive
//! ```
//!
//! where the previous action's probabilities are swapped when the ball
//! changed team, and reset to zero at the start of a period or after a goal.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::passes::PassRecord;

/// One row of the value signal, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRow {
    pub timestamp: String,
    /// Display identity (nickname when recorded)
    pub player: String,
    pub team: String,
    pub period: u8,
    pub type_name: String,
    pub result_name: String,
    /// Probability of scoring within the next actions
    pub scores: f64,
    /// Probability of conceding within the next actions
    pub concedes: f64,
    /// Pre-combined value, used as-is when present
    pub value: Option<f64>,
}

impl ValueRow {
    fn is_goal(&self) -> bool {
        self.type_name.to_ascii_lowercase().starts_with("shot")
            && self.result_name.eq_ignore_ascii_case("success")
    }
}

/// Combined value of each row from its probabilities.
pub fn combine_values(rows: &[ValueRow]) -> Vec<f64> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let (prev_scores, prev_concedes) = match i.checked_sub(1).map(|p| &rows[p]) {
                None => (0.0, 0.0),
                Some(prev) if prev.period != row.period || prev.is_goal() => (0.0, 0.0),
                Some(prev) if prev.team == row.team => (prev.scores, prev.concedes),
                Some(prev) => (prev.concedes, prev.scores),
            };
            let offensive = row.scores - prev_scores;
            let defensive = -(row.concedes - prev_concedes);
            offensive + defensive
        })
        .collect()
}

/// Lookup from (timestamp, player) to action value.
///
/// Keys are compared exactly; when two rows share a key the first one wins.
#[derive(Debug, Clone, Default)]
pub struct ValueSignal {
    values: FxHashMap<(String, String), f64>,
}

impl ValueSignal {
    pub fn from_rows(rows: &[ValueRow]) -> Self {
        let combined = combine_values(rows);
        let mut values = FxHashMap::default();
        let mut duplicates = 0usize;

        for (row, combined) in rows.iter().zip(combined) {
            let key = (row.timestamp.clone(), row.player.clone());
            if values.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            values.insert(key, row.value.unwrap_or(combined));
        }

        if duplicates > 0 {
            debug!(duplicates, "duplicate (timestamp, player) keys in value signal");
        }
        Self { values }
    }

    pub fn get(&self, timestamp: &str, player: &str) -> Option<f64> {
        self.values
            .get(&(timestamp.to_string(), player.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Join coverage of one fusion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuseReport {
    pub matched: usize,
    pub unmatched: usize,
    /// Matched but non-positive, so dropped
    pub discarded: usize,
}

/// Left-join the value signal onto the passes by (timestamp, passer).
///
/// Only strictly positive values are kept; everything else leaves the pass
/// with no value.
pub fn fuse_values(passes: &[PassRecord], signal: &ValueSignal) -> (Vec<PassRecord>, FuseReport) {
    let mut report = FuseReport::default();

    let fused: Vec<PassRecord> = passes
        .iter()
        .map(|pass| {
            let joined = pass
                .timestamp
                .as_deref()
                .and_then(|ts| signal.get(ts, &pass.passer));

            let value = match joined {
                None => {
                    report.unmatched += 1;
                    None
                }
                Some(v) if v > 0.0 => {
                    report.matched += 1;
                    Some(v)
                }
                Some(_) => {
                    report.matched += 1;
                    report.discarded += 1;
                    None
                }
            };
            PassRecord {
                value,
                ..pass.clone()
            }
        })
        .collect();

    debug!(
        matched = report.matched,
        unmatched = report.unmatched,
        discarded = report.discarded,
        "value signal fused"
    );
    (fused, report)
}
