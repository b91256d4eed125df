//! # Pass Extraction
//!
//! Reduces the normalized event stream to the completed passes of one team
//! inside the analysis window.
//!
//! The analysis window ends at the first substitution, the first sending-off,
//! or the last event, whichever comes first, so the network is always drawn
//! from eleven players.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Event, EventKind};

/// Canonical identity of an unordered player pair.
///
/// The two names are sorted lexicographically and joined by an underscore.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}_{}", a, b)
    } else {
        format!("{}_{}", b, a)
    }
}

/// What ended the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowCause {
    Substitution,
    SendingOff,
    MatchEnd,
}

/// Minute cutoff for every later filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub minute: f64,
    pub cause: WindowCause,
}

impl AnalysisWindow {
    /// Earliest of the three candidates; ties favor the substitution, then
    /// the sending-off.
    pub fn earliest(
        first_substitution: Option<f64>,
        first_sending_off: Option<f64>,
        match_end: f64,
    ) -> Self {
        let mut window = AnalysisWindow {
            minute: match_end,
            cause: WindowCause::MatchEnd,
        };
        if let Some(minute) = first_sending_off.filter(|m| *m <= window.minute) {
            window = AnalysisWindow {
                minute,
                cause: WindowCause::SendingOff,
            };
        }
        if let Some(minute) = first_substitution.filter(|m| *m <= window.minute) {
            window = AnalysisWindow {
                minute,
                cause: WindowCause::Substitution,
            };
        }
        window
    }

    pub fn contains(&self, minute: f64) -> bool {
        minute < self.minute
    }
}

/// Last minute of the event stream.
pub fn match_end_minute(events: &[Event]) -> f64 {
    events.iter().map(|e| e.minute).fold(0.0, f64::max)
}

/// First sending-off (second yellow or red) of either team.
pub fn first_sending_off_minute(events: &[Event]) -> Option<f64> {
    events
        .iter()
        .filter(|e| e.is_sending_off())
        .map(|e| e.minute)
        .reduce(f64::min)
}

/// First substitution event of either team.
pub fn first_substitution_minute(events: &[Event]) -> Option<f64> {
    events
        .iter()
        .filter(|e| e.kind == EventKind::Substitution)
        .map(|e| e.minute)
        .reduce(f64::min)
}

/// Raw player name → display name, built once per match from the lineups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameTable {
    nicknames: BTreeMap<String, Option<String>>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, nickname: Option<String>) {
        self.nicknames.insert(name.into(), nickname);
    }

    /// Nickname when one is recorded, the full name otherwise.
    pub fn resolve(&self, name: &str) -> String {
        match self.nicknames.get(name) {
            Some(Some(nickname)) if !nickname.is_empty() => nickname.clone(),
            _ => name.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.nicknames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nicknames.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            nicknames: iter.into_iter().collect(),
        }
    }
}

/// A completed pass, the unit of aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    pub passer: String,
    pub recipient: String,
    /// Pass origin in canonical coordinates
    pub origin: (f64, f64),
    pub minute: f64,
    pub timestamp: Option<String>,
    pub end_frame: Option<u64>,
    /// Fused action value; `None` when unmatched or non-positive
    pub value: Option<f64>,
}

impl PassRecord {
    pub fn pair_key(&self) -> String {
        pair_key(&self.passer, &self.recipient)
    }
}

/// Completed passes by `team` before the window cutoff.
///
/// With a name table both passer and recipient are replaced by their display
/// names. Passes missing a passer, recipient or origin cannot be placed in
/// the network and are skipped.
pub fn extract_passes(
    events: &[Event],
    team: &str,
    window: &AnalysisWindow,
    names: Option<&NameTable>,
) -> Vec<PassRecord> {
    let resolve = |name: &str| match names {
        Some(table) => table.resolve(name),
        None => name.to_string(),
    };

    let mut skipped = 0usize;
    let passes: Vec<PassRecord> = events
        .iter()
        .filter(|e| {
            e.kind == EventKind::Pass
                && e.team == team
                && e.is_successful()
                && window.contains(e.minute)
        })
        .filter_map(|e| {
            let record = match (&e.player, &e.recipient, e.start) {
                (Some(passer), Some(recipient), Some(origin)) => Some(PassRecord {
                    passer: resolve(passer),
                    recipient: resolve(recipient),
                    origin,
                    minute: e.minute,
                    timestamp: e.timestamp.clone(),
                    end_frame: e.end_frame,
                    value: None,
                }),
                _ => None,
            };
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, "passes without passer, recipient or origin skipped");
    }
    passes
}
