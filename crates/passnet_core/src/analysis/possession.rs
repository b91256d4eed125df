//! # Possession Segmenter
//!
//! Splits the tracking timeline into frames where the selected team had the
//! ball (on-ball) and frames where it did not (off-ball), from the event feed
//! alone.
//!
//! ## Algorithm
//! 1. Open the first window at the kickoff's start frame
//! 2. Walk events in order, skipping CHALLENGE and CARD
//! 3. A BALL LOST / BALL OUT event closes the window: at its start frame for
//!    BALL OUT, at its end frame otherwise
//! 4. Look ahead at most 10 events for a PASS, RECOVERY, SET PIECE or SHOT
//! 5. Found: assign `[start, end)` to the closing event's team and reopen the
//!    window at the resuming event's start frame
//! 6. Not found: discard the window; the next resuming event reopens it
//!
//! Frames before kickoff, after the last closed window, or inside a discarded
//! window belong to neither set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::models::{Event, EventKind};

/// Maximum number of events searched for a possession-resuming event.
pub const LOOKAHEAD_EVENTS: usize = 10;

/// One closed possession window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossessionWindow {
    /// First frame (inclusive)
    pub start: u64,
    /// Last frame (exclusive)
    pub end: u64,
    /// Team of the event that closed the window
    pub team: String,
}

/// On-ball/off-ball frame partition for one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PossessionFrames {
    pub on_ball: BTreeSet<u64>,
    pub off_ball: BTreeSet<u64>,
    /// Closed windows in chronological order
    pub windows: Vec<PossessionWindow>,
    /// Windows discarded because no resuming event was found in time
    pub dropped_windows: usize,
}

impl PossessionFrames {
    /// Whether the frame was assigned to either side.
    pub fn is_classified(&self, frame: u64) -> bool {
        self.on_ball.contains(&frame) || self.off_ball.contains(&frame)
    }
}

fn frame_of(value: Option<u64>, event: &Event, which: &str) -> Result<u64> {
    value.ok_or_else(|| {
        NetworkError::missing(format!(
            "{} frame of {:?} event at minute {:.2}",
            which, event.kind, event.minute
        ))
    })
}

/// Segment the event stream into possession frame sets for `team`.
///
/// Fails when the stream has no kickoff or when an event that takes part in
/// segmentation carries no frame index.
pub fn segment_possession(events: &[Event], team: &str) -> Result<PossessionFrames> {
    let kickoff = events
        .iter()
        .find(|e| e.is_kickoff())
        .ok_or_else(|| NetworkError::missing("kickoff event"))?;

    let simple: Vec<&Event> = events
        .iter()
        .filter(|e| !matches!(e.kind, EventKind::Challenge | EventKind::Card))
        .collect();

    let mut frames = PossessionFrames::default();
    let mut window_start = Some(frame_of(kickoff.start_frame, kickoff, "start")?);
    // Frames are claimed by the earliest window that covers them
    let mut claimed_until = 0u64;

    for (idx, event) in simple.iter().enumerate() {
        if window_start.is_none() && event.kind.resumes_possession() {
            window_start = Some(frame_of(event.start_frame, event, "start")?);
            continue;
        }

        if !event.kind.ends_possession() {
            continue;
        }
        let Some(start) = window_start else {
            continue;
        };

        let end = if event.kind == EventKind::BallOut {
            frame_of(event.start_frame, event, "start")?
        } else {
            frame_of(event.end_frame, event, "end")?
        };

        let horizon = (idx + LOOKAHEAD_EVENTS).min(simple.len() - 1);
        let next_start = simple[idx + 1..=horizon]
            .iter()
            .find(|e| e.kind.resumes_possession());

        match next_start {
            Some(next) => {
                let from = start.max(claimed_until);
                let set = if event.team == team {
                    &mut frames.on_ball
                } else {
                    &mut frames.off_ball
                };
                set.extend(from..end);
                claimed_until = claimed_until.max(end);

                frames.windows.push(PossessionWindow {
                    start,
                    end,
                    team: event.team.clone(),
                });
                window_start = Some(frame_of(next.start_frame, next, "start")?);
            }
            None => {
                debug!(
                    start,
                    end,
                    minute = event.minute,
                    "no resuming event within {} events, window dropped",
                    LOOKAHEAD_EVENTS
                );
                frames.dropped_windows += 1;
                window_start = None;
            }
        }
    }

    Ok(frames)
}
