//! Stages for the tracking feed.
//!
//! The tracking feed's events carry frame indices instead of a substitution
//! type. The first substitution is read off the tracking table instead: the
//! first bench column (the twelfth player pair) turning non-null.

use tracing::{debug, info};

use super::options::BuildOptions;
use super::text::tracking_opponent;
use super::{MatchData, SourceStrategy};
use crate::analysis::passes::{first_sending_off_minute, match_end_minute};
use crate::analysis::{
    aggregate_passes, extract_passes, segment_possession, to_single_playing_direction,
    tracking_positions, AnalysisWindow, Context, FrameFilter, PassRecord, ValueMode,
};
use crate::data::{read_metrica_events, read_metrica_tracking, DataPaths};
use crate::error::{NetworkError, Result};
use crate::models::{BuildDiagnostics, PassingNetwork};

/// Column index of the first bench player in a tracking table.
pub const FIRST_BENCH_COLUMN: usize = 11;

/// Pass-origin positions from the tracking feed's event file.
pub const BASIC: SourceStrategy = SourceStrategy {
    name: "tracking basic",
    read: read_match,
    compute_window,
    extract_passes: extract,
    aggregate: aggregate_counts,
};

/// Median tracked positions, with optional context and half filters.
pub const POSITIONAL: SourceStrategy = SourceStrategy {
    name: "tracking positional",
    read: read_match,
    compute_window,
    extract_passes: extract,
    aggregate: aggregate_positions,
};

fn read_match(paths: &DataPaths, opts: &BuildOptions) -> Result<MatchData> {
    let events = read_metrica_events(&paths.metrica_events(&opts.match_id))?;
    let home = read_metrica_tracking(&paths.metrica_tracking(&opts.match_id, "Home"), "Home")?;
    let away = read_metrica_tracking(&paths.metrica_tracking(&opts.match_id, "Away"), "Away")?;

    let (home, away, events) = to_single_playing_direction(&home, &away, &events);
    let tracking = if opts.team == "Home" { home } else { away };

    Ok(MatchData {
        events,
        tracking: Some(tracking),
        opponent: tracking_opponent(&opts.team).to_string(),
        ..Default::default()
    })
}

fn compute_window(data: &MatchData, _opts: &BuildOptions) -> Result<AnalysisWindow> {
    let first_substitution = data
        .tracking
        .as_ref()
        .and_then(|t| t.first_appearance_minute(FIRST_BENCH_COLUMN));
    Ok(AnalysisWindow::earliest(
        first_substitution,
        first_sending_off_minute(&data.events),
        match_end_minute(&data.events),
    ))
}

fn extract(data: &MatchData, opts: &BuildOptions, window: &AnalysisWindow) -> Vec<PassRecord> {
    extract_passes(&data.events, &opts.team, window, None)
}

fn aggregate_counts(
    _data: &MatchData,
    _opts: &BuildOptions,
    passes: &[PassRecord],
    _diagnostics: &mut BuildDiagnostics,
) -> Result<PassingNetwork> {
    Ok(aggregate_passes(passes, ValueMode::Count))
}

/// Pass counts as in the basic variant; positions from the tracking table.
///
/// Frames are kept when they precede the last pass's end frame, fall in the
/// requested possession context, and have the ball on the requested half.
fn aggregate_positions(
    data: &MatchData,
    opts: &BuildOptions,
    passes: &[PassRecord],
    diagnostics: &mut BuildDiagnostics,
) -> Result<PassingNetwork> {
    let table = data
        .tracking
        .as_ref()
        .ok_or_else(|| NetworkError::missing(format!("{} tracking table", opts.team)))?;

    let mut network = aggregate_passes(passes, ValueMode::Count);

    let possession = match opts.context {
        Some(_) => {
            let frames = segment_possession(&data.events, &opts.team)?;
            diagnostics.dropped_windows = frames.dropped_windows;
            Some(frames)
        }
        None => None,
    };
    let context_frames = possession.as_ref().zip(opts.context).map(|(frames, context)| {
        match context {
            Context::Attacking => &frames.on_ball,
            Context::Defending => &frames.off_ball,
        }
    });

    let ball_side = match opts.half {
        Some(half) => {
            let kickoff = data
                .events
                .iter()
                .find(|e| e.is_kickoff())
                .and_then(|e| e.start_frame)
                .ok_or_else(|| NetworkError::missing("kickoff frame"))?;
            let mean_x = table.mean_x_at(kickoff).ok_or_else(|| {
                NetworkError::missing(format!("{} tracking at kickoff frame {}", opts.team, kickoff))
            })?;
            let side = half.pitch_side(mean_x);
            debug!(kickoff, mean_x, ?side, "ball half resolved");
            Some(side)
        }
        None => None,
    };

    let filter = FrameFilter {
        before_frame: passes.iter().filter_map(|p| p.end_frame).max(),
        context_frames,
        ball_side,
    };
    let tracked = tracking_positions(table, &filter);

    diagnostics.retained_frames = tracked.retained_frames;
    if !tracked.omitted.is_empty() {
        debug!(
            players = ?tracked.omitted,
            "players without tracking samples after filtering"
        );
    }
    diagnostics.omitted_players = tracked.omitted;
    info!(
        retained_frames = tracked.retained_frames,
        players = tracked.positions.len(),
        "tracking positions computed"
    );

    network.player_position = tracked.positions;
    Ok(network)
}
