//! Stages for the eventing feed.

use tracing::{info, warn};

use super::options::BuildOptions;
use super::{MatchData, SourceStrategy};
use crate::analysis::passes::{
    first_sending_off_minute, first_substitution_minute, match_end_minute,
};
use crate::analysis::{
    aggregate_passes, extract_passes, fuse_values, AnalysisWindow, PassRecord, ValueMode,
};
use crate::data::{read_statsbomb_events, read_statsbomb_lineups, read_value_signal, DataPaths};
use crate::error::{NetworkError, Result};
use crate::models::{BuildDiagnostics, PassingNetwork};

/// Pass-origin positions, colored by pass count.
pub const BASIC: SourceStrategy = SourceStrategy {
    name: "eventing basic",
    read: read_match,
    compute_window,
    extract_passes: extract,
    aggregate: aggregate_counts,
};

/// Pass-origin positions, colored by mean action value.
pub const PASS_VALUE: SourceStrategy = SourceStrategy {
    name: "eventing pass value",
    read: read_match_with_values,
    compute_window,
    extract_passes: extract,
    aggregate: aggregate_values,
};

fn opponent_of(data: &MatchData, team: &str) -> Result<String> {
    data.events
        .iter()
        .map(|e| e.team.as_str())
        .find(|t| !t.is_empty() && *t != team)
        .map(str::to_string)
        .ok_or_else(|| NetworkError::missing(format!("opponent of '{}' in event stream", team)))
}

fn read_match(paths: &DataPaths, opts: &BuildOptions) -> Result<MatchData> {
    let names = read_statsbomb_lineups(&paths.statsbomb_lineups(&opts.match_id))?;
    let events = read_statsbomb_events(&paths.statsbomb_events(&opts.match_id))?;

    let mut data = MatchData {
        events,
        names: Some(names),
        ..Default::default()
    };
    data.opponent = opponent_of(&data, &opts.team)?;
    Ok(data)
}

fn read_match_with_values(paths: &DataPaths, opts: &BuildOptions) -> Result<MatchData> {
    let mut data = read_match(paths, opts)?;
    data.values = read_value_signal(&paths.value_signal(&opts.match_id))?;
    Ok(data)
}

/// Substitutions and sending-offs of either team end the window.
fn compute_window(data: &MatchData, _opts: &BuildOptions) -> Result<AnalysisWindow> {
    Ok(AnalysisWindow::earliest(
        first_substitution_minute(&data.events),
        first_sending_off_minute(&data.events),
        match_end_minute(&data.events),
    ))
}

fn extract(data: &MatchData, opts: &BuildOptions, window: &AnalysisWindow) -> Vec<PassRecord> {
    extract_passes(&data.events, &opts.team, window, data.names.as_ref())
}

fn aggregate_counts(
    _data: &MatchData,
    _opts: &BuildOptions,
    passes: &[PassRecord],
    _diagnostics: &mut BuildDiagnostics,
) -> Result<PassingNetwork> {
    Ok(aggregate_passes(passes, ValueMode::Count))
}

fn aggregate_values(
    data: &MatchData,
    opts: &BuildOptions,
    passes: &[PassRecord],
    diagnostics: &mut BuildDiagnostics,
) -> Result<PassingNetwork> {
    let Some(signal) = data.values.as_ref() else {
        warn!(
            match_id = %opts.match_id,
            "no value signal, colors fall back to pass counts"
        );
        return Ok(aggregate_passes(passes, ValueMode::Count));
    };

    let (fused, report) = fuse_values(passes, signal);
    diagnostics.unmatched_values = report.unmatched;
    diagnostics.discarded_values = report.discarded;
    info!(
        matched = report.matched,
        unmatched = report.unmatched,
        "value signal joined onto passes"
    );
    Ok(aggregate_passes(&fused, ValueMode::Fused))
}
