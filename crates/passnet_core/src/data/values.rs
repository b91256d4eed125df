//! Value-signal CSV, produced offline by an action-valuation model.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::analysis::value::{ValueRow, ValueSignal};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct RawValueRow {
    timestamp: String,
    player_name: String,
    #[serde(default)]
    player_nickname: Option<String>,
    team_name: String,
    period: u8,
    type_name: String,
    #[serde(default)]
    result_name: Option<String>,
    scores: f64,
    concedes: f64,
    #[serde(default)]
    vaep_value: Option<f64>,
}

impl From<RawValueRow> for ValueRow {
    fn from(raw: RawValueRow) -> Self {
        let player = match raw.player_nickname {
            Some(nickname) if !nickname.trim().is_empty() => nickname,
            _ => raw.player_name,
        };
        ValueRow {
            timestamp: raw.timestamp,
            player,
            team: raw.team_name,
            period: raw.period,
            type_name: raw.type_name,
            result_name: raw.result_name.unwrap_or_default(),
            scores: raw.scores,
            concedes: raw.concedes,
            value: raw.vaep_value.filter(|v| !v.is_nan()),
        }
    }
}

pub fn parse_value_rows<R: std::io::Read>(reader: R) -> Result<Vec<ValueRow>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawValueRow>() {
        rows.push(result?.into());
    }
    Ok(rows)
}

/// Value signal of one match; `None` when no signal was prepared for it.
pub fn read_value_signal(path: &Path) -> Result<Option<ValueSignal>> {
    if !path.exists() {
        info!(path = %path.display(), "no value signal for match");
        return Ok(None);
    }
    let rows = parse_value_rows(std::fs::File::open(path)?)?;
    if rows.is_empty() {
        info!(path = %path.display(), "value signal is empty");
        return Ok(None);
    }
    let signal = ValueSignal::from_rows(&rows);
    debug!(rows = rows.len(), keys = signal.len(), "value signal read");
    Ok(Some(signal))
}
