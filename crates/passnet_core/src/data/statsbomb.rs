//! Eventing feed (StatsBomb open-data JSON).
//!
//! Only the fields the network needs are deserialized; everything else in the
//! feed is ignored. Locations are converted to canonical coordinates on the
//! way in. The feed already reports every team attacking left to right, so no
//! period flip is needed.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::analysis::coordinates::eventing_to_canonical;
use crate::analysis::passes::NameTable;
use crate::error::{NetworkError, Result};
use crate::models::{CardSeverity, Event, EventKind};

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawPass {
    recipient: Option<Named>,
    outcome: Option<Named>,
    end_location: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawCardHolder {
    card: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: Named,
    team: Option<Named>,
    #[serde(default)]
    period: u8,
    #[serde(default)]
    minute: u32,
    timestamp: Option<String>,
    player: Option<Named>,
    location: Option<Vec<f64>>,
    pass: Option<RawPass>,
    foul_committed: Option<RawCardHolder>,
    bad_behaviour: Option<RawCardHolder>,
}

#[derive(Debug, Deserialize)]
struct RawLineupPlayer {
    player_name: String,
    player_nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLineup {
    lineup: Vec<RawLineupPlayer>,
}

fn to_point(location: &Option<Vec<f64>>) -> Option<(f64, f64)> {
    match location.as_deref() {
        Some([x, y, ..]) => Some(eventing_to_canonical((*x, *y))),
        _ => None,
    }
}

fn card_of(holder: &Option<RawCardHolder>) -> Option<CardSeverity> {
    holder
        .as_ref()
        .and_then(|h| h.card.as_ref())
        .and_then(|c| CardSeverity::parse(&c.name))
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let mut event = Event::new(
            EventKind::parse(&raw.kind.name),
            raw.team.map(|t| t.name).unwrap_or_default(),
            raw.minute as f64,
        );
        event.period = raw.period;
        event.start = to_point(&raw.location);
        event.card = card_of(&raw.foul_committed).or_else(|| card_of(&raw.bad_behaviour));
        event.player = raw.player.map(|p| p.name);
        event.timestamp = raw.timestamp;

        if let Some(pass) = raw.pass {
            event.end = to_point(&pass.end_location);
            event.recipient = pass.recipient.map(|r| r.name);
            event.outcome = pass.outcome.map(|o| o.name);
        }
        event
    }
}

pub fn parse_statsbomb_events(json: &str) -> Result<Vec<Event>> {
    let raw: Vec<RawEvent> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(Event::from).collect())
}

pub fn read_statsbomb_events(path: &Path) -> Result<Vec<Event>> {
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            NetworkError::missing(format!("event file {}", path.display()))
        }
        _ => e.into(),
    })?;
    let events = parse_statsbomb_events(&json)?;
    debug!(count = events.len(), path = %path.display(), "eventing events read");
    Ok(events)
}

/// Name table of both lineups: full name → nickname.
pub fn parse_statsbomb_lineups(json: &str) -> Result<NameTable> {
    let raw: Vec<RawLineup> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .flat_map(|team| team.lineup)
        .map(|p| (p.player_name, p.player_nickname))
        .collect())
}

pub fn read_statsbomb_lineups(path: &Path) -> Result<NameTable> {
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            NetworkError::missing(format!("lineup file {}", path.display()))
        }
        _ => e.into(),
    })?;
    parse_statsbomb_lineups(&json)
}
