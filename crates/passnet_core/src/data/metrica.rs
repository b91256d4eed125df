//! Tracking feed (Metrica Sports sample-data CSV).
//!
//! Two file shapes:
//! - the raw event file, one header row, coordinates already in [0,1]²;
//! - one tracking file per team, three header rows (team, jersey, column
//!   names) followed by `Period, Frame, Time [s]`, an x/y pair per player
//!   and the ball x/y pair. Empty or NaN cells mean "not on the pitch".

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::parse_opt_f64;
use crate::error::{NetworkError, Result};
use crate::models::{CardSeverity, Event, EventKind, TrackingFrame, TrackingTable};

const EVENTS_TABLE: &str = "metrica events";

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_err(record: &csv::StringRecord, message: impl Into<String>) -> NetworkError {
    NetworkError::Parse {
        line: line_of(record),
        message: message.into(),
    }
}

fn open(path: &Path, what: &str) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            NetworkError::missing(format!("{} {}", what, path.display()))
        }
        _ => e.into(),
    })
}

/// Header positions of the event columns the pipeline reads.
struct EventColumns {
    team: usize,
    kind: usize,
    subtype: usize,
    period: usize,
    start_frame: usize,
    start_time: usize,
    end_frame: usize,
    from: usize,
    to: usize,
    start_x: usize,
    start_y: usize,
    end_x: usize,
    end_y: usize,
}

impl EventColumns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| NetworkError::missing_column(EVENTS_TABLE, name))
        };
        Ok(Self {
            team: find("Team")?,
            kind: find("Type")?,
            subtype: find("Subtype")?,
            period: find("Period")?,
            start_frame: find("Start Frame")?,
            start_time: find("Start Time [s]")?,
            end_frame: find("End Frame")?,
            from: find("From")?,
            to: find("To")?,
            start_x: find("Start X")?,
            start_y: find("Start Y")?,
            end_x: find("End X")?,
            end_y: find("End Y")?,
        })
    }
}

fn text(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn float(record: &csv::StringRecord, idx: usize) -> Result<Option<f64>> {
    parse_opt_f64(record.get(idx).unwrap_or("")).map_err(|m| parse_err(record, m))
}

fn frame_index(record: &csv::StringRecord, idx: usize) -> Result<Option<u64>> {
    match text(record, idx) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| parse_err(record, format!("invalid frame '{}'", raw))),
    }
}

fn point(x: Option<f64>, y: Option<f64>) -> Option<(f64, f64)> {
    x.zip(y)
}

pub fn parse_metrica_events<R: Read>(reader: R) -> Result<Vec<Event>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = EventColumns::locate(reader.headers()?)?;

    let mut events = Vec::new();
    for result in reader.records() {
        let record = result?;

        let start_time = float(&record, columns.start_time)?
            .ok_or_else(|| parse_err(&record, "missing start time"))?;
        let period = text(&record, columns.period)
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| parse_err(&record, "invalid period"))?;

        let kind = EventKind::parse(record.get(columns.kind).unwrap_or(""));
        let subtype = text(&record, columns.subtype);

        let mut event = Event::new(
            kind,
            text(&record, columns.team).unwrap_or_default(),
            start_time / 60.0,
        );
        event.period = period;
        if event.kind == EventKind::Card {
            event.card = subtype.as_deref().and_then(CardSeverity::parse);
        }
        event.subtype = subtype;
        event.start_frame = frame_index(&record, columns.start_frame)?;
        event.end_frame = frame_index(&record, columns.end_frame)?;
        event.player = text(&record, columns.from);
        event.recipient = text(&record, columns.to);
        event.start = point(
            float(&record, columns.start_x)?,
            float(&record, columns.start_y)?,
        );
        event.end = point(float(&record, columns.end_x)?, float(&record, columns.end_y)?);
        events.push(event);
    }
    Ok(events)
}

pub fn read_metrica_events(path: &Path) -> Result<Vec<Event>> {
    let events = parse_metrica_events(open(path, "event file")?)?;
    debug!(count = events.len(), path = %path.display(), "tracking-feed events read");
    Ok(events)
}

/// Parse one team's tracking file; `side` is "Home" or "Away".
pub fn parse_metrica_tracking<R: Read>(reader: R, side: &str) -> Result<TrackingTable> {
    let table_name = format!("{} tracking", side.to_ascii_lowercase());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();

    let mut header = || -> Result<csv::StringRecord> {
        records
            .next()
            .transpose()?
            .ok_or_else(|| NetworkError::missing(format!("header rows in {}", table_name)))
    };
    let _team_row = header()?;
    let jersey_row = header()?;
    let column_row = header()?;

    for (idx, name) in ["Period", "Frame", "Time [s]"].iter().enumerate() {
        if column_row.get(idx).map(str::trim) != Some(*name) {
            return Err(NetworkError::missing_column(table_name.as_str(), *name));
        }
    }

    let players: Vec<String> = jersey_row
        .iter()
        .map(str::trim)
        .filter(|j| !j.is_empty())
        .map(|j| format!("{}_{}", side, j))
        .collect();
    let ball_col = 3 + 2 * players.len();
    let mut table = TrackingTable::new(side, players);

    for result in records {
        let record = result?;
        if record.len() < ball_col + 2 {
            return Err(parse_err(
                &record,
                format!("expected {} columns, found {}", ball_col + 2, record.len()),
            ));
        }

        let period = text(&record, 0)
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| parse_err(&record, "invalid period"))?;
        let frame = frame_index(&record, 1)?.ok_or_else(|| parse_err(&record, "missing frame"))?;
        let time_s = float(&record, 2)?.ok_or_else(|| parse_err(&record, "missing time"))?;

        let positions = (0..table.players.len())
            .map(|i| Ok(point(float(&record, 3 + 2 * i)?, float(&record, 4 + 2 * i)?)))
            .collect::<Result<Vec<_>>>()?;
        let ball = point(float(&record, ball_col)?, float(&record, ball_col + 1)?);

        table.frames.push(TrackingFrame {
            frame,
            period,
            time_s,
            positions,
            ball,
        });
    }
    Ok(table)
}

pub fn read_metrica_tracking(path: &Path, side: &str) -> Result<TrackingTable> {
    let table = parse_metrica_tracking(open(path, "tracking file")?, side)?;
    debug!(
        side,
        players = table.players.len(),
        frames = table.frames.len(),
        "tracking table read"
    );
    Ok(table)
}
