//! Input loaders
//!
//! Read match data from disk into the shared model. Nothing past this module
//! touches the filesystem.
//!
//! Expected layout under the data root:
//!
//! ```text
//! eventing/events/<match_id>.json
//! eventing/lineups/<match_id>.json
//! eventing/values/<match_id>.csv          (optional)
//! tracking/Sample_Game_<id>/Sample_Game_<id>_RawEventsData.csv
//! tracking/Sample_Game_<id>/Sample_Game_<id>_RawTrackingData_Home_Team.csv
//! tracking/Sample_Game_<id>/Sample_Game_<id>_RawTrackingData_Away_Team.csv
//! ```

pub mod metrica;
pub mod statsbomb;
pub mod values;

use std::path::{Path, PathBuf};

pub use metrica::{read_metrica_events, read_metrica_tracking};
pub use statsbomb::{read_statsbomb_events, read_statsbomb_lineups};
pub use values::read_value_signal;

/// File locations for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn statsbomb_events(&self, match_id: &str) -> PathBuf {
        self.root
            .join("eventing")
            .join("events")
            .join(format!("{}.json", match_id))
    }

    pub fn statsbomb_lineups(&self, match_id: &str) -> PathBuf {
        self.root
            .join("eventing")
            .join("lineups")
            .join(format!("{}.json", match_id))
    }

    pub fn value_signal(&self, match_id: &str) -> PathBuf {
        self.root
            .join("eventing")
            .join("values")
            .join(format!("{}.csv", match_id))
    }

    fn metrica_dir(&self, match_id: &str) -> PathBuf {
        self.root
            .join("tracking")
            .join(format!("Sample_Game_{}", match_id))
    }

    pub fn metrica_events(&self, match_id: &str) -> PathBuf {
        self.metrica_dir(match_id)
            .join(format!("Sample_Game_{}_RawEventsData.csv", match_id))
    }

    /// `side` is "Home" or "Away".
    pub fn metrica_tracking(&self, match_id: &str, side: &str) -> PathBuf {
        self.metrica_dir(match_id).join(format!(
            "Sample_Game_{}_RawTrackingData_{}_Team.csv",
            match_id, side
        ))
    }
}

/// Parse an optional float cell; empty and NaN cells are missing.
pub(crate) fn parse_opt_f64(raw: &str) -> std::result::Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("invalid number '{}'", trimmed))?;
    Ok(if value.is_nan() { None } else { Some(value) })
}
