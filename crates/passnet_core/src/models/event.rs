//! Discrete match events, shared by the eventing and tracking sources.

use serde::{Deserialize, Serialize};

/// Event type.
///
/// Both feeds spell types differently ("Pass" vs "PASS", "Ball Recovery" vs
/// "RECOVERY"); [`EventKind::parse`] folds them onto one set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Pass,
    Shot,
    Card,
    Recovery,
    SetPiece,
    Substitution,
    BallLost,
    BallOut,
    Challenge,
    KickOff,
    Other(String),
}

impl EventKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PASS" => EventKind::Pass,
            "SHOT" => EventKind::Shot,
            "CARD" => EventKind::Card,
            "RECOVERY" | "BALL RECOVERY" => EventKind::Recovery,
            "SET PIECE" => EventKind::SetPiece,
            "SUBSTITUTION" => EventKind::Substitution,
            "BALL LOST" => EventKind::BallLost,
            "BALL OUT" => EventKind::BallOut,
            "CHALLENGE" => EventKind::Challenge,
            "KICK OFF" | "KICKOFF" => EventKind::KickOff,
            _ => EventKind::Other(raw.trim().to_string()),
        }
    }

    /// Types that close the current possession window.
    pub fn ends_possession(&self) -> bool {
        matches!(self, EventKind::BallLost | EventKind::BallOut)
    }

    /// Types that open a new possession window.
    pub fn resumes_possession(&self) -> bool {
        matches!(
            self,
            EventKind::Pass | EventKind::Recovery | EventKind::SetPiece | EventKind::Shot
        )
    }
}

/// Card severity, from either feed's card naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSeverity {
    Yellow,
    SecondYellow,
    Red,
}

impl CardSeverity {
    /// "Yellow Card", "Second Yellow", "Red Card", "RED", "YELLOW".
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        if upper.starts_with("SECOND YELLOW") {
            Some(CardSeverity::SecondYellow)
        } else if upper.starts_with("RED") {
            Some(CardSeverity::Red)
        } else if upper.starts_with("YELLOW") {
            Some(CardSeverity::Yellow)
        } else {
            None
        }
    }

    /// Leaves the team with fewer than eleven players.
    pub fn is_sending_off(&self) -> bool {
        matches!(self, CardSeverity::SecondYellow | CardSeverity::Red)
    }
}

/// A single discrete match occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Feed-specific subtype (Metrica "KICK OFF", "RED", ...)
    pub subtype: Option<String>,
    pub team: String,
    pub period: u8,
    /// Match minute (fractional for tracking feeds)
    pub minute: f64,
    /// Eventing timestamp, the join key for the value signal
    pub timestamp: Option<String>,
    pub start_frame: Option<u64>,
    pub end_frame: Option<u64>,
    /// Start location in [0,1]² canonical coordinates
    pub start: Option<(f64, f64)>,
    /// End location in [0,1]² canonical coordinates
    pub end: Option<(f64, f64)>,
    pub player: Option<String>,
    pub recipient: Option<String>,
    /// Failure indicator; `None` means the action was completed
    pub outcome: Option<String>,
    pub card: Option<CardSeverity>,
}

impl Event {
    pub fn new(kind: EventKind, team: impl Into<String>, minute: f64) -> Self {
        Self {
            kind,
            subtype: None,
            team: team.into(),
            period: 1,
            minute,
            timestamp: None,
            start_frame: None,
            end_frame: None,
            start: None,
            end: None,
            player: None,
            recipient: None,
            outcome: None,
            card: None,
        }
    }

    pub fn is_kickoff(&self) -> bool {
        self.kind == EventKind::KickOff
            || self
                .subtype
                .as_deref()
                .is_some_and(|s| EventKind::parse(s) == EventKind::KickOff)
    }

    pub fn is_sending_off(&self) -> bool {
        self.card.is_some_and(|c| c.is_sending_off())
    }

    pub fn is_successful(&self) -> bool {
        self.outcome.is_none()
    }
}
