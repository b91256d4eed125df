//! Build options and their validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::{BallHalf, Context};
use crate::config::FieldDimensions;
use crate::error::{NetworkError, Result};

/// Data feed the network is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Discrete events with spatial coordinates (StatsBomb)
    Eventing,
    /// Event feed with frame indices plus player tracking (Metrica)
    Tracking,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Eventing => "eventing",
            Source::Tracking => "tracking",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "eventing" => Ok(Source::Eventing),
            "tracking" => Ok(Source::Tracking),
            other => Err(format!("unknown source '{}' (eventing|tracking)", other)),
        }
    }
}

/// Which network variant to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotType {
    /// Pass-origin positions, color by pass count
    Basic,
    /// Pass-origin positions, color by mean action value
    PassValue,
    /// Median tracking positions
    Tracking,
}

impl PlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::Basic => "basic",
            PlotType::PassValue => "pass_value",
            PlotType::Tracking => "tracking",
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "basic" => Ok(PlotType::Basic),
            "pass_value" => Ok(PlotType::PassValue),
            "tracking" => Ok(PlotType::Tracking),
            other => Err(format!(
                "unknown plot type '{}' (basic|pass_value|tracking)",
                other
            )),
        }
    }
}

/// Everything one build needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub match_id: String,
    /// Team name as it appears in the feed ("Home"/"Away" for tracking)
    pub team: String,
    pub source: Source,
    pub plot_type: PlotType,
    pub context: Option<Context>,
    pub half: Option<BallHalf>,
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub field: FieldDimensions,
}

impl BuildOptions {
    pub fn new(
        match_id: impl Into<String>,
        team: impl Into<String>,
        source: Source,
        plot_type: PlotType,
    ) -> Self {
        Self {
            match_id: match_id.into(),
            team: team.into(),
            source,
            plot_type,
            context: None,
            half: None,
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("plots"),
            field: FieldDimensions::default(),
        }
    }

    /// Reject option combinations that have no meaning for the source.
    pub fn validate(&self) -> Result<()> {
        match (self.source, self.plot_type) {
            (Source::Eventing, PlotType::Tracking) => Err(NetworkError::InvalidArgument(
                "cannot plot players at their tracked position with eventing data".into(),
            )),
            (Source::Eventing, _) if self.context.is_some() || self.half.is_some() => {
                Err(NetworkError::InvalidArgument(
                    "context and ball-location filters need tracking data".into(),
                ))
            }
            (Source::Tracking, PlotType::PassValue) => Err(NetworkError::InvalidArgument(
                "pass value is not available for tracking data".into(),
            )),
            (Source::Tracking, _) if self.team != "Home" && self.team != "Away" => {
                Err(NetworkError::InvalidArgument(format!(
                    "tracking teams are 'Home' or 'Away', got '{}'",
                    self.team
                )))
            }
            _ => Ok(()),
        }
    }

    /// Context and half filters only apply to the positional variant.
    pub fn uses_frame_filters(&self) -> bool {
        self.source == Source::Tracking && self.plot_type == PlotType::Tracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_names() {
        for s in ["eventing", "tracking"] {
            assert_eq!(s.parse::<Source>().unwrap().as_str(), s);
        }
        for s in ["basic", "pass_value", "tracking"] {
            assert_eq!(s.parse::<PlotType>().unwrap().as_str(), s);
        }
        assert!("positional".parse::<PlotType>().is_err());
    }

    #[test]
    fn test_validate_rejects_incompatible() {
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Tracking);
        assert!(matches!(
            opts.validate(),
            Err(NetworkError::InvalidArgument(_))
        ));

        let mut opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Basic);
        opts.half = Some(BallHalf::OwnHalf);
        assert!(opts.validate().is_err());

        let mut opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::PassValue);
        opts.context = Some(Context::Attacking);
        assert!(opts.validate().is_err());

        let opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::PassValue);
        assert!(opts.validate().is_err());

        let opts = BuildOptions::new("2", "Barcelona", Source::Tracking, PlotType::Basic);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_supported() {
        let mut opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::Tracking);
        opts.context = Some(Context::Defending);
        opts.half = Some(BallHalf::OpponentHalf);
        assert!(opts.validate().is_ok());
        assert!(opts.uses_frame_filters());

        let opts = BuildOptions::new("303715", "Barcelona", Source::Eventing, PlotType::PassValue);
        assert!(opts.validate().is_ok());
        assert!(!opts.uses_frame_filters());
    }
}
