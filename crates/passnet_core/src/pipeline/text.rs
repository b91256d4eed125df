//! Output identifier, title and legend of a build.

use serde::{Deserialize, Serialize};

use super::options::{BuildOptions, PlotType, Source};
use crate::analysis::BallHalf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInfo {
    /// File stem of the rendered output
    pub plot_name: String,
    pub title: String,
    pub legend: String,
}

/// The other side of a tracking-feed match.
pub fn tracking_opponent(team: &str) -> &'static str {
    if team == "Home" {
        "Away"
    } else {
        "Home"
    }
}

fn context_line(opts: &BuildOptions, opponent: &str) -> Option<String> {
    if !opts.uses_frame_filters() {
        return None;
    }
    let ball_team = opts.half.map(|half| match half {
        BallHalf::OwnHalf => opts.team.as_str(),
        BallHalf::OpponentHalf => opponent,
    });
    let meaning = match (opts.context, ball_team) {
        (Some(context), None) => context.to_string(),
        (None, Some(team)) => format!("ball in {}'s half", team),
        (Some(context), Some(team)) => format!("{}, ball in {}'s half", context, team),
        (None, None) => return None,
    };
    Some(format!("Context: {}", meaning))
}

pub fn text_info(opts: &BuildOptions, opponent: &str) -> TextInfo {
    let (prefix, feed) = match opts.source {
        Source::Eventing => ("statsbomb", "StatsBomb eventing data"),
        Source::Tracking => ("metrica", "Metrica Sports tracking data"),
    };

    let mut plot_name = format!(
        "{}_match{}_{}_{}",
        prefix, opts.match_id, opts.team, opts.plot_type
    );
    if opts.uses_frame_filters() {
        if let Some(context) = opts.context {
            plot_name.push('_');
            plot_name.push_str(context.as_str());
        }
        if let Some(half) = opts.half {
            plot_name.push('_');
            plot_name.push_str(half.as_str());
        }
    }

    let title = format!(
        "{}'s passing network against {} ({})",
        opts.team, opponent, feed
    );

    let location = match opts.plot_type {
        PlotType::Tracking => "players avg. position",
        _ => "pass origin",
    };
    let color = match opts.plot_type {
        PlotType::PassValue => "pass value (VAEP)",
        _ => "number of passes",
    };
    let mut legend = String::new();
    if let Some(line) = context_line(opts, opponent) {
        legend.push_str(&line);
        legend.push('\n');
    }
    legend.push_str(&format!(
        "Location: {}\nSize: number of passes\nColor: {}",
        location, color
    ));

    TextInfo {
        plot_name,
        title,
        legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Context;

    #[test]
    fn test_eventing_text() {
        let opts = BuildOptions::new("303715", "Barcelona", Source::Eventing, PlotType::PassValue);
        let text = text_info(&opts, "Deportivo Alavés");
        assert_eq!(text.plot_name, "statsbomb_match303715_Barcelona_pass_value");
        assert_eq!(
            text.title,
            "Barcelona's passing network against Deportivo Alavés (StatsBomb eventing data)"
        );
        assert_eq!(
            text.legend,
            "Location: pass origin\nSize: number of passes\nColor: pass value (VAEP)"
        );
    }

    #[test]
    fn test_tracking_text_with_filters() {
        let mut opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::Tracking);
        opts.context = Some(Context::Attacking);
        opts.half = Some(BallHalf::OpponentHalf);
        let text = text_info(&opts, tracking_opponent("Home"));

        assert_eq!(text.plot_name, "metrica_match2_Home_tracking_attacking_opponent_half");
        assert_eq!(
            text.title,
            "Home's passing network against Away (Metrica Sports tracking data)"
        );
        assert_eq!(
            text.legend,
            "Context: attacking, ball in Away's half\nLocation: players avg. position\nSize: number of passes\nColor: number of passes"
        );
    }

    #[test]
    fn test_half_only_context_line() {
        let mut opts = BuildOptions::new("1", "Away", Source::Tracking, PlotType::Tracking);
        opts.half = Some(BallHalf::OwnHalf);
        let text = text_info(&opts, tracking_opponent("Away"));
        assert!(text.legend.starts_with("Context: ball in Away's half\n"));
        assert_eq!(text.plot_name, "metrica_match1_Away_tracking_own_half");
    }

    #[test]
    fn test_basic_tracking_ignores_filters() {
        let mut opts = BuildOptions::new("1", "Home", Source::Tracking, PlotType::Basic);
        opts.context = Some(Context::Defending);
        let text = text_info(&opts, "Away");
        assert_eq!(text.plot_name, "metrica_match1_Home_basic");
        assert!(text.legend.starts_with("Location: pass origin"));
    }
}
