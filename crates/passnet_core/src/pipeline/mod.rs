//! # Build Pipeline
//!
//! One fixed sequence of stages, parameterized per data source by a
//! [`SourceStrategy`] record of plain function pointers.
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌────────────────┐   ┌───────────┐
//! │ read         │──▶│ compute_window │──▶│ extract_passes │──▶│ aggregate │
//! │ (I/O, align) │   │ (minute cutoff)│   │ (PassRecords)  │   │ (tables)  │
//! └──────────────┘   └────────────────┘   └────────────────┘   └───────────┘
//!                                                                    │
//!                                                     text info ─────┤
//!                                                                    ▼
//!                                                             NetworkOutput
//! ```
//!
//! Only `read` touches the filesystem. Everything after it is a pure
//! function of [`MatchData`] and [`BuildOptions`], so two builds over the
//! same inputs produce identical output.
//!
//! | source   | plot type    | strategy                    |
//! |----------|--------------|-----------------------------|
//! | eventing | basic        | [`eventing::BASIC`]         |
//! | eventing | pass_value   | [`eventing::PASS_VALUE`]    |
//! | tracking | basic        | [`tracking::BASIC`]         |
//! | tracking | tracking     | [`tracking::POSITIONAL`]    |

pub mod eventing;
pub mod options;
pub mod text;
pub mod tracking;

use tracing::{debug, info};

pub use options::{BuildOptions, PlotType, Source};
pub use text::{text_info, TextInfo};

use crate::analysis::{AnalysisWindow, NameTable, PassRecord, ValueSignal};
use crate::data::DataPaths;
use crate::error::{NetworkError, Result};
use crate::models::{BuildDiagnostics, Event, NetworkOutput, PassingNetwork, TrackingTable};

/// Everything read for one match, already direction-normalized.
#[derive(Debug, Clone, Default)]
pub struct MatchData {
    pub events: Vec<Event>,
    /// Display-name table (eventing only)
    pub names: Option<NameTable>,
    /// Selected team's tracking table (tracking only)
    pub tracking: Option<TrackingTable>,
    /// Action values (eventing pass-value only)
    pub values: Option<ValueSignal>,
    pub opponent: String,
}

pub type ReadFn = fn(&DataPaths, &BuildOptions) -> Result<MatchData>;
pub type WindowFn = fn(&MatchData, &BuildOptions) -> Result<AnalysisWindow>;
pub type ExtractFn = fn(&MatchData, &BuildOptions, &AnalysisWindow) -> Vec<PassRecord>;
pub type AggregateFn =
    fn(&MatchData, &BuildOptions, &[PassRecord], &mut BuildDiagnostics) -> Result<PassingNetwork>;

/// Per-source stage functions.
#[derive(Debug, Clone, Copy)]
pub struct SourceStrategy {
    pub name: &'static str,
    pub read: ReadFn,
    pub compute_window: WindowFn,
    pub extract_passes: ExtractFn,
    pub aggregate: AggregateFn,
}

/// Strategy for a source/plot-type pair; fails on unsupported combinations.
pub fn strategy_for(source: Source, plot_type: PlotType) -> Result<SourceStrategy> {
    match (source, plot_type) {
        (Source::Eventing, PlotType::Basic) => Ok(eventing::BASIC),
        (Source::Eventing, PlotType::PassValue) => Ok(eventing::PASS_VALUE),
        (Source::Tracking, PlotType::Basic) => Ok(tracking::BASIC),
        (Source::Tracking, PlotType::Tracking) => Ok(tracking::POSITIONAL),
        (source, plot_type) => Err(NetworkError::InvalidArgument(format!(
            "no {} network for {} data",
            plot_type, source
        ))),
    }
}

/// Read the match from `opts.data_dir` and build its network.
pub fn build_network(opts: &BuildOptions) -> Result<NetworkOutput> {
    opts.validate()?;
    let strategy = strategy_for(opts.source, opts.plot_type)?;

    let paths = DataPaths::new(&opts.data_dir);
    let data = (strategy.read)(&paths, opts)?;
    info!(
        strategy = strategy.name,
        match_id = %opts.match_id,
        events = data.events.len(),
        "match data read"
    );
    build_from_data(&strategy, &data, opts)
}

/// Run every stage after `read` over already loaded data.
pub fn build_from_data(
    strategy: &SourceStrategy,
    data: &MatchData,
    opts: &BuildOptions,
) -> Result<NetworkOutput> {
    opts.validate()?;

    let window = (strategy.compute_window)(data, opts)?;
    info!(minute = window.minute, cause = ?window.cause, "analysis window");

    let passes = (strategy.extract_passes)(data, opts, &window);
    info!(team = %opts.team, passes = passes.len(), "passes extracted");

    let mut diagnostics = BuildDiagnostics {
        passes: passes.len(),
        ..Default::default()
    };
    let network = (strategy.aggregate)(data, opts, &passes, &mut diagnostics)?;
    debug!(
        players = network.player_pass_count.len(),
        pairs = network.pair_pass_count.len(),
        dropped_windows = diagnostics.dropped_windows,
        "network aggregated"
    );

    let TextInfo {
        plot_name,
        title,
        legend,
    } = text_info(opts, &data.opponent);

    Ok(NetworkOutput {
        plot_name,
        title,
        legend,
        network,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BallHalf, Context, ValueRow};
    use crate::models::{CardSeverity, EventKind, TrackingFrame};
    use std::fs;
    use std::path::Path;

    // ---- eventing fixtures ----

    fn sb_pass(team: &str, from: &str, to: &str, minute: f64, ts: &str) -> Event {
        let mut e = Event::new(EventKind::Pass, team, minute);
        e.player = Some(from.into());
        e.recipient = Some(to.into());
        e.start = Some((0.25 + minute / 1000.0, 0.5));
        e.timestamp = Some(ts.into());
        e
    }

    fn eventing_data(events: Vec<Event>) -> MatchData {
        MatchData {
            events,
            names: Some(NameTable::new()),
            opponent: "B".into(),
            ..Default::default()
        }
    }

    fn value_row(ts: &str, player: &str, value: f64) -> ValueRow {
        ValueRow {
            timestamp: ts.into(),
            player: player.into(),
            team: "A".into(),
            period: 1,
            type_name: "pass".into(),
            result_name: "success".into(),
            scores: 0.0,
            concedes: 0.0,
            value: Some(value),
        }
    }

    #[test]
    fn test_single_pass_network() {
        let data = eventing_data(vec![
            sb_pass("A", "A", "B", 10.0, "00:10:00.000"),
            Event::new(EventKind::Shot, "B", 80.0),
        ]);
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Basic);
        let out = build_from_data(&eventing::BASIC, &data, &opts).unwrap();

        let net = &out.network;
        assert_eq!(net.player_pass_count.len(), 1);
        assert_eq!(net.player_pass_count["A"], 1);
        assert!(!net.player_pass_count.contains_key("B"));
        assert_eq!(net.pair_pass_count.len(), 1);
        assert_eq!(net.pair_pass_count["A_B"], 1);
        assert_eq!(net.player_pass_value["A"], 1.0);
        assert_eq!(out.diagnostics.passes, 1);
        assert_eq!(out.plot_name, "statsbomb_match1_A_basic");
    }

    #[test]
    fn test_window_cuts_after_sending_off() {
        let mut red = Event::new(EventKind::Other("Foul Committed".into()), "B", 30.0);
        red.card = Some(CardSeverity::Red);
        let data = eventing_data(vec![
            sb_pass("A", "A", "B", 10.0, "t1"),
            red,
            sb_pass("A", "A", "C", 31.0, "t2"),
            Event::new(EventKind::Shot, "B", 90.0),
        ]);
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Basic);
        let out = build_from_data(&eventing::BASIC, &data, &opts).unwrap();
        assert_eq!(out.network.player_pass_count["A"], 1);
        assert!(!out.network.pair_pass_count.contains_key("A_C"));
    }

    #[test]
    fn test_pass_value_network() {
        let mut data = eventing_data(vec![
            sb_pass("A", "A", "B", 1.0, "t1"),
            sb_pass("A", "A", "B", 2.0, "t2"),
            sb_pass("A", "B", "A", 3.0, "t3"),
            Event::new(EventKind::Shot, "B", 90.0),
        ]);
        data.values = Some(ValueSignal::from_rows(&[
            value_row("t1", "A", 0.2),
            value_row("t2", "A", -0.1),
        ]));
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::PassValue);
        let out = build_from_data(&eventing::PASS_VALUE, &data, &opts).unwrap();

        let net = &out.network;
        assert_eq!(net.player_pass_count["A"], 2);
        assert_eq!(net.player_pass_count["B"], 1);
        assert_eq!(net.player_pass_value.get("A"), Some(&0.2));
        // Only null values: undefined, not zero
        assert_eq!(net.player_pass_value.get("B"), None);
        assert_eq!(net.pair_pass_count["A_B"], 3);
        assert_eq!(net.pair_pass_value["A_B"], 0.2);
        assert_eq!(out.diagnostics.unmatched_values, 1);
        assert_eq!(out.diagnostics.discarded_values, 1);
        assert!(out.legend.ends_with("Color: pass value (VAEP)"));
    }

    #[test]
    fn test_pass_value_without_signal_degrades_to_counts() {
        let data = eventing_data(vec![
            sb_pass("A", "A", "B", 1.0, "t1"),
            Event::new(EventKind::Shot, "B", 90.0),
        ]);
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::PassValue);
        let out = build_from_data(&eventing::PASS_VALUE, &data, &opts).unwrap();
        assert_eq!(out.network.player_pass_value["A"], 1.0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let data = eventing_data(vec![
            sb_pass("A", "Xavi", "Iniesta", 1.0, "t1"),
            sb_pass("A", "Iniesta", "Xavi", 2.0, "t2"),
            sb_pass("A", "Busquets", "Xavi", 3.0, "t3"),
            sb_pass("A", "Xavi", "Busquets", 4.0, "t4"),
            Event::new(EventKind::Shot, "B", 90.0),
        ]);
        let opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Basic);
        let first = build_from_data(&eventing::BASIC, &data, &opts).unwrap();
        let second = build_from_data(&eventing::BASIC, &data, &opts).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_options_fail_before_reading() {
        let mut opts = BuildOptions::new("1", "A", Source::Eventing, PlotType::Basic);
        opts.data_dir = "/nonexistent".into();
        opts.context = Some(Context::Attacking);
        let err = build_network(&opts).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidArgument(_)));
        assert!(!err.is_fatal());

        assert!(strategy_for(Source::Tracking, PlotType::PassValue).is_err());
    }

    // ---- tracking fixtures ----

    const FPS: f64 = 25.0;

    fn mt_event(team: &str, kind: &str, subtype: Option<&str>, start: u64, end: u64) -> Event {
        let mut e = Event::new(EventKind::parse(kind), team, start as f64 / FPS / 60.0);
        e.subtype = subtype.map(str::to_string);
        e.start_frame = Some(start);
        e.end_frame = Some(end);
        e
    }

    fn mt_pass(team: &str, from: &str, to: &str, start: u64, end: u64, x: f64) -> Event {
        let mut e = mt_event(team, "PASS", None, start, end);
        e.player = Some(from.into());
        e.recipient = Some(to.into());
        e.start = Some((x, 0.5));
        e
    }

    /// Home attacks rightward; Player1 moves up the pitch at frame 50, the
    /// ball crosses the midline at the same time.
    fn tracking_data() -> MatchData {
        let events = vec![
            mt_event("Home", "SET PIECE", Some("KICK OFF"), 0, 0),
            mt_pass("Home", "Player1", "Player2", 0, 5, 0.3),
            mt_event("Home", "BALL LOST", Some("INTERCEPTION"), 20, 30),
            mt_event("Away", "RECOVERY", None, 35, 35),
            mt_event("Away", "BALL OUT", None, 60, 60),
            mt_event("Home", "SET PIECE", Some("THROW IN"), 70, 70),
            mt_pass("Home", "Player2", "Player1", 75, 100, 0.6),
            mt_event("Home", "BALL LOST", Some("INTERCEPTION"), 110, 115),
        ];

        let mut table = TrackingTable::new("Home", vec!["Home_1".into(), "Home_2".into()]);
        for frame in 0..120u64 {
            let (p1_x, ball_x) = if frame < 50 { (0.2, 0.3) } else { (0.4, 0.7) };
            table.frames.push(TrackingFrame {
                frame,
                period: 1,
                time_s: frame as f64 / FPS,
                positions: vec![Some((p1_x, 0.5)), Some((0.3, 0.5))],
                ball: Some((ball_x, 0.5)),
            });
        }

        MatchData {
            events,
            tracking: Some(table),
            opponent: "Away".into(),
            ..Default::default()
        }
    }

    fn positional(context: Option<Context>, half: Option<BallHalf>) -> NetworkOutput {
        let mut opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::Tracking);
        opts.context = context;
        opts.half = half;
        build_from_data(&tracking::POSITIONAL, &tracking_data(), &opts).unwrap()
    }

    #[test]
    fn test_tracking_basic_uses_pass_origins() {
        let opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::Basic);
        let out = build_from_data(&tracking::BASIC, &tracking_data(), &opts).unwrap();
        assert_eq!(out.network.player_position["Player1"], (0.3, 0.5));
        assert_eq!(out.network.player_position["Player2"], (0.6, 0.5));
        assert_eq!(out.network.pair_pass_count["Player1_Player2"], 2);
    }

    #[test]
    fn test_positional_truncates_to_last_pass() {
        let out = positional(None, None);
        // Frames 0..100: half at x=0.2, half at x=0.4
        assert_eq!(out.diagnostics.retained_frames, 100);
        let (x, _) = out.network.player_position["Player1"];
        assert!((x - 0.3).abs() < 1e-12);
        assert_eq!(out.network.player_position["Player2"], (0.3, 0.5));
        assert_eq!(out.network.player_pass_count["Player1"], 1);
    }

    #[test]
    fn test_positional_context_and_half_compose() {
        // On-ball [0,30) intersected with ball in own (left) half
        let out = positional(Some(Context::Attacking), Some(BallHalf::OwnHalf));
        assert_eq!(out.diagnostics.retained_frames, 30);
        assert_eq!(out.network.player_position["Player1"], (0.2, 0.5));
        assert_eq!(out.diagnostics.dropped_windows, 1);
        assert_eq!(out.plot_name, "metrica_match2_Home_tracking_attacking_own_half");

        // Off-ball [35,60) with the ball in the opponent half: [50,60)
        let out = positional(Some(Context::Defending), Some(BallHalf::OpponentHalf));
        assert_eq!(out.diagnostics.retained_frames, 10);
        assert_eq!(out.network.player_position["Player1"], (0.4, 0.5));
    }

    #[test]
    fn test_positional_empty_filter_omits_players() {
        // Attacking frames never have the ball in the opponent half
        let out = positional(Some(Context::Attacking), Some(BallHalf::OpponentHalf));
        assert_eq!(out.diagnostics.retained_frames, 0);
        assert!(out.network.player_position.is_empty());
        assert_eq!(out.diagnostics.omitted_players, vec!["Player1", "Player2"]);
        // Counts do not depend on frame filters
        assert_eq!(out.network.player_pass_count.len(), 2);
    }

    #[test]
    fn test_positional_needs_kickoff_for_context() {
        let mut data = tracking_data();
        data.events.remove(0);
        let mut opts = BuildOptions::new("2", "Home", Source::Tracking, PlotType::Tracking);
        opts.context = Some(Context::Attacking);
        let err = build_from_data(&tracking::POSITIONAL, &data, &opts).unwrap_err();
        assert!(matches!(err, NetworkError::MissingInput { .. }));
        assert!(err.is_fatal());
    }

    // ---- end to end from disk ----

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_eventing_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        write(
            &paths.statsbomb_lineups("7"),
            r#"[{"team_name": "A", "lineup": [
                {"player_name": "Alpha Long Name", "player_nickname": "Alpha"},
                {"player_name": "Beta", "player_nickname": null}]},
                {"team_name": "B", "lineup": []}]"#,
        );
        write(
            &paths.statsbomb_events("7"),
            r#"[
                {"type": {"name": "Pass"}, "team": {"name": "A"}, "period": 1, "minute": 2,
                 "timestamp": "00:02:00.000", "player": {"name": "Alpha Long Name"},
                 "location": [30.0, 20.0], "pass": {"recipient": {"name": "Beta"}}},
                {"type": {"name": "Shot"}, "team": {"name": "B"}, "period": 2, "minute": 88}
            ]"#,
        );

        let mut opts = BuildOptions::new("7", "A", Source::Eventing, PlotType::Basic);
        opts.data_dir = dir.path().to_path_buf();
        let out = build_network(&opts).unwrap();

        assert_eq!(out.title, "A's passing network against B (StatsBomb eventing data)");
        assert_eq!(out.network.player_position["Alpha"], (0.25, 0.75));
        assert_eq!(out.network.pair_pass_count["Alpha_Beta"], 1);
    }

    #[test]
    fn test_build_tracking_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        write(
            &paths.metrica_events("1"),
            "Team,Type,Subtype,Period,Start Frame,Start Time [s],End Frame,End Time [s],From,To,Start X,Start Y,End X,End Y\n\
             Home,SET PIECE,KICK OFF,1,1,0.04,1,0.04,Player1,,,,,\n\
             Home,PASS,,1,1,0.04,2,0.08,Player1,Player2,0.40,0.50,0.50,0.50\n\
             Away,BALL OUT,,2,4,60.0,4,60.0,Player20,,,,,\n",
        );
        let tracking = |side: &str| {
            format!(
                ",,,{side},,{side},,\n,,,1,,2,,\nPeriod,Frame,Time [s],Player1,,Player2,,Ball,\n\
                 1,1,0.04,0.20,0.50,0.30,0.50,0.50,0.50\n\
                 1,2,0.08,0.22,0.50,0.30,0.50,0.52,0.50\n\
                 2,3,60.0,0.80,0.50,0.70,0.50,0.50,0.50\n"
            )
        };
        write(&paths.metrica_tracking("1", "Home"), &tracking("Home"));
        write(&paths.metrica_tracking("1", "Away"), &tracking("Away"));

        let mut opts = BuildOptions::new("1", "Home", Source::Tracking, PlotType::Tracking);
        opts.data_dir = dir.path().to_path_buf();
        let out = build_network(&opts).unwrap();

        assert_eq!(out.plot_name, "metrica_match1_Home_tracking");
        // Only frame 1 precedes the pass end frame
        assert_eq!(out.diagnostics.retained_frames, 1);
        assert_eq!(out.network.player_position["Player1"], (0.20, 0.50));
        assert_eq!(out.network.player_pass_count["Player1"], 1);
    }
}
