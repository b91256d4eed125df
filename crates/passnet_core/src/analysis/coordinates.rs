//! Coordinate normalization
//!
//! Converts feed-specific coordinates into the canonical [0,1]² range and
//! aligns both periods to a single attacking direction.
//!
//! ## Coordinate Systems
//!
//! **Canonical coordinates** (every table after normalization):
//! - x: 0 = own goal line, 1 = opponent goal line (always attacking rightward)
//! - y: 0..1 across the pitch
//!
//! **Eventing units**: 120 × 80 with the origin at the top-left corner, so the
//! vertical axis is flipped on the way in.
//!
//! **Metric coordinates**: meters with the origin at the center spot and y
//! increasing upward.

use tracing::debug;

use crate::config::FieldDimensions;
use crate::models::{Event, TrackingTable};

/// Position in canonical coordinates (0-1)
pub type CanonicalPos = (f64, f64);

/// Position in meters, origin at the center spot
pub type MetricPos = (f64, f64);

/// Eventing pitch length in feed units
pub const EVENTING_WIDTH: f64 = 120.0;

/// Eventing pitch width in feed units
pub const EVENTING_HEIGHT: f64 = 80.0;

/// Point reflection through the pitch center on one axis.
#[inline]
pub fn reflect(v: f64) -> f64 {
    1.0 - v
}

#[inline]
fn reflect_pos(p: (f64, f64)) -> (f64, f64) {
    (reflect(p.0), reflect(p.1))
}

/// Convert a feed-unit point into canonical coordinates.
///
/// The feed's origin is top-left while the canonical origin is bottom-left,
/// hence `1 - y/height`.
pub fn point_to_canonical(location: (f64, f64), max_width: f64, max_height: f64) -> CanonicalPos {
    (location.0 / max_width, 1.0 - location.1 / max_height)
}

/// Convert an eventing-feed point (120 × 80 units).
pub fn eventing_to_canonical(location: (f64, f64)) -> CanonicalPos {
    point_to_canonical(location, EVENTING_WIDTH, EVENTING_HEIGHT)
}

/// Convert a canonical point to meters with the origin at the center spot.
///
/// Normalized y grows downward, metric y grows upward.
pub fn to_metric(pos: CanonicalPos, field: FieldDimensions) -> MetricPos {
    (
        (pos.0 - 0.5) * field.length_m,
        -(pos.1 - 0.5) * field.width_m,
    )
}

/// Flip every coordinate of the tracking table from the first second-period
/// frame onward.
fn flip_tracking(table: &TrackingTable) -> TrackingTable {
    let mut flipped = table.clone();
    let Some(start) = table.second_period_start() else {
        debug!(side = %table.side, "no second period in tracking table, nothing to flip");
        return flipped;
    };

    for frame in &mut flipped.frames[start..] {
        for pos in frame.positions.iter_mut().flatten() {
            *pos = reflect_pos(*pos);
        }
        if let Some(ball) = frame.ball.as_mut() {
            *ball = reflect_pos(*ball);
        }
    }
    flipped
}

/// Flip event coordinates from the first second-period event onward.
fn flip_events(events: &[Event]) -> Vec<Event> {
    let mut flipped = events.to_vec();
    let Some(start) = events.iter().position(|e| e.period == 2) else {
        debug!("no second period in event stream, nothing to flip");
        return flipped;
    };

    for event in &mut flipped[start..] {
        event.start = event.start.map(reflect_pos);
        event.end = event.end.map(reflect_pos);
    }
    flipped
}

/// Align home tracking, away tracking and events so each team attacks in the
/// same direction in both periods.
///
/// Returns normalized copies; the inputs are left untouched.
pub fn to_single_playing_direction(
    home: &TrackingTable,
    away: &TrackingTable,
    events: &[Event],
) -> (TrackingTable, TrackingTable, Vec<Event>) {
    let home_start = home.second_period_start().map(|i| home.frames[i].frame);
    let away_start = away.second_period_start().map(|i| away.frames[i].frame);
    if home_start != away_start {
        debug!(
            ?home_start,
            ?away_start,
            "home and away tracking disagree on second period start frame"
        );
    }

    (flip_tracking(home), flip_tracking(away), flip_events(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, TrackingFrame};

    fn table(side: &str) -> TrackingTable {
        let mut table = TrackingTable::new(side, vec![format!("{}_1", side), format!("{}_12", side)]);
        for (frame, period) in [(1u64, 1u8), (2, 1), (3, 2), (4, 2)] {
            table.frames.push(TrackingFrame {
                frame,
                period,
                time_s: frame as f64 * 0.04,
                positions: vec![Some((0.2, 0.3)), None],
                ball: Some((0.25, 0.75)),
            });
        }
        table
    }

    #[test]
    fn test_point_to_canonical() {
        assert_eq!(eventing_to_canonical((60.0, 40.0)), (0.5, 0.5));
        assert_eq!(eventing_to_canonical((0.0, 0.0)), (0.0, 1.0));
        assert_eq!(eventing_to_canonical((120.0, 80.0)), (1.0, 0.0));
    }

    #[test]
    fn test_to_metric() {
        let field = FieldDimensions::default();
        assert_eq!(to_metric((0.5, 0.5), field), (0.0, 0.0));
        let (x, y) = to_metric((1.0, 0.0), field);
        assert!((x - 53.0).abs() < 1e-9);
        assert!((y - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_is_involutive() {
        for v in [0.0, 0.13, 0.5, 0.77, 1.0] {
            assert!((reflect(reflect(v)) - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_flip_only_second_period() {
        let home = table("Home");
        let away = table("Away");
        let (home_n, away_n, _) = to_single_playing_direction(&home, &away, &[]);

        assert_eq!(home_n.frames[0].positions[0], Some((0.2, 0.3)));
        assert_eq!(home_n.frames[1].ball, Some((0.25, 0.75)));

        let (x, y) = home_n.frames[2].positions[0].unwrap();
        assert!((x - 0.8).abs() < 1e-12 && (y - 0.7).abs() < 1e-12);
        assert_eq!(home_n.frames[3].ball, Some((0.75, 0.25)));
        // Off-pitch players stay off-pitch
        assert_eq!(away_n.frames[3].positions[1], None);
        // Inputs untouched
        assert_eq!(home.frames[2].positions[0], Some((0.2, 0.3)));
    }

    #[test]
    fn test_flip_events() {
        let mut first = Event::new(EventKind::Pass, "Home", 10.0);
        first.start = Some((0.1, 0.2));
        let mut second = Event::new(EventKind::Pass, "Home", 50.0);
        second.period = 2;
        second.start = Some((0.1, 0.2));
        second.end = Some((0.6, 0.4));

        let (_, _, events) =
            to_single_playing_direction(&table("Home"), &table("Away"), &[first, second]);
        assert_eq!(events[0].start, Some((0.1, 0.2)));
        let (x, y) = events[1].start.unwrap();
        assert!((x - 0.9).abs() < 1e-12 && (y - 0.8).abs() < 1e-12);
        let (x, _) = events[1].end.unwrap();
        assert!((x - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_flip_twice_restores() {
        let home = table("Home");
        let (once, _, _) = to_single_playing_direction(&home, &home, &[]);
        let (twice, _, _) = to_single_playing_direction(&once, &once, &[]);
        for (a, b) in home.frames.iter().zip(&twice.frames) {
            let (ax, ay) = a.positions[0].unwrap();
            let (bx, by) = b.positions[0].unwrap();
            assert!((ax - bx).abs() < 1e-12 && (ay - by).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_second_period_is_noop() {
        let mut home = table("Home");
        home.frames.retain(|f| f.period == 1);
        let (normalized, _, _) = to_single_playing_direction(&home, &home, &[]);
        assert_eq!(normalized, home);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the second-half flip is its own inverse
            #[test]
            fn prop_reflect_involutive(v in 0.0f64..=1.0f64) {
                prop_assert!((reflect(reflect(v)) - v).abs() < 1e-12);
            }

            /// Property: canonical points always land in [0,1]²
            #[test]
            fn prop_canonical_in_range(x in 0.0f64..=120.0, y in 0.0f64..=80.0) {
                let (cx, cy) = eventing_to_canonical((x, y));
                prop_assert!((0.0..=1.0).contains(&cx));
                prop_assert!((0.0..=1.0).contains(&cy));
            }
        }
    }
}
