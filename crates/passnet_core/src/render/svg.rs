//! SVG document for one passing network.
//!
//! Drawing is done in pitch meters (a `width` × `height` canvas, origin at the
//! bottom-left corner) and mapped to pixels with y pointing down. Edges are
//! drawn first, then nodes with their labels, then the legend and title.

use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::warn;

use super::color::ColorRamp;
use crate::config::PlotConfig;
use crate::models::NetworkOutput;

/// Pixels per inch of the output.
const DPI: f64 = 100.0;

/// Pixels per typographic point.
const PX_PER_PT: f64 = DPI / 72.0;

/// Height of the title band above the pitch, pixels.
const TITLE_BAND: f64 = 40.0;

const LEGEND_FONT_SIZE: f64 = 10.0;

/// Linear map of `value` from `old` to `new`.
pub fn change_range(value: f64, old: (f64, f64), new: (f64, f64)) -> f64 {
    let span = old.1 - old.0;
    if span == 0.0 {
        return new.0;
    }
    (value - old.0) / span * (new.1 - new.0) + new.0
}

/// Escape text for XML content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Meter-to-pixel mapping.
struct Canvas {
    scale: f64,
    pitch_width: f64,
    pitch_height: f64,
}

impl Canvas {
    fn new(config: &PlotConfig) -> Self {
        Self {
            scale: config.fig_size * DPI / config.width,
            pitch_width: config.width,
            pitch_height: config.height,
        }
    }

    fn pixel_width(&self) -> f64 {
        self.pitch_width * self.scale
    }

    fn pixel_height(&self) -> f64 {
        self.pitch_height * self.scale + TITLE_BAND
    }

    /// Meters (y up) to pixels (y down).
    fn px(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale,
            TITLE_BAND + (self.pitch_height - y) * self.scale,
        )
    }

    /// Canonical [0,1]² to pixels.
    fn canonical(&self, pos: (f64, f64)) -> (f64, f64) {
        self.px(pos.0 * self.pitch_width, pos.1 * self.pitch_height)
    }
}

fn line(svg: &mut String, canvas: &Canvas, from: (f64, f64), to: (f64, f64), color: &str) {
    let (x1, y1) = canvas.px(from.0, from.1);
    let (x2, y2) = canvas.px(to.0, to.1);
    let _ = writeln!(
        svg,
        r##"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-opacity="0.8"/>"##,
        x1,
        y1,
        x2,
        y2,
        color,
        1.5 * PX_PER_PT
    );
}

/// Counter-clockwise arc (in pitch orientation) from `from_deg` to `to_deg`.
fn arc(
    svg: &mut String,
    canvas: &Canvas,
    center: (f64, f64),
    radius: f64,
    degrees: (f64, f64),
    color: &str,
) {
    let (from_deg, to_deg) = degrees;
    let point = |deg: f64| {
        let rad = deg.to_radians();
        canvas.px(center.0 + radius * rad.cos(), center.1 + radius * rad.sin())
    };
    let (x1, y1) = point(from_deg);
    let (x2, y2) = point(to_deg);
    let large = if (to_deg - from_deg).rem_euclid(360.0) > 180.0 { 1 } else { 0 };
    let r = radius * canvas.scale;
    let _ = writeln!(
        svg,
        r##"  <path d="M {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="0.8"/>"##,
        x1,
        y1,
        r,
        r,
        large,
        x2,
        y2,
        color,
        1.5 * PX_PER_PT
    );
}

fn draw_pitch(svg: &mut String, canvas: &Canvas, config: &PlotConfig) {
    let (w, h) = (config.width, config.height);
    let lines_color = escape(&config.lines_color);
    let c = lines_color.as_str();
    let (_, top) = canvas.px(0.0, h);

    let _ = writeln!(
        svg,
        r##"  <rect x="0" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"##,
        top,
        canvas.pixel_width(),
        h * canvas.scale,
        escape(&config.background_color)
    );

    // Outer lines and halfway line
    line(svg, canvas, (0.0, 0.0), (0.0, h), c);
    line(svg, canvas, (w, 0.0), (w, h), c);
    line(svg, canvas, (0.0, h), (w, h), c);
    line(svg, canvas, (0.0, 0.0), (w, 0.0), c);
    line(svg, canvas, (w / 2.0, 0.0), (w / 2.0, h), c);

    // Penalty and goal areas, mirrored on both ends
    let mid = h / 2.0;
    for (goal_x, dir) in [(0.0, 1.0), (w, -1.0)] {
        let box_x = goal_x + dir * 16.5;
        let six_x = goal_x + dir * 5.5;
        line(svg, canvas, (goal_x, mid - 20.15), (box_x, mid - 20.15), c);
        line(svg, canvas, (goal_x, mid + 20.15), (box_x, mid + 20.15), c);
        line(svg, canvas, (box_x, mid - 20.15), (box_x, mid + 20.15), c);
        line(svg, canvas, (goal_x, mid - 9.15), (six_x, mid - 9.15), c);
        line(svg, canvas, (goal_x, mid + 9.15), (six_x, mid + 9.15), c);
        line(svg, canvas, (six_x, mid - 9.15), (six_x, mid + 9.15), c);
    }

    // Penalty arcs and center circle
    arc(svg, canvas, (11.0, mid), 9.0, (-50.0, 50.0), c);
    arc(svg, canvas, (w - 11.0, mid), 9.0, (130.0, 230.0), c);
    let (cx, cy) = canvas.px(w / 2.0, mid);
    let _ = writeln!(
        svg,
        r##"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="0.8"/>"##,
        cx,
        cy,
        9.5 * canvas.scale,
        c,
        1.5 * PX_PER_PT
    );
}

/// Split a pair key into two names that both have a position.
///
/// Names may themselves contain underscores, so every split point is tried.
fn split_pair_key<'a>(
    key: &'a str,
    positions: &BTreeMap<String, (f64, f64)>,
) -> Option<(&'a str, &'a str)> {
    key.match_indices('_').find_map(|(idx, _)| {
        let (a, b) = (&key[..idx], &key[idx + 1..]);
        (positions.contains_key(a) && positions.contains_key(b)).then_some((a, b))
    })
}

/// Multi-line text; `anchor_bottom` puts the last line's baseline at `y`.
fn text_block(
    svg: &mut String,
    (x, y): (f64, f64),
    font_size: f64,
    color: &str,
    text: &str,
    anchor_bottom: bool,
) {
    let lines: Vec<&str> = text.lines().collect();
    let line_height = font_size * 1.25;
    let first_y = if anchor_bottom {
        y - line_height * (lines.len().saturating_sub(1)) as f64
    } else {
        y
    };
    let _ = write!(
        svg,
        r##"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.1}" fill="{}">"##,
        x,
        first_y,
        font_size,
        escape(color)
    );
    for (i, text_line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_height };
        let _ = write!(
            svg,
            r##"<tspan x="{:.2}" dy="{:.2}">{}</tspan>"##,
            x,
            dy,
            escape(text_line)
        );
    }
    let _ = writeln!(svg, "</text>");
}

/// Render the network over a pitch.
///
/// Only players present in both the count and position tables are drawn, and
/// only edges whose two players have a position.
pub fn render_svg(output: &NetworkOutput, config: &PlotConfig) -> String {
    let canvas = Canvas::new(config);
    let network = &output.network;
    let ramp = ColorRamp::named(&config.nodes_cmap).unwrap_or_else(|| {
        warn!(cmap = %config.nodes_cmap, "unknown color ramp, using Reds");
        ColorRamp::REDS
    });
    let background = escape(&config.background_color);
    let lines_color = escape(&config.lines_color);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"##,
        canvas.pixel_width(),
        canvas.pixel_height(),
        canvas.pixel_width(),
        canvas.pixel_height()
    );
    let _ = writeln!(
        svg,
        r##"  <rect width="100%" height="100%" fill="{}"/>"##,
        background
    );

    draw_pitch(&mut svg, &canvas, config);

    if config.plot_edges {
        let max_count = network.max_pair_count() as f64;
        let max_value = network.max_pair_value();
        for (key, count) in &network.pair_pass_count {
            let Some((a, b)) = split_pair_key(key, &network.player_position) else {
                continue;
            };
            let (x1, y1) = canvas.canonical(network.player_position[a]);
            let (x2, y2) = canvas.canonical(network.player_position[b]);
            let width = change_range(
                *count as f64,
                (0.0, max_count),
                (config.min_edge_width, config.max_edge_width),
            );
            let color = match network.pair_pass_value.get(key) {
                Some(value) => ramp.normalized(*value, max_value).to_hex(),
                None => lines_color.clone(),
            };
            let _ = writeln!(
                svg,
                r##"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="round"/>"##,
                x1,
                y1,
                x2,
                y2,
                color,
                width * PX_PER_PT
            );
        }
    }

    let max_count = network.max_player_count() as f64;
    let max_value = network.max_player_value();
    for (player, count) in &network.player_pass_count {
        let Some(pos) = network.player_position.get(player) else {
            continue;
        };
        let (x, y) = canvas.canonical(*pos);
        let size = change_range(
            *count as f64,
            (0.0, max_count),
            (config.min_node_size, config.max_node_size),
        );
        let color = match network.player_pass_value.get(player) {
            Some(value) => ramp.normalized(*value, max_value).to_hex(),
            None => lines_color.clone(),
        };
        let outer = size / 2.0 * PX_PER_PT;
        let inner = ((size - 20.0) / 2.0 * PX_PER_PT).max(0.0);
        let _ = writeln!(
            svg,
            r##"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"##,
            x, y, outer, color
        );
        if inner > 0.0 {
            let _ = writeln!(
                svg,
                r##"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"##,
                x, y, inner, background
            );
        }
        let _ = writeln!(
            svg,
            r##"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-weight="bold" font-size="{:.1}" fill="{}" stroke="{}" stroke-width="2" paint-order="stroke">{}</text>"##,
            x,
            y,
            config.font_size * PX_PER_PT,
            escape(&config.font_color),
            background,
            escape(player)
        );
    }

    if !output.legend.is_empty() {
        let (x, y) = canvas.px(0.01 * config.width, 0.02 * config.height);
        text_block(
            &mut svg,
            (x, y),
            LEGEND_FONT_SIZE * PX_PER_PT,
            &config.lines_color,
            &output.legend,
            true,
        );
    }
    if !output.title.is_empty() {
        text_block(
            &mut svg,
            (8.0, TITLE_BAND * 0.65),
            12.0 * PX_PER_PT,
            &config.font_color,
            &output.title,
            false,
        );
    }

    svg.push_str("</svg>\n");
    svg
}
