//! SVG line chart of total metal units per simulation step.

use crate::domain::simulator::PortfolioSnapshot;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

/// Render `snapshot.total` against step index. Returns an empty string for an empty series.
pub fn generate_total_units_svg(snapshots: &[PortfolioSnapshot]) -> String {
    if snapshots.is_empty() {
        return String::new();
    }

    let min_total = snapshots
        .iter()
        .map(|s| s.total)
        .fold(f64::INFINITY, f64::min);
    let max_total = snapshots
        .iter()
        .map(|s| s.total)
        .fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_total - min_total;
    let scale_y = if range > 0.0 {
        plot_height / range
    } else {
        0.0
    };
    let scale_x = if snapshots.len() > 1 {
        plot_width / (snapshots.len() - 1) as f64
    } else {
        0.0
    };

    // A flat series is drawn through the vertical middle.
    let baseline = if range > 0.0 {
        HEIGHT - PADDING
    } else {
        HEIGHT / 2.0
    };

    let points: Vec<String> = snapshots
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let x = PADDING + i as f64 * scale_x;
            let y = baseline - (s.total - min_total) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{:.0}" y="20" text-anchor="middle" font-size="12">Portfolio size over time</text>"#,
        WIDTH / 2.0
    ));
    svg.push('\n');
    // axes
    svg.push_str(&format!(
        r#"  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{b:.0}" stroke="black"/>"#,
        p = PADDING,
        b = HEIGHT - PADDING
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <line x1="{p:.0}" y1="{b:.0}" x2="{r:.0}" y2="{b:.0}" stroke="black"/>"#,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{:.0}" y="{:.0}" font-size="10" text-anchor="end">{:.2}</text>"#,
        PADDING - 4.0,
        PADDING + 4.0,
        max_total
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{:.0}" y="{:.0}" font-size="10" text-anchor="end">{:.2}</text>"#,
        PADDING - 4.0,
        HEIGHT - PADDING,
        min_total
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <polyline fill="none" stroke="blue" stroke-width="1" points="{}"/>"#,
        points.join(" ")
    ));
    svg.push_str("\n</svg>\n");
    svg
}
