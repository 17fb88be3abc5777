// 📈 Chart - scatter plot description and SVG rendering
//
// ChartSpec is renderer-independent: the terminal UI and the SVG writer
// both read titles, labels, colours and points from it.

use quick_xml::escape::escape;
use serde::Serialize;
use std::fmt;

use crate::party::Party;
use crate::record::PartyLeader;

pub const TITLE: &str = "Svenska partiledare genom århundradena";
pub const X_LABEL: &str = "Ålder vid tillträde";
pub const Y_LABEL: &str = "Antal år i ämbetet";
pub const LEGEND_TITLE: &str = "Parti";

// ============================================================================
// CHART DESCRIPTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: f64,
    pub symbol: &'static str,
    pub outline_width: f64,
    pub outline_color: &'static str,
    pub opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            size: 15.0,
            symbol: "circle",
            outline_width: 2.0,
            // DarkSlateGrey
            outline_color: "#2f4f4f",
            opacity: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// All points of one party
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub party: Party,
    pub color: &'static str,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub legend_title: &'static str,
    pub marker: MarkerStyle,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Group leaders into one series per party, in spectrum order.
    ///
    /// Records keep their incoming order inside a series.
    pub fn from_leaders<'a>(leaders: impl IntoIterator<Item = &'a PartyLeader>) -> Self {
        let leaders: Vec<&PartyLeader> = leaders.into_iter().collect();
        let series = Party::ALL
            .iter()
            .filter_map(|&party| {
                let points: Vec<Point> = leaders
                    .iter()
                    .filter(|l| l.party_abr == party)
                    .map(|l| {
                        let (x, y) = l.point();
                        Point {
                            x,
                            y,
                            label: l.hover_label().to_string(),
                        }
                    })
                    .collect();
                (!points.is_empty()).then(|| Series {
                    party,
                    color: party.color_hex(),
                    points,
                })
            })
            .collect();

        ChartSpec {
            title: TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            legend_title: LEGEND_TITLE,
            marker: MarkerStyle::default(),
            series,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Data bounds padded to whole ticks: ([x_min, x_max], [y_min, y_max])
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max, mut y_min, mut y_max) =
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }

        if x_min > x_max {
            // No points: an empty but sensible frame
            return ([20.0, 80.0], [0.0, 10.0]);
        }

        let x = [(x_min / 5.0).floor() * 5.0 - 5.0, (x_max / 5.0).ceil() * 5.0 + 5.0];
        let y = [
            (y_min / 5.0).floor().min(0.0) * 5.0,
            (y_max / 5.0).ceil() * 5.0 + 5.0,
        ];
        (x, y)
    }
}

// ============================================================================
// SVG RENDERING
// ============================================================================

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 640.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 140.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Render the chart as a standalone SVG document.
///
/// Every marker carries a `<title>` child, which browsers show on hover.
pub fn render_svg(spec: &ChartSpec) -> String {
    let mut svg = String::new();
    // Writing into a String never fails
    let _ = write_svg(&mut svg, spec);
    svg
}

/// Stream the SVG document for `spec` into any `fmt::Write` sink
pub fn write_svg<W: fmt::Write>(out: &mut W, spec: &ChartSpec) -> fmt::Result {
    let ([x_min, x_max], [y_min, y_max]) = spec.bounds();
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
    let sy = |y: f64| MARGIN_TOP + plot_h - (y - y_min) / (y_max - y_min) * plot_h;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    )?;
    writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    writeln!(
        out,
        r#"<text x="{}" y="32" font-size="20">{}</text>"#,
        MARGIN_LEFT,
        escape(spec.title)
    )?;

    // Grid and tick labels every 5 units
    writeln!(out, r##"<g stroke="#e5ecf6" stroke-width="1">"##)?;
    for x in ticks(x_min, x_max) {
        writeln!(
            out,
            r#"<line x1="{0:.1}" y1="{1:.1}" x2="{0:.1}" y2="{2:.1}"/>"#,
            sx(x),
            MARGIN_TOP,
            MARGIN_TOP + plot_h
        )?;
    }
    for y in ticks(y_min, y_max) {
        writeln!(
            out,
            r#"<line x1="{1:.1}" y1="{0:.1}" x2="{2:.1}" y2="{0:.1}"/>"#,
            sy(y),
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r##"<g font-size="12" fill="#444">"##)?;
    for x in ticks(x_min, x_max) {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            sx(x),
            MARGIN_TOP + plot_h + 18.0,
            x
        )?;
    }
    for y in ticks(y_min, y_max) {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 8.0,
            sy(y) + 4.0,
            y
        )?;
    }
    writeln!(out, "</g>")?;

    // Axis titles
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 20.0,
        escape(spec.x_label)
    )?;
    writeln!(
        out,
        r#"<text transform="translate(24 {:.1}) rotate(-90)" font-size="14" text-anchor="middle">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        escape(spec.y_label)
    )?;

    // Markers
    let m = &spec.marker;
    for series in &spec.series {
        writeln!(
            out,
            r#"<g class="party-{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}">"#,
            series.party.code(),
            series.color,
            m.opacity,
            m.outline_color,
            m.outline_width
        )?;
        for p in &series.points {
            writeln!(
                out,
                r#"<circle cx="{:.1}" cy="{:.1}" r="{}"><title>{}</title></circle>"#,
                sx(p.x),
                sy(p.y),
                m.size / 2.0,
                escape(p.label.as_str())
            )?;
        }
        writeln!(out, "</g>")?;
    }

    // Legend
    let legend_x = WIDTH - MARGIN_RIGHT + 20.0;
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="14">{}</text>"#,
        legend_x,
        MARGIN_TOP,
        escape(spec.legend_title)
    )?;
    for (i, series) in spec.series.iter().enumerate() {
        let y = MARGIN_TOP + 24.0 + i as f64 * 22.0;
        writeln!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="6" fill="{}" stroke="{}" stroke-width="1"/><text x="{:.1}" y="{:.1}" font-size="13">{}</text>"#,
            legend_x + 6.0,
            y - 4.0,
            series.color,
            m.outline_color,
            legend_x + 18.0,
            y,
            series.party.code()
        )?;
    }

    writeln!(out, "</svg>")
}

/// Tick positions from `min` to `max` inclusive, every 5 units
fn ticks(min: f64, max: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(min), |t| Some(t + 5.0)).take_while(move |t| *t <= max)
}
