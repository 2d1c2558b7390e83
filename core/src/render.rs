use crate::config::{FillStyle, Gradient, MountainConfig, RidgeStyle, ShadowStyle, ValleysConfig};
use crate::coords::{Point, Stage};
use crate::random::RandomSource;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const DEFAULT_COLOR: &str = "#000000";
// how far right of a slope's start its shadow closes
const SHADOW_X_OFFSET: f64 = 20.0;

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn gradient_def(id: &str, gradient: &Gradient) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        id,
        escape_attr(&gradient.x1),
        escape_attr(&gradient.y1),
        escape_attr(&gradient.x2),
        escape_attr(&gradient.y2)
    ));
    for stop in &gradient.stops {
        out.push_str(&format!(
            r#"<stop offset="{}" stop-color="{}"/>"#,
            escape_attr(&stop.offset),
            escape_attr(&stop.stop_color)
        ));
    }
    out.push_str("</linearGradient>");
    out
}

// Paint for a filled element; gradients are collected into `defs`
fn paint(style: Option<&FillStyle>, gradient_id: &str, defs: &mut Vec<String>) -> String {
    match style {
        Some(FillStyle {
            gradient: Some(gradient),
            ..
        }) => {
            defs.push(gradient_def(gradient_id, gradient));
            format!("url(#{gradient_id})")
        }
        Some(FillStyle {
            color: Some(color), ..
        }) => escape_attr(color),
        _ => DEFAULT_COLOR.to_string(),
    }
}

// Closed silhouette: the ridge points, then down to the bottom corners
pub fn mountain_polygon_points(points: &[Point], stage: &Stage) -> String {
    let mut out = String::new();
    for p in points {
        out.push_str(&format!("{},{} ", p.x, p.y));
    }
    out.push_str(&format!("{},{} 0,{}", stage.width, stage.height, stage.height));
    out
}

pub fn ridge_path(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        out.push_str(&format!("{} {} {}", cmd, p.x, p.y));
    }
    out
}

// Shadow subpaths for every descending slope (canvas y increasing).
// Each one starts at the top of the slope, follows it down, and closes at
// a point a little right of its start, at a random depth between the
// valley floor and the lowest terrain height seen on the slope.
pub fn shadow_path(
    points: &[Point],
    stage: &Stage,
    valley_min_y: f64,
    rng: &mut impl RandomSource,
) -> String {
    let mut out = String::new();
    let mut start_x: Option<f64> = None;
    let mut lowest = 0.0;

    let mut close = |out: &mut String, start: f64, lowest: f64| {
        let depth = (rng.next_f64() * (lowest - valley_min_y)).floor();
        out.push_str(&format!(
            " {} {} Z",
            start + SHADOW_X_OFFSET,
            stage.height - depth
        ));
    };

    for i in 1..points.len() {
        let (prev, cur) = (&points[i - 1], &points[i]);
        match start_x {
            None if cur.y > prev.y => {
                start_x = Some(prev.x);
                out.push_str(&format!("M {} {} {} {}", prev.x, prev.y, cur.x, cur.y));
                lowest = stage.height - cur.y;
            }
            Some(start) if cur.y <= prev.y => {
                if cur.y < lowest {
                    lowest = stage.height - cur.y;
                }
                close(&mut out, start, lowest);
                start_x = None;
                continue;
            }
            Some(_) => {
                out.push_str(&format!(" {} {}", cur.x, cur.y));
                if cur.y > lowest {
                    lowest = stage.height - cur.y;
                }
            }
            None => continue,
        }

        if i == points.len() - 1 {
            if let Some(start) = start_x.take() {
                close(&mut out, start, lowest);
            }
        }
    }
    out
}

// Standalone SVG document for a generated range. The polygon is always
// drawn, the shadow when `shadow` is set, and the ridge line only when it
// has both a color and a thickness.
pub fn render_svg(
    points: &[Point],
    stage: &Stage,
    valleys: &ValleysConfig,
    fill: Option<&FillStyle>,
    shadow: Option<&ShadowStyle>,
    ridge: Option<&RidgeStyle>,
    rng: &mut impl RandomSource,
) -> String {
    let mut defs = Vec::new();
    let mut body = String::new();

    let fill_paint = paint(fill, "mountainGradient", &mut defs);
    body.push_str(&format!(
        r#"<polygon points="{}" fill="{}"/>"#,
        mountain_polygon_points(points, stage),
        fill_paint
    ));

    if shadow.is_some() {
        let shadow_paint = paint(shadow, "shadowGradient", &mut defs);
        body.push_str(&format!(
            r#"<path d="{}" fill="{}"/>"#,
            shadow_path(points, stage, valleys.min_y, rng),
            shadow_paint
        ));
    }

    if let Some(RidgeStyle {
        color: Some(color),
        thickness: Some(thickness),
    }) = ridge
    {
        body.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            ridge_path(points),
            escape_attr(color),
            thickness
        ));
    }

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="{}" width="{}" height="{}">"#,
        SVG_NS,
        stage.width,
        stage.height
    ));
    if !defs.is_empty() {
        svg.push_str(&format!("<defs>{}</defs>", defs.concat()));
    }
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

// Render with the styling held in a merged configuration
pub fn render_config_svg(
    config: &MountainConfig,
    points: &[Point],
    rng: &mut impl RandomSource,
) -> String {
    render_svg(
        points,
        &config.stage,
        &config.valleys,
        config.fill.as_ref(),
        config.shadow.as_ref(),
        config.ridge.as_ref(),
        rng,
    )
}
