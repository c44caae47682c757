//! SVG rendering for a computed layout.

use std::fmt::Write;

use trilemma_core::layout::{Layout, CANVAS_HEIGHT, CANVAS_WIDTH};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels (the viewBox is always the 800×600 canvas)
    pub width: f64,
    /// Output height in pixels
    pub height: f64,
    pub background: String,
    /// Stroke width for circle outlines
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    /// Glyph + caption at each circle center
    pub show_labels: bool,
    /// Trade-off names between each pair of circles
    pub show_pair_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: "#0f172a".to_string(),
            stroke_width: 2.0,
            stroke_opacity: 0.3,
            show_labels: true,
            show_pair_labels: true,
        }
    }
}

const OVERLAP_COLOR: &str = "white";
const VOID_COLOR: &str = "#f87171";

/// Render a layout to an SVG string
pub fn render_svg(layout: &Layout, config: &RenderConfig) -> Result<String, std::fmt::Error> {
    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, CANVAS_WIDTH, CANVAS_HEIGHT,
    )?;
    writeln!(
        &mut svg,
        r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        CANVAS_WIDTH, CANVAS_HEIGHT, escape(&config.background),
    )?;

    for c in &layout.circles {
        let center = c.center();
        writeln!(&mut svg, r#"  <g id="{}">"#, c.constraint.id())?;
        writeln!(
            &mut svg,
            r#"    <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}" stroke="white" stroke-width="{}" stroke-opacity="{}" style="mix-blend-mode: screen"/>"#,
            center.x, center.y, c.circle.r, escape(&c.color), config.stroke_width, config.stroke_opacity,
        )?;
        if config.show_labels {
            writeln!(
                &mut svg,
                r#"    <text x="{:.3}" y="{:.3}" dy="0.35em" text-anchor="middle" font-size="36" font-weight="900" fill="white">{}</text>"#,
                center.x, center.y, escape(&c.label),
            )?;
            writeln!(
                &mut svg,
                r#"    <text x="{:.3}" y="{:.3}" dy="0.35em" text-anchor="middle" font-size="14" letter-spacing="0.1em" fill="white" fill-opacity="0.8">{}</text>"#,
                center.x, center.y + 40., escape(&c.constraint.caption().to_uppercase()),
            )?;
        }
        writeln!(&mut svg, "  </g>")?;
    }

    if config.show_pair_labels {
        for label in &layout.labels {
            writeln!(
                &mut svg,
                r#"  <text x="{:.3}" y="{:.3}" dy="0.35em" text-anchor="middle" font-size="14" font-weight="bold" fill="white"><title>{}</title>{}</text>"#,
                label.position.x, label.position.y, escape(&label.description), escape(&label.text),
            )?;
        }
    }

    // Center marker
    let centroid = layout.centroid;
    let (color, font) = if layout.state.is_common_overlap() {
        (OVERLAP_COLOR, r#"font-size="18" font-weight="bold""#)
    } else {
        (VOID_COLOR, r#"font-size="12" font-family="monospace" fill-opacity="0.8""#)
    };
    writeln!(
        &mut svg,
        r#"  <text x="{:.3}" y="{:.3}" dy="0.35em" text-anchor="middle" {} fill="{}">{}</text>"#,
        centroid.x, centroid.y, font, color, layout.state,
    )?;
    writeln!(
        &mut svg,
        r#"  <circle cx="{:.3}" cy="{:.3}" r="3" fill="{}" opacity="0.5"/>"#,
        centroid.x, centroid.y, color,
    )?;

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
