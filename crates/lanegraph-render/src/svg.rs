use crate::model::{LaneBand, LayoutedDiagram, PlacedNode, RoutedEdge};
use crate::theme::{GradientStops, Theme};
use lanegraph_core::{Lane, LayerKind};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id. Also prefixes marker and gradient ids so several diagrams can share a
    /// document.
    pub diagram_id: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: "lanegraph".to_string(),
        }
    }
}

const ACCENT_WIDTH: f64 = 4.0;

pub fn render_svg(diagram: &LayoutedDiagram, theme: &Theme, options: &SvgRenderOptions) -> String {
    let id = escape_xml(&options.diagram_id);
    let mut out = String::with_capacity(4096 + diagram.nodes.len() * 512);

    let (w, h) = (fmt(diagram.width), fmt(diagram.height));
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let _ = writeln!(
        &mut out,
        r#"<style>#{id} text {{ font-family: {}; }}</style>"#,
        escape_xml(&theme.font)
    );

    render_defs(&mut out, &id, theme);

    for band in &diagram.lanes {
        render_band(&mut out, &id, band, theme);
    }
    for node in &diagram.nodes {
        render_node(&mut out, &id, node, theme);
    }
    for edge in &diagram.edges {
        render_edge(&mut out, &id, edge, theme);
    }
    for band in &diagram.lanes {
        render_band_title(&mut out, band, theme);
    }

    out.push_str("</svg>\n");
    out
}

fn render_defs(out: &mut String, id: &str, theme: &Theme) {
    out.push_str("<defs>\n");
    let _ = writeln!(
        out,
        r#"<marker id="{id}-arrow" markerWidth="6" markerHeight="6" refX="5" refY="3" orient="auto" markerUnits="strokeWidth"><path d="M0,0 L0,6 L6,3 z" fill="{}"/></marker>"#,
        escape_xml(&theme.colors.line)
    );
    if let Some(g) = &theme.gradients {
        for (name, stops) in [
            ("backbone", &g.backbone),
            ("neck", &g.neck),
            ("head", &g.head),
            ("concat", &g.concat),
            ("node", &g.node),
        ] {
            render_gradient(out, id, name, stops);
        }
    }
    out.push_str("</defs>\n");
}

fn render_gradient(out: &mut String, id: &str, name: &str, stops: &GradientStops) {
    let _ = writeln!(
        out,
        r#"<linearGradient id="{id}-grad-{name}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
        escape_xml(&stops.start),
        escape_xml(&stops.end)
    );
}

fn band_fill(id: &str, lane: Lane, theme: &Theme) -> String {
    if theme.gradients.is_some() {
        return format!("url(#{id}-grad-{})", lane.class_name());
    }
    let c = &theme.colors;
    match lane {
        Lane::Primary => escape_xml(&c.bg_backbone),
        Lane::Intermediate => escape_xml(&c.bg_neck),
        Lane::Terminal => escape_xml(&c.bg_head),
    }
}

fn node_fill(id: &str, kind: LayerKind, theme: &Theme) -> String {
    if theme.gradients.is_some() && !theme.has_fill_override(kind) {
        let name = if kind.is_merge() { "concat" } else { "node" };
        return format!("url(#{id}-grad-{name})");
    }
    escape_xml(theme.fill_for(kind))
}

fn render_band(out: &mut String, id: &str, band: &LaneBand, theme: &Theme) {
    if band.width <= 0.0 || band.height <= 0.0 {
        return;
    }
    out.push_str(r#"<rect class="lane "#);
    out.push_str(band.lane.class_name());
    out.push_str(r#"" x=""#);
    fmt_into(out, band.x);
    out.push_str(r#"" y=""#);
    fmt_into(out, band.y);
    out.push_str(r#"" width=""#);
    fmt_into(out, band.width);
    out.push_str(r#"" height=""#);
    fmt_into(out, band.height);
    out.push_str(r#"" fill=""#);
    out.push_str(&band_fill(id, band.lane, theme));
    out.push_str("\"/>\n");
}

fn render_band_title(out: &mut String, band: &LaneBand, theme: &Theme) {
    if band.width <= 0.0 {
        return;
    }
    out.push_str(r#"<text x=""#);
    fmt_into(out, band.x + band.width / 2.0);
    out.push_str(r#"" y=""#);
    fmt_into(out, band.title_y);
    out.push_str(r#"" font-weight="bold" font-size="18" fill=""#);
    out.push_str(&escape_xml(&theme.colors.text_main));
    out.push_str(r#"" text-anchor="middle" letter-spacing="1">"#);
    out.push_str(&escape_xml(&band.title));
    out.push_str("</text>\n");
}

fn render_node(out: &mut String, id: &str, node: &PlacedNode, theme: &Theme) {
    let kind = node.node.kind;
    let stroke_width = if kind.is_merge() { "1.5" } else { "1" };

    let _ = write!(
        out,
        r#"<g class="node {}" data-index="{}">"#,
        kind.as_str(),
        node.index()
    );
    out.push_str(r#"<rect x=""#);
    fmt_into(out, node.x);
    out.push_str(r#"" y=""#);
    fmt_into(out, node.y);
    out.push_str(r#"" width=""#);
    fmt_into(out, node.width);
    out.push_str(r#"" height=""#);
    fmt_into(out, node.height);
    out.push_str(r#"" rx=""#);
    fmt_into(out, theme.radius);
    out.push_str(r#"" fill=""#);
    out.push_str(&node_fill(id, kind, theme));
    out.push_str(r#"" stroke=""#);
    out.push_str(&escape_xml(&theme.colors.stroke));
    out.push_str(r#"" stroke-width=""#);
    out.push_str(stroke_width);
    out.push_str("\"/>");

    out.push_str(r#"<rect x=""#);
    fmt_into(out, node.x);
    out.push_str(r#"" y=""#);
    fmt_into(out, node.y);
    out.push_str(r#"" width=""#);
    fmt_into(out, ACCENT_WIDTH);
    out.push_str(r#"" height=""#);
    fmt_into(out, node.height);
    out.push_str(r#"" fill=""#);
    out.push_str(&escape_xml(theme.kind_colors.accent(kind)));
    out.push_str("\"/>");

    let cx = node.center_x();
    let cy = node.center_y();
    let mut lines = node.node.display_text.iter();
    if let Some(main) = lines.next() {
        out.push_str(r#"<text x=""#);
        fmt_into(out, cx);
        out.push_str(r#"" y=""#);
        fmt_into(out, cy - 7.0);
        out.push_str(r#"" font-weight="bold" font-size="14" fill=""#);
        out.push_str(&escape_xml(&theme.colors.text_main));
        out.push_str(r#"" text-anchor="middle" dominant-baseline="middle">"#);
        out.push_str(&escape_xml(main));
        out.push_str("</text>");
    }
    if let Some(sub) = lines.next() {
        out.push_str(r#"<text x=""#);
        fmt_into(out, cx);
        out.push_str(r#"" y=""#);
        fmt_into(out, cy + 10.0);
        out.push_str(r#"" font-size="11" fill=""#);
        out.push_str(&escape_xml(&theme.colors.text_sub));
        out.push_str(r#"" text-anchor="middle" dominant-baseline="middle">"#);
        out.push_str(&escape_xml(sub));
        out.push_str("</text>");
    }
    out.push_str("</g>\n");
}

fn render_edge(out: &mut String, id: &str, edge: &RoutedEdge, theme: &Theme) {
    let _ = write!(
        out,
        r#"<path class="edge" data-from="{}" data-to="{}" d=""#,
        edge.from, edge.to
    );
    path_data_into(out, edge);
    out.push_str(r#"" stroke=""#);
    out.push_str(&escape_xml(&theme.colors.line));
    out.push_str(r#"" stroke-width="1.2" fill="none""#);
    if edge.dashed {
        out.push_str(r#" stroke-dasharray="4,2""#);
    }
    let _ = writeln!(out, r#" marker-end="url(#{id}-arrow)"/>"#);
}

/// `M x1 y1 L x2 y2` for straight edges, `M x1 y1 C c1, c2, x2 y2` for curves.
pub fn path_data_into(out: &mut String, edge: &RoutedEdge) {
    out.push_str("M ");
    fmt_into(out, edge.start.x);
    out.push(' ');
    fmt_into(out, edge.start.y);
    match &edge.controls {
        None => out.push_str(" L "),
        Some([c1, c2]) => {
            out.push_str(" C ");
            fmt_into(out, c1.x);
            out.push(' ');
            fmt_into(out, c1.y);
            out.push_str(", ");
            fmt_into(out, c2.x);
            out.push(' ');
            fmt_into(out, c2.y);
            out.push_str(", ");
        }
    }
    fmt_into(out, edge.end.x);
    out.push(' ');
    fmt_into(out, edge.end.y);
}

/// Writes `v` rounded to 3 fractional digits, without trailing zeros or `-0`.
pub fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let mut rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(rounded));
}

pub fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
