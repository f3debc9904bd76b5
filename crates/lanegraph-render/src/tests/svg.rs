use super::{ROUTING_MODEL, conv_stack, parse};
use crate::svg::*;
use crate::theme::ThemeRegistry;
use crate::*;

fn render(model_text: &str, theme: &str) -> String {
    let diagram = layout_parsed(&parse(model_text), &LayoutOptions::default()).unwrap();
    let registry = ThemeRegistry::builtin();
    render_svg(&diagram, registry.resolve(theme), &SvgRenderOptions::default())
}

#[test]
fn document_header_and_defs() {
    let svg = render(ROUTING_MODEL, "paper");
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="lanegraph" width="660" height="514" viewBox="0 0 660 514">"#
    ));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("#lanegraph text { font-family: Times New Roman, serif; }"));
    assert!(svg.contains(r#"<marker id="lanegraph-arrow""#));
    assert!(svg.contains(r##"<path d="M0,0 L0,6 L6,3 z" fill="#333333"/>"##));
}

#[test]
fn edges_carry_routing_and_dashing() {
    let svg = render(ROUTING_MODEL, "paper");
    assert_eq!(svg.matches(r#"<path class="edge""#).count(), 11);
    assert_eq!(svg.matches(r#"stroke-dasharray="4,2""#).count(), 5);
    assert!(svg.contains(r#"data-from="0" data-to="1" d="M 110 144 L 110 180""#));
    assert!(svg.contains(r#"data-from="4" data-to="5" d="M 185 442 C 220 442, 220 122, 255 122""#));
    assert!(svg.contains(r#"marker-end="url(#lanegraph-arrow)""#));
}

#[test]
fn nodes_have_labels_accents_and_merge_stroke() {
    let svg = render(ROUTING_MODEL, "paper");
    assert_eq!(svg.matches(r#"<g class="node "#).count(), 9);
    assert_eq!(svg.matches(r#"stroke-width="1.5""#).count(), 2);
    assert!(svg.contains(r#"<g class="node detect" data-index="8">"#));
    assert!(svg.contains(r##"fill="#F44336""##));
    assert!(svg.contains(">Conv</text>"));
    assert!(svg.contains(">2x / 16c</text>"));
}

#[test]
fn gradient_themes_reference_their_defs() {
    let svg = render(ROUTING_MODEL, "paper");
    assert_eq!(svg.matches("<linearGradient").count(), 5);
    assert!(svg.contains(r#"fill="url(#lanegraph-grad-backbone)""#));
    assert!(svg.contains(r#"fill="url(#lanegraph-grad-concat)""#));

    let svg = render(ROUTING_MODEL, "ocean");
    assert!(!svg.contains("<linearGradient"));
    assert!(svg.contains(r##"<rect class="lane backbone" x="0" y="30" width="220" height="484" fill="#E1F5FE"/>"##));
}

#[test]
fn unknown_theme_renders_like_the_default() {
    assert_eq!(
        render(ROUTING_MODEL, "no-such-theme"),
        render(ROUTING_MODEL, "paper")
    );
}

#[test]
fn empty_lanes_are_not_drawn() {
    let diagram = layout_parsed(&conv_stack(3, 0), &LayoutOptions::default()).unwrap();
    let svg = render_svg(
        &diagram,
        ThemeRegistry::builtin().default_theme(),
        &SvgRenderOptions::default(),
    );
    assert!(!svg.contains(r#"class="lane neck""#));
    assert!(!svg.contains(">Neck</text>"));
    assert!(svg.contains(">Backbone</text>"));
    assert!(svg.contains(">Head</text>"));
}

#[test]
fn diagram_id_prefixes_defs() {
    let diagram = layout_parsed(&parse(ROUTING_MODEL), &LayoutOptions::default()).unwrap();
    let options = SvgRenderOptions {
        diagram_id: "yolo".to_string(),
    };
    let svg = render_svg(&diagram, &crate::theme::dark(), &options);
    assert!(svg.contains(r#"<marker id="yolo-arrow""#));
    assert!(svg.contains(r#"id="yolo-grad-node""#));
    assert!(!svg.contains("lanegraph-"));
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render(ROUTING_MODEL, "candy"), render(ROUTING_MODEL, "candy"));
}

#[test]
fn numbers_are_trimmed_to_three_decimals() {
    assert_eq!(fmt(100.0), "100");
    assert_eq!(fmt(1.2), "1.2");
    assert_eq!(fmt(0.1 + 0.2), "0.3");
    assert_eq!(fmt(2.0 / 3.0), "0.667");
    assert_eq!(fmt(-0.0), "0");
    assert_eq!(fmt(-0.0001), "0");
    assert_eq!(fmt(f64::NAN), "0");
    assert_eq!(fmt(-12.5), "-12.5");
}

#[test]
fn xml_text_is_escaped() {
    assert_eq!(escape_xml(r#"a<b & "c" > 'd'"#), "a&lt;b &amp; &quot;c&quot; &gt; &#39;d&#39;");
    assert_eq!(escape_xml("plain"), "plain");
}
