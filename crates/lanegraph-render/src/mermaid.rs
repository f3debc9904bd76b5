//! Mermaid `flowchart LR` export.
//!
//! Each non-empty lane becomes a top-to-bottom subgraph. Invisible anchor nodes linked to the
//! first node of every subgraph keep the three columns top-aligned; their links are the first
//! ones emitted so `linkStyle` can hide them by position.

use crate::theme::Theme;
use lanegraph_core::{Lane, Node, ParsedModel, Source};
use std::fmt::Write as _;

pub fn render_mermaid(model: &ParsedModel, theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str("flowchart LR\n");
    let _ = writeln!(
        &mut out,
        r#"    Input(("Input<br>C={}")):::input"#,
        model.input_channels
    );

    let mut anchors: Vec<(usize, usize)> = Vec::new();
    for (slot, lane) in Lane::ALL.into_iter().enumerate() {
        let mut nodes = model.lane_nodes(lane).peekable();
        let Some(first) = nodes.peek() else {
            continue;
        };
        anchors.push((slot + 1, first.index));

        let _ = writeln!(&mut out, "    subgraph {}", lane.title());
        out.push_str("        direction TB\n");
        for node in nodes {
            let _ = writeln!(
                &mut out,
                r#"        L{}["{}"]:::{}"#,
                node.index,
                node_label(node),
                lane.class_name()
            );
        }
        out.push_str("    end\n\n");
    }

    for (slot, _) in &anchors {
        let _ = writeln!(&mut out, r#"    T{slot}((" ")):::invis"#);
    }
    for (slot, first) in &anchors {
        let _ = writeln!(&mut out, "    T{slot} --- L{first}");
    }

    for node in &model.nodes {
        for source in &node.sources {
            match source {
                Source::Input => {
                    let _ = writeln!(&mut out, "    Input --> L{}", node.index);
                }
                Source::Layer(from) => {
                    let _ = writeln!(&mut out, "    L{from} --> L{}", node.index);
                }
            }
        }
    }

    if !anchors.is_empty() {
        let hidden: Vec<String> = (0..anchors.len()).map(|i| i.to_string()).collect();
        let _ = writeln!(&mut out, "\n    linkStyle {} stroke:none", hidden.join(","));
    }

    let c = &theme.colors;
    out.push('\n');
    for (lane, fill) in [
        (Lane::Primary, &c.bg_backbone),
        (Lane::Intermediate, &c.bg_neck),
        (Lane::Terminal, &c.bg_head),
    ] {
        let _ = writeln!(
            &mut out,
            "    classDef {} fill:{fill},stroke:{},color:{},stroke-width:1px;",
            lane.class_name(),
            c.stroke,
            c.text_main
        );
    }
    let _ = writeln!(
        &mut out,
        "    classDef input fill:{},stroke:{},color:{},stroke-width:1px;",
        c.fill_concat, c.line, c.text_main
    );
    out.push_str("    classDef invis fill:none,stroke:none;\n");
    out
}

/// Label lines joined with `<br>`; double quotes would end the Mermaid string.
fn node_label(node: &Node) -> String {
    node.display_text.join("<br>").replace('"', "'")
}
