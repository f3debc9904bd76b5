use super::{ROUTING_MODEL, parse};
use crate::model::{Point, RoutedEdge};
use crate::route::route_edge;
use crate::*;
use lanegraph_core::{Lane, LayerKind, Node, StrideMultiplier};

fn routed() -> LayoutedDiagram {
    layout_parsed(&parse(ROUTING_MODEL), &LayoutOptions::default()).unwrap()
}

fn edge(diagram: &LayoutedDiagram, from: usize, to: usize) -> &RoutedEdge {
    diagram
        .edges
        .iter()
        .find(|e| e.from == from && e.to == to)
        .unwrap_or_else(|| panic!("no edge {from} -> {to}"))
}

fn placed(index: usize, lane: Lane, x: f64, y: f64, column_group: usize) -> PlacedNode {
    PlacedNode {
        node: Node {
            index,
            lane,
            kind: LayerKind::Conv,
            kind_label: "Conv".to_string(),
            sources: Vec::new(),
            dangling_sources: Vec::new(),
            input_channels: 3,
            output_channels: 16,
            stride: StrideMultiplier::ONE,
            repeats: 1,
            args: Vec::new(),
            display_text: vec!["Conv".to_string()],
        },
        x,
        y,
        width: 150.0,
        height: 44.0,
        column_group,
    }
}

#[test]
fn one_edge_per_placed_source() {
    let diagram = routed();
    assert_eq!(diagram.edges.len(), 11);
    assert!(diagram.edges.iter().all(|e| e.from < e.to));
}

#[test]
fn adjacent_primary_nodes_connect_straight_down() {
    let diagram = routed();
    let e = edge(&diagram, 0, 1);
    assert_eq!(e.style, RoutingStyle::VerticalStraight);
    assert!(!e.dashed);
    assert!(!e.cross_lane);
    assert_eq!(e.start, Point::new(110.0, 144.0));
    assert_eq!(e.end, Point::new(110.0, 180.0));
    assert_eq!(e.controls, None);
}

#[test]
fn primary_to_intermediate_uses_a_manhattan_curve() {
    let diagram = routed();
    let e = edge(&diagram, 4, 5);
    assert_eq!(e.style, RoutingStyle::Manhattan);
    assert!(e.dashed);
    assert!(e.cross_lane);
    assert_eq!(e.start, Point::new(185.0, 442.0));
    assert_eq!(e.end, Point::new(255.0, 122.0));
    assert_eq!(
        e.controls,
        Some([Point::new(220.0, 442.0), Point::new(220.0, 122.0)])
    );
}

#[test]
fn same_column_neighbours_are_straight_and_solid() {
    let diagram = routed();
    let e = edge(&diagram, 5, 6);
    assert_eq!(e.style, RoutingStyle::VerticalStraight);
    assert!(!e.dashed);
    assert_eq!(e.start, Point::new(330.0, 144.0));
    assert_eq!(e.end, Point::new(330.0, 220.0));
}

#[test]
fn same_column_skip_detours_to_the_right() {
    let diagram = routed();
    let e = edge(&diagram, 5, 7);
    assert_eq!(e.style, RoutingStyle::DetourRight);
    assert!(e.dashed);
    assert!(!e.cross_lane);
    assert_eq!(e.start, Point::new(405.0, 122.0));
    assert_eq!(e.end, Point::new(405.0, 362.0));
    assert_eq!(
        e.controls,
        Some([Point::new(465.0, 122.0), Point::new(465.0, 362.0)])
    );
}

#[test]
fn edges_into_the_terminal_lane_use_the_default_curve() {
    let diagram = routed();
    let e = edge(&diagram, 2, 8);
    assert_eq!(e.style, RoutingStyle::Standard);
    assert!(e.dashed);
    assert_eq!(e.start, Point::new(185.0, 282.0));
    assert_eq!(e.end, Point::new(475.0, 322.0));
    assert_eq!(
        e.controls,
        Some([Point::new(330.0, 282.0), Point::new(330.0, 322.0)])
    );
}

#[test]
fn backward_edges_leave_from_the_left_edge() {
    let config = LayoutConfig::default();
    let src = placed(3, Lane::Intermediate, 555.0, 100.0, 1);
    let dst = placed(4, Lane::Intermediate, 255.0, 220.0, 0);
    let e = route_edge(&src, &dst, &config);
    assert_eq!(e.style, RoutingStyle::Standard);
    assert_eq!(e.start, Point::new(555.0, 122.0));
    assert_eq!(e.end, Point::new(405.0, 242.0));
    // Adjacent and in the same lane, so solid.
    assert!(!e.dashed);
}

#[test]
fn non_adjacent_primary_edges_are_dashed() {
    let config = LayoutConfig::default();
    let src = placed(0, Lane::Primary, 35.0, 100.0, 0);
    let dst = placed(2, Lane::Primary, 35.0, 260.0, 0);
    let e = route_edge(&src, &dst, &config);
    assert_eq!(e.style, RoutingStyle::Standard);
    assert!(e.dashed);
    assert_eq!(e.start, Point::new(185.0, 122.0));
    assert_eq!(e.end, Point::new(35.0, 282.0));
}

#[test]
fn dangling_sources_produce_no_edge() {
    let model = parse(
        r#"
backbone:
  - [-1, 1, Conv, [16, 3, 2]]
  - [-1, 1, Conv, [32, 3, 2]]
head:
  - [[-1, 99], 1, Concat, [1]]
"#,
    );
    let diagram = layout_parsed(&model, &LayoutOptions::default()).unwrap();
    let into_concat: Vec<_> = diagram.edges.iter().filter(|e| e.to == 2).collect();
    assert_eq!(into_concat.len(), 1);
    assert_eq!(into_concat[0].from, 1);
}
