//! Edge routing: one fixed policy table keyed on lane transition and adjacency.

use crate::config::LayoutConfig;
use crate::model::{Anchor, LayoutedDiagram, PlacedNode, Point, RoutedEdge, RoutingStyle};
use lanegraph_core::{Lane, Source};

/// Routes one edge per (destination, resolved source) pair. Sources that were never placed,
/// including the synthetic input, produce no edge.
pub fn route_edges(diagram: &LayoutedDiagram, config: &LayoutConfig) -> Vec<RoutedEdge> {
    let mut edges = Vec::new();
    for dst in &diagram.nodes {
        for source in &dst.node.sources {
            let Source::Layer(from) = *source else {
                continue;
            };
            let Some(src) = diagram.node(from) else {
                tracing::debug!(from, to = dst.index(), "source not placed, no edge");
                continue;
            };
            edges.push(route_edge(src, dst, config));
        }
    }
    edges
}

pub fn route_edge(src: &PlacedNode, dst: &PlacedNode, config: &LayoutConfig) -> RoutedEdge {
    let adjacent = src.index().abs_diff(dst.index()) == 1;
    let cross_lane = src.lane() != dst.lane();
    let mut dashed = cross_lane || !adjacent;

    let (style, start, end) = match (src.lane(), dst.lane()) {
        (Lane::Primary, Lane::Primary) if adjacent => {
            dashed = false;
            vertical(src, dst)
        }
        (Lane::Primary, Lane::Intermediate) => (
            RoutingStyle::Manhattan,
            src.anchor(Anchor::Right),
            dst.anchor(Anchor::Left),
        ),
        (Lane::Intermediate, Lane::Intermediate) if src.column_group == dst.column_group => {
            if adjacent {
                dashed = false;
                vertical(src, dst)
            } else {
                (
                    RoutingStyle::DetourRight,
                    src.anchor(Anchor::Right),
                    dst.anchor(Anchor::Right),
                )
            }
        }
        _ if dst.x < src.x => (
            RoutingStyle::Standard,
            src.anchor(Anchor::Left),
            dst.anchor(Anchor::Right),
        ),
        _ => (
            RoutingStyle::Standard,
            src.anchor(Anchor::Right),
            dst.anchor(Anchor::Left),
        ),
    };

    RoutedEdge {
        from: src.index(),
        to: dst.index(),
        style,
        dashed,
        cross_lane,
        start,
        end,
        controls: control_points(style, start, end, config.detour_offset),
    }
}

fn vertical(src: &PlacedNode, dst: &PlacedNode) -> (RoutingStyle, Point, Point) {
    (
        RoutingStyle::VerticalStraight,
        src.anchor(Anchor::Bottom),
        dst.anchor(Anchor::Top),
    )
}

fn control_points(
    style: RoutingStyle,
    start: Point,
    end: Point,
    detour_offset: f64,
) -> Option<[Point; 2]> {
    match style {
        RoutingStyle::VerticalStraight => None,
        RoutingStyle::Manhattan => {
            let mid_x = (start.x + end.x) / 2.0;
            Some([Point::new(mid_x, start.y), Point::new(mid_x, end.y)])
        }
        RoutingStyle::DetourRight => Some([
            Point::new(start.x + detour_offset, start.y),
            Point::new(end.x + detour_offset, end.y),
        ]),
        RoutingStyle::Standard => {
            let half = (end.x - start.x).abs() / 2.0;
            Some([
                Point::new(start.x + half, start.y),
                Point::new(end.x - half, end.y),
            ])
        }
    }
}
