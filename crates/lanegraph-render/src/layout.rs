//! Three-lane placement.
//!
//! The primary lane is a single column stacked at a fixed step. Intermediate nodes fill up to
//! `max_intermediate_columns` sub-columns greedily; a sub-column is closed once its cursor has
//! passed the primary lane's bottom edge, except the last one, which grows unbounded. The
//! terminal node sits right of the rightmost occupied sub-column at the mean height of its
//! sources.

use crate::config::LayoutConfig;
use crate::model::{LaneBand, LayoutedDiagram, PlacedNode};
use crate::route::route_edges;
use lanegraph_core::{Lane, Node, ParsedModel, Source};
use rustc_hash::FxHashMap;

pub fn layout_model(model: &ParsedModel, config: &LayoutConfig) -> LayoutedDiagram {
    let mut placed: Vec<PlacedNode> = Vec::with_capacity(model.nodes.len());
    let mut tops: FxHashMap<usize, f64> = FxHashMap::default();

    let place = |node: &Node, x: f64, y: f64, column_group: usize| PlacedNode {
        node: node.clone(),
        x,
        y,
        width: config.node_width,
        height: config.node_height,
        column_group,
    };

    // Primary lane.
    let primary_x = (config.lane_width_primary - config.node_width) / 2.0;
    let mut cursor = config.lane_top;
    for node in model.lane_nodes(Lane::Primary) {
        tops.insert(node.index, cursor);
        placed.push(place(node, primary_x, cursor, 0));
        cursor += config.primary_step;
    }
    let max_primary_y = cursor - config.primary_step + config.node_height;
    tracing::debug!(
        nodes = model.primary_count(),
        max_primary_y,
        "placed primary lane"
    );

    // Intermediate lane.
    let last_column = config.max_intermediate_columns.saturating_sub(1);
    let mut column = 0usize;
    let mut columns_used = 0usize;
    let mut cursor = config.lane_top;
    for node in model.lane_nodes(Lane::Intermediate) {
        if cursor > max_primary_y && column < last_column {
            column += 1;
            cursor = config.lane_top;
        }
        let x = column_left(config, column)
            + (config.lane_width_intermediate - config.node_width) / 2.0;
        tops.insert(node.index, cursor);
        placed.push(place(node, x, cursor, column));
        columns_used = column + 1;
        cursor += config.intermediate_step;
    }
    tracing::debug!(columns = columns_used, "placed intermediate lane");

    // Terminal lane.
    let terminal_left = if columns_used == 0 {
        config.lane_width_primary
    } else {
        column_left(config, columns_used - 1) + config.lane_width_intermediate
    };
    let terminal_x = terminal_left + (config.lane_width_terminal - config.node_width) / 2.0;
    let mut cursor = config.lane_top;
    for node in model.lane_nodes(Lane::Terminal) {
        let source_tops: Vec<f64> = node
            .sources
            .iter()
            .filter_map(|s| match s {
                Source::Layer(i) => tops.get(i).copied(),
                Source::Input => None,
            })
            .collect();
        let mut y = if source_tops.is_empty() {
            cursor
        } else {
            source_tops.iter().sum::<f64>() / source_tops.len() as f64
        };
        if y < cursor {
            y = cursor;
        }
        tops.insert(node.index, y);
        placed.push(place(node, terminal_x, y, 0));
        cursor = y + config.intermediate_step;
    }

    placed.sort_by_key(PlacedNode::index);

    let lowest = placed
        .iter()
        .map(PlacedNode::bottom)
        .fold(max_primary_y, f64::max);
    let height = lowest + config.bottom_margin;
    let width = terminal_left + config.lane_width_terminal;

    let band = |lane: Lane, x: f64, width: f64| LaneBand {
        lane,
        title: lane.title().to_string(),
        x,
        y: config.band_top,
        width,
        height: height - config.band_top,
        title_y: config.title_baseline,
    };
    let lanes = vec![
        band(Lane::Primary, 0.0, config.lane_width_primary),
        band(
            Lane::Intermediate,
            config.lane_width_primary,
            terminal_left - config.lane_width_primary,
        ),
        band(Lane::Terminal, terminal_left, config.lane_width_terminal),
    ];

    let mut diagram = LayoutedDiagram {
        nodes: placed,
        edges: Vec::new(),
        lanes,
        width,
        height,
        max_primary_y,
        intermediate_columns: columns_used,
        input_channels: model.input_channels,
    };
    diagram.edges = route_edges(&diagram, config);
    diagram
}

/// Left edge of intermediate sub-column `column`.
fn column_left(config: &LayoutConfig, column: usize) -> f64 {
    config.lane_width_primary
        + column as f64 * (config.lane_width_intermediate + config.column_gap)
}
