use lanegraph_core::{Lane, Node};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Attachment point on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    #[serde(flatten)]
    pub node: Node,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Sub-column within the lane. Always 0 outside the intermediate lane.
    pub column_group: usize,
}

impl PlacedNode {
    pub fn index(&self) -> usize {
        self.node.index
    }

    pub fn lane(&self) -> Lane {
        self.node.lane
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn anchor(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::Top => Point::new(self.center_x(), self.y),
            Anchor::Bottom => Point::new(self.center_x(), self.bottom()),
            Anchor::Left => Point::new(self.x, self.center_y()),
            Anchor::Right => Point::new(self.x + self.width, self.center_y()),
        }
    }
}

/// Background region of one lane, spanning the canvas below the band top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneBand {
    pub lane: Lane,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Baseline of the lane title.
    pub title_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStyle {
    VerticalStraight,
    Manhattan,
    DetourRight,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub from: usize,
    pub to: usize,
    pub style: RoutingStyle,
    pub dashed: bool,
    pub cross_lane: bool,
    pub start: Point,
    pub end: Point,
    /// Cubic control points. `None` for straight segments.
    pub controls: Option<[Point; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutedDiagram {
    /// Placed nodes in index order.
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
    pub lanes: Vec<LaneBand>,
    pub width: f64,
    pub height: f64,
    /// Bottom edge of the primary lane; the overflow limit of the intermediate sub-columns.
    pub max_primary_y: f64,
    pub intermediate_columns: usize,
    pub input_channels: i64,
}

impl LayoutedDiagram {
    pub fn node(&self, index: usize) -> Option<&PlacedNode> {
        self.nodes
            .binary_search_by_key(&index, PlacedNode::index)
            .ok()
            .map(|i| &self.nodes[i])
    }

    pub fn lane_nodes(&self, lane: Lane) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.iter().filter(move |n| n.lane() == lane)
    }
}
