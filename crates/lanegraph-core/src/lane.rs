use crate::kind::LayerKind;
use serde::Serialize;

/// Visual lane a node is drawn in, ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Primary,
    Intermediate,
    Terminal,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Primary, Lane::Intermediate, Lane::Terminal];

    pub fn title(self) -> &'static str {
        match self {
            Self::Primary => "Backbone",
            Self::Intermediate => "Neck",
            Self::Terminal => "Head",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Primary => "backbone",
            Self::Intermediate => "neck",
            Self::Terminal => "head",
        }
    }
}

/// Assigns the lane for the entry at `index`.
///
/// Entries before `primary_len` are primary. After the boundary only the very last entry of
/// the whole sequence can be terminal, and only when it is a detection kind; every other
/// post-boundary entry is intermediate, including earlier detection kinds.
pub fn classify(index: usize, primary_len: usize, last_index: usize, kind: LayerKind) -> Lane {
    if index < primary_len {
        Lane::Primary
    } else if index == last_index && kind.is_terminal() {
        Lane::Terminal
    } else {
        Lane::Intermediate
    }
}
