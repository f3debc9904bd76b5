//! Closed table of recognized layer kinds.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Conv,
    Concat,
    Upsample,
    Detect,
    C2f,
    Unknown,
}

// Exact names are checked first, then prefixes. Matching ignores ASCII case.
const EXACT: &[(&str, LayerKind)] = &[
    ("Conv", LayerKind::Conv),
    ("Conv2", LayerKind::Conv),
    ("DWConv", LayerKind::Conv),
    ("GhostConv", LayerKind::Conv),
    ("LightConv", LayerKind::Conv),
    ("RepConv", LayerKind::Conv),
    ("DWConvTranspose2d", LayerKind::Conv),
    ("Concat", LayerKind::Concat),
    ("Upsample", LayerKind::Upsample),
    ("Detect", LayerKind::Detect),
    ("Segment", LayerKind::Detect),
    ("Pose", LayerKind::Detect),
    ("OBB", LayerKind::Detect),
    ("v10Detect", LayerKind::Detect),
    ("WorldDetect", LayerKind::Detect),
    ("RTDETRDecoder", LayerKind::Detect),
    ("C2f", LayerKind::C2f),
];

const PREFIXES: &[(&str, LayerKind)] = &[
    ("Conv", LayerKind::Conv),
    ("Concat", LayerKind::Concat),
    ("Upsample", LayerKind::Upsample),
    ("Detect", LayerKind::Detect),
    ("C2f", LayerKind::C2f),
];

impl LayerKind {
    /// Classifies a normalized kind label (see [`normalize_label`]).
    pub fn classify(label: &str) -> Self {
        if let Some((_, kind)) = EXACT
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
        {
            return *kind;
        }
        PREFIXES
            .iter()
            .find(|(prefix, _)| {
                label.len() >= prefix.len()
                    && label.is_char_boundary(prefix.len())
                    && label[..prefix.len()].eq_ignore_ascii_case(prefix)
            })
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Unknown)
    }

    /// Merge kinds combine their inputs along the channel axis.
    pub fn is_merge(self) -> bool {
        matches!(self, Self::Concat)
    }

    /// Terminal kinds produce model outputs; their channel counts are never rounded.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Detect)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conv => "conv",
            Self::Concat => "concat",
            Self::Upsample => "upsample",
            Self::Detect => "detect",
            Self::C2f => "c2f",
            Self::Unknown => "other",
        }
    }
}

/// Drops namespace qualifiers: `nn.modules.Upsample` -> `Upsample`.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let tail = trimmed.rsplit('.').next().unwrap_or(trimmed);
    if tail.is_empty() {
        trimmed.to_string()
    } else {
        tail.to_string()
    }
}
