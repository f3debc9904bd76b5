//! Theme records and the named theme registry.
//!
//! A [`Theme`] is an immutable style record. [`ThemeRegistry::builtin`] builds the preset
//! table once; callers resolve a name and pass the record down the pipeline.

use indexmap::IndexMap;
use lanegraph_core::LayerKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "paper";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg_backbone: String,
    pub bg_neck: String,
    pub bg_head: String,
    pub stroke: String,
    pub line: String,
    pub fill_node: String,
    pub fill_concat: String,
    #[serde(default)]
    pub fill_upsample: Option<String>,
    #[serde(default)]
    pub fill_detect: Option<String>,
    pub text_main: String,
    pub text_sub: String,
}

/// Accent strip color per layer kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindColors {
    pub conv: String,
    pub concat: String,
    pub detect: String,
    pub upsample: String,
    pub c2f: String,
    pub other: String,
}

impl Default for KindColors {
    fn default() -> Self {
        kind_colors("#2196F3", "#FFC107", "#F44336", "#4CAF50", "#9E9E9E", "#607D8B")
    }
}

impl KindColors {
    pub fn accent(&self, kind: LayerKind) -> &str {
        match kind {
            LayerKind::Conv => &self.conv,
            LayerKind::Concat => &self.concat,
            LayerKind::Detect => &self.detect,
            LayerKind::Upsample => &self.upsample,
            LayerKind::C2f => &self.c2f,
            LayerKind::Unknown => &self.other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStops {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradients {
    pub backbone: GradientStops,
    pub neck: GradientStops,
    pub head: GradientStops,
    pub concat: GradientStops,
    pub node: GradientStops,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub gradients: Option<Gradients>,
    #[serde(default)]
    pub kind_colors: KindColors,
    pub font: String,
    #[serde(default)]
    pub radius: f64,
}

impl Theme {
    /// Body fill for a node of `kind`. Missing per-kind overrides use the default node fill.
    pub fn fill_for(&self, kind: LayerKind) -> &str {
        let c = &self.colors;
        match kind {
            LayerKind::Concat => &c.fill_concat,
            LayerKind::Upsample => c.fill_upsample.as_deref().unwrap_or(&c.fill_node),
            LayerKind::Detect => c.fill_detect.as_deref().unwrap_or(&c.fill_node),
            _ => &c.fill_node,
        }
    }

    /// True when `kind` has a dedicated flat fill that takes precedence over gradients.
    pub fn has_fill_override(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Upsample => self.colors.fill_upsample.is_some(),
            LayerKind::Detect => self.colors.fill_detect.is_some(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Theme>,
    fallback: Theme,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    /// A registry holding only `fallback`.
    pub fn new(fallback: Theme) -> Self {
        let mut themes = IndexMap::new();
        themes.insert(fallback.name.clone(), fallback.clone());
        Self { themes, fallback }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new(paper());
        for theme in [
            candy(),
            dark(),
            ocean(),
            retro(),
            blueprint(),
            forest(),
            paper_ryb(),
            journal(),
        ] {
            registry.insert(theme);
        }
        registry
    }

    pub fn insert(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Looks up `name`, falling back to the default theme for unknown names.
    pub fn resolve(&self, name: &str) -> &Theme {
        match self.themes.get(name) {
            Some(theme) => theme,
            None => {
                tracing::debug!(
                    theme = name,
                    fallback = %self.fallback.name,
                    "unknown theme, using default"
                );
                &self.fallback
            }
        }
    }

    pub fn default_theme(&self) -> &Theme {
        &self.fallback
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

fn s(v: &str) -> String {
    v.to_string()
}

fn kind_colors(
    conv: &str,
    concat: &str,
    detect: &str,
    upsample: &str,
    c2f: &str,
    other: &str,
) -> KindColors {
    KindColors {
        conv: s(conv),
        concat: s(concat),
        detect: s(detect),
        upsample: s(upsample),
        c2f: s(c2f),
        other: s(other),
    }
}

fn stops(start: &str, end: &str) -> GradientStops {
    GradientStops {
        start: s(start),
        end: s(end),
    }
}

pub fn paper() -> Theme {
    Theme {
        name: s("paper"),
        colors: ThemeColors {
            bg_backbone: s("#FAFAFA"),
            bg_neck: s("#FFFFFF"),
            bg_head: s("#FAFAFA"),
            stroke: s("#000000"),
            line: s("#333333"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#F0F0F0"),
            fill_upsample: None,
            fill_detect: None,
            text_main: s("#000000"),
            text_sub: s("#444444"),
        },
        gradients: Some(Gradients {
            backbone: stops("#FFFFFF", "#F5F5F5"),
            neck: stops("#FFFFFF", "#FFFFFF"),
            head: stops("#FFFFFF", "#F5F5F5"),
            concat: stops("#F0F0F0", "#E0E0E0"),
            node: stops("#FFFFFF", "#F9F9F9"),
        }),
        kind_colors: KindColors::default(),
        font: s("Times New Roman, serif"),
        radius: 0.0,
    }
}

pub fn candy() -> Theme {
    Theme {
        name: s("candy"),
        colors: ThemeColors {
            bg_backbone: s("#F0F4F8"),
            bg_neck: s("#FFF8F0"),
            bg_head: s("#F3F0F5"),
            stroke: s("#546E7A"),
            line: s("#607D8B"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#FFF9C4"),
            fill_upsample: Some(s("#E1F5FE")),
            fill_detect: Some(s("#FFEBEE")),
            text_main: s("#263238"),
            text_sub: s("#78909C"),
        },
        gradients: Some(Gradients {
            backbone: stops("#FFFFFF", "#FFFFFF"),
            neck: stops("#FFFFFF", "#FFFFFF"),
            head: stops("#FFFFFF", "#FFFFFF"),
            concat: stops("#FFF9C4", "#FFF59D"),
            node: stops("#FFFFFF", "#FFFFFF"),
        }),
        kind_colors: kind_colors(
            "#64B5F6", "#FFD54F", "#E57373", "#81C784", "#B0BEC5", "#90A4AE",
        ),
        font: s("Arial, sans-serif"),
        radius: 6.0,
    }
}

pub fn dark() -> Theme {
    Theme {
        name: s("dark"),
        colors: ThemeColors {
            bg_backbone: s("#1E1E1E"),
            bg_neck: s("#252526"),
            bg_head: s("#1E1E1E"),
            stroke: s("#61AFEF"),
            line: s("#ABB2BF"),
            fill_node: s("#2D3135"),
            fill_concat: s("#3E4451"),
            fill_upsample: None,
            fill_detect: None,
            text_main: s("#E5C07B"),
            text_sub: s("#98C379"),
        },
        gradients: Some(Gradients {
            backbone: stops("#2D3135", "#21252B"),
            neck: stops("#2D3135", "#21252B"),
            head: stops("#2D3135", "#21252B"),
            concat: stops("#3E4451", "#323844"),
            node: stops("#2D3135", "#21252B"),
        }),
        kind_colors: kind_colors(
            "#61AFEF", "#E5C07B", "#E06C75", "#98C379", "#5C6370", "#56B6C2",
        ),
        font: s("Consolas, monospace"),
        radius: 4.0,
    }
}

pub fn ocean() -> Theme {
    Theme {
        name: s("ocean"),
        colors: ThemeColors {
            bg_backbone: s("#E1F5FE"),
            bg_neck: s("#F0F4C3"),
            bg_head: s("#E1F5FE"),
            stroke: s("#0277BD"),
            line: s("#0288D1"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#B3E5FC"),
            fill_upsample: Some(s("#E0F7FA")),
            fill_detect: Some(s("#FFCCBC")),
            text_main: s("#01579B"),
            text_sub: s("#455A64"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#0288D1", "#FBC02D", "#FF7043", "#0097A7", "#78909C", "#546E7A",
        ),
        font: s("Verdana, Geneva, sans-serif"),
        radius: 5.0,
    }
}

pub fn retro() -> Theme {
    Theme {
        name: s("retro"),
        colors: ThemeColors {
            bg_backbone: s("#FBF1C7"),
            bg_neck: s("#EBDBB2"),
            bg_head: s("#FBF1C7"),
            stroke: s("#3C3836"),
            line: s("#504945"),
            fill_node: s("#F9F5D7"),
            fill_concat: s("#FABD2F"),
            fill_upsample: None,
            fill_detect: Some(s("#FB4934")),
            text_main: s("#282828"),
            text_sub: s("#928374"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#458588", "#D79921", "#CC241D", "#98971A", "#A89984", "#689D6A",
        ),
        font: s("Consolas, 'Courier New', monospace"),
        radius: 3.0,
    }
}

pub fn blueprint() -> Theme {
    Theme {
        name: s("blueprint"),
        colors: ThemeColors {
            bg_backbone: s("#2B3A42"),
            bg_neck: s("#3F5765"),
            bg_head: s("#2B3A42"),
            stroke: s("#FFFFFF"),
            line: s("#E0E0E0"),
            fill_node: s("#2B3A42"),
            fill_concat: s("#3F5765"),
            fill_upsample: None,
            fill_detect: None,
            text_main: s("#FFFFFF"),
            text_sub: s("#BDC3C7"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#29B6F6", "#FFEE58", "#EF5350", "#66BB6A", "#BDBDBD", "#78909C",
        ),
        font: s("Osifont, 'ISOCPEUR', 'Courier New', sans-serif"),
        radius: 0.0,
    }
}

pub fn forest() -> Theme {
    Theme {
        name: s("forest"),
        colors: ThemeColors {
            bg_backbone: s("#E8F5E9"),
            bg_neck: s("#F1F8E9"),
            bg_head: s("#E8F5E9"),
            stroke: s("#2E7D32"),
            line: s("#388E3C"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#C8E6C9"),
            fill_upsample: None,
            fill_detect: None,
            text_main: s("#1B5E20"),
            text_sub: s("#558B2F"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#66BB6A", "#FFEB3B", "#FF7043", "#43A047", "#8D6E63", "#7CB342",
        ),
        font: s("Georgia, serif"),
        radius: 8.0,
    }
}

pub fn paper_ryb() -> Theme {
    Theme {
        name: s("paper_ryb"),
        colors: ThemeColors {
            bg_backbone: s("#EBF5FB"),
            bg_neck: s("#FEF9E7"),
            bg_head: s("#FADBD8"),
            stroke: s("#2C3E50"),
            line: s("#34495E"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#FFF3E0"),
            fill_upsample: None,
            fill_detect: None,
            text_main: s("#17202A"),
            text_sub: s("#566573"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#2980B9", "#F39C12", "#C0392B", "#27AE60", "#7F8C8D", "#34495E",
        ),
        font: s("Times New Roman, serif"),
        radius: 2.0,
    }
}

pub fn journal() -> Theme {
    Theme {
        name: s("journal"),
        colors: ThemeColors {
            bg_backbone: s("#F5F7FA"),
            bg_neck: s("#FFFFFF"),
            bg_head: s("#F5F7FA"),
            stroke: s("#333333"),
            line: s("#222222"),
            fill_node: s("#FFFFFF"),
            fill_concat: s("#E0F2F1"),
            fill_upsample: None,
            fill_detect: Some(s("#F3E5F5")),
            text_main: s("#000000"),
            text_sub: s("#424242"),
        },
        gradients: None,
        kind_colors: kind_colors(
            "#00ACC1", "#FFB300", "#D81B60", "#43A047", "#757575", "#546E7A",
        ),
        font: s("Times New Roman, serif"),
        radius: 0.0,
    }
}
