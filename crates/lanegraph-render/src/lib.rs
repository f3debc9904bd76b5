#![forbid(unsafe_code)]

//! Layout engine, edge router and renderers for parsed lane models.

pub mod config;
pub mod layout;
pub mod mermaid;
pub mod model;
pub mod route;
pub mod svg;
pub mod theme;

pub use config::{ConfigOverrides, LayoutConfig};
pub use model::{LayoutedDiagram, PlacedNode, RoutedEdge, RoutingStyle};
pub use theme::{Theme, ThemeRegistry};

use lanegraph_core::ParsedModel;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub config: LayoutConfig,
}

pub fn layout_parsed(parsed: &ParsedModel, options: &LayoutOptions) -> Result<LayoutedDiagram> {
    options.config.validate()?;
    Ok(layout::layout_model(parsed, &options.config))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Svg,
    Mermaid,
}

impl RenderFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Mermaid => "mmd",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            other => Err(Error::InvalidConfig {
                message: format!("unknown output format `{other}` (expected svg or mermaid)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
