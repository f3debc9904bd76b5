#![forbid(unsafe_code)]

//! Layer-spec parser + lane classifier (headless).
//!
//! Turns a `backbone` / `head` model description into an ordered node list with resolved
//! sources, simulated channel widths and stride multipliers, and a lane per node. Layout and
//! rendering live in `lanegraph-render`.
//!
//! Design goals:
//! - best-effort: per-entry problems are absorbed, only document-level failures are errors
//! - deterministic: the same input always yields the same model
//! - no evaluation of argument strings (see [`ArgValue::parse_literal`])

pub mod display;
pub mod error;
pub mod kind;
pub mod lane;
pub mod model;
mod parse;
pub mod value;

pub use display::DisplayOptions;
pub use error::{Error, Result};
pub use kind::LayerKind;
pub use lane::Lane;
pub use model::{LayerSpec, ModelDocument, Node, ParsedModel, Source, StrideMultiplier};
pub use parse::{make_divisible, resolve_source};
pub use value::ArgValue;

/// Channel count of the synthetic graph input (an RGB image).
pub const DEFAULT_INPUT_CHANNELS: i64 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    /// Strict parsing: malformed entries and unresolvable sources are errors.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lenient parsing: malformed entries are skipped and dangling sources are dropped.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    input_channels: i64,
    display: DisplayOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            input_channels: DEFAULT_INPUT_CHANNELS,
            display: DisplayOptions::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_channels(mut self, channels: i64) -> Self {
        self.input_channels = channels;
        self
    }

    pub fn with_display_options(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    pub fn input_channels(&self) -> i64 {
        self.input_channels
    }

    pub fn display_options(&self) -> &DisplayOptions {
        &self.display
    }

    /// Parses a YAML model description.
    pub fn parse_model_sync(&self, text: &str, options: ParseOptions) -> Result<ParsedModel> {
        let doc = ModelDocument::from_yaml_str(text)?;
        self.parse_document(&doc, options)
    }

    /// Parses an already-loaded document.
    pub fn parse_document(&self, doc: &ModelDocument, options: ParseOptions) -> Result<ParsedModel> {
        parse::parse_document(doc, self.input_channels, &self.display, options)
    }
}

#[cfg(test)]
mod tests;
