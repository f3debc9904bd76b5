use crate::model::StrideMultiplier;
use crate::value::ArgValue;
use serde::{Deserialize, Serialize};

/// Fields included in a node's secondary label line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_stride: bool,
    pub show_channels: bool,
    pub show_repeats: bool,
    pub show_args: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_stride: true,
            show_channels: true,
            show_repeats: false,
            show_args: false,
        }
    }
}

impl DisplayOptions {
    pub fn none() -> Self {
        Self {
            show_stride: false,
            show_channels: false,
            show_repeats: false,
            show_args: false,
        }
    }

    /// Parses a comma-separated field list such as `stride,channels,args`.
    /// `none` clears everything and `all` enables everything.
    pub fn from_field_list(list: &str) -> Option<Self> {
        let mut out = Self::none();
        for field in list.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match field.to_ascii_lowercase().as_str() {
                "none" => out = Self::none(),
                "all" => {
                    out = Self {
                        show_stride: true,
                        show_channels: true,
                        show_repeats: true,
                        show_args: true,
                    }
                }
                "stride" => out.show_stride = true,
                "channels" => out.show_channels = true,
                "repeats" | "n" => out.show_repeats = true,
                "args" => out.show_args = true,
                _ => return None,
            }
        }
        Some(out)
    }

    /// Builds `[main label, secondary line]`; the secondary line is omitted when empty.
    pub fn display_text(
        &self,
        kind_label: &str,
        stride: StrideMultiplier,
        output_channels: i64,
        repeats: i64,
        args: &[ArgValue],
    ) -> Vec<String> {
        let mut parts: Vec<String> = Vec::new();
        if self.show_stride {
            parts.push(stride.to_string());
        }
        if self.show_channels {
            parts.push(format!("{output_channels}c"));
        }
        if self.show_repeats {
            parts.push(format!("n={repeats}"));
        }
        if self.show_args && !args.is_empty() {
            parts.push(ArgValue::Seq(args.to_vec()).to_string());
        }

        let mut lines = vec![kind_label.to_string()];
        if !parts.is_empty() {
            lines.push(parts.join(" / "));
        }
        lines
    }
}
