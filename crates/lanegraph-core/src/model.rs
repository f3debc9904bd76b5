use crate::kind::LayerKind;
use crate::lane::Lane;
use crate::value::ArgValue;
use crate::{Error, Result};
use serde::{Serialize, Serializer};
use serde_yaml::Value;
use std::fmt;

/// Top-level model description: a primary (`backbone`) and a secondary (`head`) layer list.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDocument {
    pub backbone: Vec<Value>,
    pub head: Vec<Value>,
    pub depth_multiple: f64,
    pub width_multiple: f64,
}

impl Default for ModelDocument {
    fn default() -> Self {
        Self {
            backbone: Vec::new(),
            head: Vec::new(),
            depth_multiple: 1.0,
            width_multiple: 1.0,
        }
    }
}

impl ModelDocument {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Mapping(root) = value else {
            return Err(Error::InvalidDocument {
                message: "top level must be a mapping".to_string(),
            });
        };
        Ok(Self {
            backbone: layer_list(root.get("backbone"), "backbone")?,
            head: layer_list(root.get("head"), "head")?,
            depth_multiple: multiple(root.get("depth_multiple"), "depth_multiple")?,
            width_multiple: multiple(root.get("width_multiple"), "width_multiple")?,
        })
    }

    /// Iterates every entry in sequence order: backbone first, then head.
    pub fn entries(&self) -> impl Iterator<Item = &Value> {
        self.backbone.iter().chain(self.head.iter())
    }

    pub fn len(&self) -> usize {
        self.backbone.len() + self.head.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn layer_list(value: Option<&Value>, key: &str) -> Result<Vec<Value>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => Ok(items.clone()),
        Some(_) => Err(Error::InvalidDocument {
            message: format!("`{key}` must be a sequence of layer entries"),
        }),
    }
}

fn multiple(value: Option<&Value>, key: &str) -> Result<f64> {
    let v = match value {
        None | Some(Value::Null) => return Ok(1.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match v {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::InvalidDocument {
            message: format!("`{key}` must be a positive number"),
        }),
    }
}

/// One `[from, repeats, kind, args]` entry, with best-effort coercions applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub source_refs: Vec<i64>,
    pub repeat_count: i64,
    pub kind: String,
    pub raw_args: Vec<ArgValue>,
}

impl LayerSpec {
    /// Reads an entry. A wrong shape is an error; wrong element types fall back to safe
    /// defaults and are reported in the returned issue list.
    pub fn from_yaml(entry: &Value) -> std::result::Result<(Self, Vec<String>), String> {
        let Value::Sequence(items) = entry else {
            return Err("expected a [from, repeats, kind, args] list".to_string());
        };
        if items.len() != 4 {
            return Err(format!(
                "expected exactly 4 elements [from, repeats, kind, args], got {}",
                items.len()
            ));
        }

        let mut issues = Vec::new();
        let source_refs = match &items[0] {
            Value::Sequence(refs) => refs
                .iter()
                .map(|r| {
                    scalar_i64(r).unwrap_or_else(|| {
                        issues.push(format!("source reference {r:?} is not an integer"));
                        -1
                    })
                })
                .collect(),
            other => match scalar_i64(other) {
                Some(r) => vec![r],
                None => {
                    issues.push(format!("source reference {other:?} is not an integer"));
                    vec![-1]
                }
            },
        };

        let repeat_count = scalar_i64(&items[1]).unwrap_or_else(|| {
            issues.push(format!("repeat count {:?} is not an integer", items[1]));
            1
        });

        let kind = match &items[2] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                issues.push(format!("kind {other:?} is not a scalar"));
                "Unknown".to_string()
            }
        };

        let raw_args = match &items[3] {
            Value::Sequence(args) => args.iter().map(ArgValue::from_yaml).collect(),
            Value::Null => Vec::new(),
            other => {
                issues.push(format!("arguments {other:?} are not a list"));
                Vec::new()
            }
        };

        Ok((
            Self {
                source_refs,
                repeat_count,
                kind,
                raw_args,
            },
            issues,
        ))
    }
}

fn scalar_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// A resolved edge origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// The synthetic graph input feeding the first layer.
    Input,
    Layer(usize),
}

impl Source {
    /// `-1` for the synthetic input, otherwise the absolute layer index.
    pub fn as_index(self) -> i64 {
        match self {
            Self::Input => -1,
            Self::Layer(i) => i as i64,
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_index())
    }
}

/// Cumulative spatial down/upsampling factor, kept as an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StrideMultiplier {
    num: u64,
    den: u64,
}

impl Default for StrideMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl StrideMultiplier {
    pub const ONE: Self = Self { num: 1, den: 1 };

    pub fn new(num: u64, den: u64) -> Self {
        let g = gcd(num, den.max(1));
        Self {
            num: num / g,
            den: den.max(1) / g,
        }
    }

    pub fn doubled(self) -> Self {
        if self.den % 2 == 0 {
            Self::new(self.num, self.den / 2)
        } else {
            Self::new(self.num.saturating_mul(2), self.den)
        }
    }

    pub fn halved(self) -> Self {
        if self.num % 2 == 0 {
            Self::new(self.num / 2, self.den)
        } else {
            Self::new(self.num, self.den.saturating_mul(2))
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

impl fmt::Display for StrideMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}x", self.num)
        } else {
            write!(f, "{}/{}x", self.num, self.den)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Position in the input sequence; stable node identity.
    pub index: usize,
    pub lane: Lane,
    pub kind: LayerKind,
    pub kind_label: String,
    /// Resolved sources, deduplicated, in declaration order. All earlier than `index`.
    pub sources: Vec<Source>,
    /// Raw references that could not be resolved to an emitted layer.
    pub dangling_sources: Vec<i64>,
    pub input_channels: i64,
    pub output_channels: i64,
    pub stride: StrideMultiplier,
    pub repeats: i64,
    pub args: Vec<ArgValue>,
    pub display_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedModel {
    pub nodes: Vec<Node>,
    /// Number of backbone entries; the primary-lane boundary.
    pub primary_len: usize,
    pub input_channels: i64,
    pub depth_multiple: f64,
    pub width_multiple: f64,
    /// Indices of entries skipped as malformed.
    pub skipped: Vec<usize>,
}

impl ParsedModel {
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes
            .binary_search_by_key(&index, |n| n.index)
            .ok()
            .map(|i| &self.nodes[i])
    }

    pub fn lane_nodes(&self, lane: Lane) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.lane == lane)
    }

    pub fn primary_count(&self) -> usize {
        self.lane_nodes(Lane::Primary).count()
    }
}
