use crate::theme::{Theme, ThemeRegistry};
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Fixed geometry of the three-lane layout. All lengths are SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub lane_width_primary: f64,
    /// Width of one intermediate sub-column.
    pub lane_width_intermediate: f64,
    pub lane_width_terminal: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Vertical distance between consecutive primary nodes.
    pub primary_step: f64,
    /// Vertical distance between consecutive nodes of one intermediate sub-column.
    pub intermediate_step: f64,
    /// Horizontal gap between intermediate sub-columns.
    pub column_gap: f64,
    /// Top edge of the first node in every lane.
    pub lane_top: f64,
    pub max_intermediate_columns: usize,
    /// Horizontal bulge of same-column detour curves.
    pub detour_offset: f64,
    pub bottom_margin: f64,
    pub band_top: f64,
    pub title_baseline: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_width_primary: 220.0,
            lane_width_intermediate: 220.0,
            lane_width_terminal: 220.0,
            node_width: 150.0,
            node_height: 44.0,
            primary_step: 80.0,
            intermediate_step: 120.0,
            column_gap: 80.0,
            lane_top: 100.0,
            max_intermediate_columns: 3,
            detour_offset: 60.0,
            bottom_margin: 50.0,
            band_top: 30.0,
            title_baseline: 55.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("lane_width_primary", self.lane_width_primary),
            ("lane_width_intermediate", self.lane_width_intermediate),
            ("lane_width_terminal", self.lane_width_terminal),
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("primary_step", self.primary_step),
            ("intermediate_step", self.intermediate_step),
        ];
        for (key, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("layout.{key} must be a positive number, got {v}"),
                });
            }
        }
        let non_negative = [
            ("column_gap", self.column_gap),
            ("lane_top", self.lane_top),
            ("detour_offset", self.detour_offset),
            ("bottom_margin", self.bottom_margin),
            ("band_top", self.band_top),
            ("title_baseline", self.title_baseline),
        ];
        for (key, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("layout.{key} must be a non-negative number, got {v}"),
                });
            }
        }
        if self.max_intermediate_columns == 0 {
            return Err(Error::InvalidConfig {
                message: "layout.max_intermediate_columns must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// User overrides, shaped as `{"theme": {...}, "layout": {...}}`.
///
/// Overrides are deep-merged onto the serialized base record, then deserialized back, so any
/// field of [`Theme`] or [`LayoutConfig`] can be replaced without restating the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOverrides(Value);

impl Default for ConfigOverrides {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl ConfigOverrides {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a YAML (or JSON, which is a YAML subset) override document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty_object());
        }
        let value: Value = serde_yaml::from_str(text)?;
        if !(value.is_object() || value.is_null()) {
            return Err(Error::InvalidConfig {
                message: "override document must be a mapping".to_string(),
            });
        }
        if value.is_null() {
            return Ok(Self::empty_object());
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Applies a `dotted.path=value` assignment. The value is read as JSON when possible
    /// (`180`, `true`, `"#fff"`) and as a bare string otherwise.
    pub fn set_assignment(&mut self, assignment: &str) -> Result<()> {
        let Some((path, raw)) = assignment.split_once('=') else {
            return Err(Error::InvalidConfig {
                message: format!("expected key=value, got `{assignment}`"),
            });
        };
        let path = path.trim();
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(Error::InvalidConfig {
                message: format!("invalid override key `{path}`"),
            });
        }
        let raw = raw.trim();
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.set_value(path, value);
        Ok(())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    fn section(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Merges the `key` section onto `base` and reads the result back as `T`.
    pub fn apply<T>(&self, key: &str, base: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let Some(section) = self.section(key) else {
            return Ok(base.clone());
        };
        if !section.is_object() {
            return Err(Error::InvalidConfig {
                message: format!("`{key}` overrides must be a mapping"),
            });
        }
        let mut merged = serde_json::to_value(base)?;
        deep_merge_value(&mut merged, section);
        serde_json::from_value(merged).map_err(|e| Error::InvalidConfig {
            message: format!("`{key}` overrides: {e}"),
        })
    }

    pub fn layout_config(&self) -> Result<LayoutConfig> {
        let config = self.apply("layout", &LayoutConfig::default())?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves `name` in the registry (falling back to the default theme) and applies the
    /// `theme` section on top.
    pub fn theme(&self, registry: &ThemeRegistry, name: &str) -> Result<Theme> {
        self.apply("theme", registry.resolve(name))
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (k, v) in incoming_map {
                match base_map.get_mut(k) {
                    Some(existing) => deep_merge_value(existing, v),
                    None => {
                        base_map.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (base_slot, v) => {
            *base_slot = v.clone();
        }
    }
}
