use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a coloring's values map onto a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Continuous,
    Categorical,
}

/// One entry of the v2 `colorings` block, derived 1:1 from a legacy
/// `color_options` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coloring {
    pub title: String,
    #[serde(rename = "type")]
    pub scale_type: ScaleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The legacy `authors` coloring/filter key became `author` in v2.
fn rename_authors(key: &str) -> &str {
    if key == "authors" { "author" } else { key }
}

pub(crate) fn convert_colorings(meta: &Value) -> BTreeMap<String, Coloring> {
    let mut colorings = BTreeMap::new();
    let Some(options) = meta.get("color_options").and_then(Value::as_object) else {
        return colorings;
    };
    for (key, data) in options {
        let title = data
            .get("menuItem")
            .or_else(|| data.get("legendTitle"))
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string();
        let scale_type = if data.get("type").and_then(Value::as_str) == Some("continuous") {
            ScaleType::Continuous
        } else {
            ScaleType::Categorical
        };
        let scale = data.get("color_map").cloned();
        colorings.insert(rename_authors(key).to_string(), Coloring { title, scale_type, scale });
    }
    colorings
}

/// The legacy schema held a single `[name, url]` maintainer pair.
pub(crate) fn convert_maintainers(meta: &Value) -> Option<Vec<Maintainer>> {
    let pair = meta.get("maintainer")?.as_array()?;
    let name = pair.first()?.as_str()?.to_string();
    let url = pair.get(1).and_then(Value::as_str).map(str::to_string);
    Some(vec![Maintainer { name, url }])
}

pub(crate) fn convert_filters(meta: &Value) -> Option<Vec<String>> {
    let filters = meta.get("filters")?.as_array()?;
    Some(
        filters
            .iter()
            .filter_map(Value::as_str)
            .map(|f| rename_authors(f).to_string())
            .collect(),
    )
}

const DISPLAY_DEFAULT_RENAMES: [(&str, &str); 4] = [
    ("geoResolution", "geo_resolution"),
    ("colorBy", "color_by"),
    ("distanceMeasure", "distance_measure"),
    ("mapTriplicate", "map_triplicate"),
];

/// Carry over the four recognised display defaults, renamed to snake_case.
pub(crate) fn convert_display_defaults(meta: &Value) -> Option<BTreeMap<String, Value>> {
    let defaults = meta.get("defaults")?.as_object()?;
    let mut out = BTreeMap::new();
    for (legacy, renamed) in DISPLAY_DEFAULT_RENAMES {
        if let Some(value) = defaults.get(legacy) {
            out.insert(renamed.to_string(), value.clone());
        }
    }
    (!out.is_empty()).then_some(out)
}
