mod metadata;
mod node_attrs;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tree::TreeNode;

pub use metadata::{Coloring, Maintainer, ScaleType};

/// Version string written into every converted dataset.
pub const SCHEMA_VERSION: &str = "2.0-alpha.0";

/// A legacy (v1) dataset as loaded from disk. The tree and metadata are
/// kept free-form; `convert` is where structure is imposed.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyDataset {
    pub tree: Value,
    #[serde(default)]
    pub meta: Value,
    #[serde(default, alias = "treeName")]
    pub tree_name: Option<String>,
}

/// A converted (v2) dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub colorings: BTreeMap<String, Coloring>,
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Maintainer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genome_annotations: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_defaults: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic_info: Option<Value>,
    pub tree: TreeNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_name: Option<String>,
}

/// Convert a legacy dataset into the v2 schema.
///
/// Consumes its input: the legacy tree is reshaped node by node into the
/// typed output tree rather than copied. Best-effort by contract: missing
/// metadata is warned about or silently dropped, and a document always
/// comes back.
pub fn convert(legacy: LegacyDataset) -> Dataset {
    let LegacyDataset { mut tree, meta, tree_name } = legacy;

    let colorings = metadata::convert_colorings(&meta);

    let title = meta
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let updated = meta.get("updated").and_then(Value::as_str).map(str::to_string);
    if updated.is_none() {
        eprintln!("[convert] the legacy dataset has no `updated` field");
    }

    // Node passes. Author and vaccine annotation run over the free-form
    // tree first so the reshape pass sees their output.
    node_attrs::propagate_author_info(&mut tree, &meta);
    node_attrs::set_vaccine_choices(&mut tree, &meta);
    node_attrs::set_serum(&mut tree);
    let tree = node_attrs::convert_node(tree);

    Dataset {
        colorings,
        title,
        version: SCHEMA_VERSION.to_string(),
        updated,
        maintainers: metadata::convert_maintainers(&meta),
        genome_annotations: meta.get("annotations").cloned(),
        filters: metadata::convert_filters(&meta),
        panels: meta.get("panels").cloned(),
        display_defaults: metadata::convert_display_defaults(&meta),
        geographic_info: meta.get("geo").cloned(),
        tree,
        tree_name,
    }
}
