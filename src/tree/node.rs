use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A trait value in the v2 schema: the value itself plus optional
/// confidence and entropy annotations pulled from the legacy
/// `<key>_confidence` / `<key>_entropy` siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitValue {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
}

/// Inferred numeric date of a node, with an optional confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumDate {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<[f64; 2]>,
}

/// Publication metadata attached to a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Display name ("Smith Et Al").
    pub author: String,
    /// The raw lookup key the legacy document used.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_url: Option<String>,
}

/// Vaccine annotations. A strain can be both a selected vaccine strain and
/// a serological reference, so the two fields are independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vaccine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serum: Option<bool>,
}

/// A node of the v2 tree. The field set is closed: everything the legacy
/// schema carried that has no field here is dropped during migration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub strain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_date: Option<NumDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccine: Option<Vaccine>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutations: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: BTreeMap<String, TraitValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl TreeNode {
    /// Tips are nodes without children.
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    /// The numeric date value, when inferred.
    pub fn date(&self) -> Option<f64> {
        self.num_date.as_ref().map(|d| d.value)
    }
}

/// Resolve a named trait on a node, returning the raw value.
pub fn get_trait_from_node<'a>(node: &'a TreeNode, key: &str) -> Option<&'a Value> {
    node.traits.get(key).map(|t| &t.value)
}
