use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::common::{PrettyOptions, pretty_string};
use crate::tree::{NumDate, TraitValue, TreeNode};

/// Legacy `attr` keys with no v2 counterpart; dropped without becoming traits.
const IGNORED_ATTRS: [&str; 4] = ["clock_length", "date", "raw_date", "strain"];

/// Pre-order walk over the legacy value tree. Children are descended after
/// `visit`, so `visit` must not replace the `children` array of the node it
/// is currently handed.
fn walk(node: &mut Value, visit: &mut impl FnMut(&mut Map<String, Value>)) {
    if let Value::Object(map) = node {
        visit(map);
        if let Some(Value::Array(children)) = map.get_mut("children") {
            for child in children {
                walk(child, visit);
            }
        }
    }
}

/// Replace each node's `attr.authors` lookup key with a resolved
/// `attr.author` object. Keys with no `author_info` entry are deleted and
/// their data is lost, matching the legacy behavior.
pub(crate) fn propagate_author_info(tree: &mut Value, meta: &Value) {
    let Some(author_info) = meta.get("author_info").and_then(Value::as_object) else {
        return;
    };
    walk(tree, &mut |node| {
        let Some(attr) = node.get_mut("attr").and_then(Value::as_object_mut) else {
            return;
        };
        let Some(Value::String(key)) = attr.remove("authors") else {
            return;
        };
        let Some(info) = author_info.get(&key) else {
            return;
        };
        let mut author = Map::new();
        for field in ["title", "journal", "paper_url"] {
            if let Some(value) = info.get(field) {
                author.insert(field.to_string(), value.clone());
            }
        }
        author.insert(
            "author".to_string(),
            Value::String(pretty_string(&key, PrettyOptions::default())),
        );
        author.insert("value".to_string(), Value::String(key));
        attr.insert("author".to_string(), Value::Object(author));
    });
}

/// Attach `vaccine.selection_date` to nodes whose strain appears in the
/// legacy `vaccine_choices` table.
pub(crate) fn set_vaccine_choices(tree: &mut Value, meta: &Value) {
    let Some(choices) = meta.get("vaccine_choices").and_then(Value::as_object) else {
        return;
    };
    walk(tree, &mut |node| {
        let Some(date) = node.get("strain").and_then(Value::as_str).and_then(|s| choices.get(s))
        else {
            return;
        };
        let date = date.clone();
        if let Some(vaccine) = vaccine_entry(node) {
            vaccine.insert("selection_date".to_string(), date);
        }
    });
}

/// Mark serological reference strains. Independent of the selection-date
/// pass; a node can carry both fields.
pub(crate) fn set_serum(tree: &mut Value) {
    walk(tree, &mut |node| {
        if is_truthy(node.get("serum")) {
            if let Some(vaccine) = vaccine_entry(node) {
                vaccine.insert("serum".to_string(), Value::Bool(true));
            }
        }
    });
}

/// The node's `vaccine` object, created on demand. A legacy non-object
/// value under that key is replaced rather than kept.
fn vaccine_entry(node: &mut Map<String, Value>) -> Option<&mut Map<String, Value>> {
    let entry = node.entry("vaccine").or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry.as_object_mut()
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

/// Reshape one legacy node (and, recursively, its subtree) into the typed
/// v2 node. Consumes the value; anything without a field on [`TreeNode`]
/// is discarded here, which is the allow-list prune of the legacy pipeline
/// expressed through the type.
pub(crate) fn convert_node(value: Value) -> TreeNode {
    let mut map = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let mut node = TreeNode::default();

    if let Some(Value::String(strain)) = map.remove("strain") {
        node.strain = strain;
    }
    if let Some(Value::Bool(hidden)) = map.remove("hidden") {
        node.hidden = Some(hidden);
    }
    if let Some(vaccine) = map.remove("vaccine") {
        node.vaccine = serde_json::from_value(vaccine).ok();
    }

    let muts = map.remove("muts");
    let aa_muts = map.remove("aa_muts").and_then(|v| match v {
        Value::Object(genes) => Some(genes),
        _ => None,
    });
    if let Some(label) = aa_label(aa_muts.as_ref()) {
        node.labels.insert("aa".to_string(), label);
    }
    node.mutations = build_mutations(muts, aa_muts);

    if let Some(Value::Object(mut attr)) = map.remove("attr") {
        if let Some(author) = attr.remove("author") {
            node.author = serde_json::from_value(author).ok();
        }
        if let Some(Value::String(accession)) = attr.remove("accession") {
            node.accession = Some(accession);
        }
        if let Some(Value::String(url)) = attr.remove("url") {
            node.url = Some(url);
        }

        // clade_annotation wins over clade_name; both leave the bag either way
        let annotation = attr.remove("clade_annotation");
        let name = attr.remove("clade_name");
        if let Some(Value::String(clade)) = annotation.or(name) {
            node.labels.insert("clade".to_string(), clade);
        }

        if let Some(value) = attr.remove("num_date").and_then(|v| v.as_f64()) {
            let confidence = attr
                .remove("num_date_confidence")
                .and_then(|v| serde_json::from_value(v).ok());
            node.num_date = Some(NumDate { value, confidence });
        }

        // div of 0 is falsy but valid and must survive
        if let Some(div) = attr.remove("div").and_then(|v| v.as_f64()) {
            node.div = Some(div);
        }

        for key in IGNORED_ATTRS {
            attr.remove(key);
        }

        let trait_keys: Vec<String> = attr
            .keys()
            .filter(|k| !k.ends_with("_confidence") && !k.ends_with("_entropy"))
            .cloned()
            .collect();
        for key in trait_keys {
            let Some(value) = attr.remove(&key) else { continue };
            let confidence = attr.remove(&format!("{key}_confidence"));
            let entropy = attr.remove(&format!("{key}_entropy")).and_then(|v| v.as_f64());
            node.traits.insert(key, TraitValue { value, confidence, entropy });
        }
    }

    if let Some(Value::Array(children)) = map.remove("children") {
        node.children = children.into_iter().map(convert_node).collect();
    }

    node
}

/// `labels.aa`: one `"<gene>: <muts>"` fragment per gene with mutations,
/// joined by `"; "`.
fn aa_label(aa_muts: Option<&Map<String, Value>>) -> Option<String> {
    let genes = aa_muts?;
    let parts: Vec<String> = genes
        .iter()
        .filter_map(|(gene, list)| {
            let list = list.as_array()?;
            if list.is_empty() {
                return None;
            }
            let muts: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
            Some(format!("{gene}: {}", muts.join(", ")))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

fn build_mutations(
    muts: Option<Value>,
    aa_muts: Option<Map<String, Value>>,
) -> Option<BTreeMap<String, Vec<String>>> {
    let mut mutations = BTreeMap::new();
    if let Some(genes) = aa_muts {
        for (gene, list) in genes {
            let list = match list {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            mutations.insert(gene, list);
        }
    }
    if let Some(Value::Array(nuc)) = muts {
        if !nuc.is_empty() {
            mutations.insert(
                "nuc".to_string(),
                nuc.into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            );
        }
    }
    (!mutations.is_empty()).then_some(mutations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attr_fields_are_hoisted_and_pruned() {
        let node = convert_node(json!({
            "strain": "A/fake/2016",
            "clade": 7,
            "attr": {
                "accession": "KX000001",
                "url": "https://example.org/KX000001",
                "div": 0.0,
                "num_date": 2016.45,
                "num_date_confidence": [2016.2, 2016.7],
                "country": "brazil",
                "country_confidence": { "brazil": 0.98 },
                "cTiter": 1.25,
                "cTiter_entropy": 0.33,
                "clock_length": 0.002,
                "raw_date": "2016-06-12"
            }
        }));
        assert_eq!(node.strain, "A/fake/2016");
        assert_eq!(node.accession.as_deref(), Some("KX000001"));
        assert_eq!(node.div, Some(0.0));
        let num_date = node.num_date.unwrap();
        assert_eq!(num_date.value, 2016.45);
        assert_eq!(num_date.confidence, Some([2016.2, 2016.7]));
        assert_eq!(node.traits["country"].value, "brazil");
        assert!(node.traits["country"].confidence.is_some());
        assert_eq!(node.traits["cTiter"].entropy, Some(0.33));
        // ignore-listed keys become neither fields nor traits
        assert!(!node.traits.contains_key("clock_length"));
        assert!(!node.traits.contains_key("raw_date"));
    }

    #[test]
    fn clade_annotation_wins_over_clade_name() {
        let node = convert_node(json!({
            "attr": { "clade_annotation": "3c2.A", "clade_name": "ignored" }
        }));
        assert_eq!(node.labels["clade"], "3c2.A");
        assert!(!node.traits.contains_key("clade_name"));
    }

    #[test]
    fn mutations_merge_nuc_and_aa() {
        let node = convert_node(json!({
            "muts": ["A123T"],
            "aa_muts": { "HA1": ["K160T", "N171K"], "HA2": [] }
        }));
        let mutations = node.mutations.unwrap();
        assert_eq!(mutations["nuc"], ["A123T"]);
        assert_eq!(mutations["HA1"], ["K160T", "N171K"]);
        assert!(mutations["HA2"].is_empty());
        assert_eq!(node.labels["aa"], "HA1: K160T, N171K");
    }

    #[test]
    fn author_keys_without_info_are_dropped_silently() {
        let meta = json!({ "author_info": { "smith2016" : { "journal": "Nature" } } });
        let mut tree = json!({
            "attr": { "authors": "nobody2020" },
            "children": [ { "attr": { "authors": "smith2016" } } ]
        });
        propagate_author_info(&mut tree, &meta);
        assert!(tree["attr"].get("authors").is_none());
        assert!(tree["attr"].get("author").is_none());
        let child = &tree["children"][0];
        assert_eq!(child["attr"]["author"]["journal"], "Nature");
        assert_eq!(child["attr"]["author"]["value"], "smith2016");
        assert_eq!(child["attr"]["author"]["author"], "Smith2016");
    }

    #[test]
    fn vaccine_passes_compose() {
        let meta = json!({ "vaccine_choices": { "A/fake/2016": "2017-02-01" } });
        let mut tree = json!({ "strain": "A/fake/2016", "serum": true });
        set_vaccine_choices(&mut tree, &meta);
        set_serum(&mut tree);
        let node = convert_node(tree);
        let vaccine = node.vaccine.unwrap();
        assert_eq!(vaccine.selection_date.as_deref(), Some("2017-02-01"));
        assert_eq!(vaccine.serum, Some(true));
    }
}
