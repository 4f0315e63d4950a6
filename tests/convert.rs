use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use phylomap::{LegacyDataset, SCHEMA_VERSION, TreeNode, convert, traverse};

/// A small but fully-featured legacy document: colorings, maintainer,
/// author info, vaccine choices, and a three-tip tree with attr bags.
fn legacy_document() -> Value {
    json!({
        "meta": {
            "title": "Real-time tracking of fake virus",
            "updated": "2018-10-04",
            "maintainer": ["jane doe", "https://example.org"],
            "filters": ["country", "authors"],
            "panels": ["tree", "map"],
            "annotations": { "HA1": { "start": 1, "end": 987 } },
            "defaults": { "geoResolution": "country", "colorBy": "country", "mapTriplicate": true },
            "geo": { "country": { "brazil": { "latitude": -10.3, "longitude": -53.2 } } },
            "color_options": {
                "country": { "menuItem": "country", "type": "discrete" },
                "num_date": { "legendTitle": "Sampling date", "type": "continuous" },
                "authors": { "menuItem": "authors" }
            },
            "author_info": {
                "smith2016": { "title": "A paper", "journal": "Nature", "paper_url": "https://doi.example" }
            },
            "vaccine_choices": { "A/fake/1/2016": "2017-02-01" }
        },
        "treeName": "fake",
        "tree": {
            "strain": "NODE_0000000",
            "attr": { "div": 0, "num_date": 2015.1, "country": "brazil" },
            "children": [
                {
                    "strain": "A/fake/1/2016",
                    "serum": true,
                    "muts": ["A123T"],
                    "aa_muts": { "HA1": ["K160T"] },
                    "attr": {
                        "div": 0.0042,
                        "num_date": 2016.45,
                        "num_date_confidence": [2016.2, 2016.7],
                        "country": "brazil",
                        "country_confidence": { "brazil": 0.97 },
                        "authors": "smith2016",
                        "accession": "KX000001",
                        "url": "https://example.org/KX000001",
                        "clade_annotation": "3c2.A",
                        "clock_length": 0.002,
                        "raw_date": "2016-06-12"
                    }
                },
                {
                    "strain": "A/fake/2/2017",
                    "attr": {
                        "div": 0.0051,
                        "num_date": 2017.12,
                        "country": "colombia",
                        "authors": "unknown2017"
                    }
                }
            ]
        }
    })
}

fn convert_document(doc: Value) -> phylomap::Dataset {
    let legacy: LegacyDataset = serde_json::from_value(doc).unwrap();
    convert(legacy)
}

#[test]
fn top_level_metadata_is_reshaped() {
    let dataset = convert_document(legacy_document());
    assert_eq!(dataset.title, "Real-time tracking of fake virus");
    assert_eq!(dataset.version, SCHEMA_VERSION);
    assert_eq!(dataset.updated.as_deref(), Some("2018-10-04"));
    assert_eq!(dataset.tree_name.as_deref(), Some("fake"));

    let maintainers = dataset.maintainers.as_ref().unwrap();
    assert_eq!(maintainers[0].name, "jane doe");

    assert_eq!(dataset.filters.as_ref().unwrap().as_slice(), ["country", "author"]);
    assert!(dataset.colorings.contains_key("author"));
    assert!(!dataset.colorings.contains_key("authors"));

    let defaults = dataset.display_defaults.as_ref().unwrap();
    assert_eq!(defaults["geo_resolution"], "country");
    assert_eq!(defaults["map_triplicate"], true);

    assert!(dataset.genome_annotations.is_some());
    assert!(dataset.geographic_info.is_some());
}

#[test]
fn conversion_is_deterministic() {
    let first = serde_json::to_string(&convert_document(legacy_document())).unwrap();
    let second = serde_json::to_string(&convert_document(legacy_document())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn node_keys_stay_within_the_allow_list() {
    const ALLOWED: [&str; 12] = [
        "strain", "div", "num_date", "vaccine", "labels", "hidden", "mutations", "url",
        "accession", "traits", "children", "author",
    ];
    let dataset = convert_document(legacy_document());
    let mut nodes = Vec::new();
    traverse(&dataset.tree, &mut |n: &TreeNode| nodes.push(n.clone()));
    assert_eq!(nodes.len(), 3);
    for node in nodes {
        let value = serde_json::to_value(&node).unwrap();
        for key in value.as_object().unwrap().keys() {
            assert!(ALLOWED.contains(&key.as_str()), "unexpected node key {key}");
        }
    }
}

#[test]
fn zero_divergence_survives() {
    let dataset = convert_document(legacy_document());
    assert_eq!(dataset.tree.div, Some(0.0));
}

#[test]
fn author_info_resolves_or_drops() {
    let dataset = convert_document(legacy_document());
    let resolved = &dataset.tree.children[0];
    let author = resolved.author.as_ref().unwrap();
    assert_eq!(author.value, "smith2016");
    assert_eq!(author.journal.as_deref(), Some("Nature"));
    assert_eq!(author.paper_url.as_deref(), Some("https://doi.example"));

    // no author_info entry: the key is deleted, nothing replaces it
    let dropped = &dataset.tree.children[1];
    assert!(dropped.author.is_none());
    assert!(!dropped.traits.contains_key("authors"));
}

#[test]
fn vaccine_and_serum_fields_compose() {
    let dataset = convert_document(legacy_document());
    let vaccine = dataset.tree.children[0].vaccine.as_ref().unwrap();
    assert_eq!(vaccine.selection_date.as_deref(), Some("2017-02-01"));
    assert_eq!(vaccine.serum, Some(true));
}

#[test]
fn traits_carry_confidence_siblings() {
    let dataset = convert_document(legacy_document());
    let tip = &dataset.tree.children[0];
    assert_eq!(tip.traits["country"].value, "brazil");
    assert!(tip.traits["country"].confidence.is_some());
    assert!(!tip.traits.contains_key("clock_length"));
    assert_eq!(tip.labels["clade"], "3c2.A");
    assert_eq!(tip.labels["aa"], "HA1: K160T");
    let mutations = tip.mutations.as_ref().unwrap();
    assert_eq!(mutations["nuc"], ["A123T"]);
}

#[test]
fn missing_updated_still_converts() {
    let mut doc = legacy_document();
    doc["meta"].as_object_mut().unwrap().remove("updated");
    let dataset = convert_document(doc);
    assert!(dataset.updated.is_none());
    assert_eq!(dataset.version, SCHEMA_VERSION);
}
