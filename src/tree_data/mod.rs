//! Bundled passive tree node data.
//!
//! This module provides access to the two embedded documents describing the
//! tree: node positions (keystones and notables) and node tooltips. Both are
//! compiled into the binary and parsed once on first access.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded positions document.
const NODES_JSON: &str = include_str!("nodes.json");

/// Embedded descriptions document.
const NODES_DESC_JSON: &str = include_str!("nodes_desc.json");

static TREE_DATA: OnceLock<TreeData> = OnceLock::new();

/// A single point on the tree layout.
///
/// Coordinates keep the number exactly as written in the document, so an
/// integer `1` is written back as `1`, not `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    /// Horizontal coordinate
    pub x: Number,
    /// Vertical coordinate
    pub y: Number,
    /// Node identifier (e.g., "K1", "N12"), unique within its collection
    pub id: String,
}

impl NodePosition {
    /// Coordinates as floats.
    #[must_use]
    pub fn coordinates(&self) -> (f64, f64) {
        (
            self.x.as_f64().unwrap_or_default(),
            self.y.as_f64().unwrap_or_default(),
        )
    }
}

/// All node positions, split by node category.
///
/// Order within each sequence is the order of the source document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePositionStructure {
    /// Keystone positions
    pub keystones: Vec<NodePosition>,
    /// Notable positions
    pub notables: Vec<NodePosition>,
}

/// Tooltip shown for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    /// Display name
    pub name: String,
    /// One entry per stat line, possibly empty
    pub stats: Vec<String>,
}

/// Mapping from node identifier to its tooltip.
pub type NodesDescription = BTreeMap<String, TooltipContent>;

/// Which sequence a position was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Listed under `keystones`
    Keystone,
    /// Listed under `notables`
    Notable,
}

impl NodeCategory {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keystone => "Keystone",
            Self::Notable => "Notable",
        }
    }
}

/// Both bundled documents, shaped into two named fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeData {
    /// Node positions, verbatim from the positions document
    pub positions: NodePositionStructure,
    /// Node tooltips, verbatim from the descriptions document
    pub nodes_description: NodesDescription,
}

/// Returns the bundled tree data.
///
/// The documents are parsed on the first call and shared read-only for the
/// rest of the process. Every call returns the same instance.
///
/// # Examples
///
/// ```no_run
/// use passive_tree::tree_data::load_data;
///
/// let data = load_data().unwrap();
/// assert!(!data.positions.keystones.is_empty());
/// ```
pub fn load_data() -> Result<&'static TreeData> {
    if let Some(data) = TREE_DATA.get() {
        return Ok(data);
    }

    let data = TreeData::load()?;
    Ok(TREE_DATA.get_or_init(|| data))
}

impl TreeData {
    /// Parses the embedded documents into a fresh instance.
    ///
    /// Prefer [`load_data`], which parses once and caches the result.
    pub fn load() -> Result<Self> {
        let data = Self::from_json(NODES_JSON, NODES_DESC_JSON)?;
        debug!(
            keystones = data.positions.keystones.len(),
            notables = data.positions.notables.len(),
            descriptions = data.nodes_description.len(),
            "Loaded bundled tree data"
        );
        Ok(data)
    }

    /// Builds tree data from the text of a positions document and a
    /// descriptions document. Values are taken as-is.
    pub fn from_json(positions_json: &str, descriptions_json: &str) -> Result<Self> {
        let positions: NodePositionStructure =
            serde_json::from_str(positions_json).context("Failed to parse nodes.json")?;
        let nodes_description: NodesDescription =
            serde_json::from_str(descriptions_json).context("Failed to parse nodes_desc.json")?;

        Ok(Self {
            positions,
            nodes_description,
        })
    }

    /// Finds the position of a node and the sequence it belongs to.
    ///
    /// Keystones are searched first; ids are only unique within a sequence.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<(NodeCategory, &NodePosition)> {
        self.positions
            .keystones
            .iter()
            .find(|p| p.id == id)
            .map(|p| (NodeCategory::Keystone, p))
            .or_else(|| {
                self.positions
                    .notables
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| (NodeCategory::Notable, p))
            })
    }

    /// Gets the tooltip for a node id.
    #[must_use]
    pub fn tooltip(&self, id: &str) -> Option<&TooltipContent> {
        self.nodes_description.get(id)
    }

    /// Searches tooltips by name and stat lines (case-insensitive).
    ///
    /// Results are sorted by relevance: exact name, name prefix, name
    /// substring, then stat substring. Ties keep id order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<(&str, &TooltipContent)> {
        if query.is_empty() {
            return self
                .nodes_description
                .iter()
                .map(|(id, tooltip)| (id.as_str(), tooltip))
                .collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&str, &TooltipContent, i32)> = self
            .nodes_description
            .iter()
            .filter_map(|(id, tooltip)| {
                let name_lower = tooltip.name.to_lowercase();

                if name_lower == query_lower {
                    return Some((id.as_str(), tooltip, 100));
                }

                if name_lower.starts_with(&query_lower) {
                    return Some((id.as_str(), tooltip, 50));
                }

                if name_lower.contains(&query_lower) {
                    return Some((id.as_str(), tooltip, 10));
                }

                if tooltip
                    .stats
                    .iter()
                    .any(|stat| stat.to_lowercase().contains(&query_lower))
                {
                    return Some((id.as_str(), tooltip, 5));
                }

                None
            })
            .collect();

        // Stable sort keeps BTreeMap (id) order within a relevance bucket
        results.sort_by(|a, b| b.2.cmp(&a.2));

        results
            .into_iter()
            .map(|(id, tooltip, _)| (id, tooltip))
            .collect()
    }

    /// Total number of positioned nodes across both sequences.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.keystones.len() + self.positions.notables.len()
    }

    /// Number of described nodes.
    #[must_use]
    pub fn description_count(&self) -> usize {
        self.nodes_description.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const EXAMPLE_POSITIONS: &str = r#"{"keystones":[{"x":1,"y":2,"id":"k1"}],"notables":[]}"#;
    const EXAMPLE_DESCRIPTIONS: &str = r#"{"k1":{"name":"Test Node","stats":["+10 Strength"]}}"#;

    fn get_test_data() -> &'static TreeData {
        load_data().expect("Failed to load bundled tree data")
    }

    /// Compares two JSON values, treating `1` and `1.0` as the same number.
    fn assert_json_matches(actual: &Value, expected: &Value, path: &str) {
        match (actual, expected) {
            (Value::Number(a), Value::Number(e)) => {
                assert_eq!(a.as_f64(), e.as_f64(), "number mismatch at {path}");
            }
            (Value::Array(a), Value::Array(e)) => {
                assert_eq!(a.len(), e.len(), "length mismatch at {path}");
                for (i, (a, e)) in a.iter().zip(e).enumerate() {
                    assert_json_matches(a, e, &format!("{path}[{i}]"));
                }
            }
            (Value::Object(a), Value::Object(e)) => {
                let actual_keys: Vec<_> = a.keys().collect();
                let expected_keys: Vec<_> = e.keys().collect();
                assert_eq!(actual_keys, expected_keys, "key mismatch at {path}");
                for (key, value) in e {
                    assert_json_matches(&a[key], value, &format!("{path}.{key}"));
                }
            }
            _ => assert_eq!(actual, expected, "value mismatch at {path}"),
        }
    }

    #[test]
    fn test_load_bundled_data() {
        let data = get_test_data();
        assert!(!data.positions.keystones.is_empty());
        assert!(!data.positions.notables.is_empty());
        assert!(data.description_count() > 0);
    }

    #[test]
    fn test_load_data_is_idempotent() {
        let first = load_data().unwrap();
        let second = load_data().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &TreeData::load().unwrap());
    }

    #[test]
    fn test_ids_are_non_empty() {
        let data = get_test_data();
        assert!(data.positions.keystones.iter().all(|p| !p.id.is_empty()));
        assert!(data.positions.notables.iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn test_ids_unique_within_collection() {
        let data = get_test_data();
        for positions in [&data.positions.keystones, &data.positions.notables] {
            let mut ids: Vec<&str> = positions.iter().map(|p| p.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), positions.len());
        }
    }

    #[test]
    fn test_positions_have_exact_fields() {
        let value = serde_json::to_value(&get_test_data().positions).unwrap();
        for key in ["keystones", "notables"] {
            for node in value[key].as_array().unwrap() {
                let object = node.as_object().unwrap();
                let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
                keys.sort_unstable();
                assert_eq!(keys, ["id", "x", "y"]);
                assert!(object["x"].is_number());
                assert!(object["y"].is_number());
                assert!(object["id"].is_string());
            }
        }
    }

    #[test]
    fn test_bundled_round_trip() {
        let data = get_test_data();
        let positions: Value = serde_json::from_str(NODES_JSON).unwrap();
        let descriptions: Value = serde_json::from_str(NODES_DESC_JSON).unwrap();

        let output = serde_json::to_value(data).unwrap();
        assert_json_matches(&output["positions"], &positions, "positions");
        assert_json_matches(&output["nodesDescription"], &descriptions, "nodesDescription");
    }

    #[test]
    fn test_positions_keep_document_order() {
        let data = TreeData::from_json(
            r#"{"keystones":[{"x":3,"y":0,"id":"b"},{"x":1,"y":0,"id":"a"}],
                "notables":[{"x":0,"y":0,"id":"a"}]}"#,
            "{}",
        )
        .unwrap();
        let ids: Vec<&str> = data
            .positions
            .keystones
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a"]);
        // Same id in both sequences is allowed
        assert_eq!(data.positions.notables[0].id, "a");
    }

    #[test]
    fn test_example_documents() {
        let data = TreeData::from_json(EXAMPLE_POSITIONS, EXAMPLE_DESCRIPTIONS).unwrap();

        assert_eq!(
            data.positions.keystones,
            vec![NodePosition {
                x: Number::from(1),
                y: Number::from(2),
                id: "k1".to_string()
            }]
        );
        assert!(data.positions.notables.is_empty());

        let output = serde_json::to_value(&data).unwrap();
        assert_json_matches(
            &output,
            &json!({
                "positions": {"keystones": [{"x": 1, "y": 2, "id": "k1"}], "notables": []},
                "nodesDescription": {"k1": {"name": "Test Node", "stats": ["+10 Strength"]}}
            }),
            "",
        );
    }

    #[test]
    fn test_example_serializes_byte_for_byte() {
        let data = TreeData::from_json(EXAMPLE_POSITIONS, EXAMPLE_DESCRIPTIONS).unwrap();
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            format!(r#"{{"positions":{EXAMPLE_POSITIONS},"nodesDescription":{EXAMPLE_DESCRIPTIONS}}}"#)
        );
    }

    #[test]
    fn test_bundled_positions_serialize_verbatim() {
        let data = get_test_data();
        let source: Value = serde_json::from_str(NODES_JSON).unwrap();
        assert_eq!(serde_json::to_value(&data.positions).unwrap(), source);
    }

    #[test]
    fn test_malformed_document_is_error() {
        let err = TreeData::from_json("{\"keystones\": [", "{}").unwrap_err();
        assert!(err.to_string().contains("nodes.json"));

        let err = TreeData::from_json(EXAMPLE_POSITIONS, "[]").unwrap_err();
        assert!(err.to_string().contains("nodes_desc.json"));
    }

    #[test]
    fn test_position_lookup() {
        let data = TreeData::from_json(
            r#"{"keystones":[{"x":0.1,"y":0.2,"id":"K1"}],"notables":[{"x":0.3,"y":0.4,"id":"N1"}]}"#,
            "{}",
        )
        .unwrap();

        let (category, position) = data.position("N1").unwrap();
        assert_eq!(category, NodeCategory::Notable);
        assert!((position.coordinates().0 - 0.3).abs() < f64::EPSILON);

        let (category, _) = data.position("K1").unwrap();
        assert_eq!(category, NodeCategory::Keystone);

        assert!(data.position("S1").is_none());
    }

    #[test]
    fn test_tooltip_lookup() {
        let data = TreeData::from_json(EXAMPLE_POSITIONS, EXAMPLE_DESCRIPTIONS).unwrap();
        let tooltip = data.tooltip("k1").unwrap();
        assert_eq!(tooltip.name, "Test Node");
        assert_eq!(tooltip.stats, ["+10 Strength"]);
        assert!(data.tooltip("k2").is_none());
    }

    #[test]
    fn test_empty_stats_allowed() {
        let data =
            TreeData::from_json(EXAMPLE_POSITIONS, r#"{"K1":{"name":"K1","stats":[]}}"#).unwrap();
        assert!(data.tooltip("K1").unwrap().stats.is_empty());
    }

    #[test]
    fn test_search_ranking() {
        let data = TreeData::from_json(
            EXAMPLE_POSITIONS,
            r#"{
                "a": {"name": "Blur", "stats": []},
                "b": {"name": "Blood Magic", "stats": []},
                "c": {"name": "Vaal Pact", "stats": ["Life Leech is instant"]},
                "d": {"name": "Bloodletting", "stats": []}
            }"#,
        )
        .unwrap();

        let ids: Vec<&str> = data.search("blood").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["b", "d"]);

        let ids: Vec<&str> = data.search("BLUR").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a"]);

        let ids: Vec<&str> = data.search("leech").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["c"]);

        assert_eq!(data.search("").len(), 4);
        assert!(data.search("nothing matches").is_empty());
    }

    #[test]
    fn test_counts() {
        let data = TreeData::from_json(EXAMPLE_POSITIONS, EXAMPLE_DESCRIPTIONS).unwrap();
        assert_eq!(data.position_count(), 1);
        assert_eq!(data.description_count(), 1);
    }
}
