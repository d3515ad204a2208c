//! Boundary conversions into [`ConfigTree`].
//!
//! Hosts declare configuration overlays either as a flat key/value map or as
//! hierarchical YAML. Both shapes convert into the one tree representation at
//! ingestion, so a malformed overlay fails before any step runs and the
//! resolver and runner only ever see a well-formed tree.
//!
//! YAML conversion rules:
//!
//! - scalars become node values
//! - nested mappings become child nodes
//! - sequence elements become repeated `item` children
//! - keys starting with `@` become attributes
//! - null becomes an empty node

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::config::tree::ConfigTree;
use crate::error::{GoalseqError, Result};

impl ConfigTree {
    /// Build a tree from a flat key/value map: one scalar child per entry.
    pub fn from_flat<K, V>(name: impl Into<String>, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut tree = ConfigTree::new(name);
        for (key, value) in entries {
            tree.children.push(ConfigTree::leaf(key, value));
        }
        tree
    }

    /// Convert a YAML value into a tree rooted at `name`.
    pub fn from_yaml(name: &str, value: &Value) -> Result<Self> {
        let mut tree = ConfigTree::new(name);
        fill_from_yaml(&mut tree, value)?;
        Ok(tree)
    }
}

fn fill_from_yaml(node: &mut ConfigTree, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => node.value = Some(b.to_string()),
        Value::Number(n) => node.value = Some(n.to_string()),
        Value::String(s) => node.value = Some(s.clone()),
        Value::Sequence(items) => {
            for item in items {
                node.children.push(ConfigTree::from_yaml("item", item)?);
            }
        }
        Value::Mapping(entries) => {
            for (key, entry) in entries {
                let key = key.as_str().ok_or_else(|| invalid(node, "non-string key"))?;
                if let Some(attribute) = key.strip_prefix('@') {
                    let text = scalar_text(entry)
                        .ok_or_else(|| invalid(node, "attribute value must be a scalar"))?;
                    node.attributes.insert(attribute.to_string(), text);
                } else {
                    node.children.push(ConfigTree::from_yaml(key, entry)?);
                }
            }
        }
        Value::Tagged(_) => return Err(invalid(node, "tagged values are not supported")),
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn invalid(node: &ConfigTree, message: &str) -> GoalseqError {
    GoalseqError::InvalidConfiguration {
        name: node.name.clone(),
        message: message.to_string(),
    }
}

impl<'de> Deserialize<'de> for ConfigTree {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ConfigTree::from_yaml("configuration", &value).map_err(serde::de::Error::custom)
    }
}
