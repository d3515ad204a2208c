//! Hierarchical configuration trees and their merge algorithm.
//!
//! Goal parameters travel as an ordered, attributed tree with the same shape
//! as the hierarchical markup the host build tool uses. Layered configuration
//! (tool defaults, a named execution's configuration, the step's own override)
//! is combined with [`merge`].
//!
//! # Merge Rules
//!
//! - Nodes are matched by name; each overlay child pairs with the first
//!   not-yet-consumed base child of the same name
//! - The overlay's scalar value wins if present, otherwise the base's is kept
//! - Attributes are unioned; the overlay wins on key collision
//! - Children merge recursively: overlay children first, in their own order,
//!   then base-only children appended in their original order
//!
//! The ordering rule is part of the contract: display and some downstream
//! tools are order-sensitive.

use std::collections::BTreeMap;
use std::fmt;

/// One node of a configuration tree.
///
/// A node may carry both a scalar value and children; the two are not
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTree {
    /// Element name.
    pub name: String,

    /// Optional scalar value.
    pub value: Option<String>,

    /// Attributes. Insertion order is irrelevant; sorted for display.
    pub attributes: BTreeMap<String, String>,

    /// Child nodes, in declaration order. Order is significant.
    pub children: Vec<ConfigTree>,
}

impl ConfigTree {
    /// Create an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a node carrying only a scalar value.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(name)
        }
    }

    /// Builder-style: set the scalar value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder-style: add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style: append a child node.
    pub fn with_child(mut self, child: ConfigTree) -> Self {
        self.children.push(child);
        self
    }

    /// First child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&ConfigTree> {
        self.children.iter().find(|c| c.name == name)
    }

    /// A tree with no children and no scalar value carries no configuration.
    ///
    /// Callers must treat such a tree as absent and never forward it to the
    /// executor.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.value.is_none()
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{}<{}", pad, self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        match (&self.value, self.children.is_empty()) {
            (None, true) => writeln!(f, "/>"),
            (Some(value), true) => writeln!(f, ">{}</{}>", value, self.name),
            (value, false) => {
                writeln!(f, ">")?;
                if let Some(value) = value {
                    writeln!(f, "{}  {}", pad, value)?;
                }
                for child in &self.children {
                    child.render(f, depth + 1)?;
                }
                writeln!(f, "{}</{}>", pad, self.name)
            }
        }
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

/// Merge two configuration layers. The overlay wins at every conflict point.
///
/// An absent side is not an error: the other side is returned unchanged.
pub fn merge(overlay: Option<&ConfigTree>, base: Option<&ConfigTree>) -> Option<ConfigTree> {
    match (overlay, base) {
        (None, None) => None,
        (Some(overlay), None) => Some(overlay.clone()),
        (None, Some(base)) => Some(base.clone()),
        (Some(overlay), Some(base)) => Some(merge_nodes(overlay, base)),
    }
}

/// Drop a merged tree that carries no configuration.
pub fn prune_empty(tree: Option<ConfigTree>) -> Option<ConfigTree> {
    tree.filter(|t| !t.is_empty())
}

fn merge_nodes(overlay: &ConfigTree, base: &ConfigTree) -> ConfigTree {
    let value = overlay.value.clone().or_else(|| base.value.clone());

    let mut attributes = base.attributes.clone();
    for (name, attr) in &overlay.attributes {
        attributes.insert(name.clone(), attr.clone());
    }

    // Overlay children lead, each pairing with the first unconsumed base
    // child of the same name. Base-only children follow in original order.
    let mut consumed = vec![false; base.children.len()];
    let mut children = Vec::with_capacity(overlay.children.len());
    for overlay_child in &overlay.children {
        let matched = base
            .children
            .iter()
            .enumerate()
            .find(|(i, c)| !consumed[*i] && c.name == overlay_child.name);
        match matched {
            Some((i, base_child)) => {
                consumed[i] = true;
                children.push(merge_nodes(overlay_child, base_child));
            }
            None => children.push(overlay_child.clone()),
        }
    }
    for (i, base_child) in base.children.iter().enumerate() {
        if !consumed[i] {
            children.push(base_child.clone());
        }
    }

    ConfigTree {
        name: overlay.name.clone(),
        value,
        attributes,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(children: Vec<ConfigTree>) -> ConfigTree {
        ConfigTree {
            children,
            ..ConfigTree::new("configuration")
        }
    }

    #[test]
    fn merge_with_absent_base_returns_overlay() {
        let overlay = config(vec![ConfigTree::leaf("target", "17")]);
        let merged = merge(Some(&overlay), None).unwrap();
        assert_eq!(merged, overlay);
    }

    #[test]
    fn merge_with_absent_overlay_returns_base() {
        let base = config(vec![ConfigTree::leaf("target", "17")]);
        let merged = merge(None, Some(&base)).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn merge_with_both_absent_is_absent() {
        assert!(merge(None, None).is_none());
    }

    #[test]
    fn overlay_value_wins() {
        let overlay = config(vec![ConfigTree::leaf("target", "21")]);
        let base = config(vec![ConfigTree::leaf("target", "17")]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        assert_eq!(merged.child("target").unwrap().value.as_deref(), Some("21"));
    }

    #[test]
    fn base_value_kept_when_overlay_has_none() {
        let overlay = config(vec![
            ConfigTree::new("target").with_child(ConfigTree::leaf("inner", "x"))
        ]);
        let base = config(vec![ConfigTree::leaf("target", "17")]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        let target = merged.child("target").unwrap();
        assert_eq!(target.value.as_deref(), Some("17"));
        assert_eq!(target.child("inner").unwrap().value.as_deref(), Some("x"));
    }

    #[test]
    fn attributes_union_with_overlay_winning() {
        let overlay =
            config(vec![ConfigTree::new("items").with_attribute("combine", "append")]);
        let base = config(vec![ConfigTree::new("items")
            .with_attribute("combine", "merge")
            .with_attribute("scope", "test")]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        let items = merged.child("items").unwrap();
        assert_eq!(items.attributes.get("combine").map(String::as_str), Some("append"));
        assert_eq!(items.attributes.get("scope").map(String::as_str), Some("test"));
    }

    #[test]
    fn overlay_children_precede_base_only_children() {
        let overlay = config(vec![
            ConfigTree::leaf("beta", "2"),
            ConfigTree::leaf("alpha", "1"),
        ]);
        let base = config(vec![
            ConfigTree::leaf("gamma", "3"),
            ConfigTree::leaf("alpha", "0"),
            ConfigTree::leaf("delta", "4"),
        ]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        let names: Vec<_> = merged.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma", "delta"]);
        assert_eq!(merged.child("alpha").unwrap().value.as_deref(), Some("1"));
    }

    #[test]
    fn repeated_names_consume_base_children_in_order() {
        let overlay = config(vec![
            ConfigTree::leaf("item", "a"),
            ConfigTree::new("item").with_attribute("id", "second"),
        ]);
        let base = config(vec![
            ConfigTree::leaf("item", "x"),
            ConfigTree::leaf("item", "y"),
            ConfigTree::leaf("item", "z"),
        ]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        assert_eq!(merged.children.len(), 3);
        assert_eq!(merged.children[0].value.as_deref(), Some("a"));
        // Second overlay item had no value; the second base item's survives.
        assert_eq!(merged.children[1].value.as_deref(), Some("y"));
        assert_eq!(merged.children[2].value.as_deref(), Some("z"));
    }

    #[test]
    fn nested_nodes_merge_recursively() {
        let overlay = config(vec![ConfigTree::new("compiler")
            .with_child(ConfigTree::leaf("release", "21"))]);
        let base = config(vec![ConfigTree::new("compiler")
            .with_child(ConfigTree::leaf("release", "17"))
            .with_child(ConfigTree::leaf("debug", "true"))]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        let compiler = merged.child("compiler").unwrap();
        assert_eq!(compiler.child("release").unwrap().value.as_deref(), Some("21"));
        assert_eq!(compiler.child("debug").unwrap().value.as_deref(), Some("true"));
    }

    #[test]
    fn merge_matches_flattened_precedence_chain() {
        // merge(A, merge(B, C)) behaves like layering A > B > C directly.
        let a = config(vec![ConfigTree::leaf("x", "a")]);
        let b = config(vec![ConfigTree::leaf("x", "b"), ConfigTree::leaf("y", "b")]);
        let c = config(vec![
            ConfigTree::leaf("x", "c"),
            ConfigTree::leaf("y", "c"),
            ConfigTree::leaf("z", "c"),
        ]);

        let nested = merge(Some(&a), merge(Some(&b), Some(&c)).as_ref()).unwrap();
        assert_eq!(nested.child("x").unwrap().value.as_deref(), Some("a"));
        assert_eq!(nested.child("y").unwrap().value.as_deref(), Some("b"));
        assert_eq!(nested.child("z").unwrap().value.as_deref(), Some("c"));

        let left_first = merge(merge(Some(&a), Some(&b)).as_ref(), Some(&c)).unwrap();
        assert_eq!(nested, left_first);
    }

    #[test]
    fn node_only_in_overlay_kept_verbatim() {
        let overlay = config(vec![ConfigTree::new("extra")
            .with_child(ConfigTree::leaf("deep", "kept"))]);
        let base = config(vec![]);

        let merged = merge(Some(&overlay), Some(&base)).unwrap();
        let extra = merged.child("extra").unwrap();
        assert_eq!(extra.child("deep").unwrap().value.as_deref(), Some("kept"));
    }

    #[test]
    fn empty_tree_is_no_configuration() {
        assert!(ConfigTree::new("configuration").is_empty());
        assert!(!ConfigTree::leaf("configuration", "v").is_empty());
        assert!(!ConfigTree::new("configuration")
            .with_child(ConfigTree::new("child"))
            .is_empty());
    }

    #[test]
    fn prune_empty_drops_empty_merge_result() {
        let merged = merge(
            Some(&ConfigTree::new("configuration")),
            Some(&ConfigTree::new("configuration")),
        );
        assert!(prune_empty(merged).is_none());
    }

    #[test]
    fn attribute_only_node_counts_as_empty() {
        // No scalar and no children: nothing to forward, attributes or not.
        let tree = ConfigTree::new("configuration").with_attribute("combine", "append");
        assert!(tree.is_empty());
    }

    #[test]
    fn display_renders_indented_markup() {
        let tree = ConfigTree::new("configuration")
            .with_child(ConfigTree::leaf("target", "17"))
            .with_child(
                ConfigTree::new("excludes")
                    .with_attribute("combine", "append")
                    .with_child(ConfigTree::leaf("exclude", "**/gen/**")),
            );

        let rendered = tree.to_string();
        assert!(rendered.contains("<configuration>"));
        assert!(rendered.contains("  <target>17</target>"));
        assert!(rendered.contains("  <excludes combine=\"append\">"));
        assert!(rendered.contains("    <exclude>**/gen/**</exclude>"));
        assert!(rendered.contains("</configuration>"));
    }

    #[test]
    fn display_renders_self_closing_empty_node() {
        let tree = ConfigTree::new("skip");
        assert_eq!(tree.to_string(), "<skip/>\n");
    }
}
