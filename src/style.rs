//! Style rule sets keyed by class name, and first-match lookup
//!
//! A rule set maps a class name to a property map, e.g.
//! `{"numberField": {"litColor": "#0F0"}, "dim": {"unlitColor": "#222"}}`.
//! Nodes resolve a property by walking their own class tags in order; the
//! first tag that defines the property wins.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single property value: either a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    /// Numeric view of the value. Text values are parsed leniently.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

/// Mapping from class name to property map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRuleSet {
    rules: HashMap<String, HashMap<String, StyleValue>>,
}

impl StyleRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rule set from a JSON object of the form `{class: {prop: value}}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::StyleError(e.to_string()))
    }

    /// Builder-style insertion of a single rule
    pub fn with(mut self, class: &str, property: &str, value: impl Into<StyleValue>) -> Self {
        self.insert(class, property, value);
        self
    }

    pub fn insert(&mut self, class: &str, property: &str, value: impl Into<StyleValue>) {
        self.rules
            .entry(class.to_string())
            .or_default()
            .insert(property.to_string(), value.into());
    }

    pub fn get(&self, class: &str, property: &str) -> Option<&StyleValue> {
        self.rules.get(class).and_then(|props| props.get(property))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

/// Resolve `property` for a node carrying `tags`.
///
/// Tags are visited in the order given; the first one whose rule defines the
/// property wins. Returns `None` when no tag defines it.
pub fn lookup<'a, I, S>(tags: I, rules: &'a StyleRuleSet, property: &str) -> Option<&'a StyleValue>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .find_map(|tag| rules.get(tag.as_ref(), property))
}

/// Like [`lookup`], falling back to `default` when nothing matches
pub fn lookup_or<'a, I, S>(
    tags: I,
    rules: &'a StyleRuleSet,
    property: &str,
    default: &'a StyleValue,
) -> &'a StyleValue
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lookup(tags, rules, property).unwrap_or(default)
}

/// Style input accepted by [`crate::panel::apply_style`]: one rule set, or an
/// ordered list of rule sets applied one after another to the whole subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleSheet {
    Single(StyleRuleSet),
    Layered(Vec<StyleRuleSet>),
}

impl StyleSheet {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::StyleError(e.to_string()))
    }

    /// Rule sets in application order
    pub fn rule_sets(&self) -> &[StyleRuleSet] {
        match self {
            StyleSheet::Single(rules) => std::slice::from_ref(rules),
            StyleSheet::Layered(layers) => layers,
        }
    }
}

impl From<StyleRuleSet> for StyleSheet {
    fn from(rules: StyleRuleSet) -> Self {
        StyleSheet::Single(rules)
    }
}

impl From<Vec<StyleRuleSet>> for StyleSheet {
    fn from(layers: Vec<StyleRuleSet>) -> Self {
        StyleSheet::Layered(layers)
    }
}
