//! Message bundles: one tree of translated strings per locale.
//!
//! A bundle is the parsed form of `{locale}.json`:
//!
//! ```json
//! { "breadcrumb": { "home": "Home" }, "cta": { "title": "Find your home" } }
//! ```
//!
//! The top-level keys are namespaces; below them any depth of nesting is
//! allowed and keys are addressed with dotted paths (`metadata.home.title`).

use serde::Deserialize;
use std::collections::BTreeMap;

use super::Locale;

/// One node of a bundle: either a translated string or a group of children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageNode {
    Text(String),
    Group(BTreeMap<String, MessageNode>),
}

impl MessageNode {
    /// Walks the dotted `path` below this node.
    ///
    /// Returns `None` when a segment is missing or the path ends on a group.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut node = self;
        for segment in path.split('.') {
            match node {
                MessageNode::Group(children) => node = children.get(segment)?,
                MessageNode::Text(_) => return None,
            }
        }
        match node {
            MessageNode::Text(text) => Some(text.as_str()),
            MessageNode::Group(_) => None,
        }
    }

    /// Counts the string leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            MessageNode::Text(_) => 1,
            MessageNode::Group(children) => children.values().map(MessageNode::leaf_count).sum(),
        }
    }
}

/// All translated strings of one locale, keyed by namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundle {
    locale: Locale,
    namespaces: BTreeMap<String, MessageNode>,
}

impl MessageBundle {
    /// Creates a bundle from already parsed namespaces.
    pub fn new(locale: Locale, namespaces: BTreeMap<String, MessageNode>) -> Self {
        Self { locale, namespaces }
    }

    /// Parses a bundle document.
    pub fn from_json(locale: Locale, raw: &str) -> Result<Self, serde_json::Error> {
        let namespaces = serde_json::from_str(raw)?;
        Ok(Self::new(locale, namespaces))
    }

    /// An empty bundle; every lookup misses.
    pub fn empty(locale: Locale) -> Self {
        Self::new(locale, BTreeMap::new())
    }

    /// Returns the bundle's locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Looks up `key` (dotted) inside `namespace`.
    pub fn lookup(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces.get(namespace)?.lookup(key)
    }

    /// Returns true if the namespace exists in this bundle.
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// Total number of translated strings.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(MessageNode::leaf_count).sum()
    }

    /// Returns true if the bundle holds no strings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
