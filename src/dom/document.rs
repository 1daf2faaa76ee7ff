// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation
//!
//! A read-only tree produced by [`super::parse_document`]. Nodes live in a
//! flat arena and are addressed by [`NodeId`].

use std::collections::HashMap;

use super::node::{NodeData, NodeId, NodeType};

/// Parsed HTML/XML document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::document()],
        }
    }

    /// Append a node under `parent`, returning its id
    pub(crate) fn append(&mut self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        data.parent = Some(parent);
        self.nodes.push(data);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Root document node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Raw node data
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document holds nothing but the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Concatenated text of every text node, in document order
    pub fn text_content(&self) -> String {
        self.text_of(self.root())
    }

    fn text_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            match node.node_type {
                NodeType::Text => out.push_str(node.text.as_deref().unwrap_or_default()),
                NodeType::Element | NodeType::Document => {
                    stack.extend(node.children.iter().rev())
                }
                _ => {}
            }
        }
        out
    }

    /// Text of the first `<title>` element, trimmed
    pub fn title(&self) -> Option<String> {
        self.get_elements_by_tag_name("title")
            .first()
            .map(|e| e.text_content().trim().to_string())
    }

    /// `<html>` element
    pub fn document_element(&self) -> Option<Element<'_>> {
        self.first_by_tag("html")
    }

    /// `<head>` element
    pub fn head(&self) -> Option<Element<'_>> {
        self.first_by_tag("head")
    }

    /// `<body>` element
    pub fn body(&self) -> Option<Element<'_>> {
        self.first_by_tag("body")
    }

    fn first_by_tag(&self, tag: &str) -> Option<Element<'_>> {
        self.find(|n| n.tag_name.as_deref() == Some(tag), false)
            .into_iter()
            .next()
    }

    /// Get element by `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<Element<'_>> {
        self.find(
            |n| n.attributes.get("id").map(String::as_str) == Some(id),
            false,
        )
        .into_iter()
        .next()
    }

    /// Get elements by tag name (case-insensitive)
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<Element<'_>> {
        let tag = tag.to_lowercase();
        self.find(|n| n.tag_name.as_deref() == Some(tag.as_str()), true)
    }

    /// Get elements carrying a class
    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<Element<'_>> {
        self.find(|n| has_class(n, class), true)
    }

    /// Query selector - first match of a simple selector
    pub fn query_selector(&self, selector: &str) -> Option<Element<'_>> {
        let sel = SimpleSelector::parse(selector)?;
        self.find(|n| sel.matches(n), false).into_iter().next()
    }

    /// Query selector all - every match of a simple selector.
    ///
    /// Supports `tag`, `#id`, `.class` and `tag.class`; anything else
    /// matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element<'_>> {
        match SimpleSelector::parse(selector) {
            Some(sel) => self.find(|n| sel.matches(n), true),
            None => Vec::new(),
        }
    }

    fn find<F>(&self, pred: F, find_all: bool) -> Vec<Element<'_>>
    where
        F: Fn(&NodeData) -> bool,
    {
        let mut results = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if node.node_type == NodeType::Element && pred(node) {
                results.push(Element { doc: self, id });
                if !find_all {
                    break;
                }
            }
            stack.extend(node.children.iter().rev());
        }
        results
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of an element node
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Element<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0]
    }

    /// Node id of this element
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name (lowercase)
    pub fn local_name(&self) -> &'a str {
        self.data().tag_name.as_deref().unwrap_or_default()
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name).map(String::as_str)
    }

    /// All attributes
    pub fn attributes(&self) -> &'a HashMap<String, String> {
        &self.data().attributes
    }

    /// Check if element has a class
    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.data(), class)
    }

    /// Text content of this subtree
    pub fn text_content(&self) -> String {
        self.doc.text_of(self.id)
    }

    /// Child elements, skipping text and comments
    pub fn children(&self) -> Vec<Element<'a>> {
        self.data()
            .children
            .iter()
            .filter(|&&c| self.doc.nodes[c.0].node_type == NodeType::Element)
            .map(|&id| Element { doc: self.doc, id })
            .collect()
    }

    /// Parent element, if the parent is not the document root
    pub fn parent_element(&self) -> Option<Element<'a>> {
        let parent = self.data().parent?;
        (self.doc.nodes[parent.0].node_type == NodeType::Element)
            .then_some(Element { doc: self.doc, id: parent })
    }
}

fn has_class(node: &NodeData, class: &str) -> bool {
    node.attributes
        .get("class")
        .map(|c| c.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// `tag`, `#id`, `.class` or `tag.class`
#[derive(Debug, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    class: Option<String>,
}

impl SimpleSelector {
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return None;
        }

        if let Some(id) = selector.strip_prefix('#') {
            return Some(Self {
                tag: None,
                id: Some(id.to_string()),
                class: None,
            });
        }

        let (tag, class) = match selector.split_once('.') {
            Some((tag, class)) => (tag, Some(class.to_string())),
            None => (selector, None),
        };
        Some(Self {
            tag: (!tag.is_empty()).then(|| tag.to_lowercase()),
            id: None,
            class,
        })
    }

    fn matches(&self, node: &NodeData) -> bool {
        if let Some(ref tag) = self.tag {
            if node.tag_name.as_deref() != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if let Some(ref class) = self.class {
            if !has_class(node, class) {
                return false;
            }
        }
        true
    }
}
