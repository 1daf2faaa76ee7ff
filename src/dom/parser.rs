// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever
//!
//! XML bodies go through the same HTML tree builder; it is lenient enough
//! for text extraction and element lookup.

use html5ever::parse_document as html5ever_parse;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse markup into a [`Document`]
pub fn parse_document(markup: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = html5ever_parse(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| Error::dom(format!("failed to read markup: {}", e)))?;

    let mut doc = Document::new();
    let root = doc.root();
    let mut stack: Vec<(Handle, NodeId)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root))
        .collect();

    // Explicit work stack: nesting depth is controlled by the server
    while let Some((handle, parent)) = stack.pop() {
        let Some(data) = convert(&handle) else {
            continue;
        };
        let id = doc.append(parent, data);
        stack.extend(
            handle
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (child.clone(), id)),
        );
    }

    Ok(doc)
}

fn convert(handle: &Handle) -> Option<NodeData> {
    let data = match handle.data {
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return None,
        RcNodeData::Doctype { .. } => NodeData::doctype(),
        RcNodeData::Text { ref contents } => NodeData::text(contents.borrow().to_string()),
        RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
        RcNodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut data = NodeData::element(name.local.to_string());
            for attr in attrs.borrow().iter() {
                data.attributes
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            data
        }
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_document("<html><body><p>Hello</p></body></html>").unwrap();
        assert!(doc.body().is_some());
        assert_eq!(doc.text_content(), "Hello");
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_document("<div id=\"test\" class=\"foo bar\">content</div>").unwrap();
        let div = doc.query_selector("div").unwrap();
        assert_eq!(div.get_attribute("id"), Some("test"));
        assert!(div.has_class("foo"));
    }

    #[test]
    fn test_parse_complex_html() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>Test Page</title>
            </head>
            <body>
                <div id="container">
                    <h1>Hello World</h1>
                    <a href="https://example.com">Link</a>
                </div>
            </body>
            </html>
        "#;
        let doc = parse_document(html).unwrap();

        assert_eq!(doc.title().as_deref(), Some("Test Page"));
        assert!(doc.head().is_some());
        assert!(doc.document_element().is_some());
        assert_eq!(doc.query_selector("h1").unwrap().text_content(), "Hello World");

        let links = doc.get_elements_by_tag_name("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attribute("href"), Some("https://example.com"));
    }

    #[test]
    fn test_parse_deeply_nested_markup() {
        let depth = 100_000;
        let markup = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));

        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let doc = parse_document(&markup).unwrap();
                let spans = doc.get_elements_by_tag_name("span").len();
                (doc.text_content(), spans, doc.query_selector("span").unwrap().text_content())
            })
            .unwrap();

        let (text, spans, outer_text) = handle.join().unwrap();
        assert_eq!(text, "x");
        assert_eq!(spans, depth);
        assert_eq!(outer_text, "x");
    }

    #[test]
    fn test_parse_xml_like_markup() {
        let doc = parse_document("<note><to>Tove</to><from>Jani</from></note>").unwrap();
        assert_eq!(doc.get_elements_by_tag_name("to")[0].text_content(), "Tove");
        assert_eq!(doc.text_content(), "ToveJani");
    }
}
