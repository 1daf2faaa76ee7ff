// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content negotiation for response bodies
//!
//! The body stream is drained once, then wrapped in a [`BodyAccessor`] whose
//! available views depend on the [`MimeClassification`]:
//!
//! | classification             | text | json | dom | binary |
//! |----------------------------|------|------|-----|--------|
//! | none                       | yes  | -    | -   | yes    |
//! | structured text, html/xml  | yes  | -    | yes | -      |
//! | structured text, json      | yes  | yes  | -   | -      |
//! | structured text, other     | yes  | -    | -   | -      |
//! | binary                     | yes  | -    | -   | yes    |

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use serde::de::DeserializeOwned;

use super::mime::MimeClassification;
use super::transport::BodyStream;
use crate::dom::{parse_document, Document};
use crate::error::Result;

/// Which views of a body are real conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supports {
    pub text: bool,
    pub json: bool,
    pub dom: bool,
    pub binary: bool,
}

#[derive(Debug, Clone)]
enum Buffered {
    Text(Arc<str>),
    Bytes(Bytes),
}

/// Lazy, capability-tagged views over one fully received body.
///
/// Views that do not apply return `None`. Real views re-materialize from the
/// buffered data on every call and never touch the network.
#[derive(Debug, Clone)]
pub struct BodyAccessor {
    classification: MimeClassification,
    buffered: Buffered,
    supports: Supports,
}

impl BodyAccessor {
    /// Wrap an already-buffered body
    pub fn from_bytes(classification: MimeClassification, body: Bytes) -> Self {
        match classification {
            MimeClassification::StructuredText { .. } => {
                let text: Arc<str> = String::from_utf8_lossy(&body).into();
                let supports = Supports {
                    text: true,
                    json: !classification.is_markup() && classification.is_json(),
                    dom: classification.is_markup(),
                    binary: false,
                };
                Self {
                    classification,
                    buffered: Buffered::Text(text),
                    supports,
                }
            }
            MimeClassification::None | MimeClassification::Binary => Self {
                classification,
                buffered: Buffered::Bytes(body),
                supports: Supports {
                    text: true,
                    json: false,
                    dom: false,
                    binary: true,
                },
            },
        }
    }

    /// Classification this accessor was built for
    pub fn classification(&self) -> &MimeClassification {
        &self.classification
    }

    /// Which views are available
    pub fn supports(&self) -> Supports {
        self.supports
    }

    /// Body decoded as text. Always available; invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        match &self.buffered {
            Buffered::Text(text) => text.to_string(),
            Buffered::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Body parsed as JSON, for JSON subtypes only
    pub fn json(&self) -> Option<Result<serde_json::Value>> {
        self.json_as()
    }

    /// Body deserialized into `T`, for JSON subtypes only
    pub fn json_as<T: DeserializeOwned>(&self) -> Option<Result<T>> {
        if !self.supports.json {
            return None;
        }
        match &self.buffered {
            Buffered::Text(text) => Some(serde_json::from_str(text).map_err(Into::into)),
            Buffered::Bytes(_) => None,
        }
    }

    /// Body parsed into a fresh DOM, for html/xml subtypes only
    pub fn dom(&self) -> Option<Result<Document>> {
        if !self.supports.dom {
            return None;
        }
        match &self.buffered {
            Buffered::Text(text) => Some(parse_document(text)),
            Buffered::Bytes(_) => None,
        }
    }

    /// Raw body bytes, for unclassified and binary bodies only
    pub fn binary(&self) -> Option<Bytes> {
        if !self.supports.binary {
            return None;
        }
        match &self.buffered {
            Buffered::Bytes(bytes) => Some(bytes.clone()),
            Buffered::Text(_) => None,
        }
    }

    /// Buffered body size in bytes
    pub fn len(&self) -> usize {
        match &self.buffered {
            Buffered::Text(text) => text.len(),
            Buffered::Bytes(bytes) => bytes.len(),
        }
    }

    /// Check if the body is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drain `body` into memory and wrap it for `classification`
pub async fn negotiate(classification: MimeClassification, body: BodyStream) -> Result<BodyAccessor> {
    let bytes = drain(body).await?;
    tracing::debug!(?classification, len = bytes.len(), "Negotiated response body");
    Ok(BodyAccessor::from_bytes(classification, bytes))
}

async fn drain(mut body: BodyStream) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::stream;
    use serde::Deserialize;
    use serde_json::json;

    fn stream_of(chunks: &[&'static str]) -> BodyStream {
        stream::iter(
            chunks
                .iter()
                .copied()
                .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    fn classify(ct: &str) -> MimeClassification {
        MimeClassification::from_content_type(Some(ct))
    }

    #[tokio::test]
    async fn test_no_content_type() {
        let body = negotiate(MimeClassification::None, stream_of(&["raw", " data"]))
            .await
            .unwrap();

        assert_eq!(
            body.supports(),
            Supports {
                text: true,
                json: false,
                dom: false,
                binary: true
            }
        );
        assert_eq!(body.text(), "raw data");
        assert_eq!(body.binary().unwrap(), Bytes::from("raw data"));
        assert!(body.json().is_none());
        assert!(body.dom().is_none());
    }

    #[tokio::test]
    async fn test_json_body() {
        let body = negotiate(
            classify("application/json; charset=utf-8"),
            stream_of(&[r#"{"id": 7, "#, r#""tags": ["a", "b"]}"#]),
        )
        .await
        .unwrap();

        let supports = body.supports();
        assert!(supports.text && supports.json);
        assert!(!supports.dom && !supports.binary);

        let first = body.json().unwrap().unwrap();
        let second = body.json().unwrap().unwrap();
        assert_eq!(first, json!({"id": 7, "tags": ["a", "b"]}));
        assert_eq!(first, second);
        assert!(body.binary().is_none());
        assert!(body.dom().is_none());
    }

    #[tokio::test]
    async fn test_typed_json() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Item {
            id: u32,
        }

        let body = negotiate(classify("application/ld+json"), stream_of(&[r#"{"id": 3}"#]))
            .await
            .unwrap();
        assert_eq!(body.json_as::<Item>().unwrap().unwrap(), Item { id: 3 });
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let body = negotiate(classify("application/json"), stream_of(&["{not json"]))
            .await
            .unwrap();

        assert!(matches!(body.json(), Some(Err(Error::Parse(_)))));
        assert_eq!(body.text(), "{not json");
    }

    #[tokio::test]
    async fn test_html_body() {
        let html = "<html><head><title>T</title></head><body><p>Hello <b>world</b></p></body></html>";
        let body = negotiate(classify("text/html"), stream_of(&[html])).await.unwrap();

        let supports = body.supports();
        assert!(supports.text && supports.dom);
        assert!(!supports.json && !supports.binary);

        let doc = body.dom().unwrap().unwrap();
        assert_eq!(doc.text_content(), "THello world");
        assert_eq!(doc.query_selector("b").unwrap().text_content(), "world");

        // every call parses again
        let again = body.dom().unwrap().unwrap();
        assert_eq!(again.text_content(), doc.text_content());
        assert!(body.json().is_none());
        assert!(body.binary().is_none());
    }

    #[tokio::test]
    async fn test_xml_body() {
        let body = negotiate(classify("application/xml"), stream_of(&["<a><b>x</b></a>"]))
            .await
            .unwrap();
        assert!(body.supports().dom);
        assert_eq!(body.dom().unwrap().unwrap().text_content(), "x");
    }

    #[tokio::test]
    async fn test_plain_text_body() {
        let body = negotiate(classify("text/plain"), stream_of(&["just text"]))
            .await
            .unwrap();

        assert_eq!(
            body.supports(),
            Supports {
                text: true,
                json: false,
                dom: false,
                binary: false
            }
        );
        assert_eq!(body.text(), "just text");
        assert!(body.json().is_none());
        assert!(body.dom().is_none());
        assert!(body.binary().is_none());
    }

    #[tokio::test]
    async fn test_binary_body() {
        let raw: &'static [u8] = &[0x89, b'P', b'N', b'G', 0xff];
        let stream = stream::iter(vec![Ok(Bytes::from_static(raw))]).boxed();
        let body = negotiate(classify("image/png"), stream).await.unwrap();

        assert!(body.supports().binary && body.supports().text);
        assert_eq!(body.binary().unwrap().as_ref(), raw);
        assert_eq!(body.binary(), body.binary());
        assert!(body.text().contains("PNG"));
        assert_eq!(body.len(), 5);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let stream = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(Error::timeout(10, "http://example.com")),
        ])
        .boxed();

        assert!(negotiate(MimeClassification::None, stream).await.is_err());
    }

    #[test]
    fn test_text_always_supported() {
        for ct in [None, Some("text/plain"), Some("application/json"), Some("image/gif")] {
            let body = tokio_test::block_on(negotiate(
                MimeClassification::from_content_type(ct),
                stream_of(&["x"]),
            ))
            .unwrap();
            assert!(body.supports().text, "{:?}", ct);
        }
    }
}
