// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request body payloads
//!
//! A [`BodyVariant`] is always serialized up front. Its kind only picks the
//! `Content-Type` header; the payload bytes go on the wire untouched.

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;

/// Kind of request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `text/plain`
    Text,
    /// `application/xml; charset=utf-8`
    Xml,
    /// `application/json`
    Json,
}

impl BodyKind {
    /// Content-Type header sent with this kind of body
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyKind::Form => "application/x-www-form-urlencoded",
            BodyKind::Text => "text/plain",
            BodyKind::Xml => "application/xml; charset=utf-8",
            BodyKind::Json => "application/json",
        }
    }

    /// Short name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Form => "form",
            BodyKind::Text => "text",
            BodyKind::Xml => "xml",
            BodyKind::Json => "json",
        }
    }
}

/// Serialized request body with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyVariant {
    kind: BodyKind,
    payload: Bytes,
}

impl BodyVariant {
    fn new(kind: BodyKind, payload: impl Into<Bytes>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    /// Form body from an already-encoded string
    pub fn form(data: impl Into<Bytes>) -> Self {
        Self::new(BodyKind::Form, data)
    }

    /// Form body encoded from key/value pairs
    pub fn form_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        Self::new(BodyKind::Form, encoded)
    }

    /// Plain text body
    pub fn text(data: impl Into<Bytes>) -> Self {
        Self::new(BodyKind::Text, data)
    }

    /// XML body
    pub fn xml(data: impl Into<Bytes>) -> Self {
        Self::new(BodyKind::Xml, data)
    }

    /// JSON body from an already-serialized string
    pub fn json(data: impl Into<Bytes>) -> Self {
        Self::new(BodyKind::Json, data)
    }

    /// JSON body serialized from a value
    pub fn json_value<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let data = serde_json::to_vec(value)?;
        Ok(Self::new(BodyKind::Json, data))
    }

    /// Body kind
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Content-Type header value
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Serialized payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Payload length in bytes, used for `Content-Length`
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Consume the variant, yielding the wire payload
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
