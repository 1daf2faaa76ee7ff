// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content-Type classification

use mime::Mime;
use reqwest::header::HeaderMap;

use super::headers::CONTENT_TYPE;

/// Coarse category of a response body, derived from its Content-Type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeClassification {
    /// No Content-Type header
    None,
    /// `text/*`, or any subtype mentioning json or xml
    StructuredText {
        /// Lowercased subtype including any `+suffix`, e.g. `ld+json`
        subtype: String,
    },
    /// Everything else, including unparseable Content-Type values
    Binary,
}

impl MimeClassification {
    /// Classify from a raw Content-Type value
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return MimeClassification::None;
        };

        let Ok(parsed) = raw.trim().parse::<Mime>() else {
            return MimeClassification::Binary;
        };

        let essence = parsed.essence_str();
        let subtype = essence
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or_default()
            .to_string();

        if parsed.type_() == mime::TEXT || subtype.contains("json") || subtype.contains("xml") {
            MimeClassification::StructuredText { subtype }
        } else {
            MimeClassification::Binary
        }
    }

    /// Classify from response headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(CONTENT_TYPE) {
            Some(value) => Self::from_content_type(Some(value.to_str().unwrap_or_default())),
            None => MimeClassification::None,
        }
    }

    /// Subtype is markup a DOM can be built from
    pub fn is_markup(&self) -> bool {
        match self {
            MimeClassification::StructuredText { subtype } => {
                subtype.contains("html") || subtype.contains("xml")
            }
            _ => false,
        }
    }

    /// Subtype is JSON
    pub fn is_json(&self) -> bool {
        match self {
            MimeClassification::StructuredText { subtype } => subtype.contains("json"),
            _ => false,
        }
    }
}
