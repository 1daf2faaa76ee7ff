// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM trees for markup response bodies
//!
//! Provides a small read-only document model built on top of html5ever.

mod document;
mod node;
mod parser;

pub use document::{Document, Element};
pub use node::{NodeData, NodeId, NodeType};
pub use parser::parse_document;
