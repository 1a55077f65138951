//! In-memory HTML documents
//!
//! Thin layer over `html5ever` and `markup5ever_rcdom`. Parsing and
//! serialization are delegated entirely; `node_util` adds the handful of
//! tree edits the rewrite rules need while keeping every node under exactly
//! one parent.

pub mod node_util;

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

pub use node_util::*;

/// A parsed HTML document. Owned by one processing iteration and dropped
/// once serialized.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse a complete document. html5ever recovers from malformed markup,
    /// so this never fails; missing `html`/`head`/`body` are synthesized.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    /// The document node (parent of the doctype and `<html>`).
    #[must_use]
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// Serialize the document back to HTML.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the serializer fails or produces invalid UTF-8.
    pub fn to_html(&self) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        let handle: SerializableHandle = SerializableHandle::from(self.dom.document.clone());
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        serialize(&mut bytes, &handle, opts)?;
        String::from_utf8(bytes).map_err(std::io::Error::other)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
