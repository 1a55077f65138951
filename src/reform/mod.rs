//! Reform pass: normalize legacy blog markup
//!
//! The [`Reformer`] walks a parsed document once, depth-first pre-order,
//! and applies the [`rules`] to every element before descending into its
//! (possibly rewritten) children.

pub mod rules;
mod walker;

pub use rules::{ReviewNotice, RewriteRule, RewriteRules, RuleContext, RuleScope};
pub use walker::{ReformReport, Reformer};

use crate::config::LinkRewrite;
use crate::dom::Document;

/// Parse `html`, reform it and serialize the result.
///
/// # Errors
///
/// Returns an I/O error if the rewritten tree cannot be serialized.
pub fn reform_html(
    html: &str,
    source: &str,
    link_rewrite: Option<&LinkRewrite>,
) -> std::io::Result<(String, ReformReport)> {
    let document = Document::parse(html);
    let report = Reformer::new(link_rewrite).reform(document.root(), source);
    Ok((document.to_html()?, report))
}
