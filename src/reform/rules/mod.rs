//! Legacy markup rewrite rules
//!
//! Each rule recognizes one idiom of the old blog editor and rewrites it
//! into portable markup. Rules are registered in a fixed order; the walker
//! applies them to every element it visits.

mod affiliate;
mod divider;
mod embed;
mod footnote;
mod link;

pub use affiliate::AffiliateImageRule;
pub use divider::DividerRule;
pub use embed::EmbedRule;
pub use footnote::FootnoteRule;
pub use link::LinkDomainRule;

use markup5ever_rcdom::Handle;

use crate::config::LinkRewrite;

/// What part of the tree a rule may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Restructures the visited element's child list; one match per call.
    /// The walker re-runs these until none reports a change.
    Children,
    /// Touches only the visited element itself; runs once per element.
    Element,
}

/// An entry flagged for manual review before publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewNotice {
    /// Document the flagged markup came from
    pub source: String,
    /// href of the flagged anchor
    pub href: String,
}

impl std::fmt::Display for ReviewNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Amazon image link needs manual review: {} ({})",
            self.source, self.href
        )
    }
}

/// Per-document state shared by the rules
#[derive(Debug)]
pub struct RuleContext<'a> {
    /// Name of the document being rewritten, used in notices
    pub source: &'a str,
    pub link_rewrite: Option<&'a LinkRewrite>,
    pub notices: Vec<ReviewNotice>,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn new(source: &'a str, link_rewrite: Option<&'a LinkRewrite>) -> Self {
        Self {
            source,
            link_rewrite,
            notices: Vec::new(),
        }
    }
}

/// A single rewrite applied to visited elements.
pub trait RewriteRule {
    fn name(&self) -> &'static str;

    fn scope(&self) -> RuleScope;

    /// Apply the rule to `node`. Returns `true` if the tree changed.
    /// A rule whose precondition does not hold is a no-op.
    fn apply(&self, node: &Handle, ctx: &mut RuleContext<'_>) -> bool;
}

/// The built-in rules in application order
pub struct RewriteRules {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl RewriteRules {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(FootnoteRule),
                Box::new(EmbedRule),
                Box::new(DividerRule),
                Box::new(LinkDomainRule),
                Box::new(AffiliateImageRule),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RewriteRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self::new()
    }
}
