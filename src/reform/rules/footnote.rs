use markup5ever_rcdom::Handle;

use super::{RewriteRule, RuleContext, RuleScope};
use crate::dom::{attr, children, find_child, is_element, new_text, replace_child, text_content};

/// Footnote markers: `<a href="#note1">*1</a>` becomes the bare text `*1`.
pub struct FootnoteRule;

fn is_footnote_anchor(node: &Handle) -> bool {
    is_element(node, "a") && attr(node, "href").is_some_and(|href| href.starts_with('#'))
}

impl RewriteRule for FootnoteRule {
    fn name(&self) -> &'static str {
        "footnote"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Children
    }

    fn apply(&self, node: &Handle, _ctx: &mut RuleContext<'_>) -> bool {
        let Some(anchor) = find_child(node, is_footnote_anchor) else {
            return false;
        };

        // The visible marker is the first child's text; an empty anchor yields ""
        let marker = children(&anchor)
            .first()
            .map(text_content)
            .unwrap_or_default();

        replace_child(node, &anchor, new_text(&marker))
    }
}
