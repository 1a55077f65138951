use regex::Regex;
use std::sync::LazyLock;

use markup5ever_rcdom::Handle;

use super::{RewriteRule, RuleContext, RuleScope};
use crate::dom::{children, find_child, is_element, new_element, replace_child, text};

/// Two or more hyphens or em-dashes at the start of a paragraph's text
static DIVIDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-—]{2,}").expect("DIVIDER_RE: hardcoded regex is valid"));

/// Plain-text dividers: `<p>---</p>` becomes `<hr>`.
pub struct DividerRule;

fn is_divider_paragraph(node: &Handle) -> bool {
    is_element(node, "p")
        && children(node)
            .iter()
            .filter_map(text)
            .any(|text| DIVIDER_RE.is_match(&text))
}

impl RewriteRule for DividerRule {
    fn name(&self) -> &'static str {
        "divider"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Children
    }

    fn apply(&self, node: &Handle, _ctx: &mut RuleContext<'_>) -> bool {
        let Some(paragraph) = find_child(node, is_divider_paragraph) else {
            return false;
        };
        replace_child(node, &paragraph, new_element("hr", &[]))
    }
}
