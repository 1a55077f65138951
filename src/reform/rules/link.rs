use markup5ever_rcdom::Handle;

use super::{RewriteRule, RuleContext, RuleScope};
use crate::dom::{attr, is_element, set_attr};

/// Internal links: literal old-prefix → new-prefix substitution in `a[href]`.
pub struct LinkDomainRule;

impl RewriteRule for LinkDomainRule {
    fn name(&self) -> &'static str {
        "link-domain"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Element
    }

    fn apply(&self, node: &Handle, ctx: &mut RuleContext<'_>) -> bool {
        let Some(rewrite) = ctx.link_rewrite else {
            return false;
        };
        if !is_element(node, "a") {
            return false;
        }
        let Some(href) = attr(node, "href") else {
            return false;
        };

        let rewritten = rewrite.apply(&href);
        rewritten != href && set_attr(node, "href", &rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkRewrite;
    use crate::dom::{Document, elements_preorder};

    fn rewrite_first_anchor(html: &str, rewrite: Option<&LinkRewrite>) -> (String, bool) {
        let doc = Document::parse(html);
        let anchor = elements_preorder(doc.root())
            .into_iter()
            .find(|n| is_element(n, "a"))
            .unwrap();
        let mut ctx = RuleContext::new("test.html", rewrite);
        let changed = LinkDomainRule.apply(&anchor, &mut ctx);
        (doc.to_html().unwrap(), changed)
    }

    #[test]
    fn test_rewrites_every_occurrence() {
        let rewrite = LinkRewrite::new("https://old.example", "https://new.example").unwrap();
        let (html, changed) = rewrite_first_anchor(
            r#"<a href="https://old.example/post/1?from=https://old.example">x</a>"#,
            Some(&rewrite),
        );
        assert!(changed);
        assert!(html.contains(r#"href="https://new.example/post/1?from=https://new.example""#));
    }

    #[test]
    fn test_disabled_without_configuration() {
        let (html, changed) =
            rewrite_first_anchor(r#"<a href="https://old.example/post/1">x</a>"#, None);
        assert!(!changed);
        assert!(html.contains(r#"href="https://old.example/post/1""#));
    }

    #[test]
    fn test_anchor_without_href() {
        let rewrite = LinkRewrite::new("a", "b").unwrap();
        let (_, changed) = rewrite_first_anchor(r#"<a name="top">x</a>"#, Some(&rewrite));
        assert!(!changed);
    }
}
