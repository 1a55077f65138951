use markup5ever_rcdom::Handle;

use super::{RewriteRule, RuleContext, RuleScope};
use crate::dom::{
    append_child, attr, children, find_descendant, insert_before, is_element, new_element,
    new_text, remove_child,
};

/// Legacy iframe embeds become plain links that open in a new tab.
///
/// - `iframe` followed (later among siblings) by a `cite`: the embed card.
///   Replaced by `<a href=CITE_HREF target="_blank">TITLE</a>`, where TITLE
///   is the iframe's `title` or, failing that, the href itself.
/// - `iframe` with a `src` and no following `cite`: replaced by
///   `<p><a href=SRC target="_blank">SRC</a></p>`.
pub struct EmbedRule;

enum Embed {
    Card { iframe: Handle, cite: Handle },
    Bare { iframe: Handle, src: String },
}

/// First iframe among `node`'s children that fits one of the two shapes.
fn find_embed(node: &Handle) -> Option<Embed> {
    let children = children(node);
    children.iter().enumerate().find_map(|(index, child)| {
        if !is_element(child, "iframe") {
            return None;
        }
        if let Some(cite) = children[index + 1..].iter().find(|c| is_element(c, "cite")) {
            return Some(Embed::Card {
                iframe: child.clone(),
                cite: cite.clone(),
            });
        }
        attr(child, "src").map(|src| Embed::Bare {
            iframe: child.clone(),
            src,
        })
    })
}

fn new_tab_link(href: &str, label: &str) -> Handle {
    let link = new_element("a", &[("href", href), ("target", "_blank")]);
    append_child(&link, new_text(label));
    link
}

impl RewriteRule for EmbedRule {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Children
    }

    fn apply(&self, node: &Handle, _ctx: &mut RuleContext<'_>) -> bool {
        match find_embed(node) {
            Some(Embed::Card { iframe, cite }) => {
                let href = find_descendant(&cite, &|n| is_element(n, "a"))
                    .and_then(|anchor| attr(&anchor, "href"))
                    .unwrap_or_default();
                let title = attr(&iframe, "title")
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| href.clone());

                insert_before(node, new_tab_link(&href, &title), &iframe);
                remove_child(node, &iframe);
                remove_child(node, &cite);
                true
            }
            Some(Embed::Bare { iframe, src }) => {
                let paragraph = new_element("p", &[]);
                append_child(&paragraph, new_tab_link(&src, &src));

                insert_before(node, paragraph, &iframe);
                remove_child(node, &iframe);
                true
            }
            None => false,
        }
    }
}
