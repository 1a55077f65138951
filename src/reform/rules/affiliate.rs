use log::warn;
use regex::Regex;
use std::sync::LazyLock;

use markup5ever_rcdom::Handle;

use super::{ReviewNotice, RewriteRule, RuleContext, RuleScope};
use crate::dom::{attr, children, is_element};

/// Product pages on the Japanese Amazon storefront
static AMAZON_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?amazon\.co\.jp")
        .expect("AMAZON_LINK_RE: hardcoded regex is valid")
});

/// Images served by the Amazon ad system
static AD_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"amazon-adsystem\.com").expect("AD_IMAGE_RE: hardcoded regex is valid")
});

/// Flags Amazon links wrapping ad-system images. Never mutates the tree.
pub struct AffiliateImageRule;

impl RewriteRule for AffiliateImageRule {
    fn name(&self) -> &'static str {
        "affiliate-image"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Element
    }

    fn apply(&self, node: &Handle, ctx: &mut RuleContext<'_>) -> bool {
        if !is_element(node, "a") {
            return false;
        }
        let Some(href) = attr(node, "href").filter(|href| AMAZON_LINK_RE.is_match(href)) else {
            return false;
        };

        let has_ad_image = children(node).iter().any(|child| {
            is_element(child, "img")
                && attr(child, "src").is_some_and(|src| AD_IMAGE_RE.is_match(&src))
        });

        if has_ad_image {
            let notice = ReviewNotice {
                source: ctx.source.to_string(),
                href,
            };
            warn!("{notice}");
            ctx.notices.push(notice);
        }
        false
    }
}
