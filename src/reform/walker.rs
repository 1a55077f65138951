use log::debug;
use markup5ever_rcdom::{Handle, NodeData};

use super::rules::{ReviewNotice, RewriteRules, RuleContext, RuleScope};
use crate::config::LinkRewrite;
use crate::dom::children;

/// Outcome of rewriting one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReformReport {
    /// Element nodes visited by the walker
    pub elements_visited: usize,
    /// Rule applications that changed the tree
    pub rewrites: usize,
    /// Markup flagged for manual review
    pub notices: Vec<ReviewNotice>,
}

impl ReformReport {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.rewrites == 0
    }
}

/// Applies the rewrite rules to every element of a document tree in a
/// single depth-first pre-order pass.
pub struct Reformer<'a> {
    rules: RewriteRules,
    link_rewrite: Option<&'a LinkRewrite>,
}

impl<'a> Reformer<'a> {
    #[must_use]
    pub fn new(link_rewrite: Option<&'a LinkRewrite>) -> Self {
        Self {
            rules: RewriteRules::new(),
            link_rewrite,
        }
    }

    /// Rewrite the tree under `root` in place.
    ///
    /// `source` names the document in review notices.
    pub fn reform(&self, root: &Handle, source: &str) -> ReformReport {
        let mut ctx = RuleContext::new(source, self.link_rewrite);
        let mut report = ReformReport::default();

        self.walk_node(root, &mut ctx, &mut report);

        report.notices = ctx.notices;
        debug!(
            "Reformed {source}: {} elements visited, {} rewrites, {} notices",
            report.elements_visited,
            report.rewrites,
            report.notices.len()
        );
        report
    }

    fn walk_node(&self, node: &Handle, ctx: &mut RuleContext<'_>, report: &mut ReformReport) {
        if matches!(node.data, NodeData::Element { .. }) {
            report.elements_visited += 1;
            self.apply_rules(node, ctx, report);
        }

        // Rules only edit the visited node's own child list, so a snapshot
        // taken after they ran is exactly the set of children to descend into.
        for child in children(node) {
            self.walk_node(&child, ctx, report);
        }
    }

    /// Run every rule once in order, then keep re-running the child-list
    /// rules until none of them matches.
    fn apply_rules(&self, node: &Handle, ctx: &mut RuleContext<'_>, report: &mut ReformReport) {
        let mut first_pass = true;
        loop {
            let mut changed = false;
            for rule in self.rules.iter() {
                let applies = match rule.scope() {
                    RuleScope::Children => true,
                    RuleScope::Element => first_pass,
                };
                if applies && rule.apply(node, ctx) {
                    debug!("{}: applied {} rule", ctx.source, rule.name());
                    report.rewrites += 1;
                    if rule.scope() == RuleScope::Children {
                        changed = true;
                    }
                }
            }
            first_pass = false;
            if !changed {
                break;
            }
        }
    }
}
