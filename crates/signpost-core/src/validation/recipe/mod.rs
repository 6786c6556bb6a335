//! Level 2 recipes: per-resource relation cardinality rules.
//!
//! Every recipe validator first groups the input by anchor
//! ([`group_by_single_anchor`]). Cardinality is only judged when all links
//! share one anchor and every link has one; otherwise the grouping issues are
//! reported and the rule table is skipped.

mod router;

use std::fmt;

use super::anchor::group_by_single_anchor;
use super::LinkSlot;
use crate::report::{Issue, IssueReport};
use crate::view::{SignPostingResult, SignPostingView};

pub use router::{determine_recipe, route};

/// A Level 2 resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipe {
    LandingPage,
    MetadataResource,
    ContentResource,
}

/// Allowed occurrences of one relation type within an anchor context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityRule {
    pub relation: &'static str,
    pub min: usize,
    /// `None` is unbounded.
    pub max: Option<usize>,
}

const fn rule(relation: &'static str, min: usize, max: Option<usize>) -> CardinalityRule {
    CardinalityRule { relation, min, max }
}

const LANDING_PAGE_RULES: &[CardinalityRule] = &[
    rule("cite-as", 1, Some(1)),
    rule("describedby", 1, None),
    rule("item", 1, None),
    rule("type", 1, Some(2)),
    rule("license", 0, Some(1)),
];

const METADATA_RESOURCE_RULES: &[CardinalityRule] = &[rule("describes", 1, Some(1))];

const CONTENT_RESOURCE_RULES: &[CardinalityRule] = &[
    rule("collection", 1, Some(1)),
    rule("cite-as", 0, Some(1)),
    rule("license", 0, Some(1)),
    rule("type", 0, Some(1)),
];

impl Recipe {
    /// Router precedence order.
    pub const ALL: [Recipe; 3] = [
        Recipe::LandingPage,
        Recipe::MetadataResource,
        Recipe::ContentResource,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Recipe::LandingPage => "landing page",
            Recipe::MetadataResource => "metadata resource",
            Recipe::ContentResource => "content resource",
        }
    }

    pub fn rules(self) -> &'static [CardinalityRule] {
        match self {
            Recipe::LandingPage => LANDING_PAGE_RULES,
            Recipe::MetadataResource => METADATA_RESOURCE_RULES,
            Recipe::ContentResource => CONTENT_RESOURCE_RULES,
        }
    }

    /// Relation types whose presence identifies this recipe.
    pub fn signals(self) -> &'static [&'static str] {
        match self {
            Recipe::LandingPage => &["describedby", "item"],
            Recipe::MetadataResource => &["describes"],
            Recipe::ContentResource => &["collection"],
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CardinalityRule {
    /// The issue for `count` occurrences, if the rule is violated.
    pub fn check(&self, count: usize) -> Option<Issue> {
        if count < self.min {
            return Some(Issue::error(format!(
                "missing mandatory relation type '{}'",
                self.relation
            )));
        }
        match self.max {
            Some(max) if count > max => Some(Issue::error(format!(
                "multiple links with relation type '{}' ({count}). Expected cardinality ({},{max})",
                self.relation, self.min
            ))),
            _ => None,
        }
    }
}

/// Applies one recipe's rule table to `links`.
pub fn validate<L: LinkSlot>(recipe: Recipe, links: &[L]) -> SignPostingResult {
    let mut grouping = group_by_single_anchor(links);
    let mut issues = std::mem::take(&mut grouping.issues);

    if !grouping.single_context {
        tracing::debug!(%recipe, "ambiguous anchor context, cardinality not checked");
    } else if !grouping.links_without_anchor.is_empty() {
        tracing::debug!(
            %recipe,
            count = grouping.links_without_anchor.len(),
            "links without anchor, cardinality not checked"
        );
        issues.extend(grouping.links_without_anchor.iter().map(|link| {
            Issue::error(format!("missing anchor, target was '{}'", link.target()))
        }));
    } else {
        issues.extend(
            recipe
                .rules()
                .iter()
                .filter_map(|rule| rule.check(grouping.count(rule.relation))),
        );
    }

    SignPostingResult::new(SignPostingView::from_slots(links), IssueReport::new(issues))
}

#[cfg(test)]
mod tests;
