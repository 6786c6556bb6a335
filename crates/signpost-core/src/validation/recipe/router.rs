//! Picks the Level 2 recipe that applies to a link list.

use std::collections::BTreeSet;

use super::{validate, Recipe};
use crate::report::{Issue, IssueReport};
use crate::validation::LinkSlot;
use crate::view::{SignPostingResult, SignPostingView};
use crate::weblink::WebLink;

/// First recipe, in precedence order, whose signal is among `relations`.
///
/// `relations` holds lower-cased relation tokens.
pub fn determine_recipe(relations: &BTreeSet<String>) -> Option<Recipe> {
    Recipe::ALL.into_iter().find(|recipe| {
        recipe
            .signals()
            .iter()
            .any(|signal| relations.contains(*signal))
    })
}

/// Validates `links` with the recipe their relation types point to.
///
/// Nothing is delegated when the input spans several anchors or carries no
/// recipe signal.
pub fn route<L: LinkSlot>(links: &[L]) -> SignPostingResult {
    let mut issues = Vec::new();
    let mut present: Vec<&WebLink> = Vec::with_capacity(links.len());
    for (index, slot) in links.iter().enumerate() {
        match slot.link() {
            Some(link) => present.push(link),
            None => issues.push(Issue::error(format!(
                "null element encountered at index {index}"
            ))),
        }
    }

    let mut anchors: Vec<&str> = Vec::new();
    for anchor in present.iter().filter_map(|link| link.anchor()) {
        if !anchors.contains(&anchor) {
            anchors.push(anchor);
        }
    }

    if anchors.len() > 1 {
        tracing::debug!(anchors = anchors.len(), "ambiguous anchors, no recipe applied");
        issues.push(Issue::error(format!(
            "ambiguous anchors: input contains multiple anchors ({})",
            anchors.join(", ")
        )));
    } else {
        let relations: BTreeSet<String> = present
            .iter()
            .flat_map(|link| link.rel())
            .map(str::to_ascii_lowercase)
            .collect();
        match determine_recipe(&relations) {
            Some(recipe) => {
                tracing::debug!(%recipe, "routing to recipe");
                let child = validate(recipe, &present);
                issues.extend(child.report.into_issues());
            }
            None => {
                tracing::debug!("no recipe signal among relation types");
                let listed: Vec<&str> = relations.iter().map(String::as_str).collect();
                issues.push(Issue::error(format!(
                    "no recipe could be determined from relation types [{}]",
                    listed.join(", ")
                )));
            }
        }
    }

    SignPostingResult::new(SignPostingView::from_slots(links), IssueReport::new(issues))
}
