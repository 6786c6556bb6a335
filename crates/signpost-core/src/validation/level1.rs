//! Level 1: the links a resource advertises inline in its `Link` header.
//!
//! Checked over the flat list, without anchor grouping: exactly one
//! `cite-as` (served over https), at least one `describedby`, and an
//! `author` if possible.

use super::{present_links, LinkSlot};
use crate::report::{Issue, IssueReport};
use crate::view::{SignPostingResult, SignPostingView};
use crate::weblink::WebLink;

pub fn validate<L: LinkSlot>(links: &[L]) -> SignPostingResult {
    let mut issues = Vec::new();
    let present = present_links(links, &mut issues);

    let cite_as: Vec<&WebLink> = with_rel(&present, "cite-as");
    match cite_as.as_slice() {
        [] => issues.push(Issue::error("missing relation type 'cite-as'")),
        [only] => {
            if !only.scheme().is_some_and(|s| s.eq_ignore_ascii_case("https")) {
                issues.push(Issue::warning(format!(
                    "non-https target for relation type 'cite-as': '{}'",
                    only.target()
                )));
            }
        }
        many => issues.push(Issue::error(format!(
            "multiple links with relation type 'cite-as' ({})",
            many.len()
        ))),
    }

    if with_rel(&present, "describedby").is_empty() {
        issues.push(Issue::error("missing relation type 'describedby'"));
    }
    if with_rel(&present, "author").is_empty() {
        issues.push(Issue::warning("missing recommended relation type 'author'"));
    }

    tracing::debug!(links = present.len(), issues = issues.len(), "level 1 validated");
    SignPostingResult::new(SignPostingView::from_slots(links), IssueReport::new(issues))
}

fn with_rel<'a>(links: &[&'a WebLink], relation: &str) -> Vec<&'a WebLink> {
    links
        .iter()
        .copied()
        .filter(|link| link.has_rel(relation))
        .collect()
}
