//! Level 2 discovery: does the resource advertise its Link Set inline?
//!
//! Looks for `rel=linkset` links with a Link Set media type. The advertised
//! Link Set is never fetched.

use super::{present_links, LinkSlot};
use crate::report::{Issue, IssueReport};
use crate::view::{SignPostingResult, SignPostingView};
use crate::weblink::WebLink;

/// Media types a Link Set may be served as.
pub const SUPPORTED_LINKSET_TYPES: [&str; 2] = ["application/linkset", "application/linkset+json"];

pub fn is_supported_linkset_type(media_type: &str) -> bool {
    SUPPORTED_LINKSET_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(media_type.trim()))
}

pub fn validate<L: LinkSlot>(links: &[L]) -> SignPostingResult {
    let mut issues = Vec::new();
    let present = present_links(links, &mut issues);

    let linksets: Vec<&WebLink> = present
        .into_iter()
        .filter(|link| link.has_rel("linkset"))
        .collect();

    if linksets.is_empty() {
        issues.push(Issue::error("no resource with rel=linkset found"));
    } else {
        check_linkset_types(&linksets, &mut issues);
    }

    tracing::debug!(linksets = linksets.len(), issues = issues.len(), "discovery validated");
    SignPostingResult::new(SignPostingView::from_slots(links), IssueReport::new(issues))
}

fn check_linkset_types(linksets: &[&WebLink], issues: &mut Vec<Issue>) {
    if linksets.iter().all(|link| link.link_type().is_none()) {
        issues.push(Issue::warning("missing type for linkset"));
    }

    let mut supported_targets: Vec<&str> = Vec::new();
    for link in linksets {
        match link.link_type() {
            Some(media_type) if is_supported_linkset_type(media_type) => {
                if !supported_targets.contains(&link.target()) {
                    supported_targets.push(link.target());
                }
            }
            Some(media_type) => issues.push(Issue::warning(format!(
                "unsupported type '{media_type}' for linkset"
            ))),
            None => {}
        }
    }

    match supported_targets.len() {
        0 => issues.push(Issue::error("no supported linkset type found")),
        1 => {}
        _ => issues.push(Issue::warning("linkset has multiple targets")),
    }
}
