//! Anchor (link context) grouping for Level 2 recipes.
//!
//! A Level 2 recipe is defined per origin resource, so its relations can only
//! be counted when every link names the same anchor. Grouping walks the input
//! once and stops at the first anchor that differs from the first one seen.

use std::collections::BTreeMap;

use super::LinkSlot;
use crate::report::Issue;
use crate::weblink::WebLink;

/// Outcome of [`group_by_single_anchor`].
#[derive(Debug, Default)]
pub struct AnchorGrouping<'a> {
    /// False when a second distinct anchor was found; counts are then empty.
    pub single_context: bool,
    /// Anchor established by the first anchored link.
    pub anchor: Option<&'a str>,
    /// Occurrences per lower-cased relation token, over links with `anchor`.
    pub relation_counts: BTreeMap<String, usize>,
    /// Links that carry no anchor; never counted.
    pub links_without_anchor: Vec<&'a WebLink>,
    /// Empty-slot and ambiguity errors, in input order.
    pub issues: Vec<Issue>,
}

impl AnchorGrouping<'_> {
    pub fn count(&self, relation: &str) -> usize {
        self.relation_counts
            .get(&relation.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

/// Checks that all anchored links share one anchor and counts their relations.
pub fn group_by_single_anchor<L: LinkSlot>(links: &[L]) -> AnchorGrouping<'_> {
    let mut grouping = AnchorGrouping {
        single_context: true,
        ..AnchorGrouping::default()
    };

    for (index, slot) in links.iter().enumerate() {
        let Some(link) = slot.link() else {
            grouping
                .issues
                .push(Issue::error(format!("null element at index {index} skipped")));
            continue;
        };
        let Some(current) = link.anchor() else {
            grouping.links_without_anchor.push(link);
            continue;
        };
        let expected = *grouping.anchor.get_or_insert(current);
        if current != expected {
            tracing::trace!(index, expected, found = current, "second anchor, aborting grouping");
            grouping.issues.push(Issue::error(format!(
                "multiple anchors found, context is ambiguous: expected '{expected}' but found '{current}'"
            )));
            grouping.single_context = false;
            grouping.relation_counts.clear();
            return grouping;
        }
        for rel in link.rel() {
            *grouping
                .relation_counts
                .entry(rel.to_ascii_lowercase())
                .or_insert(0) += 1;
        }
    }

    grouping
}

/// Present links sharing one anchor value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorContext {
    pub anchor: Option<String>,
    pub links: Vec<WebLink>,
}

/// Splits present links into one context per distinct anchor.
///
/// Contexts appear in the order their anchor is first seen; links without an
/// anchor are collected into a final context with `anchor: None`.
pub fn contexts<L: LinkSlot>(links: &[L]) -> Vec<AnchorContext> {
    let mut anchored: Vec<AnchorContext> = Vec::new();
    let mut unanchored: Vec<WebLink> = Vec::new();

    for link in links.iter().filter_map(LinkSlot::link) {
        match link.anchor() {
            Some(anchor) => match anchored
                .iter_mut()
                .find(|c| c.anchor.as_deref() == Some(anchor))
            {
                Some(context) => context.links.push(link.clone()),
                None => anchored.push(AnchorContext {
                    anchor: Some(anchor.to_string()),
                    links: vec![link.clone()],
                }),
            },
            None => unanchored.push(link.clone()),
        }
    }

    if !unanchored.is_empty() {
        anchored.push(AnchorContext {
            anchor: None,
            links: unanchored,
        });
    }
    anchored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weblink::WebLinkParameter;

    fn link(target: &str, rel: &str, anchor: Option<&str>) -> WebLink {
        let mut params = vec![WebLinkParameter::new("rel", rel)];
        if let Some(a) = anchor {
            params.push(WebLinkParameter::new("anchor", a));
        }
        WebLink::parse(target, params).unwrap()
    }

    const A: &str = "https://example.org/a";
    const B: &str = "https://example.org/b";

    #[test]
    fn counts_relations_of_single_anchor() {
        let links = vec![
            link("https://doi.org/10.1/x", "cite-as", Some(A)),
            link("https://example.org/f1", "item", Some(A)),
            link("https://example.org/f2", "item Collection", Some(A)),
        ];
        let g = group_by_single_anchor(&links);
        assert!(g.single_context);
        assert_eq!(g.anchor, Some(A));
        assert_eq!(g.count("cite-as"), 1);
        assert_eq!(g.count("item"), 2);
        assert_eq!(g.count("collection"), 1);
        assert_eq!(g.count("license"), 0);
        assert!(g.issues.is_empty());
        assert!(g.links_without_anchor.is_empty());
    }

    #[test]
    fn second_anchor_aborts_without_counts() {
        let links = vec![
            link("https://example.org/1", "item", Some(A)),
            link("https://example.org/2", "item", Some(A)),
            link("https://example.org/3", "item", Some(B)),
        ];
        let g = group_by_single_anchor(&links);
        assert!(!g.single_context);
        assert!(g.relation_counts.is_empty());
        assert_eq!(g.issues.len(), 1);
        let msg = &g.issues[0].message;
        assert!(msg.contains("multiple anchors") && msg.contains("ambiguous"), "{msg}");
        assert!(msg.contains(B));
    }

    #[test]
    fn links_without_anchor_are_collected_not_counted() {
        let links = vec![
            link("https://example.org/1", "item", None),
            link("https://example.org/2", "item", Some(A)),
        ];
        let g = group_by_single_anchor(&links);
        assert!(g.single_context);
        assert_eq!(g.links_without_anchor.len(), 1);
        assert_eq!(
            g.links_without_anchor[0].target(),
            "https://example.org/1"
        );
        assert_eq!(g.count("item"), 1);
    }

    #[test]
    fn empty_slots_are_reported_and_skipped() {
        let links = vec![
            None,
            Some(link("https://example.org/1", "item", Some(A))),
            None,
        ];
        let g = group_by_single_anchor(&links);
        assert!(g.single_context);
        assert_eq!(g.issues.len(), 2);
        assert!(g.issues[0].message.contains("null element at index 0"));
        assert!(g.issues[1].message.contains("null element at index 2"));
        assert_eq!(g.count("item"), 1);
    }

    #[test]
    fn contexts_split_by_anchor_in_first_seen_order() {
        let links = vec![
            link("https://example.org/1", "item", Some(B)),
            link("https://example.org/2", "cite-as", None),
            link("https://example.org/3", "describes", Some(A)),
            link("https://example.org/4", "type", Some(B)),
        ];
        let ctx = contexts(&links);
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx[0].anchor.as_deref(), Some(B));
        assert_eq!(ctx[0].links.len(), 2);
        assert_eq!(ctx[1].anchor.as_deref(), Some(A));
        assert_eq!(ctx[2].anchor, None);
        assert_eq!(ctx[2].links[0].target(), "https://example.org/2");
    }
}
