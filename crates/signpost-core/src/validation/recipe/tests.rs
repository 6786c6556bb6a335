//! Tests for Level 2 recipe validation and routing.

use std::collections::BTreeSet;

use super::{determine_recipe, route, validate, CardinalityRule, Recipe};
use crate::report::IssueReport;
use crate::weblink::{WebLink, WebLinkParameter};

const PAGE: &str = "https://example.org/page";
const META: &str = "https://example.org/meta";

fn link(target: &str, rel: &str, anchor: Option<&str>) -> WebLink {
    let mut params = vec![WebLinkParameter::new("rel", rel)];
    if let Some(a) = anchor {
        params.push(WebLinkParameter::new("anchor", a));
    }
    WebLink::parse(target, params).unwrap()
}

fn page_link(target: &str, rel: &str) -> WebLink {
    link(target, rel, Some(PAGE))
}

fn landing_page() -> Vec<WebLink> {
    vec![
        page_link("https://doi.org/10.1/x", "cite-as"),
        page_link("https://example.org/meta.json", "describedby"),
        page_link("https://example.org/file.csv", "item"),
        page_link("https://schema.org/Dataset", "type"),
        page_link("https://spdx.org/licenses/CC-BY-4.0", "license"),
    ]
}

fn messages(report: &IssueReport) -> Vec<&str> {
    report.issues().iter().map(|i| i.message.as_str()).collect()
}

fn relations(tokens: &[&str]) -> BTreeSet<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn complete_landing_page_passes() {
    let result = validate(Recipe::LandingPage, &landing_page());
    assert!(result.report.is_empty(), "{:?}", messages(&result.report));
    assert_eq!(result.view.len(), 5);
}

#[test]
fn landing_page_reports_every_violated_rule() {
    let links = vec![
        page_link("https://doi.org/10.1/x", "cite-as"),
        page_link("https://doi.org/10.1/y", "cite-as"),
        page_link("https://schema.org/A", "type"),
        page_link("https://schema.org/B", "type"),
        page_link("https://schema.org/C", "type"),
    ];
    let result = validate(Recipe::LandingPage, &links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 4, "{msgs:?}");
    assert!(msgs[0].contains("multiple") && msgs[0].contains("'cite-as' (2)"));
    assert!(msgs[0].contains("(1,1)"));
    assert!(msgs[1].contains("missing") && msgs[1].contains("describedby"));
    assert!(msgs[2].contains("missing") && msgs[2].contains("item"));
    assert!(msgs[3].contains("multiple") && msgs[3].contains("'type' (3)"));
    assert!(msgs[3].contains("(1,2)"));
    assert!(result.report.issues().iter().all(|i| i.is_error()));
}

#[test]
fn unbounded_relations_accept_many_links() {
    let mut links = landing_page();
    for n in 0..5 {
        links.push(page_link(&format!("https://example.org/file{n}"), "item"));
        links.push(page_link(&format!("https://example.org/meta{n}"), "describedby"));
    }
    assert!(validate(Recipe::LandingPage, &links).report.is_empty());
}

#[test]
fn content_resource_with_two_collections() {
    let links = vec![
        link("https://example.org/page", "collection", Some("https://example.org/file")),
        link("https://example.org/other", "collection", Some("https://example.org/file")),
    ];
    let result = validate(Recipe::ContentResource, &links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("multiple") && msgs[0].contains("collection"));
}

#[test]
fn content_resource_optional_relations_are_bounded() {
    let file = Some("https://example.org/file");
    let links = vec![
        link("https://example.org/page", "collection", file),
        link("https://spdx.org/licenses/MIT", "license", file),
        link("https://spdx.org/licenses/0BSD", "license", file),
    ];
    let msgs_owned = validate(Recipe::ContentResource, &links).report;
    let msgs = messages(&msgs_owned);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("license") && msgs[0].contains("(0,1)"));
}

#[test]
fn metadata_resource_needs_exactly_one_describes() {
    let missing = validate(Recipe::MetadataResource, &[link(PAGE, "author", Some(META))]);
    assert!(messages(&missing.report)[0].contains("missing mandatory relation type 'describes'"));

    let ok = validate(Recipe::MetadataResource, &[link(PAGE, "describes", Some(META))]);
    assert!(ok.report.is_empty());
}

#[test]
fn space_separated_tokens_count_independently() {
    let links = vec![link(PAGE, "describes cite-as", Some(META))];
    assert!(validate(Recipe::MetadataResource, &links).report.is_empty());

    let links = vec![
        link("https://example.org/a", "collection license", Some(META)),
        link("https://example.org/b", "license", Some(META)),
    ];
    let report = validate(Recipe::ContentResource, &links).report;
    assert_eq!(report.len(), 1);
    assert!(report.issues()[0].message.contains("license"));
}

#[test]
fn relation_tokens_match_case_insensitively() {
    let links = vec![link(PAGE, "Describes", Some(META))];
    assert!(validate(Recipe::MetadataResource, &links).report.is_empty());
}

#[test]
fn ambiguous_anchor_skips_cardinality() {
    let links = vec![
        page_link("https://doi.org/10.1/x", "cite-as"),
        page_link("https://doi.org/10.1/y", "cite-as"),
        link("https://example.org/file", "item", Some(META)),
    ];
    let result = validate(Recipe::LandingPage, &links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 1, "{msgs:?}");
    assert!(msgs[0].contains("ambiguous"));
    assert_eq!(result.view.len(), 3);
}

#[test]
fn missing_anchor_reported_per_link_and_skips_cardinality() {
    let links = vec![
        link("https://example.org/a", "collection", None),
        link("https://example.org/b", "collection", Some(META)),
        link("https://example.org/c", "collection", None),
    ];
    let result = validate(Recipe::ContentResource, &links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 2, "{msgs:?}");
    assert!(msgs[0].contains("missing anchor") && msgs[0].contains("https://example.org/a"));
    assert!(msgs[1].contains("https://example.org/c"));
}

#[test]
fn empty_slots_are_errors_but_do_not_block_counting() {
    let mut slots: Vec<Option<WebLink>> = landing_page().into_iter().map(Some).collect();
    slots.insert(2, None);
    let result = validate(Recipe::LandingPage, &slots);
    let msgs = messages(&result.report);
    assert_eq!(msgs, vec!["null element at index 2 skipped"]);
    assert_eq!(result.view.len(), 5);
}

#[test]
fn empty_input_misses_every_mandatory_relation() {
    let result = validate(Recipe::LandingPage, &Vec::<WebLink>::new());
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 4);
    assert!(msgs.iter().all(|m| m.starts_with("missing mandatory")));
}

#[test]
fn cardinality_rule_check_bounds() {
    let rule = CardinalityRule {
        relation: "type",
        min: 1,
        max: Some(2),
    };
    assert!(rule.check(0).is_some());
    assert!(rule.check(1).is_none());
    assert!(rule.check(2).is_none());
    assert!(rule.check(3).is_some());
    let optional = CardinalityRule {
        relation: "license",
        min: 0,
        max: None,
    };
    assert!(optional.check(0).is_none());
    assert!(optional.check(99).is_none());
}

#[test]
fn recipe_precedence() {
    assert_eq!(determine_recipe(&relations(&["item"])), Some(Recipe::LandingPage));
    assert_eq!(
        determine_recipe(&relations(&["describes", "collection"])),
        Some(Recipe::MetadataResource)
    );
    assert_eq!(
        determine_recipe(&relations(&["collection", "describedby", "describes"])),
        Some(Recipe::LandingPage)
    );
    assert_eq!(
        determine_recipe(&relations(&["collection", "license"])),
        Some(Recipe::ContentResource)
    );
    assert_eq!(determine_recipe(&relations(&["cite-as", "type", "license"])), None);
    assert_eq!(determine_recipe(&BTreeSet::new()), None);
}

#[test]
fn route_delegates_to_landing_page() {
    let mut links = landing_page();
    links.push(page_link("https://doi.org/10.1/other", "cite-as"));
    let result = route(&links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("multiple") && msgs[0].contains("cite-as"));
}

#[test]
fn route_prefers_landing_page_over_collection() {
    let links = vec![
        page_link("https://example.org/meta.json", "describedby"),
        page_link("https://example.org/page", "collection"),
    ];
    let result = route(&links);
    assert_eq!(
        messages(&result.report),
        vec![
            "missing mandatory relation type 'cite-as'",
            "missing mandatory relation type 'item'",
            "missing mandatory relation type 'type'",
        ]
    );
}

#[test]
fn route_delegates_to_metadata_resource() {
    let result = route(&[link(PAGE, "describes", Some(META))]);
    assert!(result.report.is_empty());
}

#[test]
fn route_without_signal_runs_no_recipe() {
    let links = vec![page_link("https://doi.org/10.1/x", "cite-as")];
    let result = route(&links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("no recipe could be determined"));
    assert!(msgs[0].contains("cite-as"));
}

#[test]
fn route_with_multiple_anchors_runs_no_recipe() {
    let links = vec![
        page_link("https://example.org/file", "item"),
        link(PAGE, "describes", Some(META)),
    ];
    let result = route(&links);
    let msgs = messages(&result.report);
    assert_eq!(msgs.len(), 1, "{msgs:?}");
    assert!(msgs[0].contains("ambiguous anchors"));
    assert!(msgs[0].contains(PAGE) && msgs[0].contains(META));
    assert_eq!(result.view.len(), 2);
}

#[test]
fn route_reports_empty_slots_and_filters_them_for_the_recipe() {
    let slots = vec![None, Some(link(PAGE, "describes", Some(META)))];
    let result = route(&slots);
    let msgs = messages(&result.report);
    assert_eq!(msgs, vec!["null element encountered at index 0"]);
    assert_eq!(result.view.len(), 1);
}

#[test]
fn route_view_wraps_input_even_without_recipe() {
    let links = vec![link("https://example.org/x", "author", None)];
    let result = route(&links);
    assert_eq!(result.view.web_links(), links.as_slice());
}
