//! Read-only Signposting projection over a list of web links.

use crate::report::IssueReport;
use crate::validation::LinkSlot;
use crate::weblink::WebLink;

/// Owned snapshot of the links a validation ran over.
///
/// Built by copying the present links out of the caller's input, so later
/// changes to that input never show up here. Relation lookups match ASCII
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignPostingView {
    web_links: Vec<WebLink>,
}

impl SignPostingView {
    pub fn new(web_links: Vec<WebLink>) -> Self {
        Self { web_links }
    }

    /// Copies every present link; absent slots are dropped.
    pub fn from_slots<L: LinkSlot>(links: &[L]) -> Self {
        Self::new(links.iter().filter_map(LinkSlot::link).cloned().collect())
    }

    pub fn web_links(&self) -> &[WebLink] {
        &self.web_links
    }

    pub fn len(&self) -> usize {
        self.web_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.web_links.is_empty()
    }

    pub fn with_relation_type(&self, relation: &str) -> Vec<&WebLink> {
        self.web_links
            .iter()
            .filter(|l| l.has_rel(relation))
            .collect()
    }

    pub fn cite_as(&self) -> Vec<&str> {
        self.targets("cite-as")
    }

    pub fn described_by(&self) -> Vec<&str> {
        self.targets("describedby")
    }

    /// Link Set resources advertised with `rel=linkset`; never dereferenced here.
    pub fn linksets(&self) -> Vec<&str> {
        self.targets("linkset")
    }

    fn targets(&self, relation: &str) -> Vec<&str> {
        self.with_relation_type(relation)
            .into_iter()
            .map(WebLink::target)
            .collect()
    }
}

/// Terminal output of every validator and of the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPostingResult {
    pub view: SignPostingView,
    pub report: IssueReport,
}

impl SignPostingResult {
    pub fn new(view: SignPostingView, report: IssueReport) -> Self {
        Self { view, report }
    }
}
