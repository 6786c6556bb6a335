//! Signposting profile validators.
//!
//! Each validator is a pure function from a link list to a
//! [`SignPostingResult`]; [`Validator`] names the fixed set of them so the
//! processor and configuration can select validators by value.
//!
//! Inputs are slices of any [`LinkSlot`]. A slot may be empty (e.g. `None` in
//! a `Vec<Option<WebLink>>`); validators report empty slots as errors and
//! otherwise skip them.

pub mod anchor;
pub mod discovery;
pub mod level1;
pub mod recipe;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::report::Issue;
use crate::view::SignPostingResult;
use crate::weblink::WebLink;

pub use recipe::Recipe;

/// One element of a validator input list.
pub trait LinkSlot {
    fn link(&self) -> Option<&WebLink>;
}

impl LinkSlot for WebLink {
    fn link(&self) -> Option<&WebLink> {
        Some(self)
    }
}

impl<'a> LinkSlot for &'a WebLink {
    fn link(&self) -> Option<&WebLink> {
        Some(*self)
    }
}

impl LinkSlot for Option<WebLink> {
    fn link(&self) -> Option<&WebLink> {
        self.as_ref()
    }
}

impl<'a> LinkSlot for Option<&'a WebLink> {
    fn link(&self) -> Option<&WebLink> {
        *self
    }
}

/// The available validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validator {
    /// Inline (`Link` header) profile: cite-as, describedby, author.
    Level1,
    /// Inline advertisement of a Link Set via `rel=linkset`.
    Level2Discovery,
    /// Picks the Level 2 recipe from the relations present and applies it.
    Level2Recipe,
    Level2LandingPage,
    Level2MetadataResource,
    Level2ContentResource,
}

impl Validator {
    pub const ALL: [Validator; 6] = [
        Validator::Level1,
        Validator::Level2Discovery,
        Validator::Level2Recipe,
        Validator::Level2LandingPage,
        Validator::Level2MetadataResource,
        Validator::Level2ContentResource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Validator::Level1 => "level1",
            Validator::Level2Discovery => "level2-discovery",
            Validator::Level2Recipe => "level2-recipe",
            Validator::Level2LandingPage => "level2-landing-page",
            Validator::Level2MetadataResource => "level2-metadata-resource",
            Validator::Level2ContentResource => "level2-content-resource",
        }
    }

    pub fn validate<L: LinkSlot>(self, links: &[L]) -> SignPostingResult {
        match self {
            Validator::Level1 => level1::validate(links),
            Validator::Level2Discovery => discovery::validate(links),
            Validator::Level2Recipe => recipe::route(links),
            Validator::Level2LandingPage => recipe::validate(Recipe::LandingPage, links),
            Validator::Level2MetadataResource => recipe::validate(Recipe::MetadataResource, links),
            Validator::Level2ContentResource => recipe::validate(Recipe::ContentResource, links),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown validator '{0}' (expected one of: level1, level2-discovery, level2-recipe, level2-landing-page, level2-metadata-resource, level2-content-resource)")]
pub struct UnknownValidator(pub String);

impl FromStr for Validator {
    type Err = UnknownValidator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Validator::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownValidator(s.to_string()))
    }
}

/// Present links of `links`, recording one error per empty slot.
pub(crate) fn present_links<'a, L: LinkSlot>(
    links: &'a [L],
    issues: &mut Vec<Issue>,
) -> Vec<&'a WebLink> {
    let mut present = Vec::with_capacity(links.len());
    for (index, slot) in links.iter().enumerate() {
        match slot.link() {
            Some(link) => present.push(link),
            None => issues.push(Issue::error(format!(
                "null element at index {index} skipped"
            ))),
        }
    }
    present
}
