//! Typed web links (RFC 8288): a target URI plus an ordered parameter list.
//!
//! Parameter order is kept so a link renders back the way it was read; it has
//! no meaning for validation. Names may repeat (e.g. several `rel`).

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Base used only to check relative references; never stored.
const REFERENCE_BASE: &str = "http://reference.invalid/";

/// Why a string is not a URI reference (RFC 3986 section 4.1).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUri {
    #[error("character {0:?} is not allowed in a URI")]
    Character(char),
    #[error("'%' is not followed by two hex digits")]
    PercentEncoding,
    #[error("first segment of a relative reference contains ':'")]
    ColonInFirstSegment,
    #[error(transparent)]
    Syntax(#[from] url::ParseError),
}

/// Scheme of an absolute URI reference, as written.
pub fn scheme(raw: &str) -> Option<&str> {
    let (head, _) = raw.split_once(':')?;
    let mut chars = head.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (starts_alpha && rest_ok).then_some(head)
}

/// Checks that `raw` is a syntactically valid URI reference, absolute or relative.
///
/// Nothing is normalised; callers keep `raw` as written.
pub fn check_uri_reference(raw: &str) -> Result<(), InvalidUri> {
    let bytes = raw.as_bytes();
    for (i, c) in raw.char_indices() {
        if !c.is_ascii_graphic() || matches!(c, '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}') {
            return Err(InvalidUri::Character(c));
        }
        if c == '%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
        {
            return Err(InvalidUri::PercentEncoding);
        }
    }

    if scheme(raw).is_some() {
        Url::parse(raw)?;
        return Ok(());
    }
    let first_segment = raw.split(['/', '?', '#']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return Err(InvalidUri::ColonInFirstSegment);
    }
    let base = Url::parse(REFERENCE_BASE)?;
    Url::options().base_url(Some(&base)).parse(raw)?;
    Ok(())
}

/// A single link parameter. `value` is `None` for a bare flag parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebLinkParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl WebLinkParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Parameter without a value.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An immutable typed link. The target is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebLink {
    target: String,
    params: Vec<WebLinkParameter>,
}

impl WebLink {
    /// `target` must already have passed [`check_uri_reference`].
    pub(crate) fn new(target: String, params: Vec<WebLinkParameter>) -> Self {
        Self { target, params }
    }

    /// Checks `target` as a URI reference and builds the link.
    pub fn parse(target: &str, params: Vec<WebLinkParameter>) -> Result<Self, InvalidUri> {
        check_uri_reference(target)?;
        Ok(Self::new(target.to_string(), params))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Scheme of the target, `None` for a relative reference.
    pub fn scheme(&self) -> Option<&str> {
        scheme(&self.target)
    }

    pub fn params(&self) -> &[WebLinkParameter] {
        &self.params
    }

    /// Relation tokens of all `rel` parameters, split on whitespace.
    ///
    /// Each distinct token (compared ASCII case-insensitively) appears once,
    /// in first-occurrence order.
    pub fn rel(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = Vec::new();
        for token in self
            .params
            .iter()
            .filter(|p| p.is_named("rel"))
            .filter_map(|p| p.value.as_deref())
            .flat_map(str::split_whitespace)
        {
            if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
                tokens.push(token);
            }
        }
        tokens
    }

    /// True if any relation token equals `relation` (ASCII case-insensitive).
    pub fn has_rel(&self, relation: &str) -> bool {
        self.rel().iter().any(|r| r.eq_ignore_ascii_case(relation))
    }

    /// Media type hint: value of the first `type` parameter.
    pub fn link_type(&self) -> Option<&str> {
        self.first_value("type")
    }

    /// Link context: value of the first `anchor` parameter.
    pub fn anchor(&self) -> Option<&str> {
        self.first_value("anchor")
    }

    fn first_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.is_named(name))
            .and_then(|p| p.value.as_deref())
    }
}

/// Renders the link in `Link` header form: `<target>; name="value"; flag`.
impl fmt::Display for WebLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.target)?;
        for param in &self.params {
            match &param.value {
                Some(value) => {
                    write!(f, "; {}=\"", param.name)?;
                    for c in value.chars() {
                        if c == '"' || c == '\\' {
                            write!(f, "\\")?;
                        }
                        write!(f, "{c}")?;
                    }
                    write!(f, "\"")?;
                }
                None => write!(f, "; {}", param.name)?,
            }
        }
        Ok(())
    }
}
