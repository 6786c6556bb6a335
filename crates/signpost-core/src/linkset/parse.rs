//! Single-pass RFC 9264 JSON visitors.
//!
//! The document is walked with serde visitors straight off the token stream;
//! no generic JSON tree is built. Errors raised here are positioned by
//! `serde_json` at the token where the visitor gave up.

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use crate::weblink::{check_uri_reference, WebLink, WebLinkParameter};

const LINKSET: &str = "linkset";
const ANCHOR: &str = "anchor";
const HREF: &str = "href";

/// Whole document: `{ "linkset": [ <context>, ... ] }`.
pub(super) struct LinkSetDocument(pub(super) Vec<WebLink>);

impl<'de> Deserialize<'de> for LinkSetDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = LinkSetDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a link set object with a single 'linkset' member")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        match map.next_key::<String>()? {
            Some(name) if name == LINKSET => {}
            Some(name) => {
                return Err(de::Error::custom(format!(
                    "expected 'linkset' member, found '{name}'"
                )))
            }
            None => return Err(de::Error::missing_field(LINKSET)),
        }
        let ContextList(links) = map.next_value()?;
        if let Some(name) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "unexpected member '{name}' after 'linkset'"
            )));
        }
        Ok(LinkSetDocument(links))
    }
}

/// The `linkset` array; links of all contexts flattened in document order.
struct ContextList(Vec<WebLink>);

impl<'de> Deserialize<'de> for ContextList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ContextListVisitor)
    }
}

struct ContextListVisitor;

impl<'de> Visitor<'de> for ContextListVisitor {
    type Value = ContextList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of link context objects")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut links = Vec::new();
        while let Some(LinkContext(context_links)) = seq.next_element()? {
            links.extend(context_links);
        }
        Ok(ContextList(links))
    }
}

/// One link context object: optional `anchor` plus relation-type members.
struct LinkContext(Vec<WebLink>);

impl<'de> Deserialize<'de> for LinkContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LinkContextVisitor)
    }
}

struct LinkContextVisitor;

impl<'de> Visitor<'de> for LinkContextVisitor {
    type Value = LinkContext;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a link context object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut anchor: Option<String> = None;
        let mut targets: Vec<LinkTargetObject> = Vec::new();

        while let Some(name) = map.next_key::<String>()? {
            if name == ANCHOR {
                if anchor.is_some() {
                    return Err(de::Error::duplicate_field(ANCHOR));
                }
                anchor = Some(map.next_value()?);
            } else {
                let found = map.next_value_seed(TargetListSeed {
                    relation_type: &name,
                })?;
                targets.extend(found);
            }
        }

        // The anchor may follow the relation members, so links are built last.
        if let Some(anchor) = &anchor {
            check_uri_reference(anchor).map_err(|e| {
                <A::Error as de::Error>::custom(format!(
                    "'anchor' value '{anchor}' is not a valid URI: {e}"
                ))
            })?;
        }

        let links = targets
            .into_iter()
            .map(|target| target.into_web_link(anchor.as_deref()))
            .collect();
        Ok(LinkContext(links))
    }
}

/// A parsed link target waiting for its context's anchor.
struct LinkTargetObject {
    relation_type: String,
    href: String,
    attributes: Vec<WebLinkParameter>,
}

impl LinkTargetObject {
    fn into_web_link(self, anchor: Option<&str>) -> WebLink {
        let mut params = Vec::with_capacity(self.attributes.len() + 2);
        params.push(WebLinkParameter::new("rel", self.relation_type));
        if let Some(anchor) = anchor {
            params.push(WebLinkParameter::new(ANCHOR, anchor));
        }
        params.extend(self.attributes);
        WebLink::new(self.href, params)
    }
}

/// Value of a relation-type member: an array of link target objects.
struct TargetListSeed<'a> {
    relation_type: &'a str,
}

impl<'de, 'a> DeserializeSeed<'de> for TargetListSeed<'a> {
    type Value = Vec<LinkTargetObject>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'a> Visitor<'de> for TargetListSeed<'a> {
    type Value = Vec<LinkTargetObject>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "an array of link target objects for relation type '{}'",
            self.relation_type
        )
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut targets = Vec::new();
        while let Some(LinkTarget { href, attributes }) = seq.next_element()? {
            targets.push(LinkTargetObject {
                relation_type: self.relation_type.to_string(),
                href,
                attributes,
            });
        }
        Ok(targets)
    }
}

/// `{ "href": "...", <attribute>: <value>, ... }`
struct LinkTarget {
    href: String,
    attributes: Vec<WebLinkParameter>,
}

impl<'de> Deserialize<'de> for LinkTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LinkTargetVisitor)
    }
}

struct LinkTargetVisitor;

impl<'de> Visitor<'de> for LinkTargetVisitor {
    type Value = LinkTarget;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a link target object with an 'href' member")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut href: Option<String> = None;
        let mut attributes = Vec::new();

        while let Some(name) = map.next_key::<String>()? {
            if name == HREF {
                if href.is_some() {
                    return Err(de::Error::duplicate_field(HREF));
                }
                href = Some(map.next_value()?);
            } else {
                let AttributeValues(values) = map.next_value()?;
                attributes.extend(values.into_iter().map(|value| WebLinkParameter {
                    name: name.clone(),
                    value,
                }));
            }
        }

        let href = href.ok_or_else(|| <A::Error as de::Error>::missing_field(HREF))?;
        check_uri_reference(&href).map_err(|e| {
            <A::Error as de::Error>::custom(format!("'href' value '{href}' is not a valid URI: {e}"))
        })?;
        Ok(LinkTarget { href, attributes })
    }
}

/// A target attribute value, kept verbatim as one or more parameter values.
///
/// Scalars give one value (`null` gives a value-less parameter); arrays give
/// one value per element.
struct AttributeValues(Vec<Option<String>>);

impl<'de> Deserialize<'de> for AttributeValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributeValuesVisitor)
    }
}

struct AttributeValuesVisitor;

impl<'de> Visitor<'de> for AttributeValuesVisitor {
    type Value = AttributeValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar target attribute or an array of attribute values")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![Some(v.to_string())]))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![Some(v.to_string())]))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![Some(v.to_string())]))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![Some(v.to_string())]))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![Some(v.to_string())]))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValues(vec![None]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::new();
        while let Some(AttributeElement(value)) = seq.next_element()? {
            values.push(Some(value));
        }
        Ok(AttributeValues(values))
    }
}

/// Array element of a target attribute: a scalar, or an internationalised
/// `{ "value": ..., "language": ... }` object of which `value` is kept.
struct AttributeElement(String);

impl<'de> Deserialize<'de> for AttributeElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributeElementVisitor)
    }
}

struct AttributeElementVisitor;

impl<'de> Visitor<'de> for AttributeElementVisitor {
    type Value = AttributeElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an object with a 'value' member")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeElement(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AttributeElement(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeElement(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AttributeElement(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeElement(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut value: Option<String> = None;
        while let Some(name) = map.next_key::<String>()? {
            if name == "value" {
                value = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        value
            .map(AttributeElement)
            .ok_or_else(|| de::Error::missing_field("value"))
    }
}
