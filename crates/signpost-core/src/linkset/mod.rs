//! Link Set (RFC 9264) JSON parsing into a flat list of web links.
//!
//! Accepts documents of media type `application/linkset+json`:
//! `{ "linkset": [ { "anchor": "...", "<relation>": [ { "href": "..." } ] } ] }`.
//! Every link target object becomes one [`WebLink`] carrying `rel=<relation>`,
//! `anchor=<context anchor>` (when present) and its remaining attributes in
//! document order.
//!
//! Only the document shape is checked here. Relation names and target
//! attributes are not interpreted; that is the validators' job.

mod error;
mod parse;

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::weblink::WebLink;

pub use error::ParsingError;

use parse::LinkSetDocument;

/// Parses a Link Set document held in memory.
pub fn parse_str(raw: &str) -> Result<Vec<WebLink>, ParsingError> {
    if raw.bytes().all(|b| is_json_whitespace(&b)) {
        return Err(ParsingError::Empty);
    }
    finish(serde_json::from_str(raw))
}

/// Parses UTF-8 encoded Link Set bytes.
pub fn parse_slice(bytes: &[u8]) -> Result<Vec<WebLink>, ParsingError> {
    if bytes.iter().all(is_json_whitespace) {
        return Err(ParsingError::Empty);
    }
    finish(serde_json::from_slice(bytes))
}

/// Parses a Link Set from a reader, which is consumed and dropped before returning.
///
/// A read failure is reported as [`ParsingError::Invalid`] without a position.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Vec<WebLink>, ParsingError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ParsingError::Invalid(serde_json::Error::io(e)))?;
    parse_slice(&bytes)
}

/// Parses the Link Set stored in a file. The file is closed on every path out.
pub fn parse_path(path: &Path) -> Result<Vec<WebLink>, ParsingError> {
    let bytes = fs::read(path).map_err(|source| ParsingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let links = parse_slice(&bytes)?;
    tracing::debug!(path = %path.display(), links = links.len(), "parsed link set file");
    Ok(links)
}

/// Whitespace as JSON defines it (RFC 8259 section 2); form feed is not.
fn is_json_whitespace(b: &u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn finish(parsed: Result<LinkSetDocument, serde_json::Error>) -> Result<Vec<WebLink>, ParsingError> {
    match parsed {
        Ok(LinkSetDocument(links)) => {
            tracing::debug!(links = links.len(), "parsed link set");
            Ok(links)
        }
        Err(e) => {
            tracing::debug!(line = e.line(), column = e.column(), "link set rejected: {}", e);
            Err(ParsingError::Invalid(e))
        }
    }
}
