//! Link Set documents shared by the integration tests.
//!
//! The complete Level 2 set describes one landing page, its metadata record
//! and one content file, each as its own anchor context.

use std::io::Write;

use serde_json::{json, Value};
use tempfile::NamedTempFile;

pub const LANDING_PAGE: &str = "https://example.org/record/1";
pub const METADATA: &str = "https://example.org/record/1/metadata.json";
pub const CONTENT: &str = "https://example.org/record/1/files/data.csv";
pub const DOI: &str = "https://doi.org/10.5281/zenodo.1";

pub fn landing_page_context() -> Value {
    json!({
        "anchor": LANDING_PAGE,
        "cite-as": [{"href": DOI}],
        "describedby": [{"href": METADATA, "type": "application/ld+json"}],
        "item": [{"href": CONTENT, "type": "text/csv"}],
        "type": [
            {"href": "https://schema.org/Dataset"},
            {"href": "https://schema.org/AboutPage"}
        ],
        "license": [{"href": "https://spdx.org/licenses/CC-BY-4.0"}],
        "author": [{"href": "https://orcid.org/0000-0002-1825-0097"}]
    })
}

pub fn metadata_context() -> Value {
    json!({
        "anchor": METADATA,
        "describes": [{"href": LANDING_PAGE, "type": "text/html"}]
    })
}

pub fn content_context() -> Value {
    json!({
        "anchor": CONTENT,
        "collection": [{"href": LANDING_PAGE, "type": "text/html"}],
        "license": [{"href": "https://spdx.org/licenses/CC-BY-4.0"}]
    })
}

pub fn linkset(contexts: Vec<Value>) -> String {
    json!({ "linkset": contexts }).to_string()
}

/// The full Level 2 Link Set for one record.
pub fn complete_linkset() -> String {
    linkset(vec![landing_page_context(), metadata_context(), content_context()])
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}
