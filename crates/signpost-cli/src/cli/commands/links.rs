//! `signpost links` – print the links of a Link Set document.

use anyhow::{Context, Result};
use signpost_core::linkset;
use signpost_core::SignPostingView;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn run_links(path: &Path, format: OutputFormat) -> Result<()> {
    let links = linkset::parse_path(path)
        .with_context(|| format!("failed to parse link set {}", path.display()))?;
    let view = SignPostingView::new(links);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_links(&mut out, &view, format)
}

fn write_links<W: Write>(out: &mut W, view: &SignPostingView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "links": view.web_links(),
                "cite_as": view.cite_as(),
                "described_by": view.described_by(),
                "linksets": view.linksets(),
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for link in view.web_links() {
                writeln!(out, "{link}")?;
            }
            writeln!(out)?;
            for (label, targets) in [
                ("cite-as", view.cite_as()),
                ("describedby", view.described_by()),
                ("linkset", view.linksets()),
            ] {
                if targets.is_empty() {
                    writeln!(out, "{label}: -")?;
                }
                for target in targets {
                    writeln!(out, "{label}: {target}")?;
                }
            }
        }
    }
    Ok(())
}
