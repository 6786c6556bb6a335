//! `signpost validate` – run validators over a Link Set document.

use anyhow::{Context, Result};
use signpost_core::linkset;
use signpost_core::validation::anchor::contexts;
use signpost_core::{IssueReport, SignPostingProcessor, Validator, WebLink};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::OutputFormat;

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub validators: Vec<Validator>,
    pub deny_warnings: bool,
    pub per_anchor: bool,
    pub format: OutputFormat,
}

/// Report of one validated link group; `anchor` is set in per-anchor mode.
struct Section {
    anchor: Option<String>,
    report: IssueReport,
}

/// Returns whether the document passed.
pub fn run_validate(path: &Path, opts: &ValidateOptions) -> Result<bool> {
    let links = linkset::parse_path(path)
        .with_context(|| format!("failed to parse link set {}", path.display()))?;
    let sections = validate_links(&links, opts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_sections(&mut out, &sections, opts)?;

    let passed = passed(&sections, opts.deny_warnings);
    tracing::info!(path = %path.display(), passed, "validated link set");
    Ok(passed)
}

fn validate_links(links: &[WebLink], opts: &ValidateOptions) -> Vec<Section> {
    let processor = SignPostingProcessor::builder()
        .with_validators(opts.validators.iter().copied())
        .build();

    let groups = if opts.per_anchor { contexts(links) } else { Vec::new() };
    if groups.is_empty() {
        return vec![Section {
            anchor: None,
            report: processor.process(links).report,
        }];
    }
    groups
        .into_iter()
        .map(|group| Section {
            report: processor.process(&group.links).report,
            anchor: group.anchor,
        })
        .collect()
}

fn passed(sections: &[Section], deny_warnings: bool) -> bool {
    sections
        .iter()
        .all(|s| !s.report.has_errors() && !(deny_warnings && s.report.has_warnings()))
}

fn write_sections<W: Write>(out: &mut W, sections: &[Section], opts: &ValidateOptions) -> Result<()> {
    match opts.format {
        OutputFormat::Json => {
            let value = if opts.per_anchor {
                serde_json::Value::Array(
                    sections
                        .iter()
                        .map(|s| serde_json::json!({ "anchor": s.anchor, "report": s.report }))
                        .collect(),
                )
            } else {
                let merged = sections
                    .iter()
                    .fold(IssueReport::default(), |acc, s| acc.merge(s.report.clone()));
                serde_json::to_value(&merged)?
            };
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let (mut errors, mut warnings) = (0, 0);
            for section in sections {
                if opts.per_anchor {
                    match &section.anchor {
                        Some(anchor) => writeln!(out, "anchor {anchor}:")?,
                        None => writeln!(out, "links without anchor:")?,
                    }
                }
                for issue in section.report.issues() {
                    writeln!(out, "{issue}")?;
                }
                errors += section.report.errors().count();
                warnings += section.report.warnings().count();
            }
            writeln!(out, "{errors} error(s), {warnings} warning(s)")?;
        }
    }
    Ok(())
}
