//! Runs a configured set of validators over one link list.

use crate::report::IssueReport;
use crate::validation::{LinkSlot, Validator};
use crate::view::{SignPostingResult, SignPostingView};

/// Validators applied by [`SignPostingProcessor::process`] when none were configured.
pub const DEFAULT_VALIDATORS: [Validator; 1] = [Validator::Level1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPostingProcessor {
    validators: Vec<Validator>,
}

impl Default for SignPostingProcessor {
    fn default() -> Self {
        Self {
            validators: DEFAULT_VALIDATORS.to_vec(),
        }
    }
}

impl SignPostingProcessor {
    pub fn builder() -> SignPostingProcessorBuilder {
        SignPostingProcessorBuilder::default()
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Runs every validator, in configured order, on the same input.
    ///
    /// Issues are concatenated in validator order; the view holds the present
    /// links of `links`.
    pub fn process<L: LinkSlot>(&self, links: &[L]) -> SignPostingResult {
        let mut report = IssueReport::default();
        for validator in &self.validators {
            let result = validator.validate(links);
            tracing::debug!(
                %validator,
                issues = result.report.len(),
                errors = result.report.has_errors(),
                "validator finished"
            );
            report = report.merge(result.report);
        }
        SignPostingResult::new(SignPostingView::from_slots(links), report)
    }
}

/// Accumulates validators across calls; `build` copies them out.
#[derive(Debug, Clone, Default)]
pub struct SignPostingProcessorBuilder {
    validators: Vec<Validator>,
}

impl SignPostingProcessorBuilder {
    pub fn with_validator(&mut self, validator: Validator) -> &mut Self {
        self.validators.push(validator);
        self
    }

    pub fn with_validators<I>(&mut self, validators: I) -> &mut Self
    where
        I: IntoIterator<Item = Validator>,
    {
        self.validators.extend(validators);
        self
    }

    pub fn build(&self) -> SignPostingProcessor {
        if self.validators.is_empty() {
            return SignPostingProcessor::default();
        }
        SignPostingProcessor {
            validators: self.validators.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weblink::{WebLink, WebLinkParameter};

    fn link(target: &str, rel: &str, anchor: Option<&str>) -> WebLink {
        let mut params = vec![WebLinkParameter::new("rel", rel)];
        if let Some(a) = anchor {
            params.push(WebLinkParameter::new("anchor", a));
        }
        WebLink::parse(target, params).unwrap()
    }

    #[test]
    fn defaults_to_level1() {
        let processor = SignPostingProcessor::builder().build();
        assert_eq!(processor.validators(), &[Validator::Level1]);
        assert_eq!(processor, SignPostingProcessor::default());
    }

    #[test]
    fn builder_accumulates_across_calls() {
        let mut builder = SignPostingProcessor::builder();
        builder.with_validator(Validator::Level1);
        builder.with_validators([Validator::Level2Discovery, Validator::Level2Recipe]);
        builder.with_validator(Validator::Level1);
        assert_eq!(
            builder.build().validators(),
            &[
                Validator::Level1,
                Validator::Level2Discovery,
                Validator::Level2Recipe,
                Validator::Level1,
            ]
        );
    }

    #[test]
    fn built_processor_is_unaffected_by_later_builder_calls() {
        let mut builder = SignPostingProcessor::builder();
        builder.with_validator(Validator::Level2Discovery);
        let processor = builder.build();
        builder.with_validator(Validator::Level1);
        assert_eq!(processor.validators(), &[Validator::Level2Discovery]);
    }

    #[test]
    fn issues_follow_validator_order() {
        let links = vec![link("https://example.org/x", "author", None)];
        let mut builder = SignPostingProcessor::builder();
        builder.with_validators([Validator::Level2Discovery, Validator::Level1]);
        let result = builder.build().process(&links);
        let msgs: Vec<&str> = result
            .report
            .issues()
            .iter()
            .map(|i| i.message.as_str())
            .collect();
        assert_eq!(
            msgs,
            vec![
                "no resource with rel=linkset found",
                "missing relation type 'cite-as'",
                "missing relation type 'describedby'",
            ]
        );
    }

    #[test]
    fn every_validator_sees_the_original_input() {
        let slots = vec![None, Some(link("https://example.org/x", "author", None))];
        let mut builder = SignPostingProcessor::builder();
        builder.with_validators([Validator::Level1, Validator::Level2Discovery]);
        let result = builder.build().process(&slots);
        let null_errors = result
            .report
            .errors()
            .filter(|i| i.message.contains("null element at index 0"))
            .count();
        assert_eq!(null_errors, 2);
        assert_eq!(result.view.len(), 1);
    }

    #[test]
    fn processing_is_idempotent() {
        let links = vec![
            link("https://doi.org/10.1/x", "cite-as", Some("https://example.org/a")),
            link("https://example.org/f", "item", Some("https://example.org/b")),
        ];
        let processor = {
            let mut b = SignPostingProcessor::builder();
            b.with_validators(Validator::ALL);
            b.build()
        };
        assert_eq!(processor.process(&links), processor.process(&links));
    }

    #[test]
    fn view_is_a_copy_of_the_input() {
        let mut links = vec![link("https://doi.org/10.1/x", "cite-as", None)];
        let result = SignPostingProcessor::default().process(&links);
        links.clear();
        links.push(link("https://example.org/other", "item", None));
        assert_eq!(result.view.len(), 1);
        assert_eq!(
            result.view.web_links()[0].target(),
            "https://doi.org/10.1/x"
        );
    }
}
