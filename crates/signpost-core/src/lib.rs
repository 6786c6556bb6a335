//! FAIR Signposting validation over RFC 8288 web links.
//!
//! Links come either from a Link Set document ([`linkset`]) or from the
//! caller; [`processor::SignPostingProcessor`] runs the selected
//! [`validation::Validator`]s over them and returns a view plus an issue report.

pub mod config;
pub mod linkset;
pub mod logging;
pub mod processor;
pub mod report;
pub mod validation;
pub mod view;
pub mod weblink;

pub use linkset::ParsingError;
pub use processor::{SignPostingProcessor, SignPostingProcessorBuilder};
pub use report::{Issue, IssueReport, Severity};
pub use validation::{LinkSlot, Validator};
pub use view::{SignPostingResult, SignPostingView};
pub use weblink::{InvalidUri, WebLink, WebLinkParameter};
