//! CLI command handlers. Each command is in its own file.

mod links;
mod validate;

pub use links::run_links;
pub use validate::{run_validate, ValidateOptions};
