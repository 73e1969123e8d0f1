//! CLI command handlers, one file per command.

mod analyze;
mod completions;
mod interactive;
mod resolve;

pub use analyze::run_analyze;
pub use completions::{run_completions, run_manpage};
pub use interactive::run_interactive;
pub use resolve::run_resolve;
