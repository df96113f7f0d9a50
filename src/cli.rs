//! CLI domain: parse, route, output, and presentation only.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_plan_json, format_plan_text, format_tree_json, format_tree_text};
pub use route::{load_config, RunContext};
