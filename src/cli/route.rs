//! CLI route: run context and command dispatch.

use crate::api::ChangeFinder;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_plan_json, format_plan_text, format_tree_json, format_tree_text,
};
use crate::config::{ConfigLoader, RsyncxConfig};
use crate::error::ApiError;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Load configuration from an explicit file, or from the global file and
/// environment when no file is given.
pub fn load_config(config_path: Option<&Path>) -> Result<RsyncxConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    Ok(config)
}

/// Runtime context for CLI execution: resolved configuration and the change finder.
pub struct RunContext {
    config: RsyncxConfig,
    finder: ChangeFinder,
    color: bool,
}

impl RunContext {
    /// Build a context from an already loaded configuration.
    pub fn from_config(
        mut config: RsyncxConfig,
        extra_ignores: &[String],
    ) -> Result<Self, ApiError> {
        config
            .scan
            .ignore_patterns
            .extend(extra_ignores.iter().cloned());

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let finder = ChangeFinder::new(config.scan.clone());
        let color = config.logging.color && std::io::stdout().is_terminal();
        Ok(Self {
            config,
            finder,
            color,
        })
    }

    pub fn config(&self) -> &RsyncxConfig {
        &self.config
    }

    /// Disable or enable ANSI styling of command output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Execute a command and return the text to print on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let start = Instant::now();
        let result = match command {
            Commands::Plan {
                source,
                destination,
                format,
            } => self.handle_plan(source, destination, self.resolve_format(*format)),
            Commands::Scan { root, format } => self.handle_scan(root, self.resolve_format(*format)),
        };
        info!(
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }

    fn resolve_format(&self, format: Option<OutputFormat>) -> OutputFormat {
        format.unwrap_or_else(|| OutputFormat::from_config(&self.config.output.format))
    }

    fn handle_plan(
        &self,
        source: &Path,
        destination: &Path,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let plan = self.finder.find_changes(source, destination)?;
        match format {
            OutputFormat::Text => Ok(format_plan_text(source, destination, &plan, self.color)),
            OutputFormat::Json => format_plan_json(source, destination, &plan),
        }
    }

    fn handle_scan(&self, root: &Path, format: OutputFormat) -> Result<String, ApiError> {
        let tree = self.finder.build_tree(root)?;
        match format {
            OutputFormat::Text => Ok(format_tree_text(&tree, self.color)),
            OutputFormat::Json => format_tree_json(&tree),
        }
    }
}
