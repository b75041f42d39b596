//! `egonet init` command - Write a default `egonet.toml`.

use std::fs;
use std::path::Path;

use colored::Colorize;
use egonet_graph::DecomposeConfig;

use crate::config::CONFIG_FILE;
use crate::error::{CliError, CliResult};

/// Execute the `init` command.
pub fn execute(force: bool) -> CliResult<()> {
    let current_dir = std::env::current_dir()?;
    write_config(&current_dir, force)?;

    println!("  {} Created {}", "✓".bright_green(), CONFIG_FILE);
    Ok(())
}

fn write_config(dir: &Path, force: bool) -> CliResult<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            CONFIG_FILE
        )));
    }

    fs::write(config_path, default_config_text())?;
    Ok(())
}

fn default_config_text() -> String {
    let defaults = DecomposeConfig::default();
    format!(
        r#"# egonet configuration

[decompose]
# BFS radius around each seed (0 = seed only)
depth = {}
# Stop after this many components
max_components = {}
# Output file name prefix; files are named <prefix>NNNN.egr
prefix = "{}"

[output]
# Directory components are written to
dir = "."
"#,
        defaults.depth, defaults.max_components, defaults.prefix
    )
}
