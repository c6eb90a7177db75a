//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use gitlog_core::config::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML_TEMPLATE, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Write a default gitlog configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path; a `.toml` extension writes TOML
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = match &self.output {
            Some(path) => cwd.join(path),
            None => cwd.join(DEFAULT_CONFIG_YAML),
        };

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, template_for(&config_path))?;

        if !cli.quiet {
            output::success(&format!("Created configuration at {}", output::path(&config_path)));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to choose output formats and filters", config_path.display());
            println!("  2. Run {} to write the changelog", style("gitlog generate").cyan());
        }

        Ok(())
    }
}

fn template_for(path: &Path) -> &'static str {
    if path.extension().is_some_and(|e| e == "toml") {
        DEFAULT_CONFIG_TOML_TEMPLATE
    } else {
        DEFAULT_CONFIG_TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use gitlog_core::config::load_config;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["gitlog", "--quiet", "init"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).execute()
    }

    #[test]
    fn test_template_by_extension() {
        assert_eq!(template_for(Path::new("gitlog.toml")), DEFAULT_CONFIG_TOML_TEMPLATE);
        assert_eq!(template_for(Path::new("gitlog.yaml")), DEFAULT_CONFIG_TEMPLATE);
        assert_eq!(template_for(Path::new("gitlog")), DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gitlog.toml");

        run(&["--output", path.to_str().unwrap()]).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.title, "Changelog");
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gitlog.yaml");
        std::fs::write(&path, "title: Mine\n").unwrap();

        assert!(run(&["--output", path.to_str().unwrap()]).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "title: Mine\n");

        run(&["--force", "--output", path.to_str().unwrap()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }
}
