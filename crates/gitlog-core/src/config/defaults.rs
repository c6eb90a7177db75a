//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gitlog.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gitlog.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".gitlog.yaml";

pub const DEFAULT_TITLE: &str = "Changelog";
pub const DEFAULT_OUTPUT_DIR: &str = "target";
pub const DEFAULT_PLAIN_TEXT_FILENAME: &str = "changelog.txt";
pub const DEFAULT_MARKDOWN_FILENAME: &str = "changelog.md";
pub const DEFAULT_HTML_FILENAME: &str = "changelog.html";
pub const DEFAULT_HTML_TABLE_FILENAME: &str = "changelogtable.html";
pub const DEFAULT_JSON_FILENAME: &str = "changelog.json";

/// Default date format (strftime)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Default cutoff, which includes all history
pub const DEFAULT_CUTOFF: &str = "1970-01-01 00:00:00 +0000";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".gitlog.toml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = Config::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TOML_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gitlog configuration

title: Changelog

output:
  directory: target
  verbose: false
  plain_text:
    enabled: true
    filename: changelog.txt
  markdown:
    enabled: false
    filename: changelog.md
  simple_html:
    enabled: true
    filename: changelog.html
  html_table:
    enabled: false
    filename: changelogtable.html
  json:
    enabled: true
    filename: changelog.json

history:
  # path: src
  include_commits_after: "1970-01-01 00:00:00 +0000"
  date_format: "%Y-%m-%d %H:%M:%S %z"
  full_message: false

filters:
  exclude_merges: true
  # module: crates/my-crate
"#;

/// Default configuration template (TOML)
pub const DEFAULT_CONFIG_TOML_TEMPLATE: &str = r#"# gitlog configuration

title = "Changelog"

[output]
directory = "target"
verbose = false

[output.plain_text]
enabled = true
filename = "changelog.txt"

[output.markdown]
enabled = false
filename = "changelog.md"

[output.simple_html]
enabled = true
filename = "changelog.html"

[output.html_table]
enabled = false
filename = "changelogtable.html"

[output.json]
enabled = true
filename = "changelog.json"

[history]
include_commits_after = "1970-01-01 00:00:00 +0000"
date_format = "%Y-%m-%d %H:%M:%S %z"
full_message = false

[filters]
exclude_merges = true
"#;
