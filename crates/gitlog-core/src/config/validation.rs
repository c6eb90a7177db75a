//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_title(config)?;
    validate_output(config)?;
    validate_history(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_title(config: &Config) -> Result<()> {
    if config.title.trim().is_empty() {
        return Err(invalid("title", "title cannot be empty"));
    }
    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    for (key, format) in config.output.formats() {
        if !format.enabled {
            continue;
        }

        if format.filename.trim().is_empty() {
            return Err(invalid(
                &format!("output.{key}.filename"),
                "filename cannot be empty for an enabled format",
            ));
        }

        if format.filename.contains(['/', '\\']) {
            return Err(invalid(
                &format!("output.{key}.filename"),
                "filename must not contain path separators; use output.directory",
            ));
        }
    }

    Ok(())
}

fn validate_history(config: &Config) -> Result<()> {
    if config.history.date_format.is_empty() {
        return Err(invalid("history.date_format", "date format cannot be empty"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::GitlogError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
