//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RollforgeConfig;
use crate::domain::errors::RollError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RollforgeConfig
/// 4. Applies environment variable overrides (ROLLFORGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use rollforge::config::loader::load_config;
///
/// let config = load_config("rollforge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RollforgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RollError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RollError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents, |name| std::env::var(name).ok())
}

/// Parse, override and validate configuration text
///
/// `lookup` resolves environment variables, both for `${VAR}` substitution and
/// for `ROLLFORGE_*` overrides.
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn parse_config<F>(contents: &str, lookup: F) -> Result<RollforgeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let contents = substitute_env_vars(contents, &lookup)?;

    let mut config: RollforgeConfig = toml::from_str(&contents)
        .map_err(|e| RollError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config, &lookup);

    config.validate().map_err(|e| {
        RollError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RollError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RollError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using ROLLFORGE_* prefix
///
/// Variables follow the pattern `ROLLFORGE_<SECTION>_<KEY>`, for example
/// `ROLLFORGE_OUTPUT_ROOT`. Values that do not parse are ignored and left to
/// the file's setting.
fn apply_env_overrides<F>(config: &mut RollforgeConfig, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    // Application overrides
    if let Some(val) = lookup("ROLLFORGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Distribution overrides
    if let Some(val) = lookup("ROLLFORGE_DISTRIBUTION_REGISTRANTS_PER_STATION_MAX") {
        if let Ok(max) = val.parse() {
            config.distribution.registrants_per_station_max = max;
        }
    }
    if let Some(val) = lookup("ROLLFORGE_DISTRIBUTION_UNISEX_TRIGGER") {
        if let Ok(trigger) = val.parse() {
            config.distribution.unisex_trigger = trigger;
        }
    }

    // Registry overrides
    if let Some(val) = lookup("ROLLFORGE_REGISTRY_SNAPSHOT_PATH") {
        config.registry.snapshot_path = val;
    }
    if let Some(val) = lookup("ROLLFORGE_REGISTRY_STATION_STORE_PATH") {
        config.registry.station_store_path = val;
    }

    // Output overrides
    if let Some(val) = lookup("ROLLFORGE_OUTPUT_ROOT") {
        config.output.root = val;
    }

    // Logging overrides
    if let Some(val) = lookup("ROLLFORGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = lookup("ROLLFORGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
