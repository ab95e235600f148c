//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. File size check
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing into [`SiteConfig`]
//! 4. Validation

use crate::config::validation::Validator;
use crate::error::ConfigError;

use quicklook_core::config::SiteConfig;
use std::path::{Path, PathBuf};

/// File name looked up in the site root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "quicklook.yaml";

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,

    /// Site root used for on-disk checks during validation.
    pub site_root: Option<PathBuf>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("QUICKLOOK_MAX_CONFIG_SIZE", 1024 * 1024),
            site_root: None,
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: SiteConfig,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads the configuration for a site.
    ///
    /// An explicit path must exist. Without one, `quicklook.yaml` in the
    /// site root is used when present, and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or if the chosen
    /// file fails to parse or validate.
    pub fn discover(&self, explicit: Option<&Path>, site_root: &Path) -> Result<LoadResult, ConfigError> {
        if let Some(path) = explicit {
            return self.load(path);
        }

        let candidate = site_root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return self.load(&candidate);
        }

        tracing::debug!(root = %site_root.display(), "no configuration file, using defaults");
        self.finish(SiteConfig::default(), Vec::new(), Path::new("<defaults>"))
    }

    /// Loads a configuration file and returns the validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - Environment variable expansion fails
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: e.to_string(),
        })?;

        self.load_from_str_at(&raw_content, path)
    }

    /// Loads a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails.
    pub fn load_from_str(&self, yaml: &str) -> Result<LoadResult, ConfigError> {
        self.load_from_str_at(yaml, Path::new("<string>"))
    }

    fn load_from_str_at(&self, raw: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        // Handle UTF-8 BOM
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw, path)?;

        let config = if substituted.trim().is_empty() {
            SiteConfig::default()
        } else {
            let value: serde_yaml::Value =
                serde_yaml::from_str(&substituted).map_err(|e| parse_error(path, &e))?;
            if value.is_null() {
                SiteConfig::default()
            } else {
                serde_yaml::from_value(value).map_err(|e| parse_error(path, &e))?
            }
        };

        self.finish(config, env_sub.warnings, path)
    }

    fn finish(
        &self,
        config: SiteConfig,
        mut warnings: Vec<LoadWarning>,
        path: &Path,
    ) -> Result<LoadResult, ConfigError> {
        let result = Validator::new().validate(&config, self.options.site_root.as_deref());

        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: result.errors,
            });
        }

        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(LoadResult { config, warnings })
    }
}

fn parse_error(path: &Path, err: &serde_yaml::Error) -> ConfigError {
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line: err.location().map(|l| l.line()),
        message: err.to_string(),
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = Self::parse_var_spec(&mut chars, source_path)?;
                    match std::env::var(&spec.name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => match spec.fallback {
                            Some(Fallback::Default(default_val)) => result.push_str(&default_val),
                            Some(Fallback::Required(msg)) => {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: spec.name,
                                    location: if msg.is_empty() {
                                        source_path.display().to_string()
                                    } else {
                                        msg
                                    },
                                });
                            }
                            None => self.warnings.push(LoadWarning {
                                message: format!(
                                    "Environment variable '{}' is not set, using empty string",
                                    spec.name
                                ),
                                location: Some(source_path.display().to_string()),
                            }),
                        },
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses a variable specification from `${...}`.
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<VarSpec, ConfigError> {
        let mut name = String::new();

        while let Some(c) = chars.next() {
            match c {
                '}' => return Ok(VarSpec { name, fallback: None }),
                ':' if matches!(chars.peek(), Some('-' | '?')) => {
                    let required = chars.next() == Some('?');
                    let rest = Self::read_until_close(chars, source_path, &name)?;
                    let fallback = if required {
                        Fallback::Required(rest)
                    } else {
                        Fallback::Default(rest)
                    };
                    return Ok(VarSpec {
                        name,
                        fallback: Some(fallback),
                    });
                }
                _ => name.push(c),
            }
        }

        Err(unclosed(source_path, &name))
    }

    /// Reads content until the closing `}`, handling nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
        name: &str,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                }
                _ => {}
            }
            value.push(c);
        }

        Err(unclosed(source_path, name))
    }
}

struct VarSpec {
    name: String,
    fallback: Option<Fallback>,
}

enum Fallback {
    Default(String),
    Required(String),
}

fn unclosed(path: &Path, name: &str) -> ConfigError {
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("Unclosed environment variable reference: ${{{name}"),
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
