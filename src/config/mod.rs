//! Settings-file helper: a flat `key = value` file with typed option
//! declarations.
//!
//! Plugins declare the options they understand as [`OptionSpec`]s (name,
//! default, optionally a list of allowed values) and resolve them against the
//! user-editable settings file. If that file does not exist yet it is created
//! from a shipped default template. Values outside an option's allowed list
//! fall back to the default rather than erroring, so a hand-edited typo never
//! breaks plugin startup.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::{AppError, AppResult};

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a raw settings value: booleans and integers are recognized,
    /// everything else stays a string.
    fn parse(raw: &str) -> OptionValue {
        if raw.eq_ignore_ascii_case("true") {
            OptionValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            OptionValue::Bool(false)
        } else if let Ok(n) = raw.parse::<i64>() {
            OptionValue::Int(n)
        } else {
            OptionValue::Str(raw.to_string())
        }
    }

    /// Case-insensitive equivalence, so `TRUE` in a hand-edited file matches
    /// an allowed value of `true`.
    fn matches(&self, other: &OptionValue) -> bool {
        match (self, other) {
            (OptionValue::Str(a), OptionValue::Str(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Declaration of a single settings option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    name: String,
    default: OptionValue,
    /// `None` means free-form: any value is accepted as-is.
    allowed: Option<Vec<OptionValue>>,
}

impl OptionSpec {
    /// A boolean toggle defaulting to `false`.
    pub fn toggle(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: OptionValue::Bool(false),
            allowed: Some(vec![OptionValue::Bool(true), OptionValue::Bool(false)]),
        }
    }

    /// A free-form string option; any value in the file is accepted.
    pub fn string(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            default: OptionValue::Str(default.to_string()),
            allowed: None,
        }
    }

    /// An option restricted to `allowed` values. The default must itself be
    /// an allowed value.
    pub fn new(name: &str, default: OptionValue, allowed: Vec<OptionValue>) -> AppResult<Self> {
        if !allowed.iter().any(|a| a.matches(&default)) {
            log::debug!("option '{name}': default {default} not in allowed values {allowed:?}");
            return Err(AppError::InvalidOption(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            default,
            allowed: Some(allowed),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolved option values for one settings file.
#[derive(Debug)]
pub struct ConfigOptions {
    values: HashMap<String, OptionValue>,
}

impl ConfigOptions {
    /// Resolve `specs` against the settings file at `config_path`.
    ///
    /// If the settings file is missing it is first created from the template
    /// at `default_path` (documentation lines starting with `##` are
    /// stripped). A missing template is a `Config` error: the plugin package
    /// is broken, not the user's install.
    pub fn load(
        config_path: impl AsRef<Path>,
        default_path: impl AsRef<Path>,
        specs: &[OptionSpec],
    ) -> AppResult<Self> {
        let config_path = config_path.as_ref();

        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "settings file {} not found, creating it from the default template",
                    config_path.display()
                );
                copy_default_template(default_path.as_ref(), config_path)?;
                fs::read_to_string(config_path)
                    .map_err(|e| AppError::Config(format!("{}: {e}", config_path.display())))?
            }
            Err(e) => {
                return Err(AppError::Config(format!("{}: {e}", config_path.display())));
            }
        };

        Ok(Self {
            values: resolve(&content, specs),
        })
    }

    /// The resolved value for `name`, if it was declared.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }
}

/// Match the file's `key = value` lines against the declared specs.
/// Every declared option resolves to something: the file's value when
/// accepted, the declared default otherwise.
fn resolve(content: &str, specs: &[OptionSpec]) -> HashMap<String, OptionValue> {
    let mut values: HashMap<String, OptionValue> = specs
        .iter()
        .map(|s| (s.name.clone(), s.default.clone()))
        .collect();
    let by_name: HashMap<&str, &OptionSpec> =
        specs.iter().map(|s| (s.name.as_str(), s)).collect();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, raw)) = line.split_once('=') else {
            log::debug!("skipping malformed settings line: {line}");
            continue;
        };
        let key = key.trim();
        let raw = raw.trim();

        let Some(spec) = by_name.get(key) else {
            log::debug!("ignoring unknown settings key '{key}'");
            continue;
        };
        if raw.is_empty() {
            // Blank value means "use the default".
            continue;
        }

        let parsed = OptionValue::parse(raw);
        match &spec.allowed {
            None => {
                values.insert(key.to_string(), parsed);
            }
            Some(allowed) => match allowed.iter().find(|a| a.matches(&parsed)) {
                Some(value) => {
                    log::debug!("option '{key}' set to {value}");
                    values.insert(key.to_string(), value.clone());
                }
                None => {
                    log::debug!(
                        "value '{raw}' is not allowed for '{key}', keeping default {}",
                        spec.default
                    );
                }
            },
        }
    }

    values
}

/// Create the user settings file from the shipped template, skipping `##`
/// documentation lines and any blank lines before the first real content.
fn copy_default_template(default_path: &Path, config_path: &Path) -> AppResult<()> {
    let template = fs::read_to_string(default_path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::Config(format!(
                "default settings template {} not found",
                default_path.display()
            ))
        } else {
            AppError::Config(format!("{}: {e}", default_path.display()))
        }
    })?;

    let mut out = String::new();
    let mut seen_content = false;
    for line in template.lines() {
        if line.starts_with("##") {
            continue;
        }
        if !seen_content && line.trim().is_empty() {
            continue;
        }
        seen_content = true;
        out.push_str(line);
        out.push('\n');
    }

    fs::write(config_path, out)
        .map_err(|e| AppError::Config(format!("{}: {e}", config_path.display())))?;
    Ok(())
}
