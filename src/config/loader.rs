//! Configuration loading and merging

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::ProcessingOptions;
use crate::error::{PlumeError, PlumeResult};

use super::types::{EffectiveConfig, ExplicitArgs, CONFIG_FILE_NAME, DEFAULT_OUTPUT};

const IN_KEY: &str = "in";
const OUT_KEY: &str = "out";

/// Deep-merge `overrides` onto `base`.
///
/// Objects merge key by key, recursively. Any other value in `overrides`
/// (arrays included) replaces the one in `base`.
pub fn merge_config(base: Value, overrides: Value) -> Value {
    match (base, overrides) {
        (Value::Object(mut base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let merged = match base.remove(&key) {
                    Some(existing) => merge_config(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, overrides) => overrides,
    }
}

/// Read `.plumerc` from `root`.
///
/// Returns an empty map when the file is missing, unreadable, not JSON, or
/// not a JSON object.
pub fn load_overrides<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Map<String, Value> {
    let path = root.join(CONFIG_FILE_NAME);
    if !fs.exists(&path) {
        return Map::new();
    }

    let content = match fs.read(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "config file unreadable, ignoring");
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => {
            tracing::debug!(path = %path.display(), keys = map.len(), "loaded config file");
            map
        }
        Ok(_) => {
            tracing::debug!(path = %path.display(), "config file is not an object, ignoring");
            Map::new()
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "malformed config file, ignoring");
            Map::new()
        }
    }
}

/// Normalize an `in` value (string or list of strings) to patterns.
fn input_patterns(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn sourcemap_path<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    map.get(crate::domain::value_objects::SOURCEMAPS_KEY)?
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
}

/// Inputs in precedence order: file `in`, file `sourcemaps.from`, explicit.
fn effective_inputs(overrides: &Map<String, Value>, explicit: &ExplicitArgs) -> Vec<String> {
    let from_file = input_patterns(overrides.get(IN_KEY));
    if !from_file.is_empty() {
        return from_file;
    }
    if let Some(from) = sourcemap_path(overrides, "from") {
        return vec![from.to_string()];
    }
    explicit
        .inputs
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

/// Output in precedence order: file `out`, file `sourcemaps.to`, explicit,
/// then the default.
fn effective_output(overrides: &Map<String, Value>, explicit: &ExplicitArgs) -> PathBuf {
    overrides
        .get(OUT_KEY)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| sourcemap_path(overrides, "to"))
        .map(PathBuf::from)
        .or_else(|| explicit.output.clone().filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

/// Builds the effective configuration for one invocation
pub struct ConfigResolver<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> ConfigResolver<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    /// Overlay `.plumerc` on the explicit arguments.
    ///
    /// The file wins on every key. For inputs and output that includes its
    /// `sourcemaps.from` / `sourcemaps.to`, which take precedence over the
    /// command line.
    pub fn resolve(&self, explicit: &ExplicitArgs) -> PlumeResult<EffectiveConfig> {
        let overrides = load_overrides(self.fs, self.root);

        let inputs = effective_inputs(&overrides, explicit);
        if inputs.is_empty() {
            return Err(PlumeError::MissingInput);
        }
        let output = effective_output(&overrides, explicit);

        let mut merged = match merge_config(explicit_base(explicit), Value::Object(overrides)) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.remove(IN_KEY);
        merged.remove(OUT_KEY);

        let mut options = ProcessingOptions::new(merged);
        options.set_sourcemap_to(&output);

        tracing::debug!(
            inputs = ?inputs,
            output = %output.display(),
            sourcemaps = options.sourcemap().is_some(),
            "effective config"
        );

        Ok(EffectiveConfig {
            inputs,
            output,
            options,
        })
    }
}

fn explicit_base(explicit: &ExplicitArgs) -> Value {
    let mut base = Map::new();
    if !explicit.inputs.is_empty() {
        base.insert(
            IN_KEY.to_string(),
            Value::Array(explicit.inputs.iter().cloned().map(Value::String).collect()),
        );
    }
    if let Some(output) = &explicit.output {
        base.insert(
            OUT_KEY.to_string(),
            Value::String(output.to_string_lossy().into_owned()),
        );
    }
    Value::Object(base)
}
