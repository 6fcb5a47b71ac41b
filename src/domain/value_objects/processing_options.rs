//! Engine options carried through a compile
//!
//! The map is opaque to the core: every key the user configures reaches the
//! engine untouched. Only the `sourcemaps` block is interpreted here because
//! the compile step decides from it how many files to write.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Key of the source-map block inside the options map.
pub const SOURCEMAPS_KEY: &str = "sourcemaps";

/// Typed view of the `sourcemaps` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapSettings {
    /// File currently being parsed
    pub from: Option<PathBuf>,
    /// Output file the map describes
    pub to: Option<PathBuf>,
    /// Embed the map in the stylesheet (`map.inline`, default true)
    pub inline: bool,
}

/// Options handed to the style engine
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessingOptions(Map<String, Value>);

impl ProcessingOptions {
    /// Build options from a raw map, normalizing the `sourcemaps` shorthand.
    ///
    /// `sourcemaps: true` becomes `{ "map": { "inline": true } }`; `false`,
    /// `null` or any non-object value disables source maps.
    pub fn new(mut map: Map<String, Value>) -> Self {
        match map.get(SOURCEMAPS_KEY) {
            Some(Value::Bool(true)) => {
                map.insert(
                    SOURCEMAPS_KEY.to_string(),
                    serde_json::json!({ "map": { "inline": true } }),
                );
            }
            Some(Value::Object(_)) | None => {}
            Some(_) => {
                map.remove(SOURCEMAPS_KEY);
            }
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Source-map settings, or `None` when source maps are disabled.
    pub fn sourcemap(&self) -> Option<SourceMapSettings> {
        let block = self.0.get(SOURCEMAPS_KEY)?.as_object()?;
        let path_of = |key: &str| block.get(key).and_then(Value::as_str).map(PathBuf::from);
        let inline = block
            .get("map")
            .and_then(|m| m.get("inline"))
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Some(SourceMapSettings {
            from: path_of("from"),
            to: path_of("to"),
            inline,
        })
    }

    /// Whether the map must be written next to the output as `<output>.map`.
    pub fn writes_separate_map(&self) -> bool {
        self.sourcemap().map(|s| !s.inline).unwrap_or(false)
    }

    /// Record the file about to be parsed. No-op when source maps are off.
    pub fn set_sourcemap_from(&mut self, path: &Path) {
        self.set_sourcemap_path("from", path);
    }

    /// Record the output the map belongs to. No-op when source maps are off.
    pub fn set_sourcemap_to(&mut self, path: &Path) {
        self.set_sourcemap_path("to", path);
    }

    fn set_sourcemap_path(&mut self, key: &str, path: &Path) {
        if let Some(Value::Object(block)) = self.0.get_mut(SOURCEMAPS_KEY) {
            block.insert(
                key.to_string(),
                Value::String(path.to_string_lossy().into_owned()),
            );
        }
    }
}
