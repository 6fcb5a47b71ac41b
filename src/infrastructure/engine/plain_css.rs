//! Built-in engine for plain CSS
//!
//! Splits a stylesheet into its top-level statements without interpreting
//! them. Each node keeps its raw text, so a tree that is not modified
//! serializes back to the exact input. Processing concatenates the nodes and,
//! when source maps are enabled, maps the start of every node to its origin.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::domain::entities::{CompileResult, Node, NodeKind, SourcePosition, Stylesheet};
use crate::domain::ports::{EngineError, StyleEngine};
use crate::domain::value_objects::path::{relative_to, to_slash};
use crate::domain::value_objects::ProcessingOptions;

use super::source_map::SourceMapBuilder;

/// Plain CSS engine: lossless parse, concatenating serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCssEngine;

impl PlainCssEngine {
    pub fn new() -> Self {
        Self
    }
}

impl StyleEngine for PlainCssEngine {
    fn parse(&self, source: &str, options: &ProcessingOptions) -> Result<Stylesheet, EngineError> {
        let file = options.sourcemap().and_then(|s| s.from);
        Parser::new(source, file).parse()
    }

    fn process(
        &self,
        root: Stylesheet,
        options: &ProcessingOptions,
    ) -> Result<CompileResult, EngineError> {
        let Some(settings) = options.sourcemap() else {
            return Ok(CompileResult::new(root.to_css()));
        };

        let output = settings.to.as_deref();
        let out_dir = output.and_then(Path::parent).unwrap_or(Path::new(""));
        let file_name = output
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());

        let mut builder = SourceMapBuilder::new(file_name.clone());
        let mut css = String::new();
        let mut cursor = Cursor::default();

        for node in root.nodes() {
            css.push_str(&node.before);
            cursor.advance(&node.before);
            if let Some(file) = &node.source.file {
                builder.add(
                    (cursor.line, cursor.column),
                    &to_slash(&relative_to(file, out_dir)),
                    (
                        node.source.line.saturating_sub(1),
                        node.source.column.saturating_sub(1),
                    ),
                );
            }
            css.push_str(&node.text);
            cursor.advance(&node.text);
        }
        css.push_str(root.after());

        let map = builder.build().to_json();
        if settings.inline {
            css.push_str("\n/*# sourceMappingURL=data:application/json;base64,");
            css.push_str(&STANDARD.encode(map.as_bytes()));
            css.push_str(" */");
            return Ok(CompileResult::new(css));
        }

        if let Some(name) = &file_name {
            css.push_str(&format!("\n/*# sourceMappingURL={name}.map */"));
        }
        Ok(CompileResult::new(css).with_map(map))
    }
}

/// Generated position while serializing (0-based)
#[derive(Debug, Default)]
struct Cursor {
    line: usize,
    column: usize,
}

impl Cursor {
    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }
}

/// Byte offset to 1-based line and column
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn position(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        (line, source[line_start..offset].chars().count() + 1)
    }
}

struct Parser<'s> {
    source: &'s str,
    bytes: &'s [u8],
    index: LineIndex,
    file: Option<PathBuf>,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, file: Option<PathBuf>) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            index: LineIndex::new(source),
            file,
        }
    }

    fn parse(self) -> Result<Stylesheet, EngineError> {
        let mut nodes = Vec::new();
        let mut pos = 0;

        loop {
            let start = self.skip_whitespace(pos);
            if start == self.bytes.len() {
                return Ok(Stylesheet::new(nodes, &self.source[pos..]));
            }

            let (kind, end) = if self.bytes[start..].starts_with(b"/*") {
                (NodeKind::Comment, self.comment_end(start)?)
            } else {
                self.statement(start)?
            };

            let (line, column) = self.index.position(self.source, start);
            nodes.push(Node {
                kind,
                before: self.source[pos..start].to_string(),
                text: self.source[start..end].to_string(),
                source: SourcePosition {
                    file: self.file.clone(),
                    line,
                    column,
                },
            });
            pos = end;
        }
    }

    fn skip_whitespace(&self, mut i: usize) -> usize {
        while i < self.bytes.len() && self.bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    }

    /// Offset just past the `*/` closing the comment opened at `start`.
    fn comment_end(&self, start: usize) -> Result<usize, EngineError> {
        match self.source[start + 2..].find("*/") {
            Some(i) => Ok(start + 2 + i + 2),
            None => Err(self.error(start, "Unclosed comment")),
        }
    }

    /// Offset just past the quote closing the string opened at `start`.
    fn string_end(&self, start: usize) -> Result<usize, EngineError> {
        let quote = self.bytes[start];
        let mut i = start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }
        Err(self.error(start, "Unclosed string"))
    }

    /// One rule or at-rule starting at `start`.
    fn statement(&self, start: usize) -> Result<(NodeKind, usize), EngineError> {
        let kind = if self.bytes[start] == b'@' {
            NodeKind::AtRule
        } else {
            NodeKind::Rule
        };

        let mut depth = 0usize;
        let mut opened = start;
        let mut i = start;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'"' | b'\'' => {
                    i = self.string_end(i)?;
                    continue;
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    i = self.comment_end(i)?;
                    continue;
                }
                b'{' => {
                    if depth == 0 {
                        opened = i;
                    }
                    depth += 1;
                }
                b'}' => {
                    if depth == 0 {
                        return Err(self.error(i, "Unexpected }"));
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok((kind, i + 1));
                    }
                }
                b';' if depth == 0 => {
                    if kind == NodeKind::AtRule {
                        return Ok((kind, i + 1));
                    }
                    return Err(self.error(start, "Unknown word"));
                }
                _ => {}
            }
            i += 1;
        }

        if depth > 0 {
            return Err(self.error(opened, "Unclosed block"));
        }
        // `@import "x"` may end the file without a semicolon
        if kind == NodeKind::AtRule {
            return Ok((kind, start + self.source[start..].trim_end().len()));
        }
        Err(self.error(start, "Unknown word"))
    }

    fn error(&self, offset: usize, message: &str) -> EngineError {
        let (line, column) = self.index.position(self.source, offset);
        EngineError::Parse {
            line,
            column,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn options(value: Value) -> ProcessingOptions {
        ProcessingOptions::new(value.as_object().cloned().unwrap_or_default())
    }

    fn parse(source: &str) -> Result<Stylesheet, EngineError> {
        PlainCssEngine.parse(source, &ProcessingOptions::default())
    }

    fn parse_error(source: &str) -> (usize, usize, String) {
        match parse(source) {
            Err(EngineError::Parse {
                line,
                column,
                message,
            }) => (line, column, message),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_byte_for_byte() {
        let source = "@charset \"utf-8\";\n\n/* header */\n.a { content: \"}\"; }\n\
                      @media (min-width: 10px) {\n  .b { color: red }\n}\n.c{x:'{'}  \n";
        let sheet = parse(source).unwrap();
        assert_eq!(sheet.to_css(), source);

        let kinds: Vec<NodeKind> = sheet.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::AtRule,
                NodeKind::Comment,
                NodeKind::Rule,
                NodeKind::AtRule,
                NodeKind::Rule,
            ]
        );
        assert_eq!(sheet.after(), "  \n");
    }

    #[test]
    fn node_positions_are_one_based() {
        let sheet = parse(".a{}\n  .b{}").unwrap();
        let second = &sheet.nodes()[1];
        assert_eq!((second.source.line, second.source.column), (2, 3));
        assert_eq!(second.before, "\n  ");
    }

    #[test]
    fn nodes_are_tagged_with_the_file_being_parsed() {
        let mut opts = options(json!({ "sourcemaps": true }));
        opts.set_sourcemap_from(Path::new("src/a.css"));
        let sheet = PlainCssEngine.parse(".a{}", &opts).unwrap();
        assert_eq!(sheet.nodes()[0].source.file, Some(PathBuf::from("src/a.css")));
    }

    #[test]
    fn at_rule_without_semicolon_at_end_of_file() {
        let sheet = parse("@import \"x.css\"\n").unwrap();
        assert_eq!(sheet.nodes()[0].text, "@import \"x.css\"");
        assert_eq!(sheet.after(), "\n");
    }

    #[test]
    fn parse_errors_carry_positions() {
        assert_eq!(parse_error(".a{color:red"), (1, 3, "Unclosed block".to_string()));
        assert_eq!(parse_error(".a{}\n}"), (2, 1, "Unexpected }".to_string()));
        assert_eq!(
            parse_error(".a{content:\"x}"),
            (1, 12, "Unclosed string".to_string())
        );
        assert_eq!(parse_error("/* open"), (1, 1, "Unclosed comment".to_string()));
        assert_eq!(parse_error(".a{}\nfoo"), (2, 1, "Unknown word".to_string()));
        assert_eq!(parse_error("color: red;"), (1, 1, "Unknown word".to_string()));
    }

    #[test]
    fn process_without_sourcemaps_is_identity() {
        let source = ".in{color:#fff}\n";
        let sheet = parse(source).unwrap();
        let result = PlainCssEngine
            .process(sheet, &ProcessingOptions::default())
            .unwrap();
        assert_eq!(result.css, source);
        assert!(result.map.is_none());
    }

    #[test]
    fn inline_map_is_embedded_as_data_url() {
        let mut opts = options(json!({ "sourcemaps": true }));
        opts.set_sourcemap_to(Path::new("app.css"));
        opts.set_sourcemap_from(Path::new("a.css"));
        let sheet = PlainCssEngine.parse(".a{}", &opts).unwrap();

        let result = PlainCssEngine.process(sheet, &opts).unwrap();
        assert!(result.map.is_none());

        let prefix = ".a{}\n/*# sourceMappingURL=data:application/json;base64,";
        assert!(result.css.starts_with(prefix));
        let encoded = result.css[prefix.len()..].trim_end_matches(" */");
        let decoded = STANDARD.decode(encoded).unwrap();
        let map: Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(map["version"], json!(3));
        assert_eq!(map["file"], json!("app.css"));
        assert_eq!(map["sources"], json!(["a.css"]));
        assert_eq!(map["mappings"], json!("AAAA"));
    }

    #[test]
    fn separate_map_is_returned_with_annotation() {
        let mut opts = options(json!({ "sourcemaps": { "map": { "inline": false } } }));
        opts.set_sourcemap_to(Path::new("dist/app.css"));

        opts.set_sourcemap_from(Path::new("src/a.css"));
        let mut merged = PlainCssEngine.parse(".a{}", &opts).unwrap();
        opts.set_sourcemap_from(Path::new("src/b.css"));
        for node in PlainCssEngine.parse("\n.b{}", &opts).unwrap().nodes() {
            merged.append(node.clone());
        }

        let result = PlainCssEngine.process(merged, &opts).unwrap();
        assert_eq!(
            result.css,
            ".a{}\n.b{}\n/*# sourceMappingURL=app.css.map */"
        );

        let map: Value = serde_json::from_str(result.map.as_deref().unwrap()).unwrap();
        assert_eq!(map["sources"], json!(["../src/a.css", "../src/b.css"]));
        assert_eq!(map["mappings"], json!("AAAA;ACCA"));
    }
}
