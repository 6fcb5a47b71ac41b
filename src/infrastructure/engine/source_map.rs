//! Source map v3 generation
//!
//! Only what the engine needs: one segment per mapped position, no names.

use serde::Serialize;

const BASE64_DIGITS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Append the base64 VLQ encoding of `value` to `out`.
pub fn encode_vlq(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = (vlq & 0b1_1111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_DIGITS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Serialized form of a v3 map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMap {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
struct Mapping {
    generated_line: usize,
    generated_column: usize,
    source: usize,
    original_line: usize,
    original_column: usize,
}

/// Collects mappings in generated order. All positions are 0-based.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    file: Option<String>,
    sources: Vec<String>,
    mappings: Vec<Mapping>,
}

impl SourceMapBuilder {
    pub fn new(file: Option<String>) -> Self {
        Self {
            file,
            ..Self::default()
        }
    }

    pub fn add(
        &mut self,
        generated: (usize, usize),
        source: &str,
        original: (usize, usize),
    ) {
        let source = match self.sources.iter().position(|s| s == source) {
            Some(index) => index,
            None => {
                self.sources.push(source.to_string());
                self.sources.len() - 1
            }
        };
        self.mappings.push(Mapping {
            generated_line: generated.0,
            generated_column: generated.1,
            source,
            original_line: original.0,
            original_column: original.1,
        });
    }

    pub fn build(self) -> SourceMap {
        let mut mappings = String::new();
        let mut line = 0;
        let mut prev_column = 0i64;
        let mut prev_source = 0i64;
        let mut prev_original_line = 0i64;
        let mut prev_original_column = 0i64;
        let mut first_in_line = true;

        for m in &self.mappings {
            while line < m.generated_line {
                mappings.push(';');
                line += 1;
                prev_column = 0;
                first_in_line = true;
            }
            if !first_in_line {
                mappings.push(',');
            }
            first_in_line = false;

            encode_vlq(m.generated_column as i64 - prev_column, &mut mappings);
            encode_vlq(m.source as i64 - prev_source, &mut mappings);
            encode_vlq(m.original_line as i64 - prev_original_line, &mut mappings);
            encode_vlq(m.original_column as i64 - prev_original_column, &mut mappings);

            prev_column = m.generated_column as i64;
            prev_source = m.source as i64;
            prev_original_line = m.original_line as i64;
            prev_original_column = m.original_column as i64;
        }

        SourceMap {
            version: 3,
            file: self.file,
            sources: self.sources,
            names: Vec::new(),
            mappings,
        }
    }
}
