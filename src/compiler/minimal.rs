//! Indentation-aware reader for the small YAML subset process documents use:
//! block mappings, block sequences (of mappings or scalars), and plain or
//! quoted scalars. It produces the same `serde_yaml::Value` tree the full
//! reader would for any document inside that subset.

use crate::error::ParseError;
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    indent: usize,
    text: &'a str,
}

pub fn read(text: &str) -> Result<Value, ParseError> {
    require_mapping_header(text)?;
    let lines = significant_lines(text)?;
    let first = lines.first().copied().ok_or(ParseError::RootNotMapping)?;

    let mut reader = BlockReader { lines, pos: 0 };
    let root = reader.mapping(first.indent)?;

    if let Some(line) = reader.peek() {
        return Err(syntax(line, "unexpected indentation"));
    }
    Ok(Value::Mapping(root))
}

/// The first non-blank, non-comment line of a document must be a block
/// mapping header (`key:`). Applies to every reader.
pub(crate) fn require_mapping_header(text: &str) -> Result<(), ParseError> {
    let first = text
        .lines()
        .map(|raw| strip_comment(raw).trim())
        .find(|body| !body.is_empty() && *body != "---");
    match first {
        Some(body) if body.ends_with(':') => Ok(()),
        _ => Err(ParseError::RootNotMapping),
    }
}

fn significant_lines(text: &str) -> Result<Vec<Line<'_>>, ParseError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let content = strip_comment(raw).trim_end();
        let body = content.trim_start_matches(' ');
        if body.is_empty() || body == "---" {
            continue;
        }
        if body.starts_with('\t') {
            return Err(ParseError::Syntax {
                line: number,
                message: "tabs are not allowed in indentation".to_string(),
            });
        }
        lines.push(Line {
            number,
            indent: content.len() - body.len(),
            text: body,
        });
    }
    Ok(lines)
}

struct BlockReader<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> BlockReader<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn block(&mut self, indent: usize) -> Result<Value, ParseError> {
        match self.peek() {
            Some(line) if is_item(line.text) => Ok(Value::Sequence(self.sequence(indent)?)),
            _ => Ok(Value::Mapping(self.mapping(indent)?)),
        }
    }

    fn mapping(&mut self, indent: usize) -> Result<Mapping, ParseError> {
        let mut map = Mapping::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(syntax(line, "unexpected indentation"));
            }
            if is_item(line.text) {
                return Err(syntax(line, "sequence item where a key was expected"));
            }

            let (key, rest) = split_key(line)?;
            self.pos += 1;
            let value = if rest.is_empty() {
                self.nested(indent)?
            } else {
                scalar(rest, line)?
            };

            let name = key_text(&key);
            if map.insert(key, value).is_some() {
                return Err(syntax(line, &format!("duplicate key '{}'", name)));
            }
        }
        Ok(map)
    }

    /// Value of a `key:` line with nothing after the colon.
    fn nested(&mut self, parent_indent: usize) -> Result<Value, ParseError> {
        match self.peek() {
            Some(next) if next.indent > parent_indent => self.block(next.indent),
            // YAML allows a sequence at the same column as its key.
            Some(next) if next.indent == parent_indent && is_item(next.text) => {
                Ok(Value::Sequence(self.sequence(parent_indent)?))
            }
            _ => Ok(Value::Null),
        }
    }

    fn sequence(&mut self, indent: usize) -> Result<Vec<Value>, ParseError> {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent != indent || !is_item(line.text) {
                break;
            }

            let rest = line.text[1..].trim_start_matches(' ');
            if rest.is_empty() {
                self.pos += 1;
                let item = match self.peek() {
                    Some(next) if next.indent > indent => self.block(next.indent)?,
                    _ => Value::Null,
                };
                items.push(item);
            } else if find_key_colon(rest).is_some() {
                // "- key: value" opens a mapping whose keys sit at the column of `key`.
                let item_indent = line.indent + (line.text.len() - rest.len());
                self.lines[self.pos] = Line {
                    number: line.number,
                    indent: item_indent,
                    text: rest,
                };
                items.push(Value::Mapping(self.mapping(item_indent)?));
            } else {
                self.pos += 1;
                items.push(scalar(rest, line)?);
            }
        }
        Ok(items)
    }
}

fn is_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

fn syntax(line: Line<'_>, message: &str) -> ParseError {
    ParseError::Syntax {
        line: line.number,
        message: message.to_string(),
    }
}

/// Byte offset of the colon separating key from value, ignoring quoted text.
fn find_key_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if (b == b'"' || b == b'\'') && i == 0 => quote = Some(b),
            None if b == b':' => {
                if i + 1 == bytes.len() || bytes[i + 1] == b' ' {
                    return Some(i);
                }
            }
            None => {}
        }
    }
    None
}

fn split_key<'a>(line: Line<'a>) -> Result<(Value, &'a str), ParseError> {
    let colon = find_key_colon(line.text).ok_or_else(|| syntax(line, "expected 'key: value'"))?;
    let raw_key = line.text[..colon].trim();
    if raw_key.is_empty() {
        return Err(syntax(line, "empty key"));
    }
    Ok((scalar(raw_key, line)?, line.text[colon + 1..].trim()))
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => "null".to_string(),
    }
}

/// Plain and quoted scalars resolve through `serde_yaml` so both readers
/// agree on tags, number bases and escapes.
fn scalar(text: &str, line: Line<'_>) -> Result<Value, ParseError> {
    match text {
        "[]" => return Ok(Value::Sequence(Vec::new())),
        "{}" => return Ok(Value::Mapping(Mapping::new())),
        // Document markers at the start of a line, plain text after a key.
        "---" | "..." => return Ok(Value::String(text.to_string())),
        _ => {}
    }
    if text.starts_with(UNSUPPORTED_INDICATORS) {
        return Err(syntax(line, &format!("unsupported YAML construct '{}'", text)));
    }

    match serde_yaml::from_str::<Value>(text) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => Ok(value),
        Ok(_) => Err(syntax(line, &format!("expected a scalar, found '{}'", text))),
        Err(e) => Err(syntax(line, &e.to_string())),
    }
}

/// Leading characters of flow collections, anchors, aliases, tags and block
/// scalars; none of them are part of the subset.
const UNSUPPORTED_INDICATORS: [char; 8] = ['[', '{', '&', '*', '!', '|', '>', '%'];

/// Drops a trailing `# comment` that sits outside quotes.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => {
                if i == 0 || matches!(bytes[i - 1], b' ' | b':' | b'-') {
                    quote = Some(b);
                }
            }
            None if b == b'#' && (i == 0 || bytes[i - 1] == b' ') => return &line[..i],
            None => {}
        }
    }
    line
}
