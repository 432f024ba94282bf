//! Span-preserving parser for the OpenStep property list dialect used by
//! `project.pbxproj`.
//!
//! Every value remembers the byte range it was read from so that edits can
//! be expressed as replacements of the original text.

use std::ops::Range;

use thiserror::Error;

/// Error while parsing a project file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid project file at byte {offset}: {message}")]
pub struct ParseError {
    /// Byte offset of the offending token
    pub offset: usize,
    pub message: String,
}

/// A parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(PString),
    Array(Array),
    Dict(Dict),
}

/// A scalar string, quoted or bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PString {
    /// Unescaped, unquoted value
    pub value: String,
    pub span: Range<usize>,
}

/// An array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub value: Value,
    /// End of the element including its trailing comma, if any
    pub item_end: usize,
}

/// A parenthesized list; `span` covers `(` through `)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub elements: Vec<Element>,
    pub span: Range<usize>,
}

/// A `key = value;` pair; `span` runs from the key through the `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub span: Range<usize>,
}

/// A braced dictionary; `span` covers `{` through `}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dict {
    pub entries: Vec<Entry>,
    pub span: Range<usize>,
}

/// A block comment, kept to locate `/* Begin ... section */` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Range<usize>,
}

impl Value {
    pub fn span(&self) -> Range<usize> {
        match self {
            Value::String(s) => s.span.clone(),
            Value::Array(a) => a.span.clone(),
            Value::Dict(d) => d.span.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl Array {
    /// String values of all scalar elements.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| e.value.as_str())
    }
}

impl Dict {
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entry(key).map(|e| &e.value)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn get_dict(&self, key: &str) -> Option<&Dict> {
        self.get(key).and_then(Value::as_dict)
    }
}

/// Parsed document: the root dictionary and every block comment.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Dict,
    pub comments: Vec<Comment>,
}

/// Parse a project file.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser {
        src: source.as_bytes(),
        text: source,
        pos: 0,
        comments: Vec::new(),
    };
    parser.skip_trivia()?;
    let root = match parser.value()? {
        Value::Dict(d) => d,
        other => return Err(parser.error_at(other.span().start, "root must be a dictionary")),
    };
    parser.skip_trivia()?;
    if parser.pos < parser.src.len() {
        return Err(parser.error("trailing content after root dictionary"));
    }
    Ok(Document {
        root,
        comments: parser.comments,
    })
}

struct Parser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    comments: Vec<Comment>,
}

fn is_bare(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'/' | b':' | b'.' | b'-' | b'+')
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: &str) -> ParseError {
        ParseError {
            offset,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if self.src[self.pos..].starts_with(b"//") {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if self.src[self.pos..].starts_with(b"/*") {
                let start = self.pos;
                let end = self.text[start + 2..]
                    .find("*/")
                    .map(|i| start + 2 + i + 2)
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.comments.push(Comment {
                    text: self.text[start + 2..end - 2].trim().to_string(),
                    span: start..end,
                });
                self.pos = end;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn expect(&mut self, byte: u8) -> Result<usize, ParseError> {
        self.skip_trivia()?;
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(self.pos)
        } else {
            Err(self.error(&format!("expected `{}`", byte as char)))
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'{') => self.dict().map(Value::Dict),
            Some(b'(') => self.array().map(Value::Array),
            Some(b'"') => self.quoted().map(Value::String),
            Some(b'<') => self.data().map(Value::String),
            Some(b) if is_bare(b) => Ok(Value::String(self.bare())),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn string(&mut self) -> Result<PString, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'"') => self.quoted(),
            Some(b) if is_bare(b) => Ok(self.bare()),
            _ => Err(self.error("expected a key")),
        }
    }

    fn bare(&mut self) -> PString {
        let start = self.pos;
        while self.peek().is_some_and(is_bare) {
            self.pos += 1;
        }
        PString {
            value: self.text[start..self.pos].to_string(),
            span: start..self.pos,
        }
    }

    fn data(&mut self) -> Result<PString, ParseError> {
        let start = self.pos;
        let end = self.text[start..]
            .find('>')
            .map(|i| start + i + 1)
            .ok_or_else(|| self.error("unterminated data literal"))?;
        self.pos = end;
        Ok(PString {
            value: self.text[start..end].to_string(),
            span: start..end,
        })
    }

    fn quoted(&mut self) -> Result<PString, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let text = self.text;
        let mut value = String::new();
        loop {
            let rest = &text[self.pos..];
            let mut chars = rest.chars();
            match chars.next() {
                None => return Err(self.error_at(start, "unterminated string")),
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| self.error_at(start, "unterminated string"))?;
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                    self.pos += 1 + escaped.len_utf8();
                }
                Some(c) => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        Ok(PString {
            value,
            span: start..self.pos,
        })
    }

    fn dict(&mut self) -> Result<Dict, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut entries = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                break;
            }
            let key = self.string()?;
            self.expect(b'=')?;
            let value = self.value()?;
            let end = self.expect(b';')?;
            entries.push(Entry {
                key: key.value,
                value,
                span: key.span.start..end,
            });
        }
        Ok(Dict {
            entries,
            span: start..self.pos,
        })
    }

    fn array(&mut self) -> Result<Array, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut elements = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b')') {
                self.pos += 1;
                break;
            }
            let value = self.value()?;
            self.skip_trivia()?;
            let item_end = match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.pos
                }
                Some(b')') => value.span().end,
                _ => return Err(self.error("expected `,` or `)`")),
            };
            elements.push(Element { value, item_end });
        }
        Ok(Array {
            elements,
            span: start..self.pos,
        })
    }
}
