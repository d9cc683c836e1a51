//! Syntax highlighting for engine output.
//!
//! Highlighters classify text into [`Segment`]s grouped by line; front ends
//! decide what each [`SegmentKind`] looks like.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Key,
    String,
    Number,
    Bool,
    Null,
    Punctuation,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Rendered text, one `Vec<Segment>` per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted {
    pub lines: Vec<Vec<Segment>>,
}

impl Highlighted {
    /// Inserts an empty first line so the block sits apart from what precedes it.
    pub fn detached(mut self) -> Self {
        self.lines.insert(0, Vec::new());
        self
    }

    /// The text without styling, lines joined by `\n`.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|segment| segment.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn from_segments<'a>(segments: impl IntoIterator<Item = (SegmentKind, &'a str)>) -> Self {
        let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
        for (kind, text) in segments {
            for (idx, part) in text.split('\n').enumerate() {
                if idx > 0 {
                    lines.push(Vec::new());
                }
                if part.is_empty() {
                    continue;
                }
                if let Some(line) = lines.last_mut() {
                    line.push(Segment {
                        kind,
                        text: part.to_string(),
                    });
                }
            }
        }
        // A trailing newline does not open another visible line.
        if lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Self { lines }
    }
}

pub trait Highlighter: Send + Sync {
    fn highlight(&self, raw: &str) -> Highlighted;
}

/// Leaves text unclassified.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, raw: &str) -> Highlighted {
        Highlighted::from_segments([(SegmentKind::Plain, raw)])
    }
}

/// Classifies JSON tokens. Tolerates malformed or partial input.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHighlighter;

impl Highlighter for JsonHighlighter {
    fn highlight(&self, raw: &str) -> Highlighted {
        Highlighted::from_segments(json_segments(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Inside an object; `true` while a key is expected next.
    Object { expect_key: bool },
    Array,
}

fn json_segments(input: &str) -> Vec<(SegmentKind, &str)> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i);
                match frames.last_mut() {
                    Some(Frame::Object { expect_key }) if *expect_key => {
                        *expect_key = false;
                        SegmentKind::Key
                    }
                    _ => SegmentKind::String,
                }
            }
            b'{' => {
                i += 1;
                frames.push(Frame::Object { expect_key: true });
                SegmentKind::Punctuation
            }
            b'[' => {
                i += 1;
                frames.push(Frame::Array);
                SegmentKind::Punctuation
            }
            b'}' | b']' => {
                i += 1;
                frames.pop();
                SegmentKind::Punctuation
            }
            b',' => {
                i += 1;
                if let Some(Frame::Object { expect_key }) = frames.last_mut() {
                    *expect_key = true;
                }
                SegmentKind::Punctuation
            }
            b':' => {
                i += 1;
                SegmentKind::Punctuation
            }
            b'-' | b'0'..=b'9' => {
                i = skip_number(bytes, i);
                SegmentKind::Number
            }
            b't' if bytes[i..].starts_with(b"true") => {
                i += 4;
                SegmentKind::Bool
            }
            b'f' if bytes[i..].starts_with(b"false") => {
                i += 5;
                SegmentKind::Bool
            }
            b'n' if bytes[i..].starts_with(b"null") => {
                i += 4;
                SegmentKind::Null
            }
            b' ' | b'\t' | b'\r' | b'\n' => {
                while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n') {
                    i += 1;
                }
                SegmentKind::Plain
            }
            _ => {
                i = next_char_boundary(input, i);
                SegmentKind::Plain
            }
        };
        out.push((kind, &input[start..i]));
    }

    out
}

/// Index just past the closing quote, or the end of input if unterminated.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut escaped = false;
    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        if escaped {
            escaped = false;
        } else if byte == b'\\' {
            escaped = true;
        } else if byte == b'"' {
            break;
        }
    }
    i
}

fn skip_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if bytes[i] == b'-' {
        i += 1;
    }
    while i < bytes.len()
        && (bytes[i].is_ascii_digit() || matches!(bytes[i], b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        i += 1;
    }
    i
}

fn next_char_boundary(input: &str, index: usize) -> usize {
    input[index..]
        .chars()
        .next()
        .map(|ch| index + ch.len_utf8())
        .unwrap_or(input.len())
}
