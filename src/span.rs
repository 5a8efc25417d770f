use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::serialize::delimit;

static BLOCK_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$([^$]+)\$\$").expect("block math pattern is valid"));

// The doubled-dollar guards are checked by hand in `InlineSpans`; the regex
// crate has no lookaround.
static INLINE_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$]+)\$").expect("inline math pattern is valid"));

/// How a formula is delimited in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathMode {
    /// `$...$`
    #[default]
    Inline,
    /// `$$...$$`
    Block,
}

impl MathMode {
    pub fn delimiter(self) -> &'static str {
        match self {
            MathMode::Inline => "$",
            MathMode::Block => "$$",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MathMode::Inline => "inline",
            MathMode::Block => "block",
        }
    }
}

impl fmt::Display for MathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delimited formula found in a single line.
///
/// `start` and `end` are byte offsets into the line and cover the delimiters,
/// `content` is the text strictly between them, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    pub kind: MathMode,
    pub start: usize,
    pub end: usize,
    pub content: String,
}

impl MathSpan {
    /// Both delimiter boundaries count as inside the span.
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column <= self.end
    }

    /// The span's text as it appeared in the line when it was detected.
    pub fn delimited(&self) -> String {
        delimit(&self.content, self.kind)
    }
}

/// Result of looking for a formula under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Found(MathSpan),
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    pub fn span(&self) -> Option<&MathSpan> {
        match self {
            Detection::Found(span) => Some(span),
            Detection::NotFound => None,
        }
    }

    pub fn into_span(self) -> Option<MathSpan> {
        match self {
            Detection::Found(span) => Some(span),
            Detection::NotFound => None,
        }
    }
}

/// Find the formula enclosing `column` in `line`.
///
/// Block spans are tried first so the edges of a `$$...$$` are never taken for
/// inline delimiters. Among spans of the same kind the leftmost one containing
/// the cursor wins. Only this one line is inspected, so formulas spanning
/// several lines are never found.
pub fn locate(line: &str, column: usize) -> Detection {
    let found = block_spans(line)
        .find(|span| span.contains(column))
        .or_else(|| InlineSpans::new(line).find(|span| span.contains(column)));

    match found {
        Some(span) => {
            tracing::debug!(
                kind = %span.kind,
                start = span.start,
                end = span.end,
                "formula found at column {column}"
            );
            Detection::Found(span)
        }
        None => {
            tracing::debug!("no formula at column {column}");
            Detection::NotFound
        }
    }
}

fn block_spans(line: &str) -> impl Iterator<Item = MathSpan> + '_ {
    BLOCK_MATH_RE.captures_iter(line).filter_map(|cap| {
        let whole = cap.get(0)?;
        let inner = cap.get(1)?;
        Some(MathSpan {
            kind: MathMode::Block,
            start: whole.start(),
            end: whole.end(),
            content: inner.as_str().to_string(),
        })
    })
}

/// Non-overlapping `$...$` spans whose delimiters are not part of a `$$`.
struct InlineSpans<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> InlineSpans<'a> {
    fn new(line: &'a str) -> Self {
        InlineSpans { line, pos: 0 }
    }
}

impl Iterator for InlineSpans<'_> {
    type Item = MathSpan;

    fn next(&mut self) -> Option<MathSpan> {
        let bytes = self.line.as_bytes();

        while self.pos < self.line.len() {
            let cap = INLINE_MATH_RE.captures_at(self.line, self.pos)?;
            let whole = cap.get(0)?;
            let inner = cap.get(1)?;

            let opened_by_double = whole.start() > 0 && bytes[whole.start() - 1] == b'$';
            let closed_by_double = bytes.get(whole.end()) == Some(&b'$');
            if opened_by_double || closed_by_double {
                // `$` is a single byte, so this stays on a char boundary.
                self.pos = whole.start() + 1;
                continue;
            }

            self.pos = whole.end();
            return Some(MathSpan {
                kind: MathMode::Inline,
                start: whole.start(),
                end: whole.end(),
                content: inner.as_str().to_string(),
            });
        }

        None
    }
}
