// Turning formula content back into delimited text inside a line.

use crate::span::{MathMode, MathSpan};

/// Wrap `content` in the delimiters of `mode`.
pub fn delimit(content: &str, mode: MathMode) -> String {
    let delimiter = mode.delimiter();
    let mut out = String::with_capacity(content.len() + 2 * delimiter.len());
    out.push_str(delimiter);
    out.push_str(content);
    out.push_str(delimiter);
    out
}

/// Splice a new formula into `line` at byte offset `column`.
///
/// A column past the end of the line appends; a column inside a multi-byte
/// character is moved back to the start of that character.
pub fn insert_at(line: &str, column: usize, content: &str, mode: MathMode) -> String {
    let at = floor_char_boundary(line, column);
    let formula = delimit(content, mode);

    let mut out = String::with_capacity(line.len() + formula.len());
    out.push_str(&line[..at]);
    out.push_str(&formula);
    out.push_str(&line[at..]);
    out
}

/// Outcome of rewriting a previously detected formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// The formula was rewritten; holds the new line.
    Updated(String),
    /// The original formula text is no longer in the line. Holds the line,
    /// untouched.
    Stale(String),
}

impl Replacement {
    pub fn is_stale(&self) -> bool {
        matches!(self, Replacement::Stale(_))
    }

    pub fn line(&self) -> &str {
        match self {
            Replacement::Updated(line) | Replacement::Stale(line) => line,
        }
    }

    pub fn into_line(self) -> String {
        match self {
            Replacement::Updated(line) | Replacement::Stale(line) => line,
        }
    }
}

/// Replace `original` in `line` with `new_content` delimited for `mode`.
///
/// `mode` is the mode chosen at accept time and may differ from
/// `original.kind`; the original text is always rebuilt from the span's own
/// kind. When the original text still sits at the detected offsets it is
/// spliced there. Otherwise the first occurrence anywhere in the line is
/// replaced, and when there is none the line comes back as
/// [`Replacement::Stale`].
pub fn replace(line: &str, original: &MathSpan, new_content: &str, mode: MathMode) -> Replacement {
    let old = original.delimited();
    let new = delimit(new_content, mode);

    let at = if line.get(original.start..original.end) == Some(old.as_str()) {
        original.start
    } else if let Some(at) = line.find(&old) {
        tracing::debug!(
            from = original.start,
            to = at,
            "formula moved since detection, replacing first occurrence"
        );
        at
    } else {
        tracing::warn!("formula {old:?} is no longer in the line, leaving it unchanged");
        return Replacement::Stale(line.to_string());
    };

    let mut out = String::with_capacity(line.len() - old.len() + new.len());
    out.push_str(&line[..at]);
    out.push_str(&new);
    out.push_str(&line[at + old.len()..]);
    Replacement::Updated(out)
}

fn floor_char_boundary(line: &str, column: usize) -> usize {
    let mut at = column.min(line.len());
    while !line.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::locate;

    fn span(line: &str, column: usize) -> MathSpan {
        locate(line, column).into_span().expect("formula under cursor")
    }

    #[test]
    fn test_delimit() {
        assert_eq!(delimit("x", MathMode::Inline), "$x$");
        assert_eq!(delimit("x", MathMode::Block), "$$x$$");
    }

    #[test]
    fn test_insert_at() {
        assert_eq!(insert_at("a  b", 2, "x^2", MathMode::Inline), "a $x^2$ b");
        assert_eq!(insert_at("", 0, "y", MathMode::Block), "$$y$$");
        assert_eq!(insert_at("end", 99, "z", MathMode::Inline), "end$z$");
    }

    #[test]
    fn test_insert_at_snaps_to_char_boundary() {
        // Offset 1 falls inside `é`.
        assert_eq!(insert_at("é!", 1, "x", MathMode::Inline), "$x$é!");
    }

    #[test]
    fn test_insert_then_replace_unchanged_is_identity() {
        let line = insert_at("Energy:  done", 8, "x^2", MathMode::Inline);
        assert_eq!(line, "Energy: $x^2$ done");
        assert_eq!(line.matches("$x^2$").count(), 1);

        let original = span(&line, 10);
        let result = replace(&line, &original, &original.content, original.kind);
        assert_eq!(result, Replacement::Updated(line.clone()));
    }

    #[test]
    fn test_replace_content() {
        let line = "a $$x$$ b";
        let result = replace(line, &span(line, 4), "y+1", MathMode::Block);
        assert_eq!(result.line(), "a $$y+1$$ b");
    }

    #[test]
    fn test_mode_switch_inline_to_block() {
        let line = "so $x$ holds";
        let result = replace(line, &span(line, 4), "x", MathMode::Block);
        assert_eq!(result.into_line(), "so $$x$$ holds");
    }

    #[test]
    fn test_mode_switch_block_to_inline() {
        let line = "$$x$$";
        let result = replace(line, &span(line, 2), "x", MathMode::Inline);
        assert_eq!(result.into_line(), "$x$");
    }

    #[test]
    fn test_duplicate_content_replaces_detected_occurrence() {
        let line = "$x$ and $x$";
        let result = replace(line, &span(line, 9), "y", MathMode::Inline);
        assert_eq!(result.line(), "$x$ and $y$");
    }

    #[test]
    fn test_shifted_line_falls_back_to_first_occurrence() {
        let original = span("$a$ rest", 1);
        let edited = ">> $a$ rest";
        let result = replace(edited, &original, "b", MathMode::Inline);
        assert_eq!(result, Replacement::Updated(">> $b$ rest".to_string()));
    }

    #[test]
    fn test_stale_span_leaves_line_unchanged() {
        let original = span("see $x$", 5);
        let edited = "see $z$";
        let result = replace(edited, &original, "y", MathMode::Inline);
        assert!(result.is_stale());
        assert_eq!(result.line(), edited);
    }
}
