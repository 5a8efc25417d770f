use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Cursor position in a host document: 0-based line index and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Cursor { line, column }
    }
}

/// The document a formula is edited in, addressed line by line.
pub trait HostDocument {
    fn cursor(&self) -> Cursor;
    fn line_text(&self, line: usize) -> Option<String>;
    fn set_line_text(&mut self, line: usize, text: &str) -> Result<()>;
}

/// A plain-text document held in memory.
///
/// Every line remembers its own ending (`\n`, `\r\n`, or none for a last
/// line without one), so a document that is loaded and saved without edits is
/// written back byte for byte, even with mixed endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
    endings: Vec<&'static str>,
    cursor: Cursor,
}

impl TextDocument {
    pub fn from_text(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut endings = Vec::new();
        let mut rest = text;

        loop {
            let Some(newline) = rest.find('\n') else {
                lines.push(rest.to_string());
                endings.push("");
                break;
            };

            let (line, ending) = match rest[..newline].strip_suffix('\r') {
                Some(line) => (line, "\r\n"),
                None => (&rest[..newline], "\n"),
            };
            lines.push(line.to_string());
            endings.push(ending);

            rest = &rest[newline + 1..];
            if rest.is_empty() {
                break;
            }
        }

        TextDocument {
            lines,
            endings,
            cursor: Cursor::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Ok(Self::from_text(&text))
    }

    /// Write the document to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }

        fs::write(path, self.text()).map_err(|err| Error::io(path, err))
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .zip(&self.endings)
            .flat_map(|(line, ending)| [line.as_str(), *ending])
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Move the cursor. The line must exist; the column is taken as given.
    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
        if cursor.line >= self.lines.len() {
            return Err(Error::LineOutOfRange { line: cursor.line });
        }
        self.cursor = cursor;
        Ok(())
    }
}

impl HostDocument for TextDocument {
    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn set_line_text(&mut self, line: usize, text: &str) -> Result<()> {
        let slot = self
            .lines
            .get_mut(line)
            .ok_or(Error::LineOutOfRange { line })?;
        *slot = text.to_string();
        Ok(())
    }
}
