use crate::document::HostDocument;
use crate::error::{Error, Result};
use crate::serialize::{Replacement, insert_at, replace};
use crate::settings::SettingsStore;
use crate::span::{Detection, MathMode, MathSpan, locate};
use crate::studio::Studio;
use crate::templates::Template;

/// The visual formula editor the user types into.
pub trait MathField {
    /// Current LaTeX content.
    fn value(&self) -> String;
    fn set_value(&mut self, latex: &str);
    /// Insert `snippet` at the current selection, leaving its first
    /// placeholder selected.
    fn insert_at_placeholder(&mut self, snippet: &str);
}

/// What an accepted formula did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// An existing formula was rewritten; `text` is the new line.
    Replaced { line: usize, text: String },
    /// A new formula was added at the cursor; `text` is the new line.
    Inserted { line: usize, text: String },
}

#[derive(Debug)]
pub enum AcceptOutcome {
    /// The formula is in the document. `history` tells whether the recent
    /// list was saved; the edit stands regardless.
    Applied { edit: Edit, history: Result<()> },
    /// The formula being edited is no longer in its line. Nothing changed.
    Stale { line: usize },
}

/// One round of editing a formula: opened at the cursor, seeded into the
/// editor, then accepted or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaSession {
    mode: MathMode,
    original: Option<MathSpan>,
}

impl FormulaSession {
    /// Start a session at the document's cursor. A formula under the cursor
    /// turns the session into an edit of that formula and decides the mode;
    /// otherwise `requested` is used and accepting inserts a new formula.
    pub fn open<D: HostDocument + ?Sized>(document: &D, requested: MathMode) -> Self {
        let cursor = document.cursor();
        let detection = document
            .line_text(cursor.line)
            .map(|line| locate(&line, cursor.column))
            .unwrap_or(Detection::NotFound);

        match detection {
            Detection::Found(span) => FormulaSession {
                mode: span.kind,
                original: Some(span),
            },
            Detection::NotFound => FormulaSession {
                mode: requested,
                original: None,
            },
        }
    }

    pub fn mode(&self) -> MathMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MathMode) {
        self.mode = mode;
    }

    pub fn original(&self) -> Option<&MathSpan> {
        self.original.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    /// Content the editor starts with: the existing formula, or nothing.
    pub fn seed(&self) -> &str {
        self.original.as_ref().map_or("", |span| span.content.as_str())
    }

    pub fn on_seed<W: MathField + ?Sized>(&self, field: &mut W) {
        let seed = self.seed();
        if !seed.is_empty() {
            field.set_value(seed);
        }
    }

    pub fn insert_template<W: MathField + ?Sized>(&self, field: &mut W, template: &Template) {
        field.insert_at_placeholder(template.latex);
    }

    /// Load a formula picked from the recent history into the editor,
    /// replacing whatever it holds.
    pub fn use_recent<W: MathField + ?Sized>(&self, field: &mut W, formula: &str) {
        field.set_value(formula);
    }

    /// Write `latex` into the document at the current cursor line.
    ///
    /// A blank formula is refused with [`Error::EmptyInput`] and leaves the
    /// session open. On success the formula is also added to the recent
    /// history.
    pub fn on_accept<D, S>(
        &self,
        document: &mut D,
        latex: &str,
        studio: &mut Studio<S>,
    ) -> Result<AcceptOutcome>
    where
        D: HostDocument + ?Sized,
        S: SettingsStore,
    {
        if latex.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let cursor = document.cursor();
        let line = document
            .line_text(cursor.line)
            .ok_or(Error::LineOutOfRange { line: cursor.line })?;

        let edit = match &self.original {
            Some(original) => match replace(&line, original, latex, self.mode) {
                Replacement::Updated(text) => {
                    document.set_line_text(cursor.line, &text)?;
                    Edit::Replaced {
                        line: cursor.line,
                        text,
                    }
                }
                Replacement::Stale(_) => {
                    return Ok(AcceptOutcome::Stale { line: cursor.line });
                }
            },
            None => {
                let text = insert_at(&line, cursor.column, latex, self.mode);
                document.set_line_text(cursor.line, &text)?;
                Edit::Inserted {
                    line: cursor.line,
                    text,
                }
            }
        };

        tracing::info!(mode = %self.mode, "formula accepted on line {}", cursor.line);
        let history = studio.record_formula(latex).map(|_| ());
        Ok(AcceptOutcome::Applied { edit, history })
    }

    /// Read the editor's value and accept it.
    pub fn accept_field<D, S, W>(
        &self,
        document: &mut D,
        field: &W,
        studio: &mut Studio<S>,
    ) -> Result<AcceptOutcome>
    where
        D: HostDocument + ?Sized,
        S: SettingsStore,
        W: MathField + ?Sized,
    {
        self.on_accept(document, &field.value(), studio)
    }

    pub fn on_cancel(self) {
        tracing::debug!("formula session cancelled");
    }
}
