//! Core data types for the diff-and-highlight engine.

use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Source text
// ---------------------------------------------------------------------------

/// An immutable text blob tagged with the language used to highlight it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    language: String,
}

impl SourceText {
    /// Create a source text. The text is stored verbatim.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The language identifier (e.g. "ts", "json").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Line slices split on `\n`.
    ///
    /// A trailing empty line is kept (`"a\n"` has two lines) and the empty
    /// string has none, so joining the result with `\n` gives back the text.
    pub fn line_slices(&self) -> Vec<&str> {
        if self.text.is_empty() {
            Vec::new()
        } else {
            self.text.split('\n').collect()
        }
    }

    /// Owned, indexed lines.
    pub fn lines(&self) -> Vec<Line> {
        self.line_slices()
            .into_iter()
            .enumerate()
            .map(|(index, text)| Line {
                index,
                text: text.to_string(),
            })
            .collect()
    }

    /// Number of lines (see [`SourceText::line_slices`]).
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.bytes().filter(|&b| b == b'\n').count() + 1
        }
    }
}

/// A single line of a [`SourceText`]. Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// 0-based index within its side.
    pub index: usize,
    /// Raw text without the newline.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Classification of one aligned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Present unchanged on both sides.
    Same,
    /// Only on the new side.
    Added,
    /// Only on the old side.
    Removed,
}

/// One step of a line alignment between an old and a new text.
///
/// A replaced line is a `Removed` entry followed by an `Added` entry; there
/// is no combined variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AlignmentEntry {
    status: LineStatus,
    old: Option<usize>,
    new: Option<usize>,
}

impl AlignmentEntry {
    /// An unchanged line present at `old` and `new`.
    pub fn same(old: usize, new: usize) -> Self {
        Self {
            status: LineStatus::Same,
            old: Some(old),
            new: Some(new),
        }
    }

    /// A line only present in the old text.
    pub fn removed(old: usize) -> Self {
        Self {
            status: LineStatus::Removed,
            old: Some(old),
            new: None,
        }
    }

    /// A line only present in the new text.
    pub fn added(new: usize) -> Self {
        Self {
            status: LineStatus::Added,
            old: None,
            new: Some(new),
        }
    }

    pub fn status(&self) -> LineStatus {
        self.status
    }

    /// 0-based index into the old lines, if this entry has an old side.
    pub fn old_index(&self) -> Option<usize> {
        self.old
    }

    /// 0-based index into the new lines, if this entry has a new side.
    pub fn new_index(&self) -> Option<usize> {
        self.new
    }

    pub fn is_change(&self) -> bool {
        self.status != LineStatus::Same
    }
}

/// Counts of each [`LineStatus`] in an alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub same: usize,
}

impl DiffStats {
    /// Tally the statuses of `entries`.
    pub fn from_entries(entries: &[AlignmentEntry]) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            match entry.status {
                LineStatus::Same => stats.same += 1,
                LineStatus::Added => stats.added += 1,
                LineStatus::Removed => stats.removed += 1,
            }
        }
        stats
    }

    pub fn has_changes(&self) -> bool {
        self.added + self.removed > 0
    }
}

// ---------------------------------------------------------------------------
// Folding
// ---------------------------------------------------------------------------

/// Placeholder for a run of unchanged lines hidden from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoldMarker {
    /// Number of folded lines (always at least one).
    pub count: usize,
    /// 1-based old line number of the first folded line.
    pub old_start: usize,
    /// 1-based new line number of the first folded line.
    pub new_start: usize,
}

impl FoldMarker {
    /// Folded old line numbers (1-based, half-open).
    pub fn old_range(&self) -> Range<usize> {
        self.old_start..self.old_start + self.count
    }

    /// Folded new line numbers (1-based, half-open).
    pub fn new_range(&self) -> Range<usize> {
        self.new_start..self.new_start + self.count
    }
}

/// Output of the fold reducer: an alignment entry or a fold marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldedEntry {
    Entry(AlignmentEntry),
    Fold(FoldMarker),
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Style class of a token, mapped to colors by the host's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Keyword,
    Builtin,
    String,
    Number,
    Comment,
    Punctuation,
    Operator,
    Whitespace,
    Plain,
}

/// A labeled, non-empty span of one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn new(text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

/// Concatenate the text of a token run.
pub fn tokens_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Layout and rows
// ---------------------------------------------------------------------------

/// Arrangement of a diff on the host surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Old and new text in two aligned columns.
    Split,
    /// One interleaved column.
    #[default]
    Unified,
}

impl Layout {
    /// The other layout.
    pub fn toggled(self) -> Self {
        match self {
            Layout::Split => Layout::Unified,
            Layout::Unified => Layout::Split,
        }
    }

    /// Display name ("Split" / "Unified").
    pub fn label(self) -> &'static str {
        match self {
            Layout::Split => "Split",
            Layout::Unified => "Unified",
        }
    }
}

/// Visual role of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowRole {
    Context,
    Added,
    Removed,
    Fold,
}

impl From<LineStatus> for RowRole {
    fn from(status: LineStatus) -> Self {
        match status {
            LineStatus::Same => RowRole::Context,
            LineStatus::Added => RowRole::Added,
            LineStatus::Removed => RowRole::Removed,
        }
    }
}

/// One side of a split row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// 1-based line number on this side.
    pub line_number: usize,
    pub tokens: Arc<[Token]>,
}

/// A row of the unified layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedRow {
    pub role: RowRole,
    /// 1-based old line number (absent for added lines).
    pub old_line: Option<usize>,
    /// 1-based new line number (absent for removed lines).
    pub new_line: Option<usize>,
    pub tokens: Arc<[Token]>,
}

/// A row of the split layout. A missing cell is painted as a blank gutter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitRow {
    pub role: RowRole,
    pub left: Option<Cell>,
    pub right: Option<Cell>,
}

/// The unit a host surface paints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderRow {
    Unified(UnifiedRow),
    Split(SplitRow),
    Fold(FoldMarker),
}

impl RenderRow {
    pub fn role(&self) -> RowRole {
        match self {
            RenderRow::Unified(row) => row.role,
            RenderRow::Split(row) => row.role,
            RenderRow::Fold(_) => RowRole::Fold,
        }
    }

    pub fn is_fold_marker(&self) -> bool {
        matches!(self, RenderRow::Fold(_))
    }

    /// Number of lines hidden behind this row, for fold markers.
    pub fn folded_count(&self) -> Option<usize> {
        match self {
            RenderRow::Fold(marker) => Some(marker.count),
            _ => None,
        }
    }

    pub fn old_line_number(&self) -> Option<usize> {
        match self {
            RenderRow::Unified(row) => row.old_line,
            RenderRow::Split(row) => row.left.as_ref().map(|c| c.line_number),
            RenderRow::Fold(_) => None,
        }
    }

    pub fn new_line_number(&self) -> Option<usize> {
        match self {
            RenderRow::Unified(row) => row.new_line,
            RenderRow::Split(row) => row.right.as_ref().map(|c| c.line_number),
            RenderRow::Fold(_) => None,
        }
    }

    /// Tokens rendered for the old side, if the row has one.
    pub fn old_tokens(&self) -> Option<&[Token]> {
        match self {
            RenderRow::Unified(row) if row.old_line.is_some() => Some(&row.tokens),
            RenderRow::Split(row) => row.left.as_ref().map(|c| &*c.tokens),
            _ => None,
        }
    }

    /// Tokens rendered for the new side, if the row has one.
    pub fn new_tokens(&self) -> Option<&[Token]> {
        match self {
            RenderRow::Unified(row) if row.new_line.is_some() => Some(&row.tokens),
            RenderRow::Split(row) => row.right.as_ref().map(|c| &*c.tokens),
            _ => None,
        }
    }
}

/// Rebuild the old-side text from rows, skipping fold markers.
pub fn reconstruct_old(rows: &[RenderRow]) -> String {
    rows.iter()
        .filter_map(|r| r.old_tokens().map(tokens_text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rebuild the new-side text from rows, skipping fold markers.
pub fn reconstruct_new(rows: &[RenderRow]) -> String {
    rows.iter()
        .filter_map(|r| r.new_tokens().map(tokens_text))
        .collect::<Vec<_>>()
        .join("\n")
}
