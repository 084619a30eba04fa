//! Render model builder.
//!
//! [`PreparedDocument`] holds everything the expensive part of the pipeline
//! produces: the alignment, the folded alignment and one token run per line
//! and side. [`build_rows`] only regroups those cached pieces for a layout,
//! so switching layouts never re-diffs or re-tokenizes.

use super::differ::diff_lines;
use super::fold::{FoldOptions, fold};
use super::tokenizer::Highlighter;
use super::types::{
    AlignmentEntry, Cell, DiffStats, FoldedEntry, Layout, LineStatus, RenderRow, RowRole,
    SourceText, SplitRow, Token, UnifiedRow,
};
use std::sync::Arc;

/// Diffed, folded and tokenized input, ready to be laid out.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    entries: Vec<AlignmentEntry>,
    folded: Vec<FoldedEntry>,
    old_tokens: Vec<Arc<[Token]>>,
    new_tokens: Vec<Arc<[Token]>>,
    stats: DiffStats,
    has_diff: bool,
    grammar_name: &'static str,
    highlight_fallback: bool,
}

impl PreparedDocument {
    /// Prepare a single text: every line is context, nothing is folded.
    pub fn single(text: &SourceText, highlighter: &Highlighter) -> Self {
        let tokens = tokenize_side(text, highlighter);
        let entries: Vec<AlignmentEntry> =
            (0..tokens.len()).map(|i| AlignmentEntry::same(i, i)).collect();
        Self {
            folded: entries.iter().copied().map(FoldedEntry::Entry).collect(),
            stats: DiffStats::from_entries(&entries),
            entries,
            old_tokens: tokens.clone(),
            new_tokens: tokens,
            has_diff: false,
            grammar_name: highlighter.grammar_name(),
            highlight_fallback: highlighter.is_fallback(),
        }
    }

    /// Diff `old` against `new`, fold the alignment and tokenize both sides.
    pub fn diff(
        old: &SourceText,
        new: &SourceText,
        highlighter: &Highlighter,
        fold_options: FoldOptions,
    ) -> Self {
        let entries = diff_lines(&old.line_slices(), &new.line_slices());
        let stats = DiffStats::from_entries(&entries);
        log::debug!(
            "Diffed {} -> {} lines: +{} -{} ={}",
            old.line_count(),
            new.line_count(),
            stats.added,
            stats.removed,
            stats.same
        );
        crate::debug_trace!("DIFF", "alignment has {} entries", entries.len());
        Self {
            folded: fold(&entries, fold_options),
            entries,
            old_tokens: tokenize_side(old, highlighter),
            new_tokens: tokenize_side(new, highlighter),
            stats,
            has_diff: true,
            grammar_name: highlighter.grammar_name(),
            highlight_fallback: highlighter.is_fallback(),
        }
    }

    /// The unfolded alignment.
    pub fn entries(&self) -> &[AlignmentEntry] {
        &self.entries
    }

    /// The alignment after folding.
    pub fn folded(&self) -> &[FoldedEntry] {
        &self.folded
    }

    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Whether a second text was supplied.
    pub fn has_diff(&self) -> bool {
        self.has_diff
    }

    /// Display name of the grammar used for highlighting.
    pub fn grammar_name(&self) -> &'static str {
        self.grammar_name
    }

    /// Whether the language was unknown and lines were rendered plain.
    pub fn highlight_fallback(&self) -> bool {
        self.highlight_fallback
    }

    pub fn old_line_count(&self) -> usize {
        self.old_tokens.len()
    }

    pub fn new_line_count(&self) -> usize {
        self.new_tokens.len()
    }
}

fn tokenize_side(text: &SourceText, highlighter: &Highlighter) -> Vec<Arc<[Token]>> {
    text.line_slices()
        .into_iter()
        .map(|line| Arc::from(highlighter.highlight(line)))
        .collect()
}

fn side_tokens(tokens: &[Arc<[Token]>], index: Option<usize>) -> Option<Arc<[Token]>> {
    index.and_then(|i| tokens.get(i)).cloned()
}

fn cell(tokens: &[Arc<[Token]>], index: Option<usize>) -> Option<Cell> {
    let i = index?;
    Some(Cell {
        line_number: i + 1,
        tokens: tokens.get(i)?.clone(),
    })
}

fn unified_row(doc: &PreparedDocument, entry: &AlignmentEntry) -> RenderRow {
    let tokens = match entry.status() {
        LineStatus::Removed => side_tokens(&doc.old_tokens, entry.old_index()),
        // Same lines are identical on both sides; show the new-side run.
        LineStatus::Added | LineStatus::Same => side_tokens(&doc.new_tokens, entry.new_index()),
    };
    RenderRow::Unified(UnifiedRow {
        role: RowRole::from(entry.status()),
        old_line: entry.old_index().map(|i| i + 1),
        new_line: entry.new_index().map(|i| i + 1),
        tokens: tokens.unwrap_or_default(),
    })
}

fn split_row(doc: &PreparedDocument, entry: &AlignmentEntry) -> RenderRow {
    RenderRow::Split(SplitRow {
        role: RowRole::from(entry.status()),
        left: cell(&doc.old_tokens, entry.old_index()),
        right: cell(&doc.new_tokens, entry.new_index()),
    })
}

/// Lay out `doc` as rows for `layout`.
///
/// One row per folded entry in both layouts; fold markers pass through.
pub fn build_rows(doc: &PreparedDocument, layout: Layout) -> Vec<RenderRow> {
    doc.folded
        .iter()
        .map(|item| match item {
            FoldedEntry::Fold(marker) => RenderRow::Fold(*marker),
            FoldedEntry::Entry(entry) => match layout {
                Layout::Unified => unified_row(doc, entry),
                Layout::Split => split_row(doc, entry),
            },
        })
        .collect()
}
