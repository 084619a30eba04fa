//! Diff-and-highlight rendering engine.
//!
//! Turns one or two versions of a code snippet into a flat list of
//! [`RenderRow`]s for a host surface to paint.
//!
//! # Module Structure
//!
//! - [`types`]: Shared data types: `SourceText`, `AlignmentEntry`, `Token`,
//!   `FoldMarker`, `RenderRow`, `Layout`.
//! - [`grammar`]: Static language table used by the tokenizer.
//! - [`tokenizer`]: Per-line lexical highlighter with a plain fallback.
//! - [`differ`]: Myers line diff with delete-before-insert ordering.
//! - [`fold`]: Collapses unchanged runs into fold markers.
//! - [`builder`]: `PreparedDocument` and the layout-specific row builder.
//! - [`view`]: `CodeView`: the layout state cell and its toggle.
//!
//! The pipeline runs synchronously inside [`render`]: diff, fold, tokenize,
//! then hand the prepared document to a [`CodeView`]. Toggling the view's
//! layout only regroups cached rows.

pub mod builder;
pub mod differ;
pub mod fold;
pub mod grammar;
pub mod tokenizer;
pub mod types;
pub mod view;

pub use builder::{PreparedDocument, build_rows};
pub use differ::diff_lines;
pub use fold::{FoldOptions, fold};
pub use tokenizer::{Highlighter, TokenizeError, tokenize, tokenize_or_plain};
pub use types::*;
pub use view::{CodeView, RenderOutput};

use snippet_diff_config::Config;
use std::fmt;
use std::sync::Arc;

/// Which input text a capacity error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    Current,
    Next,
}

impl fmt::Display for InputSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSide::Current => write!(f, "current"),
            InputSide::Next => write!(f, "next"),
        }
    }
}

/// Errors that reject a render request up front.
///
/// Tokenizer failures never show up here; they degrade to plain tokens.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no language identifier given")]
    MissingLanguage,

    #[error(
        "{side} text is too large ({lines} lines, {bytes} bytes; limit {max_lines} lines, {max_bytes} bytes)"
    )]
    InputTooLarge {
        side: InputSide,
        lines: usize,
        bytes: usize,
        max_lines: usize,
        max_bytes: usize,
    },
}

/// Engine limits and folding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Unchanged lines kept next to each change when folding.
    pub context_lines: usize,
    /// Per-side line limit.
    pub max_lines: usize,
    /// Per-side byte limit.
    pub max_bytes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            context_lines: config.fold_context_lines,
            max_lines: config.max_lines,
            max_bytes: config.max_bytes,
        }
    }

    fn check(&self, side: InputSide, text: &SourceText) -> Result<(), EngineError> {
        let lines = text.line_count();
        let bytes = text.text().len();
        if lines > self.max_lines || bytes > self.max_bytes {
            return Err(EngineError::InputTooLarge {
                side,
                lines,
                bytes,
                max_lines: self.max_lines,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// What the host asks the engine to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub current_text: String,
    /// Second version; `None` renders `current_text` alone without a toggle.
    pub next_text: Option<String>,
    pub language: String,
    /// Start in split layout (only honoured with a `next_text`).
    pub initial_split: bool,
    /// Fold unchanged regions (only meaningful with a `next_text`).
    pub fold_unchanged: bool,
    /// Header label, usually a file name.
    pub file_label: Option<String>,
}

impl RenderRequest {
    pub fn new(current_text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_next(mut self, next_text: impl Into<String>) -> Self {
        self.next_text = Some(next_text.into());
        self
    }

    pub fn with_split(mut self, split: bool) -> Self {
        self.initial_split = split;
        self
    }

    pub fn with_fold(mut self, fold: bool) -> Self {
        self.fold_unchanged = fold;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.file_label = Some(label.into());
        self
    }
}

/// Run the pipeline for `request` and return a view over the result.
pub fn render(request: &RenderRequest, options: &EngineOptions) -> Result<CodeView, EngineError> {
    let language = request.language.trim();
    if language.is_empty() {
        return Err(EngineError::MissingLanguage);
    }

    let current = SourceText::new(request.current_text.as_str(), language);
    options.check(InputSide::Current, &current)?;
    let next = request
        .next_text
        .as_deref()
        .map(|text| SourceText::new(text, language));
    if let Some(next) = &next {
        options.check(InputSide::Next, next)?;
    }

    let highlighter = Highlighter::for_language(language);
    let doc = match &next {
        Some(next) => PreparedDocument::diff(
            &current,
            next,
            &highlighter,
            FoldOptions::new(request.fold_unchanged, options.context_lines),
        ),
        None => PreparedDocument::single(&current, &highlighter),
    };

    let layout = if request.initial_split && doc.has_diff() {
        Layout::Split
    } else {
        Layout::Unified
    };
    log::info!(
        "Rendered {} snippet ({}, {} entries, layout {})",
        doc.grammar_name(),
        if doc.has_diff() { "diff" } else { "single" },
        doc.entries().len(),
        layout.label()
    );
    Ok(CodeView::new(
        Arc::new(doc),
        layout,
        request.file_label.clone(),
    ))
}
