//! View controller: the split/unified state cell of one display instance.

use super::builder::{PreparedDocument, build_rows};
use super::types::{DiffStats, Layout, RenderRow};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// Everything a host surface needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub rows: Vec<RenderRow>,
    pub layout: Layout,
    /// Offer the split/unified toggle (true iff a second text was given).
    pub has_diff_toggle: bool,
    /// Draw the line-number gutter.
    pub show_line_numbers: bool,
    /// Caption of the toggle control: the layout it switches to.
    pub toggle_label: Option<&'static str>,
    pub file_label: Option<String>,
    /// Grammar used for highlighting.
    pub language: &'static str,
    pub stats: DiffStats,
}

/// A rendered snippet plus its layout state.
///
/// The prepared document is immutable and shared; only the layout changes,
/// and only through [`CodeView::toggle_layout`].
#[derive(Debug)]
pub struct CodeView {
    doc: Arc<PreparedDocument>,
    layout: RwLock<Layout>,
    file_label: Option<String>,
}

impl CodeView {
    /// Wrap `doc`. Without a diff the layout is pinned to unified.
    pub fn new(doc: Arc<PreparedDocument>, initial: Layout, file_label: Option<String>) -> Self {
        let layout = if doc.has_diff() {
            initial
        } else {
            Layout::Unified
        };
        Self {
            doc,
            layout: RwLock::new(layout),
            file_label,
        }
    }

    /// Flip between split and unified and return the new layout.
    ///
    /// A view without a diff has nothing to toggle and stays unified.
    pub fn toggle_layout(&self) -> Layout {
        if !self.doc.has_diff() {
            return Layout::Unified;
        }
        let mut layout = self.layout.write();
        *layout = layout.toggled();
        log::debug!("Layout toggled to {}", layout.label());
        *layout
    }

    pub fn current_layout(&self) -> Layout {
        *self.layout.read()
    }

    pub fn has_diff_toggle(&self) -> bool {
        self.doc.has_diff()
    }

    pub fn document(&self) -> &PreparedDocument {
        &self.doc
    }

    pub fn file_label(&self) -> Option<&str> {
        self.file_label.as_deref()
    }

    /// Rows for the current layout, rebuilt from the cached document.
    pub fn rows(&self) -> Vec<RenderRow> {
        build_rows(&self.doc, self.current_layout())
    }

    /// Rows plus the flags the host needs, all read against one layout value.
    pub fn output(&self) -> RenderOutput {
        let layout = self.current_layout();
        let has_diff = self.doc.has_diff();
        RenderOutput {
            rows: build_rows(&self.doc, layout),
            layout,
            has_diff_toggle: has_diff,
            show_line_numbers: has_diff,
            toggle_label: has_diff.then(|| layout.toggled().label()),
            file_label: self.file_label.clone(),
            language: self.doc.grammar_name(),
            stats: self.doc.stats(),
        }
    }
}
