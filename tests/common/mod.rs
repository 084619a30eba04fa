//! Shared integration test helpers for snippet-diff.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{diff, rows_of};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per test binary.

#![allow(dead_code)]

use snippet_diff::engine::{
    CodeView, EngineOptions, Layout, RenderRequest, RenderRow, RowRole, render,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Render `current` alone.
pub fn single(current: &str, language: &str) -> CodeView {
    render(&RenderRequest::new(current, language), &EngineOptions::default())
        .expect("single render should succeed")
}

/// Render a diff of `current` against `next`.
pub fn diff(current: &str, next: &str, language: &str, fold: bool) -> CodeView {
    render(
        &RenderRequest::new(current, language)
            .with_next(next)
            .with_fold(fold),
        &EngineOptions::default(),
    )
    .expect("diff render should succeed")
}

/// Rows of `view` in `layout`, toggling as needed and restoring the layout.
pub fn rows_of(view: &CodeView, layout: Layout) -> Vec<RenderRow> {
    let original = view.current_layout();
    if original != layout {
        view.toggle_layout();
    }
    let rows = view.rows();
    if view.current_layout() != original {
        view.toggle_layout();
    }
    rows
}

pub fn roles(rows: &[RenderRow]) -> Vec<RowRole> {
    rows.iter().map(RenderRow::role).collect()
}

/// Write `files` into a fresh temp dir and return their paths.
pub fn write_files(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let paths = files
        .iter()
        .map(|(name, contents)| {
            let path = dir.path().join(name);
            fs::write(&path, contents).expect("Failed to write fixture");
            path
        })
        .collect();
    (dir, paths)
}
