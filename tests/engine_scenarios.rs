//! End-to-end engine scenarios and invariants.

mod common;

use common::{diff, roles, rows_of, single};
use snippet_diff::engine::{
    AlignmentEntry, Layout, LineStatus, RenderRow, RowRole, TokenClass, diff_lines,
    reconstruct_new, reconstruct_old, tokenize, tokenize_or_plain, tokens_text,
};
use std::collections::HashMap;

// -- Scenarios --

#[test]
fn scenario_a_single_text() {
    let view = single("a\nb\nc", "ts");
    let output = view.output();
    assert_eq!(output.rows.len(), 3);
    assert!(output.rows.iter().all(|r| r.role() == RowRole::Context));
    assert!(!output.has_diff_toggle);
    assert!(!output.show_line_numbers);
    assert_eq!(output.layout, Layout::Unified);
}

#[test]
fn scenario_b_replacement() {
    let entries = diff_lines(&["a", "b", "c"], &["a", "x", "c"]);
    assert_eq!(
        entries,
        vec![
            AlignmentEntry::same(0, 0),
            AlignmentEntry::removed(1),
            AlignmentEntry::added(1),
            AlignmentEntry::same(2, 2),
        ]
    );

    let view = diff("a\nb\nc", "a\nx\nc", "ts", false);
    let unified = rows_of(&view, Layout::Unified);
    assert_eq!(unified.len(), 4);
    assert_eq!(
        roles(&unified),
        vec![RowRole::Context, RowRole::Removed, RowRole::Added, RowRole::Context]
    );

    let split = rows_of(&view, Layout::Split);
    assert_eq!(split.len(), 4);
    let RenderRow::Split(row2) = &split[1] else {
        panic!("expected split row");
    };
    assert!(row2.left.is_some() && row2.right.is_none());
    let RenderRow::Split(row3) = &split[2] else {
        panic!("expected split row");
    };
    assert!(row3.left.is_none() && row3.right.is_some());
}

#[test]
fn scenario_c_fold_single_unchanged_lines() {
    let view = diff("a\nb\nc", "a\nx\nc", "ts", true);
    let rows = view.rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].folded_count(), Some(1));
    assert_eq!(rows[1].role(), RowRole::Removed);
    assert_eq!(rows[2].role(), RowRole::Added);
    assert_eq!(rows[3].folded_count(), Some(1));
}

#[test]
fn scenario_d_empty_inputs() {
    let view = diff("", "", "ts", false);
    assert!(view.rows().is_empty());
    assert!(rows_of(&view, Layout::Split).is_empty());

    assert!(single("", "ts").rows().is_empty());
}

#[test]
fn scenario_e_unknown_language() {
    assert!(tokenize("let x = 1;", "klingon").is_err());

    let view = diff("let a = 1;\nlet b = 2;", "let a = 1;\nlet b = 3;", "klingon", false);
    let rows = view.rows();
    for row in &rows {
        for tokens in [row.old_tokens(), row.new_tokens()].into_iter().flatten() {
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].class, TokenClass::Plain);
        }
    }
    let known = diff("let a = 1;\nlet b = 2;", "let a = 1;\nlet b = 3;", "ts", false);
    assert_eq!(roles(&rows), roles(&known.rows()));
    assert!(view.document().highlight_fallback());
}

// -- Properties --

const SAMPLES: &[(&str, &str, &str)] = &[
    (
        "fn main() {\n    println!(\"hi\");\n}\n",
        "fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}\n",
        "rs",
    ),
    (
        "{\n  \"a\": 1,\n  \"b\": [true, null]\n}",
        "{\n  \"a\": 2,\n  \"b\": [true, null],\n  \"c\": \"d\"\n}",
        "json",
    ),
    (
        "import x from 'y'\n/* open\nconst s = `t`\n",
        "import x from \"y\"\nconst s = `t`\n\n",
        "ts",
    ),
    ("same\nsame\nsame", "same\nsame", "txt"),
    ("", "only new\nlines", "py"),
    ("gone\n", "", "sh"),
    ("a\r\nb\r\n", "a\r\nB\r\n", "yaml"),
];

#[test]
fn tokens_round_trip_every_line() {
    for (old, new, lang) in SAMPLES {
        for line in old.split('\n').chain(new.split('\n')) {
            let tokens = tokenize_or_plain(line, lang);
            assert_eq!(tokens_text(&tokens), line);
            assert!(tokens.iter().all(|t| !t.text.is_empty()));
        }
    }
}

#[test]
fn rows_reconstruct_both_texts() {
    for (old, new, lang) in SAMPLES {
        let view = diff(old, new, lang, false);
        for layout in [Layout::Unified, Layout::Split] {
            let rows = rows_of(&view, layout);
            assert_eq!(&reconstruct_old(&rows), old, "old side, {layout:?}, {lang}");
            assert_eq!(&reconstruct_new(&rows), new, "new side, {layout:?}, {lang}");
        }
    }
}

#[test]
fn build_rows_is_idempotent() {
    for (old, new, lang) in SAMPLES {
        let view = diff(old, new, lang, true);
        assert_eq!(view.rows(), view.rows());
    }
}

#[test]
fn classification_is_layout_invariant() {
    fn counts(rows: &[RenderRow]) -> HashMap<RowRole, usize> {
        let mut counts = HashMap::new();
        for row in rows {
            *counts.entry(row.role()).or_insert(0) += 1;
        }
        counts
    }
    for (old, new, lang) in SAMPLES {
        for fold in [false, true] {
            let view = diff(old, new, lang, fold);
            let unified = counts(&rows_of(&view, Layout::Unified));
            let split = counts(&rows_of(&view, Layout::Split));
            assert_eq!(unified, split);
        }
    }
}

#[test]
fn fold_accounting_and_adjacency() {
    for (old, new, lang) in SAMPLES {
        let view = diff(old, new, lang, true);
        let rows = view.rows();
        let entries = view.document().entries().len();
        let accounted: usize = rows.iter().map(|r| r.folded_count().unwrap_or(1)).sum();
        assert_eq!(accounted, entries);
        assert!(
            rows.windows(2)
                .all(|w| !(w[0].is_fold_marker() && w[1].is_fold_marker()))
        );
    }
}

#[test]
fn toggle_never_changes_classification() {
    let view = diff("a\nb\nc\nd", "a\nc\nd\ne", "txt", false);
    let before = view.document().stats();
    let first = roles(&view.rows());
    view.toggle_layout();
    view.toggle_layout();
    assert_eq!(roles(&view.rows()), first);
    assert_eq!(view.document().stats(), before);
}

#[test]
fn changed_lines_use_removed_before_added() {
    let entries = diff_lines(&["keep", "old1", "old2"], &["keep", "new1", "new2"]);
    let statuses: Vec<_> = entries.iter().map(|e| e.status()).collect();
    assert_eq!(
        statuses,
        vec![
            LineStatus::Same,
            LineStatus::Removed,
            LineStatus::Removed,
            LineStatus::Added,
            LineStatus::Added
        ]
    );
}
