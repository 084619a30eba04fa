//! Tests for the terminal painter.

use super::*;
use crate::engine::{EngineOptions, Layout, RenderOutput, RenderRequest, render};

fn painter(width: usize) -> TerminalPainter {
    TerminalPainter::new(PainterConfig::default().with_width(width))
}

fn scenario_b(split: bool, fold: bool) -> RenderOutput {
    render(
        &RenderRequest::new("a\nb\nc", "txt")
            .with_next("a\nx\nc")
            .with_split(split)
            .with_fold(fold),
        &EngineOptions::default(),
    )
    .unwrap()
    .output()
}

fn texts(lines: &[StyledLine]) -> Vec<String> {
    lines.iter().map(StyledLine::text).collect()
}

#[test]
fn test_header_shows_stats_and_toggle() {
    let lines = painter(40).paint(&scenario_b(false, false));
    assert_eq!(lines[0].text(), "  +1 -1  [t] Split");
}

#[test]
fn test_header_with_label() {
    let output = render(
        &RenderRequest::new("a", "txt").with_label("demo.txt"),
        &EngineOptions::default(),
    )
    .unwrap()
    .output();
    let lines = painter(40).paint(&output);
    assert_eq!(lines[0].text(), "demo.txt");
    assert!(lines[0].segments[0].bold);
}

#[test]
fn test_unified_rows() {
    let lines = painter(40).paint(&scenario_b(false, false));
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1].text(), "   1    1  a");
    assert!(lines[2].text().starts_with("   2      -b"));
    assert!(lines[3].text().starts_with("        2 +x"));
    // Changed rows are filled to the terminal width.
    assert_eq!(lines[2].width(), 40);
    let theme = ThemeColors::default();
    assert_eq!(lines[2].segments.last().unwrap().bg, theme.row_background(crate::engine::RowRole::Removed));
}

#[test]
fn test_split_rows_have_aligned_divider() {
    // half width 48: gutter 5, marker 1, content 42
    let lines = painter(100).paint(&scenario_b(true, false));
    for line in &lines[1..] {
        assert_eq!(line.text().find(" | "), Some(48), "{:?}", line.text());
    }
    assert!(lines[2].text().starts_with("   2 -b"));
    assert!(lines[2].text().trim_end().ends_with('|'));
    assert!(lines[3].text().trim_end().ends_with("   2 +x"));
}

#[test]
fn test_narrow_split_uses_one_column() {
    let output = scenario_b(true, false);
    assert_eq!(output.layout, Layout::Split);
    let painter = painter(60);
    assert!(!painter.use_side_by_side(output.layout));
    let lines = painter.paint(&output);
    assert!(lines.iter().all(|l| !l.text().contains(" | ")));
    assert_eq!(lines[1].text(), "   1    1  a");
}

#[test]
fn test_fold_rows() {
    let lines = painter(40).paint(&scenario_b(false, true));
    let all = texts(&lines);
    assert_eq!(all[1], "           ⋯ 1 unchanged line");
    assert_eq!(all[4], "           ⋯ 1 unchanged line");
    assert!(lines[1].segments.last().unwrap().italic);
}

#[test]
fn test_single_text_has_no_gutter_or_markers() {
    let output = render(&RenderRequest::new("a\nb\nc", "txt"), &EngineOptions::default())
        .unwrap()
        .output();
    let lines = painter(40).paint(&output);
    assert_eq!(texts(&lines), vec!["a", "b", "c"]);
}

#[test]
fn test_line_numbers_can_be_disabled() {
    let config = PainterConfig {
        show_line_numbers: false,
        ..PainterConfig::default()
    };
    let lines = TerminalPainter::new(config).paint(&scenario_b(false, false));
    assert_eq!(lines[1].text(), " a");
}

#[test]
fn test_split_cells_are_truncated() {
    let output = render(
        &RenderRequest::new("short", "txt")
            .with_next("a much longer line than fits")
            .with_split(true),
        &EngineOptions::default(),
    )
    .unwrap()
    .output();
    let config = PainterConfig {
        width: 40,
        side_by_side_min_width: 40,
        ..PainterConfig::default()
    };
    let lines = TerminalPainter::new(config).paint(&output);
    let added = lines[2].text();
    // half width 18, gutter 5, marker 1, content 12
    assert!(added.ends_with("+a much long~"), "{added:?}");
}

#[test]
fn test_empty_output_paints_only_header() {
    let output = render(&RenderRequest::new("", "txt").with_next(""), &EngineOptions::default())
        .unwrap()
        .output();
    assert!(output.rows.is_empty());
    let lines = painter(40).paint(&output);
    assert_eq!(lines.len(), 1);
}
