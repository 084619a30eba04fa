//! Helper functions for gutters, line numbers, and cell truncation.

use super::theme::ThemeColors;
use super::types::StyledSegment;
use unicode_segmentation::UnicodeSegmentation;

/// Width of one line-number column including its trailing space.
pub(super) const LINE_NUM_WIDTH: usize = 5;

/// Old and new line number gutter for unified rows.
pub(super) fn gutter_segment(
    old: Option<usize>,
    new: Option<usize>,
    theme: &ThemeColors,
) -> StyledSegment {
    let old_str = old
        .map(|n| format!("{n:>4}"))
        .unwrap_or_else(|| "    ".to_string());
    let new_str = new
        .map(|n| format!("{n:>4}"))
        .unwrap_or_else(|| "    ".to_string());
    StyledSegment {
        text: format!("{old_str} {new_str} "),
        fg: Some(theme.dim()),
        ..Default::default()
    }
}

/// Width of [`gutter_segment`] output.
pub(super) const GUTTER_WIDTH: usize = 2 * LINE_NUM_WIDTH;

/// Single line number column for one side of a split row.
pub(super) fn line_num_segment(num: Option<usize>, theme: &ThemeColors) -> StyledSegment {
    let width = LINE_NUM_WIDTH - 1;
    let text = num
        .map(|n| format!("{n:>width$} "))
        .unwrap_or_else(|| " ".repeat(LINE_NUM_WIDTH));
    StyledSegment {
        text,
        fg: Some(theme.dim()),
        ..Default::default()
    }
}

/// Cut `segments` down to `max_width` graphemes, ending with `~` when
/// anything was dropped.
pub(super) fn truncate_segments(segments: Vec<StyledSegment>, max_width: usize) -> Vec<StyledSegment> {
    let total: usize = segments.iter().map(StyledSegment::width).sum();
    if total <= max_width {
        return segments;
    }
    if max_width == 0 {
        return Vec::new();
    }

    let mut budget = max_width - 1;
    let mut out = Vec::new();
    let mut marker_style = StyledSegment::default();
    for segment in segments {
        marker_style = StyledSegment {
            text: String::new(),
            ..segment.clone()
        };
        if budget == 0 {
            break;
        }
        let width = segment.width();
        if width <= budget {
            budget -= width;
            out.push(segment);
        } else {
            let text: String = segment.text.graphemes(true).take(budget).collect();
            out.push(StyledSegment { text, ..segment });
            break;
        }
    }
    out.push(StyledSegment {
        text: "~".to_string(),
        ..marker_style
    });
    out
}

/// Pad `segments` with spaces up to `width` graphemes, using `bg` for the fill.
pub(super) fn pad_segments(segments: &mut Vec<StyledSegment>, width: usize, bg: Option<[u8; 3]>) {
    let used: usize = segments.iter().map(StyledSegment::width).sum();
    if used < width {
        segments.push(StyledSegment {
            text: " ".repeat(width - used),
            bg,
            ..Default::default()
        });
    }
}
