//! Terminal painter: turns a [`RenderOutput`] into styled lines.

use super::helpers::{
    GUTTER_WIDTH, LINE_NUM_WIDTH, gutter_segment, line_num_segment, pad_segments,
    truncate_segments,
};
use super::theme::ThemeColors;
use super::types::{StyledLine, StyledSegment};
use crate::engine::{Cell, FoldMarker, Layout, RenderOutput, RenderRow, RowRole, SplitRow, Token};
use snippet_diff_config::Config;

/// Painter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PainterConfig {
    /// Terminal width in columns.
    pub width: usize,
    /// Draw line numbers when the output asks for them.
    pub show_line_numbers: bool,
    /// Below this width split rows are painted as a single column.
    pub side_by_side_min_width: usize,
    pub theme: ThemeColors,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PainterConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.terminal_width,
            show_line_numbers: config.show_line_numbers,
            side_by_side_min_width: config.side_by_side_min_width,
            theme: ThemeColors::from_config(&config.theme),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Per-frame switches derived from the output flags and the painter config.
#[derive(Debug, Clone, Copy)]
struct Frame {
    numbers: bool,
    markers: bool,
    side_by_side: bool,
}

/// Paints rows as [`StyledLine`]s for a fixed-width terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalPainter {
    config: PainterConfig,
}

impl TerminalPainter {
    pub fn new(config: PainterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    /// Whether a split layout gets two columns at the configured width.
    pub fn use_side_by_side(&self, layout: Layout) -> bool {
        layout == Layout::Split && self.config.width >= self.config.side_by_side_min_width
    }

    /// Paint a header (when there is anything to put in it) followed by one
    /// line per row.
    pub fn paint(&self, output: &RenderOutput) -> Vec<StyledLine> {
        let frame = Frame {
            numbers: self.config.show_line_numbers && output.show_line_numbers,
            markers: output.has_diff_toggle,
            side_by_side: self.use_side_by_side(output.layout),
        };

        let mut lines = Vec::with_capacity(output.rows.len() + 1);
        if let Some(header) = self.header(output) {
            lines.push(header);
        }
        for row in &output.rows {
            let line = match row {
                RenderRow::Unified(row) => {
                    self.single_column(row.role, row.old_line, row.new_line, &row.tokens, frame)
                }
                RenderRow::Split(row) if frame.side_by_side => self.two_columns(row, frame),
                RenderRow::Split(row) => {
                    // Same content as a unified row: the new side for context
                    // and added lines, the old side for removed lines.
                    let tokens = row
                        .right
                        .as_ref()
                        .or(row.left.as_ref())
                        .map(|c| &*c.tokens)
                        .unwrap_or(&[]);
                    self.single_column(
                        row.role,
                        row.left.as_ref().map(|c| c.line_number),
                        row.right.as_ref().map(|c| c.line_number),
                        tokens,
                        frame,
                    )
                }
                RenderRow::Fold(marker) => self.fold_line(marker, frame),
            };
            lines.push(line);
        }
        lines
    }

    fn header(&self, output: &RenderOutput) -> Option<StyledLine> {
        if output.file_label.is_none() && output.toggle_label.is_none() {
            return None;
        }
        let theme = &self.config.theme;
        let mut segments = Vec::new();
        if let Some(label) = &output.file_label {
            segments.push(StyledSegment {
                text: label.clone(),
                fg: Some(theme.palette[15]), // Bright white
                bold: true,
                ..Default::default()
            });
        }
        if output.has_diff_toggle {
            segments.push(StyledSegment {
                text: format!("  +{}", output.stats.added),
                fg: Some(theme.palette[2]),
                ..Default::default()
            });
            segments.push(StyledSegment {
                text: format!(" -{}", output.stats.removed),
                fg: Some(theme.palette[1]),
                ..Default::default()
            });
        }
        if let Some(toggle) = output.toggle_label {
            segments.push(StyledSegment {
                text: format!("  [t] {toggle}"),
                fg: Some(theme.dim()),
                ..Default::default()
            });
        }
        Some(StyledLine::new(segments))
    }

    fn token_segments(&self, tokens: &[Token], bg: Option<[u8; 3]>) -> Vec<StyledSegment> {
        tokens
            .iter()
            .map(|token| StyledSegment {
                bg,
                ..self.config.theme.token_segment(&token.text, token.class)
            })
            .collect()
    }

    fn marker_segment(&self, role: RowRole, bg: Option<[u8; 3]>) -> StyledSegment {
        let text = match role {
            RowRole::Added => "+",
            RowRole::Removed => "-",
            RowRole::Context | RowRole::Fold => " ",
        };
        StyledSegment {
            text: text.to_string(),
            fg: self.config.theme.marker_color(role),
            bg,
            ..Default::default()
        }
    }

    fn single_column(
        &self,
        role: RowRole,
        old: Option<usize>,
        new: Option<usize>,
        tokens: &[Token],
        frame: Frame,
    ) -> StyledLine {
        let theme = &self.config.theme;
        let bg = theme.row_background(role);
        let mut segments = Vec::with_capacity(tokens.len() + 2);
        if frame.numbers {
            segments.push(gutter_segment(old, new, theme));
        }
        if frame.markers {
            segments.push(self.marker_segment(role, bg));
        }
        segments.extend(self.token_segments(tokens, bg));
        if bg.is_some() {
            pad_segments(&mut segments, self.config.width, bg);
        }
        StyledLine::new(segments)
    }

    fn two_columns(&self, row: &SplitRow, frame: Frame) -> StyledLine {
        // Each side gets half the terminal width minus the divider
        let half_width = self.config.width.saturating_sub(3) / 2;
        let gutter_width = if frame.numbers { LINE_NUM_WIDTH } else { 0 };
        let content_width = half_width.saturating_sub(gutter_width + 1); // +1 for +/- prefix

        let mut segments = Vec::new();
        segments.extend(self.cell(row.role, row.left.as_ref(), content_width, frame, true));
        segments.push(StyledSegment {
            text: " | ".to_string(),
            fg: Some(self.config.theme.dim()),
            ..Default::default()
        });
        segments.extend(self.cell(row.role, row.right.as_ref(), content_width, frame, false));
        StyledLine::new(segments)
    }

    fn cell(
        &self,
        role: RowRole,
        cell: Option<&Cell>,
        content_width: usize,
        frame: Frame,
        pad: bool,
    ) -> Vec<StyledSegment> {
        let theme = &self.config.theme;
        let mut segments = Vec::new();
        let Some(cell) = cell else {
            if frame.numbers {
                segments.push(line_num_segment(None, theme));
            }
            if pad {
                segments.push(StyledSegment::plain(" ".repeat(content_width + 1)));
            }
            return segments;
        };

        let bg = theme.row_background(role);
        if frame.numbers {
            segments.push(line_num_segment(Some(cell.line_number), theme));
        }
        segments.push(self.marker_segment(role, bg));
        let mut content = truncate_segments(self.token_segments(&cell.tokens, bg), content_width);
        if pad || bg.is_some() {
            pad_segments(&mut content, content_width, bg);
        }
        segments.extend(content);
        segments
    }

    fn fold_line(&self, marker: &FoldMarker, frame: Frame) -> StyledLine {
        let indent = match (frame.numbers, frame.side_by_side) {
            (false, _) => 0,
            (true, true) => LINE_NUM_WIDTH,
            (true, false) => GUTTER_WIDTH,
        };
        let plural = if marker.count == 1 { "" } else { "s" };
        let mut segments = Vec::new();
        if indent > 0 {
            segments.push(StyledSegment::plain(" ".repeat(indent)));
        }
        segments.push(StyledSegment {
            text: format!(" ⋯ {} unchanged line{plural}", marker.count),
            fg: Some(self.config.theme.dim()),
            italic: true,
            ..Default::default()
        });
        StyledLine::new(segments)
    }
}
