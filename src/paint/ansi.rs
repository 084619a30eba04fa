//! Conversion of styled lines to terminal text.

use super::types::{StyledLine, StyledSegment};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// SGR parameters for a segment (24-bit colors).
fn sgr_params(segment: &StyledSegment) -> Vec<String> {
    let mut params = Vec::new();
    if segment.bold {
        params.push("1".to_string());
    }
    if segment.italic {
        params.push("3".to_string());
    }
    if segment.underline {
        params.push("4".to_string());
    }
    if segment.strikethrough {
        params.push("9".to_string());
    }
    if let Some([r, g, b]) = segment.fg {
        params.push(format!("38;2;{r};{g};{b}"));
    }
    if let Some([r, g, b]) = segment.bg {
        params.push(format!("48;2;{r};{g};{b}"));
    }
    params
}

/// Render one line with ANSI escape sequences. Styling is reset after every
/// styled segment so lines never bleed into each other.
pub fn line_to_ansi(line: &StyledLine) -> String {
    let mut out = String::new();
    for segment in &line.segments {
        if segment.text.is_empty() {
            continue;
        }
        if segment.is_styled() {
            let _ = write!(out, "\x1b[{}m{}{RESET}", sgr_params(segment).join(";"), segment.text);
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

/// Render all lines with ANSI styling, newline-terminated.
pub fn to_ansi(lines: &[StyledLine]) -> String {
    lines.iter().fold(String::new(), |mut out, line| {
        out.push_str(&line_to_ansi(line));
        out.push('\n');
        out
    })
}

/// Render all lines without styling, newline-terminated.
pub fn to_plain(lines: &[StyledLine]) -> String {
    lines.iter().fold(String::new(), |mut out, line| {
        out.push_str(&line.text());
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segment_has_no_escapes() {
        assert_eq!(line_to_ansi(&StyledLine::plain("abc")), "abc");
    }

    #[test]
    fn test_styled_segment() {
        let line = StyledLine::new(vec![StyledSegment {
            text: "fn".to_string(),
            fg: Some([1, 2, 3]),
            bg: Some([4, 5, 6]),
            bold: true,
            ..Default::default()
        }]);
        assert_eq!(
            line_to_ansi(&line),
            "\x1b[1;38;2;1;2;3;48;2;4;5;6mfn\x1b[0m"
        );
    }

    #[test]
    fn test_to_plain_and_ansi_terminate_lines() {
        let lines = vec![StyledLine::plain("a"), StyledLine::plain("b")];
        assert_eq!(to_plain(&lines), "a\nb\n");
        assert_eq!(to_ansi(&lines), "a\nb\n");
    }
}
