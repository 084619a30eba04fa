//! Color palette and the token-class to style mapping.

use super::types::StyledSegment;
use crate::engine::{RowRole, TokenClass};
use snippet_diff_config::ThemeConfig;

/// Color palette used by the painter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    /// Default foreground color [r, g, b].
    pub fg: [u8; 3],
    /// Default background color [r, g, b].
    pub bg: [u8; 3],
    /// The 16 ANSI colors [r, g, b] (indices 0–15).
    pub palette: [[u8; 3]; 16],
}

impl Default for ThemeColors {
    /// Catppuccin Mocha-inspired palette.
    fn default() -> Self {
        Self {
            fg: [205, 214, 244],
            bg: [30, 30, 46],
            palette: [
                [69, 71, 90],    // 0  Black (Surface0)
                [243, 139, 168], // 1  Red
                [166, 227, 161], // 2  Green
                [249, 226, 175], // 3  Yellow (warm gold)
                [137, 180, 250], // 4  Blue
                [203, 166, 247], // 5  Magenta (mauve)
                [148, 226, 213], // 6  Cyan (teal)
                [186, 194, 222], // 7  White (Subtext0)
                [108, 112, 134], // 8  Bright black (Overlay0)
                [235, 160, 172], // 9  Bright red (maroon)
                [166, 227, 161], // 10 Bright green
                [249, 226, 175], // 11 Bright yellow
                [116, 199, 236], // 12 Bright blue (sapphire)
                [245, 194, 231], // 13 Bright magenta (pink)
                [137, 220, 235], // 14 Bright cyan (sky)
                [205, 214, 244], // 15 Bright white (Text)
            ],
        }
    }
}

/// Background tint behind removed lines.
const REMOVED_BG: [u8; 3] = [100, 0, 0];
/// Background tint behind added lines.
const ADDED_BG: [u8; 3] = [0, 80, 0];

impl ThemeColors {
    /// Default palette with the overrides from `config` applied.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();
        if let Some(fg) = config.fg {
            theme.fg = fg;
        }
        if let Some(bg) = config.bg {
            theme.bg = bg;
        }
        if let Some(palette) = &config.palette {
            match <[[u8; 3]; 16]>::try_from(palette.as_slice()) {
                Ok(palette) => theme.palette = palette,
                Err(_) => log::warn!(
                    "Ignoring theme palette with {} entries (expected 16)",
                    palette.len()
                ),
            }
        }
        theme
    }

    /// Segment for `text` styled as `class`.
    pub fn token_segment(&self, text: &str, class: TokenClass) -> StyledSegment {
        let mut segment = StyledSegment::plain(text);
        match class {
            TokenClass::Keyword => {
                segment.fg = Some(self.palette[13]); // bright magenta
                segment.bold = true;
            }
            TokenClass::Builtin => segment.fg = Some(self.palette[14]), // bright cyan
            TokenClass::String => segment.fg = Some(self.palette[10]),  // bright green
            TokenClass::Number => segment.fg = Some(self.palette[11]),  // bright yellow
            TokenClass::Comment => {
                segment.fg = Some(self.palette[8]); // dim grey
                segment.italic = true;
            }
            TokenClass::Operator => segment.fg = Some(self.palette[6]),
            TokenClass::Punctuation => segment.fg = Some(self.palette[7]),
            TokenClass::Whitespace | TokenClass::Plain => {}
        }
        segment
    }

    /// Line background for a row role, if the role is highlighted.
    pub fn row_background(&self, role: RowRole) -> Option<[u8; 3]> {
        match role {
            RowRole::Added => Some(ADDED_BG),
            RowRole::Removed => Some(REMOVED_BG),
            RowRole::Context | RowRole::Fold => None,
        }
    }

    /// Color of the `+` / `-` marker for a row role.
    pub fn marker_color(&self, role: RowRole) -> Option<[u8; 3]> {
        match role {
            RowRole::Added => Some(self.palette[2]),
            RowRole::Removed => Some(self.palette[1]),
            RowRole::Context | RowRole::Fold => None,
        }
    }

    /// Color for gutters, dividers and fold summaries.
    pub fn dim(&self) -> [u8; 3] {
        self.palette[8]
    }
}
