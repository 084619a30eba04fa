//! Host surface for the engine: a terminal painter.
//!
//! - [`types`]: `StyledLine` / `StyledSegment` text runs.
//! - [`theme`]: `ThemeColors` palette and the token-class style mapping.
//! - [`terminal`]: `TerminalPainter`: rows to styled lines, in one or two
//!   columns.
//! - [`ansi`]: styled lines to ANSI escape sequences or plain text.

pub mod ansi;
mod helpers;
pub mod terminal;
pub mod theme;
pub mod types;

pub use ansi::{line_to_ansi, to_ansi, to_plain};
pub use terminal::{PainterConfig, TerminalPainter};
pub use theme::ThemeColors;
pub use types::{StyledLine, StyledSegment};

#[cfg(test)]
mod tests;
