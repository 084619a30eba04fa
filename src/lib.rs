// Library exports for testing and embedding hosts
//
// # Locking
//
// The engine holds one piece of mutable state per view: the split/unified
// layout, kept in a `parking_lot::RwLock` inside `engine::CodeView`. The
// debug log file sits behind a `parking_lot::Mutex`. Nothing else is shared;
// every render is a synchronous, pure transform of its inputs.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod engine;
pub mod paint;

pub use engine::{
    CodeView, EngineError, EngineOptions, Layout, RenderOutput, RenderRequest, RenderRow, render,
};
pub use paint::{PainterConfig, TerminalPainter, ThemeColors};
pub use snippet_diff_config::Config;
