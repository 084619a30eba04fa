//! Default values used by `#[serde(default = ...)]` attributes.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Folding ────────────────────────────────────────────────────────────────

/// Unchanged lines kept next to a change when folding. Zero collapses every
/// unchanged run completely.
pub fn fold_context_lines() -> usize {
    0
}

// ── Capacity guards ────────────────────────────────────────────────────────

pub fn max_lines() -> usize {
    20_000
}

pub fn max_bytes() -> usize {
    2 * 1024 * 1024
}

// ── Painter ────────────────────────────────────────────────────────────────

pub fn side_by_side_min_width() -> usize {
    100
}

pub fn terminal_width() -> usize {
    120
}
