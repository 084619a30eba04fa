//! Collapses runs of unchanged lines into fold markers.

use super::types::{AlignmentEntry, FoldMarker, FoldedEntry, LineStatus};

/// Fold reducer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldOptions {
    /// Fold unchanged runs at all.
    pub enabled: bool,
    /// Unchanged lines kept visible next to each change. `0` folds every
    /// unchanged run completely, including a single line between two changes.
    pub context_lines: usize,
}

impl FoldOptions {
    pub fn new(enabled: bool, context_lines: usize) -> Self {
        Self {
            enabled,
            context_lines,
        }
    }
}

/// Replace maximal runs of `Same` entries with fold markers.
///
/// With folding disabled this is the identity. Each run yields at most one
/// marker, and runs are separated by at least one change, so two markers are
/// never adjacent. Folded counts plus the entries that pass through always
/// add up to `entries.len()`.
pub fn fold(entries: &[AlignmentEntry], options: FoldOptions) -> Vec<FoldedEntry> {
    if !options.enabled {
        return entries.iter().copied().map(FoldedEntry::Entry).collect();
    }

    let mut out = Vec::with_capacity(entries.len());
    let mut i = 0;
    while i < entries.len() {
        if entries[i].status() != LineStatus::Same {
            out.push(FoldedEntry::Entry(entries[i]));
            i += 1;
            continue;
        }

        let start = i;
        let end = entries[start..]
            .iter()
            .position(|e| e.status() != LineStatus::Same)
            .map_or(entries.len(), |p| start + p);
        fold_run(&entries[start..end], start > 0, end < entries.len(), options.context_lines, &mut out);
        i = end;
    }
    out
}

/// Emit one unchanged run, keeping `context` lines on each side that
/// touches a change.
fn fold_run(
    run: &[AlignmentEntry],
    change_before: bool,
    change_after: bool,
    context: usize,
    out: &mut Vec<FoldedEntry>,
) {
    let head = if change_before { context } else { 0 };
    let tail = if change_after { context } else { 0 };

    if head.saturating_add(tail) >= run.len() {
        out.extend(run.iter().copied().map(FoldedEntry::Entry));
        return;
    }

    let hidden = &run[head..run.len() - tail];
    out.extend(run[..head].iter().copied().map(FoldedEntry::Entry));
    out.push(FoldedEntry::Fold(FoldMarker {
        count: hidden.len(),
        old_start: hidden[0].old_index().map_or(0, |i| i + 1),
        new_start: hidden[0].new_index().map_or(0, |i| i + 1),
    }));
    out.extend(run[run.len() - tail..].iter().copied().map(FoldedEntry::Entry));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_b() -> Vec<AlignmentEntry> {
        vec![
            AlignmentEntry::same(0, 0),
            AlignmentEntry::removed(1),
            AlignmentEntry::added(1),
            AlignmentEntry::same(2, 2),
        ]
    }

    fn accounted(folded: &[FoldedEntry]) -> usize {
        folded
            .iter()
            .map(|f| match f {
                FoldedEntry::Entry(_) => 1,
                FoldedEntry::Fold(m) => m.count,
            })
            .sum()
    }

    #[test]
    fn test_disabled_is_identity() {
        let entries = scenario_b();
        let folded = fold(&entries, FoldOptions::new(false, 0));
        assert_eq!(
            folded,
            entries.iter().copied().map(FoldedEntry::Entry).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_zero_context_folds_single_lines() {
        let folded = fold(&scenario_b(), FoldOptions::new(true, 0));
        assert_eq!(
            folded,
            vec![
                FoldedEntry::Fold(FoldMarker {
                    count: 1,
                    old_start: 1,
                    new_start: 1
                }),
                FoldedEntry::Entry(AlignmentEntry::removed(1)),
                FoldedEntry::Entry(AlignmentEntry::added(1)),
                FoldedEntry::Fold(FoldMarker {
                    count: 1,
                    old_start: 3,
                    new_start: 3
                }),
            ]
        );
    }

    #[test]
    fn test_all_same_folds_to_one_marker() {
        let entries: Vec<_> = (0..5).map(|i| AlignmentEntry::same(i, i)).collect();
        let folded = fold(&entries, FoldOptions::new(true, 3));
        assert_eq!(folded.len(), 1);
        assert_eq!(accounted(&folded), 5);
    }

    #[test]
    fn test_context_lines_keep_neighbours() {
        // 4 same, change, 4 same
        let mut entries: Vec<_> = (0..4).map(|i| AlignmentEntry::same(i, i)).collect();
        entries.push(AlignmentEntry::added(4));
        entries.extend((4..8).map(|i| AlignmentEntry::same(i, i + 1)));

        let folded = fold(&entries, FoldOptions::new(true, 1));
        assert_eq!(folded.len(), 5);
        assert_eq!(
            folded[0],
            FoldedEntry::Fold(FoldMarker {
                count: 3,
                old_start: 1,
                new_start: 1
            })
        );
        assert_eq!(folded[1], FoldedEntry::Entry(AlignmentEntry::same(3, 3)));
        assert_eq!(folded[3], FoldedEntry::Entry(AlignmentEntry::same(4, 5)));
        assert_eq!(
            folded[4],
            FoldedEntry::Fold(FoldMarker {
                count: 3,
                old_start: 6,
                new_start: 7
            })
        );
        assert_eq!(accounted(&folded), entries.len());
    }

    #[test]
    fn test_short_run_between_changes_is_kept() {
        let entries = vec![
            AlignmentEntry::removed(0),
            AlignmentEntry::same(1, 0),
            AlignmentEntry::same(2, 1),
            AlignmentEntry::added(2),
        ];
        let folded = fold(&entries, FoldOptions::new(true, 1));
        assert!(folded.iter().all(|f| matches!(f, FoldedEntry::Entry(_))));
    }

    #[test]
    fn test_markers_never_adjacent() {
        let entries = vec![
            AlignmentEntry::same(0, 0),
            AlignmentEntry::same(1, 1),
            AlignmentEntry::removed(2),
            AlignmentEntry::same(3, 2),
            AlignmentEntry::added(3),
            AlignmentEntry::same(4, 4),
        ];
        for context in 0..3 {
            let folded = fold(&entries, FoldOptions::new(true, context));
            assert!(
                folded
                    .windows(2)
                    .all(|w| !matches!(w, [FoldedEntry::Fold(_), FoldedEntry::Fold(_)]))
            );
            assert_eq!(accounted(&folded), entries.len());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(fold(&[], FoldOptions::new(true, 0)).is_empty());
    }
}
