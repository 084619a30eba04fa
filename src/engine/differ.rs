//! Line-level diff between two texts.
//!
//! Implements Myers' O((N+M)·D) shortest-edit-script search in its
//! linear-space form (divide and conquer on the middle snake). Lines are
//! compared as whole, byte-exact strings. After the search every maximal run
//! of changed lines is reordered so that its removed lines come before its
//! added lines, which is how conventional diff tools print a replacement.

use super::types::{AlignmentEntry, LineStatus};
use std::ops::{Index, IndexMut, Range};

/// Align `old` against `new`, returning one entry per old and per new line.
///
/// Empty inputs are valid: two empty slices give an empty alignment, and one
/// empty side gives an all-added or all-removed alignment.
pub fn diff_lines<A: AsRef<str>, B: AsRef<str>>(old: &[A], new: &[B]) -> Vec<AlignmentEntry> {
    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();

    let max_d = max_d(old.len(), new.len());
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    let mut edits = Vec::new();
    conquer(
        &old,
        0..old.len(),
        &new,
        0..new.len(),
        &mut vf,
        &mut vb,
        &mut edits,
    );

    let mut entries = Vec::with_capacity(old.len().max(new.len()));
    for edit in edits {
        match edit {
            Edit::Equal { old, new, len } => {
                entries.extend((0..len).map(|i| AlignmentEntry::same(old + i, new + i)));
            }
            Edit::Delete { old, len } => {
                entries.extend((old..old + len).map(AlignmentEntry::removed));
            }
            Edit::Insert { new, len } => {
                entries.extend((new..new + len).map(AlignmentEntry::added));
            }
        }
    }
    removals_first(&mut entries);
    entries
}

/// Reorder every run of changed entries so removed lines precede added lines.
///
/// The relative order within each side is preserved, so line indices stay
/// monotonic per side and the set of matched lines is untouched.
fn removals_first(entries: &mut [AlignmentEntry]) {
    let mut start = 0;
    while start < entries.len() {
        if !entries[start].is_change() {
            start += 1;
            continue;
        }
        let end = entries[start..]
            .iter()
            .position(|e| !e.is_change())
            .map(|p| start + p)
            .unwrap_or(entries.len());
        // Stable: removed entries keep their order, added entries keep theirs.
        entries[start..end].sort_by_key(|e| e.status() == LineStatus::Added);
        start = end;
    }
}

// ---------------------------------------------------------------------------
// Myers search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal { old: usize, new: usize, len: usize },
    Delete { old: usize, len: usize },
    Insert { new: usize, len: usize },
}

fn max_d(len1: usize, len2: usize) -> usize {
    (len1 + len2 + 1) / 2 + 1
}

/// Furthest-reaching x per diagonal `k`, indexable by negative `k`.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output {
        &self.v[(index + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        &mut self.v[(index + self.offset) as usize]
    }
}

fn common_prefix_len(old: &[&str], old_range: Range<usize>, new: &[&str], new_range: Range<usize>) -> usize {
    old[old_range]
        .iter()
        .zip(&new[new_range])
        .take_while(|(a, b)| a == b)
        .count()
}

fn common_suffix_len(old: &[&str], old_range: Range<usize>, new: &[&str], new_range: Range<usize>) -> usize {
    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Find the start of a middle snake of an optimal edit path, as absolute
/// indices into `old` and `new`.
fn find_middle_snake(
    old: &[&str],
    old_range: Range<usize>,
    new: &[&str],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = old_range.len();
    let m = new_range.len();

    // The parity of the edit script length follows the parity of delta.
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    let d_max = max_d(n, m);
    debug_assert!(vf.len() >= d_max && vb.len() >= d_max);

    for d in 0..d_max as isize {
        // Forward
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
            }
            vf[k] = x;

            if odd && (k - delta).abs() <= d - 1 && vf[k] + vb[-(k - delta)] >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }
            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }

    None
}

fn conquer(
    old: &[&str],
    mut old_range: Range<usize>,
    new: &[&str],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    edits: &mut Vec<Edit>,
) {
    let prefix = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    if prefix > 0 {
        edits.push(Edit::Equal {
            old: old_range.start,
            new: new_range.start,
            len: prefix,
        });
    }
    old_range.start += prefix;
    new_range.start += prefix;

    let suffix = common_suffix_len(old, old_range.clone(), new, new_range.clone());
    let suffix_start = (old_range.end - suffix, new_range.end - suffix);
    old_range.end -= suffix;
    new_range.end -= suffix;

    if old_range.is_empty() && new_range.is_empty() {
        // Nothing left between prefix and suffix.
    } else if new_range.is_empty() {
        edits.push(Edit::Delete {
            old: old_range.start,
            len: old_range.len(),
        });
    } else if old_range.is_empty() {
        edits.push(Edit::Insert {
            new: new_range.start,
            len: new_range.len(),
        });
    } else if let Some((x, y)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        conquer(old, old_range.start..x, new, new_range.start..y, vf, vb, edits);
        conquer(old, x..old_range.end, new, y..new_range.end, vf, vb, edits);
    } else {
        edits.push(Edit::Delete {
            old: old_range.start,
            len: old_range.len(),
        });
        edits.push(Edit::Insert {
            new: new_range.start,
            len: new_range.len(),
        });
    }

    if suffix > 0 {
        edits.push(Edit::Equal {
            old: suffix_start.0,
            new: suffix_start.1,
            len: suffix,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::DiffStats;

    fn render(entries: &[AlignmentEntry], old: &[&str], new: &[&str]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e.status() {
                LineStatus::Same => format!(" {}", old[e.old_index().unwrap()]),
                LineStatus::Removed => format!("-{}", old[e.old_index().unwrap()]),
                LineStatus::Added => format!("+{}", new[e.new_index().unwrap()]),
            })
            .collect()
    }

    /// Reference LCS length via dynamic programming.
    fn lcs_len(a: &[&str], b: &[&str]) -> usize {
        let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                dp[i][j] = if a[i] == b[j] {
                    dp[i + 1][j + 1] + 1
                } else {
                    dp[i + 1][j].max(dp[i][j + 1])
                };
            }
        }
        dp[0][0]
    }

    fn assert_valid(old: &[&str], new: &[&str]) -> Vec<AlignmentEntry> {
        let entries = diff_lines(old, new);

        let olds: Vec<usize> = entries.iter().filter_map(|e| e.old_index()).collect();
        let news: Vec<usize> = entries.iter().filter_map(|e| e.new_index()).collect();
        assert_eq!(olds, (0..old.len()).collect::<Vec<_>>());
        assert_eq!(news, (0..new.len()).collect::<Vec<_>>());

        for e in &entries {
            if e.status() == LineStatus::Same {
                assert_eq!(old[e.old_index().unwrap()], new[e.new_index().unwrap()]);
            }
        }

        let stats = DiffStats::from_entries(&entries);
        assert_eq!(stats.same, lcs_len(old, new), "edit script must be minimal");

        for pair in entries.windows(2) {
            assert!(
                !(pair[0].status() == LineStatus::Added && pair[1].status() == LineStatus::Removed),
                "removed lines must precede added lines"
            );
        }
        entries
    }

    #[test]
    fn test_replace_single_line() {
        let old = ["a", "b", "c"];
        let new = ["a", "x", "c"];
        let entries = assert_valid(&old, &new);
        assert_eq!(render(&entries, &old, &new), vec![" a", "-b", "+x", " c"]);
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(diff_lines(&none, &none).is_empty());

        let added = diff_lines(&none, &["a", "b"]);
        assert!(added.iter().all(|e| e.status() == LineStatus::Added));
        assert_eq!(added.len(), 2);

        let removed = diff_lines(&["a"], &none);
        assert_eq!(removed, vec![AlignmentEntry::removed(0)]);
    }

    #[test]
    fn test_identical() {
        let lines = ["x", "y", "z"];
        let entries = assert_valid(&lines, &lines);
        assert!(entries.iter().all(|e| e.status() == LineStatus::Same));
    }

    #[test]
    fn test_insert_and_delete() {
        let old = ["line 1", "line 2", "line 3"];
        let new = ["line 1", "line 1.5", "line 3", "line 4"];
        let entries = assert_valid(&old, &new);
        assert_eq!(
            render(&entries, &old, &new),
            vec![" line 1", "-line 2", "+line 1.5", " line 3", "+line 4"]
        );
    }

    #[test]
    fn test_classic_myers_example() {
        let old = ["A", "B", "C", "A", "B", "B", "A"];
        let new = ["C", "B", "A", "B", "A", "C"];
        let entries = assert_valid(&old, &new);
        assert_eq!(DiffStats::from_entries(&entries).same, 4);
    }

    #[test]
    fn test_whitespace_is_significant() {
        let old = ["fn a() {", "  x", "}"];
        let new = ["fn a() {", "    x", "}"];
        let entries = assert_valid(&old, &new);
        let stats = DiffStats::from_entries(&entries);
        assert_eq!((stats.same, stats.removed, stats.added), (2, 1, 1));
    }

    #[test]
    fn test_multi_line_replacement_groups_removals() {
        let old = ["keep", "o1", "o2", "o3", "tail"];
        let new = ["keep", "n1", "n2", "tail"];
        let entries = assert_valid(&old, &new);
        assert_eq!(
            render(&entries, &old, &new),
            vec![" keep", "-o1", "-o2", "-o3", "+n1", "+n2", " tail"]
        );
    }

    #[test]
    fn test_generated_pairs_are_minimal() {
        // Deterministic pseudo-random inputs over a tiny alphabet so that
        // many lines repeat and the search has real choices to make.
        let alphabet = ["a", "b", "c", "{", "}", ""];
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };
        for _ in 0..200 {
            let old_len = (next() % 12) as usize;
            let new_len = (next() % 12) as usize;
            let old: Vec<&str> = (0..old_len)
                .map(|_| alphabet[(next() % alphabet.len() as u64) as usize])
                .collect();
            let new: Vec<&str> = (0..new_len)
                .map(|_| alphabet[(next() % alphabet.len() as u64) as usize])
                .collect();
            assert_valid(&old, &new);
        }
    }

    #[test]
    fn test_accepts_owned_strings() {
        let old = vec!["a".to_string(), "b".to_string()];
        let new = vec!["b".to_string()];
        let entries = diff_lines(&old, &new);
        assert_eq!(
            entries,
            vec![AlignmentEntry::removed(0), AlignmentEntry::same(1, 0)]
        );
    }
}
