//! Line diff between running-config snapshots.
//!
//! Output is unified-style: only changed regions are shown, each as a hunk
//! with `CONTEXT` unchanged lines around it.

use std::fmt::Write;

/// Unchanged lines shown around each change
const CONTEXT: usize = 3;

/// Largest LCS table computed; beyond this the differing region is shown as
/// a full replacement.
const MAX_LCS_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange<'a> {
    Same(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

impl LineChange<'_> {
    fn is_same(&self) -> bool {
        matches!(self, LineChange::Same(_))
    }

    fn in_old(&self) -> bool {
        !matches!(self, LineChange::Added(_))
    }

    fn in_new(&self) -> bool {
        !matches!(self, LineChange::Removed(_))
    }
}

/// Longest-common-subsequence line diff.
pub fn diff_lines<'a>(before: &'a str, after: &'a str) -> Vec<LineChange<'a>> {
    diff_bounded(before, after, MAX_LCS_CELLS)
}

fn diff_bounded<'a>(before: &'a str, after: &'a str, max_cells: usize) -> Vec<LineChange<'a>> {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    // common prefix/suffix keep the table small for mostly-equal configs
    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut changes: Vec<LineChange> = old[..prefix].iter().map(|l| LineChange::Same(*l)).collect();

    let (n, m) = (old_mid.len(), new_mid.len());
    if (n + 1).saturating_mul(m + 1) > max_cells {
        tracing::debug!(removed = n, added = m, "diff region too large, showing replacement");
        changes.extend(old_mid.iter().map(|l| LineChange::Removed(*l)));
        changes.extend(new_mid.iter().map(|l| LineChange::Added(*l)));
    } else {
        // flat (n+1) x (m+1) table, row stride m+1
        let width = m + 1;
        let mut lcs = vec![0usize; (n + 1) * width];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                lcs[i * width + j] = if old_mid[i] == new_mid[j] {
                    lcs[(i + 1) * width + j + 1] + 1
                } else {
                    lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
                };
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            if old_mid[i] == new_mid[j] {
                changes.push(LineChange::Same(old_mid[i]));
                i += 1;
                j += 1;
            } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
                changes.push(LineChange::Removed(old_mid[i]));
                i += 1;
            } else {
                changes.push(LineChange::Added(new_mid[j]));
                j += 1;
            }
        }
        changes.extend(old_mid[i..].iter().map(|l| LineChange::Removed(*l)));
        changes.extend(new_mid[j..].iter().map(|l| LineChange::Added(*l)));
    }

    changes.extend(old[old.len() - suffix..].iter().map(|l| LineChange::Same(*l)));
    changes
}

/// `start,count` for a hunk header; 1-based, and the line before an empty range.
fn hunk_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, count),
    }
}

/// Group changes into hunks, each a half-open range into `changes`.
fn hunks(changes: &[LineChange]) -> Vec<(usize, usize)> {
    let mut groups: Vec<(usize, usize)> = Vec::new();

    for (idx, _) in changes.iter().enumerate().filter(|(_, c)| !c.is_same()) {
        match groups.last_mut() {
            // at most 2 * CONTEXT unchanged lines in between: same hunk
            Some((_, last)) if idx - *last <= 2 * CONTEXT + 1 => *last = idx,
            _ => groups.push((idx, idx)),
        }
    }

    groups
        .into_iter()
        .map(|(first, last)| {
            (
                first.saturating_sub(CONTEXT),
                (last + CONTEXT + 1).min(changes.len()),
            )
        })
        .collect()
}

/// Render a unified diff with `---`/`+++` headers, or `None` when nothing changed.
///
/// Output is cut after `max_lines` lines.
pub fn render(before: &str, after: &str, max_lines: usize) -> Option<String> {
    let changes = diff_lines(before, after);
    if changes.iter().all(LineChange::is_same) {
        return None;
    }

    // line offsets into old/new before each change
    let mut offsets = Vec::with_capacity(changes.len() + 1);
    let (mut old_pos, mut new_pos) = (0, 0);
    for change in &changes {
        offsets.push((old_pos, new_pos));
        old_pos += change.in_old() as usize;
        new_pos += change.in_new() as usize;
    }

    let mut lines = vec!["--- before".to_string(), "+++ after".to_string()];
    for (lo, hi) in hunks(&changes) {
        let hunk = &changes[lo..hi];
        let (old_start, new_start) = offsets[lo];
        let old_count = hunk.iter().filter(|c| c.in_old()).count();
        let new_count = hunk.iter().filter(|c| c.in_new()).count();

        lines.push(format!(
            "@@ -{} +{} @@",
            hunk_range(old_start, old_count),
            hunk_range(new_start, new_count)
        ));
        lines.extend(hunk.iter().map(|change| match change {
            LineChange::Same(l) => format!(" {}", l),
            LineChange::Removed(l) => format!("-{}", l),
            LineChange::Added(l) => format!("+{}", l),
        }));
    }

    let truncated = lines.len() > max_lines;
    let mut out = String::new();
    for line in lines.iter().take(max_lines) {
        let _ = writeln!(out, "{}", line);
    }
    if truncated {
        out.push_str("\n...diff truncated...\n");
    }
    Some(out)
}
