//! Unified-diff hunks
//!
//! A hunk is a run of edits surrounded by up to `context` unchanged lines on
//! each side. Changes whose context would touch or overlap are merged into a
//! single hunk.

use crate::artifacts::diff::myers::Edit;

/// Lines of unchanged context kept around each change
pub const DEFAULT_CONTEXT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    /// Zero-based position in `a` of the first line of the hunk
    a_offset: usize,
    /// Zero-based position in `b` of the first line of the hunk
    b_offset: usize,
    edits: Vec<Edit<T>>,
}

impl<T: Clone> Hunk<T> {
    /// Group an edit script into hunks
    pub fn build(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
        // line positions in `a` and `b` before each edit
        let mut positions = Vec::with_capacity(edits.len());
        let (mut a_line, mut b_line) = (0, 0);
        for edit in edits {
            positions.push((a_line, b_line));
            match edit {
                Edit::Equal { .. } => {
                    a_line += 1;
                    b_line += 1;
                }
                Edit::Delete { .. } => a_line += 1,
                Edit::Insert { .. } => b_line += 1,
            }
        }

        let changes = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| !edit.is_equal())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let mut hunks = Vec::new();
        let mut remaining = changes.iter().peekable();

        while let Some(&first) = remaining.next() {
            let start = first.saturating_sub(context);
            let mut end = (first + context + 1).min(edits.len());

            while let Some(&&next) = remaining.peek() {
                if next.saturating_sub(context) > end {
                    break;
                }
                end = (next + context + 1).min(edits.len());
                remaining.next();
            }

            let (a_offset, b_offset) = positions[start];
            hunks.push(Hunk {
                a_offset,
                b_offset,
                edits: edits[start..end].to_vec(),
            });
        }

        hunks
    }
}

impl<T> Hunk<T> {
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    /// Lines of `a` covered by the hunk
    pub fn a_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Insert { .. }))
            .count()
    }

    /// Lines of `b` covered by the hunk
    pub fn b_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Delete { .. }))
            .count()
    }

    /// One-based first line in `a`; an empty range names the line before it
    pub fn a_start(&self) -> usize {
        if self.a_size() == 0 {
            self.a_offset
        } else {
            self.a_offset + 1
        }
    }

    /// One-based first line in `b`; an empty range names the line before it
    pub fn b_start(&self) -> usize {
        if self.b_size() == 0 {
            self.b_offset
        } else {
            self.b_offset + 1
        }
    }

    /// `@@ -a_start,a_size +b_start,b_size @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start(),
            self.a_size(),
            self.b_start(),
            self.b_size()
        )
    }
}
