//! Minimal single-span difference between two strings.

/// The span that differs between two strings.
///
/// `before[start..end_before]` is the text removed and
/// `after[start..end_after]` the text inserted. All offsets are byte offsets
/// on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDiff {
    pub start: usize,
    pub end_before: usize,
    pub end_after: usize,
}

impl StringDiff {
    /// Identical strings report `0, 0, 0`.
    pub fn is_empty(&self) -> bool {
        self.start == 0 && self.end_before == 0 && self.end_after == 0
    }
}

/// Finds the shortest contiguous span that differs between `before` and `after`.
///
/// For example, completing `#ann is for updates` into
/// `#**announce** is for updates` yields `start = 1`, `end_before = 4`,
/// `end_after = 13`: only `ann` is replaced by `**announce**`.
pub fn string_diff(before: &str, after: &str) -> StringDiff {
    let a: Vec<(usize, char)> = before.char_indices().collect();
    let b: Vec<(usize, char)> = after.char_indices().collect();

    // Common prefix, in chars.
    let start = a
        .iter()
        .zip(b.iter())
        .take_while(|((_, ca), (_, cb))| ca == cb)
        .count();

    if a.len() == b.len() && start == a.len() {
        return StringDiff {
            start: 0,
            end_before: 0,
            end_after: 0,
        };
    }

    // Common suffix, never reaching back into the prefix.
    let mut end_a = a.len();
    let mut end_b = b.len();
    while end_a > start && end_b > start && a[end_a - 1].1 == b[end_b - 1].1 {
        end_a -= 1;
        end_b -= 1;
    }

    StringDiff {
        start: byte_offset(&a, before.len(), start),
        end_before: byte_offset(&a, before.len(), end_a),
        end_after: byte_offset(&b, after.len(), end_b),
    }
}

fn byte_offset(chars: &[(usize, char)], len: usize, index: usize) -> usize {
    chars.get(index).map(|(offset, _)| *offset).unwrap_or(len)
}
