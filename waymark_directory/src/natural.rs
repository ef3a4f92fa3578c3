// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Natural string ordering.

use core::cmp::Ordering;

/// Compare two strings, treating runs of ASCII digits as numbers.
///
/// `"wall 9"` sorts before `"wall 10"`. Numbers that differ only in leading
/// zeros are equal unless nothing else differs, in which case the shorter
/// spelling comes first so the ordering stays total.
///
/// ```rust
/// use core::cmp::Ordering;
/// use waymark_directory::natural_cmp;
///
/// assert_eq!(natural_cmp("wall 9", "wall 10"), Ordering::Less);
/// assert_eq!(natural_cmp("wall", "wall 2"), Ordering::Less);
/// assert_eq!(natural_cmp("b", "a 100"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    let mut zeros = Ordering::Equal;
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return zeros,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, rest_a) = split_digits(a);
                let (db, rest_b) = split_digits(b);
                let (ta, tb) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
                zeros = zeros.then(da.len().cmp(&db.len()));
                a = rest_a;
                b = rest_b;
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a = &a[x.len_utf8()..];
                b = &b[y.len_utf8()..];
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}
