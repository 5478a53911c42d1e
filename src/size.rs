use regex_syntax::hir::{Hir, HirKind};

use crate::generate::{class_len, repetition_bounds};

/// Returns an upper bound on the number of distinct strings that generating
/// from `hir` with the given repetition `ceiling` can produce.
///
/// The bound is exact for trees without overlapping alternatives. When
/// alternatives overlap (like `a|a*`) it may overcount, but it never
/// undercounts. `None` is returned when the bound doesn't fit in a `u128`.
///
/// This is computed bottom up, in the same way that the minimum and maximum
/// length of a match are computed for an `Hir`.
pub fn distinct_bound(hir: &Hir, ceiling: u32) -> Option<u128> {
    match *hir.kind() {
        HirKind::Empty | HirKind::Literal(_) | HirKind::Look(_) => Some(1),
        HirKind::Class(ref class) => u128::try_from(class_len(class)).ok(),
        HirKind::Repetition(ref rep) => {
            let n = distinct_bound(&rep.sub, ceiling)?;
            let (min, max) = repetition_bounds(rep, ceiling);
            repetition_bound(n, min, max)
        }
        HirKind::Capture(ref cap) => distinct_bound(&cap.sub, ceiling),
        HirKind::Concat(ref subs) => subs.iter().try_fold(1u128, |acc, sub| {
            acc.checked_mul(distinct_bound(sub, ceiling)?)
        }),
        HirKind::Alternation(ref subs) => {
            subs.iter().try_fold(0u128, |acc, sub| {
                acc.checked_add(distinct_bound(sub, ceiling)?)
            })
        }
    }
}

/// The sum of `n^k` for every `k` in `min..=max`.
fn repetition_bound(n: u128, min: u32, max: u32) -> Option<u128> {
    match n {
        // Zero repetitions of nothing is still one (empty) string.
        0 => Some(if min == 0 { 1 } else { 0 }),
        1 => Some(u128::from(max - min) + 1),
        _ => {
            let mut total = 0u128;
            let mut power = n.checked_pow(min)?;
            for k in min..=max {
                total = total.checked_add(power)?;
                if k < max {
                    power = power.checked_mul(n)?;
                }
            }
            Some(total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(pattern: &str, ceiling: u32) -> Option<u128> {
        distinct_bound(&regex_syntax::parse(pattern).unwrap(), ceiling)
    }

    #[test]
    fn leaves() {
        assert_eq!(Some(1), bound("", 5));
        assert_eq!(Some(1), bound("abc", 5));
        assert_eq!(Some(1), bound("^$", 5));
        assert_eq!(Some(2), bound("[ab]", 5));
        assert_eq!(Some(92), bound("[^abc]", 5));
        assert_eq!(Some(95), bound(".", 5));
        assert_eq!(Some(0), bound("[a&&b]", 5));
        assert_eq!(Some(10), bound(r"\d", 5));
        assert_eq!(Some(25), bound("[α-ω]", 5));
    }

    #[test]
    fn combinations() {
        assert_eq!(Some(4), bound("[ab][cd]", 5));
        assert_eq!(Some(2), bound("(foo|bar)", 5));
        assert_eq!(Some(6), bound("a*", 5));
        assert_eq!(Some(5), bound("a+", 5));
        assert_eq!(Some(2 + 4 + 8), bound("[ab]{1,3}", 100));
        assert_eq!(Some(3), bound("(a|b)?", 5));
    }

    #[test]
    fn overflow() {
        assert_eq!(None, bound(".{100}", 5));
        assert_eq!(None, bound(".*", 1_000));
    }

    #[test]
    fn repetition_of_nothing() {
        assert_eq!(Some(1), repetition_bound(0, 0, 5));
        assert_eq!(Some(0), repetition_bound(0, 1, 5));
    }
}
