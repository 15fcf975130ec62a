//! Exact counts of set partitions.
//!
//! Both functions are generic over the integer type and return `None` instead of
//! wrapping when the count, or a value needed to compute it, does not fit.

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, One, Zero};

/// Number of ways to partition a set of `n` elements into exactly `k` non-empty subsets.
///
/// This is the Stirling number of the second kind S(`n`, `k`), or `None` if it's too large for `N`.
pub fn stirling2<N>(n: usize, k: usize) -> Option<N>
    where N: Zero + One + CheckedAdd + CheckedMul + FromPrimitive + Clone
{
    if k > n {
        return Some(N::zero());
    }
    // S(i, j) with j < k - (n - i) never contributes to S(n, k)
    let row = stirling_row::<N>(n, k, |i| k.saturating_sub(n - i))?;
    row.into_iter().nth(k)
}

/// Number of partitions of a set of `n` elements.
///
/// Returns the `n`-th Bell number, or `None` if it's too large for `N`.
pub fn bell<N>(n: usize) -> Option<N>
    where N: Zero + One + CheckedAdd + CheckedMul + FromPrimitive + Clone
{
    let row = stirling_row::<N>(n, n, |_| 0)?;
    row.iter().try_fold(N::zero(), |acc, s| acc.checked_add(s))
}

/// Computes S(`n`, j) for j in `0..=width`, using S(i, j) = j S(i - 1, j) + S(i - 1, j - 1).
///
/// Entries of row `i` below `floor(i)` are left stale; the floor may grow by at most one
/// from row to row, so that every entry read was written on the previous row.
fn stirling_row<N>(n: usize, width: usize, floor: impl Fn(usize) -> usize) -> Option<Vec<N>>
    where N: Zero + One + CheckedAdd + CheckedMul + FromPrimitive + Clone
{
    let mut row = vec![N::zero(); width + 1];
    row[0] = N::one();

    for i in 1..=n {
        let hi = i.min(width);
        let lo = floor(i).max(1);
        for j in (lo..=hi).rev() {
            row[j] = if row[j].is_zero() {
                row[j - 1].clone()
            } else {
                N::from_usize(j)?.checked_mul(&row[j])?.checked_add(&row[j - 1])?
            };
        }
        row[0] = N::zero();
    }
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: usize, k: usize) -> u64 {
        let mut c = 1u64;
        for i in 1..k+1 {
            c *= (n - k + i) as u64;
            c /= i as u64;
        }
        c
    }

    #[test]
    fn stirling2_known_values() {
        assert_eq!(stirling2::<u64>(0, 0), Some(1));
        assert_eq!(stirling2::<u64>(3, 0), Some(0));
        assert_eq!(stirling2::<u64>(2, 3), Some(0));
        assert_eq!(stirling2::<u64>(3, 1), Some(1));
        assert_eq!(stirling2::<u64>(3, 3), Some(1));
        assert_eq!(stirling2::<u64>(4, 2), Some(7));
        assert_eq!(stirling2::<u64>(5, 3), Some(25));
        assert_eq!(stirling2::<u64>(10, 5), Some(42525));
        assert_eq!(stirling2::<u32>(12, 6), Some(1323652));
    }

    #[test]
    fn stirling2_boundaries() {
        for n in 1..30 {
            assert_eq!(stirling2::<u64>(n, 1), Some(1));
            assert_eq!(stirling2::<u64>(n, n), Some(1));
            assert_eq!(stirling2::<u64>(n, n - 1), Some(binomial(n, 2)));
            assert_eq!(stirling2::<u64>(n, 0), Some(0));
        }
    }

    #[test]
    fn stirling2_recurrence() {
        for n in 1..20 {
            for k in 1..n+1 {
                let lhs = stirling2::<u64>(n, k).unwrap();
                let rhs = k as u64 * stirling2::<u64>(n - 1, k).unwrap() + stirling2::<u64>(n - 1, k - 1).unwrap();
                assert_eq!(lhs, rhs, "S({}, {})", n, k);
            }
        }
    }

    // only the values S(n, k) depends on have to fit
    #[test]
    fn stirling2_small_types() {
        assert_eq!(stirling2::<u8>(20, 19), Some(190));
        assert_eq!(stirling2::<u8>(300, 300), Some(1));
        assert_eq!(stirling2::<u8>(6, 3), Some(90));
        assert_eq!(stirling2::<u8>(7, 3), None);
    }

    #[test]
    fn bell_numbers()
    {
        let mut bell_numbers = vec![1u64];
        let mut n = 0;

        assert_eq!(bell::<u64>(0), Some(1));
        loop {
            if let Some(sp) = bell::<u64>(n + 1) {
                let mut b = 0u64;
                for k in 0..(n+1) {
                    b += bell_numbers[k] * binomial(n, k);
                }
                assert_eq!(b, sp);
                bell_numbers.push(b);
            } else {
                break;
            }
            n += 1;
        }

        assert_eq!(bell_numbers.len(), 26);
        assert_eq!(bell_numbers[25], 4638590332229999353);
    }

    #[test]
    fn bell_is_sum_of_stirling2() {
        for n in 0..15 {
            let sum: u64 = (0..n+1).map(|k| stirling2::<u64>(n, k).unwrap()).sum();
            assert_eq!(bell::<u64>(n), Some(sum));
        }
    }
}
