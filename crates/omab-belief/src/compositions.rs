//! Weak compositions: every way to drop `total` indistinguishable pulls into
//! a fixed number of buckets.
//!
//! For a belief over N arms there are 2N buckets (one alpha and one beta
//! increment per arm), so the beliefs exactly `d` pulls below a state are in
//! bijection with the weak compositions of `d` into 2N parts. There are
//! `C(d + 2N - 1, 2N - 1)` of them.

/// Iterator over the weak compositions of `total` into `buckets` parts,
/// in reverse lexicographic order starting from `[total, 0, .., 0]`.
#[derive(Debug, Clone)]
pub struct Compositions {
    current: Option<Vec<u32>>,
}

impl Compositions {
    /// Panics on zero buckets.
    pub fn new(total: u32, buckets: usize) -> Self {
        assert!(buckets > 0, "at least one bucket");
        let mut first = vec![0; buckets];
        first[0] = total;
        Self {
            current: Some(first),
        }
    }

    /// `C(total + buckets - 1, buckets - 1)`, the length of the iterator.
    pub fn size(total: u32, buckets: usize) -> usize {
        binomial(total as usize + buckets - 1, buckets - 1)
    }

    /// Successor of `c`: move the tail mass plus one unit off the rightmost
    /// non-empty bucket before the last into its neighbour.
    fn advance(c: &[u32]) -> Option<Vec<u32>> {
        let last = c.len() - 1;
        let i = (0..last).rev().find(|&i| c[i] > 0)?;
        let mut next = c.to_vec();
        let tail = next[last];
        next[last] = 0;
        next[i] -= 1;
        next[i + 1] = tail + 1;
        Some(next)
    }
}

impl Iterator for Compositions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        self.current = Self::advance(&current);
        Some(current)
    }
}

/// Binomial coefficient `C(n, k)`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn enumerates_small_case_in_order() {
        let all = Compositions::new(2, 2).collect::<Vec<_>>();
        assert_eq!(all, vec![vec![2, 0], vec![1, 1], vec![0, 2]]);
    }

    #[test]
    fn zero_total_has_one_composition() {
        assert_eq!(Compositions::new(0, 4).collect::<Vec<_>>(), vec![vec![0; 4]]);
    }

    #[test]
    fn single_bucket_holds_everything() {
        assert_eq!(Compositions::new(5, 1).collect::<Vec<_>>(), vec![vec![5]]);
    }

    #[test]
    fn compositions_are_distinct_and_sum_to_total() {
        for buckets in 1..6 {
            for total in 0..6 {
                let all = Compositions::new(total, buckets).collect::<Vec<_>>();
                let unique = all.iter().cloned().collect::<HashSet<_>>();
                assert_eq!(all.len(), unique.len());
                assert_eq!(all.len(), Compositions::size(total, buckets));
                assert!(all.iter().all(|c| c.iter().sum::<u32>() == total));
            }
        }
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(binomial(5, 3), 10);
        assert_eq!(binomial(6, 3), 20);
        assert_eq!(binomial(4, 0), 1);
        assert_eq!(binomial(3, 4), 0);
    }
}
