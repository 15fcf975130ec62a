//! Lazy enumeration of exact-k partitionings.
//!
//! Partitionings are encoded as restricted growth sequences: one label per element, such that
//! the first label is 0 and every label is at most one more than all the labels before it.
//! Elements with equal labels share a block, and blocks are numbered in order of their first
//! element, which is the same block order `partition_into` produces.

use std::iter::FusedIterator;

use tracing::debug;

use crate::{stirling2, Partition, PartitionError, Partitioning};

/// Iterator over all partitionings of a collection into exactly `k` non-empty blocks.
///
/// Yields the same partitionings as `partition_into`, in lexicographic order of their
/// restricted growth sequences, building one at a time.
#[derive(Debug, Clone)]
pub struct PartitionsInto<T>
{
    elts: Vec<T>,
    labels: Vec<usize>,
    // maxes[i] is the largest label among positions 0..i
    maxes: Vec<usize>,
    k: usize,
    done: bool,
    remaining: Option<usize>
}

impl<T: Clone> PartitionsInto<T>
{
    /// Prepare to enumerate the partitionings of `elements` into `k` blocks.
    ///
    /// Fails with `TooManyParts` if there are fewer elements than blocks.
    pub fn new<I>(elements: I, k: usize) -> Result<Self, PartitionError>
        where I: IntoIterator<Item = T>
    {
        let elts: Vec<T> = elements.into_iter().collect();
        let n = elts.len();
        if n < k {
            return Err(PartitionError::TooManyParts {parts: k, elements: n});
        }

        // lexicographically first: zeros, then a run up to k - 1 in the last positions
        let mut labels = vec![0; n];
        if k > 0 {
            for (j, l) in labels[n - k + 1..].iter_mut().enumerate() {
                *l = j + 1;
            }
        }
        let mut maxes = vec![0; n];
        for i in 1..n {
            maxes[i] = maxes[i - 1].max(labels[i - 1]);
        }
        let remaining = stirling2::<usize>(n, k);
        debug!(elements = n, parts = k, partitionings = ?remaining, "enumerating partitionings lazily");

        Ok(PartitionsInto {
            elts,
            labels,
            maxes,
            k,
            done: k == 0 && n > 0,
            remaining
        })
    }

    /// Returns the labels of the partitioning that will be yielded next, or `None` once exhausted.
    pub fn labels(&self) -> Option<&[usize]> {
        if self.done {None} else {Some(&self.labels)}
    }

    fn build(&self) -> Partitioning<T> {
        let mut blocks: Vec<Vec<T>> = vec![Vec::new(); self.k];
        for (elt, &l) in self.elts.iter().zip(&self.labels) {
            blocks[l].push(elt.clone());
        }
        Partitioning::from_parts(blocks.into_iter().map(Partition::from_vec).collect())
    }

    /// Move to the lexicographically next sequence with exactly `k` distinct labels,
    /// returning `false` if there is none.
    fn increment(&mut self) -> bool {
        let n = self.labels.len();
        let top = match self.k.checked_sub(1) {
            Some(top) if n > 1 => top,
            _ => return false
        };

        for i in (1..n).rev() {
            let next = self.labels[i] + 1;
            if next > self.maxes[i] + 1 || next > top {
                continue;
            }
            let m = self.maxes[i].max(next);
            let tail = n - 1 - i;
            let missing = top - m;
            if missing > tail {
                continue;
            }

            self.labels[i] = next;
            let zeros = n - missing;
            for l in &mut self.labels[i + 1..zeros] {
                *l = 0;
            }
            for (j, l) in self.labels[zeros..].iter_mut().enumerate() {
                *l = m + 1 + j;
            }
            for j in i + 1..n {
                self.maxes[j] = self.maxes[j - 1].max(self.labels[j - 1]);
            }
            return true;
        }
        false
    }
}

impl<T: Clone> Iterator for PartitionsInto<T>
{
    type Item = Partitioning<T>;

    fn next(&mut self) -> Option<Partitioning<T>> {
        if self.done {
            return None;
        }
        let p = self.build();
        if !self.increment() {
            self.done = true;
        }
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining {
            Some(r) => (r, Some(r)),
            None => (0, None)
        }
    }
}

impl<T: Clone> FusedIterator for PartitionsInto<T> {}
