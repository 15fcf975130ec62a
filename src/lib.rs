#![deny(missing_docs)]

//! The **k-set-partitions** crate enumerates all the ways of splitting a collection
//! into exactly `k` non-empty, disjoint blocks.
//!
//! The number of such partitionings of `n` elements is the Stirling number of the
//! second kind S(`n`, `k`), available from `stirling2`; the total over all `k` is the
//! Bell number, available from `bell`.
//!
//! Each result is a `Partitioning`: a sequence of `Partition` blocks, ordered by the
//! position of their first element in the input, so every grouping is produced exactly
//! once rather than once per ordering of its blocks. Elements keep their input order
//! inside a block.
//!
//! Partitionings are immutable values. Blocks are reference counted, and a partitioning
//! derived with `add_to_part` shares every block it did not change with its parent, so
//! extending one result can never affect another.
//!
//! # How to use
//!
//! Call `partition_into` to get every partitioning at once, or iterate a `PartitionsInto`
//! to build them one at a time in lexicographic order of their restricted growth sequences.
//!
//! ```
//! use k_set_partitions::partition_into;
//!
//! let all = partition_into(vec!['a', 'b', 'c'], 2).unwrap();
//! let blocks: Vec<_> = all.into_iter().map(|p| p.into_vecs()).collect();
//! assert_eq!(blocks, vec![
//!     vec![vec!['a', 'b'], vec!['c']],
//!     vec![vec!['a', 'c'], vec!['b']],
//!     vec![vec!['a'], vec!['b', 'c']],
//! ]);
//! ```
//!
//! Asking for more blocks than there are elements is an error; asking for zero blocks of a
//! non-empty collection simply has no solutions.
//!
//! Enable the `serde` feature to serialize partitionings as nested sequences.

use tracing::{debug, error, trace};

mod count;
mod error;
mod iter;
mod partitioning;

pub use count::{bell, stirling2};
pub use error::PartitionError;
pub use iter::PartitionsInto;
pub use partitioning::{Partition, Partitioning};

/// Partition `elements` into exactly `k` non-empty blocks, in every possible way.
///
/// Fails with `PartitionError::TooManyParts` if there are fewer elements than blocks.
/// For `k == 0` the result is empty unless `elements` is, in which case it holds the
/// single partitioning with no blocks.
pub fn partition_into<T, I>(elements: I, k: usize) -> Result<Vec<Partitioning<T>>, PartitionError>
    where I: IntoIterator<Item = T>, T: Clone
{
    let elts: Vec<T> = elements.into_iter().collect();
    if elts.len() < k {
        return Err(PartitionError::TooManyParts {parts: k, elements: elts.len()});
    }

    debug!(elements = elts.len(), parts = k, "partitioning");
    let result = partition_into_helper(&elts, vec![Partitioning::new()], k, 0)?;
    debug!(partitionings = result.len(), "partitioning done");
    Ok(result)
}

/// Places the first of `elts` into each partitioning of `result_so_far` in every allowed way,
/// then recurses on the rest.
///
/// Every partitioning in `result_so_far` has exactly `open_parts` blocks, and `empty_parts`
/// more must still be opened. Results that extend an existing block come before results
/// that open a new one.
fn partition_into_helper<T: Clone>(
    elts: &[T],
    result_so_far: Vec<Partitioning<T>>,
    empty_parts: usize,
    open_parts: usize
) -> Result<Vec<Partitioning<T>>, PartitionError>
{
    if empty_parts > elts.len() {
        error!(empty_parts, remaining = elts.len(), "more empty parts than elements left to fill them");
        return Err(PartitionError::UnfillableParts {empty_parts, remaining: elts.len()});
    }

    let (elt, rest) = match elts.split_first() {
        Some(split) => split,
        None => return Ok(result_so_far)
    };
    trace!(remaining = elts.len(), empty_parts, open_parts, partial = result_so_far.len(), "placing element");

    let mut result = Vec::new();

    // into an existing block, as long as the elements after this one can fill the empty ones
    if elts.len() > empty_parts {
        let mut augmented = Vec::with_capacity(open_parts * result_so_far.len());
        for i in 0..open_parts {
            for p in &result_so_far {
                augmented.push(p.add_to_part(i, elt.clone())?);
            }
        }
        result.extend(partition_into_helper(rest, augmented, empty_parts, open_parts)?);
    }

    // into a new block
    if empty_parts > 0 {
        let augmented = result_so_far.iter()
            .map(|p| p.add_to_part(open_parts, elt.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        result.extend(partition_into_helper(rest, augmented, empty_parts - 1, open_parts + 1)?);
    }

    Ok(result)
}
