//! The `Partition` and `Partitioning` value types.
//!
//! Both are immutable once built: extending a partitioning produces a new one,
//! and blocks that were not touched are shared with the original through
//! reference counting, so copying a partitioning costs one handle per block.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::slice;
use std::sync::Arc;

use crate::PartitionError;

/// One block of a partitioning: a non-empty, immutable sequence of elements
pub struct Partition<T>
{
    elts: Arc<[T]>
}

impl<T> Partition<T>
{
    fn singleton(elt: T) -> Self {
        Partition {elts: Arc::from(vec![elt])}
    }

    /// Wraps a block that is known to be non-empty
    pub(crate) fn from_vec(elts: Vec<T>) -> Self {
        debug_assert!(!elts.is_empty());
        Partition {elts: Arc::from(elts)}
    }

    /// Returns the elements of the block in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.elts
    }

    /// Returns `true` if both handles point at the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elts, &other.elts)
    }

    /// A new block holding the elements of this one followed by `elt`
    fn appended(&self, elt: T) -> Self
        where T: Clone
    {
        let mut elts = Vec::with_capacity(self.elts.len() + 1);
        elts.extend_from_slice(&self.elts);
        elts.push(elt);
        Partition {elts: Arc::from(elts)}
    }
}

// derive would add a `T: Clone` bound
impl<T> Clone for Partition<T>
{
    fn clone(&self) -> Self {
        Partition {elts: Arc::clone(&self.elts)}
    }
}

impl<T: fmt::Debug> fmt::Debug for Partition<T>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.elts.iter()).finish()
    }
}

impl<T> Deref for Partition<T>
{
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Partition<T>
{
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Borrow<[T]> for Partition<T>
{
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a Partition<T>
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.elts.iter()
    }
}

impl<T: PartialEq> PartialEq for Partition<T>
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Partition<T> {}

impl<T: PartialOrd> PartialOrd for Partition<T>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Partition<T>
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Partition<T>
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// One grouping of elements into blocks, ordered by the position of each block's first element.
///
/// The blocks are only reachable through shared references, so a value handed out by the
/// enumerator can never be changed behind the back of a sibling that shares its blocks.
/// Use `add_to_part` to derive an extended partitioning.
pub struct Partitioning<T>
{
    parts: Vec<Partition<T>>
}

impl<T> Partitioning<T>
{
    /// Create the partitioning with no blocks
    pub fn new() -> Self {
        Partitioning {parts: Vec::new()}
    }

    pub(crate) fn from_parts(parts: Vec<Partition<T>>) -> Self {
        Partitioning {parts}
    }

    /// Returns the blocks in creation order
    pub fn parts(&self) -> &[Partition<T>] {
        &self.parts
    }

    /// Returns the total number of elements across all blocks
    pub fn element_count(&self) -> usize {
        self.parts.iter().map(|p| p.len()).sum()
    }

    /// Iterates over every element, block by block
    pub fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        self.parts.iter().flat_map(|p| p.iter())
    }

    /// Returns a new partitioning equal to this one except that `elt` is appended to block `i`.
    ///
    /// If `i` equals the number of blocks, a new singleton block is opened at the end.
    /// Blocks other than `i` are shared with `self`, which is left unchanged.
    pub fn add_to_part(&self, i: usize, elt: T) -> Result<Self, PartitionError>
        where T: Clone
    {
        let n = self.parts.len();
        let mut parts = Vec::with_capacity(if i == n {n + 1} else {n});
        parts.extend(self.parts.iter().cloned());
        match i.cmp(&n) {
            Ordering::Less => parts[i] = parts[i].appended(elt),
            Ordering::Equal => parts.push(Partition::singleton(elt)),
            Ordering::Greater => return Err(PartitionError::PartOutOfRange {index: i, parts: n}),
        }
        Ok(Partitioning {parts})
    }

    /// The set that has been partitioned, i.e. the union of all blocks, flattened in block order.
    pub fn partitioned_set(&self) -> Vec<T>
        where T: Clone
    {
        self.elements().cloned().collect()
    }

    /// Returns `true` if this partitions exactly `elements`.
    ///
    /// Quadratic: every element of `elements` is searched for among the blocks.
    pub fn is_partitioning_for(&self, elements: &[T]) -> bool
        where T: PartialEq
    {
        self.element_count() == elements.len()
            && elements.iter().all(|e| self.parts.iter().any(|p| p.contains(e)))
    }

    /// Converts to plain nested vectors
    pub fn into_vecs(self) -> Vec<Vec<T>>
        where T: Clone
    {
        self.parts.iter().map(|p| p.to_vec()).collect()
    }
}

impl<T> Default for Partitioning<T>
{
    fn default() -> Self {
        Self::new()
    }
}

// derive would add a `T: Clone` bound
impl<T> Clone for Partitioning<T>
{
    fn clone(&self) -> Self {
        Partitioning {parts: self.parts.clone()}
    }
}

impl<T: fmt::Debug> fmt::Debug for Partitioning<T>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.parts.iter()).finish()
    }
}

impl<T> Deref for Partitioning<T>
{
    type Target = [Partition<T>];

    fn deref(&self) -> &[Partition<T>] {
        self.parts()
    }
}

impl<T> AsRef<[Partition<T>]> for Partitioning<T>
{
    fn as_ref(&self) -> &[Partition<T>] {
        self.parts()
    }
}

impl<'a, T> IntoIterator for &'a Partitioning<T>
{
    type Item = &'a Partition<T>;
    type IntoIter = slice::Iter<'a, Partition<T>>;

    fn into_iter(self) -> slice::Iter<'a, Partition<T>> {
        self.parts.iter()
    }
}

impl<T> IntoIterator for Partitioning<T>
{
    type Item = Partition<T>;
    type IntoIter = std::vec::IntoIter<Partition<T>>;

    fn into_iter(self) -> std::vec::IntoIter<Partition<T>> {
        self.parts.into_iter()
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Partitioning<T>
{
    type Error = PartitionError;

    /// Builds a partitioning from explicit blocks, rejecting empty ones
    fn try_from(blocks: Vec<Vec<T>>) -> Result<Self, PartitionError> {
        if let Some(index) = blocks.iter().position(|b| b.is_empty()) {
            return Err(PartitionError::EmptyPart {index});
        }
        Ok(Partitioning {parts: blocks.into_iter().map(Partition::from_vec).collect()})
    }
}

impl<T: PartialEq> PartialEq for Partitioning<T>
{
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl<T: Eq> Eq for Partitioning<T> {}

impl<T: PartialOrd> PartialOrd for Partitioning<T>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.parts.partial_cmp(&other.parts)
    }
}

impl<T: Ord> Ord for Partitioning<T>
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl<T: Hash> Hash for Partitioning<T>
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

#[cfg(feature = "serde")]
mod serde_impls
{
    use serde::de::{Deserialize, Deserializer, Error};
    use serde::ser::{Serialize, Serializer};

    use super::{Partition, Partitioning};

    impl<T: Serialize> Serialize for Partition<T>
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Partition<T>
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let elts = Vec::<T>::deserialize(deserializer)?;
            if elts.is_empty() {
                return Err(D::Error::invalid_length(0, &"a non-empty sequence"));
            }
            Ok(Partition::from_vec(elts))
        }
    }

    impl<T: Serialize> Serialize for Partitioning<T>
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.parts())
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Partitioning<T>
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let blocks = Vec::<Vec<T>>::deserialize(deserializer)?;
            Partitioning::try_from(blocks).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Partitioning<char> {
        Partitioning::try_from(vec![vec!['a', 'c'], vec!['b']]).unwrap()
    }

    #[test]
    fn new_is_empty() {
        let p = Partitioning::<u8>::new();
        assert!(p.is_empty());
        assert_eq!(p.element_count(), 0);
        assert!(p.partitioned_set().is_empty());
        assert!(p.is_partitioning_for(&[]));
    }

    #[test]
    fn add_to_part_opens_new_block() {
        let p = Partitioning::new().add_to_part(0, 'a').unwrap();
        let q = p.add_to_part(1, 'b').unwrap();

        assert_eq!(p.len(), 1);
        assert_eq!(q.len(), 2);
        assert_eq!(q.clone().into_vecs(), vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn add_to_part_extends_block() {
        let p = abc();
        let q = p.add_to_part(1, 'd').unwrap();

        assert_eq!(q.into_vecs(), vec![vec!['a', 'c'], vec!['b', 'd']]);
        assert_eq!(p.into_vecs(), vec![vec!['a', 'c'], vec!['b']]);
    }

    #[test]
    fn add_to_part_out_of_range() {
        let p = abc();
        assert_eq!(p.add_to_part(3, 'd'), Err(PartitionError::PartOutOfRange {index: 3, parts: 2}));
    }

    #[test]
    fn untouched_blocks_are_shared() {
        let p = abc();
        let x = p.add_to_part(0, 'd').unwrap();
        let y = p.add_to_part(2, 'd').unwrap();

        assert!(!x[0].ptr_eq(&p[0]));
        assert!(x[1].ptr_eq(&p[1]));
        assert!(y[0].ptr_eq(&p[0]));
        assert!(y[1].ptr_eq(&x[1]));
        assert_eq!(&*x[0], &['a', 'c', 'd']);
        assert_eq!(&*y[0], &['a', 'c']);
    }

    #[test]
    fn partitioned_set_is_block_order() {
        assert_eq!(abc().partitioned_set(), vec!['a', 'c', 'b']);
        assert_eq!(abc().element_count(), 3);
    }

    #[test]
    fn is_partitioning_for() {
        let p = abc();
        assert!(p.is_partitioning_for(&['a', 'b', 'c']));
        assert!(p.is_partitioning_for(&['c', 'b', 'a']));
        assert!(!p.is_partitioning_for(&['a', 'b']));
        assert!(!p.is_partitioning_for(&['a', 'b', 'd']));
        assert!(!p.is_partitioning_for(&['a', 'b', 'c', 'd']));
    }

    #[test]
    fn try_from_rejects_empty_block() {
        let r = Partitioning::<u8>::try_from(vec![vec![1], vec![], vec![2]]);
        assert_eq!(r, Err(PartitionError::EmptyPart {index: 1}));
    }

    #[test]
    fn ordering_and_equality_by_content() {
        let a = abc();
        let b = Partitioning::try_from(vec![vec!['a', 'c'], vec!['b']]).unwrap();
        let c = Partitioning::try_from(vec![vec!['a'], vec!['b', 'c']]).unwrap();

        assert_eq!(a, b);
        assert!(!a[0].ptr_eq(&b[0]));
        assert!(c < a);
    }

    #[test]
    fn debug_is_nested_list() {
        assert_eq!(format!("{:?}", abc()), "[['a', 'c'], ['b']]");
    }

    #[test]
    fn into_vecs_with_shared_blocks() {
        let p = abc();
        let q = p.add_to_part(1, 'd').unwrap();
        drop(p);
        assert_eq!(q.into_vecs(), vec![vec!['a', 'c'], vec!['b', 'd']]);
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;

        #[test]
        fn to_json() {
            assert_eq!(serde_json::to_string(&abc()).unwrap(), r#"[["a","c"],["b"]]"#);
        }

        #[test]
        fn from_json() {
            let p: Partitioning<char> = serde_json::from_str(r#"[["a","c"],["b"]]"#).unwrap();
            assert_eq!(p, abc());
        }

        #[test]
        fn partition_from_json() {
            let p: Partition<u8> = serde_json::from_str("[3,1]").unwrap();
            assert_eq!(p.as_slice(), &[3, 1]);

            let err = serde_json::from_str::<Partition<u8>>("[]").unwrap_err();
            assert!(err.to_string().contains("a non-empty sequence"));
        }

        #[test]
        fn from_json_rejects_empty_block() {
            let r = serde_json::from_str::<Partitioning<u8>>("[[1],[]]");
            assert!(r.is_err());
        }
    }
}
