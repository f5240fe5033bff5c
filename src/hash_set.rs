use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::HashTable;
use crate::hash_table::InsertOutcome;

/// A hash set backed by the Robin Hood [`HashTable`].
///
/// Values must implement `Hash + Eq`; the hasher builder `S` is
/// configurable.
#[derive(Clone)]
pub struct HashSet<T, S> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.table.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set that hashes values with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let set: HashSet<i32, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a set that can hold at least `capacity` values before its
    /// first resize, hashing values with `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of values the set can hold before resizing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values and releases the set's memory.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Shrinks the set's capacity to fit its current number of values.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit(|v| self.hash_builder.hash_one(v));
    }

    /// Reserves capacity for at least `additional` more values.
    ///
    /// Returns `true` iff the table reallocated.
    pub fn reserve(&mut self, additional: usize) -> bool {
        self.table
            .reserve(additional, |v| self.hash_builder.hash_one(v))
    }

    /// Adds a value to the set, returning `true` iff it was not already
    /// present. When an equal value is present the new one is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let mut primes: HashSet<i32, RandomState> = HashSet::new();
    /// assert!(primes.insert(31));
    /// assert!(!primes.insert(31));
    /// assert_eq!(primes.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        let outcome = self.table.insert(
            hash,
            value,
            false,
            |stored, incoming| stored == incoming,
            |v| self.hash_builder.hash_one(v),
        );
        outcome == InsertOutcome::Inserted
    }

    /// Adds a value to the set, replacing an existing equal value.
    ///
    /// Returns `true` if the value was newly inserted, `false` if it
    /// replaced an equal one. Replacing matters for values whose equality
    /// ignores part of their state.
    pub fn replace(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        let outcome = self.table.insert(
            hash,
            value,
            true,
            |stored, incoming| stored == incoming,
            |v| self.hash_builder.hash_one(v),
        );
        outcome == InsertOutcome::Inserted
    }

    /// Returns `true` if an equal value is in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let mut seen: HashSet<i32, RandomState> = HashSet::new();
    /// seen.insert(6);
    /// assert!(seen.contains(&6));
    /// assert!(!seen.contains(&60));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.contains(hash, |v| v == value)
    }

    /// Returns a reference to the value in the set, if any, that is equal
    /// to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Inserts a value if not present, then returns a reference to the
    /// stored value.
    pub fn get_or_insert(&mut self, value: T) -> &T {
        let hash = self.hash_builder.hash_one(&value);
        self.table.insert_if_absent(
            hash,
            value,
            |stored, incoming| stored == incoming,
            |v| self.hash_builder.hash_one(v),
        )
    }

    /// Removes an equal value from the set, returning whether one was
    /// present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let mut seen: HashSet<i32, RandomState> = HashSet::new();
    /// seen.insert(6);
    /// assert!(seen.remove(&6));
    /// assert!(!seen.remove(&6));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to
    /// the given one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Retains only the values specified by the predicate.
    pub fn retain(&mut self, mut pred: impl FnMut(&T) -> bool) {
        self.table.retain(|value| pred(value));
    }

    /// Returns an iterator over the values of the set, in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Clears the set, returning all values as an iterator.
    ///
    /// Keeps the allocated memory for reuse.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Visits the values representing the union of `self` and `other`, in
    /// arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let a: HashSet<i32, RandomState> = [1, 2, 3].into_iter().collect();
    /// let b: HashSet<i32, RandomState> = [3, 4].into_iter().collect();
    /// assert_eq!(a.union(&b).count(), 4);
    /// ```
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T, S> {
        Union {
            iter: self.iter().chain(other.difference(self)),
        }
    }

    /// Visits the values representing the intersection of `self` and
    /// `other`, in arbitrary order.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// Visits the values of `self` that are not in `other`, in arbitrary
    /// order.
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns `true` if `self` and `other` have no values in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if every value of `self` is contained in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set with a default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashSet;
    /// let set: HashSet<i32, RandomState> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set holding at least `capacity` values without
    /// resizing, with a default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values of a [`HashSet`].
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the values of a [`HashSet`].
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A lazy iterator producing values in the union of two sets.
pub struct Union<'a, T, S> {
    iter: core::iter::Chain<Iter<'a, T>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

/// A lazy iterator producing values in the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.iter.next()?;
            if self.other.contains(value) {
                return Some(value);
            }
        }
    }
}

/// A lazy iterator producing values in the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.iter.next()?;
            if !self.other.contains(value) {
                return Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipState {
        x: u64,
        y: u64,
    }

    impl BuildHasher for SipState {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.x, self.y)
        }
    }

    impl Default for SipState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                x: rng.try_next_u64().unwrap_or(17),
                y: rng.try_next_u64().unwrap_or(19),
            }
        }
    }

    #[test]
    fn test_new_and_insert() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        assert!(set.is_empty());

        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_set_semantics_with_duplicates() {
        let mut set: HashSet<i32, SipState> = HashSet::new();

        for k in [
            1, 3, 5, 7, 9, 8, 6, 3, 4, 2, 3, 5, 6, 7, 8, 9, 2, 3, 4, 1, 2, 3, 5, 6, 4, 3, 5, 8,
            7, 9, 0, 8, 6,
        ] {
            set.insert(k);
        }

        assert_eq!(set.len(), 10);
        for k in 0..10 {
            assert!(set.contains(&k), "missing {k}");
        }
    }

    #[test]
    fn test_replace() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        assert!(set.replace(7));
        assert!(!set.replace(7));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_contains_and_get() {
        let mut set = HashSet::with_hasher(SipState::default());
        set.insert("alpha".to_string());

        assert!(set.contains(&"alpha".to_string()));
        assert!(!set.contains(&"beta".to_string()));
        assert_eq!(set.get(&"alpha".to_string()), Some(&"alpha".to_string()));
        assert_eq!(set.get(&"beta".to_string()), None);
    }

    #[test]
    fn test_get_or_insert() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        assert_eq!(*set.get_or_insert(5), 5);
        assert_eq!(*set.get_or_insert(5), 5);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_and_take() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        set.insert(1);
        set.insert(2);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.take(&2), Some(2));
        assert_eq!(set.take(&2), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear_and_reserve() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        for i in 0..100 {
            set.insert(i);
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 0);

        assert!(set.reserve(50));
        assert!(set.capacity() >= 50);
    }

    #[test]
    fn test_retain() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        for i in 0..100 {
            set.insert(i);
        }

        set.retain(|v| v % 4 == 0);
        assert_eq!(set.len(), 25);
        for i in 0..100 {
            assert_eq!(set.contains(&i), i % 4 == 0);
        }
    }

    #[test]
    fn test_iter_and_drain() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        for i in 0..10 {
            set.insert(i);
        }

        let collected: Vec<i32> = set.iter().copied().collect();
        assert_eq!(collected.len(), 10);
        for i in 0..10 {
            assert!(collected.contains(&i));
        }

        let drained: Vec<i32> = set.drain().collect();
        assert_eq!(drained.len(), 10);
        assert!(set.is_empty());
    }

    #[test]
    fn test_union_intersection_difference() {
        let a: HashSet<i32, SipState> = (0..8).collect();
        let b: HashSet<i32, SipState> = (4..12).collect();

        let union: std::collections::HashSet<i32> = a.union(&b).copied().collect();
        assert_eq!(union, (0..12).collect());

        let intersection: std::collections::HashSet<i32> = a.intersection(&b).copied().collect();
        assert_eq!(intersection, (4..8).collect());

        let difference: std::collections::HashSet<i32> = a.difference(&b).copied().collect();
        assert_eq!(difference, (0..4).collect());

        let reverse: std::collections::HashSet<i32> = b.difference(&a).copied().collect();
        assert_eq!(reverse, (8..12).collect());
    }

    #[test]
    fn test_subset_and_disjoint() {
        let a: HashSet<i32, SipState> = (0..4).collect();
        let b: HashSet<i32, SipState> = (0..8).collect();
        let c: HashSet<i32, SipState> = (10..14).collect();

        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(a.is_disjoint(&c));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_extend_and_from_iterator() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        set.extend(0..50);
        assert_eq!(set.len(), 50);

        let collected: HashSet<i32, SipState> = (0..10).collect();
        assert_eq!(collected.len(), 10);
        assert!(collected.contains(&9));

        let borrowed: Vec<&i32> = (&collected).into_iter().collect();
        assert_eq!(borrowed.len(), 10);
    }

    #[test]
    fn test_random_strings_match_reference() {
        let mut set = HashSet::with_hasher(SipState::default());
        let mut reference: std::collections::HashSet<String> = std::collections::HashSet::new();
        let mut rng = OsRng;

        // Interleaved insert/remove of short random strings, checked
        // against the standard library set at every step.
        for _ in 0..1000 {
            let key = format!("{:010x}", rng.try_next_u64().unwrap() & 0xFF_FFFF_FFFF);
            if rng.try_next_u64().unwrap() % 3 == 0 {
                assert_eq!(set.remove(&key), reference.remove(&key));
            } else {
                assert_eq!(set.insert(key.clone()), reference.insert(key));
            }
            assert_eq!(set.len(), reference.len());
        }

        for key in &reference {
            assert!(set.contains(key));
        }
        let mirrored: std::collections::HashSet<String> = set.iter().cloned().collect();
        assert_eq!(mirrored, reference);
    }

    #[test]
    fn test_growth_preserves_membership() {
        let mut set: HashSet<u64, SipState> = HashSet::new();
        let mut reference = std::collections::HashSet::new();
        let mut rng = OsRng;

        for _ in 0..3000 {
            let v = rng.try_next_u64().unwrap();
            set.insert(v);
            reference.insert(v);
        }

        assert_eq!(set.len(), reference.len());
        let collected: std::collections::HashSet<u64> = set.iter().copied().collect();
        assert_eq!(collected, reference);
    }

    #[test]
    fn test_debug_format() {
        let mut set: HashSet<i32, SipState> = HashSet::new();
        set.insert(1);
        let repr = format!("{:?}", set);
        assert!(repr.contains('1'));
    }
}
