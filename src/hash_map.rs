use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::HashTable;

/// A hash map implemented using the Robin Hood [`HashTable`] as the
/// underlying storage.
///
/// The table underneath is generic over whole elements; the map expresses
/// its key-only identity by hashing and comparing nothing but the key
/// component of each pair, so values can be mutated in place without
/// disturbing an entry's position. Keys must implement `Hash + Eq`; the
/// hasher builder `S` is configurable.
#[derive(Clone)]
pub struct HashMap<K, V, S> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map that hashes keys with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(RandomState::new());
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a map that can hold at least `capacity` entries before its
    /// first resize, hashing keys with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let map: HashMap<i32, String, _> = HashMap::with_capacity_and_hasher(100, RandomState::new());
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of elements the map can hold before resizing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all key-value pairs and releases the map's memory.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Shrinks the map's capacity to fit its current number of entries.
    pub fn shrink_to_fit(&mut self) {
        self.table
            .shrink_to_fit(|pair| self.hash_builder.hash_one(&pair.0));
    }

    /// Reserves capacity for at least `additional` more entries.
    ///
    /// Returns `true` iff the table reallocated.
    pub fn reserve(&mut self, additional: usize) -> bool {
        self.table
            .reserve(additional, |pair| self.hash_builder.hash_one(&pair.0))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already had this key present, the value is updated in
    /// place and the old value is returned (the old key is kept).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let mut map: HashMap<&str, i32, RandomState> = HashMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("a", 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.find_index(hash, |pair| pair.0 == key) {
            Some(index) => {
                let pair = self.table.get_mut(index).unwrap();
                Some(core::mem::replace(&mut pair.1, value))
            }
            None => {
                self.table.insert_if_absent(
                    hash,
                    (key, value),
                    |stored, incoming| stored.0 == incoming.0,
                    |pair| self.hash_builder.hash_one(&pair.0),
                );
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let mut map: HashMap<i32, &str, RandomState> = HashMap::new();
    /// map.insert(1, "one");
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |pair| pair.0 == *key)
            .map(|pair| &pair.1)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, |pair| pair.0 == *key)
            .map(|pair| &mut pair.1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.table.contains(hash, |pair| pair.0 == *key)
    }

    /// Removes a key from the map, returning the value if the key was
    /// present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if
    /// the key was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |pair| pair.0 == *key)
    }

    /// Returns a reference to the value for `key`, inserting one produced
    /// by `builder` if the key is not present.
    ///
    /// `builder` is invoked at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let mut map: HashMap<i32, i32, RandomState> = HashMap::new();
    /// assert_eq!(*map.get_or_insert_with(3, || 9), 9);
    /// assert_eq!(*map.get_or_insert_with(3, || 0), 9);
    /// ```
    pub fn get_or_insert_with(&mut self, key: K, builder: impl FnOnce() -> V) -> &mut V {
        self.entry(key).or_insert_with(builder)
    }

    /// Merges a value into the map.
    ///
    /// If `key` is absent, `seed` is inserted. Otherwise `merge` is invoked
    /// with the current value and `seed`, updating the value in place.
    /// Returns a reference to the stored value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let mut counts: HashMap<&str, u64, RandomState> = HashMap::new();
    /// for word in ["a", "b", "a"] {
    ///     counts.merge(word, 1, |count, one| *count += one);
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    pub fn merge(&mut self, key: K, seed: V, merge: impl FnOnce(&mut V, V)) -> &mut V {
        let hash = self.hash_builder.hash_one(&key);
        let pair = self.table.merge(
            hash,
            (key, seed),
            |stored, incoming| stored.0 == incoming.0,
            |stored, incoming| merge(&mut stored.1, incoming.1),
            |pair| self.hash_builder.hash_one(&pair.0),
        );
        &mut pair.1
    }

    /// Gets the entry for the given key for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let mut map: HashMap<&str, i32, RandomState> = HashMap::new();
    /// *map.entry("poneyland").or_insert(12) += 10;
    /// assert_eq!(map.get(&"poneyland"), Some(&22));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.find_index(hash, |pair| pair.0 == key) {
            Some(index) => Entry::Occupied(OccupiedEntry { map: self, index }),
            None => Entry::Vacant(VacantEntry {
                map: self,
                key,
                hash,
            }),
        }
    }

    /// Retains only the pairs specified by the predicate.
    pub fn retain(&mut self, mut pred: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(|pair| pred(&pair.0, &mut pair.1));
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// An iterator visiting all keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Clears the map, returning all key-value pairs as an iterator.
    ///
    /// Keeps the allocated memory for reuse.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with a default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use rh_hash::HashMap;
    /// let map: HashMap<i32, String, RandomState> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map holding at least `capacity` entries without
    /// resizing, with a default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in a map, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V, S> {
    /// The key has no entry yet.
    Vacant(VacantEntry<'a, K, V, S>),
    /// The key already has an entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts `default` if the entry is vacant; returns a mutable
    /// reference to the value either way.
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(move || default)
    }

    /// Inserts a value computed from a closure if the entry is vacant;
    /// returns a mutable reference to the value either way.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            vacant => vacant,
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    /// Inserts the default value if the entry is vacant; returns a mutable
    /// reference to the value either way.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in a [`HashMap`].
///
/// This struct is created by the [`entry`] method on [`HashMap`] when the
/// requested key is not present.
///
/// [`entry`]: HashMap::entry
pub struct VacantEntry<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
    key: K,
    hash: u64,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Gets a reference to the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the key and `value` into the map and returns a mutable
    /// reference to the value.
    pub fn insert(self, value: V) -> &'a mut V {
        let pair = self.map.table.insert_if_absent(
            self.hash,
            (self.key, value),
            |stored, incoming| stored.0 == incoming.0,
            |pair| self.map.hash_builder.hash_one(&pair.0),
        );
        &mut pair.1
    }
}

/// A view into an occupied entry in a [`HashMap`].
///
/// This struct is created by the [`entry`] method on [`HashMap`] when the
/// requested key is present.
///
/// [`entry`]: HashMap::entry
pub struct OccupiedEntry<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
    index: usize,
}

// An OccupiedEntry is only constructed from an index returned by
// `find_index`, and the map is borrowed mutably for the entry's lifetime,
// so the index stays valid and occupied; the `unwrap`s below are
// infallible.
impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.map.table.get(self.index).unwrap().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.map.table.get(self.index).unwrap().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.table.get_mut(self.index).unwrap().1
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the map borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.table.get_mut(self.index).unwrap().1
    }

    /// Replaces the value in the entry, returning the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.map.table.remove_at(self.index).unwrap()
    }
}

/// An iterator over the entries of a [`HashMap`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| (&pair.0, &pair.1))
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// A draining iterator over the entries of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
