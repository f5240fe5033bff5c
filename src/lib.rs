#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Key-value map built on the Robin Hood table, with configurable hashers
/// and an entry API.
pub mod hash_map;

pub mod hash_table;

/// Set built on the Robin Hood table, with configurable hashers and
/// borrowing set-algebra iterators.
pub mod hash_set;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
