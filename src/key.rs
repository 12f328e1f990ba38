#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type IdMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdMap<K, V> = BTreeMap<K, V>;

/// Bound for entry identifiers.
///
/// With `std` this is `Clone + Hash + Eq` (ids are indexed in a `HashMap`); without it,
/// `Clone + Ord` (a `BTreeMap`). Integers and strings satisfy both.
#[cfg(feature = "std")]
pub trait EntryId: Clone + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: Clone + core::hash::Hash + Eq> EntryId for K {}

#[cfg(not(feature = "std"))]
pub trait EntryId: Clone + Ord {}
#[cfg(not(feature = "std"))]
impl<K: Clone + Ord> EntryId for K {}
