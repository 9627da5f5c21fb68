//! A wrapper around a sorted vector of tuples that BION uses to store objects.
//!
//! Keeping entries sorted by key is what makes object encoding byte-stable: the same
//! logical object always produces the same bytes.
//!
//! # Example
//!
//! ```
//! use std::collections::{BTreeMap, HashMap};
//! use bion::prelude::*;
//!
//! let key = Bytes::from("a");
//! let value = 1;
//!
//! // from a `BTreeMap`
//! let mut btmap = BTreeMap::new();
//! btmap.insert(key.clone(), value);
//!
//! let bt_vm = VecMap::from(btmap);
//!
//! // from a `HashMap`
//! let mut hashmap = HashMap::new();
//! hashmap.insert(key.clone(), value);
//!
//! let hm_vm = VecMap::from(hashmap);
//!
//! // from a vector of tuples
//! let entries = vec![(key.clone(), value)];
//!
//! let vec_vm = VecMap::from(entries);
//!
//! assert_eq!(bt_vm, hm_vm);
//! assert_eq!(hm_vm, vec_vm);
//! ```

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A map implemented as a sorted [`Vec`] of pairs with unique keys.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Ord, V>(Vec<(K, V)>);

impl<K: Ord, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K: Ord, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { Self::default() }

    /// Creates a [`VecMap`] from a vector of key-value pairs sorted by their first
    /// elements.
    ///
    /// # Panics
    ///
    /// This function will panic if `v` is not strictly sorted by its first element.
    ///
    /// ```should_panic
    /// use bion::prelude::*;
    ///
    /// let vmap = VecMap::from_sorted(vec![("b", ""), ("a", "")]);
    /// ```
    pub fn from_sorted(v: Vec<(K, V)>) -> Self {
        for i in 1..v.len() {
            if v[i - 1].0 >= v[i].0 {
                panic!("`Vec` is not sorted by key")
            }
        }
        VecMap(v)
    }

    /// Returns length.
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in key order.
    pub fn iter(&self) -> Iter<'_, (K, V)> { self.0.iter() }

    /// Looks up the value stored under `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use bion::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("b", 2), ("a", 1)]);
    ///
    /// assert_eq!(vmap.get(&"a"), Some(&1));
    /// assert_eq!(vmap.get(&"c"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0
            .binary_search_by(|(k, _)| k.borrow().cmp(key))
            .ok()
            .map(|ix| &self.0[ix].1)
    }

    /// Inserts a pair, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.binary_search_by(|(k, _)| k.cmp(&key)) {
            Ok(ix) => Some(std::mem::replace(&mut self.0[ix].1, value)),
            Err(ix) => {
                self.0.insert(ix, (key, value));
                None
            }
        }
    }
}

impl<K: Ord + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    ///
    /// # Example
    ///
    /// ```
    /// use bion::prelude::*;
    /// use std::collections::HashMap;
    ///
    /// let hm: HashMap<_, _> = VecMap::from(vec![("a", 1), ("b", 2)]).into_hashmap();
    ///
    /// assert_eq!(hm.get("b"), Some(&2));
    /// ```
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

/// Sorts by key and keeps the last value of every repeated key.
impl<K: Ord, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(mut v: Vec<(K, V)>) -> Self {
        v.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));

        let mut out: Vec<(K, V)> = Vec::with_capacity(v.len());
        for (k, val) in v {
            match out.last_mut() {
                Some(last) if last.0 == k => last.1 = val,
                _ => out.push((k, val)),
            }
        }
        VecMap(out)
    }
}

impl<K: Ord + Hash, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self {
        let v: Vec<(K, V)> = hm.into_iter().collect();
        v.into()
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { VecMap(bt.into_iter().collect()) }
}

impl<K: Ord, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K: Ord, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap::from(Vec::from_iter(iter))
    }
}
