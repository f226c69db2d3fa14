//! Label sets with structural sharing.
//!
//! A [`LabelSet`] is an unordered collection of string labels attached to a
//! node, arc, hyperarc, or to a whole graph. It wraps the `im` crate's
//! persistent hash set, so cloning is O(1) and every "mutation" returns a new
//! set sharing structure with the original.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

/// An unordered, persistent set of string labels.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSet(im::HashSet<String>);

impl LabelSet {
    /// Creates an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self(im::HashSet::new())
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains the label.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Returns a new set with the label inserted.
    #[must_use]
    pub fn insert(&self, label: impl Into<String>) -> Self {
        let mut new = self.0.clone();
        new.insert(label.into());
        Self(new)
    }

    /// Returns a new set with the label removed.
    #[must_use]
    pub fn remove(&self, label: &str) -> Self {
        let mut new = self.0.clone();
        new.remove(label);
        Self(new)
    }

    /// Returns an iterator over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns a new set that is the union of this set and another.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.clone().union(other.0.clone()))
    }

    /// Returns a new set holding the labels present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.iter().filter(|l| other.contains(l)).map(String::from).collect())
    }

    /// Returns a new set holding the labels in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self(self.iter().filter(|l| !other.contains(l)).map(String::from).collect())
    }

    /// Returns true if every label in `self` is also in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|l| other.contains(l))
    }

    /// Returns true if the two sets share at least one label.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        // Walk the smaller set.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|l| large.contains(l))
    }
}

impl fmt::Debug for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for LabelSet {}

impl Hash for LabelSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // XOR of per-label hashes keeps the result order-independent.
        let mut combined: u64 = 0;
        for label in self.iter() {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            label.hash(&mut hasher);
            combined ^= hasher.finish();
        }
        self.len().hash(state);
        combined.hash(state);
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
