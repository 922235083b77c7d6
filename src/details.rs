//! Deduplicating, insertion-ordered detail sink.
//!
//! [`Details`] is the container every rule evaluation writes its
//! explanations into. It preserves insertion order but silently drops a
//! value that is already present, so a composite evaluation in which
//! several branches report the same reason yields that reason exactly once,
//! at the position of its first occurrence.
//!
//! The container exposes appending and read-only views, nothing else: no
//! removal, no indexed insertion. Uniqueness therefore holds by
//! construction rather than by post-filtering.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity of the ordered backbone. Most evaluations report a
/// handful of reasons at most, so small runs stay off the heap.
const INLINE_DETAILS: usize = 4;

/// Insertion-ordered collection of explanation entries with set semantics.
///
/// Appending a value already present (by equality) is a no-op; the first
/// occurrence keeps its position. Bulk appends filter each element
/// individually against the current contents, so a single bulk call also
/// deduplicates within itself.
///
/// Mutating operations require `D: Eq + Hash + Clone` for the membership
/// index. Detail types are message-like values (strings, small enums), so
/// the bounds are natural.
pub struct Details<D> {
    entries: SmallVec<[D; INLINE_DETAILS]>,
    seen: HashSet<D>,
}

impl<D> Details<D> {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            seen: HashSet::new(),
        }
    }

    /// Number of distinct entries recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no entry has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[D] {
        &self.entries
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.entries.iter()
    }
}

impl<D: Eq + Hash> Details<D> {
    /// `true` if an equal entry has already been recorded.
    #[must_use]
    pub fn contains(&self, detail: &D) -> bool {
        self.seen.contains(detail)
    }
}

impl<D: Eq + Hash + Clone> Details<D> {
    /// Append `detail` unless an equal entry is already present.
    ///
    /// Returns whether the entry was admitted.
    pub fn push(&mut self, detail: D) -> bool {
        if self.seen.contains(&detail) {
            return false;
        }
        self.seen.insert(detail.clone());
        self.entries.push(detail);
        debug_assert_eq!(self.entries.len(), self.seen.len());
        true
    }
}

impl<D> Default for Details<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Clone> Clone for Details<D> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for Details<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

// Equality considers the ordered entries only; the membership index is
// derived state.
impl<D: PartialEq> PartialEq for Details<D> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<D: Eq> Eq for Details<D> {}

impl<D: Eq + Hash + Clone> Extend<D> for Details<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for detail in iter {
            self.push(detail);
        }
    }
}

impl<D: Eq + Hash + Clone> FromIterator<D> for Details<D> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut details = Self::new();
        details.extend(iter);
        details
    }
}

impl<'a, D> IntoIterator for &'a Details<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<D> IntoIterator for Details<D> {
    type Item = D;
    type IntoIter = smallvec::IntoIter<[D; INLINE_DETAILS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Serialized as a plain sequence; the membership index is rebuilt on
// deserialization through the ordinary append path, so the no-duplicates
// invariant holds even for hand-written input.
impl<D: Serialize> Serialize for Details<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de, D> Deserialize<'de> for Details<D>
where
    D: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        struct DetailsVisitor<D>(PhantomData<D>);

        impl<'de, D> Visitor<'de> for DetailsVisitor<D>
        where
            D: Deserialize<'de> + Eq + Hash + Clone,
        {
            type Value = Details<D>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of detail entries")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Details<D>, A::Error> {
                let mut details = Details::new();
                while let Some(entry) = seq.next_element()? {
                    details.push(entry);
                }
                Ok(details)
            }
        }

        deserializer.deserialize_seq(DetailsVisitor(PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
