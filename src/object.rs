use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use ahash::AHashMap;

use crate::value::OrderedValue;

// below this a linear scan is cheaper than hashing
const KEY_INDEX_THRESHOLD: usize = 16;

/// A JSON object held as a sequence of key/value entries in arrival order.
///
/// Duplicate keys are allowed and kept as separate entries; keyed lookup resolves to the
/// first matching entry. A key to first-position map is built lazily for lookups once the
/// object is large enough; the entry sequence stays the source of truth for iteration.
#[derive(Clone, Default)]
pub struct OrderedObject<'j> {
    entries: Vec<(Cow<'j, str>, OrderedValue<'j>)>,
    index: OnceLock<AHashMap<Cow<'j, str>, usize>>,
}

impl fmt::Debug for OrderedObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for OrderedObject<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<'j> OrderedObject<'j> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: OnceLock::new(),
        }
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value for `key`; the first entry wins when the key is duplicated.
    pub fn get(&self, key: &str) -> Option<&OrderedValue<'j>> {
        if self.entries.len() < KEY_INDEX_THRESHOLD {
            self.position(key).map(|i| &self.entries[i].1)
        } else {
            let map = self.index.get_or_init(|| {
                let mut map = AHashMap::with_capacity(self.entries.len());
                for (i, (key, _)) in self.entries.iter().enumerate() {
                    map.entry(key.clone()).or_insert(i);
                }
                map
            });
            map.get(key).map(|&i| &self.entries[i].1)
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OrderedValue<'j>> {
        match self.position(key) {
            Some(i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Replace the value for `key` in place, keeping its position, and return the previous
    /// value; append a new entry when the key is absent.
    pub fn set(
        &mut self,
        key: impl Into<Cow<'j, str>>,
        value: impl Into<OrderedValue<'j>>,
    ) -> Option<OrderedValue<'j>> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value.into())),
            None => {
                self.push_entry(key, value.into());
                None
            }
        }
    }

    /// Append an entry unconditionally, even when the key already exists.
    pub fn append(&mut self, key: impl Into<Cow<'j, str>>, value: impl Into<OrderedValue<'j>>) {
        self.push_entry(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + use<'_, 'j> {
        self.entries.iter().map(|(k, _)| k.as_ref())
    }

    pub fn values(&self) -> impl Iterator<Item = &OrderedValue<'j>> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// An iterator over entries in arrival order. Each handle holds its own position, so any
    /// number of them can traverse the same object independently.
    pub fn iter(&self) -> Entries<'_, 'j> {
        Entries {
            entries: &self.entries,
            position: 0,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.as_ref() == key)
    }

    fn push_entry(&mut self, key: Cow<'j, str>, value: OrderedValue<'j>) {
        if let Some(map) = self.index.get_mut() {
            map.entry(key.clone()).or_insert(self.entries.len());
        }
        self.entries.push((key, value));
    }

    pub(crate) fn into_static(self) -> OrderedObject<'static> {
        OrderedObject {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_static()))
                .collect(),
            index: OnceLock::new(),
        }
    }

    pub(crate) fn to_static(&self) -> OrderedObject<'static> {
        OrderedObject {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (Cow::Owned(k.to_string()), v.to_static()))
                .collect(),
            index: OnceLock::new(),
        }
    }
}

impl<'j, K: Into<Cow<'j, str>>, V: Into<OrderedValue<'j>>> FromIterator<(K, V)> for OrderedObject<'j> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut object = Self::new();
        object.extend(iter);
        object
    }
}

impl<'j, K: Into<Cow<'j, str>>, V: Into<OrderedValue<'j>>> Extend<(K, V)> for OrderedObject<'j> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl<'i, 'j> IntoIterator for &'i OrderedObject<'j> {
    type Item = (&'i str, &'i OrderedValue<'j>);
    type IntoIter = Entries<'i, 'j>;

    fn into_iter(self) -> Entries<'i, 'j> {
        self.iter()
    }
}

/// A cursor over an object's entries.
///
/// Created by [OrderedObject::iter]. The position belongs to the handle, not the object, and
/// [Entries::reset] rewinds it for another full traversal. Once exhausted, `next` keeps
/// returning `None`.
#[derive(Debug, Clone)]
pub struct Entries<'i, 'j> {
    entries: &'i [(Cow<'j, str>, OrderedValue<'j>)],
    position: usize,
}

impl<'i, 'j> Entries<'i, 'j> {
    /// Rewind to the first entry.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'i, 'j> Iterator for Entries<'i, 'j> {
    type Item = (&'i str, &'i OrderedValue<'j>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.get(self.position)?;
        self.position += 1;
        Some((key.as_ref(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entries<'_, '_> {}
