use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Structure for storing elements of type `Value`, the structure can only be indexed by structures
/// of type `Key`.
///
/// Variables, propagators and watch lists are all stored in a [`KeyedVec`] so that an id of one
/// kind can never be used to index storage of another kind.
#[derive(Debug, Hash, PartialEq, Eq)]
pub(crate) struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub(crate) fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    pub(crate) fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grows the vector such that `key` becomes a valid index, filling new slots with
    /// `default_value`.
    pub(crate) fn accomodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub(crate) trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_indexed_by_their_key() {
        let mut keyed_vec: KeyedVec<usize, &str> = KeyedVec::default();

        let first = keyed_vec.push("a");
        let second = keyed_vec.push("b");

        assert_eq!("a", keyed_vec[first]);
        assert_eq!("b", keyed_vec[second]);
        assert_eq!(vec![0, 1], keyed_vec.keys().collect::<Vec<_>>());
    }

    #[test]
    fn accomodate_only_grows() {
        let mut keyed_vec: KeyedVec<usize, u32> = KeyedVec::default();

        keyed_vec.accomodate(3, 7);
        assert_eq!(4, keyed_vec.len());

        keyed_vec[1] = 2;
        keyed_vec.accomodate(1, 0);
        assert_eq!(4, keyed_vec.len());
        assert_eq!(2, keyed_vec[1]);
    }
}
