//! BucketArray: append-only array of optional chains.

use crate::chain::Chain;

/// One slot per bucket; a slot with no entries holds no chain.
///
/// The array only ever grows, and growth appends absent slots without
/// touching existing ones. Indexing past the end is a bookkeeping bug in the
/// caller and panics.
#[derive(Debug, Clone)]
pub struct BucketArray<T> {
    slots: Vec<Option<Chain<T>>>,
}

impl<T> BucketArray<T> {
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Multiply the slot count by `factor`, appending absent slots.
    ///
    /// Cost is proportional to the new slots only.
    pub fn grow(&mut self, factor: usize) {
        let new_len = self
            .slots
            .len()
            .checked_mul(factor)
            .expect("bucket count overflow");
        self.slots.resize_with(new_len, || None);
    }

    pub fn chain(&self, index: usize) -> Option<&Chain<T>> {
        self.slots[index].as_ref()
    }

    pub fn chain_mut(&mut self, index: usize) -> Option<&mut Chain<T>> {
        self.slots[index].as_mut()
    }

    /// The chain at `index`, allocated first if the slot is absent.
    pub fn chain_or_alloc(&mut self, index: usize) -> &mut Chain<T> {
        self.slots[index].get_or_insert_with(Chain::new)
    }

    /// Drop the chain at `index` if it holds nothing.
    pub fn release_if_empty(&mut self, index: usize) {
        if self.slots[index].as_ref().is_some_and(Chain::is_empty) {
            self.slots[index] = None;
        }
    }

    /// Sum of all chain lengths.
    #[cfg(test)]
    pub fn total_len(&self) -> usize {
        self.slots.iter().flatten().map(Chain::len).sum()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Chain<T>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (i, c)))
    }
}
