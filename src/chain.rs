//! Chain: the ordered collision list behind a single bucket.

/// Elements that landed in the same bucket, in arrival order.
///
/// Removal shifts later elements down so the chronological order of the
/// remaining elements is kept.
#[derive(Debug, Clone)]
pub struct Chain<T> {
    items: Vec<T>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Make room for `additional` more elements without pushing any.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Remove the element at `index`. Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Position of the first element matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().position(pred)
    }

    #[cfg(test)]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}
