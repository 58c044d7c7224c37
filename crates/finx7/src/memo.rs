//! Single-slot cache for values derived from a few inputs.

/// Holds one value computed from a dependency key, recomputed only when the key changes.
///
/// ## Example
/// ```rs
/// use finx7::memo::Memo;
///
/// let mut controls = Memo::default();
/// let first = controls.get_or_compute((1, 3), |(page, total)| format!("{page}/{total}")).clone();
/// // Same key, the closure is not called again.
/// let again = controls.get_or_compute((1, 3), |_| unreachable!());
/// assert_eq!(&first, again);
/// ```
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        if !self.is_cached(&key) {
            self.slot = None;
        }

        let (_, value) = self.slot.get_or_insert_with(|| {
            let value = compute(&key);
            (key, value)
        });
        value
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn is_cached(&self, key: &K) -> bool {
        matches!(&self.slot, Some((cached, _)) if cached == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn recomputes_only_when_key_changes() {
        let calls = Cell::new(0);
        let mut memo = Memo::default();
        let double = |memo: &mut Memo<u32, u32>, key| {
            *memo.get_or_compute(key, |k| {
                calls.set(calls.get() + 1);
                k * 2
            })
        };

        assert_eq!(double(&mut memo, 2), 4);
        assert_eq!(double(&mut memo, 2), 4);
        assert_eq!(calls.get(), 1);

        assert_eq!(double(&mut memo, 3), 6);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalidate_forgets_the_value() {
        let mut memo = Memo::default();
        memo.get_or_compute((1, 2), |_| "value");
        assert!(memo.is_cached(&(1, 2)));

        memo.invalidate();
        assert!(!memo.is_cached(&(1, 2)));
    }
}
