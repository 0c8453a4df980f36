use crate::*;

/// Side store attaching a value to states of a [`StateSpace`].
///
/// Layout mirrors the space: one dense row per level, indexed by the
/// state's position within its level. Rows grow on write, so a memo can be
/// created before the states it will describe are materialized. A state
/// with no entry reads as `None`, which callers interpret (default utility,
/// fresh bounds, unexplored node).
#[derive(Debug, Clone)]
pub struct Memo<V> {
    rows: Vec<Vec<Option<V>>>,
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<V> Memo<V> {
    /// Value attached to `id`, if any.
    pub fn get(&self, id: StateId) -> Option<&V> {
        self.rows
            .get(id.level())
            .and_then(|row| row.get(id.index()))
            .and_then(Option::as_ref)
    }
    pub fn get_mut(&mut self, id: StateId) -> Option<&mut V> {
        self.rows
            .get_mut(id.level())
            .and_then(|row| row.get_mut(id.index()))
            .and_then(Option::as_mut)
    }
    pub fn contains(&self, id: StateId) -> bool {
        self.get(id).is_some()
    }
    /// Stores `value`, returning whatever was there before.
    pub fn set(&mut self, id: StateId, value: V) -> Option<V> {
        if self.rows.len() <= id.level() {
            self.rows.resize_with(id.level() + 1, Vec::new);
        }
        let row = &mut self.rows[id.level()];
        if row.len() <= id.index() {
            row.resize_with(id.index() + 1, || None);
        }
        row[id.index()].replace(value)
    }
    /// Number of states carrying a value.
    pub fn len(&self) -> usize {
        self.rows.iter().flatten().filter(|v| v.is_some()).count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Drops every value.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_none_until_written() {
        let mut space = StateSpace::new(2);
        let id = space.insert(BeliefState::new(vec![2, 1], vec![1, 1]));
        let mut memo = Memo::<f64>::default();
        assert_eq!(memo.get(id), None);
        assert_eq!(memo.set(id, 0.25), None);
        assert_eq!(memo.set(id, 0.75), Some(0.25));
        assert_eq!(memo.get(id), Some(&0.75));
        assert_eq!(memo.len(), 1);
        memo.clear();
        assert!(memo.is_empty());
    }
}
