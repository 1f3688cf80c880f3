//! Confirmed / pending state for optimistic updates.
//!
//! # Design
//! The last value a store confirmed and the speculative local value are kept
//! as separate values. Staging never touches `confirmed`, so rolling back is
//! dropping `pending`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Optimistic<T> {
    confirmed: T,
    pending: Option<T>,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(confirmed: T) -> Self {
        Self {
            confirmed,
            pending: None,
        }
    }

    /// The value to display: pending if a mutation is in flight.
    pub fn current(&self) -> &T {
        self.pending.as_ref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Derives a new pending value from the current one.
    pub fn stage(&mut self, change: impl FnOnce(&mut T)) {
        let mut next = self.current().clone();
        change(&mut next);
        self.pending = Some(next);
    }

    /// Applies an authoritative change to the confirmed value and discards
    /// any pending one.
    pub fn confirm_with(&mut self, change: impl FnOnce(&mut T)) {
        change(&mut self.confirmed);
        self.pending = None;
    }

    pub fn commit(&mut self, value: T) {
        self.confirmed = value;
        self.pending = None;
    }

    pub fn rollback(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_value_is_current_until_rollback() {
        let mut state = Optimistic::new(vec![1, 2, 3]);
        state.stage(|v| v.retain(|x| *x != 2));
        assert_eq!(state.current(), &vec![1, 3]);
        assert_eq!(state.confirmed(), &vec![1, 2, 3]);
        assert!(state.is_pending());

        state.rollback();
        assert_eq!(state.current(), &vec![1, 2, 3]);
        assert!(!state.is_pending());
    }

    #[test]
    fn confirm_replaces_speculation_with_authoritative_change() {
        let mut state = Optimistic::new(vec![1, 2]);
        state.stage(|v| v.push(99));
        state.confirm_with(|v| v.push(3));
        assert_eq!(state.current(), &vec![1, 2, 3]);
        assert!(!state.is_pending());
    }

    #[test]
    fn commit_overwrites_confirmed() {
        let mut state = Optimistic::new(0);
        state.stage(|v| *v = 5);
        state.commit(7);
        assert_eq!(*state.current(), 7);
        assert_eq!(*state.confirmed(), 7);
    }
}
