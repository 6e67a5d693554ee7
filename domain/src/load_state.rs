//! The three ways a page section can render.

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// The first fetch has not settled yet.
    #[default]
    Loading,
    /// The fetch settled with nothing to show, or failed before anything was
    /// ever shown.
    Empty,
    Populated(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LoadState::Empty)
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            LoadState::Populated(value) => Some(value),
            _ => None,
        }
    }

    /// Settles a failed fetch: the loading flag clears, but data that was
    /// already on screen stays.
    pub fn settle_failed(&mut self) {
        if self.is_loading() {
            *self = LoadState::Empty;
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Empty => LoadState::Empty,
            LoadState::Populated(value) => LoadState::Populated(f(value)),
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// `Empty` for an empty list, `Populated` otherwise.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Populated(items)
        }
    }

    /// The loaded items, or an empty slice while loading or empty.
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Populated(items) => items,
            _ => &[],
        }
    }
}

impl<T> From<Option<T>> for LoadState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => LoadState::Populated(value),
            None => LoadState::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items() {
        assert_eq!(LoadState::<Vec<u8>>::from_items(vec![]), LoadState::Empty);
        assert_eq!(LoadState::from_items(vec![1]), LoadState::Populated(vec![1]));
    }

    #[test]
    fn test_failed_first_load_becomes_empty() {
        let mut state: LoadState<Vec<u8>> = LoadState::Loading;
        state.settle_failed();
        assert!(state.is_empty());
    }

    #[test]
    fn test_failed_refresh_keeps_previous_data() {
        let mut state = LoadState::Populated(vec![1, 2]);
        state.settle_failed();
        assert_eq!(state.items(), &[1, 2]);
    }
}
