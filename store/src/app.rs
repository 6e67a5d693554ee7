//! Transient cross-page selection. Nothing here is persisted.

use chrono::{Local, NaiveDate};
use entity::goals::Goal;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub selected_date: NaiveDate,
    pub selected_goal: Option<Goal>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_date: Local::now().date_naive(),
            selected_goal: None,
        }
    }
}

pub struct AppStore {
    state: watch::Sender<AppState>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (sender, _) = watch::channel(state);
        Self { state: sender }
    }

    pub fn set_selected_date(&self, date: NaiveDate) {
        self.state.send_if_modified(|state| {
            let changed = state.selected_date != date;
            state.selected_date = date;
            changed
        });
    }

    pub fn set_selected_goal(&self, goal: Option<Goal>) {
        self.state.send_modify(|state| state.selected_goal = goal);
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.state.borrow().selected_date
    }

    pub fn selected_goal(&self) -> Option<Goal> {
        self.state.borrow().selected_goal.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_today_without_goal() {
        let store = AppStore::new();
        assert_eq!(store.selected_date(), Local::now().date_naive());
        assert!(store.selected_goal().is_none());
    }

    #[test]
    fn test_setters_replace_selection() {
        let store = AppStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        store.set_selected_date(date);

        assert_eq!(store.selected_date(), date);
    }

    #[tokio::test]
    async fn test_selected_goal_is_set_and_cleared() {
        let store = AppStore::new();
        let mut receiver = store.subscribe();
        let goal = Goal {
            id: "g-1".to_string(),
            user_id: "u-1".to_string(),
            title: "Run a marathon".to_string(),
            description: None,
            purpose: "Stay healthy".to_string(),
            start_date: None,
            target_date: None,
            status: Default::default(),
            created_at: chrono::Utc::now().fixed_offset(),
            updated_at: None,
            resources: Vec::new(),
        };

        store.set_selected_goal(Some(goal.clone()));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().selected_goal, Some(goal));
        assert_eq!(store.selected_goal().map(|g| g.id), Some("g-1".to_string()));

        store.set_selected_goal(None);
        assert!(receiver.has_changed().unwrap());
        assert!(store.selected_goal().is_none());
    }

    #[tokio::test]
    async fn test_same_date_does_not_notify() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let store = AppStore::with_state(AppState {
            selected_date: date,
            selected_goal: None,
        });
        let mut receiver = store.subscribe();

        store.set_selected_date(date);
        assert!(!receiver.has_changed().unwrap());

        store.set_selected_date(date.succ_opt().unwrap());
        assert!(receiver.has_changed().unwrap());
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().selected_date, date.succ_opt().unwrap());
    }
}
