use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::UserDirectory;
use crate::task::{Category, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    #[serde(rename = "3weeks")]
    ThreeWeeks,
}

impl TimeWindow {
    pub const ALL_WINDOWS: [TimeWindow; 4] = [
        TimeWindow::All,
        TimeWindow::OneWeek,
        TimeWindow::TwoWeeks,
        TimeWindow::ThreeWeeks,
    ];

    pub fn horizon_days(self) -> Option<i64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::OneWeek => Some(7),
            TimeWindow::TwoWeeks => Some(14),
            TimeWindow::ThreeWeeks => Some(21),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::All => "All",
            TimeWindow::OneWeek => "Within 1 week",
            TimeWindow::TwoWeeks => "Within 2 weeks",
            TimeWindow::ThreeWeeks => "Within 3 weeks",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::OneWeek => "1week",
            TimeWindow::TwoWeeks => "2weeks",
            TimeWindow::ThreeWeeks => "3weeks",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "all" => Some(TimeWindow::All),
            "1week" => Some(TimeWindow::OneWeek),
            "2weeks" => Some(TimeWindow::TwoWeeks),
            "3weeks" => Some(TimeWindow::ThreeWeeks),
            _ => None,
        }
    }
}

/// Externally owned visibility selections. The engine only reads them; the
/// filter panel is the sole writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub categories: BTreeSet<Category>,
    pub assignees: BTreeSet<String>,
    pub window: TimeWindow,
}

impl FilterState {
    pub fn allowing_all(directory: &UserDirectory) -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            assignees: directory.names().map(str::to_string).collect(),
            window: TimeWindow::All,
        }
    }

    /// Conjunction of the category, assignee, and time-window checks.
    ///
    /// The window check is one-sided by design: it hides tasks starting
    /// more than N days ahead of `today` and nothing else, so tasks already
    /// started (or long past) always pass it.
    pub fn visible(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.categories.contains(&task.category) {
            return false;
        }
        if !self.assignees.contains(task.assignee.as_str()) {
            return false;
        }
        match self.window.horizon_days() {
            None => true,
            Some(days) => (task.start - today).num_days() <= days,
        }
    }

    pub fn apply(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.visible(task, today))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Color, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn task(category: Category, assignee: &str, start: NaiveDate) -> Task {
        Task::new(
            "Filtered".to_string(),
            category,
            start,
            crate::grid::add_days(start, 1),
            assignee.to_string(),
            Priority::High,
            Color::Sky,
        )
    }

    fn filters() -> FilterState {
        FilterState::allowing_all(&UserDirectory::builtin())
    }

    #[test]
    fn category_and_assignee_are_conjunctive() {
        let today = date(2024, 6, 10);
        let subject = task(Category::Design, "Alice Chen", today);

        let mut state = filters();
        assert!(state.visible(&subject, today));

        state.categories.remove(&Category::Design);
        assert!(!state.visible(&subject, today));

        state.categories.insert(Category::Design);
        state.assignees.remove("Alice Chen");
        assert!(!state.visible(&subject, today));
    }

    #[test]
    fn unknown_assignee_is_hidden_until_selected() {
        let today = date(2024, 6, 10);
        let subject = task(Category::Design, "Ghost User", today);

        let mut state = filters();
        assert!(!state.visible(&subject, today));

        state.assignees.insert("Ghost User".to_string());
        assert!(state.visible(&subject, today));
    }

    #[test]
    fn window_is_one_sided() {
        let today = date(2024, 6, 10);
        let mut state = filters();
        state.window = TimeWindow::OneWeek;

        // Exactly on the horizon: visible.
        assert!(state.visible(&task(Category::Development, "Alice Chen", date(2024, 6, 17)), today));
        // One past the horizon: hidden.
        assert!(!state.visible(&task(Category::Development, "Alice Chen", date(2024, 6, 18)), today));
        // Already in the past: still visible; the window has no lower bound.
        assert!(state.visible(&task(Category::Development, "Alice Chen", date(2023, 1, 1)), today));
    }

    #[test]
    fn wider_windows_extend_the_horizon() {
        let today = date(2024, 6, 10);
        let far = task(Category::Development, "Alice Chen", date(2024, 6, 28));

        let mut state = filters();
        state.window = TimeWindow::TwoWeeks;
        assert!(!state.visible(&far, today));

        state.window = TimeWindow::ThreeWeeks;
        assert!(state.visible(&far, today));

        state.window = TimeWindow::All;
        assert!(state.visible(&far, today));
    }

    #[test]
    fn apply_preserves_list_order() {
        let today = date(2024, 6, 10);
        let first = task(Category::Development, "Alice Chen", today);
        let hidden = task(Category::Design, "Ghost User", today);
        let second = task(Category::Marketing, "Priya Nair", today);

        let visible = filters().apply(&[first.clone(), hidden, second.clone()], today);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, first.id);
        assert_eq!(visible[1].id, second.id);
    }

    #[test]
    fn window_keys_round_trip() {
        for window in TimeWindow::ALL_WINDOWS {
            assert_eq!(TimeWindow::from_key(window.as_key()), Some(window));
        }
        assert_eq!(TimeWindow::from_key("4weeks"), None);
    }
}
