use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grid::add_days;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Development,
    Design,
    Marketing,
    Operations,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Development,
        Category::Design,
        Category::Marketing,
        Category::Operations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Development => "Development",
            Category::Design => "Design",
            Category::Marketing => "Marketing",
            Category::Operations => "Operations",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Category::Development => "development",
            Category::Design => "design",
            Category::Marketing => "marketing",
            Category::Operations => "operations",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "development" => Some(Category::Development),
            "design" => Some(Category::Design),
            "marketing" => Some(Category::Marketing),
            "operations" => Some(Category::Operations),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Sky,
    Mint,
    Rose,
    Amber,
    Violet,
    Teal,
    Slate,
    Coral,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Sky,
        Color::Mint,
        Color::Rose,
        Color::Amber,
        Color::Violet,
        Color::Teal,
        Color::Slate,
        Color::Coral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Color::Sky => "Sky",
            Color::Mint => "Mint",
            Color::Rose => "Rose",
            Color::Amber => "Amber",
            Color::Violet => "Violet",
            Color::Teal => "Teal",
            Color::Slate => "Slate",
            Color::Coral => "Coral",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Color::Sky => "sky",
            Color::Mint => "mint",
            Color::Rose => "rose",
            Color::Amber => "amber",
            Color::Violet => "violet",
            Color::Teal => "teal",
            Color::Slate => "slate",
            Color::Coral => "coral",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|color| color.as_key() == key.trim().to_ascii_lowercase())
    }

    pub fn hex(self) -> &'static str {
        match self {
            Color::Sky => "#4a90d9",
            Color::Mint => "#3fb68b",
            Color::Rose => "#d64545",
            Color::Amber => "#e0a030",
            Color::Violet => "#8a63d2",
            Color::Teal => "#2aa1a8",
            Color::Slate => "#7f8691",
            Color::Coral => "#e96d5e",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub assignee: String,
    pub priority: Priority,
    pub color: Color,
}

impl Task {
    pub fn new(
        name: String,
        category: Category,
        start: NaiveDate,
        end: NaiveDate,
        assignee: String,
        priority: Priority,
        color: Color,
    ) -> Self {
        // A backwards range is normalized at construction; afterwards the
        // start <= end invariant is upheld by the guarded setters.
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            start,
            end,
            assignee,
            priority,
            color,
        }
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Move the whole span so it starts on `day`, keeping the duration.
    pub fn shift_start_to(&mut self, day: NaiveDate) {
        let duration = self.duration_days();
        self.start = day;
        self.end = add_days(day, duration);
    }

    /// Rejects any start after the current end; the task is left untouched.
    pub fn try_set_start(&mut self, day: NaiveDate) -> bool {
        if day > self.end {
            return false;
        }
        self.start = day;
        true
    }

    /// Rejects any end before the current start; the task is left untouched.
    pub fn try_set_end(&mut self, day: NaiveDate) -> bool {
        if day < self.start {
            return false;
        }
        self.end = day;
        true
    }

    pub fn intersects(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start <= to && self.end >= from
    }

    pub fn spans(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample(start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(
            "Sample".to_string(),
            Category::Development,
            start,
            end,
            "Alice Chen".to_string(),
            Priority::Medium,
            Color::Sky,
        )
    }

    #[test]
    fn backwards_range_is_normalized_at_construction() {
        let task = sample(date(2024, 6, 15), date(2024, 6, 12));
        assert_eq!(task.start, date(2024, 6, 12));
        assert_eq!(task.end, date(2024, 6, 15));
    }

    #[test]
    fn shift_preserves_duration() {
        let mut task = sample(date(2024, 6, 10), date(2024, 6, 12));
        task.shift_start_to(date(2024, 6, 19));
        assert_eq!(task.start, date(2024, 6, 19));
        assert_eq!(task.end, date(2024, 6, 21));
        assert_eq!(task.duration_days(), 2);
    }

    #[test]
    fn set_start_rejects_inversion() {
        let mut task = sample(date(2024, 6, 10), date(2024, 6, 14));
        assert!(!task.try_set_start(date(2024, 6, 15)));
        assert_eq!(task.start, date(2024, 6, 10));
        assert!(task.try_set_start(date(2024, 6, 14)));
        assert_eq!(task.start, date(2024, 6, 14));
    }

    #[test]
    fn set_end_rejects_inversion() {
        let mut task = sample(date(2024, 6, 10), date(2024, 6, 14));
        assert!(!task.try_set_end(date(2024, 6, 8)));
        assert_eq!(task.end, date(2024, 6, 14));
        assert!(task.try_set_end(date(2024, 6, 10)));
        assert_eq!(task.end, date(2024, 6, 10));
    }

    #[test]
    fn intersects_is_inclusive_on_both_ends() {
        let task = sample(date(2024, 6, 10), date(2024, 6, 14));
        assert!(task.intersects(date(2024, 6, 14), date(2024, 6, 20)));
        assert!(task.intersects(date(2024, 6, 1), date(2024, 6, 10)));
        assert!(!task.intersects(date(2024, 6, 15), date(2024, 6, 20)));
    }

    #[test]
    fn enum_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.as_key()), Some(category));
        }
        for priority in Priority::ALL {
            assert_eq!(Priority::from_key(priority.as_key()), Some(priority));
        }
        for color in Color::ALL {
            assert_eq!(Color::from_key(color.as_key()), Some(color));
        }
    }
}
