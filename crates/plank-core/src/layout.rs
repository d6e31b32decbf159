use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::LayoutConfig;
use crate::grid::{DAYS_PER_WEEK, Week};
use crate::task::Task;

/// Which corners of a rendered bar are rounded. Purely presentational,
/// derived from whether the visible span touches the task's real bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStyle {
    Single,
    SpanStart,
    SpanEnd,
    SpanMiddle,
}

impl CornerStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            CornerStyle::Single => "bar-single",
            CornerStyle::SpanStart => "bar-start",
            CornerStyle::SpanEnd => "bar-end",
            CornerStyle::SpanMiddle => "bar-middle",
        }
    }
}

/// A task's slice of one rendered week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSegment {
    pub task_id: Uuid,
    pub visible_start: NaiveDate,
    pub visible_end: NaiveDate,
    pub start_col: usize,
    pub end_col: usize,
    pub is_true_start: bool,
    pub is_true_end: bool,
    pub lane: usize,
}

impl WeekSegment {
    pub fn span_days(&self) -> i64 {
        (self.end_col - self.start_col) as i64 + 1
    }

    pub fn left_percent(&self) -> f32 {
        self.start_col as f32 / DAYS_PER_WEEK as f32 * 100.0
    }

    pub fn width_percent(&self) -> f32 {
        (self.end_col - self.start_col + 1) as f32 / DAYS_PER_WEEK as f32 * 100.0
    }

    pub fn top_offset_px(&self, layout: &LayoutConfig) -> f32 {
        layout.base_offset_px + self.lane as f32 * layout.lane_height_px
    }

    pub fn corner(&self) -> CornerStyle {
        match (self.is_true_start, self.is_true_end) {
            (true, true) => CornerStyle::Single,
            (true, false) => CornerStyle::SpanStart,
            (false, true) => CornerStyle::SpanEnd,
            (false, false) => CornerStyle::SpanMiddle,
        }
    }
}

/// Clip each intersecting task to the week and lay the results out.
///
/// Lanes are handed out in list order, one per rendered task, with no cap:
/// tasks sharing days simply stack in the order the filtered list presents
/// them. Deterministic and order-stable, not overlap-aware; a dense week
/// can stack past the row height.
pub fn project_week(week: &Week, tasks: &[Task]) -> Vec<WeekSegment> {
    let week_first = week[0];
    let week_last = week[DAYS_PER_WEEK - 1];

    let mut segments = Vec::new();
    for task in tasks {
        if !task.intersects(week_first, week_last) {
            continue;
        }
        let visible_start = task.start.max(week_first);
        let visible_end = task.end.min(week_last);
        let start_col = (visible_start - week_first).num_days() as usize;
        let end_col = (visible_end - week_first).num_days() as usize;
        segments.push(WeekSegment {
            task_id: task.id,
            visible_start,
            visible_end,
            start_col,
            end_col,
            is_true_start: visible_start == task.start,
            is_true_end: visible_end == task.end,
            lane: segments.len(),
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::grid::{add_days, month_weeks};
    use crate::task::{Category, Color, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn task(start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(
            "Laid out".to_string(),
            Category::Development,
            start,
            end,
            "Alice Chen".to_string(),
            Priority::Low,
            Color::Teal,
        )
    }

    fn week_of(day: NaiveDate) -> Week {
        let start = crate::grid::start_of_week(day, Weekday::Sun);
        let mut week = [start; DAYS_PER_WEEK];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = add_days(start, offset as i64);
        }
        week
    }

    #[test]
    fn clips_to_week_and_flags_true_edges() {
        // 2024-06-09 is a Sunday; the task runs Wed..next Tue.
        let week = week_of(date(2024, 6, 12));
        let subject = task(date(2024, 6, 12), date(2024, 6, 18));

        let segments = project_week(&week, std::slice::from_ref(&subject));
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!(segment.visible_start, date(2024, 6, 12));
        assert_eq!(segment.visible_end, date(2024, 6, 15));
        assert_eq!((segment.start_col, segment.end_col), (3, 6));
        assert!(segment.is_true_start);
        assert!(!segment.is_true_end);
        assert_eq!(segment.corner(), CornerStyle::SpanStart);
    }

    #[test]
    fn non_intersecting_task_is_excluded() {
        let week = week_of(date(2024, 6, 12));
        let subject = task(date(2024, 6, 20), date(2024, 6, 22));
        assert!(project_week(&week, std::slice::from_ref(&subject)).is_empty());
    }

    #[test]
    fn percentage_geometry() {
        let week = week_of(date(2024, 6, 12));
        let subject = task(date(2024, 6, 10), date(2024, 6, 11));

        let segments = project_week(&week, std::slice::from_ref(&subject));
        let segment = &segments[0];
        assert_eq!((segment.start_col, segment.end_col), (1, 2));
        assert!((segment.left_percent() - 100.0 / 7.0).abs() < 1e-4);
        assert!((segment.width_percent() - 200.0 / 7.0).abs() < 1e-4);
        assert_eq!(segment.corner(), CornerStyle::Single);
    }

    #[test]
    fn lanes_follow_list_order() {
        let week = week_of(date(2024, 6, 12));
        let a = task(date(2024, 6, 10), date(2024, 6, 14));
        let b = task(date(2024, 6, 10), date(2024, 6, 14));
        let c = task(date(2024, 6, 13), date(2024, 6, 13));

        let segments = project_week(&week, &[a.clone(), b.clone(), c.clone()]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].task_id, a.id);
        assert_eq!(segments[0].lane, 0);
        assert_eq!(segments[1].task_id, b.id);
        assert_eq!(segments[1].lane, 1);
        assert_eq!(segments[2].task_id, c.id);
        assert_eq!(segments[2].lane, 2);

        // Same input, same lanes.
        let again = project_week(&week, &[a, b, c]);
        assert_eq!(segments, again);
    }

    #[test]
    fn lane_offsets_stack_vertically() {
        let layout = LayoutConfig::default();
        let week = week_of(date(2024, 6, 12));
        let a = task(date(2024, 6, 10), date(2024, 6, 14));
        let b = task(date(2024, 6, 10), date(2024, 6, 14));

        let segments = project_week(&week, &[a, b]);
        let gap = segments[1].top_offset_px(&layout) - segments[0].top_offset_px(&layout);
        assert!((gap - layout.lane_height_px).abs() < 1e-4);
    }

    #[test]
    fn week_segments_cover_the_task_exactly() {
        // Spans four week rows of the June 2024 grid.
        let subject = task(date(2024, 6, 4), date(2024, 6, 26));
        let weeks = month_weeks(date(2024, 6, 1), Weekday::Sun);

        let mut covered = Vec::new();
        for week in &weeks {
            for segment in project_week(week, std::slice::from_ref(&subject)) {
                let mut day = segment.visible_start;
                while day <= segment.visible_end {
                    covered.push(day);
                    day = add_days(day, 1);
                }
            }
        }

        let mut expected = Vec::new();
        let mut day = subject.start;
        while day <= subject.end {
            expected.push(day);
            day = add_days(day, 1);
        }

        // No gaps, no overlaps, exact reconstruction.
        assert_eq!(covered, expected);
    }

    #[test]
    fn middle_segment_has_no_true_edges() {
        let subject = task(date(2024, 6, 4), date(2024, 6, 26));
        let weeks = month_weeks(date(2024, 6, 1), Weekday::Sun);

        let middle = project_week(&weeks[2], std::slice::from_ref(&subject));
        let segment = &middle[0];
        assert!(!segment.is_true_start);
        assert!(!segment.is_true_end);
        assert_eq!(segment.corner(), CornerStyle::SpanMiddle);
        assert_eq!((segment.start_col, segment.end_col), (0, 6));
    }
}
