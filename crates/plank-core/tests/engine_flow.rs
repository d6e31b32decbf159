use chrono::{NaiveDate, Weekday};
use plank_core::directory::UserDirectory;
use plank_core::filter::{FilterState, TimeWindow};
use plank_core::grid::month_weeks;
use plank_core::interaction::{InteractionController, SpanMetrics};
use plank_core::layout::project_week;
use plank_core::records::{decode_collection, encode_collection};
use plank_core::task::{Category, Color, Priority, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn select_create_drag_resize_and_round_trip() {
    let directory = UserDirectory::builtin();
    let today = date(2024, 6, 10);
    let mut tasks: Vec<Task> = Vec::new();
    let mut controller = InteractionController::new();

    // Drag-select 2024-06-15 back to 2024-06-12; the committed range is
    // normalized and becomes a new task via the (external) create form.
    assert!(controller.begin_selection(date(2024, 6, 15)));
    controller.hover_day(date(2024, 6, 12), &mut tasks);
    let committed = controller.release().expect("selection commits a range");
    assert_eq!(committed.start, date(2024, 6, 12));
    assert_eq!(committed.end, date(2024, 6, 15));

    tasks.push(Task::new(
        "Sprint review prep".to_string(),
        Category::Development,
        committed.start,
        committed.end,
        directory.first_name().to_string(),
        Priority::Medium,
        Color::Mint,
    ));

    // The new task projects onto exactly one week of the June grid.
    let filters = FilterState::allowing_all(&directory);
    let weeks = month_weeks(today, Weekday::Sun);
    let visible = filters.apply(&tasks, today);
    let segment_weeks: Vec<usize> = weeks
        .iter()
        .enumerate()
        .filter(|(_, week)| !project_week(week, &visible).is_empty())
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(segment_weeks.len(), 1);

    // Grab the second day of the bar and drop it on 2024-06-20.
    let metrics = SpanMetrics::from_width(400.0, 4, true, true);
    let grabbed = tasks[0].clone();
    assert!(controller.begin_on_segment(&grabbed, grabbed.start, &metrics, 150.0, 8.0));
    assert!(controller.hover_day(date(2024, 6, 20), &mut tasks));
    controller.release();
    assert_eq!(tasks[0].start, date(2024, 6, 19));
    assert_eq!(tasks[0].end, date(2024, 6, 22));

    // Resize from the right edge; an inverting hover is ignored.
    let resized = tasks[0].clone();
    assert!(controller.begin_on_segment(&resized, resized.start, &metrics, 396.0, 8.0));
    assert!(!controller.hover_day(date(2024, 6, 17), &mut tasks));
    assert_eq!(tasks[0].end, date(2024, 6, 22));
    assert!(controller.hover_day(date(2024, 6, 19), &mut tasks));
    controller.release();
    assert_eq!(tasks[0].start, date(2024, 6, 19));
    assert_eq!(tasks[0].end, date(2024, 6, 19));

    // Hide it through the window filter, then bring it back.
    let mut narrowed = filters.clone();
    narrowed.window = TimeWindow::OneWeek;
    assert!(narrowed.apply(&tasks, date(2024, 6, 1)).is_empty());
    assert_eq!(narrowed.apply(&tasks, date(2024, 6, 12)).len(), 1);

    // Persist and reload: the collection survives unchanged.
    let reloaded = decode_collection(&encode_collection(&tasks), &directory);
    assert_eq!(reloaded.dropped, 0);
    assert_eq!(reloaded.tasks, tasks);
}
