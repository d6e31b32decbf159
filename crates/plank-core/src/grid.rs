use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DAYS_PER_WEEK: usize = 7;

pub type Week = [NaiveDate; DAYS_PER_WEEK];

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1_u32)
    } else {
        (year, month + 1)
    };
    add_days(first_day_of_month(next_year, next_month), -1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

/// Month navigation; the day of month is clamped into the target month.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;

    while month < 1 {
        month += 12;
        year = year.saturating_sub(1);
    }
    while month > 12 {
        month -= 12;
        year = year.saturating_add(1);
    }

    let month = month as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let day_idx = day.weekday().num_days_from_monday() as i64;
    let start_idx = week_start.num_days_from_monday() as i64;
    let diff = (7 + day_idx - start_idx) % 7;
    add_days(day, -diff)
}

/// The whole weeks covering the anchor's month, leading and trailing days
/// of the adjacent months included so every row is a full week.
pub fn month_weeks(anchor: NaiveDate, week_start: Weekday) -> Vec<Week> {
    let first = first_day_of_month(anchor.year(), anchor.month());
    let last = last_day_of_month(anchor.year(), anchor.month());
    let grid_start = start_of_week(first, week_start);
    let grid_end = add_days(start_of_week(last, week_start), 6);

    let mut weeks = Vec::new();
    let mut cursor = grid_start;
    while cursor <= grid_end {
        let mut week = [cursor; DAYS_PER_WEEK];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = add_days(cursor, offset as i64);
        }
        weeks.push(week);
        cursor = add_days(cursor, 7);
    }
    weeks
}
