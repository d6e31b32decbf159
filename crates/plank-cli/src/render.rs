use std::io::{self, IsTerminal, Write};

use chrono::{Datelike, NaiveDate};
use plank_core::config::LayoutConfig;
use plank_core::grid::{DAYS_PER_WEEK, month_weeks};
use plank_core::layout::project_week;
use plank_core::task::Task;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CELL_WIDTH: usize = 6;

pub struct BoardRenderer {
    color: bool,
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardRenderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip(self, tasks, layout))]
    pub fn print_month(
        &self,
        anchor: NaiveDate,
        tasks: &[Task],
        layout: &LayoutConfig,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let weeks = month_weeks(anchor, layout.week_start_day());
        let board_width = CELL_WIDTH * DAYS_PER_WEEK;

        writeln!(
            out,
            "{:^width$}",
            anchor.format("%B %Y").to_string(),
            width = board_width
        )?;

        if let Some(first_week) = weeks.first() {
            for day in first_week {
                write!(
                    out,
                    "{:>width$}",
                    day.format("%a").to_string(),
                    width = CELL_WIDTH
                )?;
            }
            writeln!(out)?;
        }

        for week in &weeks {
            for day in week {
                let cell = format!("{:>width$}", day.day(), width = CELL_WIDTH);
                if day.month() == anchor.month() {
                    write!(out, "{cell}")?;
                } else {
                    write!(out, "{}", self.paint(&cell, "90"))?;
                }
            }
            writeln!(out)?;

            for segment in project_week(week, tasks) {
                let name = tasks
                    .iter()
                    .find(|task| task.id == segment.task_id)
                    .map(|task| task.name.as_str())
                    .unwrap_or("");
                let lead = " ".repeat(segment.start_col * CELL_WIDTH);
                writeln!(out, "{lead}{}", bar_text(&segment, name))?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn print_task_table(&self, tasks: &[Task], today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "Id".to_string(),
            "Name".to_string(),
            "Category".to_string(),
            "Start".to_string(),
            "End".to_string(),
            "Assignee".to_string(),
            "Priority".to_string(),
            "Color".to_string(),
        ];

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let id = self.paint(&short_id(task), "33");
            let end = task.end.format("%Y-%m-%d").to_string();
            let end = if task.end < today {
                self.paint(&end, "31")
            } else {
                end
            };

            rows.push(vec![
                id,
                task.name.clone(),
                task.category.label().to_string(),
                task.start.format("%Y-%m-%d").to_string(),
                end,
                task.assignee.clone(),
                task.priority.label().to_string(),
                task.color.label().to_string(),
            ]);
        }

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn short_id(task: &Task) -> String {
    task.id.to_string().chars().take(8).collect()
}

/// One text bar per segment: `[` / `]` mark true edges, `<` / `>` mark
/// week-clipped continuations, mirroring the corner classes of the GUI.
fn bar_text(segment: &plank_core::layout::WeekSegment, name: &str) -> String {
    let total = (segment.end_col - segment.start_col + 1) * CELL_WIDTH - 1;
    let inner_width = total.saturating_sub(2);
    let lead = if segment.is_true_start { '[' } else { '<' };
    let trail = if segment.is_true_end { ']' } else { '>' };

    let mut inner = clip_to_width(name, inner_width);
    let mut used = UnicodeWidthStr::width(inner.as_str());
    while used < inner_width {
        inner.push('=');
        used += 1;
    }

    format!("{lead}{inner}{trail}")
}

fn clip_to_width(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
