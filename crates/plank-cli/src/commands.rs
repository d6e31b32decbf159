use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use clap::Parser;
use plank_core::config::LayoutConfig;
use plank_core::directory::UserDirectory;
use plank_core::filter::{FilterState, TimeWindow};
use plank_core::task::{Category, Color, Priority, Task};
use tracing::{debug, info};

use crate::cli::{Command, GlobalCli, init_tracing};
use crate::render::BoardRenderer;
use crate::store::TaskStore;

pub fn run() -> anyhow::Result<()> {
    let cli = GlobalCli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting plank CLI");

    let data_dir = resolve_data_dir(cli.data.as_deref())?;
    let store = TaskStore::open(&data_dir).with_context(|| {
        format!("failed to open task store at {}", data_dir.display())
    })?;
    let directory = UserDirectory::builtin();
    let command = cli.command.unwrap_or(Command::Show { month: None });

    dispatch(&store, &directory, command)?;
    info!("done");
    Ok(())
}

fn resolve_data_dir(override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow!("cannot determine the platform data directory"))?;
    Ok(base.join("plank"))
}

fn dispatch(
    store: &TaskStore,
    directory: &UserDirectory,
    command: Command,
) -> anyhow::Result<()> {
    let renderer = BoardRenderer::new();
    let today = Local::now().date_naive();

    match command {
        Command::Show { month } => {
            let anchor = match month {
                Some(raw) => parse_month_arg(&raw)?,
                None => today,
            };
            let report = store.load(directory)?;
            renderer.print_month(anchor, &report.tasks, &LayoutConfig::default())?;
        }
        Command::List {
            category,
            user,
            window,
        } => {
            let mut filters = FilterState::allowing_all(directory);
            if let Some(raw) = category {
                let category = Category::from_key(&raw)
                    .ok_or_else(|| anyhow!("unknown category: {raw}"))?;
                filters.categories = [category].into_iter().collect();
            }
            if let Some(name) = user {
                // Unknown names are allowed; assignee references are not
                // checked against the roster.
                filters.assignees = [name].into_iter().collect();
            }
            filters.window = TimeWindow::from_key(&window)
                .ok_or_else(|| anyhow!("unknown time window: {window}"))?;

            let report = store.load(directory)?;
            let visible = filters.apply(&report.tasks, today);
            debug!(total = report.tasks.len(), visible = visible.len(), "listing tasks");
            renderer.print_task_table(&visible, today)?;
        }
        Command::Add {
            name,
            start,
            end,
            category,
            user,
            priority,
            color,
        } => {
            let start = parse_date_arg(&start)?;
            let end = match end {
                Some(raw) => parse_date_arg(&raw)?,
                None => start,
            };
            let task = Task::new(
                name,
                Category::from_key(&category)
                    .ok_or_else(|| anyhow!("unknown category: {category}"))?,
                start,
                end,
                user.unwrap_or_else(|| directory.first_name().to_string()),
                Priority::from_key(&priority)
                    .ok_or_else(|| anyhow!("unknown priority: {priority}"))?,
                Color::from_key(&color).ok_or_else(|| anyhow!("unknown color: {color}"))?,
            );

            let mut report = store.load(directory)?;
            info!(id = %task.id, name = %task.name, "adding task");
            println!("added {} ({})", task.name, task.id);
            report.tasks.push(task);
            store.save(&report.tasks)?;
        }
        Command::Remove { id } => {
            let needle = id.trim().to_ascii_lowercase();
            let mut report = store.load(directory)?;
            let matching: Vec<usize> = report
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.id.to_string().starts_with(&needle))
                .map(|(idx, _)| idx)
                .collect();

            match matching.as_slice() {
                [] => println!("no task matches {needle}"),
                [idx] => {
                    let removed = report.tasks.remove(*idx);
                    info!(id = %removed.id, "removed task");
                    println!("removed {} ({})", removed.name, removed.id);
                    store.save(&report.tasks)?;
                }
                _ => return Err(anyhow!("id prefix {needle} is ambiguous")),
            }
        }
        Command::Check => {
            let report = store.load(directory)?;
            println!(
                "{} task(s) loaded, {} record(s) dropped",
                report.tasks.len(),
                report.dropped
            );
        }
    }

    Ok(())
}

fn parse_month_arg(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid month (expected YYYY-MM): {raw}"))
}

fn parse_date_arg(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date (expected YYYY-MM-DD): {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arg_parses_to_first_day() {
        let anchor = parse_month_arg("2024-06").expect("valid month");
        assert_eq!(anchor, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"));
        assert!(parse_month_arg("June 2024").is_err());
    }

    #[test]
    fn date_arg_requires_iso_format() {
        assert!(parse_date_arg("2024-06-10").is_ok());
        assert!(parse_date_arg("06/10/2024").is_err());
    }
}
