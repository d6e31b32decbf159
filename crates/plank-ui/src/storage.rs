use chrono::NaiveDate;
use plank_core::directory::UserDirectory;
use plank_core::filter::FilterState;
use plank_core::records::{LoadReport, decode_collection, encode_collection};
use plank_core::task::Task;
use tracing::warn;

const TASKS_STORAGE_KEY: &str = "plank.tasks";
const FILTERS_STORAGE_KEY: &str = "plank.filters";
const ANCHOR_STORAGE_KEY: &str = "plank.anchor";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn read_key(key: &str) -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(key).ok().flatten())
}

fn write_key(key: &str, value: &str) {
    if let Some(storage) = local_storage()
        && storage.set_item(key, value).is_err()
    {
        warn!(key, "failed writing to local storage");
    }
}

pub fn load_tasks(directory: &UserDirectory) -> LoadReport {
    match read_key(TASKS_STORAGE_KEY) {
        Some(raw) => decode_collection(&raw, directory),
        None => LoadReport::default(),
    }
}

/// Called after every task mutation, including each intermediate drag and
/// resize step.
pub fn save_tasks(tasks: &[Task]) {
    write_key(TASKS_STORAGE_KEY, &encode_collection(tasks));
}

pub fn load_filters(directory: &UserDirectory) -> FilterState {
    read_key(FILTERS_STORAGE_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_else(|| FilterState::allowing_all(directory))
}

pub fn save_filters(filters: &FilterState) {
    match serde_json::to_string(filters) {
        Ok(raw) => write_key(FILTERS_STORAGE_KEY, &raw),
        Err(error) => warn!(%error, "failed serializing filter state"),
    }
}

pub fn load_anchor(fallback: NaiveDate) -> NaiveDate {
    read_key(ANCHOR_STORAGE_KEY)
        .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}

pub fn save_anchor(anchor: NaiveDate) {
    write_key(ANCHOR_STORAGE_KEY, &anchor.format("%Y-%m-%d").to_string());
}
