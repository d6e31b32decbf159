use chrono::{Local, NaiveDate};
use gloo::events::EventListener;
use plank_core::config::LayoutConfig;
use plank_core::directory::UserDirectory;
use plank_core::filter::{FilterState, TimeWindow};
use plank_core::grid::{month_weeks, shift_months};
use plank_core::interaction::{CommittedRange, Gesture, InteractionController};
use plank_core::task::{Category, Color, Priority, Task};
use uuid::Uuid;
use yew::{Callback, Html, function_component, html, use_effect_with, use_state};

use crate::components::{FilterPanel, MonthBoard, SegmentPress, TaskModal};
use crate::storage;

const LAYOUT_TOML: &str = include_str!("../assets/layout.toml");
const USERS_TOML: &str = include_str!("../assets/users.toml");

#[derive(Clone, PartialEq)]
pub enum ModalMode {
    Create { start: NaiveDate, end: NaiveDate },
    Edit(Uuid),
}

#[derive(Clone, PartialEq)]
pub struct ModalState {
    pub mode: ModalMode,
    pub draft_name: String,
    pub draft_category: Category,
    pub draft_assignee: String,
    pub draft_priority: Priority,
    pub draft_color: Color,
    pub error: Option<String>,
}

impl ModalState {
    fn for_range(range: CommittedRange, directory: &UserDirectory) -> Self {
        Self {
            mode: ModalMode::Create {
                start: range.start,
                end: range.end,
            },
            draft_name: String::new(),
            draft_category: Category::Development,
            draft_assignee: directory.first_name().to_string(),
            draft_priority: Priority::Medium,
            draft_color: Color::Sky,
            error: None,
        }
    }

    fn for_task(task: &Task) -> Self {
        Self {
            mode: ModalMode::Edit(task.id),
            draft_name: task.name.clone(),
            draft_category: task.category,
            draft_assignee: task.assignee.clone(),
            draft_priority: task.priority,
            draft_color: task.color,
            error: None,
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let directory = use_state(|| UserDirectory::from_toml_str(USERS_TOML));
    let layout = use_state(|| LayoutConfig::from_toml_str(LAYOUT_TOML));
    let today = Local::now().date_naive();

    // Task collection plus the dropped-record count from the initial load,
    // kept for the diagnostics footer.
    let collection = {
        let directory = directory.clone();
        use_state(move || {
            let report = storage::load_tasks(&directory);
            (report.tasks, report.dropped)
        })
    };
    let filters = {
        let directory = directory.clone();
        use_state(move || storage::load_filters(&directory))
    };
    let anchor = use_state(move || storage::load_anchor(today));
    let controller = use_state(InteractionController::new);
    let modal = use_state(|| None::<ModalState>);

    let on_cell_down = {
        let controller = controller.clone();
        Callback::from(move |day: NaiveDate| {
            let mut next = *controller;
            if next.begin_selection(day) {
                controller.set(next);
            }
        })
    };

    let on_cell_enter = {
        let controller = controller.clone();
        let collection = collection.clone();
        Callback::from(move |day: NaiveDate| {
            let mut next = *controller;
            if !next.is_active() {
                return;
            }
            let (mut tasks, dropped) = (*collection).clone();
            if next.hover_day(day, &mut tasks) {
                // Selection changes only move the highlight; drag and
                // resize steps mutate a task and are persisted right away.
                if !matches!(next.gesture(), Gesture::Selecting { .. }) {
                    storage::save_tasks(&tasks);
                    collection.set((tasks, dropped));
                }
            }
            controller.set(next);
        })
    };

    let on_segment_down = {
        let controller = controller.clone();
        let collection = collection.clone();
        let layout = layout.clone();
        Callback::from(move |press: SegmentPress| {
            let (tasks, _) = &*collection;
            let Some(task) = tasks.iter().find(|task| task.id == press.task_id) else {
                return;
            };
            let mut next = *controller;
            if next.begin_on_segment(
                task,
                press.visible_start,
                &press.metrics,
                press.x_px,
                layout.edge_margin_px,
            ) {
                controller.set(next);
            }
        })
    };

    let on_release = {
        let controller = controller.clone();
        let modal = modal.clone();
        let directory = directory.clone();
        Callback::from(move |_: ()| {
            let mut next = *controller;
            if !next.is_active() {
                return;
            }
            let committed = next.release();
            controller.set(next);
            if let Some(range) = committed {
                modal.set(Some(ModalState::for_range(range, &directory)));
            }
        })
    };

    let on_board_leave = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            let mut next = *controller;
            if !next.is_active() {
                return;
            }
            next.abandon();
            controller.set(next);
        })
    };

    // A document-level mouseup listener exists only while a gesture is
    // active, so releases outside the board still end it; it is dropped
    // the moment the gesture does.
    {
        let on_release = on_release.clone();
        use_effect_with(controller.is_active(), move |active| {
            let listener = if *active {
                web_sys::window()
                    .and_then(|window| window.document())
                    .map(|document| {
                        EventListener::new(&document, "mouseup", move |_| {
                            on_release.emit(());
                        })
                    })
            } else {
                None
            };
            move || drop(listener)
        });
    }

    let on_segment_edit = {
        let collection = collection.clone();
        let modal = modal.clone();
        Callback::from(move |id: Uuid| {
            let (tasks, _) = &*collection;
            if let Some(task) = tasks.iter().find(|task| task.id == id) {
                modal.set(Some(ModalState::for_task(task)));
            }
        })
    };

    let on_modal_submit = {
        let collection = collection.clone();
        let modal = modal.clone();
        Callback::from(move |state: ModalState| {
            let name = state.draft_name.trim().to_string();
            if name.is_empty() {
                let mut erred = state;
                erred.error = Some("A task name is required".to_string());
                modal.set(Some(erred));
                return;
            }

            let (mut tasks, dropped) = (*collection).clone();
            match state.mode {
                ModalMode::Create { start, end } => {
                    let task = Task::new(
                        name,
                        state.draft_category,
                        start,
                        end,
                        state.draft_assignee.clone(),
                        state.draft_priority,
                        state.draft_color,
                    );
                    tracing::info!(id = %task.id, "created task");
                    tasks.push(task);
                }
                ModalMode::Edit(id) => {
                    // Missing id: the edit silently lands nowhere.
                    if let Some(task) = tasks.iter_mut().find(|task| task.id == id) {
                        task.name = name;
                        task.category = state.draft_category;
                        task.assignee = state.draft_assignee.clone();
                        task.priority = state.draft_priority;
                        task.color = state.draft_color;
                    }
                }
            }

            storage::save_tasks(&tasks);
            collection.set((tasks, dropped));
            modal.set(None);
        })
    };

    let on_modal_delete = {
        let collection = collection.clone();
        let modal = modal.clone();
        Callback::from(move |id: Uuid| {
            let (mut tasks, dropped) = (*collection).clone();
            tasks.retain(|task| task.id != id);
            storage::save_tasks(&tasks);
            collection.set((tasks, dropped));
            modal.set(None);
        })
    };

    let on_modal_close = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(None))
    };

    let on_toggle_category = {
        let filters = filters.clone();
        Callback::from(move |category: Category| {
            let mut next = (*filters).clone();
            if !next.categories.remove(&category) {
                next.categories.insert(category);
            }
            storage::save_filters(&next);
            filters.set(next);
        })
    };

    let on_toggle_assignee = {
        let filters = filters.clone();
        Callback::from(move |name: String| {
            let mut next = (*filters).clone();
            if !next.assignees.remove(name.as_str()) {
                next.assignees.insert(name);
            }
            storage::save_filters(&next);
            filters.set(next);
        })
    };

    let on_window_change = {
        let filters = filters.clone();
        Callback::from(move |window: TimeWindow| {
            let mut next = (*filters).clone();
            next.window = window;
            storage::save_filters(&next);
            filters.set(next);
        })
    };

    let on_filters_reset = {
        let filters = filters.clone();
        let directory = directory.clone();
        Callback::from(move |_: ()| {
            let next = FilterState::allowing_all(&directory);
            storage::save_filters(&next);
            filters.set(next);
        })
    };

    let shift_anchor = |months: i32| {
        let anchor = anchor.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let next = shift_months(*anchor, months);
            storage::save_anchor(next);
            anchor.set(next);
        })
    };
    let on_prev_month = shift_anchor(-1);
    let on_next_month = shift_anchor(1);
    let on_today = {
        let anchor = anchor.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            storage::save_anchor(today);
            anchor.set(today);
        })
    };

    // Filters are re-read and re-applied on every render, never cached.
    let weeks = month_weeks(*anchor, layout.week_start_day());
    let (all_tasks, dropped) = &*collection;
    let visible = filters.apply(all_tasks, today);
    let dropped = *dropped;

    html! {
        <div class="app">
            <header class="topbar">
                <div class="brand">{ "Plank" }</div>
                <div class="month-nav">
                    <button class="btn" onclick={on_prev_month}>{ "‹" }</button>
                    <button class="btn" onclick={on_today}>{ "Today" }</button>
                    <button class="btn" onclick={on_next_month}>{ "›" }</button>
                </div>
                <div class="month-title">{ anchor.format("%B %Y").to_string() }</div>
            </header>
            <div class="columns">
                <FilterPanel
                    directory={(*directory).clone()}
                    filters={(*filters).clone()}
                    on_toggle_category={on_toggle_category}
                    on_toggle_assignee={on_toggle_assignee}
                    on_window_change={on_window_change}
                    on_reset={on_filters_reset}
                />
                <MonthBoard
                    weeks={weeks}
                    anchor={*anchor}
                    today={today}
                    tasks={visible}
                    layout={(*layout).clone()}
                    selection={controller.selection()}
                    gesture_active={controller.is_active()}
                    on_cell_down={on_cell_down}
                    on_cell_enter={on_cell_enter}
                    on_segment_down={on_segment_down}
                    on_segment_edit={on_segment_edit}
                    on_release={on_release}
                    on_leave={on_board_leave}
                />
            </div>
            <TaskModal
                modal={modal.clone()}
                directory={(*directory).clone()}
                on_submit={on_modal_submit}
                on_delete={on_modal_delete}
                on_close={on_modal_close}
            />
            {
                if dropped > 0 {
                    html! {
                        <footer class="diagnostics">
                            { format!("{dropped} stored record(s) could not be read and were dropped") }
                        </footer>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
