use chrono::{Datelike, NaiveDate};
use plank_core::config::LayoutConfig;
use plank_core::directory::UserDirectory;
use plank_core::filter::{FilterState, TimeWindow};
use plank_core::grid::Week;
use plank_core::interaction::SpanMetrics;
use plank_core::layout::{WeekSegment, project_week};
use plank_core::task::{Category, Color, Priority, Task};
use uuid::Uuid;
use yew::{
    Callback, Html, Properties, TargetCast, UseStateHandle, classes, function_component, html,
};

use crate::app::{ModalMode, ModalState};

/// A pointer-down on a rendered bar, with enough geometry for the
/// controller's hit test.
#[derive(Clone, PartialEq)]
pub struct SegmentPress {
    pub task_id: Uuid,
    pub visible_start: NaiveDate,
    pub metrics: SpanMetrics,
    pub x_px: f32,
}

#[derive(Properties, PartialEq)]
pub struct MonthBoardProps {
    pub weeks: Vec<Week>,
    pub anchor: NaiveDate,
    pub today: NaiveDate,
    pub tasks: Vec<Task>,
    pub layout: LayoutConfig,
    pub selection: Option<(NaiveDate, NaiveDate)>,
    pub gesture_active: bool,
    pub on_cell_down: Callback<NaiveDate>,
    pub on_cell_enter: Callback<NaiveDate>,
    pub on_segment_down: Callback<SegmentPress>,
    pub on_segment_edit: Callback<Uuid>,
    pub on_release: Callback<()>,
    pub on_leave: Callback<()>,
}

#[function_component(MonthBoard)]
pub fn month_board(props: &MonthBoardProps) -> Html {
    let weekday_labels: Vec<String> = props
        .weeks
        .first()
        .map(|week| week.iter().map(|day| day.format("%a").to_string()).collect())
        .unwrap_or_default();

    html! {
        <div
            class={classes!("panel", "board", props.gesture_active.then_some("gesturing"))}
            onmouseup={props.on_release.reform(|_: web_sys::MouseEvent| ())}
            onmouseleave={props.on_leave.reform(|_: web_sys::MouseEvent| ())}
        >
            <div class="weekday-row">
                {
                    for weekday_labels.iter().map(|label| html! {
                        <div class="weekday">{ label.clone() }</div>
                    })
                }
            </div>
            { for props.weeks.iter().map(|week| render_week(props, week)) }
        </div>
    }
}

fn render_week(props: &MonthBoardProps, week: &Week) -> Html {
    let segments = project_week(week, &props.tasks);

    html! {
        <div class="week-row">
            <div class="week-cells">
                {
                    for week.iter().map(|day| {
                        let day = *day;
                        let outside = day.month() != props.anchor.month();
                        let selected = props
                            .selection
                            .map(|(from, to)| from <= day && day <= to)
                            .unwrap_or(false);
                        let is_today = day == props.today;
                        let on_cell_down = props.on_cell_down.clone();
                        let on_cell_enter = props.on_cell_enter.clone();
                        html! {
                            <div
                                class={classes!(
                                    "day-cell",
                                    outside.then_some("outside"),
                                    selected.then_some("selected"),
                                    is_today.then_some("today")
                                )}
                                onmousedown={Callback::from(move |event: web_sys::MouseEvent| {
                                    event.prevent_default();
                                    on_cell_down.emit(day);
                                })}
                                onmouseenter={Callback::from(move |_| on_cell_enter.emit(day))}
                            >
                                <div class="day-label">{ day.day() }</div>
                            </div>
                        }
                    })
                }
            </div>
            <div class="week-tasks">
                { for segments.iter().map(|segment| render_segment(props, segment)) }
            </div>
        </div>
    }
}

fn render_segment(props: &MonthBoardProps, segment: &WeekSegment) -> Html {
    let Some(task) = props.tasks.iter().find(|task| task.id == segment.task_id) else {
        return html! {};
    };

    let style = format!(
        "left:{:.4}%;width:{:.4}%;top:{}px;background:{};",
        segment.left_percent(),
        segment.width_percent(),
        segment.top_offset_px(&props.layout),
        task.color.hex(),
    );

    let on_press = {
        let on_segment_down = props.on_segment_down.clone();
        let task_id = segment.task_id;
        let visible_start = segment.visible_start;
        let days = segment.span_days();
        let is_true_start = segment.is_true_start;
        let is_true_end = segment.is_true_end;
        Callback::from(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            event.prevent_default();
            // The bar's rendered width is the coordinate space of the hit
            // test; labels and handles are pointer-transparent so the
            // offset is always bar-relative.
            let width = event
                .target_dyn_into::<web_sys::HtmlElement>()
                .map(|element| element.offset_width() as f32)
                .unwrap_or(0.0);
            on_segment_down.emit(SegmentPress {
                task_id,
                visible_start,
                metrics: SpanMetrics::from_width(width, days, is_true_start, is_true_end),
                x_px: event.offset_x() as f32,
            });
        })
    };

    let on_edit = {
        let on_segment_edit = props.on_segment_edit.clone();
        let task_id = segment.task_id;
        Callback::from(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            on_segment_edit.emit(task_id);
        })
    };

    let show_label = segment.is_true_start || segment.start_col == 0;

    html! {
        <div
            class={classes!("task-bar", segment.corner().css_class())}
            style={style}
            title={format!("{} ({})", task.name, task.assignee)}
            onmousedown={on_press}
            ondblclick={on_edit}
        >
            {
                if show_label {
                    html! { <span class="bar-label">{ &task.name }</span> }
                } else {
                    html! {}
                }
            }
            {
                if segment.is_true_start {
                    html! { <span class="bar-handle handle-start"></span> }
                } else {
                    html! {}
                }
            }
            {
                if segment.is_true_end {
                    html! { <span class="bar-handle handle-end"></span> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub directory: UserDirectory,
    pub filters: FilterState,
    pub on_toggle_category: Callback<Category>,
    pub on_toggle_assignee: Callback<String>,
    pub on_window_change: Callback<TimeWindow>,
    pub on_reset: Callback<()>,
}

#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let on_window = {
        let on_window_change = props.on_window_change.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
            if let Some(window) = TimeWindow::from_key(&select.value()) {
                on_window_change.emit(window);
            }
        })
    };

    html! {
        <div class="panel filters">
            <div class="header">{ "Filters" }</div>
            <div class="field">
                <label>{ "Categories" }</label>
                {
                    for Category::ALL.into_iter().map(|category| {
                        let checked = props.filters.categories.contains(&category);
                        let on_toggle = props.on_toggle_category.clone();
                        html! {
                            <label class="check-row">
                                <input
                                    type="checkbox"
                                    checked={checked}
                                    onchange={Callback::from(move |_| on_toggle.emit(category))}
                                />
                                { category.label() }
                            </label>
                        }
                    })
                }
            </div>
            <div class="field">
                <label>{ "Assignees" }</label>
                {
                    for props.directory.users().iter().map(|user| {
                        let name = user.name.clone();
                        let checked = props.filters.assignees.contains(name.as_str());
                        let on_toggle = props.on_toggle_assignee.clone();
                        html! {
                            <label class="check-row">
                                <input
                                    type="checkbox"
                                    checked={checked}
                                    onchange={{
                                        let name = name.clone();
                                        Callback::from(move |_| on_toggle.emit(name.clone()))
                                    }}
                                />
                                { name.clone() }
                            </label>
                        }
                    })
                }
            </div>
            <div class="field">
                <label>{ "Time window" }</label>
                <select class="window-select" onchange={on_window}>
                    {
                        for TimeWindow::ALL_WINDOWS.into_iter().map(|window| html! {
                            <option
                                value={window.as_key()}
                                selected={props.filters.window == window}
                            >
                                { window.label() }
                            </option>
                        })
                    }
                </select>
            </div>
            <div class="actions">
                <button class="btn" onclick={props.on_reset.reform(|_: web_sys::MouseEvent| ())}>
                    { "Reset" }
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
    pub modal: UseStateHandle<Option<ModalState>>,
    pub directory: UserDirectory,
    pub on_submit: Callback<ModalState>,
    pub on_delete: Callback<Uuid>,
    pub on_close: Callback<()>,
}

#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
    let modal = props.modal.clone();
    let Some(state) = (*modal).clone() else {
        return html! {};
    };

    let title = match state.mode {
        ModalMode::Create { start, end } => {
            if start == end {
                format!("New task for {}", start.format("%b %-d"))
            } else {
                format!(
                    "New task, {} to {}",
                    start.format("%b %-d"),
                    end.format("%b %-d")
                )
            }
        }
        ModalMode::Edit(_) => "Edit task".to_string(),
    };

    let on_save = {
        let on_submit = props.on_submit.clone();
        let submit_state = state.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_submit.emit(submit_state.clone()))
    };

    let on_name_input = {
        let modal = modal.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = event.target_unchecked_into();
            if let Some(mut current) = (*modal).clone() {
                current.draft_name = input.value();
                current.error = None;
                modal.set(Some(current));
            }
        })
    };

    let on_category_change = {
        let modal = modal.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
            if let Some(mut current) = (*modal).clone()
                && let Some(category) = Category::from_key(&select.value())
            {
                current.draft_category = category;
                modal.set(Some(current));
            }
        })
    };

    let on_assignee_change = {
        let modal = modal.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
            if let Some(mut current) = (*modal).clone() {
                current.draft_assignee = select.value();
                modal.set(Some(current));
            }
        })
    };

    let on_priority_change = {
        let modal = modal.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
            if let Some(mut current) = (*modal).clone()
                && let Some(priority) = Priority::from_key(&select.value())
            {
                current.draft_priority = priority;
                modal.set(Some(current));
            }
        })
    };

    let on_color_change = {
        let modal = modal.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
            if let Some(mut current) = (*modal).clone()
                && let Some(color) = Color::from_key(&select.value())
            {
                current.draft_color = color;
                modal.set(Some(current));
            }
        })
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="header">{ title }</div>
                <div class="content">
                    {
                        if let Some(err) = state.error.clone() {
                            html! { <div class="form-error">{ err }</div> }
                        } else {
                            html! {}
                        }
                    }
                    <div class="field">
                        <label>{ "Name" }</label>
                        <input
                            value={state.draft_name.clone()}
                            placeholder="Required task name"
                            oninput={on_name_input}
                        />
                    </div>
                    <div class="field">
                        <label>{ "Category" }</label>
                        <select onchange={on_category_change}>
                            {
                                for Category::ALL.into_iter().map(|category| html! {
                                    <option
                                        value={category.as_key()}
                                        selected={state.draft_category == category}
                                    >
                                        { category.label() }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div class="field">
                        <label>{ "Assignee" }</label>
                        <select onchange={on_assignee_change}>
                            {
                                for props.directory.users().iter().map(|user| html! {
                                    <option
                                        value={user.name.clone()}
                                        selected={state.draft_assignee == user.name}
                                    >
                                        { user.name.clone() }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div class="field">
                        <label>{ "Priority" }</label>
                        <select onchange={on_priority_change}>
                            {
                                for Priority::ALL.into_iter().map(|priority| html! {
                                    <option
                                        value={priority.as_key()}
                                        selected={state.draft_priority == priority}
                                    >
                                        { priority.label() }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div class="field">
                        <label>{ "Color" }</label>
                        <select onchange={on_color_change}>
                            {
                                for Color::ALL.into_iter().map(|color| html! {
                                    <option
                                        value={color.as_key()}
                                        selected={state.draft_color == color}
                                    >
                                        { color.label() }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                </div>
                <div class="actions">
                    {
                        if let ModalMode::Edit(id) = state.mode {
                            let on_delete = props.on_delete.clone();
                            html! {
                                <button
                                    class="btn danger"
                                    onclick={Callback::from(move |_| on_delete.emit(id))}
                                >
                                    { "Delete" }
                                </button>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <button class="btn" onclick={props.on_close.reform(|_: web_sys::MouseEvent| ())}>
                        { "Cancel" }
                    </button>
                    <button class="btn primary" onclick={on_save}>{ "Save" }</button>
                </div>
            </div>
        </div>
    }
}
