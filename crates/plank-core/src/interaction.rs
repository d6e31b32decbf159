use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::grid::add_days;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// The transient gesture state. Exactly one variant is live at a time and
/// it is never persisted; `Idle` is both the initial and the terminal
/// state of every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Selecting {
        anchor: NaiveDate,
        current: NaiveDate,
    },
    Dragging {
        id: Uuid,
        day_offset: i64,
        duration: i64,
    },
    Resizing {
        id: Uuid,
        edge: Edge,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// Geometry of one rendered segment, independent of render mode: a
/// pixel-sized day bar and a percent-of-week strip both reduce to a width
/// in pixels covering a whole number of days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanMetrics {
    pub width_px: f32,
    pub days: i64,
    pub is_true_start: bool,
    pub is_true_end: bool,
}

impl SpanMetrics {
    /// Percent-of-week strips: the rendered width is measured directly.
    pub fn from_width(width_px: f32, days: i64, is_true_start: bool, is_true_end: bool) -> Self {
        Self {
            width_px: width_px.max(1.0),
            days: days.max(1),
            is_true_start,
            is_true_end,
        }
    }

    /// Pixel-mode bars: a whole number of fixed-width day cells.
    pub fn from_day_width(
        day_width_px: f32,
        days: i64,
        is_true_start: bool,
        is_true_end: bool,
    ) -> Self {
        Self::from_width(day_width_px * days.max(1) as f32, days, is_true_start, is_true_end)
    }

    /// Day index under `x_px`: the fractional position across the bar,
    /// floored, clamped into the span.
    pub fn day_at(&self, x_px: f32) -> i64 {
        let fraction = (x_px / self.width_px).clamp(0.0, 1.0);
        ((fraction * self.days as f32) as i64).clamp(0, self.days - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanHit {
    StartEdge,
    EndEdge,
    Body { day_into_span: i64 },
}

/// Classify a pointer-down position on a rendered bar. Only a margin
/// touching the task's true boundary counts as an edge: a bar clipped at a
/// week break exposes no resize handle on the clipped side.
pub fn hit_test(metrics: &SpanMetrics, x_px: f32, edge_margin_px: f32) -> SpanHit {
    if metrics.is_true_start && x_px <= edge_margin_px {
        return SpanHit::StartEdge;
    }
    if metrics.is_true_end && x_px >= metrics.width_px - edge_margin_px {
        return SpanHit::EndEdge;
    }
    SpanHit::Body {
        day_into_span: metrics.day_at(x_px),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The pointer-driven gesture state machine. Owns the gesture exclusively;
/// task mutations are applied directly to the collection passed into
/// `hover_day`: optimistic, one mutation per event, no rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// The in-progress selection, normalized for highlighting.
    pub fn selection(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.gesture {
            Gesture::Selecting { anchor, current } => {
                Some((anchor.min(current), anchor.max(current)))
            }
            _ => None,
        }
    }

    /// Pointer-down on an empty grid cell.
    pub fn begin_selection(&mut self, day: NaiveDate) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        debug!(%day, "gesture: selecting");
        self.gesture = Gesture::Selecting {
            anchor: day,
            current: day,
        };
        true
    }

    /// Pointer-down on a rendered segment; the hit position decides
    /// between moving the task and grabbing a resize edge. `day_offset`
    /// and the duration are fixed here for the whole gesture.
    pub fn begin_on_segment(
        &mut self,
        task: &Task,
        visible_start: NaiveDate,
        metrics: &SpanMetrics,
        x_px: f32,
        edge_margin_px: f32,
    ) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        self.gesture = match hit_test(metrics, x_px, edge_margin_px) {
            SpanHit::StartEdge => {
                debug!(task = %task.id, "gesture: resizing start edge");
                Gesture::Resizing {
                    id: task.id,
                    edge: Edge::Start,
                }
            }
            SpanHit::EndEdge => {
                debug!(task = %task.id, "gesture: resizing end edge");
                Gesture::Resizing {
                    id: task.id,
                    edge: Edge::End,
                }
            }
            SpanHit::Body { day_into_span } => {
                let grabbed = add_days(visible_start, day_into_span);
                let day_offset = (grabbed - task.start).num_days();
                debug!(task = %task.id, day_offset, "gesture: dragging");
                Gesture::Dragging {
                    id: task.id,
                    day_offset,
                    duration: task.duration_days(),
                }
            }
        };
        true
    }

    /// Pointer-enter on a day cell during an active gesture. Applies at
    /// most one mutation, immediately; intermediate positions stand even if
    /// the gesture is later abandoned. Returns whether anything changed so
    /// the owner knows to persist and re-render.
    pub fn hover_day(&mut self, day: NaiveDate, tasks: &mut [Task]) -> bool {
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Selecting { current, .. } => {
                if *current == day {
                    return false;
                }
                *current = day;
                true
            }
            Gesture::Dragging {
                id,
                day_offset,
                duration,
            } => {
                let Some(task) = tasks.iter_mut().find(|task| task.id == *id) else {
                    return false;
                };
                let new_start = add_days(day, -*day_offset);
                if task.start == new_start {
                    return false;
                }
                task.start = new_start;
                task.end = add_days(new_start, *duration);
                true
            }
            Gesture::Resizing { id, edge } => {
                let Some(task) = tasks.iter_mut().find(|task| task.id == *id) else {
                    return false;
                };
                // The inversion guard ignores the hovered day entirely.
                match edge {
                    Edge::Start => task.start != day && task.try_set_start(day),
                    Edge::End => task.end != day && task.try_set_end(day),
                }
            }
        }
    }

    /// Pointer-up. Always returns to `Idle`; from `Selecting` this yields
    /// the normalized committed range for the create form. Drag and resize
    /// mutations are already applied, so there is nothing else to do.
    pub fn release(&mut self) -> Option<CommittedRange> {
        let finished = std::mem::take(&mut self.gesture);
        if finished.is_active() {
            debug!(?finished, "gesture: released");
        }
        match finished {
            Gesture::Selecting { anchor, current } => Some(CommittedRange {
                start: anchor.min(current),
                end: anchor.max(current),
            }),
            _ => None,
        }
    }

    /// Pointer left the grid container: terminate without committing a
    /// selection. Drag and resize keep their last applied position.
    pub fn abandon(&mut self) {
        if self.gesture.is_active() {
            debug!("gesture: abandoned");
        }
        self.gesture = Gesture::Idle;
    }
}
