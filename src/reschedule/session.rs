//! Drag/resize gesture state.
//!
//! A [`Rescheduler`] is either idle or tracking exactly one [`DragSession`].
//! Every pointer move recomputes the [`GhostPreview`] from the session
//! baseline and the total pointer displacement, so the preview never
//! accumulates rounding from earlier moves.

use std::mem;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::commit::{validate_proposal, CommitOutcome, DateChange, TaskDatesSink};
use super::layout::RowMetrics;
use crate::model::dates::{add_days, duration_days, format_day};
use crate::model::{DateGrid, Task};

/// Which part of a bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Whole bar; both dates shift together.
    Move,
    /// Left edge; only the start date changes.
    ResizeStart,
    /// Right edge; only the due date changes.
    ResizeEnd,
}

/// The bar a pointer-down landed on.
#[derive(Debug, Clone, Copy)]
pub struct DragTarget<'a> {
    pub task: &'a Task,
    /// Position of the task in the displayed sequence.
    pub row: usize,
    pub mode: DragMode,
}

/// Everything captured when a gesture begins.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: String,
    pub mode: DragMode,
    pub baseline_start: NaiveDate,
    pub baseline_due: NaiveDate,
    pub pointer_origin_x: f32,
    pub origin_left: f32,
    pub origin_width: f32,
    pub row: usize,
    /// Grid the gesture started on; fixed for the session.
    grid: DateGrid,
    row_top: f32,
}

/// Live, uncommitted placement of the dragged bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub left: f32,
    pub width: f32,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub top: f32,
}

impl DragSession {
    /// Ghost placement for the pointer at `pointer_x`.
    pub fn preview(&self, pointer_x: f32) -> GhostPreview {
        let day_offset = self
            .grid
            .offset_to_day_delta(pointer_x - self.pointer_origin_x);
        let (start, due) = self.proposed_dates(day_offset);
        let pos = self.grid.position_of(start, due);
        GhostPreview {
            left: pos.left,
            width: pos.width,
            start,
            due,
            top: self.row_top,
        }
    }

    /// Baseline dates shifted by `day_offset` and clamped per mode.
    pub fn proposed_dates(&self, day_offset: i64) -> (NaiveDate, NaiveDate) {
        let range = self.grid.range();
        let (range_start, range_due) = (range.start(), range.due());
        let (base_start, base_due) = (self.baseline_start, self.baseline_due);

        match self.mode {
            DragMode::Move => {
                let span = duration_days(base_start, base_due) - 1;
                let mut start = add_days(base_start, day_offset);
                let mut due = add_days(start, span);
                if start < range_start {
                    start = range_start;
                    due = add_days(start, span);
                }
                if due > range_due {
                    due = range_due;
                    start = add_days(due, -span);
                    // Longer than the whole range: keep the duration, pin to the start.
                    if start < range_start {
                        start = range_start;
                        due = add_days(start, span);
                    }
                }
                (start, due)
            }
            DragMode::ResizeStart => {
                let mut start = add_days(base_start, day_offset);
                if start < range_start {
                    start = range_start;
                }
                if start > base_due {
                    start = base_due;
                }
                (start, base_due)
            }
            DragMode::ResizeEnd => {
                let mut due = add_days(base_due, day_offset);
                if due > range_due {
                    due = range_due;
                }
                if due < base_start {
                    due = base_start;
                }
                (base_start, due)
            }
        }
    }

    fn ghost_at_baseline(&self) -> GhostPreview {
        GhostPreview {
            left: self.origin_left,
            width: self.origin_width,
            start: self.baseline_start,
            due: self.baseline_due,
            top: self.row_top,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        session: DragSession,
        ghost: GhostPreview,
    },
}

/// Owns at most one in-progress reschedule gesture.
#[derive(Debug, Clone, Default)]
pub struct Rescheduler {
    state: DragState,
}

impl Rescheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging { session, .. } => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn ghost(&self) -> Option<&GhostPreview> {
        match &self.state {
            DragState::Dragging { ghost, .. } => Some(ghost),
            DragState::Idle => None,
        }
    }

    pub fn active_mode(&self) -> Option<DragMode> {
        self.session().map(|s| s.mode)
    }

    /// Start a gesture. Returns `false`, leaving the rescheduler untouched, when
    /// the viewer may not edit, a gesture is already running, or the task's
    /// dates cannot be drawn.
    pub fn pointer_down(
        &mut self,
        grid: &DateGrid,
        metrics: &RowMetrics,
        target: DragTarget<'_>,
        pointer_x: f32,
        can_edit: bool,
    ) -> bool {
        let task = target.task;
        if !can_edit {
            debug!(task_id = %task.id, "drag refused: no edit permission");
            return false;
        }
        if self.is_dragging() {
            debug!(task_id = %task.id, "drag ignored: a gesture is already active");
            return false;
        }
        if !task.has_valid_dates() {
            warn!(
                task_id = %task.id,
                start = %format_day(task.start),
                due = %format_day(task.due),
                "drag refused: task dates are inverted"
            );
            return false;
        }

        let pos = grid.position_of(task.start, task.due);
        let session = DragSession {
            task_id: task.id.clone(),
            mode: target.mode,
            baseline_start: task.start,
            baseline_due: task.due,
            pointer_origin_x: pointer_x,
            origin_left: pos.left,
            origin_width: pos.width,
            row: target.row,
            grid: *grid,
            row_top: metrics.row_top(target.row),
        };
        debug!(task_id = %session.task_id, mode = ?session.mode, "drag started");
        let ghost = session.ghost_at_baseline();
        self.state = DragState::Dragging { session, ghost };
        true
    }

    /// Update the ghost for the current pointer position. No-op when idle.
    pub fn pointer_move(&mut self, pointer_x: f32) -> Option<&GhostPreview> {
        match &mut self.state {
            DragState::Dragging { session, ghost } => {
                *ghost = session.preview(pointer_x);
                Some(&*ghost)
            }
            DragState::Idle => None,
        }
    }

    /// Finish the gesture: commit the ghost's dates through `sink` if they pass
    /// validation, otherwise drop them. Always returns to idle.
    pub fn release(&mut self, sink: &mut impl TaskDatesSink) -> CommitOutcome {
        let (session, ghost) = match mem::take(&mut self.state) {
            DragState::Dragging { session, ghost } => (session, ghost),
            DragState::Idle => return CommitOutcome::NoSession,
        };

        let range = session.grid.range();
        if let Err(rejection) = validate_proposal(&range, ghost.start, ghost.due) {
            warn!(
                task_id = %session.task_id,
                start = %format_day(ghost.start),
                due = %format_day(ghost.due),
                range_start = %format_day(range.start()),
                range_due = %format_day(range.due()),
                %rejection,
                "reschedule discarded"
            );
            return CommitOutcome::Discarded(rejection);
        }

        let change = DateChange {
            task_id: session.task_id,
            start: format_day(ghost.start),
            due: format_day(ghost.due),
        };
        debug!(task_id = %change.task_id, start = %change.start, due = %change.due, "reschedule committed");
        sink.on_task_dates_change(&change.task_id, &change.start, &change.due);
        CommitOutcome::Committed(change)
    }

    /// Drop any active gesture without committing, e.g. when the chart is torn down.
    pub fn reset(&mut self) {
        if let DragState::Dragging { session, .. } = mem::take(&mut self.state) {
            debug!(task_id = %session.task_id, "drag abandoned on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::parse_day;
    use crate::model::ProjectRange;
    use crate::reschedule::commit::{CollectedChanges, CommitRejection};

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn grid() -> DateGrid {
        DateGrid::new(ProjectRange::parse("2024-01-01", "2024-01-31").unwrap(), 35.0)
    }

    fn task(start: &str, due: &str) -> Task {
        Task::new("T1", "Task", d(start), d(due))
    }

    fn begin(r: &mut Rescheduler, t: &Task, mode: DragMode) -> bool {
        let target = DragTarget { task: t, row: 2, mode };
        r.pointer_down(&grid(), &RowMetrics::default(), target, 500.0, true)
    }

    #[test]
    fn pointer_down_seeds_ghost_at_baseline() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        assert!(begin(&mut r, &t, DragMode::Move));

        let ghost = *r.ghost().unwrap();
        assert_eq!(ghost.left, 140.0);
        assert_eq!(ghost.width, 210.0);
        assert_eq!(ghost.top, RowMetrics::default().row_top(2));
        assert_eq!((ghost.start, ghost.due), (t.start, t.due));
        assert_eq!(r.active_mode(), Some(DragMode::Move));
    }

    #[test]
    fn refuses_without_permission() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        let target = DragTarget { task: &t, row: 0, mode: DragMode::Move };
        assert!(!r.pointer_down(&grid(), &RowMetrics::default(), target, 0.0, false));
        assert!(!r.is_dragging());
        assert!(r.pointer_move(100.0).is_none());
    }

    #[test]
    fn second_pointer_down_keeps_first_session() {
        let a = task("2024-01-05", "2024-01-10");
        let b = task("2024-01-12", "2024-01-14");
        let mut r = Rescheduler::new();
        assert!(begin(&mut r, &a, DragMode::Move));
        assert!(!begin(&mut r, &b, DragMode::ResizeEnd));
        assert_eq!(r.session().unwrap().task_id, a.id);
    }

    #[test]
    fn inverted_task_cannot_be_dragged() {
        let t = task("2024-02-01", "2024-01-30");
        let mut r = Rescheduler::new();
        assert!(!begin(&mut r, &t, DragMode::Move));
    }

    #[test]
    fn moves_are_computed_from_the_baseline() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::Move);

        // Many small moves must land exactly where one big move would.
        for step in 1..=30 {
            r.pointer_move(500.0 + step as f32 * 3.5);
        }
        let ghost = *r.ghost().unwrap();
        assert_eq!((ghost.start, ghost.due), (d("2024-01-08"), d("2024-01-13")));
        assert_eq!(ghost.left, 7.0 * 35.0);
    }

    #[test]
    fn move_keeps_duration_against_both_edges() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::Move);

        let ghost = *r.pointer_move(500.0 - 35.0 * 20.0).unwrap();
        assert_eq!((ghost.start, ghost.due), (d("2024-01-01"), d("2024-01-06")));

        let ghost = *r.pointer_move(500.0 + 35.0 * 40.0).unwrap();
        assert_eq!((ghost.start, ghost.due), (d("2024-01-26"), d("2024-01-31")));
    }

    #[test]
    fn move_of_a_task_longer_than_the_range_pins_to_range_start() {
        let t = task("2023-12-20", "2024-02-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::Move);
        let ghost = *r.pointer_move(535.0).unwrap();
        assert_eq!(ghost.start, d("2024-01-01"));
        assert_eq!(duration_days(ghost.start, ghost.due), duration_days(t.start, t.due));

        let mut sink = CollectedChanges::default();
        assert!(matches!(
            r.release(&mut sink),
            CommitOutcome::Discarded(CommitRejection::DueAfterRange { .. })
        ));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn resize_start_cannot_pass_due() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::ResizeStart);
        let ghost = *r.pointer_move(500.0 + 35.0 * 9.0).unwrap();
        assert_eq!((ghost.start, ghost.due), (d("2024-01-10"), d("2024-01-10")));
        assert_eq!(ghost.width, 35.0);
    }

    #[test]
    fn resize_end_cannot_pass_start() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::ResizeEnd);
        let ghost = *r.pointer_move(500.0 - 35.0 * 9.0).unwrap();
        assert_eq!((ghost.start, ghost.due), (d("2024-01-05"), d("2024-01-05")));
    }

    #[test]
    fn release_commits_once_and_returns_to_idle() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::Move);
        r.pointer_move(605.0);

        let mut sink = CollectedChanges::default();
        let outcome = r.release(&mut sink);
        assert!(matches!(outcome, CommitOutcome::Committed(_)));
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].start, "2024-01-08");
        assert_eq!(sink.0[0].due, "2024-01-13");
        assert!(!r.is_dragging());
        assert!(r.ghost().is_none());

        assert_eq!(r.release(&mut sink), CommitOutcome::NoSession);
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn release_in_place_still_reaches_the_sink() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::ResizeEnd);
        r.pointer_move(510.0);

        let mut calls = 0;
        let outcome = r.release(&mut |_: &str, start: &str, due: &str| {
            calls += 1;
            assert_eq!((start, due), ("2024-01-05", "2024-01-10"));
        });
        assert_eq!(calls, 1);
        assert!(matches!(outcome, CommitOutcome::Committed(_)));
        assert!(!r.is_dragging());
    }

    #[test]
    fn reset_drops_the_session_without_committing() {
        let t = task("2024-01-05", "2024-01-10");
        let mut r = Rescheduler::new();
        begin(&mut r, &t, DragMode::Move);
        r.pointer_move(605.0);
        r.reset();

        let mut sink = CollectedChanges::default();
        assert_eq!(r.release(&mut sink), CommitOutcome::NoSession);
        assert!(sink.0.is_empty());
    }
}
