use tracing::debug;

use super::session::DragMode;
use crate::model::dates::format_day;
use crate::model::{DateGrid, Task};

/// Vertical sizing of timeline rows and the width of edge handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub bar_height: f32,
    pub row_gap: f32,
    pub handle_width: f32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            bar_height: 28.0,
            row_gap: 8.0,
            handle_width: 8.0,
        }
    }
}

impl RowMetrics {
    pub fn row_pitch(&self) -> f32 {
        self.bar_height + self.row_gap
    }

    /// Top of row `row`, relative to the first row.
    pub fn row_top(&self, row: usize) -> f32 {
        row as f32 * self.row_pitch()
    }

    /// Height needed to show `rows` rows.
    pub fn content_height(&self, rows: usize) -> f32 {
        self.row_top(rows) + self.row_gap
    }
}

/// Horizontal extent `[left, right]` in grid pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn contains(&self, x: f32) -> bool {
        self.left <= x && x <= self.right
    }
}

/// Placement of one task's bar and its resize handles.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Index into the task sequence; also the row.
    pub row: usize,
    pub task_id: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub start_handle: Span,
    pub end_handle: Span,
}

impl BarLayout {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.left <= x && x <= self.right() && self.top <= y && y < self.top + self.height
    }

    /// What a pointer-down at `x` on this bar would grab.
    pub fn mode_at(&self, x: f32) -> DragMode {
        if self.end_handle.contains(x) {
            DragMode::ResizeEnd
        } else if self.start_handle.contains(x) {
            DragMode::ResizeStart
        } else {
            DragMode::Move
        }
    }
}

/// Lay out one bar per drawable task, keeping each task on its own row.
///
/// Tasks whose bar would have no width are skipped; the rows of the tasks
/// after them do not move up.
pub fn layout_bars(tasks: &[Task], grid: &DateGrid, metrics: &RowMetrics) -> Vec<BarLayout> {
    tasks
        .iter()
        .enumerate()
        .filter_map(|(row, task)| {
            let pos = grid.position_of(task.start, task.due);
            if pos.width <= 0.0 {
                debug!(
                    task_id = %task.id,
                    code = %task.code,
                    start = %format_day(task.start),
                    due = %format_day(task.due),
                    "task has no drawable width, not rendering"
                );
                return None;
            }
            let handle = metrics.handle_width.min(pos.width / 2.0);
            Some(BarLayout {
                row,
                task_id: task.id.clone(),
                left: pos.left,
                top: metrics.row_top(row),
                width: pos.width,
                height: metrics.bar_height,
                start_handle: Span {
                    left: pos.left,
                    right: pos.left + handle,
                },
                end_handle: Span {
                    left: pos.left + pos.width - handle,
                    right: pos.left + pos.width,
                },
            })
        })
        .collect()
}

/// Find the bar under `(x, y)` and what part of it was hit.
pub fn hit_test(bars: &[BarLayout], x: f32, y: f32) -> Option<(&BarLayout, DragMode)> {
    bars.iter()
        .find(|bar| bar.contains(x, y))
        .map(|bar| (bar, bar.mode_at(x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::parse_day;
    use crate::model::ProjectRange;

    fn grid() -> DateGrid {
        DateGrid::new(ProjectRange::parse("2024-01-01", "2024-01-31").unwrap(), 35.0)
    }

    fn task(code: &str, start: &str, due: &str) -> Task {
        Task::new(code, code, parse_day(start).unwrap(), parse_day(due).unwrap())
    }

    #[test]
    fn rows_follow_sequence_order() {
        let m = RowMetrics::default();
        assert_eq!(m.row_top(0), 0.0);
        assert_eq!(m.row_top(3), 3.0 * 36.0);
        assert_eq!(m.content_height(2), 80.0);
    }

    #[test]
    fn invalid_tasks_are_skipped_without_shifting_rows() {
        let tasks = vec![
            task("T1", "2024-01-05", "2024-01-10"),
            task("T2", "2024-02-01", "2024-01-30"),
            task("T3", "2024-01-12", "2024-01-12"),
        ];
        let bars = layout_bars(&tasks, &grid(), &RowMetrics::default());
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].row, 0);
        assert_eq!((bars[0].left, bars[0].width), (140.0, 210.0));
        assert_eq!(bars[1].row, 2);
        assert_eq!(bars[1].top, 72.0);
        assert_eq!(bars[1].task_id, tasks[2].id);
    }

    #[test]
    fn handles_sit_on_the_bar_edges() {
        let tasks = vec![task("T1", "2024-01-05", "2024-01-10")];
        let bars = layout_bars(&tasks, &grid(), &RowMetrics::default());
        let bar = &bars[0];
        assert_eq!(bar.start_handle, Span { left: 140.0, right: 148.0 });
        assert_eq!(bar.end_handle, Span { left: 342.0, right: 350.0 });
    }

    #[test]
    fn hit_test_prefers_handles_over_the_body() {
        let tasks = vec![
            task("T1", "2024-01-05", "2024-01-10"),
            task("T2", "2024-01-01", "2024-01-03"),
        ];
        let bars = layout_bars(&tasks, &grid(), &RowMetrics::default());

        let (bar, mode) = hit_test(&bars, 142.0, 10.0).unwrap();
        assert_eq!((bar.row, mode), (0, DragMode::ResizeStart));
        let (_, mode) = hit_test(&bars, 200.0, 10.0).unwrap();
        assert_eq!(mode, DragMode::Move);
        let (_, mode) = hit_test(&bars, 349.0, 10.0).unwrap();
        assert_eq!(mode, DragMode::ResizeEnd);

        let (bar, _) = hit_test(&bars, 50.0, 40.0).unwrap();
        assert_eq!(bar.row, 1);
        // In the gap between rows.
        assert!(hit_test(&bars, 200.0, 30.0).is_none());
    }

    #[test]
    fn narrow_bar_handles_meet_and_end_wins() {
        let narrow = DateGrid::new(ProjectRange::parse("2024-01-01", "2024-01-31").unwrap(), 10.0);
        let tasks = vec![task("T1", "2024-01-03", "2024-01-03")];
        let bars = layout_bars(&tasks, &narrow, &RowMetrics::default());
        let bar = &bars[0];
        assert_eq!(bar.start_handle, Span { left: 20.0, right: 25.0 });
        assert_eq!(bar.end_handle, Span { left: 25.0, right: 30.0 });

        assert_eq!(bar.mode_at(25.0), DragMode::ResizeEnd);
        assert_eq!(bar.mode_at(21.0), DragMode::ResizeStart);
    }
}
