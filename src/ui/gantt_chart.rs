use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, CursorIcon, Id, Pos2, Rect, Response, Rounding, Sense, Shape, Stroke, Ui, Vec2};

use crate::config::TimelineSettings;
use crate::model::dates::format_day;
use crate::model::{DateGrid, Task};
use crate::reschedule::{
    hit_test, layout_bars, BarLayout, CollectedChanges, DateChange, DragMode, DragTarget, GhostPreview,
    Rescheduler, RowMetrics,
};
use crate::ui::theme;

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Reschedules that passed the commit check.
    pub changes: Vec<DateChange>,
    /// Task whose bar was clicked.
    pub clicked_task: Option<String>,
    /// Ctrl+scroll zoom request: positive zooms in.
    pub zoom_steps: i32,
}

/// Render the timeline (right panel).
///
/// Drag and resize are only wired when `can_edit` is set; otherwise bars
/// only show tooltips and take clicks.
#[allow(clippy::too_many_arguments)]
pub fn show_gantt_chart(
    tasks: &[Task],
    grid: &DateGrid,
    settings: &TimelineSettings,
    rescheduler: &mut Rescheduler,
    selected_task: Option<&str>,
    can_edit: bool,
    today: NaiveDate,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    if tasks.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new("No tasks to show on the timeline.").color(theme::TEXT_DIM));
        });
        return interaction;
    }

    let metrics = settings.row_metrics();
    let available = ui.available_size();
    let chart_width = grid.total_width().max(available.x);
    let chart_height = theme::HEADER_HEIGHT + theme::BARS_TOP_PAD + metrics.content_height(tasks.len()) + 40.0;

    // Ctrl+scroll zooms, but never while a gesture holds the grid.
    if ui.rect_contains_pointer(ui.max_rect()) && !rescheduler.is_dragging() {
        let (ctrl, scroll) = ui.input(|i| (i.modifiers.ctrl, i.smooth_scroll_delta.y));
        if ctrl && scroll > 0.0 {
            interaction.zoom_steps = 1;
        } else if ctrl && scroll < 0.0 {
            interaction.zoom_steps = -1;
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let sense = if can_edit { Sense::click_and_drag() } else { Sense::click() };
            let (response, painter) = ui.allocate_painter(Vec2::new(chart_width, chart_height.max(available.y)), sense);
            let origin = response.rect.min;
            let bars_origin = origin + Vec2::new(0.0, theme::HEADER_HEIGHT + theme::BARS_TOP_PAD);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_day_columns(&painter, origin, grid, response.rect.bottom());
            draw_timeline_header(&painter, origin, grid, chart_width);
            if let Some(x) = grid.today_marker_offset(today) {
                draw_today_line(&painter, origin, x, response.rect.bottom());
            }

            let dragged_id = rescheduler.session().map(|s| s.task_id.clone());
            let bars = layout_bars(tasks, grid, &metrics);
            for bar in &bars {
                let task = &tasks[bar.row];
                let is_selected = selected_task == Some(task.id.as_str());
                let is_dragged = dragged_id.as_deref() == Some(task.id.as_str());
                draw_task_bar(&painter, bar_rect(bars_origin, bar), task, is_selected, is_dragged);
            }

            if !rescheduler.is_dragging() {
                if let Some((bar, mode)) = response.hover_pos().and_then(|p| bar_at(&bars, bars_origin, p)) {
                    let task = &tasks[bar.row];
                    if can_edit {
                        draw_handles(&painter, bars_origin, bar);
                        ui.ctx().set_cursor_icon(match mode {
                            DragMode::Move => CursorIcon::Grab,
                            DragMode::ResizeStart | DragMode::ResizeEnd => CursorIcon::ResizeHorizontal,
                        });
                    }
                    show_task_tooltip(ui, &response, task);
                }
            }

            if response.clicked() {
                if let Some((bar, _)) = response.interact_pointer_pos().and_then(|p| bar_at(&bars, bars_origin, p)) {
                    interaction.clicked_task = Some(bar.task_id.clone());
                }
            }

            if response.drag_started() {
                let press = ui.input(|i| i.pointer.press_origin()).or(response.interact_pointer_pos());
                if let Some((press, (bar, mode))) = press.and_then(|p| bar_at(&bars, bars_origin, p).map(|hit| (p, hit))) {
                    let task = &tasks[bar.row];
                    let target = DragTarget { task, row: bar.row, mode };
                    if rescheduler.pointer_down(grid, &metrics, target, press.x, can_edit) {
                        interaction.clicked_task = Some(task.id.clone());
                    }
                }
            }

            // While a gesture is active, follow the pointer anywhere in the window.
            if let Some(mode) = rescheduler.active_mode() {
                ui.ctx().set_cursor_icon(match mode {
                    DragMode::Move => CursorIcon::Grabbing,
                    DragMode::ResizeStart | DragMode::ResizeEnd => CursorIcon::ResizeHorizontal,
                });
                let (latest, released) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
                if let Some(pos) = latest {
                    rescheduler.pointer_move(pos.x);
                }
                if let Some(ghost) = rescheduler.ghost() {
                    draw_ghost(&painter, bars_origin, ghost, &metrics);
                }
                if released {
                    // Discards are logged by the rescheduler; the bar just snaps back.
                    let mut sink = CollectedChanges::default();
                    rescheduler.release(&mut sink);
                    interaction.changes = sink.0;
                }
            }
        });

    interaction
}

/// Bar and grab mode under a screen position.
fn bar_at(bars: &[BarLayout], bars_origin: Pos2, pos: Pos2) -> Option<(&BarLayout, DragMode)> {
    let local = pos - bars_origin;
    hit_test(bars, local.x, local.y)
}

fn bar_rect(bars_origin: Pos2, bar: &BarLayout) -> Rect {
    Rect::from_min_size(
        bars_origin + Vec2::new(bar.left, bar.top),
        Vec2::new((bar.width - 1.0).max(1.0), bar.height),
    )
}

fn show_task_tooltip(ui: &Ui, response: &Response, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        response.layer_id,
        Id::new(("task-tip", task.id.as_str())),
        |ui| {
            ui.strong(task.display_label());
            ui.label(format!("Start: {}", format_day(task.start)));
            ui.label(format!("Due: {}", format_day(task.due)));
            ui.label(format!("Status: {}", task.status.label()));
            if let Some(assignee) = &task.assignee {
                ui.label(format!("Assignee: {}", assignee));
            }
        },
    );
}

fn draw_day_columns(painter: &egui::Painter, origin: Pos2, grid: &DateGrid, bottom: f32) {
    let dw = grid.day_width();
    for i in 0..grid.total_days() {
        let x = origin.x + i as f32 * dw;
        let date = grid.day_at(i);
        if date.weekday().num_days_from_monday() >= 5 {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x, origin.y + theme::HEADER_HEIGHT), Pos2::new(x + dw, bottom)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [
                Pos2::new(x + dw, origin.y + theme::HEADER_HEIGHT),
                Pos2::new(x + dw, bottom),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_timeline_header(painter: &egui::Painter, origin: Pos2, grid: &DateGrid, width: f32) {
    let half = theme::HEADER_HEIGHT / 2.0;
    let dw = grid.day_width();

    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, theme::HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    for y in [origin.y + half, origin.y + theme::HEADER_HEIGHT] {
        painter.line_segment(
            [Pos2::new(origin.x, y), Pos2::new(origin.x + width, y)],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
    }

    for i in 0..grid.total_days() {
        let date = grid.day_at(i);
        let x = origin.x + i as f32 * dw;

        if i == 0 || date.day() == 1 {
            if i > 0 {
                painter.line_segment(
                    [Pos2::new(x, origin.y), Pos2::new(x, origin.y + half)],
                    Stroke::new(1.0, theme::BORDER_SUBTLE),
                );
            }
            painter.text(
                Pos2::new(x + 5.0, origin.y + half / 2.0),
                Align2::LEFT_CENTER,
                date.format("%B %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        if dw >= 18.0 {
            let is_weekend = date.weekday().num_days_from_monday() >= 5;
            painter.text(
                Pos2::new(x + dw / 2.0, origin.y + half + half / 2.0),
                Align2::CENTER_CENTER,
                date.day().to_string(),
                theme::font_sub(),
                if is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY },
            );
        }
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, offset: f32, bottom: f32) {
    let x = origin.x + offset;
    painter.line_segment(
        [Pos2::new(x, origin.y + theme::HEADER_HEIGHT), Pos2::new(x, bottom)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + theme::HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(painter: &egui::Painter, bar_rect: Rect, task: &Task, is_selected: bool, is_dragged: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let mut color = theme::status_color(task.status);
    if is_dragged {
        color = color.gamma_multiply(0.5);
    }

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, color);

    let progress = task.status.progress();
    if progress > 0.0 {
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(bar_rect.width() * progress, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(task.display_label(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect.shrink2(Vec2::new(6.0, 0.0)));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(Pos2::new(bar_rect.left() + 8.0, text_y), galley, Color32::TRANSPARENT);
    }
}

fn draw_handles(painter: &egui::Painter, bars_origin: Pos2, bar: &BarLayout) {
    for span in [bar.start_handle, bar.end_handle] {
        let rect = Rect::from_min_max(
            bars_origin + Vec2::new(span.left, bar.top),
            bars_origin + Vec2::new(span.right, bar.top + bar.height),
        );
        let pill = Rect::from_center_size(rect.center(), Vec2::new(3.0, rect.height() * 0.6));
        painter.rect_filled(pill, Rounding::same(1.5), theme::HANDLE_COLOR);
    }
}

fn draw_ghost(painter: &egui::Painter, bars_origin: Pos2, ghost: &GhostPreview, metrics: &RowMetrics) {
    if ghost.width <= 0.0 {
        return;
    }
    let rect = Rect::from_min_size(
        bars_origin + Vec2::new(ghost.left, ghost.top),
        Vec2::new((ghost.width - 1.0).max(1.0), metrics.bar_height),
    );
    painter.rect_filled(rect, Rounding::same(theme::BAR_ROUNDING), theme::GHOST_FILL);
    let outline = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(Shape::dashed_line(&outline, Stroke::new(2.0, theme::GHOST_BORDER), 5.0, 3.0));

    let label = format!("{} → {}", format_day(ghost.start), format_day(ghost.due));
    let galley = painter.layout_no_wrap(label, theme::font_bar(), theme::GHOST_TEXT);
    let clipped = painter.with_clip_rect(rect);
    let pos = rect.center() - galley.size() / 2.0;
    clipped.galley(pos, galley, Color32::TRANSPARENT);
}
